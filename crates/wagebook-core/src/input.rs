//! Input normalization for free-text rate and hours entry.
//!
//! Raw text is read the way a browser number field reads it: the longest
//! numeric prefix counts, anything unreadable becomes zero. Errors are never
//! surfaced to the user.

/// Parse a raw text entry into a non-negative amount.
///
/// - leading whitespace is ignored
/// - the longest prefix that reads as a decimal number is used (`"12.5h"` is `12.5`)
/// - no numeric prefix, a negative value, or a non-finite value yields `0.0`
#[must_use]
pub fn parse_amount(raw: &str) -> f64 {
    let text = raw.trim_start();
    let end = numeric_prefix_len(text);
    if end == 0 {
        return 0.0;
    }
    match text[..end].parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => value,
        _ => 0.0,
    }
}

/// Clamp an already-numeric amount to the accepted domain.
#[must_use]
pub fn clamp_amount(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Length in bytes of the longest `[+-]digits[.digits][e[+-]digits]` prefix.
fn numeric_prefix_len(text: &str) -> usize {
    let bytes = text.as_bytes();
    let mut i = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;

    if i < bytes.len() && bytes[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        digits += j - frac_start;
        if digits > 0 {
            i = j;
        }
    }
    if digits == 0 {
        return 0;
    }

    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn plain_numbers_parse() {
        assert_eq!(parse_amount("183"), 183.0);
        assert_eq!(parse_amount("7.5"), 7.5);
        assert_eq!(parse_amount("  8"), 8.0);
        assert_eq!(parse_amount(".5"), 0.5);
        assert_eq!(parse_amount("1e2"), 100.0);
    }

    #[test]
    fn garbage_normalizes_to_zero() {
        assert_eq!(parse_amount("abc"), 0.0);
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("   "), 0.0);
        assert_eq!(parse_amount("."), 0.0);
        assert_eq!(parse_amount("-"), 0.0);
    }

    #[test]
    fn numeric_prefix_wins() {
        assert_eq!(parse_amount("12.5h"), 12.5);
        assert_eq!(parse_amount("8 hours"), 8.0);
        assert_eq!(parse_amount("3e"), 3.0);
    }

    #[test]
    fn negative_and_non_finite_clamp_to_zero() {
        assert_eq!(parse_amount("-4"), 0.0);
        assert_eq!(parse_amount("1e400"), 0.0);
        assert_eq!(clamp_amount(f64::NAN), 0.0);
        assert_eq!(clamp_amount(-1.0), 0.0);
        assert_eq!(clamp_amount(2.5), 2.5);
    }

    proptest! {
        #[test]
        fn never_negative_or_nan(s in ".*") {
            let v = parse_amount(&s);
            prop_assert!(v.is_finite());
            prop_assert!(v >= 0.0);
        }
    }
}
