//! Default hourly rate for a blank day.

use crate::record::RecordMap;

/// The hourly rate of the most recent record, or `fallback` when there is none.
///
/// "Most recent" is the greatest well-formed key. Keys are zero-padded ISO
/// dates, so that is also the latest date. Malformed keys are ignored.
#[must_use]
pub fn resolve_default_rate(records: &RecordMap, fallback: f64) -> f64 {
    records
        .dated()
        .next_back()
        .map_or(fallback, |(_, record)| record.hourly_rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_key_wins() {
        let payload = r#"{
            "2024-02-01":{"hourlyRate":250,"workHours":1,"total":250},
            "2024-01-05":{"hourlyRate":200,"workHours":1,"total":200}
        }"#;
        let map: RecordMap = serde_json::from_str(payload).unwrap();
        assert_eq!(resolve_default_rate(&map, 183.0), 250.0);
    }

    #[test]
    fn empty_map_uses_fallback() {
        assert_eq!(resolve_default_rate(&RecordMap::new(), 183.0), 183.0);
    }

    #[test]
    fn malformed_keys_do_not_win() {
        let payload = r#"{
            "2024-01-05":{"hourlyRate":200,"workHours":1,"total":200},
            "zzzz":{"hourlyRate":999,"workHours":1,"total":999}
        }"#;
        let map: RecordMap = serde_json::from_str(payload).unwrap();
        assert_eq!(resolve_default_rate(&map, 183.0), 200.0);
    }

    #[test]
    fn only_malformed_keys_falls_back() {
        let payload = r#"{"zzzz":{"hourlyRate":999,"workHours":1,"total":999}}"#;
        let map: RecordMap = serde_json::from_str(payload).unwrap();
        assert_eq!(resolve_default_rate(&map, 150.0), 150.0);
    }
}
