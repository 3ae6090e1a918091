//! Monthly aggregation over the record map.

use chrono::NaiveDate;

use crate::record::{DailyRecord, RecordMap};

/// Sum of `total` across every record dated in `year`/`month` (1-12).
///
/// Malformed keys are skipped. An empty map sums to 0. The sum saturates at
/// `i64::MAX` instead of overflowing.
#[must_use]
pub fn monthly_total(records: &RecordMap, year: i32, month: u32) -> i64 {
    records
        .dated()
        .filter(|(key, _)| key.year() == year && key.month() == month)
        .map(|(_, record)| record.total)
        .fold(0i64, i64::saturating_add)
}

/// Records dated in `year`/`month`, in date order.
#[must_use]
pub fn month_entries(records: &RecordMap, year: i32, month: u32) -> Vec<(NaiveDate, &DailyRecord)> {
    records
        .dated()
        .filter(|(key, _)| key.year() == year && key.month() == month)
        .map(|(key, record)| (key.date(), record))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::SalaryInputs;

    fn sample() -> RecordMap {
        let payload = r#"{
            "2024-01-15":{"hourlyRate":200,"workHours":8,"total":1600},
            "2024-02-01":{"hourlyRate":250,"workHours":4,"total":1000},
            "2024-02-20":{"hourlyRate":250,"workHours":2,"total":500},
            "2023-02-10":{"hourlyRate":100,"workHours":1,"total":100},
            "2024-02":{"hourlyRate":1,"workHours":1,"total":9999},
            "oops":{"hourlyRate":1,"workHours":1,"total":9999}
        }"#;
        serde_json::from_str(payload).unwrap()
    }

    #[test]
    fn empty_map_sums_to_zero() {
        let empty = RecordMap::new();
        assert_eq!(monthly_total(&empty, 2024, 1), 0);
        assert_eq!(monthly_total(&empty, 1999, 12), 0);
    }

    #[test]
    fn only_matching_month_counts() {
        let map = sample();
        assert_eq!(monthly_total(&map, 2024, 2), 1500);
        assert_eq!(monthly_total(&map, 2024, 1), 1600);
        assert_eq!(monthly_total(&map, 2023, 2), 100);
        assert_eq!(monthly_total(&map, 2024, 3), 0);
    }

    #[test]
    fn huge_totals_saturate_instead_of_overflowing() {
        let mut inputs = SalaryInputs::default();
        inputs.set_rate_text("1e18");
        inputs.set_hours_text("100");
        let record = crate::record::DailyRecord::from_inputs(inputs);
        assert_eq!(record.total, i64::MAX);

        let map = RecordMap::new()
            .with_record("2024-02-01".parse().unwrap(), record)
            .with_record("2024-02-02".parse().unwrap(), record);
        assert_eq!(monthly_total(&map, 2024, 2), i64::MAX);
    }

    #[test]
    fn january_record_does_not_leak_into_february() {
        let record = crate::record::DailyRecord::from_inputs(SalaryInputs::new(183.0, 8.0));
        let map = RecordMap::new().with_record("2024-01-15".parse().unwrap(), record);
        assert_eq!(monthly_total(&map, 2024, 2), 0);
        assert_eq!(monthly_total(&map, 2024, 1), 1464);
    }

    #[test]
    fn entries_are_date_ordered() {
        let map = sample();
        let days: Vec<String> = month_entries(&map, 2024, 2)
            .into_iter()
            .map(|(d, _)| d.to_string())
            .collect();
        assert_eq!(days, vec!["2024-02-01", "2024-02-20"]);
    }
}
