//! Month cursor and the month grid shown by the log view.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};

use crate::aggregate::monthly_total;
use crate::date_key::DateKey;
use crate::error::DateKeyError;
use crate::record::{DailyRecord, RecordMap};

/// The month currently on display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthCursor {
    year: i32,
    month: u32,
}

impl MonthCursor {
    /// # Errors
    ///
    /// Returns [`DateKeyError::InvalidMonth`] unless `month` is in 1..=12.
    pub fn new(year: i32, month: u32) -> Result<Self, DateKeyError> {
        if (1..=12).contains(&month) {
            Ok(Self { year, month })
        } else {
            Err(DateKeyError::InvalidMonth(format!("{year:04}-{month:02}")))
        }
    }

    #[must_use]
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    #[must_use]
    pub fn year(&self) -> i32 {
        self.year
    }

    #[must_use]
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Move by `months`, carrying into the year.
    #[must_use]
    pub fn shift(&self, months: i32) -> Self {
        let index = self.year * 12 + (self.month as i32 - 1) + months;
        Self {
            year: index.div_euclid(12),
            month: index.rem_euclid(12) as u32 + 1,
        }
    }

    #[must_use]
    pub fn first_day(&self) -> NaiveDate {
        // month is always 1..=12, so day 1 exists for every representable year.
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    #[must_use]
    pub fn days_in_month(&self) -> u32 {
        let next = self.shift(1);
        NaiveDate::from_ymd_opt(next.year, next.month, 1)
            .and_then(|d| d.pred_opt())
            .map_or(31, |d| d.day())
    }
}

impl fmt::Display for MonthCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthCursor {
    type Err = DateKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DateKeyError::InvalidMonth(s.to_string());
        let (y, m) = s.trim().split_once('-').ok_or_else(invalid)?;
        if y.len() != 4 || m.len() != 2 {
            return Err(invalid());
        }
        let year = y.parse().map_err(|_| invalid())?;
        let month = m.parse().map_err(|_| invalid())?;
        Self::new(year, month).map_err(|_| invalid())
    }
}

/// One day in the month grid.
#[derive(Debug, Clone, PartialEq)]
pub struct DayCell {
    pub day: u32,
    pub date: DateKey,
    pub record: Option<DailyRecord>,
}

impl DayCell {
    /// A day is highlighted when it carries a record with positive pay.
    #[must_use]
    pub fn is_highlighted(&self) -> bool {
        self.record.is_some_and(|r| r.total > 0)
    }
}

/// Sunday-first month grid plus the month's total.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthView {
    pub cursor: MonthCursor,
    /// Blank cells before day 1 (0 when the month starts on Sunday).
    pub leading_blanks: u32,
    pub days: Vec<DayCell>,
    pub total: i64,
}

impl MonthView {
    #[must_use]
    pub fn build(records: &RecordMap, cursor: MonthCursor) -> Self {
        let first = cursor.first_day();
        let days = first
            .iter_days()
            .take(cursor.days_in_month() as usize)
            .map(|date| {
                let key = DateKey::from(date);
                DayCell {
                    day: date.day(),
                    date: key,
                    record: records.get(&key).copied(),
                }
            })
            .collect();

        Self {
            cursor,
            leading_blanks: first.weekday().num_days_from_sunday(),
            days,
            total: monthly_total(records, cursor.year, cursor.month),
        }
    }

    /// Grid rows of seven cells; `None` pads before day 1 and after the last day.
    #[must_use]
    pub fn weeks(&self) -> Vec<Vec<Option<&DayCell>>> {
        let mut cells: Vec<Option<&DayCell>> = Vec::new();
        cells.extend((0..self.leading_blanks).map(|_| None));
        cells.extend(self.days.iter().map(Some));
        while cells.len() % 7 != 0 {
            cells.push(None);
        }
        cells.chunks(7).map(<[_]>::to_vec).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::SalaryInputs;

    #[test]
    fn shift_carries_years() {
        let jan = MonthCursor::new(2024, 1).unwrap();
        assert_eq!(jan.shift(-1), MonthCursor::new(2023, 12).unwrap());
        assert_eq!(jan.shift(12), MonthCursor::new(2025, 1).unwrap());
        assert_eq!(jan.shift(-13), MonthCursor::new(2022, 12).unwrap());
        assert_eq!(jan.shift(0), jan);
    }

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(MonthCursor::new(2024, 2).unwrap().days_in_month(), 29);
        assert_eq!(MonthCursor::new(2023, 2).unwrap().days_in_month(), 28);
        assert_eq!(MonthCursor::new(2024, 12).unwrap().days_in_month(), 31);
        assert_eq!(MonthCursor::new(2024, 4).unwrap().days_in_month(), 30);
    }

    #[test]
    fn parse_month() {
        assert_eq!(
            "2024-03".parse::<MonthCursor>().unwrap(),
            MonthCursor::new(2024, 3).unwrap()
        );
        assert!("2024-13".parse::<MonthCursor>().is_err());
        assert!("2024-3".parse::<MonthCursor>().is_err());
        assert!("march".parse::<MonthCursor>().is_err());
    }

    #[test]
    fn month_view_layout_and_total() {
        // 2024-09-01 is a Sunday, 2024-02-01 a Thursday.
        let sept = MonthView::build(&RecordMap::new(), MonthCursor::new(2024, 9).unwrap());
        assert_eq!(sept.leading_blanks, 0);
        assert_eq!(sept.days.len(), 30);

        let record = crate::record::DailyRecord::from_inputs(SalaryInputs::new(183.0, 8.0));
        let map = RecordMap::new().with_record("2024-02-10".parse().unwrap(), record);
        let feb = MonthView::build(&map, MonthCursor::new(2024, 2).unwrap());
        assert_eq!(feb.leading_blanks, 4);
        assert_eq!(feb.days.len(), 29);
        assert_eq!(feb.total, 1464);
        assert!(feb.days[9].is_highlighted());
        assert!(!feb.days[0].is_highlighted());

        let weeks = feb.weeks();
        assert_eq!(weeks.len(), 5);
        assert!(weeks.iter().all(|w| w.len() == 7));
        assert!(weeks[0][3].is_none());
        assert_eq!(weeks[0][4].map(|c| c.day), Some(1));
    }

    #[test]
    fn zero_pay_record_is_not_highlighted() {
        let record = crate::record::DailyRecord::from_inputs(SalaryInputs::new(183.0, 0.0));
        let map = RecordMap::new().with_record("2024-02-10".parse().unwrap(), record);
        let feb = MonthView::build(&map, MonthCursor::new(2024, 2).unwrap());
        assert!(feb.days[9].record.is_some());
        assert!(!feb.days[9].is_highlighted());
    }
}
