//! Daily salary records and the date-keyed record map.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::calculator::compute_total;
use crate::date_key::{parse_key, DateKey};
use crate::input::{clamp_amount, parse_amount};

/// Hourly rate used when nothing else is known.
pub const DEFAULT_HOURLY_RATE: f64 = 183.0;

/// Rate and hours being worked on, either in the quick calculator or in the
/// single-day editor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryInputs {
    pub hourly_rate: f64,
    pub work_hours: f64,
}

impl Default for SalaryInputs {
    fn default() -> Self {
        Self {
            hourly_rate: DEFAULT_HOURLY_RATE,
            work_hours: 0.0,
        }
    }
}

impl SalaryInputs {
    #[must_use]
    pub fn new(hourly_rate: f64, work_hours: f64) -> Self {
        Self {
            hourly_rate: clamp_amount(hourly_rate),
            work_hours: clamp_amount(work_hours),
        }
    }

    /// Replace the rate from raw text; unreadable text becomes 0.
    pub fn set_rate_text(&mut self, raw: &str) {
        self.hourly_rate = parse_amount(raw);
    }

    /// Replace the hours from raw text; unreadable text becomes 0.
    pub fn set_hours_text(&mut self, raw: &str) {
        self.work_hours = parse_amount(raw);
    }

    #[must_use]
    pub fn total(&self) -> i64 {
        compute_total(self.hourly_rate, self.work_hours)
    }
}

/// One day's logged work. `total` is always the calculator's output for the
/// stored rate and hours at the time the record was built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRecord {
    pub hourly_rate: f64,
    pub work_hours: f64,
    pub total: i64,
}

impl DailyRecord {
    #[must_use]
    pub fn from_inputs(inputs: SalaryInputs) -> Self {
        let hourly_rate = clamp_amount(inputs.hourly_rate);
        let work_hours = clamp_amount(inputs.work_hours);
        Self {
            hourly_rate,
            work_hours,
            total: compute_total(hourly_rate, work_hours),
        }
    }

    #[must_use]
    pub fn inputs(&self) -> SalaryInputs {
        SalaryInputs {
            hourly_rate: self.hourly_rate,
            work_hours: self.work_hours,
        }
    }
}

/// All recorded days keyed by ISO date string.
///
/// Keys written through [`RecordMap::with_record`] are always well-formed.
/// Keys loaded from storage are kept as-is; readers that need dates go
/// through [`RecordMap::dated`], which skips malformed keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordMap(BTreeMap<String, DailyRecord>);

impl RecordMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn get(&self, date: &DateKey) -> Option<&DailyRecord> {
        self.0.get(&date.as_key())
    }

    /// Map over raw storage keys, kept verbatim.
    pub(crate) fn from_raw(entries: BTreeMap<String, DailyRecord>) -> Self {
        Self(entries)
    }

    /// A copy of this map with `date` set to `record`.
    #[must_use]
    pub fn with_record(&self, date: DateKey, record: DailyRecord) -> Self {
        let mut next = self.0.clone();
        next.insert(date.as_key(), record);
        Self(next)
    }

    /// Entries whose key is a well-formed date, in date order.
    pub fn dated(&self) -> impl DoubleEndedIterator<Item = (DateKey, &DailyRecord)> {
        self.0.iter().filter_map(|(k, v)| match parse_key(k) {
            Some(date) => Some((DateKey::new(date), v)),
            None => {
                tracing::debug!(key = %k, "skipping malformed record key");
                None
            }
        })
    }
}
