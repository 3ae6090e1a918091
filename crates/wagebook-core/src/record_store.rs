//! Loading and saving application state through a [`KeyValueStore`].
//!
//! Reads never fail: a missing or unreadable value falls back to its default
//! and the problem is logged. Writes are attempted once and failures are
//! logged, not retried.

use std::collections::BTreeMap;

use crate::currency::Currency;
use crate::date_key::DateKey;
use crate::record::{DailyRecord, RecordMap, SalaryInputs};
use crate::storage::{KeyValueStore, CURRENCY_KEY, QUICK_KEY, RECORDS_KEY};

/// Load the record map. Absent or malformed payloads yield an empty map.
/// Entries whose value does not parse are dropped one by one; the rest load.
pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> RecordMap {
    let Some(raw) = load_json::<BTreeMap<String, serde_json::Value>, _>(store, RECORDS_KEY) else {
        return RecordMap::new();
    };
    let entries = raw
        .into_iter()
        .filter_map(|(key, value)| match serde_json::from_value::<DailyRecord>(value) {
            Ok(record) => Some((key, record)),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "dropping unreadable record");
                None
            }
        })
        .collect();
    RecordMap::from_raw(entries)
}

/// Write the record map through to storage.
pub fn save<S: KeyValueStore + ?Sized>(store: &mut S, records: &RecordMap) {
    save_json(store, RECORDS_KEY, records);
}

/// A copy of `records` with `date` set to `record`, overwriting any entry
/// already there.
#[must_use]
pub fn upsert(records: &RecordMap, date: DateKey, record: DailyRecord) -> RecordMap {
    records.with_record(date, record)
}

/// The empty record map. Callers must also purge the persisted value with
/// [`purge`].
#[must_use]
pub fn clear_all() -> RecordMap {
    RecordMap::new()
}

/// Remove the persisted record map. Currency and quick-calculator values are
/// left in place.
pub fn purge<S: KeyValueStore + ?Sized>(store: &mut S) {
    if let Err(e) = store.remove(RECORDS_KEY) {
        tracing::error!(key = RECORDS_KEY, error = %e, "failed to remove persisted records");
    }
}

/// Load the display currency. Absent or unknown codes yield the default.
pub fn load_currency<S: KeyValueStore + ?Sized>(store: &S) -> Currency {
    match read(store, CURRENCY_KEY) {
        Some(raw) => raw.parse().unwrap_or_else(|e| {
            tracing::warn!(key = CURRENCY_KEY, error = %e, "ignoring stored currency");
            Currency::default()
        }),
        None => Currency::default(),
    }
}

pub fn save_currency<S: KeyValueStore + ?Sized>(store: &mut S, currency: Currency) {
    write(store, CURRENCY_KEY, currency.code());
}

/// Load the quick-calculator buffer. Absent or malformed values yield the default.
pub fn load_quick_inputs<S: KeyValueStore + ?Sized>(store: &S) -> SalaryInputs {
    load_json::<SalaryInputs, _>(store, QUICK_KEY)
        .map(|inputs| SalaryInputs::new(inputs.hourly_rate, inputs.work_hours))
        .unwrap_or_default()
}

pub fn save_quick_inputs<S: KeyValueStore + ?Sized>(store: &mut S, inputs: &SalaryInputs) {
    save_json(store, QUICK_KEY, inputs);
}

fn read<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(key, error = %e, "failed to read persisted value");
            None
        }
    }
}

fn load_json<T, S>(store: &S, key: &str) -> Option<T>
where
    T: serde::de::DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let raw = read(store, key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "failed to parse persisted value, using default");
            None
        }
    }
}

fn save_json<T, S>(store: &mut S, key: &str, value: &T)
where
    T: serde::Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    match serde_json::to_string(value) {
        Ok(json) => write(store, key, &json),
        Err(e) => tracing::error!(key, error = %e, "failed to serialize value"),
    }
}

fn write<S: KeyValueStore + ?Sized>(store: &mut S, key: &str, value: &str) {
    if let Err(e) = store.set(key, value) {
        tracing::error!(key, error = %e, "failed to persist value");
    }
}
