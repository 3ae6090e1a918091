//! # wagebook-core
//!
//! Core types and logic for the wagebook salary log.
//!
//! This crate holds everything that has an invariant worth testing:
//! - [`DailyRecord`] and the date-keyed [`RecordMap`]
//! - the salary calculator ([`compute_total`]) with its rounding policy
//! - monthly aggregation ([`monthly_total`]) and the month grid ([`MonthView`])
//! - default-rate inference ([`resolve_default_rate`])
//! - input normalization ([`parse_amount`])
//! - the [`Session`] state machine and the [`Ledger`] controller
//! - the [`KeyValueStore`] persistence port with an in-memory implementation
//! - Error hierarchy ([`WagebookError`], [`SessionError`], [`DateKeyError`])

pub mod aggregate;
pub mod calculator;
pub mod calendar;
pub mod currency;
pub mod date_key;
pub mod error;
pub mod input;
pub mod ledger;
pub mod rate;
pub mod record;
pub mod record_store;
pub mod session;
pub mod storage;

pub use aggregate::{month_entries, monthly_total};
pub use calculator::compute_total;
pub use calendar::{DayCell, MonthCursor, MonthView};
pub use currency::{format_amount, Currency};
pub use date_key::DateKey;
pub use error::{DateKeyError, Result, SessionError, WagebookError};
pub use input::parse_amount;
pub use ledger::{AppState, Ledger};
pub use rate::resolve_default_rate;
pub use record::{DailyRecord, RecordMap, SalaryInputs, DEFAULT_HOURLY_RATE};
pub use session::{Editor, Mode, Screen, Session};
pub use storage::{KeyValueStore, MemoryStore};
