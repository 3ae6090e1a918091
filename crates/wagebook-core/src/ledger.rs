//! The ledger controller.
//!
//! Owns the application state, the session and the store. Every mutation goes
//! through here and is flushed to the store before the call returns. Derived
//! values (monthly total, default rate, month grid) are recomputed on every
//! read.

use chrono::NaiveDate;

use crate::aggregate::monthly_total;
use crate::calendar::{MonthCursor, MonthView};
use crate::currency::Currency;
use crate::date_key::DateKey;
use crate::error::Result;
use crate::rate::resolve_default_rate;
use crate::record::{DailyRecord, RecordMap, SalaryInputs, DEFAULT_HOURLY_RATE};
use crate::record_store;
use crate::session::{Mode, Screen, Session};
use crate::storage::KeyValueStore;

/// Process-wide state loaded at startup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub records: RecordMap,
    pub currency: Currency,
    pub quick: SalaryInputs,
}

impl AppState {
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        Self {
            records: record_store::load(store),
            currency: record_store::load_currency(store),
            quick: record_store::load_quick_inputs(store),
        }
    }
}

pub struct Ledger<S: KeyValueStore> {
    store: S,
    state: AppState,
    session: Session,
    cursor: MonthCursor,
    fallback_rate: f64,
}

impl<S: KeyValueStore> Ledger<S> {
    /// Load state from `store` and show the month containing `today`.
    pub fn open(store: S, today: NaiveDate) -> Self {
        let state = AppState::load(&store);
        tracing::debug!(
            records = state.records.len(),
            currency = %state.currency,
            "ledger opened"
        );
        Self {
            store,
            state,
            session: Session::new(),
            cursor: MonthCursor::containing(today),
            fallback_rate: DEFAULT_HOURLY_RATE,
        }
    }

    /// Rate used when there are no records and the quick calculator has no rate.
    #[must_use]
    pub fn with_fallback_rate(mut self, rate: f64) -> Self {
        self.fallback_rate = rate;
        self
    }

    #[must_use]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    #[must_use]
    pub fn records(&self) -> &RecordMap {
        &self.state.records
    }

    #[must_use]
    pub fn currency(&self) -> Currency {
        self.state.currency
    }

    #[must_use]
    pub fn quick_inputs(&self) -> SalaryInputs {
        self.state.quick
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.session.screen()
    }

    #[must_use]
    pub fn cursor(&self) -> MonthCursor {
        self.cursor
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    // === Derived views ===

    /// Rate to pre-fill for a blank day: latest record's rate, else the
    /// quick-calculator rate if set, else the configured fallback.
    #[must_use]
    pub fn default_rate(&self) -> f64 {
        let fallback = if self.state.quick.hourly_rate > 0.0 {
            self.state.quick.hourly_rate
        } else {
            self.fallback_rate
        };
        resolve_default_rate(&self.state.records, fallback)
    }

    /// Buffer the editor would open with for `date`.
    #[must_use]
    pub fn seed_for(&self, date: &DateKey) -> SalaryInputs {
        match self.state.records.get(date) {
            Some(record) => record.inputs(),
            None => SalaryInputs::new(self.default_rate(), 0.0),
        }
    }

    #[must_use]
    pub fn monthly_total(&self) -> i64 {
        monthly_total(&self.state.records, self.cursor.year(), self.cursor.month())
    }

    #[must_use]
    pub fn month_view(&self) -> MonthView {
        MonthView::build(&self.state.records, self.cursor)
    }

    #[must_use]
    pub fn quick_total(&self) -> i64 {
        self.state.quick.total()
    }

    // === Session transitions ===

    /// # Errors
    ///
    /// Fails unless the calendar is showing.
    pub fn select_date(&mut self, date: DateKey) -> Result<()> {
        let seed = self.seed_for(&date);
        self.session.select_date(date, seed)?;
        Ok(())
    }

    /// # Errors
    ///
    /// Fails when no editor is open.
    pub fn edit_rate(&mut self, raw: &str) -> Result<()> {
        self.session.buffer_mut()?.set_rate_text(raw);
        Ok(())
    }

    /// # Errors
    ///
    /// Fails when no editor is open.
    pub fn edit_hours(&mut self, raw: &str) -> Result<()> {
        self.session.buffer_mut()?.set_hours_text(raw);
        Ok(())
    }

    /// Store the open editor's record under its date and return to the calendar.
    ///
    /// # Errors
    ///
    /// Fails when no editor is open.
    pub fn save(&mut self) -> Result<(DateKey, DailyRecord)> {
        let (date, record) = self.session.save()?;
        self.state.records = record_store::upsert(&self.state.records, date, record);
        record_store::save(&mut self.store, &self.state.records);
        tracing::info!(%date, total = record.total, "saved daily record");
        Ok((date, record))
    }

    /// # Errors
    ///
    /// Fails when no editor is open.
    pub fn back(&mut self) -> Result<()> {
        self.session.back()?;
        Ok(())
    }

    /// # Errors
    ///
    /// Fails while an editor is open.
    pub fn set_mode(&mut self, mode: Mode) -> Result<()> {
        self.session.set_mode(mode)?;
        Ok(())
    }

    /// # Errors
    ///
    /// Fails while an editor is open.
    pub fn toggle_mode(&mut self) -> Result<Mode> {
        Ok(self.session.toggle_mode()?)
    }

    pub fn shift_month(&mut self, months: i32) {
        self.cursor = self.cursor.shift(months);
    }

    pub fn show_month(&mut self, cursor: MonthCursor) {
        self.cursor = cursor;
    }

    // === Global settings ===

    pub fn set_currency(&mut self, currency: Currency) {
        self.state.currency = currency;
        record_store::save_currency(&mut self.store, currency);
    }

    pub fn set_quick_rate(&mut self, raw: &str) {
        self.state.quick.set_rate_text(raw);
        record_store::save_quick_inputs(&mut self.store, &self.state.quick);
    }

    pub fn set_quick_hours(&mut self, raw: &str) {
        self.state.quick.set_hours_text(raw);
        record_store::save_quick_inputs(&mut self.store, &self.state.quick);
    }

    /// Drop every record, in memory and in the store, once the caller has
    /// confirmed. Returns whether anything was cleared.
    pub fn clear_all(&mut self, confirmed: bool) -> bool {
        if !confirmed {
            tracing::debug!("clear all declined");
            return false;
        }
        self.state.records = record_store::clear_all();
        record_store::purge(&mut self.store);
        tracing::info!("cleared all records");
        true
    }
}
