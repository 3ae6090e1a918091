//! # wagebook-store
//!
//! Durable persistence for wagebook.
//!
//! The data directory is the authoritative copy of the ledger. Each key of
//! the [`KeyValueStore`] port is one file in that directory, replaced
//! atomically on every write so a reader never sees a half-written value.

pub mod file_store;

pub use file_store::{FileStore, StoreError};
pub use wagebook_core::storage::KeyValueStore;
