//! tally-store - Persistence layer for Tally
//!
//! Provides the calculation record model, a pooled SQLite client, schema
//! bootstrap, the [`CalculationStore`] capability with its SQLite and
//! in-memory variants, and the append-only failure journal.
//!
//! One row is written per completed calculation; rows are never updated
//! or deleted. The storage handle is constructed in `main` and injected
//! into whatever needs it - there is no global singleton.

pub mod client;
pub mod error;
pub mod journal;
pub mod model;
pub mod schema;
pub mod store;

// Re-exports for convenience
pub use client::SqliteClient;
pub use error::{Result, StoreError};
pub use journal::{FailureJournal, DEFAULT_JOURNAL_PATH};
pub use model::{format_timestamp, CalculationRecord, TIMESTAMP_FORMAT};
pub use schema::init_schema;
pub use store::{CalculationStore, MemoryStore, SqliteStore};
