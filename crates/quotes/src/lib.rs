//! `camocpq-quotes` — durable local store for finalized quotes.
//!
//! The store is an opaque append/list collaborator: it accepts a finalized
//! `{product, quantity, total}` record, assigns an auto-incrementing
//! identifier, and returns the full stored list on request.

pub mod memory;
pub mod sqlite;
pub mod store;

pub use memory::InMemoryQuoteStore;
pub use sqlite::SqliteQuoteStore;
pub use store::{Quote, QuoteDraft, QuoteStore, QuoteStoreError};
