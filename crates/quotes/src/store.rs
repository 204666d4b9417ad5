//! Quote records and the store contract.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use camocpq_core::Cents;

/// A finalized quote, ready to persist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteDraft {
    /// Display name of the quoted product.
    pub product: String,
    pub quantity: u32,
    /// Exact total in cents (configured price × quantity).
    pub total: Cents,
}

/// A stored quote with its assigned identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub id: i64,
    pub product: String,
    pub quantity: u32,
    pub total: Cents,
    pub created_at: DateTime<Utc>,
}

/// Quote store failure.
#[derive(Debug, Error)]
pub enum QuoteStoreError {
    #[error("storage failure: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("corrupt stored record: {0}")]
    Corrupt(String),
}

/// Append/list contract for the durable quote store.
///
/// Identifiers are assigned by the store, start at 1, and increase
/// monotonically; `list` returns quotes in insertion order.
#[async_trait]
pub trait QuoteStore: Send + Sync {
    async fn append(&self, draft: QuoteDraft) -> Result<Quote, QuoteStoreError>;
    async fn list(&self) -> Result<Vec<Quote>, QuoteStoreError>;
}
