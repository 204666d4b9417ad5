//! In-memory quote store (dev/test wiring).

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::store::{Quote, QuoteDraft, QuoteStore, QuoteStoreError};

/// Mutex-guarded in-memory store with the same contract as the SQLite one.
#[derive(Debug, Default)]
pub struct InMemoryQuoteStore {
    inner: Mutex<State>,
}

#[derive(Debug, Default)]
struct State {
    next_id: i64,
    quotes: Vec<Quote>,
}

impl InMemoryQuoteStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl QuoteStore for InMemoryQuoteStore {
    async fn append(&self, draft: QuoteDraft) -> Result<Quote, QuoteStoreError> {
        let mut state = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        state.next_id += 1;
        let quote = Quote {
            id: state.next_id,
            product: draft.product,
            quantity: draft.quantity,
            total: draft.total,
            created_at: Utc::now(),
        };
        state.quotes.push(quote.clone());
        Ok(quote)
    }

    async fn list(&self) -> Result<Vec<Quote>, QuoteStoreError> {
        let state = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        Ok(state.quotes.clone())
    }
}

#[cfg(test)]
mod tests {
    use camocpq_core::Cents;

    use super::*;

    #[tokio::test]
    async fn matches_the_store_contract() {
        let store = InMemoryQuoteStore::new();
        let q1 = store
            .append(QuoteDraft {
                product: "Base Tent".to_string(),
                quantity: 1,
                total: Cents::new(11_000),
            })
            .await
            .unwrap();
        let q2 = store
            .append(QuoteDraft {
                product: "Netting Kit".to_string(),
                quantity: 2,
                total: Cents::new(11_900),
            })
            .await
            .unwrap();

        assert_eq!(q1.id, 1);
        assert_eq!(q2.id, 2);

        let quotes = store.list().await.unwrap();
        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[0].product, "Base Tent");
        assert_eq!(quotes[1].total, Cents::new(11_900));
    }
}
