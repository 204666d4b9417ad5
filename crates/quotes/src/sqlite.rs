//! SQLite-backed quote store.

use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};

use camocpq_core::Cents;

use crate::store::{Quote, QuoteDraft, QuoteStore, QuoteStoreError};

/// SQLite-backed quote store.
///
/// Cheap to clone; the pool is shared.
#[derive(Debug, Clone)]
pub struct SqliteQuoteStore {
    pool: SqlitePool,
}

impl SqliteQuoteStore {
    /// Open (creating if missing) a file-backed store.
    pub async fn connect(path: impl AsRef<Path>) -> Result<Self, QuoteStoreError> {
        let options = SqliteConnectOptions::new()
            .filename(path.as_ref())
            .create_if_missing(true);
        let pool = SqlitePool::connect_with(options).await?;
        Self::with_pool(pool).await
    }

    /// In-memory store for dev/test wiring.
    ///
    /// Capped at one connection: each pooled connection would otherwise get
    /// its own private in-memory database.
    pub async fn in_memory() -> Result<Self, QuoteStoreError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;
        Self::with_pool(pool).await
    }

    async fn with_pool(pool: SqlitePool) -> Result<Self, QuoteStoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS quotes (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                product     TEXT NOT NULL,
                quantity    INTEGER NOT NULL,
                total_cents INTEGER NOT NULL,
                created_at  TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl QuoteStore for SqliteQuoteStore {
    async fn append(&self, draft: QuoteDraft) -> Result<Quote, QuoteStoreError> {
        let created_at = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO quotes (product, quantity, total_cents, created_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&draft.product)
        .bind(i64::from(draft.quantity))
        .bind(draft.total.as_u64() as i64)
        .bind(created_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        tracing::debug!(id, product = %draft.product, "quote stored");

        Ok(Quote {
            id,
            product: draft.product,
            quantity: draft.quantity,
            total: draft.total,
            created_at,
        })
    }

    async fn list(&self) -> Result<Vec<Quote>, QuoteStoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, product, quantity, total_cents, created_at
            FROM quotes
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|row| decode_row(&row)).collect()
    }
}

fn decode_row(row: &sqlx::sqlite::SqliteRow) -> Result<Quote, QuoteStoreError> {
    let id: i64 = row.try_get("id")?;
    let product: String = row.try_get("product")?;
    let quantity: i64 = row.try_get("quantity")?;
    let total_cents: i64 = row.try_get("total_cents")?;
    let created_at_raw: String = row.try_get("created_at")?;

    let quantity = u32::try_from(quantity)
        .map_err(|_| QuoteStoreError::Corrupt(format!("quote {id}: quantity {quantity}")))?;
    let total_cents = u64::try_from(total_cents)
        .map_err(|_| QuoteStoreError::Corrupt(format!("quote {id}: total {total_cents}")))?;
    let created_at = DateTime::parse_from_rfc3339(&created_at_raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| QuoteStoreError::Corrupt(format!("quote {id}: created_at {created_at_raw}")))?;

    Ok(Quote {
        id,
        product,
        quantity,
        total: Cents::new(total_cents),
        created_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(product: &str, quantity: u32, cents: u64) -> QuoteDraft {
        QuoteDraft {
            product: product.to_string(),
            quantity,
            total: Cents::new(cents),
        }
    }

    #[tokio::test]
    async fn assigns_incrementing_ids_from_one() {
        let store = SqliteQuoteStore::in_memory().await.unwrap();
        let q1 = store.append(draft("Base Tent", 1, 11_000)).await.unwrap();
        let q2 = store.append(draft("Netting Kit", 2, 11_900)).await.unwrap();
        assert_eq!(q1.id, 1);
        assert_eq!(q2.id, 2);
    }

    #[tokio::test]
    async fn lists_quotes_in_insertion_order() {
        let store = SqliteQuoteStore::in_memory().await.unwrap();
        store.append(draft("Base Tent", 1, 11_000)).await.unwrap();
        store.append(draft("Netting Kit", 3, 17_850)).await.unwrap();

        let quotes = store.list().await.unwrap();
        let products: Vec<&str> = quotes.iter().map(|q| q.product.as_str()).collect();
        assert_eq!(products, ["Base Tent", "Netting Kit"]);
        assert_eq!(quotes[1].quantity, 3);
        assert_eq!(quotes[1].total, Cents::new(17_850));
    }

    #[tokio::test]
    async fn persists_across_reconnects() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quotes.db");

        {
            let store = SqliteQuoteStore::connect(&path).await.unwrap();
            store.append(draft("Base Tent", 1, 11_000)).await.unwrap();
        }

        let store = SqliteQuoteStore::connect(&path).await.unwrap();
        let quotes = store.list().await.unwrap();
        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].product, "Base Tent");
    }
}
