use std::sync::Arc;

use anyhow::Context;

use camocpq_api::app::{build_app, AppState};
use camocpq_catalog::{load_catalog, FileSource, SnapshotCache};
use camocpq_quotes::SqliteQuoteStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    camocpq_observability::init();

    let catalog_path = env_or("CATALOG_PATH", "items/products.json");
    let snapshot_path = env_or("CATALOG_SNAPSHOT", "catalog-snapshot.json");
    let quotes_db = env_or("QUOTES_DB", "quotes.db");
    let bind_addr = env_or("BIND_ADDR", "0.0.0.0:8080");

    let quotes = Arc::new(
        SqliteQuoteStore::connect(&quotes_db)
            .await
            .with_context(|| format!("failed to open quote store at {quotes_db}"))?,
    );

    let source = SnapshotCache::new(FileSource::new(&catalog_path), &snapshot_path);
    let state = match load_catalog(&source).await {
        Ok(catalog) => {
            tracing::info!(
                products = catalog.products().len(),
                addons = catalog.addons().len(),
                "catalog loaded"
            );
            AppState::new(Arc::new(catalog), quotes)
        }
        Err(err) => {
            // Serve anyway: the error is surfaced to clients and the
            // selection engine stays in its empty initial state.
            tracing::error!("failed to load catalog: {err}");
            AppState::inert(err.to_string(), quotes)
        }
    };

    let app = build_app(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| {
        tracing::warn!("{key} not set; using default {default:?}");
        default.to_string()
    })
}
