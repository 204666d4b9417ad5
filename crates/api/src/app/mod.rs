//! HTTP application wiring (Axum router + shared state).
//!
//! Layout mirrors the rest of the workspace:
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request/response DTOs and view mapping
//! - `errors.rs`: consistent JSON error responses

use std::sync::{Arc, Mutex};

use axum::{routing::get, Extension, Router};

use camocpq_catalog::Catalog;
use camocpq_quotes::QuoteStore;
use camocpq_selection::SelectionEngine;

pub mod dto;
pub mod errors;
pub mod routes;

/// Shared application state.
///
/// The session engine sits behind a mutex: operations are single-writer and
/// execute to completion before any other intent observes state.
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub session: Mutex<SelectionEngine>,
    pub quotes: Arc<dyn QuoteStore>,
    /// Set when the catalog provider failed; surfaced to clients while the
    /// engine stays in its empty initial state.
    pub catalog_error: Option<String>,
}

impl AppState {
    /// Wire state from a successfully loaded catalog.
    pub fn new(catalog: Arc<Catalog>, quotes: Arc<dyn QuoteStore>) -> Self {
        Self {
            session: Mutex::new(SelectionEngine::new(Arc::clone(&catalog))),
            catalog,
            quotes,
            catalog_error: None,
        }
    }

    /// Wire state for a failed catalog load: inert engine, error kept for
    /// the presentation layer to show.
    pub fn inert(error: impl Into<String>, quotes: Arc<dyn QuoteStore>) -> Self {
        Self {
            catalog: Arc::new(Catalog::empty()),
            session: Mutex::new(SelectionEngine::inert()),
            quotes,
            catalog_error: Some(error.into()),
        }
    }
}

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .layer(Extension(state))
}
