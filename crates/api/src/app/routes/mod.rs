use axum::Router;

pub mod catalog;
pub mod quotes;
pub mod session;
pub mod system;

/// Router for all picker endpoints.
pub fn router() -> Router {
    Router::new()
        .nest("/catalog", catalog::router())
        .nest("/session", session::router())
        .nest("/quotes", quotes::router())
}
