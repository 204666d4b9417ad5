//! Quote routes: finalize the current session into the durable store.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use camocpq_quotes::QuoteDraft;

use crate::app::{dto, errors, AppState};

pub fn router() -> Router {
    Router::new().route("/", post(save_quote).get(list_quotes))
}

pub async fn save_quote(
    Extension(state): Extension<Arc<AppState>>,
    Json(body): Json<dto::SaveQuoteRequest>,
) -> axum::response::Response {
    if body.quantity == 0 {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "invalid_quantity",
            "quantity must be at least 1",
        );
    }

    // Snapshot the draft while holding the session lock, release it before
    // touching the store.
    let draft = {
        let engine = state.session.lock().unwrap_or_else(|e| e.into_inner());
        let Some(product) = engine.selected_product() else {
            return errors::json_error(
                StatusCode::CONFLICT,
                "no_product_selected",
                "select a product before saving a quote",
            );
        };
        let Some(total) = engine.total().checked_mul(u64::from(body.quantity)) else {
            return errors::json_error(
                StatusCode::BAD_REQUEST,
                "invalid_quantity",
                "quote total out of range",
            );
        };
        QuoteDraft {
            product: product.name.clone(),
            quantity: body.quantity,
            total,
        }
    };

    match state.quotes.append(draft).await {
        Ok(quote) => (StatusCode::CREATED, Json(dto::QuoteView::from(quote))).into_response(),
        Err(err) => errors::store_error_to_response(err),
    }
}

pub async fn list_quotes(
    Extension(state): Extension<Arc<AppState>>,
) -> axum::response::Response {
    match state.quotes.list().await {
        Ok(quotes) => {
            let views: Vec<dto::QuoteView> = quotes.into_iter().map(dto::QuoteView::from).collect();
            Json(views).into_response()
        }
        Err(err) => errors::store_error_to_response(err),
    }
}
