use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::app::{errors, AppState};

pub fn router() -> Router {
    Router::new().route("/", get(get_catalog))
}

pub async fn get_catalog(Extension(state): Extension<Arc<AppState>>) -> axum::response::Response {
    if let Some(err) = &state.catalog_error {
        return errors::json_error(
            StatusCode::SERVICE_UNAVAILABLE,
            "catalog_unavailable",
            err.clone(),
        );
    }

    Json(serde_json::json!({
        "products": state.catalog.products(),
        "addons": state.catalog.addons(),
        "product_categories": state.catalog.product_categories(),
        "addon_categories": state.catalog.addon_categories(),
    }))
    .into_response()
}
