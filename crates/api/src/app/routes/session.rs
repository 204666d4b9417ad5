//! Session routes: the engine's four mutating operations plus its derived
//! view. Engine no-ops (unknown SKU, disabled add-on) are not HTTP errors;
//! the response simply reflects the unchanged state.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Json, Router,
};

use camocpq_core::Sku;

use crate::app::{dto, errors, AppState};

pub fn router() -> Router {
    Router::new()
        .route("/", get(get_session))
        .route("/product", put(select_product).delete(clear_product))
        .route("/addons/toggle", post(toggle_addon))
        .route("/addons", delete(clear_addons))
}

fn session_view(state: &AppState) -> dto::SessionView {
    let engine = state.session.lock().unwrap_or_else(|e| e.into_inner());
    dto::SessionView::from_engine(&engine, state.catalog_error.as_deref())
}

fn parse_sku(raw: &str) -> Result<Sku, axum::response::Response> {
    Sku::new(raw).map_err(|e| {
        errors::json_error(StatusCode::BAD_REQUEST, "invalid_sku", e.to_string())
    })
}

pub async fn get_session(Extension(state): Extension<Arc<AppState>>) -> axum::response::Response {
    Json(session_view(&state)).into_response()
}

pub async fn select_product(
    Extension(state): Extension<Arc<AppState>>,
    Json(body): Json<dto::SkuRequest>,
) -> axum::response::Response {
    let sku = match parse_sku(&body.sku) {
        Ok(sku) => sku,
        Err(resp) => return resp,
    };

    {
        let mut engine = state.session.lock().unwrap_or_else(|e| e.into_inner());
        engine.select_product(&sku);
    }
    Json(session_view(&state)).into_response()
}

pub async fn clear_product(
    Extension(state): Extension<Arc<AppState>>,
) -> axum::response::Response {
    {
        let mut engine = state.session.lock().unwrap_or_else(|e| e.into_inner());
        engine.clear_product();
    }
    Json(session_view(&state)).into_response()
}

pub async fn toggle_addon(
    Extension(state): Extension<Arc<AppState>>,
    Json(body): Json<dto::SkuRequest>,
) -> axum::response::Response {
    let sku = match parse_sku(&body.sku) {
        Ok(sku) => sku,
        Err(resp) => return resp,
    };

    {
        let mut engine = state.session.lock().unwrap_or_else(|e| e.into_inner());
        engine.toggle_addon(&sku);
    }
    Json(session_view(&state)).into_response()
}

pub async fn clear_addons(
    Extension(state): Extension<Arc<AppState>>,
) -> axum::response::Response {
    {
        let mut engine = state.session.lock().unwrap_or_else(|e| e.into_inner());
        engine.clear_addons();
    }
    Json(session_view(&state)).into_response()
}
