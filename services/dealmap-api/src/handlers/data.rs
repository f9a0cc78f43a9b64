//! Raw CRM relay.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::state::AppState;

/// GET /api/data
///
/// Returns the CRM deal list response as-is. Failures answer with the
/// error's status code and `{"error": message}`.
pub async fn data_handler(Extension(state): Extension<Arc<AppState>>) -> Response {
    match state.source.fetch_raw().await {
        Ok(body) => Json(body).into_response(),
        Err(e) => {
            tracing::error!("Failed to fetch deals: {}", e);
            let status = StatusCode::from_u16(e.http_status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, Json(json!({ "error": e.to_string() }))).into_response()
        }
    }
}
