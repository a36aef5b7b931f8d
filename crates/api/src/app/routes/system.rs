use std::sync::Arc;

use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};

use crate::app::{dto, errors};
use crate::context::InferenceContext;

/// Store status. Always 200, degraded or not.
pub async fn health(Extension(ctx): Extension<Arc<InferenceContext>>) -> impl IntoResponse {
    Json(dto::HealthResponse::from(ctx.store().status()))
}

pub async fn not_found() -> axum::response::Response {
    errors::json_error(StatusCode::NOT_FOUND, "not_found", "not found")
}
