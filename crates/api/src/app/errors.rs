use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use obesity_core::PredictionError;

/// Map a failed prediction to its HTTP response.
///
/// Rejected input is the caller's fault (400); everything else is a server-side
/// failure (500), including a store that never finished loading.
pub fn prediction_error_to_response(err: &PredictionError) -> axum::response::Response {
    let status = match err {
        PredictionError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        PredictionError::ModelUnavailable(_)
        | PredictionError::Inference(_)
        | PredictionError::Decode(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    json_error(status, err.kind(), err.to_string())
}

pub fn json_error(
    status: StatusCode,
    kind: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": message.into(),
            "kind": kind,
        })),
    )
        .into_response()
}
