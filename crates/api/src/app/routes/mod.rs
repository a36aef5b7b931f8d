use axum::{Router, routing::get};

pub mod index;
pub mod predict;
pub mod system;

/// Router for the inference endpoints.
pub fn router() -> Router {
    Router::new().route("/predict", get(predict::predict))
}
