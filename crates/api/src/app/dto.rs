use serde::Serialize;

use obesity_model::StoreStatus;

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub result: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `"ok"` when both artifacts loaded, `"degraded"` otherwise.
    pub status: &'static str,
    #[serde(flatten)]
    pub store: StoreStatus,
}

impl From<StoreStatus> for HealthResponse {
    fn from(store: StoreStatus) -> Self {
        let status = if store.is_ready() { "ok" } else { "degraded" };
        Self { status, store }
    }
}
