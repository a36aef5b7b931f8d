use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, Query, rejection::QueryRejection},
    http::StatusCode,
    response::IntoResponse,
};

use obesity_core::{Prediction, PredictionError, PredictionId, PredictionResult, assemble};

use crate::app::{dto, errors};
use crate::context::InferenceContext;

/// `GET /predict?gender=..&age=..&...`
///
/// Pairs are kept as a list so repeated keys resolve first-wins instead of
/// failing deserialization.
pub async fn predict(
    Extension(ctx): Extension<Arc<InferenceContext>>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> axum::response::Response {
    let id = PredictionId::new();
    let span = tracing::info_span!("predict", prediction_id = %id);

    let outcome = span.in_scope(|| match query {
        Ok(Query(params)) => run(&ctx, id, &params),
        Err(rejection) => Err(PredictionError::invalid_input(rejection.body_text())),
    });

    match outcome {
        Ok(prediction) => (
            StatusCode::OK,
            Json(dto::PredictResponse {
                result: prediction.label,
            }),
        )
            .into_response(),
        Err(e) => {
            span.in_scope(|| tracing::error!(kind = e.kind(), error = %e, "prediction failed"));
            errors::prediction_error_to_response(&e)
        }
    }
}

fn run(ctx: &InferenceContext, id: PredictionId, params: &[(String, String)]) -> PredictionResult<Prediction> {
    let pairs = params.iter().map(|(k, v)| (k.as_str(), v.as_str()));
    let assembled = assemble(pairs, ctx.policy())?;
    let prediction = ctx.store().predict(id, &assembled.record)?;

    tracing::info!(
        class_index = prediction.class_index,
        label = %prediction.label,
        defaulted = assembled.defaulted.len(),
        "prediction served"
    );
    Ok(prediction)
}
