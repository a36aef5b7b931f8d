//! Prediction error model.

use thiserror::Error;

/// Result type used along the request-to-prediction path.
pub type PredictionResult<T> = Result<T, PredictionError>;

/// Why a single prediction request failed.
///
/// Every variant is per-request: none of them should take the process down.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PredictionError {
    /// A model artifact was not loaded at startup.
    #[error("model unavailable: {0}")]
    ModelUnavailable(String),

    /// The request could not be turned into a feature record.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The classifier rejected the record (e.g. unknown category).
    #[error("inference failed: {0}")]
    Inference(String),

    /// The predicted class index has no label.
    #[error("label decoding failed: {0}")]
    Decode(String),
}

impl PredictionError {
    pub fn model_unavailable(msg: impl Into<String>) -> Self {
        Self::ModelUnavailable(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn inference(msg: impl Into<String>) -> Self {
        Self::Inference(msg.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Stable machine-readable kind, surfaced to HTTP callers.
    pub fn kind(&self) -> &'static str {
        match self {
            PredictionError::ModelUnavailable(_) => "model_unavailable",
            PredictionError::InvalidInput(_) => "invalid_input",
            PredictionError::Inference(_) => "inference_failed",
            PredictionError::Decode(_) => "decode_failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_are_stable() {
        assert_eq!(PredictionError::model_unavailable("x").kind(), "model_unavailable");
        assert_eq!(PredictionError::invalid_input("x").kind(), "invalid_input");
        assert_eq!(PredictionError::inference("x").kind(), "inference_failed");
        assert_eq!(PredictionError::decode("x").kind(), "decode_failed");
    }

    #[test]
    fn display_includes_message() {
        let err = PredictionError::inference("unknown category 'Unknown' in column Gender");
        assert_eq!(
            err.to_string(),
            "inference failed: unknown category 'Unknown' in column Gender"
        );
    }
}
