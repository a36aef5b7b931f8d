use serde::{Deserialize, Serialize};

use crate::id::PredictionId;

/// A decoded classifier output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prediction {
    pub id: PredictionId,
    /// Raw class index produced by the classifier.
    pub class_index: usize,
    /// Label recovered through the label decoder.
    pub label: String,
}
