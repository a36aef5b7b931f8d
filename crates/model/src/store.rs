//! Process-wide model store.
//!
//! Loaded once at startup, then only read. Loading is best-effort: a missing or
//! broken artifact is logged and remembered, and every prediction afterwards
//! fails with `ModelUnavailable` instead of the process refusing to start.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

use obesity_core::{FeatureRecord, Prediction, PredictionError, PredictionId, PredictionResult};

use crate::classifier::{Classifier, Pipeline};
use crate::decoder::LabelDecoder;

pub const DEFAULT_MODEL_FILE: &str = "trained_model.json";
pub const DEFAULT_LABEL_ENCODER_FILE: &str = "label_encoder.json";

/// Where the two artifacts live on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub classifier: PathBuf,
    pub label_decoder: PathBuf,
}

impl ArtifactPaths {
    /// The default artifact filenames inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            classifier: dir.join(DEFAULT_MODEL_FILE),
            label_decoder: dir.join(DEFAULT_LABEL_ENCODER_FILE),
        }
    }
}

/// Load outcome of one artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ArtifactStatus {
    Loaded { summary: String },
    Failed { error: String },
}

impl ArtifactStatus {
    pub fn is_loaded(&self) -> bool {
        matches!(self, ArtifactStatus::Loaded { .. })
    }
}

/// Snapshot reported by the health endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreStatus {
    pub classifier: ArtifactStatus,
    pub label_decoder: ArtifactStatus,
    pub classes: Vec<String>,
    pub loaded_at: DateTime<Utc>,
}

impl StoreStatus {
    pub fn is_ready(&self) -> bool {
        self.classifier.is_loaded() && self.label_decoder.is_loaded()
    }
}

/// Classifier and label decoder, each either loaded or carrying its load error.
pub struct ModelStore {
    classifier: Result<Box<dyn Classifier>, String>,
    decoder: Result<LabelDecoder, String>,
    loaded_at: DateTime<Utc>,
}

impl ModelStore {
    /// Load both artifacts. Never fails; see the module docs.
    pub fn load(paths: &ArtifactPaths) -> Self {
        let classifier = match Pipeline::load(&paths.classifier) {
            Ok(pipeline) => {
                tracing::info!(
                    path = %paths.classifier.display(),
                    model = %pipeline.describe(),
                    "classifier loaded"
                );
                Ok(Box::new(pipeline) as Box<dyn Classifier>)
            }
            Err(e) => {
                tracing::error!(
                    path = %paths.classifier.display(),
                    error = %e,
                    "failed to load classifier; predictions will fail"
                );
                Err(e.to_string())
            }
        };

        let decoder = match LabelDecoder::load(&paths.label_decoder) {
            Ok(decoder) => {
                tracing::info!(
                    path = %paths.label_decoder.display(),
                    classes = decoder.classes().len(),
                    "label decoder loaded"
                );
                Ok(decoder)
            }
            Err(e) => {
                tracing::error!(
                    path = %paths.label_decoder.display(),
                    error = %e,
                    "failed to load label decoder; predictions will fail"
                );
                Err(e.to_string())
            }
        };

        Self::assemble(classifier, decoder)
    }

    /// Build a ready store from in-memory parts.
    pub fn from_parts(classifier: impl Classifier, decoder: LabelDecoder) -> Self {
        Self::assemble(Ok(Box::new(classifier) as Box<dyn Classifier>), Ok(decoder))
    }

    fn assemble(
        classifier: Result<Box<dyn Classifier>, String>,
        decoder: Result<LabelDecoder, String>,
    ) -> Self {
        if let (Ok(c), Ok(d)) = (&classifier, &decoder) {
            if c.n_classes() != d.classes().len() {
                tracing::warn!(
                    model_classes = c.n_classes(),
                    decoder_classes = d.classes().len(),
                    "classifier and label decoder disagree on class count"
                );
            }
        }

        Self {
            classifier,
            decoder,
            loaded_at: Utc::now(),
        }
    }

    /// Run the classifier on `record` and decode its class.
    pub fn predict(&self, id: PredictionId, record: &FeatureRecord) -> PredictionResult<Prediction> {
        let classifier = self
            .classifier
            .as_ref()
            .map_err(|e| PredictionError::model_unavailable(format!("classifier not loaded: {e}")))?;
        let decoder = self
            .decoder
            .as_ref()
            .map_err(|e| PredictionError::model_unavailable(format!("label decoder not loaded: {e}")))?;

        let class_index = classifier.predict(record)?;
        let label = decoder.inverse_transform(class_index)?.to_string();

        Ok(Prediction { id, class_index, label })
    }

    pub fn status(&self) -> StoreStatus {
        let classifier = match &self.classifier {
            Ok(c) => ArtifactStatus::Loaded { summary: c.describe() },
            Err(e) => ArtifactStatus::Failed { error: e.clone() },
        };
        let (label_decoder, classes) = match &self.decoder {
            Ok(d) => (
                ArtifactStatus::Loaded {
                    summary: format!("{} classes", d.classes().len()),
                },
                d.classes().to_vec(),
            ),
            Err(e) => (ArtifactStatus::Failed { error: e.clone() }, Vec::new()),
        };

        StoreStatus {
            classifier,
            label_decoder,
            classes,
            loaded_at: self.loaded_at,
        }
    }
}
