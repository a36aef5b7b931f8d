use std::path::Path;

use obesity_core::{FeatureRecord, PredictionResult};

use crate::artifact::{self, ClassifierArtifact, FORMAT_VERSION};
use crate::error::ArtifactError;
use crate::estimator::Estimator;
use crate::preprocess::Preprocessor;

/// A trained model mapping a feature record to a numeric class index.
///
/// Implementations are immutable after construction and shared across requests.
pub trait Classifier: Send + Sync + 'static {
    /// Number of classes the model can emit (indices are `0..n_classes`).
    fn n_classes(&self) -> usize;

    /// Predict the class of a single record.
    fn predict(&self, record: &FeatureRecord) -> PredictionResult<usize>;

    /// Short summary for startup logs and health output.
    fn describe(&self) -> String;
}

/// Preprocessing plus estimator, as exported to `trained_model.json`.
#[derive(Debug, Clone, PartialEq)]
pub struct Pipeline {
    preprocessor: Preprocessor,
    estimator: Estimator,
}

impl Pipeline {
    pub fn from_artifact(artifact: ClassifierArtifact) -> Result<Self, ArtifactError> {
        if artifact.format_version != FORMAT_VERSION {
            return Err(ArtifactError::invalid(format!(
                "unsupported format_version {} (expected {FORMAT_VERSION})",
                artifact.format_version
            )));
        }

        let preprocessor = Preprocessor::from_spec(artifact.preprocessor)?;
        let estimator = Estimator::from_spec(artifact.estimator, preprocessor.width())?;
        Ok(Self { preprocessor, estimator })
    }

    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        Self::from_artifact(artifact::read_json(path)?)
    }

    pub fn estimator(&self) -> &Estimator {
        &self.estimator
    }
}

impl Classifier for Pipeline {
    fn n_classes(&self) -> usize {
        self.estimator.n_classes()
    }

    fn predict(&self, record: &FeatureRecord) -> PredictionResult<usize> {
        let row = self.preprocessor.transform(record)?;
        Ok(self.estimator.predict(&row))
    }

    fn describe(&self) -> String {
        format!(
            "{} over {} inputs",
            self.estimator.describe(),
            self.preprocessor.width()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn artifact(version: u32) -> ClassifierArtifact {
        serde_json::from_value(json!({
            "format_version": version,
            "preprocessor": { "columns": [
                { "name": "Weight", "encoding": "passthrough" },
                { "name": "SMOKE", "encoding": { "one_hot": { "categories": ["no", "yes"] } } }
            ] },
            "estimator": {
                "kind": "decision_tree",
                "n_classes": 2,
                "nodes": [
                    { "feature": 2, "threshold": 0.5, "left": 1, "right": 2 },
                    { "value": [1.0, 0.0] },
                    { "value": [0.0, 1.0] }
                ]
            }
        }))
        .unwrap()
    }

    #[test]
    fn predicts_through_preprocessing() {
        let pipeline = Pipeline::from_artifact(artifact(FORMAT_VERSION)).unwrap();
        assert_eq!(pipeline.n_classes(), 2);
        assert_eq!(pipeline.describe(), "decision_tree(nodes=3, classes=2) over 3 inputs");

        let mut record = FeatureRecord {
            smoke: "no".into(),
            ..FeatureRecord::default()
        };
        assert_eq!(pipeline.predict(&record).unwrap(), 0);

        record.smoke = "yes".into();
        assert_eq!(pipeline.predict(&record).unwrap(), 1);

        record.smoke = String::new();
        assert_eq!(pipeline.predict(&record).unwrap_err().kind(), "inference_failed");
    }

    #[test]
    fn rejects_other_format_versions() {
        let err = Pipeline::from_artifact(artifact(2)).unwrap_err();
        assert!(err.to_string().contains("format_version 2"));
    }
}
