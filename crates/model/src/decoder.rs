use std::path::Path;

use obesity_core::{PredictionError, PredictionResult};

use crate::artifact::{self, LabelEncoderArtifact};
use crate::error::ArtifactError;

/// Maps class indices back to the category names seen at training time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelDecoder {
    classes: Vec<String>,
}

impl LabelDecoder {
    pub fn from_artifact(artifact: LabelEncoderArtifact) -> Result<Self, ArtifactError> {
        let classes = artifact.classes;
        if classes.is_empty() {
            return Err(ArtifactError::invalid("label encoder has no classes"));
        }
        for (i, c) in classes.iter().enumerate() {
            if classes[..i].contains(c) {
                return Err(ArtifactError::invalid(format!("duplicate class label '{c}'")));
            }
        }
        Ok(Self { classes })
    }

    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        Self::from_artifact(artifact::read_json(path)?)
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn inverse_transform(&self, class_index: usize) -> PredictionResult<&str> {
        self.classes
            .get(class_index)
            .map(String::as_str)
            .ok_or_else(|| {
                PredictionError::decode(format!(
                    "class index {class_index} is not among the {} known labels",
                    self.classes.len()
                ))
            })
    }
}
