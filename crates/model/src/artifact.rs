//! On-disk artifact formats.
//!
//! Both artifacts are JSON documents produced by an external export step. These
//! types mirror the documents one-to-one; validation happens when they are turned
//! into a [`crate::Pipeline`] or [`crate::LabelDecoder`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;

use crate::error::ArtifactError;

/// Only artifact layout this build understands.
pub const FORMAT_VERSION: u32 = 1;

/// `trained_model.json`: preprocessing followed by one estimator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierArtifact {
    pub format_version: u32,
    pub preprocessor: PreprocessorSpec,
    pub estimator: EstimatorSpec,
}

/// Column transforms, applied in listed order and concatenated.
///
/// Schema columns that are not listed are dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreprocessorSpec {
    pub columns: Vec<ColumnSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Training column name, e.g. `"family_history_with_overweight"`.
    pub name: String,
    pub encoding: EncodingSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncodingSpec {
    /// Numeric value copied as-is.
    Passthrough,
    /// Numeric `(x - mean) / scale`.
    StandardScale { mean: f64, scale: f64 },
    /// Categorical value expanded to one indicator per category.
    OneHot {
        categories: Vec<String>,
        #[serde(default)]
        handle_unknown: HandleUnknown,
    },
    /// Categorical value replaced by its position in `categories`.
    Ordinal {
        categories: Vec<String>,
        #[serde(default)]
        unknown_value: Option<f64>,
    },
}

/// What a one-hot column does with a category it was not fitted on.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandleUnknown {
    /// Fail the prediction.
    #[default]
    Error,
    /// Emit all-zero indicators.
    Ignore,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EstimatorSpec {
    DecisionTree {
        n_classes: usize,
        nodes: Vec<NodeSpec>,
    },
    RandomForest {
        n_classes: usize,
        trees: Vec<TreeSpec>,
    },
    /// One coefficient row per class, or a single row for a binary model.
    LogisticRegression {
        coefficients: Vec<Vec<f64>>,
        intercepts: Vec<f64>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeSpec {
    pub nodes: Vec<NodeSpec>,
}

/// Tree node; node `0` is the root.
///
/// A sample goes `left` when `x[feature] <= threshold`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeSpec {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: Vec<f64>,
    },
}

/// `label_encoder.json`: class index `i` decodes to `classes[i]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelEncoderArtifact {
    pub classes: Vec<String>,
}

/// Read and deserialize a JSON artifact.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let text = std::fs::read_to_string(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
