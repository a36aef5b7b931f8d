//! `obesity-model`
//!
//! **Responsibility:** the model side of a prediction.
//!
//! - `artifact`: JSON formats of `trained_model.json` and `label_encoder.json`
//! - `preprocess` + `estimator`: the validated classifier pipeline
//! - `decoder`: class index → label
//! - `store`: the immutable, process-wide pair of both, loaded best-effort
//!
//! Nothing here mutates after load.

pub mod artifact;
pub mod classifier;
pub mod decoder;
pub mod error;
pub mod estimator;
pub mod preprocess;
pub mod store;

#[cfg(any(test, feature = "fixtures"))]
pub mod fixtures;

pub use classifier::{Classifier, Pipeline};
pub use decoder::LabelDecoder;
pub use error::ArtifactError;
pub use estimator::Estimator;
pub use store::{
    ArtifactPaths, ArtifactStatus, DEFAULT_LABEL_ENCODER_FILE, DEFAULT_MODEL_FILE, ModelStore, StoreStatus,
};
