//! `obesity-core` — feature schema and request-side building blocks.
//!
//! This crate knows nothing about model artifacts or HTTP. It defines the 16-column
//! training schema, the single-row record built per request, how raw parameters are
//! coerced into it, and the error model shared by the rest of the workspace.

pub mod error;
pub mod feature;
pub mod id;
pub mod input;
pub mod prediction;
pub mod record;

pub use error::{PredictionError, PredictionResult};
pub use feature::{Feature, FeatureKind, UnknownFeature};
pub use id::PredictionId;
pub use input::{AssembledRecord, DefaultReason, Defaulted, InputPolicy, assemble, parse_numeric};
pub use prediction::Prediction;
pub use record::{FeatureRecord, FeatureValue};
