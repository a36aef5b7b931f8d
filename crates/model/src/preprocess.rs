//! Column transforms turning a [`FeatureRecord`] into the estimator's input row.

use obesity_core::{Feature, FeatureKind, FeatureRecord, FeatureValue, PredictionError, PredictionResult};

use crate::artifact::{EncodingSpec, HandleUnknown, PreprocessorSpec};
use crate::error::ArtifactError;

#[derive(Debug, Clone, PartialEq)]
enum Encoding {
    Passthrough,
    StandardScale { mean: f64, scale: f64 },
    OneHot { categories: Vec<String>, handle_unknown: HandleUnknown },
    Ordinal { categories: Vec<String>, unknown_value: Option<f64> },
}

impl Encoding {
    fn width(&self) -> usize {
        match self {
            Encoding::OneHot { categories, .. } => categories.len(),
            _ => 1,
        }
    }

    fn expects(&self) -> FeatureKind {
        match self {
            Encoding::Passthrough | Encoding::StandardScale { .. } => FeatureKind::Numeric,
            Encoding::OneHot { .. } | Encoding::Ordinal { .. } => FeatureKind::Categorical,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Column {
    feature: Feature,
    encoding: Encoding,
}

/// Validated preprocessing stage.
#[derive(Debug, Clone, PartialEq)]
pub struct Preprocessor {
    columns: Vec<Column>,
    width: usize,
}

impl Preprocessor {
    pub fn from_spec(spec: PreprocessorSpec) -> Result<Self, ArtifactError> {
        if spec.columns.is_empty() {
            return Err(ArtifactError::invalid("preprocessor has no columns"));
        }

        let mut columns = Vec::with_capacity(spec.columns.len());
        for col in spec.columns {
            let feature = col
                .name
                .parse::<Feature>()
                .map_err(|e| ArtifactError::invalid(e.to_string()))?;

            let encoding = match col.encoding {
                EncodingSpec::Passthrough => Encoding::Passthrough,
                EncodingSpec::StandardScale { mean, scale } => {
                    if !(mean.is_finite() && scale.is_finite() && scale != 0.0) {
                        return Err(ArtifactError::invalid(format!(
                            "column {feature}: standard_scale needs finite mean and non-zero scale"
                        )));
                    }
                    Encoding::StandardScale { mean, scale }
                }
                EncodingSpec::OneHot { categories, handle_unknown } => {
                    check_categories(feature, &categories)?;
                    Encoding::OneHot { categories, handle_unknown }
                }
                EncodingSpec::Ordinal { categories, unknown_value } => {
                    check_categories(feature, &categories)?;
                    if unknown_value.is_some_and(|v| !v.is_finite()) {
                        return Err(ArtifactError::invalid(format!(
                            "column {feature}: unknown_value must be finite"
                        )));
                    }
                    Encoding::Ordinal { categories, unknown_value }
                }
            };

            if encoding.expects() != feature.kind() {
                return Err(ArtifactError::invalid(format!(
                    "column {feature} is {} but its encoding expects {} input",
                    feature.kind().as_str(),
                    encoding.expects().as_str()
                )));
            }

            columns.push(Column { feature, encoding });
        }

        let width = columns.iter().map(|c| c.encoding.width()).sum();
        Ok(Self { columns, width })
    }

    /// Length of the row produced by [`Preprocessor::transform`].
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn transform(&self, record: &FeatureRecord) -> PredictionResult<Vec<f64>> {
        let mut row = Vec::with_capacity(self.width);

        for col in &self.columns {
            match (&col.encoding, record.value(col.feature)) {
                (Encoding::Passthrough, FeatureValue::Numeric(x)) => row.push(x),
                (Encoding::StandardScale { mean, scale }, FeatureValue::Numeric(x)) => {
                    row.push((x - mean) / scale)
                }
                (Encoding::OneHot { categories, handle_unknown }, FeatureValue::Categorical(v)) => {
                    let hit = categories.iter().position(|c| c == v);
                    if hit.is_none() && *handle_unknown == HandleUnknown::Error {
                        return Err(unknown_category(col.feature, v));
                    }
                    row.extend((0..categories.len()).map(|i| if Some(i) == hit { 1.0 } else { 0.0 }));
                }
                (Encoding::Ordinal { categories, unknown_value }, FeatureValue::Categorical(v)) => {
                    match categories.iter().position(|c| c == v) {
                        Some(i) => row.push(i as f64),
                        None => match unknown_value {
                            Some(u) => row.push(*u),
                            None => return Err(unknown_category(col.feature, v)),
                        },
                    }
                }
                (_, value) => {
                    // Kind mismatches are rejected in from_spec.
                    return Err(PredictionError::inference(format!(
                        "column {} received {} input",
                        col.feature,
                        value.kind().as_str()
                    )));
                }
            }
        }

        Ok(row)
    }
}

fn check_categories(feature: Feature, categories: &[String]) -> Result<(), ArtifactError> {
    if categories.is_empty() {
        return Err(ArtifactError::invalid(format!("column {feature}: no categories")));
    }
    for (i, c) in categories.iter().enumerate() {
        if categories[..i].contains(c) {
            return Err(ArtifactError::invalid(format!(
                "column {feature}: duplicate category '{c}'"
            )));
        }
    }
    Ok(())
}

fn unknown_category(feature: Feature, value: &str) -> PredictionError {
    PredictionError::inference(format!(
        "unknown category '{value}' in column {feature}"
    ))
}
