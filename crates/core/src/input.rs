//! Coercion of flat request parameters into a [`FeatureRecord`].
//!
//! Lenient by default: an absent or unparseable measurement becomes `0.0` and an
//! absent label becomes `""`. Nothing checks ranges or vocabularies; unusual
//! values reach the classifier as-is. [`InputPolicy::Strict`] turns every
//! defaulted field into an error instead.

use core::str::FromStr;

use crate::error::{PredictionError, PredictionResult};
use crate::feature::{Feature, FeatureKind};
use crate::record::FeatureRecord;

/// How to treat fields that would otherwise be silently defaulted.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum InputPolicy {
    #[default]
    Lenient,
    Strict,
}

impl InputPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputPolicy::Lenient => "lenient",
            InputPolicy::Strict => "strict",
        }
    }
}

impl FromStr for InputPolicy {
    type Err = PredictionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lenient" => Ok(InputPolicy::Lenient),
            "strict" => Ok(InputPolicy::Strict),
            other => Err(PredictionError::invalid_input(format!(
                "input policy must be 'lenient' or 'strict', got '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultReason {
    Missing,
    Unparseable(String),
}

impl core::fmt::Display for DefaultReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DefaultReason::Missing => f.write_str("missing"),
            DefaultReason::Unparseable(raw) => write!(f, "unparseable value '{raw}'"),
        }
    }
}

/// A field that did not come from the request as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Defaulted {
    pub feature: Feature,
    pub reason: DefaultReason,
}

/// Output of [`assemble`]: the record plus what was filled in.
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledRecord {
    pub record: FeatureRecord,
    pub defaulted: Vec<Defaulted>,
}

/// Parse a measurement. Only finite values count as parsed.
pub fn parse_numeric(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Build a record from `(param, value)` pairs.
///
/// Unknown parameters are ignored; for repeated parameters the first occurrence wins.
pub fn assemble<'a, I>(params: I, policy: InputPolicy) -> PredictionResult<AssembledRecord>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut raw: [Option<&'a str>; Feature::COUNT] = [None; Feature::COUNT];
    for (key, value) in params {
        if let Some(feature) = Feature::from_param(key) {
            raw[feature.index()].get_or_insert(value);
        }
    }

    let mut record = FeatureRecord::default();
    let mut defaulted = Vec::new();

    for feature in Feature::ALL {
        let Some(text) = raw[feature.index()] else {
            defaulted.push(Defaulted {
                feature,
                reason: DefaultReason::Missing,
            });
            continue;
        };

        match feature.kind() {
            FeatureKind::Numeric => match parse_numeric(text) {
                Some(v) => {
                    if let Some(slot) = record.numeric_mut(feature) {
                        *slot = v;
                    }
                }
                None => defaulted.push(Defaulted {
                    feature,
                    reason: DefaultReason::Unparseable(text.to_string()),
                }),
            },
            FeatureKind::Categorical => {
                if let Some(slot) = record.categorical_mut(feature) {
                    *slot = text.to_string();
                }
            }
        }
    }

    if policy == InputPolicy::Strict && !defaulted.is_empty() {
        let fields: Vec<String> = defaulted
            .iter()
            .map(|d| format!("{} ({})", d.feature.param(), d.reason))
            .collect();
        return Err(PredictionError::invalid_input(format!(
            "rejected fields: {}",
            fields.join(", ")
        )));
    }

    for d in &defaulted {
        tracing::warn!(param = d.feature.param(), reason = %d.reason, "defaulting input field");
    }

    Ok(AssembledRecord { record, defaulted })
}
