//! Single-row feature record handed to the classifier.

use serde::{Deserialize, Serialize};

use crate::feature::{Feature, FeatureKind};

/// Borrowed view of one cell of a [`FeatureRecord`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum FeatureValue<'a> {
    Numeric(f64),
    Categorical(&'a str),
}

impl FeatureValue<'_> {
    pub fn kind(&self) -> FeatureKind {
        match self {
            FeatureValue::Numeric(_) => FeatureKind::Numeric,
            FeatureValue::Categorical(_) => FeatureKind::Categorical,
        }
    }
}

/// One observation in the training schema.
///
/// `Default` is the all-defaults row: zero for measurements, empty string for labels.
/// Serialized field names are the training column names.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FeatureRecord {
    #[serde(rename = "Gender")]
    pub gender: String,
    #[serde(rename = "Age")]
    pub age: f64,
    #[serde(rename = "Height")]
    pub height: f64,
    #[serde(rename = "Weight")]
    pub weight: f64,
    #[serde(rename = "family_history_with_overweight")]
    pub family_history: String,
    #[serde(rename = "FAVC")]
    pub favc: String,
    #[serde(rename = "FCVC")]
    pub fcvc: f64,
    #[serde(rename = "NCP")]
    pub ncp: f64,
    #[serde(rename = "CAEC")]
    pub caec: String,
    #[serde(rename = "SMOKE")]
    pub smoke: String,
    #[serde(rename = "CH2O")]
    pub ch2o: f64,
    #[serde(rename = "SCC")]
    pub scc: String,
    #[serde(rename = "FAF")]
    pub faf: f64,
    #[serde(rename = "TUE")]
    pub tue: f64,
    #[serde(rename = "CALC")]
    pub calc: String,
    #[serde(rename = "MTRANS")]
    pub mtrans: String,
}

impl FeatureRecord {
    pub fn value(&self, feature: Feature) -> FeatureValue<'_> {
        match feature {
            Feature::Gender => FeatureValue::Categorical(&self.gender),
            Feature::Age => FeatureValue::Numeric(self.age),
            Feature::Height => FeatureValue::Numeric(self.height),
            Feature::Weight => FeatureValue::Numeric(self.weight),
            Feature::FamilyHistory => FeatureValue::Categorical(&self.family_history),
            Feature::Favc => FeatureValue::Categorical(&self.favc),
            Feature::Fcvc => FeatureValue::Numeric(self.fcvc),
            Feature::Ncp => FeatureValue::Numeric(self.ncp),
            Feature::Caec => FeatureValue::Categorical(&self.caec),
            Feature::Smoke => FeatureValue::Categorical(&self.smoke),
            Feature::Ch2o => FeatureValue::Numeric(self.ch2o),
            Feature::Scc => FeatureValue::Categorical(&self.scc),
            Feature::Faf => FeatureValue::Numeric(self.faf),
            Feature::Tue => FeatureValue::Numeric(self.tue),
            Feature::Calc => FeatureValue::Categorical(&self.calc),
            Feature::Mtrans => FeatureValue::Categorical(&self.mtrans),
        }
    }

    /// Mutable slot for a numeric column (`None` for categorical columns).
    pub fn numeric_mut(&mut self, feature: Feature) -> Option<&mut f64> {
        match feature {
            Feature::Age => Some(&mut self.age),
            Feature::Height => Some(&mut self.height),
            Feature::Weight => Some(&mut self.weight),
            Feature::Fcvc => Some(&mut self.fcvc),
            Feature::Ncp => Some(&mut self.ncp),
            Feature::Ch2o => Some(&mut self.ch2o),
            Feature::Faf => Some(&mut self.faf),
            Feature::Tue => Some(&mut self.tue),
            _ => None,
        }
    }

    /// Mutable slot for a categorical column (`None` for numeric columns).
    pub fn categorical_mut(&mut self, feature: Feature) -> Option<&mut String> {
        match feature {
            Feature::Gender => Some(&mut self.gender),
            Feature::FamilyHistory => Some(&mut self.family_history),
            Feature::Favc => Some(&mut self.favc),
            Feature::Caec => Some(&mut self.caec),
            Feature::Smoke => Some(&mut self.smoke),
            Feature::Scc => Some(&mut self.scc),
            Feature::Calc => Some(&mut self.calc),
            Feature::Mtrans => Some(&mut self.mtrans),
            _ => None,
        }
    }

    /// Cells in training column order.
    pub fn iter(&self) -> impl Iterator<Item = (Feature, FeatureValue<'_>)> + '_ {
        Feature::ALL.into_iter().map(move |f| (f, self.value(f)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_kind_matches_schema_kind() {
        let record = FeatureRecord::default();
        for (feature, value) in record.iter() {
            assert_eq!(value.kind(), feature.kind(), "{feature}");
        }
    }

    #[test]
    fn slots_exist_only_for_matching_kind() {
        let mut record = FeatureRecord::default();
        for f in Feature::ALL {
            match f.kind() {
                FeatureKind::Numeric => {
                    assert!(record.numeric_mut(f).is_some());
                    assert!(record.categorical_mut(f).is_none());
                }
                FeatureKind::Categorical => {
                    assert!(record.numeric_mut(f).is_none());
                    assert!(record.categorical_mut(f).is_some());
                }
            }
        }
    }

    #[test]
    fn serializes_with_training_column_names_in_order() {
        let mut record = FeatureRecord::default();
        record.gender = "Male".to_string();
        record.age = 21.0;

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.starts_with(r#"{"Gender":"Male","Age":21.0,"Height":0.0"#));
        assert!(json.contains(r#""family_history_with_overweight":"""#));
        assert!(json.ends_with(r#""MTRANS":""}"#));
    }
}
