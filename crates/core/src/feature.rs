//! Feature schema: the 16 training columns, in the order the classifier was fitted on.

use core::str::FromStr;

use thiserror::Error;

/// Whether a column carries a measurement or a label from a small vocabulary.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FeatureKind {
    Numeric,
    Categorical,
}

impl FeatureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureKind::Numeric => "numeric",
            FeatureKind::Categorical => "categorical",
        }
    }
}

/// One column of the training schema.
///
/// Declaration order is the training column order; `Feature::index` relies on it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Feature {
    Gender,
    Age,
    Height,
    Weight,
    FamilyHistory,
    Favc,
    Fcvc,
    Ncp,
    Caec,
    Smoke,
    Ch2o,
    Scc,
    Faf,
    Tue,
    Calc,
    Mtrans,
}

/// Raised when a column or parameter name is not part of the schema.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown feature column: {0}")]
pub struct UnknownFeature(pub String);

const YES_NO: &[&str] = &["yes", "no"];
const FREQUENCY: &[&str] = &["no", "Sometimes", "Frequently", "Always"];

impl Feature {
    pub const COUNT: usize = 16;

    /// All columns in training order.
    pub const ALL: [Feature; Feature::COUNT] = [
        Feature::Gender,
        Feature::Age,
        Feature::Height,
        Feature::Weight,
        Feature::FamilyHistory,
        Feature::Favc,
        Feature::Fcvc,
        Feature::Ncp,
        Feature::Caec,
        Feature::Smoke,
        Feature::Ch2o,
        Feature::Scc,
        Feature::Faf,
        Feature::Tue,
        Feature::Calc,
        Feature::Mtrans,
    ];

    /// Position of this column in the training schema.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Column name as it appeared in the training data.
    pub fn column(self) -> &'static str {
        match self {
            Feature::Gender => "Gender",
            Feature::Age => "Age",
            Feature::Height => "Height",
            Feature::Weight => "Weight",
            Feature::FamilyHistory => "family_history_with_overweight",
            Feature::Favc => "FAVC",
            Feature::Fcvc => "FCVC",
            Feature::Ncp => "NCP",
            Feature::Caec => "CAEC",
            Feature::Smoke => "SMOKE",
            Feature::Ch2o => "CH2O",
            Feature::Scc => "SCC",
            Feature::Faf => "FAF",
            Feature::Tue => "TUE",
            Feature::Calc => "CALC",
            Feature::Mtrans => "MTRANS",
        }
    }

    /// Query parameter carrying this column on the inference endpoint.
    pub fn param(self) -> &'static str {
        match self {
            Feature::Gender => "gender",
            Feature::Age => "age",
            Feature::Height => "height",
            Feature::Weight => "weight",
            Feature::FamilyHistory => "family_history",
            Feature::Favc => "favc",
            Feature::Fcvc => "fcvc",
            Feature::Ncp => "ncp",
            Feature::Caec => "caec",
            Feature::Smoke => "smoke",
            Feature::Ch2o => "ch2o",
            Feature::Scc => "scc",
            Feature::Faf => "faf",
            Feature::Tue => "tue",
            Feature::Calc => "calc",
            Feature::Mtrans => "mtrans",
        }
    }

    pub fn kind(self) -> FeatureKind {
        match self {
            Feature::Age
            | Feature::Height
            | Feature::Weight
            | Feature::Fcvc
            | Feature::Ncp
            | Feature::Ch2o
            | Feature::Faf
            | Feature::Tue => FeatureKind::Numeric,
            Feature::Gender
            | Feature::FamilyHistory
            | Feature::Favc
            | Feature::Caec
            | Feature::Smoke
            | Feature::Scc
            | Feature::Calc
            | Feature::Mtrans => FeatureKind::Categorical,
        }
    }

    /// Values observed for a categorical column at training time.
    ///
    /// Informational only: nothing rejects values outside this list.
    /// Numeric columns return an empty slice.
    pub fn vocabulary(self) -> &'static [&'static str] {
        match self {
            Feature::Gender => &["Male", "Female"],
            Feature::FamilyHistory | Feature::Favc => YES_NO,
            Feature::Smoke | Feature::Scc => &["no", "yes"],
            Feature::Caec | Feature::Calc => FREQUENCY,
            Feature::Mtrans => &[
                "Automobile",
                "Bike",
                "Motorbike",
                "Public_Transportation",
                "Walking",
            ],
            _ => &[],
        }
    }

    pub fn from_column(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.column() == name)
    }

    pub fn from_param(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.param() == name)
    }
}

impl core::fmt::Display for Feature {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for Feature {
    type Err = UnknownFeature;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_column(s).ok_or_else(|| UnknownFeature(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn training_order_is_stable() {
        let columns: Vec<&str> = Feature::ALL.iter().map(|f| f.column()).collect();
        assert_eq!(
            columns,
            vec![
                "Gender",
                "Age",
                "Height",
                "Weight",
                "family_history_with_overweight",
                "FAVC",
                "FCVC",
                "NCP",
                "CAEC",
                "SMOKE",
                "CH2O",
                "SCC",
                "FAF",
                "TUE",
                "CALC",
                "MTRANS",
            ]
        );
        for (i, f) in Feature::ALL.iter().enumerate() {
            assert_eq!(f.index(), i);
        }
    }

    #[test]
    fn eight_numeric_and_eight_categorical() {
        let numeric = Feature::ALL
            .iter()
            .filter(|f| f.kind() == FeatureKind::Numeric)
            .count();
        assert_eq!(numeric, 8);
        assert_eq!(Feature::COUNT - numeric, 8);
    }

    #[test]
    fn params_and_columns_resolve_back() {
        for f in Feature::ALL {
            assert_eq!(Feature::from_param(f.param()), Some(f));
            assert_eq!(f.column().parse::<Feature>(), Ok(f));
        }
        assert_eq!(Feature::from_param("Gender"), None);
        assert_eq!(
            "BMI".parse::<Feature>(),
            Err(UnknownFeature("BMI".to_string()))
        );
    }

    #[test]
    fn only_categorical_columns_have_a_vocabulary() {
        for f in Feature::ALL {
            match f.kind() {
                FeatureKind::Numeric => assert!(f.vocabulary().is_empty(), "{f}"),
                FeatureKind::Categorical => assert!(!f.vocabulary().is_empty(), "{f}"),
            }
        }
    }
}
