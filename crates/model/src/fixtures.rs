//! Small hand-built artifacts for tests and benchmarks.
//!
//! The classifier covers all 16 columns and is a two-tree forest over the seven
//! obesity categories. It is not a trained model; its splits are picked so that
//! a handful of inputs have obvious expected labels:
//!
//! | input                           | label                 |
//! |---------------------------------|-----------------------|
//! | male, 75 kg, faf > 0.5          | `Normal_Weight`       |
//! | male, 120 kg, faf <= 0.5        | `Overweight_Level_II` |
//! | female, 45 kg                   | `Insufficient_Weight` |
//!
//! `Gender` is one-hot with `handle_unknown = "error"`, so an unknown or missing
//! gender fails the prediction; the other one-hot columns ignore unknown values.

use serde_json::{Value, json};

use crate::artifact::{ClassifierArtifact, LabelEncoderArtifact};
use crate::classifier::Pipeline;
use crate::decoder::LabelDecoder;
use crate::store::ModelStore;

/// Label encoder classes, in encoder (alphabetical) order.
pub const CLASSES: [&str; 7] = [
    "Insufficient_Weight",
    "Normal_Weight",
    "Obesity_Type_I",
    "Obesity_Type_II",
    "Obesity_Type_III",
    "Overweight_Level_I",
    "Overweight_Level_II",
];

pub fn classifier_json() -> Value {
    let yes_no = json!(["no", "yes"]);
    let frequency = json!(["no", "Sometimes", "Frequently", "Always"]);

    // Row layout: Gender[0..2] Age[2] Height[3] Weight[4] family_history[5..7]
    // FAVC[7..9] FCVC[9] NCP[10] CAEC[11] SMOKE[12..14] CH2O[14] SCC[15..17]
    // FAF[17] TUE[18] CALC[19] MTRANS[20..25]
    json!({
        "format_version": 1,
        "preprocessor": { "columns": [
            { "name": "Gender", "encoding": { "one_hot": { "categories": ["Female", "Male"], "handle_unknown": "error" } } },
            { "name": "Age", "encoding": { "standard_scale": { "mean": 24.3, "scale": 6.3 } } },
            { "name": "Height", "encoding": "passthrough" },
            { "name": "Weight", "encoding": "passthrough" },
            { "name": "family_history_with_overweight", "encoding": { "one_hot": { "categories": yes_no, "handle_unknown": "ignore" } } },
            { "name": "FAVC", "encoding": { "one_hot": { "categories": yes_no, "handle_unknown": "ignore" } } },
            { "name": "FCVC", "encoding": "passthrough" },
            { "name": "NCP", "encoding": "passthrough" },
            { "name": "CAEC", "encoding": { "ordinal": { "categories": frequency, "unknown_value": -1.0 } } },
            { "name": "SMOKE", "encoding": { "one_hot": { "categories": yes_no, "handle_unknown": "ignore" } } },
            { "name": "CH2O", "encoding": "passthrough" },
            { "name": "SCC", "encoding": { "one_hot": { "categories": yes_no, "handle_unknown": "ignore" } } },
            { "name": "FAF", "encoding": "passthrough" },
            { "name": "TUE", "encoding": "passthrough" },
            { "name": "CALC", "encoding": { "ordinal": { "categories": frequency, "unknown_value": -1.0 } } },
            { "name": "MTRANS", "encoding": { "one_hot": {
                "categories": ["Automobile", "Bike", "Motorbike", "Public_Transportation", "Walking"],
                "handle_unknown": "ignore"
            } } }
        ] },
        "estimator": {
            "kind": "random_forest",
            "n_classes": 7,
            "trees": [
                { "nodes": [
                    { "feature": 4, "threshold": 50.0, "left": 1, "right": 2 },
                    { "value": [1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0] },
                    { "feature": 4, "threshold": 80.0, "left": 3, "right": 4 },
                    { "value": [0.0, 0.8, 0.0, 0.0, 0.0, 0.2, 0.0] },
                    { "value": [0.0, 0.0, 0.6, 0.2, 0.1, 0.0, 0.1] }
                ] },
                { "nodes": [
                    { "feature": 1, "threshold": 0.5, "left": 1, "right": 2 },
                    { "value": [0.0, 0.5, 0.0, 0.0, 0.0, 0.5, 0.0] },
                    { "feature": 17, "threshold": 0.5, "left": 3, "right": 4 },
                    { "value": [0.0, 0.2, 0.0, 0.0, 0.0, 0.0, 0.8] },
                    { "value": [0.0, 0.7, 0.0, 0.0, 0.0, 0.3, 0.0] }
                ] }
            ]
        }
    })
}

pub fn label_encoder_json() -> Value {
    json!({ "classes": CLASSES })
}

pub fn pipeline() -> Pipeline {
    let artifact: ClassifierArtifact =
        serde_json::from_value(classifier_json()).expect("fixture classifier parses");
    Pipeline::from_artifact(artifact).expect("fixture classifier is valid")
}

pub fn decoder() -> LabelDecoder {
    let artifact: LabelEncoderArtifact =
        serde_json::from_value(label_encoder_json()).expect("fixture label encoder parses");
    LabelDecoder::from_artifact(artifact).expect("fixture label encoder is valid")
}

pub fn store() -> ModelStore {
    ModelStore::from_parts(pipeline(), decoder())
}
