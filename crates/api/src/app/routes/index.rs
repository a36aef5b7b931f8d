//! The HTML form and its script.

use std::fmt::Write as _;
use std::sync::LazyLock;

use axum::{
    http::header,
    response::{Html, IntoResponse},
};

use obesity_core::{Feature, FeatureKind};

const SCRIPT: &str = include_str!("../../../assets/script.js");

static FORM_PAGE: LazyLock<String> = LazyLock::new(render_form);

pub async fn form() -> Html<&'static str> {
    Html(FORM_PAGE.as_str())
}

pub async fn script() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/javascript; charset=utf-8")],
        SCRIPT,
    )
}

fn label(feature: Feature) -> &'static str {
    match feature {
        Feature::Gender => "Gender",
        Feature::Age => "Age",
        Feature::Height => "Height (Meters)",
        Feature::Weight => "Weight (KG)",
        Feature::FamilyHistory => "Family History with Overweight",
        Feature::Favc => "FAVC (High Caloric Food)",
        Feature::Fcvc => "FCVC (Vegetable Consumption)",
        Feature::Ncp => "NCP (Number of Meals)",
        Feature::Caec => "CAEC (Food Consumption between Meals)",
        Feature::Smoke => "Smoke",
        Feature::Ch2o => "CH2O (Water Intake)",
        Feature::Scc => "SCC (Monitoring of Calories)",
        Feature::Faf => "FAF (Physical Activity Frequency)",
        Feature::Tue => "TUE (Time using Technology Devices)",
        Feature::Calc => "CALC (Alcohol Consumption)",
        Feature::Mtrans => "MTRANS (Transportation)",
    }
}

/// `Public_Transportation` -> `Public Transportation`, `yes` -> `Yes`.
fn option_text(value: &str) -> String {
    let spaced = value.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn render_form() -> String {
    let mut fields = String::new();
    for feature in Feature::ALL {
        let name = feature.param();
        let _ = writeln!(fields, r#"        <label for="{name}">{}:</label>"#, label(feature));
        match feature.kind() {
            FeatureKind::Categorical => {
                let _ = writeln!(fields, r#"        <select class="input" name="{name}" id="{name}">"#);
                for value in feature.vocabulary() {
                    let _ = writeln!(
                        fields,
                        r#"            <option value="{value}">{}</option>"#,
                        option_text(value)
                    );
                }
                let _ = writeln!(fields, "        </select><br>");
            }
            FeatureKind::Numeric => {
                let step = match feature {
                    Feature::Age | Feature::Weight => "",
                    _ => r#" step="0.01""#,
                };
                let _ = writeln!(
                    fields,
                    r#"        <input class="input" type="number" name="{name}" id="{name}"{step} required><br>"#
                );
            }
        }
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Obesity Prediction</title>
</head>
<body>
    <h1>Obesity Prediction</h1>
    <form id="prediction-form" action="/predict" method="GET">
{fields}        <button type="submit">Predict</button>
    </form>
    <div class="popup" id="popup">
        <h2 id="result">Prediction Result</h2>
        <button type="button" id="close-popup">OK</button>
    </div>
    <script src="/static/script.js"></script>
</body>
</html>
"#
    )
}
