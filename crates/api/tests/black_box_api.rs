use std::sync::Arc;

use obesity_api::context::InferenceContext;
use obesity_core::{InputPolicy, PredictionId};
use obesity_model::{ArtifactPaths, ModelStore, fixtures};
use reqwest::StatusCode;
use serde_json::Value;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(store: ModelStore, policy: InputPolicy) -> Self {
        // Same router as prod, bound to an ephemeral port.
        let ctx = Arc::new(InferenceContext::new(store, policy));
        let app = obesity_api::app::build_app(ctx);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    async fn with_fixture_model() -> Self {
        Self::spawn(fixtures::store(), InputPolicy::Lenient).await
    }

    async fn get(&self, path_and_query: &str) -> (StatusCode, Value) {
        let res = reqwest::get(format!("{}{}", self.base_url, path_and_query))
            .await
            .unwrap();
        let status = res.status();
        (status, res.json().await.unwrap())
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

const FULL_QUERY: &str = "gender=Male&age=21&height=1.80&weight=75&family_history=yes&favc=yes\
&fcvc=2&ncp=3&caec=Sometimes&smoke=no&ch2o=2&scc=no&faf=1&tue=1&calc=no&mtrans=Public_Transportation";

fn without(param: &str) -> String {
    FULL_QUERY
        .split('&')
        .filter(|pair| !pair.starts_with(&format!("{param}=")))
        .collect::<Vec<_>>()
        .join("&")
}

fn replacing(param: &str, value: &str) -> String {
    format!("{param}={value}&{}", without(param))
}

fn degraded_store() -> ModelStore {
    let dir = std::env::temp_dir().join(format!("obesity-api-empty-{}", PredictionId::new()));
    std::fs::create_dir_all(&dir).unwrap();
    ModelStore::load(&ArtifactPaths::in_dir(dir))
}

#[tokio::test]
async fn full_query_returns_a_known_category() {
    let srv = TestServer::with_fixture_model().await;

    let (status, body) = srv.get(&format!("/predict?{FULL_QUERY}")).await;

    assert_eq!(status, StatusCode::OK);
    let label = body["result"].as_str().unwrap();
    assert!(fixtures::CLASSES.contains(&label), "unexpected label {label}");
    assert_eq!(label, "Normal_Weight");
    assert_eq!(body.as_object().unwrap().len(), 1);
}

#[tokio::test]
async fn omitted_age_is_treated_as_zero() {
    let srv = TestServer::with_fixture_model().await;

    let (status, body) = srv.get(&format!("/predict?{}", without("age"))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"], "Normal_Weight");
}

#[tokio::test]
async fn unparseable_numeric_is_treated_as_zero() {
    let srv = TestServer::with_fixture_model().await;

    // Weight 0 falls in the lightest branch of the fixture forest.
    let (status, body) = srv.get(&format!("/predict?{}", replacing("weight", "abc"))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"], "Insufficient_Weight");
}

#[tokio::test]
async fn omitted_categorical_passes_through_as_empty_string() {
    let srv = TestServer::with_fixture_model().await;

    // MTRANS ignores unknown categories, so "" still predicts.
    let (status, body) = srv.get(&format!("/predict?{}", without("mtrans"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"], "Normal_Weight");

    // Gender rejects unknown categories, and "" is one of them.
    let (status, body) = srv.get(&format!("/predict?{}", without("gender"))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["kind"], "inference_failed");
}

#[tokio::test]
async fn unknown_category_is_a_structured_error_and_the_server_survives() {
    let srv = TestServer::with_fixture_model().await;

    let (status, body) = srv.get(&format!("/predict?{}", replacing("gender", "Unknown"))).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["kind"], "inference_failed");
    assert!(body["error"].as_str().unwrap().contains("'Unknown'"));

    let (status, _) = srv.get(&format!("/predict?{FULL_QUERY}")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn degraded_store_reports_errors_instead_of_crashing() {
    let srv = TestServer::spawn(degraded_store(), InputPolicy::Lenient).await;

    for _ in 0..2 {
        let (status, body) = srv.get(&format!("/predict?{FULL_QUERY}")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["kind"], "model_unavailable");
        assert!(body["error"].is_string());
    }

    let (status, body) = srv.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["classifier"]["state"], "failed");
    assert_eq!(body["label_decoder"]["state"], "failed");
}

#[tokio::test]
async fn strict_policy_rejects_missing_fields() {
    let srv = TestServer::spawn(fixtures::store(), InputPolicy::Strict).await;

    let (status, body) = srv.get(&format!("/predict?{}", without("age"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "invalid_input");
    assert!(body["error"].as_str().unwrap().contains("age (missing)"));

    let (status, _) = srv.get(&format!("/predict?{FULL_QUERY}")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn repeated_parameter_uses_first_value() {
    let srv = TestServer::with_fixture_model().await;

    let (status, body) = srv.get(&format!("/predict?weight=120&faf=0&{FULL_QUERY}")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"], "Overweight_Level_II");
}

#[tokio::test]
async fn health_lists_classes_when_ready() {
    let srv = TestServer::with_fixture_model().await;

    let (status, body) = srv.get("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["classifier"]["state"], "loaded");
    assert_eq!(body["classes"].as_array().unwrap().len(), fixtures::CLASSES.len());
    assert!(body["loaded_at"].is_string());
}

#[tokio::test]
async fn index_serves_the_form_and_its_script() {
    let srv = TestServer::with_fixture_model().await;
    let client = reqwest::Client::new();

    let res = client.get(format!("{}/", srv.base_url)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(
        res.headers()[reqwest::header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/html")
    );
    let page = res.text().await.unwrap();
    assert!(page.contains(r#"id="prediction-form""#));
    assert!(page.contains(r#"name="family_history""#));

    let res = client
        .get(format!("{}/static/script.js", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.text().await.unwrap().contains("/predict?"));
}

#[tokio::test]
async fn unknown_route_is_a_json_404() {
    let srv = TestServer::with_fixture_model().await;

    let (status, body) = srv.get("/nope").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "not_found");
}
