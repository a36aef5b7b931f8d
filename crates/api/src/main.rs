use std::sync::Arc;

use anyhow::Context;

use obesity_api::config::AppConfig;
use obesity_api::context::InferenceContext;
use obesity_model::ModelStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    obesity_observability::init();

    let config = AppConfig::from_env();
    tracing::info!(
        classifier = %config.artifacts.classifier.display(),
        label_decoder = %config.artifacts.label_decoder.display(),
        input_policy = config.input_policy.as_str(),
        "loading model artifacts"
    );

    let store = ModelStore::load(&config.artifacts);
    if !store.status().is_ready() {
        tracing::warn!("starting degraded; /predict returns errors until the artifacts are fixed and the server restarted");
    }

    let ctx = Arc::new(InferenceContext::new(store, config.input_policy));
    let app = obesity_api::app::build_app(ctx);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("shutdown signal received (Ctrl-C)"),
        _ = terminate => tracing::info!("shutdown signal received (SIGTERM)"),
    }
}
