//! HTTP Server
//!
//! Serves the exporter over HTTP. Collection is pull based: every request to
//! `/metrics` triggers a fresh scrape of all enabled collectors. Nothing is cached
//! between requests.
//!
//! # Endpoints
//!
//! - `/` - Landing page
//! - `/metrics` - Prometheus text format
//! - `/health` - Liveness probe

use crate::collectors::CollectorRegistry;
use crate::config::Config;
use crate::scrape::Exporter;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Clone)]
struct AppState {
    exporter: Arc<Exporter>,
}

pub async fn start(config: Config) -> anyhow::Result<()> {
    let registry = CollectorRegistry::with_defaults();
    let exporter = Exporter::from_config(&config, &registry)?;
    let app = router(Arc::new(exporter));

    // Start the server
    let addr = format!("{}:{}", config.server.addr, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Metrics server listening on {}", addr);
    info!("Metrics available at http://{}/metrics", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Routes for an already-built exporter
pub fn router(exporter: Arc<Exporter>) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/metrics", get(metrics_handler))
        .route("/health", get(health_handler))
        .with_state(AppState { exporter })
}

async fn root_handler() -> impl IntoResponse {
    axum::response::Html(
        r#"<html>
<head><title>ZFS Exporter</title></head>
<body>
<h1>ZFS Prometheus Exporter</h1>
<p><a href="/metrics">Metrics</a></p>
<p><a href="/health">Health</a></p>
</body>
</html>"#,
    )
}

async fn metrics_handler(State(state): State<AppState>) -> Response {
    match state.exporter.render().await {
        Ok(metrics) => (
            [(
                axum::http::header::CONTENT_TYPE,
                prometheus::TEXT_FORMAT,
            )],
            metrics,
        )
            .into_response(),
        Err(e) => {
            error!("Failed to render metrics: {}", e);
            (
                axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error rendering metrics: {}", e),
            )
                .into_response()
        }
    }
}

async fn health_handler() -> impl IntoResponse {
    (axum::http::StatusCode::OK, "OK")
}
