use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::extract::{Path, State};
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use tower_http::timeout::TimeoutLayer;

use crate::config::AppConfig;
use crate::error::LookupError;
use crate::orchestrator::Orchestrator;
use crate::temperature::WeatherReport;

/// HTTP surface of the orchestrator service.
pub fn router(orchestrator: Arc<Orchestrator>) -> Router {
    Router::new()
        .route("/weather/{zipcode}", get(get_weather))
        .with_state(orchestrator)
}

async fn get_weather(
    State(orchestrator): State<Arc<Orchestrator>>,
    Path(zipcode): Path<String>,
) -> Result<Json<WeatherReport>, LookupError> {
    let report = orchestrator.lookup(&zipcode).await?;
    Ok(Json(report))
}

/// Serve the orchestrator until the process is stopped.
pub async fn run(config: &AppConfig) -> Result<()> {
    let orchestrator = Arc::new(Orchestrator::new(config)?);
    let app = router(orchestrator).layer(TimeoutLayer::new(Duration::from_secs(
        config.handler_timeout_secs,
    )));

    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("orchestrator listening on {}", addr);
    axum::serve(listener, app)
        .await
        .with_context(|| "orchestrator server terminated")?;
    Ok(())
}
