//! Front-facing gateway service.
//!
//! Validates the request shape locally, forwards valid lookups to the
//! orchestrator service, and relays its status and body verbatim. No
//! orchestrator outcome is reinterpreted here.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use serde::{Deserialize, Serialize};
use tower_http::timeout::TimeoutLayer;

use crate::config::AppConfig;
use crate::zipcode::Zipcode;

#[derive(Debug, Deserialize)]
struct WeatherQuery {
    cep: String,
}

#[derive(Serialize)]
struct MessageBody {
    message: &'static str,
}

/// Forwards validated lookups to the orchestrator service.
pub struct Forwarder {
    client: reqwest::Client,
    orchestrator_url: String,
}

impl Forwarder {
    /// Create a new forwarder from the shared configuration.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(concat!("cep-weather/", env!("CARGO_PKG_VERSION")))
            .build()
            .with_context(|| "failed to create forwarding HTTP client")?;

        Ok(Self {
            client,
            orchestrator_url: config.orchestrator_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the orchestrator's answer for a pre-validated code.
    async fn forward(&self, cep: &str) -> Result<(StatusCode, Vec<u8>)> {
        let url = format!("{}/weather/{}", self.orchestrator_url, cep);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| "orchestrator request failed")?;

        let status = StatusCode::from_u16(response.status().as_u16())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = response
            .bytes()
            .await
            .with_context(|| "failed to read orchestrator response body")?;

        Ok((status, body.to_vec()))
    }
}

/// HTTP surface of the gateway service.
pub fn router(forwarder: Arc<Forwarder>) -> Router {
    Router::new()
        .route("/weather", post(post_weather))
        .with_state(forwarder)
}

async fn post_weather(
    State(forwarder): State<Arc<Forwarder>>,
    payload: Result<Json<WeatherQuery>, JsonRejection>,
) -> Response {
    let Ok(Json(query)) = payload else {
        return (
            StatusCode::BAD_REQUEST,
            Json(MessageBody {
                message: "invalid input",
            }),
        )
            .into_response();
    };

    // Same shape check the orchestrator applies; saves the round trip
    if query.cep.parse::<Zipcode>().is_err() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(MessageBody {
                message: "invalid zipcode",
            }),
        )
            .into_response();
    }

    match forwarder.forward(&query.cep).await {
        Ok((status, body)) => (
            status,
            [(header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response(),
        Err(err) => {
            tracing::error!(error = %err, "forwarding to orchestrator failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(MessageBody {
                    message: "internal server error",
                }),
            )
                .into_response()
        }
    }
}

/// Serve the gateway until the process is stopped.
pub async fn run(config: &AppConfig) -> Result<()> {
    let forwarder = Arc::new(Forwarder::new(config)?);
    let app = router(forwarder).layer(TimeoutLayer::new(Duration::from_secs(
        config.handler_timeout_secs,
    )));

    let addr = format!("0.0.0.0:{}", config.gateway_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("gateway listening on {}", addr);
    axum::serve(listener, app)
        .await
        .with_context(|| "gateway server terminated")?;
    Ok(())
}
