//! Tests for the gateway service: local validation plus verbatim relaying.

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use cep_weather::config::AppConfig;
use cep_weather::gateway::{self, Forwarder};
use serde_json::{Value, json};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_router(orchestrator_url: &str) -> Router {
    let config = AppConfig {
        orchestrator_url: orchestrator_url.to_string(),
        ..AppConfig::default()
    };
    gateway::router(Arc::new(Forwarder::new(&config).unwrap()))
}

async fn post_weather(router: Router, body: &str) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/weather")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    (status, body)
}

#[tokio::test]
async fn unparsable_body_yields_400() {
    let orchestrator = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&orchestrator)
        .await;

    let (status, body) = post_weather(test_router(&orchestrator.uri()), "{not json").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "message": "invalid input" }));
}

#[tokio::test]
async fn malformed_cep_is_rejected_without_forwarding() {
    let orchestrator = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&orchestrator)
        .await;

    let router = test_router(&orchestrator.uri());
    for payload in [
        r#"{"cep": "123"}"#,
        r#"{"cep": "123456789"}"#,
        r#"{"cep": "1234567a"}"#,
    ] {
        let (status, body) = post_weather(router.clone(), payload).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "for {payload}");
        assert_eq!(body, json!({ "message": "invalid zipcode" }));
    }
}

#[tokio::test]
async fn success_response_is_relayed_verbatim() {
    let orchestrator = MockServer::start().await;

    let report = json!({ "temp_C": 28.5, "temp_F": 83.3, "temp_K": 301.65 });
    Mock::given(method("GET"))
        .and(path("/weather/26572070"))
        .respond_with(ResponseTemplate::new(200).set_body_json(report.clone()))
        .expect(1)
        .mount(&orchestrator)
        .await;

    let (status, body) =
        post_weather(test_router(&orchestrator.uri()), r#"{"cep": "26572070"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, report);
}

#[tokio::test]
async fn error_status_and_message_are_relayed_verbatim() {
    let orchestrator = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather/99999999"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "message": "can not find zipcode" })),
        )
        .mount(&orchestrator)
        .await;

    let (status, body) =
        post_weather(test_router(&orchestrator.uri()), r#"{"cep": "99999999"}"#).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "can not find zipcode" }));
}

#[tokio::test]
async fn unreachable_orchestrator_yields_500() {
    let (status, body) =
        post_weather(test_router("http://127.0.0.1:9"), r#"{"cep": "26572070"}"#).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "message": "internal server error" }));
}
