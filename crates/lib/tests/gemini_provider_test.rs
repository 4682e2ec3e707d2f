//! # Gemini Provider Tests
//!
//! Runs the provider against a `wiremock` server and checks that each class of
//! failure maps onto its `CompletionError` kind.

use anyhow::Result;
use askdocs::providers::ai::{gemini::GeminiProvider, AiProvider};
use askdocs::{CompletionError, CompletionErrorKind};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL_PATH: &str = "/v1beta/models/gemini-1.5-flash:generateContent";

async fn provider_for(server: &MockServer) -> Result<GeminiProvider> {
    Ok(GeminiProvider::new(
        format!("{}{MODEL_PATH}", server.uri()),
        "test-key".to_string(),
    )?)
}

#[tokio::test]
async fn test_generate_returns_candidate_text() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .and(query_param("key", "test-key"))
        .and(body_partial_json(json!({
            "contents": [{ "parts": [{ "text": "What is the magic number?" }] }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "The magic " }, { "text": "number is 42." }] }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server).await?;
    let answer = provider.generate("What is the magic number?").await?;

    assert_eq!(answer, "The magic number is 42.");
    Ok(())
}

async fn failure_for(status: u16, body: &str) -> Result<CompletionError> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server).await?;
    let err = provider
        .generate("prompt")
        .await
        .expect_err("request should fail");
    Ok(err)
}

#[tokio::test]
async fn test_invalid_key_maps_to_auth() -> Result<()> {
    let err = failure_for(403, r#"{"error":{"status":"PERMISSION_DENIED"}}"#).await?;
    assert_eq!(err.kind(), CompletionErrorKind::Auth);
    Ok(())
}

#[tokio::test]
async fn test_rate_limit_maps_to_quota() -> Result<()> {
    let err = failure_for(429, r#"{"error":{"status":"RESOURCE_EXHAUSTED"}}"#).await?;
    assert_eq!(err.kind(), CompletionErrorKind::Quota);
    Ok(())
}

#[tokio::test]
async fn test_server_error_maps_to_api() -> Result<()> {
    let err = failure_for(500, "internal").await?;
    assert!(matches!(err, CompletionError::Api { status: 500, .. }));
    Ok(())
}

#[tokio::test]
async fn test_undecodable_body_maps_to_malformed() -> Result<()> {
    let err = failure_for(200, "not json at all").await?;
    assert_eq!(err.kind(), CompletionErrorKind::Malformed);
    Ok(())
}

#[tokio::test]
async fn test_missing_candidates_maps_to_malformed() -> Result<()> {
    let err = failure_for(200, r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#).await?;
    assert_eq!(err.kind(), CompletionErrorKind::Malformed);
    Ok(())
}

#[tokio::test]
async fn test_unreachable_service_maps_to_network() -> Result<()> {
    // Bind and immediately release a port so nothing is listening on it.
    let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?;
    drop(listener);

    let provider = GeminiProvider::new(format!("http://{addr}{MODEL_PATH}"), "k".to_string())?;
    let err = provider
        .generate("prompt")
        .await
        .expect_err("request should fail");

    assert_eq!(err.kind(), CompletionErrorKind::Network);
    Ok(())
}
