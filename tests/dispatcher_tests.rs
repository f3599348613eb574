//! Dispatcher HTTP contract tests against a mock upstream

use clinical_analyst::application::ports::{DispatchError, Dispatcher};
use clinical_analyst::domain::analysis::{
    EncodedPart, InferencePayload, InstructionPrompt, MediaType, ModelSelector,
};
use clinical_analyst::domain::config::RequestTimeout;
use clinical_analyst::infrastructure::GeminiDispatcher;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn prompt() -> InstructionPrompt {
    InstructionPrompt::build("Fever and cough", "")
}

fn payload() -> InferencePayload {
    InferencePayload::new(prompt()).with_part(EncodedPart::encode(b"png-bytes", MediaType::Png))
}

fn gemini() -> ModelSelector {
    "gemini-2.5-flash".parse().unwrap()
}

fn custom() -> ModelSelector {
    "custom".parse().unwrap()
}

fn success_body(text: &str) -> serde_json::Value {
    json!({
        "candidates": [
            { "content": { "parts": [ { "text": text } ] } }
        ]
    })
}

#[tokio::test]
async fn success_returns_text_verbatim() {
    let server = MockServer::start().await;
    let text = "## Integrated Analysis\nLikely community-acquired pneumonia.";

    Mock::given(method("POST"))
        .and(path("/gemini-2.5-flash:generateContent"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body(text)))
        .expect(1)
        .mount(&server)
        .await;

    let dispatcher = GeminiDispatcher::new().with_base_url(server.uri());
    let result = dispatcher
        .dispatch(&payload(), Some("test-key"), &gemini())
        .await
        .unwrap();

    assert_eq!(result.text(), text);
}

#[tokio::test]
async fn request_body_follows_wire_format() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "contents": [{
                "role": "user",
                "parts": [
                    { "text": prompt().content() },
                    { "inlineData": { "mimeType": "image/png", "data": "cG5nLWJ5dGVz" } }
                ]
            }],
            "generationConfig": { "temperature": 0.2, "maxOutputTokens": 8192 }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body("ok")))
        .expect(1)
        .mount(&server)
        .await;

    let dispatcher = GeminiDispatcher::new().with_base_url(server.uri());
    let result = dispatcher.dispatch(&payload(), Some("k"), &gemini()).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn only_first_candidate_is_used() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [
                { "content": { "parts": [ { "text": "first" }, { "text": "second part" } ] } },
                { "content": { "parts": [ { "text": "other candidate" } ] } }
            ]
        })))
        .mount(&server)
        .await;

    let dispatcher = GeminiDispatcher::new().with_base_url(server.uri());
    let result = dispatcher
        .dispatch(&payload(), Some("k"), &gemini())
        .await
        .unwrap();

    assert_eq!(result.text(), "first");
}

#[tokio::test]
async fn empty_candidates_is_empty_result() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
        .mount(&server)
        .await;

    let dispatcher = GeminiDispatcher::new().with_base_url(server.uri());
    let err = dispatcher
        .dispatch(&payload(), Some("k"), &gemini())
        .await
        .unwrap_err();

    assert_eq!(err, DispatchError::EmptyResult);
}

#[tokio::test]
async fn upstream_error_message_is_surfaced() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(429)
                .set_body_json(json!({ "error": { "message": "quota exceeded" } })),
        )
        .mount(&server)
        .await;

    let dispatcher = GeminiDispatcher::new().with_base_url(server.uri());
    let err = dispatcher
        .dispatch(&payload(), Some("k"), &gemini())
        .await
        .unwrap_err();

    assert_eq!(err, DispatchError::Upstream("quota exceeded".to_string()));
}

#[tokio::test]
async fn upstream_error_without_message_uses_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("<html>unavailable</html>"))
        .mount(&server)
        .await;

    let dispatcher = GeminiDispatcher::new().with_base_url(server.uri());
    let err = dispatcher
        .dispatch(&payload(), Some("k"), &gemini())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        DispatchError::Upstream("The analysis service returned an error (HTTP 503)".to_string())
    );
}

#[tokio::test]
async fn missing_credential_sends_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body("ok")))
        .expect(0)
        .mount(&server)
        .await;

    let dispatcher = GeminiDispatcher::new().with_base_url(server.uri());
    let err = dispatcher
        .dispatch(&payload(), None, &gemini())
        .await
        .unwrap_err();

    assert!(matches!(err, DispatchError::Configuration(_)));
}

#[tokio::test]
async fn custom_endpoint_sends_bearer_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/generate"))
        .and(header("authorization", "Bearer local-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body("local answer")))
        .expect(1)
        .mount(&server)
        .await;

    let dispatcher = GeminiDispatcher::new()
        .with_custom_endpoint(Some(format!("{}/v1/generate", server.uri())));
    let result = dispatcher
        .dispatch(&payload(), Some("local-token"), &custom())
        .await
        .unwrap();

    assert_eq!(result.text(), "local answer");
}

#[tokio::test]
async fn custom_endpoint_allows_anonymous() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body("anonymous answer")))
        .expect(1)
        .mount(&server)
        .await;

    let dispatcher =
        GeminiDispatcher::new().with_custom_endpoint(Some(format!("{}/generate", server.uri())));
    let result = dispatcher.dispatch(&payload(), None, &custom()).await.unwrap();

    assert_eq!(result.text(), "anonymous answer");
}

#[tokio::test]
async fn unreachable_host_is_network_error() {
    // Port 1 is reserved and refuses connections
    let dispatcher =
        GeminiDispatcher::new().with_custom_endpoint(Some("http://127.0.0.1:1/generate".to_string()));
    let err = dispatcher
        .dispatch(&payload(), None, &custom())
        .await
        .unwrap_err();

    assert!(matches!(err, DispatchError::Network(_)));
}

#[tokio::test]
async fn network_error_never_leaks_key() {
    let dispatcher = GeminiDispatcher::new().with_base_url("http://127.0.0.1:1");
    let err = dispatcher
        .dispatch(&payload(), Some("secret-key-123"), &gemini())
        .await
        .unwrap_err();

    assert!(matches!(err, DispatchError::Network(_)));
    assert!(!err.to_string().contains("secret-key-123"));
}

#[tokio::test]
async fn configured_timeout_is_applied() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(success_body("too late"))
                .set_delay(std::time::Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let dispatcher = GeminiDispatcher::with_timeout(RequestTimeout::from_secs(1))
        .with_base_url(server.uri());
    let err = dispatcher
        .dispatch(&payload(), Some("k"), &gemini())
        .await
        .unwrap_err();

    assert_eq!(err, DispatchError::Network("request timed out".to_string()));
}
