mod common;

use std::time::Duration;

use common::mock_backend::{MockBackend, MockResponse};
use vizquiz::config::{ProviderEndpoint, SecureString};
use vizquiz::provider::{
    ChatClient, ClientOptions, GeminiClient, LlmError, OpenAiCompatClient, ProviderKind,
};

fn endpoint(mock: &MockBackend, model: &str) -> ProviderEndpoint {
    ProviderEndpoint {
        model: model.to_string(),
        base_url: mock.base_url(),
    }
}

fn options() -> ClientOptions {
    ClientOptions {
        request_timeout: Duration::from_secs(5),
        connect_timeout: Duration::from_secs(2),
        temperature: 0.3,
    }
}

#[tokio::test]
async fn test_openrouter_request_shape() {
    let mock = MockBackend::start().await;
    mock.enqueue_response(MockResponse::chat_completion("{\"questions\": []}"))
        .await;

    let client = OpenAiCompatClient::new(
        endpoint(&mock, "deepseek/test-model"),
        SecureString::from("router-secret"),
        options(),
    )
    .unwrap();

    let reply = client.complete("system text", "user text").await.unwrap();
    assert_eq!(reply, "{\"questions\": []}");

    let requests = mock.captured_requests().await;
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.method, "POST");
    assert_eq!(request.path, "/v1/chat/completions");
    assert_eq!(request.header("authorization"), Some("Bearer router-secret"));
    assert_eq!(request.header("x-title"), Some("vizquiz"));

    let body = request.json();
    assert_eq!(body["model"], "deepseek/test-model");
    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(body["messages"][0]["content"], "system text");
    assert_eq!(body["messages"][1]["role"], "user");
    assert_eq!(body["messages"][1]["content"], "user text");
    assert!((body["temperature"].as_f64().unwrap() - 0.3).abs() < 1e-6);
}

#[tokio::test]
async fn test_openrouter_api_error() {
    let mock = MockBackend::start().await;
    mock.enqueue_response(MockResponse::error(
        401,
        r#"{"error": {"message": "No auth credentials found", "code": 401}}"#,
    ))
    .await;

    let client =
        OpenAiCompatClient::new(endpoint(&mock, "m"), SecureString::from("bad"), options())
            .unwrap();

    let err = client.complete("s", "u").await.unwrap_err();
    match err {
        LlmError::Api {
            provider,
            status,
            message,
        } => {
            assert_eq!(provider, ProviderKind::OpenRouter);
            assert_eq!(status, 401);
            assert_eq!(message, "No auth credentials found");
        }
        other => panic!("Expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_openrouter_empty_choices() {
    let mock = MockBackend::start().await;
    mock.enqueue_response(MockResponse::json(r#"{"choices": []}"#))
        .await;

    let client =
        OpenAiCompatClient::new(endpoint(&mock, "m"), SecureString::from("k"), options()).unwrap();

    let err = client.complete("s", "u").await.unwrap_err();
    assert!(matches!(err, LlmError::EmptyResponse { .. }));
}

#[tokio::test]
async fn test_gemini_request_shape() {
    let mock = MockBackend::start().await;
    mock.enqueue_response(MockResponse::gemini_content("{\"questions\": [1]}"))
        .await;

    let client = GeminiClient::new(
        endpoint(&mock, "gemini-test"),
        SecureString::from("google-secret"),
        options(),
    )
    .unwrap();

    let reply = client.complete("system text", "user text").await.unwrap();
    assert_eq!(reply, "{\"questions\": [1]}");

    let requests = mock.captured_requests().await;
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.path, "/v1/models/gemini-test:generateContent");
    assert_eq!(request.header("x-goog-api-key"), Some("google-secret"));
    assert!(request.header("authorization").is_none());

    let body = request.json();
    assert_eq!(body["systemInstruction"]["parts"][0]["text"], "system text");
    assert!(body["systemInstruction"].get("role").is_none());
    assert_eq!(body["contents"][0]["role"], "user");
    assert_eq!(body["contents"][0]["parts"][0]["text"], "user text");
    assert!(body["generationConfig"]["temperature"].is_number());
}

#[tokio::test]
async fn test_gemini_blocked_prompt() {
    let mock = MockBackend::start().await;
    mock.enqueue_response(MockResponse::json(
        r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#,
    ))
    .await;

    let client =
        GeminiClient::new(endpoint(&mock, "g"), SecureString::from("k"), options()).unwrap();

    let err = client.complete("s", "u").await.unwrap_err();
    assert!(matches!(err, LlmError::Blocked { reason, .. } if reason == "SAFETY"));
}

#[tokio::test]
async fn test_gemini_api_error_message() {
    let mock = MockBackend::start().await;
    mock.enqueue_response(MockResponse::error(
        400,
        r#"{"error": {"code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT"}}"#,
    ))
    .await;

    let client =
        GeminiClient::new(endpoint(&mock, "g"), SecureString::from("k"), options()).unwrap();

    let err = client.complete("s", "u").await.unwrap_err();
    assert_eq!(err.to_string(), "Gemini API error: 400 - API key not valid.");
}

#[tokio::test]
async fn test_request_timeout() {
    let mock = MockBackend::start().await;
    mock.enqueue_response(MockResponse::chat_completion("late").with_delay(1500))
        .await;

    let client = OpenAiCompatClient::new(
        endpoint(&mock, "m"),
        SecureString::from("k"),
        ClientOptions {
            request_timeout: Duration::from_millis(200),
            ..options()
        },
    )
    .unwrap();

    let err = client.complete("s", "u").await.unwrap_err();
    assert!(matches!(err, LlmError::Timeout { .. }), "got {:?}", err);
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let port = common::free_port();
    let client = OpenAiCompatClient::new(
        ProviderEndpoint {
            model: "m".to_string(),
            base_url: format!("http://127.0.0.1:{}", port),
        },
        SecureString::from("k"),
        options(),
    )
    .unwrap();

    let err = client.complete("s", "u").await.unwrap_err();
    assert!(matches!(err, LlmError::Transport { .. }), "got {:?}", err);
}
