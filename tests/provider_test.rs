//! Provider adapters against a local stand-in for the hosted APIs.

use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::routing::post;
use scolaia_rs::llm::bedrock::BedrockClient;
use scolaia_rs::llm::huggingface::HuggingFaceClient;
use scolaia_rs::llm::{CompletionRequest, LanguageModelClient, TokenUsage, UpstreamError};
use scolaia_rs::model::chat::ChatTurn;
use secrecy::SecretString;
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};

/// What the stand-in saw on its last request.
#[derive(Default)]
struct Captured {
    path: Option<String>,
    authorization: Option<String>,
    body: Option<Value>,
}

#[derive(Clone)]
struct Mock {
    status: StatusCode,
    reply: String,
    captured: Arc<Mutex<Captured>>,
}

async fn capture(
    State(mock): State<Mock>,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, String) {
    let mut captured = mock.captured.lock().unwrap();
    captured.path = Some(uri.path().to_string());
    captured.authorization = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    captured.body = serde_json::from_str(&body).ok();
    (mock.status, mock.reply.clone())
}

/// Serve `reply` with `status` on `path`; returns the base URL.
async fn spawn_mock(
    path: &str,
    status: StatusCode,
    reply: &str,
) -> (String, Arc<Mutex<Captured>>) {
    let captured = Arc::new(Mutex::new(Captured::default()));
    let mock = Mock {
        status,
        reply: reply.to_string(),
        captured: Arc::clone(&captured),
    };
    let app = Router::new().route(path, post(capture)).with_state(mock);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), captured)
}

fn request() -> CompletionRequest {
    CompletionRequest {
        system: "You are a planning assistant.".to_string(),
        messages: vec![
            ChatTurn::assistant("Describe a classroom challenge."),
            ChatTurn::user("My class rushes through labs."),
        ],
        max_tokens: 300,
        temperature: 0.5,
    }
}

fn key() -> SecretString {
    SecretString::from("test-key")
}

// ---------------------------------------------------------------------------
// Hugging Face
// ---------------------------------------------------------------------------

#[tokio::test]
async fn huggingface_sends_openai_style_request() {
    let reply = json!({
        "choices": [{ "message": { "role": "assistant", "content": "Assign lab roles." } }],
        "usage": { "prompt_tokens": 31, "completion_tokens": 4, "total_tokens": 35 }
    });
    let (base, captured) =
        spawn_mock("/v1/chat/completions", StatusCode::OK, &reply.to_string()).await;

    let client = HuggingFaceClient::new(
        &key(),
        "meta-llama/Llama-3.1-8B-Instruct",
        &format!("{base}/v1/"),
    )
    .unwrap();
    assert_eq!(client.provider(), "huggingface");

    let completion = client.generate(&request()).await.unwrap();
    assert_eq!(completion.text, "Assign lab roles.");
    assert_eq!(completion.usage, Some(TokenUsage { input: 31, output: 4 }));

    let captured = captured.lock().unwrap();
    assert_eq!(captured.authorization.as_deref(), Some("Bearer test-key"));
    let body = captured.body.as_ref().unwrap();
    assert_eq!(body["model"], "meta-llama/Llama-3.1-8B-Instruct");
    assert_eq!(body["max_tokens"], 300);
    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[0], json!({ "role": "system", "content": "You are a planning assistant." }));
    assert_eq!(messages[1]["role"], "assistant");
    assert_eq!(messages[2], json!({ "role": "user", "content": "My class rushes through labs." }));
}

#[tokio::test]
async fn huggingface_error_status_is_reported() {
    let (base, _) = spawn_mock(
        "/chat/completions",
        StatusCode::TOO_MANY_REQUESTS,
        r#"{"error":"rate limited"}"#,
    )
    .await;
    let client = HuggingFaceClient::new(&key(), "any-model", &base).unwrap();

    match client.generate(&request()).await {
        Err(UpstreamError::Status { status, body }) => {
            assert_eq!(status, 429);
            assert!(body.contains("rate limited"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn huggingface_without_choices_is_malformed() {
    let (base, _) = spawn_mock("/chat/completions", StatusCode::OK, r#"{"choices":[]}"#).await;
    let client = HuggingFaceClient::new(&key(), "any-model", &base).unwrap();

    let err = client.generate(&request()).await.unwrap_err();
    assert_eq!(err.reason(), "malformed");
}

#[tokio::test]
async fn unreachable_host_is_a_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = HuggingFaceClient::new(&key(), "any-model", &format!("http://{addr}")).unwrap();
    let err = client.generate(&request()).await.unwrap_err();
    assert!(matches!(err, UpstreamError::Transport(_)), "got {err:?}");
}

// ---------------------------------------------------------------------------
// Bedrock
// ---------------------------------------------------------------------------

#[tokio::test]
async fn bedrock_sends_converse_request() {
    let reply = json!({
        "output": {
            "message": {
                "role": "assistant",
                "content": [{ "text": "Use a lab " }, { "text": "checklist." }]
            }
        },
        "stopReason": "end_turn",
        "usage": { "inputTokens": 50, "outputTokens": 6, "totalTokens": 56 }
    });
    let (base, captured) = spawn_mock(
        "/model/amazon.nova-lite-v1/converse",
        StatusCode::OK,
        &reply.to_string(),
    )
    .await;

    let client =
        BedrockClient::new(&key(), "eu-central-1", "amazon.nova-lite-v1", Some(&base)).unwrap();
    assert_eq!(client.provider(), "aws.bedrock");
    assert_eq!(client.model(), "amazon.nova-lite-v1");

    let completion = client.generate(&request()).await.unwrap();
    assert_eq!(completion.text, "Use a lab checklist.");
    assert_eq!(completion.usage, Some(TokenUsage { input: 50, output: 6 }));

    let captured = captured.lock().unwrap();
    assert_eq!(captured.authorization.as_deref(), Some("Bearer test-key"));
    let body = captured.body.as_ref().unwrap();
    assert_eq!(body["system"], json!([{ "text": "You are a planning assistant." }]));
    // The leading assistant greeting is not sent.
    assert_eq!(
        body["messages"],
        json!([{ "role": "user", "content": [{ "text": "My class rushes through labs." }] }])
    );
    assert_eq!(body["inferenceConfig"]["maxTokens"], 300);
    assert!((body["inferenceConfig"]["temperature"].as_f64().unwrap() - 0.5).abs() < 1e-6);
}

#[tokio::test]
async fn bedrock_output_without_message_is_malformed() {
    let (base, _) = spawn_mock(
        "/model/amazon.nova-lite-v1/converse",
        StatusCode::OK,
        r#"{"output":{}}"#,
    )
    .await;
    let client =
        BedrockClient::new(&key(), "eu-central-1", "amazon.nova-lite-v1", Some(&base)).unwrap();

    let err = client.generate(&request()).await.unwrap_err();
    assert!(matches!(err, UpstreamError::Malformed(_)), "got {err:?}");
}

#[tokio::test]
async fn bedrock_profile_arn_is_one_path_segment() {
    let reply = json!({
        "output": { "message": { "role": "assistant", "content": [{ "text": "ok" }] } }
    });
    let (base, captured) = spawn_mock("/{*rest}", StatusCode::OK, &reply.to_string()).await;

    let arn = "arn:aws:bedrock:eu-central-1:123456789012:inference-profile/eu.amazon.nova-lite-v1:0";
    let client = BedrockClient::new(&key(), "eu-central-1", arn, Some(&base)).unwrap();
    assert_eq!(client.model(), arn);

    let completion = client.generate(&request()).await.unwrap();
    assert_eq!(completion.text, "ok");
    assert!(completion.usage.is_none());

    let captured = captured.lock().unwrap();
    assert_eq!(
        captured.path.as_deref(),
        Some(
            "/model/arn:aws:bedrock:eu-central-1:123456789012:inference-profile%2Feu.amazon.nova-lite-v1:0/converse"
        )
    );
}
