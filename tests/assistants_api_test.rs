//! Assistants API request tests using wiremock.
//!
//! These tests verify that a call over the real reqwest transport hits the
//! right endpoints with the right headers and bodies, and that the SSE
//! response is rendered through the sink.

mod common;

use assistant_stream::adapters::mock::{RecordingSink, SinkCall};
use assistant_stream::adapters::ReqwestHttpClient;
use assistant_stream::config::StreamConfig;
use assistant_stream::{run_call, CallInput, StreamError};
use common::SseBody;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper to create a test API key.
fn test_key() -> String {
    "sk-wiremock-key".to_string()
}

fn config_for(server: &MockServer) -> StreamConfig {
    StreamConfig::default().with_base_url(format!("{}/v1", server.uri()))
}

fn sse_response(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("Content-Type", "text/event-stream")
        .set_body_string(body)
}

#[tokio::test]
async fn test_new_thread_run_streams_reply() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/threads/runs"))
        .and(header("Authorization", format!("Bearer {}", test_key()).as_str()))
        .and(header("OpenAI-Beta", "assistants=v2"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(serde_json::json!({
            "assistant_id": "asst_1",
            "stream": true,
            "thread": { "messages": [{ "role": "user", "content": "Tell me a joke" }] }
        })))
        .respond_with(sse_response(
            SseBody::new()
                .run_created()
                .text("Why did the ")
                .text("*crab* never share?")
                .done()
                .build(),
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ReqwestHttpClient::new();
    let input = CallInput::new(test_key(), "asst_1", "Tell me a joke");
    let mut sink = RecordingSink::new();

    let outcome = run_call(&client, &config_for(&mock_server), &input, &mut sink)
        .await
        .unwrap();

    assert_eq!(outcome.completion.text(), "Why did the *crab* never share?");
    assert_eq!(outcome.renders, 2);
    assert_eq!(
        sink.last_render(),
        Some("Why did the <em>crab</em> never share?".to_string())
    );
    assert_eq!(
        sink.completion(),
        Some("Why did the *crab* never share?".to_string())
    );
}

#[tokio::test]
async fn test_existing_thread_appends_then_runs() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/threads/thread_42/messages"))
        .and(header("Authorization", format!("Bearer {}", test_key()).as_str()))
        .and(body_json(serde_json::json!({ "role": "user", "content": "And another?" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "msg_2",
            "object": "thread.message"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/threads/thread_42/runs"))
        .and(header("OpenAI-Beta", "assistants=v2"))
        .and(body_json(serde_json::json!({ "assistant_id": "asst_1", "stream": true })))
        .respond_with(sse_response(SseBody::new().text("Sure.").done().build()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ReqwestHttpClient::new();
    let input = CallInput::new(test_key(), "asst_1", "And another?").with_thread_id("thread_42");
    let mut sink = RecordingSink::new();

    let outcome = run_call(&client, &config_for(&mock_server), &input, &mut sink)
        .await
        .unwrap();

    assert_eq!(outcome.completion.text(), "Sure.");
}

#[tokio::test]
async fn test_failed_append_still_runs() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/threads/thread_42/messages"))
        .respond_with(ResponseTemplate::new(400).set_body_string("run is active"))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/threads/thread_42/runs"))
        .respond_with(sse_response(SseBody::new().text("Still here").done().build()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ReqwestHttpClient::new();
    let input = CallInput::new(test_key(), "asst_1", "hi").with_thread_id("thread_42");
    let mut sink = RecordingSink::new();

    let outcome = run_call(&client, &config_for(&mock_server), &input, &mut sink)
        .await
        .unwrap();

    assert_eq!(outcome.completion.text(), "Still here");
}

#[tokio::test]
async fn test_unauthorized_run_is_rejected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/threads/runs"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": { "message": "Incorrect API key provided", "type": "invalid_request_error" }
        })))
        .mount(&mock_server)
        .await;

    let client = ReqwestHttpClient::new();
    let input = CallInput::new("sk-bad", "asst_1", "hi");
    let mut sink = RecordingSink::new();

    let err = run_call(&client, &config_for(&mock_server), &input, &mut sink)
        .await
        .unwrap_err();

    match &err {
        StreamError::Rejected { status, body } => {
            assert_eq!(*status, 401);
            assert!(body.contains("Incorrect API key"));
        }
        other => panic!("expected rejection, got {:?}", other),
    }
    assert!(sink.renders().is_empty());
    assert_eq!(
        sink.calls().last(),
        Some(&SinkCall::ReportError("Error: OpenAI SSE Error: 401".to_string()))
    );
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    // Nothing listens on port 9 of the loopback interface
    let config = StreamConfig::default().with_base_url("http://127.0.0.1:9/v1");
    let client = ReqwestHttpClient::new();
    let input = CallInput::new(test_key(), "asst_1", "hi");
    let mut sink = RecordingSink::new();

    let err = run_call(&client, &config, &input, &mut sink)
        .await
        .unwrap_err();

    assert!(matches!(err, StreamError::Transport(_)));
    assert!(sink.error().is_some());
    assert_eq!(sink.completion(), None);
}
