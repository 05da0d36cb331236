//! End-to-end session tests over the mock transport.
//!
//! These tests drive `run_call` with canned SSE bodies split at arbitrary
//! byte boundaries and assert on the exact sequence of sink calls.

mod common;

use assistant_stream::adapters::mock::{MockHttpClient, MockResponse, RecordingSink, SinkCall};
use assistant_stream::delta::Completion;
use assistant_stream::traits::{HttpError, Response};
use assistant_stream::{run_call, StreamError};
use bytes::Bytes;
use common::*;

async fn run_body(body: &str, chunk_size: usize) -> (RecordingSink, Result<Completion, StreamError>) {
    let client = streaming_client(body, chunk_size);
    let mut sink = RecordingSink::new();
    let result = run_call(&client, &mock_config(), &new_thread_input("hi"), &mut sink)
        .await
        .map(|outcome| outcome.completion);
    (sink, result)
}

#[tokio::test]
async fn test_streamed_reply_renders_progressively() {
    let body = SseBody::new()
        .run_created()
        .text("Hello")
        .text(" **world**")
        .text("!")
        .done()
        .build();

    let (sink, result) = run_body(&body, 1024).await;

    assert_eq!(result.unwrap(), Completion::Content("Hello **world**!".to_string()));
    assert_eq!(
        sink.calls(),
        vec![
            SinkCall::ShowPlaceholder("Thinking...".to_string()),
            SinkCall::RemovePlaceholder,
            SinkCall::SetContent("Hello".to_string()),
            SinkCall::SetContent("Hello <strong>world</strong>".to_string()),
            SinkCall::SetContent("Hello <strong>world</strong>!".to_string()),
            SinkCall::ReportComplete("Hello **world**!".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_chunk_boundaries_do_not_change_output() {
    let body = SseBody::new()
        .run_created()
        .text("### Caf\u{e9} r\u{e9}sum\u{e9}\n")
        .texts(&["- one\n", "- two \u{1f30d}\n"])
        .text("See [docs](http://x) and ![img](http://y)")
        .done()
        .build();

    let (baseline, result) = run_body(&body, body.len()).await;
    assert!(result.is_ok());
    assert_eq!(baseline.renders().len(), 3);

    for size in [1, 2, 3, 5, 7, 13, 64] {
        let (sink, result) = run_body(&body, size).await;
        assert!(result.is_ok(), "chunk size {} failed", size);
        assert_eq!(sink.calls(), baseline.calls(), "chunk size {} diverged", size);
    }
}

#[tokio::test]
async fn test_multi_item_delta_appends_in_order() {
    let body = SseBody::new().texts(&["a", "b", "c"]).done().build();

    let (sink, result) = run_body(&body, 7).await;

    assert_eq!(result.unwrap().text(), "abc");
    assert_eq!(sink.renders(), vec!["abc".to_string()]);
}

#[tokio::test]
async fn test_noise_is_dropped() {
    let body = SseBody::new()
        .raw(": keep-alive comment\n")
        .raw("data: {not json\n")
        .raw("data: {\"object\":\"thread.message.delta\",\"delta\":{}}\n")
        .raw("data: {\"object\":\"thread.message.delta\",\"delta\":{\"content\":[{\"type\":\"image_file\",\"image_file\":{\"file_id\":\"f\"}}]}}\n")
        .raw("id: 7\nretry: 100\n\n")
        .text("ok")
        .raw("data: 42\n")
        .done()
        .build();

    let (sink, result) = run_body(&body, 5).await;

    assert_eq!(result.unwrap().text(), "ok");
    assert_eq!(sink.renders(), vec!["ok".to_string()]);
}

#[tokio::test]
async fn test_no_content_shows_fallback_text() {
    let body = SseBody::new().run_created().done().build();

    let (sink, result) = run_body(&body, 3).await;

    assert_eq!(result.unwrap(), Completion::NoContent);
    assert_eq!(
        sink.calls(),
        vec![
            SinkCall::ShowPlaceholder("Thinking...".to_string()),
            SinkCall::RemovePlaceholder,
            SinkCall::SetContent("(No response)".to_string()),
            SinkCall::ReportComplete(String::new()),
        ]
    );
}

#[tokio::test]
async fn test_end_of_body_without_sentinel_completes() {
    let body = SseBody::new().text("partial reply").build();

    let (sink, result) = run_body(&body, 4).await;

    assert_eq!(result.unwrap().text(), "partial reply");
    assert_eq!(sink.completion(), Some("partial reply".to_string()));
}

#[tokio::test]
async fn test_trailing_unterminated_line_is_not_processed() {
    let body = format!("data: {}", delta_event(&["lost"]));

    let (sink, result) = run_body(&body, 8).await;

    assert_eq!(result.unwrap(), Completion::NoContent);
    assert!(sink.renders().iter().all(|r| r == "(No response)"));
}

#[tokio::test]
async fn test_frames_after_sentinel_are_ignored() {
    let body = SseBody::new().text("kept").done().text(" dropped").build();

    let (sink, result) = run_body(&body, 1024).await;

    assert_eq!(result.unwrap().text(), "kept");
    assert_eq!(sink.renders(), vec!["kept".to_string()]);
}

#[tokio::test]
async fn test_rejected_run_reports_error_without_renders() {
    let client = MockHttpClient::new();
    client.set_response(
        &runs_url(),
        MockResponse::Success(Response::new(401, Bytes::from("{\"error\":\"invalid key\"}"))),
    );
    let mut sink = RecordingSink::new();

    let err = run_call(&client, &mock_config(), &new_thread_input("hi"), &mut sink)
        .await
        .unwrap_err();

    assert!(matches!(err, StreamError::Rejected { status: 401, .. }));
    assert!(sink.renders().is_empty());
    assert_eq!(sink.completion(), None);
    assert_eq!(
        sink.calls(),
        vec![
            SinkCall::ShowPlaceholder("Thinking...".to_string()),
            SinkCall::RemovePlaceholder,
            SinkCall::ReportError("Error: OpenAI SSE Error: 401".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_read_error_keeps_partial_render() {
    let first = SseBody::new().text("Half").build();
    let client = MockHttpClient::new();
    client.set_response(
        &runs_url(),
        MockResponse::StreamThenError(
            vec![Bytes::from(first)],
            HttpError::Io("connection reset".to_string()),
        ),
    );
    let mut sink = RecordingSink::new();

    let err = run_call(&client, &mock_config(), &new_thread_input("hi"), &mut sink)
        .await
        .unwrap_err();

    assert!(matches!(err, StreamError::Read(_)));
    assert_eq!(sink.renders(), vec!["Half".to_string()]);
    assert_eq!(
        sink.error(),
        Some("Error: Stream read failed: IO error: connection reset".to_string())
    );
    assert_eq!(sink.completion(), None);
    let removals = sink
        .calls()
        .iter()
        .filter(|c| **c == SinkCall::RemovePlaceholder)
        .count();
    assert_eq!(removals, 1);
}

#[tokio::test]
async fn test_existing_thread_appends_message_then_streams() {
    let thread = "thread_abc";
    let client = MockHttpClient::new();
    client.set_response(
        &format!("{}/threads/{}/messages", MOCK_BASE, thread),
        MockResponse::Success(Response::new(200, Bytes::from("{\"id\":\"msg_1\"}"))),
    );
    client.set_response(
        &format!("{}/threads/{}/runs", MOCK_BASE, thread),
        MockResponse::chunked(&SseBody::new().text("Again").done().build(), 9),
    );
    let mut sink = RecordingSink::new();
    let input = new_thread_input("follow up").with_thread_id(thread);

    let outcome = run_call(&client, &mock_config(), &input, &mut sink)
        .await
        .unwrap();

    assert_eq!(outcome.completion.text(), "Again");
    assert!(outcome.terminated_by_sentinel);

    let requests = client.get_requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].json()["content"], "follow up");
    assert_eq!(requests[1].json()["assistant_id"], "asst_test");
    assert_eq!(requests[1].json()["stream"], true);
    for request in &requests {
        assert_eq!(
            request.headers.get("Authorization").map(String::as_str),
            Some("Bearer sk-test-key")
        );
        assert_eq!(
            request.headers.get("OpenAI-Beta").map(String::as_str),
            Some("assistants=v2")
        );
    }
}

#[tokio::test]
async fn test_custom_status_texts() {
    let client = streaming_client(&SseBody::new().done().build(), 16);
    let config = mock_config()
        .with_placeholder_text("Working...")
        .with_no_content_text("Nothing to say");
    let mut sink = RecordingSink::new();

    run_call(&client, &config, &new_thread_input("hi"), &mut sink)
        .await
        .unwrap();

    assert_eq!(
        sink.calls().first(),
        Some(&SinkCall::ShowPlaceholder("Working...".to_string()))
    );
    assert_eq!(sink.last_render(), Some("Nothing to say".to_string()));
}
