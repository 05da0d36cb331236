//! Common test utilities for integration tests.
//!
//! Builders for SSE bodies in the shape the Assistants API streams, plus
//! helpers for wiring the mock transport.
//!
//! # Example
//!
//! ```ignore
//! let body = SseBody::new().text("Hello").text(" world").done().build();
//! ```

#![allow(dead_code)]

use assistant_stream::adapters::mock::{MockHttpClient, MockResponse};
use assistant_stream::config::StreamConfig;
use assistant_stream::CallInput;
use serde_json::json;

/// Base URL the mock transport answers on.
pub const MOCK_BASE: &str = "http://mock.openai.test/v1";

/// Creates a config pointing at the mock transport.
pub fn mock_config() -> StreamConfig {
    StreamConfig::default().with_base_url(MOCK_BASE)
}

/// Creates call input for a new thread.
pub fn new_thread_input(message: &str) -> CallInput {
    CallInput::new("sk-test-key", "asst_test", message)
}

/// URL of the new-thread run endpoint on the mock transport.
pub fn runs_url() -> String {
    format!("{}/threads/runs", MOCK_BASE)
}

/// Mock client whose new-thread run streams `body` in `chunk_size` pieces.
pub fn streaming_client(body: &str, chunk_size: usize) -> MockHttpClient {
    let client = MockHttpClient::new();
    client.set_response(&runs_url(), MockResponse::chunked(body, chunk_size));
    client
}

/// JSON for a `thread.message.delta` event with one text item per value.
pub fn delta_event(values: &[&str]) -> serde_json::Value {
    let content: Vec<serde_json::Value> = values
        .iter()
        .enumerate()
        .map(|(index, value)| {
            json!({
                "index": index,
                "type": "text",
                "text": { "value": value, "annotations": [] }
            })
        })
        .collect();
    json!({
        "id": "msg_test",
        "object": "thread.message.delta",
        "delta": { "content": content }
    })
}

/// Builder for SSE bodies as the Assistants API streams them.
#[derive(Debug, Default)]
pub struct SseBody {
    body: String,
}

impl SseBody {
    pub fn new() -> Self {
        Self::default()
    }

    /// Event and data line pair, like the real stream.
    pub fn event(mut self, name: &str, data: &serde_json::Value) -> Self {
        self.body.push_str(&format!("event: {}\ndata: {}\n\n", name, data));
        self
    }

    /// One text delta.
    pub fn text(self, value: &str) -> Self {
        self.texts(&[value])
    }

    /// One delta carrying several text items.
    pub fn texts(self, values: &[&str]) -> Self {
        self.event("thread.message.delta", &delta_event(values))
    }

    /// A lifecycle event the aggregator ignores.
    pub fn run_created(self) -> Self {
        self.event(
            "thread.run.created",
            &json!({ "id": "run_1", "object": "thread.run", "status": "queued" }),
        )
    }

    /// Raw text appended verbatim.
    pub fn raw(mut self, text: &str) -> Self {
        self.body.push_str(text);
        self
    }

    /// Termination sentinel.
    pub fn done(mut self) -> Self {
        self.body.push_str("event: done\ndata: [DONE]\n\n");
        self
    }

    pub fn build(self) -> String {
        self.body
    }
}
