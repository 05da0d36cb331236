//! OpenAI Assistants request plumbing.
//!
//! Opens the SSE stream for one user turn. Without a usable thread id a
//! new thread is created and run in a single request; with one, the user
//! message is appended to the thread first and a run is started on it.
//! Both paths end in the same `thread.message.delta` stream.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::StreamConfig;
use crate::error::{StreamError, StreamResult};
use crate::traits::{ByteStream, Headers, HttpClient};

/// Prefix every valid thread id carries
pub const THREAD_ID_PREFIX: &str = "thread_";

/// Value of the `OpenAI-Beta` header
pub const ASSISTANTS_BETA: &str = "assistants=v2";

/// Input for one assistant call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallInput {
    pub api_key: String,
    pub assistant_id: String,
    /// Existing thread to continue; ignored unless it looks like a thread id
    pub thread_id: Option<String>,
    pub user_message: String,
}

impl CallInput {
    pub fn new(
        api_key: impl Into<String>,
        assistant_id: impl Into<String>,
        user_message: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            assistant_id: assistant_id.into(),
            thread_id: None,
            user_message: user_message.into(),
        }
    }

    /// Continue an existing thread.
    pub fn with_thread_id(mut self, thread_id: impl Into<String>) -> Self {
        self.thread_id = Some(thread_id.into());
        self
    }

    /// The thread id, if present and well-formed.
    pub fn existing_thread(&self) -> Option<&str> {
        self.thread_id.as_deref().filter(|id| is_thread_id(id))
    }
}

/// Whether `id` names an existing thread.
pub fn is_thread_id(id: &str) -> bool {
    id.starts_with(THREAD_ID_PREFIX)
}

/// Headers sent with every Assistants request.
pub fn request_headers(api_key: &str) -> Headers {
    let mut headers = Headers::new();
    headers.insert("Authorization".to_string(), format!("Bearer {}", api_key));
    headers.insert("Content-Type".to_string(), "application/json".to_string());
    headers.insert("OpenAI-Beta".to_string(), ASSISTANTS_BETA.to_string());
    headers
}

#[derive(Debug, Serialize)]
struct UserMessage<'a> {
    role: &'static str,
    content: &'a str,
}

impl<'a> UserMessage<'a> {
    fn new(content: &'a str) -> Self {
        Self {
            role: "user",
            content,
        }
    }
}

#[derive(Debug, Serialize)]
struct NewThread<'a> {
    messages: Vec<UserMessage<'a>>,
}

/// Body of `POST /threads/runs` and `POST /threads/{id}/runs`.
#[derive(Debug, Serialize)]
struct RunRequest<'a> {
    assistant_id: &'a str,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    thread: Option<NewThread<'a>>,
}

/// Serialize the body that creates and runs a new thread.
pub fn new_thread_run_body(input: &CallInput) -> StreamResult<String> {
    let body = RunRequest {
        assistant_id: &input.assistant_id,
        stream: true,
        thread: Some(NewThread {
            messages: vec![UserMessage::new(&input.user_message)],
        }),
    };
    Ok(serde_json::to_string(&body)?)
}

/// Serialize the body that starts a run on an existing thread.
pub fn thread_run_body(input: &CallInput) -> StreamResult<String> {
    let body = RunRequest {
        assistant_id: &input.assistant_id,
        stream: true,
        thread: None,
    };
    Ok(serde_json::to_string(&body)?)
}

/// Serialize the body that appends the user message to a thread.
pub fn append_message_body(input: &CallInput) -> StreamResult<String> {
    Ok(serde_json::to_string(&UserMessage::new(&input.user_message))?)
}

/// Open the run stream for `input`.
///
/// A non-success status on the run request is a [`StreamError::Rejected`].
/// The status of the message-append request is not checked; only a
/// transport failure there ends the call.
pub async fn open_stream<C>(
    client: &C,
    config: &StreamConfig,
    input: &CallInput,
) -> StreamResult<ByteStream>
where
    C: HttpClient + ?Sized,
{
    let headers = request_headers(&input.api_key);

    let (url, body) = match input.existing_thread() {
        None => {
            if let Some(id) = input.thread_id.as_deref() {
                debug!(thread_id = id, "Ignoring malformed thread id, starting new thread");
            }
            (config.url("threads/runs"), new_thread_run_body(input)?)
        }
        Some(thread_id) => {
            let messages_url = config.url(&format!("threads/{}/messages", thread_id));
            let response = client
                .post(&messages_url, &append_message_body(input)?, &headers)
                .await
                .map_err(StreamError::Transport)?;
            if !response.is_success() {
                warn!(
                    status = response.status,
                    thread_id, "Message append was not accepted, starting run anyway"
                );
            }
            (
                config.url(&format!("threads/{}/runs", thread_id)),
                thread_run_body(input)?,
            )
        }
    };

    info!(url = %url, assistant_id = %input.assistant_id, "Opening assistant stream");
    client
        .post_stream(&url, &body, &headers)
        .await
        .map_err(StreamError::from_open)
}
