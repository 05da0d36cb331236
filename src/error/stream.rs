//! Call-level error types.
//!
//! Every failure that ends an assistant call lands here. Decode noise never
//! does: bad lines and unparseable payloads are dropped inside the decoder
//! and aggregator.

use thiserror::Error;

use crate::traits::HttpError;

/// Errors that terminate a streaming call.
#[derive(Debug, Clone, Error)]
pub enum StreamError {
    /// Upstream answered the run request with a non-success status.
    #[error("OpenAI SSE Error: {status}")]
    Rejected { status: u16, body: String },

    /// The request could not be sent or the connection failed.
    #[error("{0}")]
    Transport(HttpError),

    /// Reading the body failed after streaming had begun.
    #[error("Stream read failed: {0}")]
    Read(HttpError),

    /// The request body could not be serialized.
    #[error("Failed to encode request: {0}")]
    Encode(String),
}

impl StreamError {
    /// Classify an error returned while opening the stream.
    pub fn from_open(err: HttpError) -> Self {
        match err {
            HttpError::ServerError { status, message } => StreamError::Rejected {
                status,
                body: message,
            },
            other => StreamError::Transport(other),
        }
    }

    /// Whether this error happened before any chunk was read.
    pub fn is_before_stream(&self) -> bool {
        !matches!(self, StreamError::Read(_))
    }

    /// Message shown in place of the placeholder.
    pub fn user_message(&self) -> String {
        format!("Error: {}", self)
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            StreamError::Rejected { .. } => "E_STREAM_REJECTED",
            StreamError::Transport(_) => "E_STREAM_TRANSPORT",
            StreamError::Read(_) => "E_STREAM_READ",
            StreamError::Encode(_) => "E_STREAM_ENCODE",
        }
    }
}

impl From<serde_json::Error> for StreamError {
    fn from(err: serde_json::Error) -> Self {
        StreamError::Encode(err.to_string())
    }
}
