//! Error handling for assistant stream calls.
//!
//! - **StreamError**: anything that ends a call (upstream rejection,
//!   transport failure, mid-stream read failure)
//! - **ConfigError**: bad environment variables or command-line arguments
//!
//! Protocol noise is not an error anywhere in this crate; it is dropped
//! where it is detected.
//!
//! | Error | Before first chunk | Shown to sink |
//! |-------|--------------------|---------------|
//! | Rejected | Yes | `Error: OpenAI SSE Error: <status>` |
//! | Transport | Yes | `Error: <transport message>` |
//! | Read | No | `Error: Stream read failed: ...` |

mod config;
mod stream;

pub use config::ConfigError;
pub use stream::StreamError;

/// Type alias for Results using StreamError.
pub type StreamResult<T> = Result<T, StreamError>;
