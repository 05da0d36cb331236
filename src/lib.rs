//! Assistant stream - live rendering of OpenAI Assistants replies
//!
//! Decodes the Server-Sent Events body of an Assistants run, aggregates the
//! `thread.message.delta` text fragments and re-renders the whole reply as
//! a small markup fragment after every delta.
//!
//! # Module structure
//! - `sse` - Byte chunks to SSE frames
//! - `delta` - Frames to accumulated text and render state
//! - `markup` - Ordered substitution rules
//! - `assistants` - Request shapes for new and existing threads
//! - `session` - One call end to end, driving a presentation sink
//! - `traits` / `adapters` - Transport and sink seams plus implementations

pub mod adapters;
pub mod assistants;
pub mod cli;
pub mod config;
pub mod delta;
pub mod error;
pub mod markup;
pub mod session;
pub mod sse;
pub mod traits;

pub use assistants::CallInput;
pub use config::StreamConfig;
pub use error::{ConfigError, StreamError, StreamResult};
pub use session::{run_call, StreamOutcome, StreamSession};
