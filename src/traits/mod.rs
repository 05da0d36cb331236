//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - HTTP transport (buffered and streaming POST)
//! - [`PresentationSink`] - Where placeholder, renders, errors and the
//!   completion notification go

pub mod http;
pub mod sink;

pub use http::{ByteStream, Headers, HttpClient, HttpError, Response};
pub use sink::PresentationSink;
