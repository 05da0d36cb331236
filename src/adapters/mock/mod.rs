//! Mock implementations for testing.
//!
//! This module provides mock implementations of the trait abstractions,
//! enabling tests without network access or a real display.
//!
//! # Available Mocks
//!
//! - [`MockHttpClient`] - HTTP client with configurable responses and chunking
//! - [`RecordingSink`] - Presentation sink that records every call

pub mod http;
pub mod sink;

pub use http::{MockHttpClient, MockResponse, RecordedRequest};
pub use sink::{RecordingSink, SinkCall};
