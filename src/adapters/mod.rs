//! Concrete implementations of trait abstractions.
//!
//! # Adapters
//!
//! - [`ReqwestHttpClient`] - HTTP transport using reqwest
//! - [`TerminalSink`] - Presentation sink that redraws in place on a terminal
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides test doubles:
//! - [`mock::MockHttpClient`] - Configurable responses and chunk sequences
//! - [`mock::RecordingSink`] - Records every presentation call

pub mod mock;
pub mod reqwest_http;
pub mod terminal_sink;

pub use mock::{MockHttpClient, RecordingSink};
pub use reqwest_http::ReqwestHttpClient;
pub use terminal_sink::{markup_to_ansi, wrap_osc8_hyperlink, TerminalSink};
