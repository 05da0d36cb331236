//! CLI module for assistant-stream.
//!
//! This module provides command-line interface functionality including:
//! - Argument parsing
//! - Version and usage display
//!
//! # Usage
//!
//! ```ignore
//! use assistant_stream::cli::{parse_args, CliCommand};
//!
//! match parse_args(std::env::args())? {
//!     CliCommand::Version => handle_version_command(),
//!     CliCommand::Help => handle_help_command(),
//!     CliCommand::Ask(ask) => { /* run the call */ }
//! }
//! ```

pub mod args;
pub mod version;

pub use args::{parse_args, AskArgs, CliCommand};
pub use version::{handle_help_command, handle_version_command, USAGE, VERSION};

use crate::error::ConfigError;

/// Environment variable holding the API key
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Read the API key from `OPENAI_API_KEY`.
pub fn api_key_from_env() -> Result<String, ConfigError> {
    std::env::var(API_KEY_VAR)
        .ok()
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| ConfigError::MissingVar(API_KEY_VAR.to_string()))
}
