//! Configuration and argument errors.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    MissingVar(String),

    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },

    #[error("Missing required argument {0}")]
    MissingArgument(String),

    #[error("Unknown argument {0}")]
    UnknownArgument(String),
}
