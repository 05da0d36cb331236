//! Call configuration.
//!
//! [`StreamConfig`] carries everything a call needs besides its input:
//! the API base URL, the transient status texts and the request timeout.

use std::time::Duration;

use crate::error::ConfigError;

/// Default OpenAI API root
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Text shown while waiting for the first content
pub const DEFAULT_PLACEHOLDER_TEXT: &str = "Thinking...";

/// Text shown when a stream finishes without content
pub const DEFAULT_NO_CONTENT_TEXT: &str = "(No response)";

/// Environment variable overriding the API root
pub const BASE_URL_VAR: &str = "ASSISTANT_STREAM_BASE_URL";

/// Environment variable setting the request timeout in whole seconds
pub const TIMEOUT_VAR: &str = "ASSISTANT_STREAM_TIMEOUT_SECS";

/// Configuration for a streaming assistant call.
///
/// # Example
///
/// ```
/// use assistant_stream::config::StreamConfig;
///
/// let config = StreamConfig::default()
///     .with_base_url("http://localhost:8080/v1")
///     .with_placeholder_text("Working...");
/// assert_eq!(config.url("threads/runs"), "http://localhost:8080/v1/threads/runs");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StreamConfig {
    /// API root, without a trailing slash
    pub base_url: String,
    /// Placeholder label shown until the first render
    pub placeholder_text: String,
    /// Content shown when the stream carried no text
    pub no_content_text: String,
    /// Overall timeout applied to each request
    pub request_timeout: Option<Duration>,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            placeholder_text: DEFAULT_PLACEHOLDER_TEXT.to_string(),
            no_content_text: DEFAULT_NO_CONTENT_TEXT.to_string(),
            request_timeout: None,
        }
    }
}

impl StreamConfig {
    /// Create a new StreamConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API root. A trailing slash is dropped.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Set the placeholder label.
    pub fn with_placeholder_text(mut self, text: impl Into<String>) -> Self {
        self.placeholder_text = text.into();
        self
    }

    /// Set the no-content text.
    pub fn with_no_content_text(mut self, text: impl Into<String>) -> Self {
        self.no_content_text = text.into();
        self
    }

    /// Set the request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Join `path` onto the API root.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Create config from `ASSISTANT_STREAM_BASE_URL` and
    /// `ASSISTANT_STREAM_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(BASE_URL_VAR).filter(|v| !v.trim().is_empty()) {
            let url = url.trim();
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::InvalidValue {
                    key: BASE_URL_VAR.to_string(),
                    value: url.to_string(),
                });
            }
            config = config.with_base_url(url);
        }

        if let Some(raw) = lookup(TIMEOUT_VAR).filter(|v| !v.trim().is_empty()) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| ConfigError::InvalidValue {
                    key: TIMEOUT_VAR.to_string(),
                    value: raw.clone(),
                })?;
            config = config.with_request_timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }
}
