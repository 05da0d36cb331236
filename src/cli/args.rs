//! Command-line argument parsing for the assistant-stream CLI.
//!
//! This module turns the raw argument list into the command to execute.

use crate::assistants::CallInput;
use crate::error::ConfigError;

/// Arguments for one assistant call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AskArgs {
    pub assistant_id: String,
    pub thread_id: Option<String>,
    /// Positional words joined with single spaces
    pub message: String,
}

impl AskArgs {
    /// Combine with the API key into a call input.
    pub fn into_call_input(self, api_key: impl Into<String>) -> CallInput {
        let input = CallInput::new(api_key, self.assistant_id, self.message);
        match self.thread_id {
            Some(thread_id) => input.with_thread_id(thread_id),
            None => input,
        }
    }
}

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Stream one assistant reply
    Ask(AskArgs),
}

/// Parse command-line arguments and return the command to execute.
///
/// # Arguments
///
/// * `args` - Iterator of command-line arguments (typically `std::env::args()`)
///
/// # Examples
///
/// ```
/// use assistant_stream::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["assistant-stream".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()).unwrap(), CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> Result<CliCommand, ConfigError>
where
    I: Iterator<Item = String>,
{
    let mut assistant_id = None;
    let mut thread_id = None;
    let mut words = Vec::new();
    let mut only_positional = false;

    // Skip the program name
    let mut args = args.skip(1);
    while let Some(arg) = args.next() {
        if only_positional {
            words.push(arg);
            continue;
        }
        match arg.as_str() {
            "--version" | "-V" => return Ok(CliCommand::Version),
            "--help" | "-h" => return Ok(CliCommand::Help),
            "--assistant" | "-a" => {
                assistant_id = Some(
                    args.next()
                        .ok_or_else(|| ConfigError::MissingArgument(arg.clone()))?,
                );
            }
            "--thread" | "-t" => {
                thread_id = Some(
                    args.next()
                        .ok_or_else(|| ConfigError::MissingArgument(arg.clone()))?,
                );
            }
            "--" => only_positional = true,
            flag if flag.starts_with('-') && flag.len() > 1 => {
                return Err(ConfigError::UnknownArgument(flag.to_string()));
            }
            _ => words.push(arg),
        }
    }

    let assistant_id =
        assistant_id.ok_or_else(|| ConfigError::MissingArgument("--assistant".to_string()))?;
    let message = words.join(" ");
    if message.trim().is_empty() {
        return Err(ConfigError::MissingArgument("<message>".to_string()));
    }

    Ok(CliCommand::Ask(AskArgs {
        assistant_id,
        thread_id,
        message,
    }))
}
