//! Version and usage output for the assistant-stream CLI.

/// The current version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Usage text printed for `--help` and on argument errors.
pub const USAGE: &str = "\
Usage: assistant-stream --assistant <id> [--thread <id>] <message...>

Streams one assistant reply to the terminal.

Options:
  -a, --assistant <id>  Assistant to run (required)
  -t, --thread <id>     Continue an existing thread (ids start with thread_)
  -h, --help            Print this help
  -V, --version         Print the version

Environment:
  OPENAI_API_KEY                 API key (required)
  ASSISTANT_STREAM_BASE_URL      API root (default https://api.openai.com/v1)
  ASSISTANT_STREAM_TIMEOUT_SECS  Request timeout in seconds
  RUST_LOG                       Log filter, logs go to stderr (default warn)";

/// Handle the --version command.
///
/// Prints the version string and exits successfully.
pub fn handle_version_command() -> ! {
    println!("assistant-stream {}", VERSION);
    std::process::exit(0)
}

/// Handle the --help command.
pub fn handle_help_command() -> ! {
    println!("{}", USAGE);
    std::process::exit(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_not_empty() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_version_format() {
        let parts: Vec<&str> = VERSION.split('.').collect();
        assert!(parts.len() >= 2, "Version should have at least major.minor");
    }

    #[test]
    fn test_usage_mentions_required_inputs() {
        assert!(USAGE.contains("--assistant"));
        assert!(USAGE.contains("OPENAI_API_KEY"));
    }
}
