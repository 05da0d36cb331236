use assistant_stream::adapters::{ReqwestHttpClient, TerminalSink};
use assistant_stream::cli::{
    api_key_from_env, handle_help_command, handle_version_command, parse_args, CliCommand, USAGE,
};
use assistant_stream::config::StreamConfig;
use assistant_stream::session::run_call;

use color_eyre::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Logs go to stderr so they never interleave with the rendered reply.
fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let ask = match parse_args(std::env::args()) {
        Ok(CliCommand::Version) => handle_version_command(),
        Ok(CliCommand::Help) => handle_help_command(),
        Ok(CliCommand::Ask(ask)) => ask,
        Err(e) => {
            eprintln!("{}\n\n{}", e, USAGE);
            std::process::exit(2);
        }
    };

    setup_logging();

    let config = StreamConfig::from_env()?;
    let input = ask.into_call_input(api_key_from_env()?);

    let client = match config.request_timeout {
        Some(timeout) => ReqwestHttpClient::with_timeout(timeout)?,
        None => ReqwestHttpClient::new(),
    };
    let mut sink = TerminalSink::stdout();

    // The sink has already shown the error; only the exit code is left.
    if run_call(&client, &config, &input, &mut sink).await.is_err() {
        std::process::exit(1);
    }

    Ok(())
}
