//! # omv entry point
//!
//! Parses flags, initializes logging on stderr, runs one validation pass,
//! and exits with its code.

use std::io;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use omv_cli::{run, Cli, LogFormat};

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => {
                // Usage errors exit 1 like every other failure.
                let _ = e.print();
                return ExitCode::from(1);
            }
        },
    };

    // RUST_LOG, when set, overrides the verbosity flags.
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false);
    match cli.log_format {
        LogFormat::Text => subscriber.init(),
        LogFormat::Json => subscriber.json().init(),
    }

    let config = cli.config();
    tracing::debug!(
        workspace = %config.workspace.display(),
        file = ?config.file,
        schema_dir = ?config.schema_dir,
        "omv v{} starting",
        env!("CARGO_PKG_VERSION")
    );

    let stdout = io::stdout();
    let stderr = io::stderr();
    match run(&config, &mut stdout.lock(), &mut stderr.lock()) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
