use std::process::ExitCode;

use clap::Parser;
use rill_cli::{Cli, Config, DriverError, Session};
use rill_eval::Value;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return match err.kind() {
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                    ExitCode::SUCCESS
                }
                _ => ExitCode::FAILURE,
            };
        }
    };

    let config = Config::from(cli);
    init_tracing(config.log_filter());

    match Session::new(config).run() {
        Ok(value) => {
            if !matches!(value, Value::Null) {
                println!("{}", value.inspect());
            }
            ExitCode::SUCCESS
        }
        Err(DriverError::ParseFailed(diagnostics)) => {
            for diagnostic in &diagnostics {
                eprintln!("Parser error: {}", diagnostic.message);
            }
            ExitCode::FAILURE
        }
        Err(err) => {
            // Host-level failures outside the parse-error path (currently
            // just an unreadable source file) are reported through anyhow
            // for a consistent top-level error chain (§7, §10.3).
            eprintln!("error: {:#}", anyhow::Error::new(err));
            ExitCode::FAILURE
        }
    }
}

/// Honors `RUST_LOG` (`tracing-subscriber`'s standard convention) over the
/// `-v`-derived default (§6, §10.2).
fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
