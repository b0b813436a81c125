//! calstat CLI entry point.

use std::process::ExitCode;

use chrono::Utc;
use clap::Parser;
use tracing::warn;

use calstat_client::cli::Cli;
use calstat_client::config::ClientConfig;
use calstat_client::error::ClientResult;
use calstat_core::tracing::{TracingConfig, init_tracing};

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(TracingConfig::for_cli(cli.debug)) {
        eprintln!("warning: {}", e);
    }

    match run(&cli) {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) if e.is_not_found() => {
            eprintln!(
                "error: calendar file '{}' not found",
                cli.calendar_file.display()
            );
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> ClientResult<String> {
    let config = if let Some(ref path) = cli.config {
        ClientConfig::load_from(path)?
    } else {
        ClientConfig::load().unwrap_or_else(|e| {
            warn!(error = %e, "Ignoring unreadable default config");
            ClientConfig::default()
        })
    };

    calstat_client::commands::analyze::run(cli, &config, Utc::now())
}
