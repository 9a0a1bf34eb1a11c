//! phoenixctl - ABI-sync tooling for the CTRE Phoenix bindings
//!
//! Prints the symbol snapshot the bindings were written against and checks a
//! staged vendored library for symbols it fails to export.

#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod commands;
mod error;
mod output;

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::LibraryArgs;
use crate::error::CliError;

#[derive(Parser)]
#[command(name = "phoenixctl")]
#[command(about = "ABI-sync tooling for the CTRE Phoenix bindings")]
#[command(version)]
#[command(long_about = "
phoenixctl checks the staged CTRE Phoenix library against the symbols the
Rust bindings declare. Run `check-abi` after staging a new vendor drop.

Use --json for machine-readable output suitable for CI.
")]
struct Cli {
    /// Output in JSON format for machine parsing
    #[arg(long, global = true)]
    json: bool,

    /// Verbose logging
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every symbol the bindings resolve
    Symbols,

    /// Report declared symbols the staged library does not export
    CheckAbi(LibraryArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("phoenixctl={log_level},ctre_phoenix={log_level}").into()
            }),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match execute_command(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let cli_error = e.downcast_ref::<CliError>();
            // The report already went to stdout.
            let reported = matches!(cli_error, Some(CliError::MissingSymbols { .. }));
            if cli.json && !reported {
                output::print_error_json(&e);
            } else if !cli.json {
                output::print_error_human(&e);
            }
            ExitCode::from(cli_error.map_or(1, CliError::exit_code))
        }
    }
}

fn execute_command(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Symbols => commands::symbols(cli.json),
        Commands::CheckAbi(args) => commands::check_abi(args, cli.json),
    }
}
