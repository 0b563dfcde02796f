#![deny(missing_docs)]

//! # Designval CLI
//!
//! Command Line Interface for checking API designs.
//!
//! Supported Commands:
//! - `check`: Validates a design document and reports every finding.
//! - `kinds`: Lists the request-time error taxonomy.
//!
//! Exits with status 1 when a design has findings, 2 when the tool itself
//! fails.

use crate::error::CliResult;
use clap::{Parser, Subcommand};
use std::io::Write;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod check;
mod error;
mod kinds;

#[derive(Parser, Debug)]
#[clap(author, version, about = "API design validator")]
struct Cli {
    /// Log progress to stderr. `RUST_LOG` takes precedence when set.
    #[clap(short, long, global = true, env = "DESIGNVAL_VERBOSE")]
    verbose: bool,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a design document.
    Check(check::CheckArgs),
    /// List the error kinds reported while decoding requests.
    Kinds(kinds::KindsArgs),
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> CliResult<ExitCode> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let code = match &cli.command {
        Commands::Check(args) => {
            if check::execute(args, &mut out)? == 0 {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            }
        }
        Commands::Kinds(args) => {
            kinds::execute(args, &mut out)?;
            ExitCode::SUCCESS
        }
    };
    out.flush()?;
    Ok(code)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli_structure() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_check_arguments() {
        let cli = Cli::try_parse_from([
            "designval",
            "check",
            "design.json",
            "--format",
            "json",
            "--no-attach",
            "-v",
        ])
        .unwrap();
        assert!(cli.verbose);
        let Commands::Check(args) = cli.command else {
            panic!("expected the check command");
        };
        assert_eq!(args.file, std::path::PathBuf::from("design.json"));
        assert_eq!(args.format, check::OutputFormat::Json);
        assert!(args.no_attach);
    }

    #[test]
    fn test_parse_kinds_defaults_to_text() {
        let cli = Cli::try_parse_from(["designval", "kinds"]).unwrap();
        let Commands::Kinds(args) = cli.command else {
            panic!("expected the kinds command");
        };
        assert_eq!(args.format, check::OutputFormat::Text);
    }
}
