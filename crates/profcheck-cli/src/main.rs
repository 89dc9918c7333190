//! # profcheck CLI entry point
//!
//! Parses global options with clap, hands every remaining token to the
//! classifier untouched (mode switches are position-sensitive), runs the
//! validation pipeline, and maps the outcome to an exit code.

use std::ffi::OsString;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use profcheck_cli::{render_report, run};
use profcheck_core::RunConfig;

/// Validate profile and legacy YAML documents against versioned JSON schemas.
///
/// File arguments are classified by the directory they sit in (`profiles/`
/// or `legacies/`). Mode switches apply to the arguments that follow them:
/// --profiles, --legacies, --sniff, --nosniff. --loose disables schema
/// tightening and must come before any file.
///
/// Schemas are read from $PROFCHECK_SCHEMA_ROOT/$PROFCHECK_SCHEMA_VERSION
/// (default: schemas/v1).
#[derive(Parser, Debug)]
#[command(name = "profcheck", version)]
struct Cli {
    /// Enable verbose logging. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Files to validate, interleaved with mode switches.
    #[arg(value_name = "ARGS", trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let raw: Vec<OsString> = std::env::args_os().collect();
    let cli = Cli::parse_from(&raw);
    let args = restore_leading_escape(&raw, cli.args);

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match execute(&args).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("{} {e:#}", "error:".red().bold());
            ExitCode::from(1)
        }
    }
}

/// Put back a bare `--` that clap consumed as its end-of-options marker.
///
/// Only the verbosity flag can precede the first argument clap hands to
/// `args`, so a `--` right after any `-v` clusters was swallowed and must
/// reach the classifier like any other flag.
fn restore_leading_escape(raw: &[OsString], mut args: Vec<String>) -> Vec<String> {
    let first = raw.iter().skip(1).find(|token| !is_verbosity_flag(token));
    if first.is_some_and(|token| token == "--") {
        args.insert(0, "--".to_string());
    }
    args
}

fn is_verbosity_flag(token: &OsString) -> bool {
    token
        .to_str()
        .and_then(|t| t.strip_prefix('-'))
        .is_some_and(|rest| !rest.is_empty() && rest.chars().all(|c| c == 'v'))
}

/// Returns whether every file validated.
async fn execute(args: &[String]) -> anyhow::Result<bool> {
    let config = RunConfig::from_env().context("invalid configuration")?;
    tracing::debug!(
        schema_dir = %config.version_dir().display(),
        schema_version = %config.schema_version,
        "resolved configuration"
    );

    let report = run(args, &config).await?;
    print!("{}", render_report(&report));
    Ok(report.is_success())
}
