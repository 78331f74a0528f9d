//! commentscout command-line shell.
//!
//! Parses flags, resolves configuration and credentials, runs the harvest
//! pipeline from `scout-harvest`, and reports the result on stdout.

pub mod args;
pub mod prompt;

use anyhow::{Context, Result};
use args::Cli;
use scout_core::{ConfigError, ScoutConfig, ScoutError};
use scout_harvest::{CommentScout, RunOutcome, RunReport};
use std::process::ExitCode;
use tracing::info;

/// Initialize tracing subscriber for logging
pub fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let default = if verbose { "debug" } else { "info,scout=debug" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .init();
}

/// Resolve the configuration for a run: file, then environment, then flags.
pub fn load_config(cli: &Cli) -> Result<ScoutConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let mut config = ScoutConfig::load_from(path)
                .with_context(|| format!("load config from {}", path.display()))?;
            config.apply_env_overrides(|key| std::env::var(key).ok());
            config
        }
        None => match ScoutConfig::load_with_env() {
            Ok(config) => config,
            Err(ConfigError::NoConfigDir) => {
                tracing::warn!("No config directory on this platform, using defaults");
                let mut config = ScoutConfig::default();
                config.apply_env_overrides(|key| std::env::var(key).ok());
                config
            }
            Err(e) => return Err(e).context("load config"),
        },
    };

    cli.apply_to(&mut config);
    Ok(config)
}

/// Run the tool end to end.
pub async fn run(cli: Cli) -> Result<ExitCode> {
    info!("Starting commentscout v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&cli)?;
    let credentials = prompt::resolve_credentials(
        cli.email.clone(),
        cli.password.clone(),
        prompt::ask_email,
        prompt::ask_password,
    )?;

    let scout = CommentScout::new(config);
    let outcome = scout
        .run(&cli.url, &credentials)
        .await
        .map_err(ScoutError::from)?;

    Ok(report(&outcome))
}

/// Print the outcome and pick the exit status.
fn report(outcome: &RunOutcome) -> ExitCode {
    if let RunOutcome::Completed(report) = outcome {
        print_completed(report);
    }

    match outcome.failure() {
        None => ExitCode::SUCCESS,
        Some(error) => {
            if matches!(error, ScoutError::Authentication(_)) {
                eprintln!("Failed to login to LinkedIn. Please check your credentials.");
            }
            eprintln!("Error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn print_completed(report: &RunReport) {
    if report.emails.is_empty() {
        println!("No emails found in the comments.");
    } else {
        println!("\nFound {} unique email(s):", report.emails.len());
        for email in report.emails.iter() {
            println!("  - {email}");
        }
    }

    if !report.expansion.converged() {
        println!(
            "Note: comment loading stopped early ({}); results may be partial.",
            report.expansion.stop_reason
        );
    }

    if report.sink_error.is_none() {
        println!(
            "Saved {} email(s) to {}",
            report.emails.len(),
            report.output.display()
        );
    }
}
