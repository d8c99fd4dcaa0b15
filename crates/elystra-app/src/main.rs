//! elystra: terminal front end for the Elystra site.
//!
//! Shows the team with live presence status, and prints the site metadata
//! and 404 page.

mod about;
mod cli;

use std::io::IsTerminal;
use std::process::ExitCode;

use elystra_common::ElystraError;
use elystra_config::{NotFoundPage, SiteMetadata};
use tracing_subscriber::EnvFilter;

use crate::about::ViewOutcome;
use crate::cli::{Args, Command};

#[tokio::main]
async fn main() -> ExitCode {
    let args = cli::parse();
    init_logging(args.log_level.as_deref());

    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "elystra failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so stdout only carries the view.
fn init_logging(log_level: Option<&str>) {
    let filter = match log_level {
        Some(directive) => EnvFilter::new(directive),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("elystra=info")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(args: &Args) -> Result<(), ElystraError> {
    match &args.command {
        Command::About { once, no_color } => {
            let color = !no_color && std::io::stdout().is_terminal();
            loop {
                // A reload starts over from the config file.
                let config = elystra_config::load_config(args.config.as_deref())?;
                match about::run(&config, *once, color).await? {
                    ViewOutcome::Reload => tracing::info!("Reloading about view"),
                    ViewOutcome::Done => return Ok(()),
                }
            }
        }
        Command::Metadata => {
            let config = elystra_config::load_config(args.config.as_deref())?;
            let metadata = SiteMetadata::resolve(&config.site)?;
            let json = serde_json::to_string_pretty(&metadata)
                .map_err(|e| ElystraError::Other(format!("failed to serialize metadata: {e}")))?;
            println!("{json}");
            Ok(())
        }
        Command::NotFound => {
            println!("{}", NotFoundPage::default());
            Ok(())
        }
    }
}
