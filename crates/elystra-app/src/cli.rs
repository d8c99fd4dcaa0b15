use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Elystra — project status site with live team presence.
#[derive(Parser, Debug)]
#[command(name = "elystra", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level override (e.g. `elystra=debug`).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show the team with live presence status.
    About {
        /// Print the cards once and exit instead of watching for changes.
        #[arg(long)]
        once: bool,

        /// Disable coloured status indicators.
        #[arg(long)]
        no_color: bool,
    },
    /// Print the resolved site metadata as JSON.
    Metadata,
    /// Print the "page not found" view.
    NotFound,
}

pub fn parse() -> Args {
    Args::parse()
}
