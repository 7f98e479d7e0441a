//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::estimate::EstimateArgs;

/// AI-assisted project cost estimator.
///
/// Prices a project description against a configurable rate card and
/// produces a client-ready quote, optionally cross-checked by Claude.
#[derive(Debug, Parser)]
#[command(name = "pe", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Price a project description and produce a quote.
    Estimate(EstimateArgs),

    /// Show the rate card estimates are priced from.
    Rates {
        /// Print as JSON instead of the human-readable card.
        #[arg(long)]
        json: bool,
    },
}
