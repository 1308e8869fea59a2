//! CLI command definitions
//!
//! Defines the clap commands for the suite runner.

use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// Authenticate and run a suite against the Story API
    Run {
        /// Base URL of the API (overrides config)
        #[arg(long)]
        base_url: Option<String>,

        /// Login username (overrides config)
        #[arg(long, short)]
        username: Option<String>,

        /// Login password (overrides config)
        #[arg(long, short)]
        password: Option<String>,

        /// YAML suite to run instead of the built-in one
        #[arg(long)]
        suite: Option<PathBuf>,

        /// Write a JSON report of the run to this file
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// List the scenarios of a suite in execution order
    Scenarios {
        /// YAML suite to list instead of the built-in one
        #[arg(long)]
        suite: Option<PathBuf>,
    },

    /// Show the config file location and effective settings
    Config,
}
