//! Story API end-to-end suite
//!
//! Authenticates against the Story Spoiler API and runs an ordered
//! create/edit/list/delete contract suite.

use clap::Parser;
use commands::Commands;
use std::path::PathBuf;
use story_e2e::{cli, commands, common::logging};

#[derive(Parser)]
#[command(name = "story-e2e", about = "End-to-end contract suite for the Story API")]
#[command(version, long_about = None)]
struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Show response statuses and debug logs
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    logging::init_cli(cli.verbose);

    if let Err(e) = cli::dispatch(cli.command, cli.config, cli.verbose).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
