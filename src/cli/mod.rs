//! CLI command handling
//!
//! Loads configuration, dispatches commands and formats output.

use std::path::{Path, PathBuf};

use colored::Colorize;

use crate::api::HttpTransport;
use crate::commands::Commands;
use crate::common::config::Config;
use crate::common::{mask_secret, paths, Error, Result};
use crate::testing::{default_suite, run_suite, ScenarioStep, StoryTarget, Suite};

/// Dispatch a CLI command
pub async fn dispatch(command: Commands, config_file: Option<PathBuf>, verbose: bool) -> Result<()> {
    let config = load_config(config_file.as_deref())?;

    match command {
        Commands::Run {
            base_url,
            username,
            password,
            suite,
            report,
        } => {
            let config = config.with_overrides(base_url, username, password);
            let suite = load_suite(suite.as_deref())?;
            let transport = HttpTransport::new(&config)?;

            let result = run_suite(transport, &config.credentials, &suite, verbose).await;

            if let Some(path) = report {
                result.write_json(&path)?;
                println!("Report written to {}", path.display());
            }

            if result.all_passed() {
                Ok(())
            } else {
                Err(Error::TestAssertion(format!(
                    "{} of {} scenarios failed",
                    result.failed_count(),
                    result.outcomes.len()
                )))
            }
        }

        Commands::Scenarios { suite } => {
            let suite = load_suite(suite.as_deref())?;
            println!("{}", suite.name.bold());
            for scenario in suite.scenarios() {
                println!(
                    "  {:>3}  {:<7} {}{}",
                    scenario.order,
                    scenario.step.action(),
                    scenario.name,
                    describe_target(&scenario.step).dimmed()
                );
            }
            Ok(())
        }

        Commands::Config => {
            match config_file.or_else(paths::config_path) {
                Some(path) if path.exists() => println!("Config file: {}", path.display()),
                Some(path) => println!("Config file: {} (not present, using defaults)", path.display()),
                None => println!("Config file: (no config directory on this platform)"),
            }
            println!("  base_url   = {}", config.target.base_url);
            println!("  username   = {}", config.credentials.username);
            println!("  password   = {}", mask_secret(&config.credentials.password));
            println!("  user_agent = {}", config.http.user_agent);
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

fn load_suite(path: Option<&Path>) -> Result<Suite> {
    match path {
        Some(path) => Suite::from_yaml_file(path),
        None => Ok(default_suite()),
    }
}

fn describe_target(step: &ScenarioStep) -> String {
    match step.target() {
        Some(StoryTarget::Created) => " (created story)".to_string(),
        Some(StoryTarget::Id(id)) => format!(" ({})", id),
        None if step.captures_id() => " (captures id)".to_string(),
        None => String::new(),
    }
}
