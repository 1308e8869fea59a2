//! Ordered scenario runner
//!
//! Runs a suite of Story API scenarios against one authenticated session.
//! Scenarios execute strictly in ascending order because later steps
//! depend on the story id captured by earlier ones.

mod config;
mod context;
mod report;
mod runner;
mod suite;

pub use config::*;
pub use context::FixtureState;
pub use report::{ScenarioOutcome, SuiteReport};
pub use runner::{execute_scenario, run_scenarios, run_suite};
pub use suite::{default_suite, Suite, NON_EXISTING_ID};
