//! Run results

use serde::Serialize;
use std::path::Path;

use crate::common::paths::ensure_parent_dir;
use crate::common::Result;

/// Result of one scenario
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioOutcome {
    pub order: u32,
    pub name: String,
    pub passed: bool,
    /// Status observed, if a response arrived at all
    pub status: Option<u16>,
    pub error: Option<String>,
}

/// Result of a whole suite run
#[derive(Debug, Clone, Serialize)]
pub struct SuiteReport {
    pub suite: String,
    pub base_url: String,
    /// Whether login produced a token
    pub authenticated: bool,
    pub outcomes: Vec<ScenarioOutcome>,
}

impl SuiteReport {
    pub fn passed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed).count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.len() - self.passed_count()
    }

    pub fn all_passed(&self) -> bool {
        self.outcomes.iter().all(|o| o.passed)
    }

    /// Outcome of the scenario with the given name
    pub fn outcome(&self, name: &str) -> Option<&ScenarioOutcome> {
        self.outcomes.iter().find(|o| o.name == name)
    }

    /// Write the report as pretty JSON
    pub fn write_json(&self, path: &Path) -> Result<()> {
        ensure_parent_dir(path)?;
        std::fs::write(path, serde_json::to_vec_pretty(self)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(order: u32, passed: bool) -> ScenarioOutcome {
        ScenarioOutcome {
            order,
            name: format!("s{}", order),
            passed,
            status: Some(200),
            error: (!passed).then(|| "boom".to_string()),
        }
    }

    #[test]
    fn test_counts() {
        let report = SuiteReport {
            suite: "t".into(),
            base_url: "http://localhost".into(),
            authenticated: true,
            outcomes: vec![outcome(1, true), outcome(2, false), outcome(3, true)],
        };
        assert_eq!(report.passed_count(), 2);
        assert_eq!(report.failed_count(), 1);
        assert!(!report.all_passed());
        assert_eq!(report.outcome("s2").unwrap().error.as_deref(), Some("boom"));
    }

    #[test]
    fn test_write_json() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("out").join("report.json");
        let report = SuiteReport {
            suite: "t".into(),
            base_url: "http://localhost".into(),
            authenticated: false,
            outcomes: vec![outcome(1, true)],
        };
        report.write_json(&path).unwrap();

        let value: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(value["outcomes"][0]["status"], 200);
        assert_eq!(value["authenticated"], false);
    }
}
