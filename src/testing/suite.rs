//! Validated, ordered scenario suites

use std::collections::HashSet;
use std::path::Path;

use crate::api::protocol::StoryPayload;
use crate::common::{Error, Result};

use super::config::{Expectation, Scenario, ScenarioStep, StoryTarget, SuiteDefinition};

/// Id that the API is known not to hold
pub const NON_EXISTING_ID: &str = "non-existing-id";

/// Only a successful create returns a story id
const CREATED_STATUS: u16 = 201;

/// A suite whose scenarios are sorted by order and checked for consistency
#[derive(Debug, Clone)]
pub struct Suite {
    pub name: String,
    pub description: Option<String>,
    scenarios: Vec<Scenario>,
}

impl Suite {
    /// Validate a definition and sort its scenarios by ascending order
    ///
    /// Rejects empty suites, duplicate order numbers, capturing creates that
    /// do not expect a 201 for a complete story, and steps that read the
    /// created id before any capturing create.
    pub fn from_definition(definition: SuiteDefinition) -> Result<Self> {
        let SuiteDefinition {
            name,
            description,
            mut scenarios,
        } = definition;

        if scenarios.is_empty() {
            return Err(Error::invalid_suite(&name, "suite has no scenarios"));
        }

        let mut seen = HashSet::new();
        for scenario in &scenarios {
            if !seen.insert(scenario.order) {
                return Err(Error::invalid_suite(
                    &name,
                    format!("order {} is used more than once", scenario.order),
                ));
            }
        }

        scenarios.sort_by_key(|s| s.order);

        for scenario in &scenarios {
            if let ScenarioStep::CreateStory {
                story,
                capture_id: true,
            } = &scenario.step
            {
                if scenario.expect.status != CREATED_STATUS || !story.is_complete() {
                    return Err(Error::invalid_suite(
                        &name,
                        format!(
                            "scenario '{}' captures a story id but does not expect a {} for a complete story",
                            scenario.name, CREATED_STATUS
                        ),
                    ));
                }
            }
        }

        let mut captured = false;
        for scenario in &scenarios {
            if scenario.step.target() == Some(&StoryTarget::Created) && !captured {
                return Err(Error::invalid_suite(
                    &name,
                    format!(
                        "scenario '{}' uses the created story id before any create_story step captures it",
                        scenario.name
                    ),
                ));
            }
            captured |= scenario.step.captures_id();
        }

        Ok(Self {
            name,
            description,
            scenarios,
        })
    }

    /// Load a suite from a YAML file
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let definition: SuiteDefinition = serde_yaml::from_str(content)
            .map_err(|e| Error::SuiteParse(e.to_string()))?;
        Self::from_definition(definition)
    }

    /// Scenarios in execution order
    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }
}

/// The built-in Story API contract suite
///
/// Create, edit, list and delete one story, then check the error paths.
/// The list check relies on the create at order 1 having run.
pub fn default_suite() -> Suite {
    let scenarios = vec![
        Scenario {
            order: 1,
            name: "create story returns created".into(),
            step: ScenarioStep::CreateStory {
                story: StoryPayload::new("Test Story", "This is a test story.", ""),
                capture_id: true,
            },
            expect: Expectation::status(201).containing("Successfully created!"),
        },
        Scenario {
            order: 2,
            name: "edit story title and description returns ok".into(),
            step: ScenarioStep::EditStory {
                target: StoryTarget::Created,
                story: StoryPayload::new("Updated Test Story", "This is an updated test story.", ""),
            },
            expect: Expectation::status(200).containing("Successfully edited"),
        },
        Scenario {
            order: 3,
            name: "get all stories returns a list".into(),
            step: ScenarioStep::ListStories {
                require_non_empty: true,
            },
            expect: Expectation::status(200),
        },
        Scenario {
            order: 4,
            name: "delete story returns ok".into(),
            step: ScenarioStep::DeleteStory {
                target: StoryTarget::Created,
            },
            expect: Expectation::status(200).containing("Deleted successfully!"),
        },
        Scenario {
            order: 5,
            name: "create story without required fields returns bad request".into(),
            step: ScenarioStep::CreateStory {
                story: StoryPayload::new("", "", ""),
                capture_id: false,
            },
            expect: Expectation::status(400),
        },
        Scenario {
            order: 6,
            name: "edit non-existing story returns not found".into(),
            step: ScenarioStep::EditStory {
                target: StoryTarget::id(NON_EXISTING_ID),
                story: StoryPayload::new("Non-existing Story", "This story does not exist.", ""),
            },
            expect: Expectation::status(404).containing("No spoilers..."),
        },
        Scenario {
            order: 7,
            name: "delete non-existing story returns bad request".into(),
            step: ScenarioStep::DeleteStory {
                target: StoryTarget::id(NON_EXISTING_ID),
            },
            expect: Expectation::status(400).containing("Unable to delete this story spoiler!"),
        },
    ];

    Suite {
        name: "story spoiler api".into(),
        description: Some("CRUD and error-path contract of the Story API".into()),
        scenarios,
    }
}
