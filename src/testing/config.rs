//! Scenario definition types
//!
//! Defines the data structures for building suites in code or
//! deserializing them from YAML files.

use serde::Deserialize;

use crate::api::protocol::StoryPayload;

/// Placeholder that refers to the id captured by an earlier create step
pub const CREATED_ID_PLACEHOLDER: &str = "$created";

/// A suite as written in a YAML file, before validation
#[derive(Deserialize, Debug, Clone)]
pub struct SuiteDefinition {
    /// Name of the suite
    pub name: String,
    /// Optional description of what the suite verifies
    pub description: Option<String>,
    /// Scenarios; executed by ascending `order`, not file position
    pub scenarios: Vec<Scenario>,
}

/// A single ordered scenario
#[derive(Deserialize, Debug, Clone)]
pub struct Scenario {
    /// Position in the run; unique within a suite
    pub order: u32,
    /// Name shown in reports
    pub name: String,
    /// The request to issue
    pub step: ScenarioStep,
    /// What the response must look like
    pub expect: Expectation,
}

/// The API operation a scenario performs
#[derive(Deserialize, Debug, Clone)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScenarioStep {
    /// POST a new story
    CreateStory {
        story: StoryPayload,
        /// Store the returned `storyId` for later steps (requires a non-empty id)
        #[serde(default)]
        capture_id: bool,
    },
    /// PUT an existing story
    EditStory {
        target: StoryTarget,
        story: StoryPayload,
    },
    /// GET all stories of the authenticated user
    ListStories {
        /// Fail when the list is empty. Only holds after an earlier create in the same run
        #[serde(default)]
        require_non_empty: bool,
    },
    /// DELETE a story
    DeleteStory { target: StoryTarget },
}

impl ScenarioStep {
    /// Short action label for output
    pub fn action(&self) -> &'static str {
        match self {
            ScenarioStep::CreateStory { .. } => "create",
            ScenarioStep::EditStory { .. } => "edit",
            ScenarioStep::ListStories { .. } => "list",
            ScenarioStep::DeleteStory { .. } => "delete",
        }
    }

    /// Target id this step reads, if any
    pub fn target(&self) -> Option<&StoryTarget> {
        match self {
            ScenarioStep::EditStory { target, .. } | ScenarioStep::DeleteStory { target } => {
                Some(target)
            }
            _ => None,
        }
    }

    /// Whether this step writes the created story id
    pub fn captures_id(&self) -> bool {
        matches!(self, ScenarioStep::CreateStory { capture_id: true, .. })
    }
}

/// Which story id a step addresses
///
/// In YAML, `$created` selects the captured id; any other string is used verbatim.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(from = "String")]
pub enum StoryTarget {
    /// The id captured by the most recent capturing create
    Created,
    /// A fixed id, e.g. `non-existing-id`
    Id(String),
}

impl StoryTarget {
    pub fn id(id: &str) -> Self {
        StoryTarget::Id(id.to_string())
    }
}

impl From<String> for StoryTarget {
    fn from(value: String) -> Self {
        if value == CREATED_ID_PLACEHOLDER {
            StoryTarget::Created
        } else {
            StoryTarget::Id(value)
        }
    }
}

/// Expectations for a response
#[derive(Deserialize, Debug, Clone)]
pub struct Expectation {
    /// Expected HTTP status code
    pub status: u16,
    /// Substrings that must all appear in the raw body
    #[serde(default)]
    pub contains: Vec<String>,
}

impl Expectation {
    pub fn status(status: u16) -> Self {
        Self {
            status,
            contains: Vec::new(),
        }
    }

    pub fn containing(mut self, fragment: &str) -> Self {
        self.contains.push(fragment.to_string());
        self
    }
}
