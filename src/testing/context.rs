//! State threaded between scenarios of one run

use tracing::debug;

use crate::common::{Error, Result};

use super::config::StoryTarget;

/// Shared fixture state for one ordered run
///
/// Written by a capturing create step, read by later edit/delete steps.
/// Passed by `&mut` through the runner, so a fresh value means a fresh run.
#[derive(Debug, Default)]
pub struct FixtureState {
    created_story_id: Option<String>,
}

impl FixtureState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the id returned by a create, replacing any earlier one
    pub fn record_created(&mut self, id: String) {
        debug!(story_id = %id, "captured story id");
        self.created_story_id = Some(id);
    }

    pub fn created_story_id(&self) -> Option<&str> {
        self.created_story_id.as_deref()
    }

    /// Resolve a step target to a concrete id
    pub fn resolve(&self, target: &StoryTarget) -> Result<String> {
        match target {
            StoryTarget::Created => self
                .created_story_id
                .clone()
                .ok_or(Error::MissingStoryId),
            StoryTarget::Id(id) => Ok(id.clone()),
        }
    }
}
