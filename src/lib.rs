//! Story API end-to-end suite
//!
//! This library authenticates against the Story Spoiler API and runs an
//! ordered scenario suite over its CRUD endpoints.

pub mod api;
pub mod cli;
pub mod commands;
pub mod common;
pub mod testing;

// Re-export commonly used types for tests
pub use api::protocol::{ApiRequest, ApiResponse, Method, StoryPayload};
pub use api::{HttpTransport, Session, Transport};
pub use common::{Error, Result};
