//! Error types for the Story API suite
//!
//! Scenario failures are ordinary values of this type: the runner records
//! them per scenario instead of aborting the run.

use std::io;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the suite
#[derive(Error, Debug)]
pub enum Error {
    // === Transport Errors ===
    #[error("Request {method} {path} failed: {message}")]
    Transport {
        method: String,
        path: String,
        message: String,
    },

    #[error("Invalid base URL '{url}': {message}")]
    InvalidBaseUrl { url: String, message: String },

    // === Fixture Errors ===
    #[error("No story id captured by an earlier scenario. Run a create_story step with capture_id first")]
    MissingStoryId,

    // === Suite Errors ===
    #[error("Invalid suite '{name}': {reason}")]
    InvalidSuite { name: String, reason: String },

    #[error("Failed to parse suite: {0}")]
    SuiteParse(String),

    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Test Errors ===
    #[error("Test assertion failed: {0}")]
    TestAssertion(String),
}

impl Error {
    /// Create a transport error for a request that never produced a response
    pub fn transport(method: &str, path: &str, message: impl ToString) -> Self {
        Self::Transport {
            method: method.to_string(),
            path: path.to_string(),
            message: message.to_string(),
        }
    }

    /// Create an invalid suite error
    pub fn invalid_suite(name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidSuite {
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    /// Whether this error is an assertion mismatch rather than an
    /// uncontrolled failure (transport, parsing, missing state)
    pub fn is_assertion(&self) -> bool {
        matches!(self, Self::TestAssertion(_))
    }
}
