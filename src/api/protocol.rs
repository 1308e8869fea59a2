//! Story API wire types
//!
//! Request bodies are serialized exactly as the API expects them; response
//! bodies are parsed leniently since error responses omit most fields.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::common::Result;

/// Login endpoint
pub const LOGIN_PATH: &str = "/api/User/Authentication";
/// Story creation endpoint
pub const CREATE_PATH: &str = "/api/Story/Create";
/// Listing endpoint for the authenticated user's stories
pub const LIST_PATH: &str = "/api/Story/All";

/// Edit endpoint for a story id
pub fn edit_path(id: &str) -> String {
    format!("/api/Story/Edit/{}", id)
}

/// Delete endpoint for a story id
pub fn delete_path(id: &str) -> String {
    format!("/api/Story/Delete/{}", id)
}

/// HTTP methods used by the Story API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// A request relative to the API base URL
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    /// Path starting with `/`
    pub path: String,
    /// JSON body, if any
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
        }
    }

    /// Attach a JSON body
    pub fn json<B: Serialize>(mut self, body: &B) -> Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }
}

/// Status and raw body of an API response
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Parse the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_str(&self.body)?)
    }

    /// Whether the raw body contains `fragment`
    pub fn contains(&self, fragment: &str) -> bool {
        self.body.contains(fragment)
    }

    /// Body shortened for error messages
    pub fn excerpt(&self) -> String {
        const LIMIT: usize = 200;
        match self.body.char_indices().nth(LIMIT) {
            Some((idx, _)) => format!("{}...", &self.body[..idx]),
            None => self.body.clone(),
        }
    }
}

/// Login request body
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Login response body
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    #[serde(rename = "accessToken")]
    pub access_token: Option<String>,
}

/// Story body for create and edit requests
///
/// Serialized as exactly `{title, description, url}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryPayload {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub url: String,
}

impl StoryPayload {
    pub fn new(title: &str, description: &str, url: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            url: url.to_string(),
        }
    }

    /// Whether the API should accept this story (title and description present)
    pub fn is_complete(&self) -> bool {
        !self.title.is_empty() && !self.description.is_empty()
    }
}

/// Generic message response from story endpoints
///
/// The live API sends `storyId`; older DTOs name it `storyid`. Both are accepted.
#[derive(Debug, Default, Deserialize)]
pub struct MessageResponse {
    pub msg: Option<String>,
    #[serde(rename = "storyId", alias = "storyid")]
    pub story_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_story_payload_wire_shape() {
        let story = StoryPayload::new("Test Story", "This is a test story.", "");
        let value = serde_json::to_value(&story).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "title": "Test Story",
                "description": "This is a test story.",
                "url": ""
            })
        );
        assert!(story.is_complete());
        assert!(!StoryPayload::new("", "", "").is_complete());
    }

    #[test]
    fn test_message_response_accepts_both_casings() {
        let camel: MessageResponse =
            serde_json::from_str(r#"{"msg":"Successfully created!","storyId":"abc"}"#).unwrap();
        assert_eq!(camel.story_id.as_deref(), Some("abc"));

        let lower: MessageResponse = serde_json::from_str(r#"{"storyid":"def"}"#).unwrap();
        assert_eq!(lower.story_id.as_deref(), Some("def"));
        assert!(lower.msg.is_none());
    }

    #[test]
    fn test_message_response_tolerates_missing_fields() {
        let resp: MessageResponse = serde_json::from_str(r#"{"msg":"No spoilers..."}"#).unwrap();
        assert_eq!(resp.msg.as_deref(), Some("No spoilers..."));
        assert!(resp.story_id.is_none());

        let null_id: MessageResponse = serde_json::from_str(r#"{"storyId":null}"#).unwrap();
        assert!(null_id.story_id.is_none());
    }

    #[test]
    fn test_login_response_without_token() {
        let resp: LoginResponse = serde_json::from_str(r#"{"error":"bad credentials"}"#).unwrap();
        assert!(resp.access_token.is_none());
    }

    #[test]
    fn test_paths() {
        assert_eq!(edit_path("non-existing-id"), "/api/Story/Edit/non-existing-id");
        assert_eq!(delete_path("42"), "/api/Story/Delete/42");
    }

    #[test]
    fn test_excerpt_truncates_long_bodies() {
        let resp = ApiResponse::new(500, "x".repeat(500));
        assert_eq!(resp.excerpt().len(), 203);
        assert_eq!(ApiResponse::new(200, "short").excerpt(), "short");
    }

    #[test]
    fn test_request_json_body() {
        let req = ApiRequest::new(Method::Post, LOGIN_PATH)
            .json(&LoginRequest {
                username: "u",
                password: "p",
            })
            .unwrap();
        assert_eq!(req.method, Method::Post);
        assert_eq!(
            req.body,
            Some(serde_json::json!({"username": "u", "password": "p"}))
        );
    }
}
