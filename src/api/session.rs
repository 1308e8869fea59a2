//! Authenticated session against the Story API

use tracing::debug;

use crate::common::config::Credentials;
use crate::common::Result;

use super::auth::authenticate;
use super::protocol::{
    delete_path, edit_path, ApiRequest, ApiResponse, Method, StoryPayload, CREATE_PATH, LIST_PATH,
};
use super::transport::Transport;

/// Transport plus the bearer token obtained at login
///
/// Immutable once opened; every story request carries the token.
pub struct Session<T: Transport> {
    transport: T,
    token: String,
}

impl<T: Transport> Session<T> {
    /// Authenticate once and bind the resulting token to the transport
    pub async fn open(transport: T, credentials: &Credentials) -> Self {
        let token = authenticate(&transport, credentials).await;
        Self { transport, token }
    }

    /// Create a session with a known token, skipping login
    pub fn with_token(transport: T, token: impl Into<String>) -> Self {
        Self {
            transport,
            token: token.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Whether login produced a non-empty token
    pub fn is_authenticated(&self) -> bool {
        !self.token.is_empty()
    }

    /// POST /api/Story/Create
    pub async fn create_story(&self, story: &StoryPayload) -> Result<ApiResponse> {
        self.send(ApiRequest::new(Method::Post, CREATE_PATH).json(story)?)
            .await
    }

    /// PUT /api/Story/Edit/{id}
    pub async fn edit_story(&self, id: &str, story: &StoryPayload) -> Result<ApiResponse> {
        self.send(ApiRequest::new(Method::Put, edit_path(id)).json(story)?)
            .await
    }

    /// GET /api/Story/All
    pub async fn list_stories(&self) -> Result<ApiResponse> {
        self.send(ApiRequest::new(Method::Get, LIST_PATH)).await
    }

    /// DELETE /api/Story/Delete/{id}
    pub async fn delete_story(&self, id: &str) -> Result<ApiResponse> {
        self.send(ApiRequest::new(Method::Delete, delete_path(id)))
            .await
    }

    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        self.transport.execute(&request, Some(&self.token)).await
    }

    /// Release the session and hand back the transport
    pub fn close(self) -> T {
        debug!(base_url = %self.transport.base_url(), "closing session");
        self.transport
    }
}
