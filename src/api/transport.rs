//! HTTP transport for the Story API
//!
//! The [`Transport`] trait is the seam between scenarios and the network:
//! the CLI uses [`HttpTransport`], tests substitute an in-memory API.

use async_trait::async_trait;

use crate::common::config::Config;
use crate::common::{Error, Result};

use super::protocol::{ApiRequest, ApiResponse};

/// Sends one request and returns the status and body, whatever the status
#[async_trait]
pub trait Transport: Send + Sync {
    /// Base URL requests are resolved against
    fn base_url(&self) -> &str;

    /// Execute a request, attaching `Authorization: Bearer <token>` when given
    ///
    /// Non-2xx statuses are returned as responses; only failures to obtain
    /// a response at all are errors.
    async fn execute(&self, request: &ApiRequest, bearer: Option<&str>) -> Result<ApiResponse>;
}

/// reqwest-backed transport
pub struct HttpTransport {
    base_url: String,
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build a client for the configured target
    pub fn new(config: &Config) -> Result<Self> {
        let base_url = config.target.base_url.trim_end_matches('/').to_string();
        reqwest::Url::parse(&base_url).map_err(|e| Error::InvalidBaseUrl {
            url: config.target.base_url.clone(),
            message: e.to_string(),
        })?;

        let client = reqwest::Client::builder()
            .user_agent(config.http.user_agent.clone())
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { base_url, client })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn execute(&self, request: &ApiRequest, bearer: Option<&str>) -> Result<ApiResponse> {
        let url = self.url(&request.path);
        let mut builder = self.client.request(request.method.into(), &url);
        if let Some(token) = bearer {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        tracing::debug!(method = %request.method, %url, "sending request");

        let response = builder
            .send()
            .await
            .map_err(|e| Error::transport(request.method.as_str(), &request.path, e))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| Error::transport(request.method.as_str(), &request.path, e))?;

        tracing::debug!(status, bytes = body.len(), "received response");

        Ok(ApiResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let config = Config::default().with_overrides(Some("http://localhost:5000/".into()), None, None);
        let transport = HttpTransport::new(&config).unwrap();
        assert_eq!(transport.base_url(), "http://localhost:5000");
        assert_eq!(
            transport.url("/api/Story/All"),
            "http://localhost:5000/api/Story/All"
        );
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let config = Config::default().with_overrides(Some("not a url".into()), None, None);
        let err = HttpTransport::new(&config).err().unwrap();
        assert!(matches!(err, Error::InvalidBaseUrl { .. }));
    }
}
