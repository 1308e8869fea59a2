//! Configuration file handling

use serde::Deserialize;
use std::path::Path;

use super::paths::config_path;
use super::Result;

/// Main configuration structure
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// API host under test
    #[serde(default)]
    pub target: TargetConfig,

    /// Login credentials used for the one-time authentication
    #[serde(default)]
    pub credentials: Credentials,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,
}

/// API host under test
#[derive(Debug, Deserialize, Clone)]
pub struct TargetConfig {
    /// Base URL every request path is joined onto
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    "https://d3s5nxhwblsjbi.cloudfront.net".to_string()
}

/// Login credentials
#[derive(Debug, Deserialize, Clone)]
pub struct Credentials {
    #[serde(default = "default_username")]
    pub username: String,

    #[serde(default = "default_password")]
    pub password: String,
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            username: default_username(),
            password: default_password(),
        }
    }
}

fn default_username() -> String {
    "rradev7904".to_string()
}
fn default_password() -> String {
    "rradev7904".to_string()
}

/// HTTP client settings
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
        }
    }
}

fn default_user_agent() -> String {
    concat!("story-e2e/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Config {
    /// Load configuration from the default config file
    ///
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        match config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from an explicit file, which must exist
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| super::Error::FileRead {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| super::Error::ConfigParse(e.to_string()))
    }

    /// Apply command-line overrides on top of file values
    pub fn with_overrides(
        mut self,
        base_url: Option<String>,
        username: Option<String>,
        password: Option<String>,
    ) -> Self {
        if let Some(base_url) = base_url {
            self.target.base_url = base_url;
        }
        if let Some(username) = username {
            self.credentials.username = username;
        }
        if let Some(password) = password {
            self.credentials.password = password;
        }
        self
    }
}
