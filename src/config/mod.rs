//! Configuration module for revuecheck
//!
//! Handles loading and parsing of YAML configuration files with support for
//! environment variable expansion and validation. The original harness kept
//! the target URL and credentials as compile-time constants; here they are
//! externalized so the same binary can point at any Revue deployment.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

mod loader;

pub use loader::ConfigLoader;

/// Validate that a URL starts with http:// or https://
fn is_valid_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub credentials: CredentialsConfig,
}

impl Config {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        ConfigLoader::load(path)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_valid_http_url(&self.api.base_url) {
            return Err(ConfigError::ValidationError(
                "Invalid base_url: must start with http:// or https://".into(),
            ));
        }

        if self.api.timeout_seconds == 0 {
            return Err(ConfigError::ValidationError(
                "timeout_seconds must be greater than zero".into(),
            ));
        }

        self.credentials.validate()
    }
}

/// Target API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Transport timeout per request. Not a retry knob; the suite never
    /// retries a call.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

fn default_base_url() -> String {
    // The deployment the suite was originally written against.
    "https://d2925tksfvgq8c.cloudfront.net".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

/// Credential configuration
///
/// A non-whitespace `static_token` wins; otherwise `email` and `password`
/// are used for a live login at suite start.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CredentialsConfig {
    #[serde(default)]
    pub static_token: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl CredentialsConfig {
    /// The static token, if one is configured and non-whitespace
    pub fn effective_static_token(&self) -> Option<&str> {
        self.static_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.effective_static_token().is_some() {
            return Ok(());
        }
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err(ConfigError::ValidationError(
                "Either credentials.static_token or both credentials.email and \
                 credentials.password must be set"
                    .into(),
            ));
        }
        Ok(())
    }
}
