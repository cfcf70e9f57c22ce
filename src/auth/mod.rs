//! Credential acquisition
//!
//! Every call the suite makes carries a bearer token. The token comes from
//! one of two providers: a statically configured value, or a live login
//! against the API's authentication endpoint. Acquisition happens exactly
//! once per run, before any case executes; failure aborts the whole suite.

use crate::config::Config;
use crate::revue;
use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;

/// Credential acquisition errors. All of them are fatal to the run.
#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("Authentication failed with status {status}: {body}")]
    Login { status: StatusCode, body: String },

    #[error("Could not retrieve token: response had no usable accessToken field")]
    MissingToken,

    #[error("Authentication request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// A source of bearer tokens
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Produce a non-empty bearer token
    async fn bearer_token(&self) -> Result<String, CredentialError>;
}

/// Provider backed by a preconfigured token. Never touches the network.
pub struct StaticToken {
    token: String,
}

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl CredentialProvider for StaticToken {
    async fn bearer_token(&self) -> Result<String, CredentialError> {
        Ok(self.token.clone())
    }
}

/// Provider that logs in with email/password and extracts the issued token
pub struct PasswordLogin {
    http: reqwest::Client,
    base_url: String,
    email: String,
    password: String,
}

impl PasswordLogin {
    pub fn new(
        base_url: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, CredentialError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            email: email.into(),
            password: password.into(),
        })
    }
}

#[async_trait]
impl CredentialProvider for PasswordLogin {
    async fn bearer_token(&self) -> Result<String, CredentialError> {
        let url = format!("{}{}", self.base_url, revue::AUTH_PATH);
        let request = revue::LoginRequest {
            email: self.email.clone(),
            password: self.password.clone(),
        };

        let response = self.http.post(&url).json(&request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status != StatusCode::OK {
            return Err(CredentialError::Login { status, body });
        }

        let value: serde_json::Value =
            serde_json::from_str(&body).map_err(|_| CredentialError::MissingToken)?;
        match value.get("accessToken").and_then(|t| t.as_str()) {
            Some(token) if !token.trim().is_empty() => Ok(token.to_string()),
            _ => Err(CredentialError::MissingToken),
        }
    }
}

/// Choose a provider from configuration: a non-whitespace static token wins,
/// otherwise fall back to a live login.
pub fn provider_for(config: &Config) -> Result<Box<dyn CredentialProvider>, CredentialError> {
    match config.credentials.effective_static_token() {
        Some(token) => Ok(Box::new(StaticToken::new(token))),
        None => Ok(Box::new(PasswordLogin::new(
            config.api.base_url.clone(),
            config.credentials.email.clone(),
            config.credentials.password.clone(),
            Duration::from_secs(config.api.timeout_seconds),
        )?)),
    }
}
