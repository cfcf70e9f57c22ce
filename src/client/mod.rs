//! Authenticated API client
//!
//! A thin wrapper over `reqwest` bound to one base URL and one bearer token,
//! shared by every case in a run. The client is read-only after construction
//! and issues one request per call with no retries; responses keep the raw
//! body text so cases can assert on substrings as well as parsed JSON.

use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Client errors
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Response body is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Query parameter pairs for a single request
pub type Query<'a> = &'a [(&'a str, &'a str)];

/// An API response: status code plus the raw body text
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: String,
}

impl ApiResponse {
    /// Parse the body as JSON
    pub fn json(&self) -> Result<Value, ClientError> {
        Ok(serde_json::from_str(&self.body)?)
    }

    /// The `msg` field of a JSON object body, if present
    pub fn message(&self) -> Option<String> {
        self.json()
            .ok()?
            .get("msg")?
            .as_str()
            .map(|s| s.to_string())
    }

    /// Whether the raw body text contains the given fragment
    pub fn body_contains(&self, fragment: &str) -> bool {
        self.body.contains(fragment)
    }
}

/// HTTP client bound to a base URL, attaching a bearer token to every request
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl ApiClient {
    /// Create a client for the given deployment
    pub fn new(
        base_url: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            token: token.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get(&self, path: &str, query: Query<'_>) -> Result<ApiResponse, ClientError> {
        self.send::<()>(Method::GET, path, query, None).await
    }

    pub async fn post_json<B: Serialize>(
        &self,
        path: &str,
        query: Query<'_>,
        body: &B,
    ) -> Result<ApiResponse, ClientError> {
        self.send(Method::POST, path, query, Some(body)).await
    }

    pub async fn put_json<B: Serialize>(
        &self,
        path: &str,
        query: Query<'_>,
        body: &B,
    ) -> Result<ApiResponse, ClientError> {
        self.send(Method::PUT, path, query, Some(body)).await
    }

    pub async fn delete(&self, path: &str, query: Query<'_>) -> Result<ApiResponse, ClientError> {
        self.send::<()>(Method::DELETE, path, query, None).await
    }

    async fn send<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        query: Query<'_>,
        body: Option<&B>,
    ) -> Result<ApiResponse, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self
            .http
            .request(method, &url)
            .header("Authorization", format!("Bearer {}", self.token));

        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        Ok(ApiResponse { status, body })
    }
}
