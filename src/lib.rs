//! Revuecheck Library
//!
//! End-to-end test harness for the Revue content-publishing API. It logs in
//! once (or uses a preconfigured token), then drives a fixed ordered
//! sequence of create/list/edit/delete calls and checks each response
//! against the API's documented contract.
//!
//! # Example
//!
//! ```no_run
//! use revuecheck::auth::{self, CredentialProvider as _};
//! use revuecheck::{client::ApiClient, config::Config, suite::Suite};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("revuecheck.yaml")?;
//!     let token = auth::provider_for(&config)?.bearer_token().await?;
//!     let client = ApiClient::new(
//!         config.api.base_url.clone(),
//!         token,
//!         Duration::from_secs(config.api.timeout_seconds),
//!     )?;
//!     let report = Suite::new(client).run().await;
//!     println!("{report}");
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod revue;
pub mod suite;

// Re-export commonly used types
pub use client::ApiClient;
pub use config::Config;
pub use suite::{Suite, SuiteReport};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
