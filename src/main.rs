//! Revuecheck - End-to-end test harness for the Revue API
//!
//! Authenticates once, runs the seven-case CRUD suite against the configured
//! deployment, prints the report, and exits non-zero if any case failed.

use clap::Parser;
use revuecheck::auth::{self, CredentialProvider as _};
use revuecheck::{client::ApiClient, config::Config, suite::Suite};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

/// Revuecheck - CRUD test suite for the Revue content-publishing API
#[derive(Parser, Debug)]
#[command(name = "revuecheck")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "revuecheck.yaml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting revuecheck v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = Config::load(&args.config)?;
    info!("Loaded configuration from {:?}", args.config);

    // Resolve the bearer token once; any failure here aborts the run before
    // a single case executes.
    let provider = auth::provider_for(&config)?;
    let token = match provider.bearer_token().await {
        Ok(token) => token,
        Err(e) => {
            error!("Credential acquisition failed: {e}");
            return Err(e.into());
        }
    };
    info!(base_url = %config.api.base_url, "Authenticated, running suite");

    let client = ApiClient::new(
        config.api.base_url.clone(),
        token,
        Duration::from_secs(config.api.timeout_seconds),
    )?;

    let report = Suite::new(client).run().await;
    println!("{report}");

    if !report.is_success() {
        std::process::exit(1);
    }

    Ok(())
}
