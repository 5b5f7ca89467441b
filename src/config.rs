//! Storefront configuration

use std::time::Duration;

use clap::{Args, Parser};

use crate::remote::{CatalogClientConfig, RetryPolicy};

/// Log output format.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Catalog backend settings.
#[derive(Debug, Args)]
pub struct ApiConfig {
    /// Catalog backend base URL
    #[arg(long = "api-url", env = "SHOWROOM_API_URL", default_value = "http://localhost:3000")]
    pub url: String,

    /// Per-request timeout in seconds
    #[arg(long = "api-timeout-seconds", env = "SHOWROOM_API_TIMEOUT_SECONDS", default_value_t = 10u64)]
    pub timeout_seconds: u64,

    /// Total request attempts before giving up
    #[arg(long = "api-retry-attempts", env = "SHOWROOM_API_RETRY_ATTEMPTS", default_value_t = 3u32)]
    pub retry_attempts: u32,

    /// Base backoff between attempts in milliseconds
    #[arg(long = "api-retry-backoff-ms", env = "SHOWROOM_API_RETRY_BACKOFF_MS", default_value_t = 500u64)]
    pub retry_backoff_ms: u64,
}

impl ApiConfig {
    /// Builds the catalog client configuration these settings describe.
    #[must_use]
    pub fn client_config(&self) -> CatalogClientConfig {
        CatalogClientConfig {
            base_url: self.url.clone(),
            timeout: Duration::from_secs(self.timeout_seconds),
            retry: RetryPolicy {
                attempts: self.retry_attempts,
                backoff: Duration::from_millis(self.retry_backoff_ms),
            },
        }
    }
}

/// Showroom storefront configuration
#[derive(Debug, Parser)]
#[command(name = "showroom", about = "Vehicle storefront engine", long_about = None)]
pub struct StorefrontConfig {
    /// Catalog backend settings.
    #[command(flatten)]
    pub api: ApiConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}

impl StorefrontConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}
