//! Storefront CLI configuration

use std::{path::PathBuf, time::Duration};

use clap::{Args, Parser};

use crate::commands::Commands;

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub(crate) struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "warn", global = true)]
    pub(crate) log_level: String,

    /// Log format (compact, json)
    #[arg(
        long,
        env = "LOG_FORMAT",
        value_enum,
        default_value_t = LogFormat::Compact,
        global = true
    )]
    pub(crate) log_format: LogFormat,
}

/// Store and payment settings.
#[derive(Debug, Args)]
pub(crate) struct StoreConfig {
    /// Directory holding the order and failure records
    #[arg(
        long,
        env = "STOREFRONT_STORE_DIR",
        default_value = ".storefront",
        global = true
    )]
    pub(crate) store_dir: PathBuf,

    /// Simulated payment latency in milliseconds
    #[arg(
        long,
        env = "STOREFRONT_PAYMENT_LATENCY_MS",
        default_value_t = 3_000_u64,
        global = true
    )]
    pub(crate) payment_latency_ms: u64,
}

impl StoreConfig {
    /// Simulated payment latency.
    pub(crate) fn payment_latency(&self) -> Duration {
        Duration::from_millis(self.payment_latency_ms)
    }
}

/// Storefront terminal front-end
#[derive(Debug, Parser)]
#[command(name = "storefront", about = "SportMax storefront", long_about = None)]
pub(crate) struct Cli {
    /// Store and payment settings.
    #[command(flatten)]
    pub(crate) store: StoreConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub(crate) logging: LoggingConfig,

    /// Page to open.
    #[command(subcommand)]
    pub(crate) command: Commands,
}

impl Cli {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub(crate) fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}
