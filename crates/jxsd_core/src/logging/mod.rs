//! Logging infrastructure for jxsd.
//!
//! This module provides:
//! - Per-run loggers writing to timestamped files
//! - Tail buffer for error diagnosis
//! - Integration with the `tracing` ecosystem
//!
//! # Example
//!
//! ```no_run
//! use jxsd_core::logging::{LogConfig, RunLogger};
//!
//! let logger = RunLogger::new("generate", ".jxsd-logs", LogConfig::default()).unwrap();
//!
//! logger.phase("Schema generation");
//! logger.command("ant -f schemagen-build.xml");
//! logger.success("4 schema files written");
//! ```

mod run_logger;
mod types;

pub use run_logger::RunLogger;
pub use types::{LogConfig, LogLevel, MessagePrefix};

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize global tracing subscriber for application-wide logging.
///
/// This sets up a subscriber that:
/// - Respects RUST_LOG environment variable
/// - Falls back to the provided default level
/// - Outputs to stderr with timestamps
///
/// Should be called once at application startup.
pub fn init_tracing(default_level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_to_filter_str(default_level)));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(false))
        .with(filter)
        .init();
}

/// Convert LogLevel to filter string.
fn level_to_filter_str(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Trace => "trace",
        LogLevel::Debug => "debug",
        LogLevel::Info => "info",
        LogLevel::Warn => "warn",
        LogLevel::Error => "error",
    }
}
