//! Configuration management for jxsd.
//!
//! This module provides:
//! - TOML-based configuration with logical sections
//! - Atomic file writes (write to temp, then rename)
//! - Commented default config generation for `jxsd init`
//! - Defaults for every missing field on load
//!
//! # Example
//!
//! ```no_run
//! use jxsd_core::config::ConfigManager;
//!
//! // Load the project config, writing commented defaults if absent
//! let mut config = ConfigManager::new("jxsd.toml");
//! config.load_or_create().unwrap();
//!
//! // Resolve settings into a generation request
//! let base_dir = config.project_dir();
//! let request = config.settings().to_request(&base_dir).unwrap();
//! println!("Sources: {}", request.input_dir.display());
//! ```

mod manager;
mod settings;

pub use manager::{ConfigError, ConfigManager, ConfigResult};
pub use settings::{
    ClasspathSettings, FilterSettings, GeneratorSettings, LoggingSettings, PathSettings, Settings,
};
