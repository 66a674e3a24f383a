//! Configuration management for mirrorcp
//!
//! Supports TOML and YAML configuration files with `MIRRORCP_*` environment
//! variable overrides. Configuration is read once at startup; there is no
//! hot reload.
//!
//! # Examples
//!
//! ```rust
//! use mirrorcp_config::Config;
//!
//! let config = Config::default();
//! assert_eq!(config.worker.threads, 4);
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

use mirrorcp_types::ThreadCount;
use serde::{Deserialize, Serialize};

pub mod error;
pub mod loader;

pub use error::{ConfigError, ConfigResult};
pub use loader::ConfigLoader;

/// Main configuration structure for mirrorcp
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Worker pool configuration
    pub worker: WorkerConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Config {
    /// Validate the configuration, returning the effective worker count
    ///
    /// `threads = 0` means auto-detect from the number of available CPUs.
    pub fn effective_threads(&self) -> ConfigResult<ThreadCount> {
        if self.worker.threads == 0 {
            return Ok(ThreadCount::optimal());
        }
        ThreadCount::new(self.worker.threads).map_err(ConfigError::validation)
    }
}

/// Worker pool configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkerConfig {
    /// Number of concurrent workers; 0 means auto-detect
    pub threads: usize,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            threads: ThreadCount::DEFAULT,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log level when no CLI flag or RUST_LOG is given
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.worker.threads, 4);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_effective_threads_explicit() {
        let mut config = Config::default();
        config.worker.threads = 8;
        assert_eq!(config.effective_threads().unwrap().get(), 8);
    }

    #[test]
    fn test_effective_threads_auto() {
        let mut config = Config::default();
        config.worker.threads = 0;
        assert!(config.effective_threads().unwrap().get() >= 1);
    }

    #[test]
    fn test_effective_threads_out_of_range() {
        let mut config = Config::default();
        config.worker.threads = 10_000;
        assert!(config.effective_threads().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str("[worker]\nthreads = 2\n").unwrap();
        assert_eq!(config.worker.threads, 2);
        assert_eq!(config.logging.level, "warn");
    }
}
