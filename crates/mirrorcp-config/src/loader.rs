//! Configuration loader utilities

use crate::{Config, ConfigError, ConfigResult};
use std::path::Path;

/// Environment variable overriding the worker count
const ENV_THREADS: &str = "MIRRORCP_THREADS";
/// Environment variable overriding the default log level
const ENV_LOG_LEVEL: &str = "MIRRORCP_LOG_LEVEL";

/// Configuration loader with common loading patterns
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load the default configuration with environment overrides applied
    pub fn load_default() -> ConfigResult<Config> {
        let mut config = Config::default();
        Self::apply_env_overrides(&mut config)?;
        Ok(config)
    }

    /// Load configuration from a specific file, then apply environment overrides
    ///
    /// The format is chosen by file extension: `.toml`, `.yaml` or `.yml`.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Config> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => toml::from_str(&content).map_err(|e| ConfigError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?,
            Some("yaml") | Some("yml") => {
                serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?
            }
            _ => {
                return Err(ConfigError::UnsupportedFormat {
                    path: path.to_path_buf(),
                })
            }
        };

        Self::apply_env_overrides(&mut config)?;
        Ok(config)
    }

    /// Save configuration to a file (format chosen by extension, TOML default)
    pub fn save_to_file<P: AsRef<Path>>(config: &Config, path: P) -> ConfigResult<()> {
        let path = path.as_ref();

        let content = match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => {
                serde_yaml::to_string(config).map_err(|e| ConfigError::Parse {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?
            }
            _ => toml::to_string_pretty(config).map_err(|e| ConfigError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?,
        };

        std::fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(())
    }

    /// Apply `MIRRORCP_*` environment variable overrides
    fn apply_env_overrides(config: &mut Config) -> ConfigResult<()> {
        if let Ok(value) = std::env::var(ENV_THREADS) {
            config.worker.threads = value.parse().map_err(|_| {
                ConfigError::environment(format!(
                    "{} must be a non-negative integer, got '{}'",
                    ENV_THREADS, value
                ))
            })?;
        }

        if let Ok(value) = std::env::var(ENV_LOG_LEVEL) {
            config.logging.level = value;
        }

        Ok(())
    }
}
