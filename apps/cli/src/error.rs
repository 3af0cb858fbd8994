//! # CLI Error Types
//!
//! Calculation errors are not here: they are `prescale_core::ApiError`
//! values that get rendered as output. This module covers the failures that
//! stop the CLI before it can calculate anything.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration failures. All of them exit with status 2.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `--config` named a file that does not exist.
    ///
    /// A missing file at the default location is not an error; defaults apply.
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The config file exists but could not be read.
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid TOML or has unknown values.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A setting parsed but is not usable.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
