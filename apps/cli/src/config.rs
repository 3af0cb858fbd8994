//! # CLI Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command-line flags (highest priority)                               │
//! │     --format json                                                       │
//! │                                                                         │
//! │  2. Environment Variables                                               │
//! │     PRESCALE_OUTPUT=json                                                │
//! │     PRESCALE_LOG=debug                                                  │
//! │                                                                         │
//! │  3. TOML Config File                                                    │
//! │     --config FILE, or                                                   │
//! │     ~/.config/prescale/config.toml (Linux)                              │
//! │     ~/Library/Application Support/dev.prescale.prescale/config.toml     │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                    │
//! │     output = "text", log_filter = "warn"                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `RUST_LOG`, when set, still beats every `log_filter` source; see
//! [`crate::init_tracing`].
//!
//! ## Configuration File Format
//! ```toml
//! # config.toml
//! output = "json"
//! log_filter = "prescale_cli=debug"
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::error::{ConfigError, ConfigResult};

/// Environment variable overriding [`CliConfig::output`].
pub const OUTPUT_ENV: &str = "PRESCALE_OUTPUT";

/// Environment variable overriding [`CliConfig::log_filter`].
pub const LOG_ENV: &str = "PRESCALE_LOG";

// =============================================================================
// Output Format
// =============================================================================

/// How results and errors are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Summary lines, one per row.
    #[default]
    Text,

    /// One JSON document per invocation.
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(ConfigError::Invalid(format!(
                "Unknown output format: '{}'. Valid options: text, json",
                other
            ))),
        }
    }
}

// =============================================================================
// CLI Configuration
// =============================================================================

/// Settings that persist across invocations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Output format when `--format` is not given.
    #[serde(default)]
    pub output: OutputFormat,

    /// `tracing` filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_log_filter() -> String {
    "warn".to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            output: OutputFormat::default(),
            log_filter: default_log_filter(),
        }
    }
}

impl CliConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`config_path`, else the platform default)
    /// 3. Environment variables
    ///
    /// Command-line flags are applied afterwards with [`CliConfig::with_format`].
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let explicit = config_path.is_some();
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                config = Self::from_file(&path)?;
            } else if explicit {
                return Err(ConfigError::NotFound(path));
            }
        }

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Reads and parses one TOML file.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parses TOML text. Missing keys take their defaults.
    pub fn from_toml(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Applies `--format`, which beats every other source.
    pub fn with_format(mut self, format: Option<OutputFormat>) -> Self {
        if let Some(format) = format {
            self.output = format;
        }
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.log_filter.trim().is_empty() {
            return Err(ConfigError::Invalid("log_filter must not be empty".into()));
        }

        EnvFilter::try_new(&self.log_filter).map_err(|e| {
            ConfigError::Invalid(format!("log_filter '{}' is not valid: {}", self.log_filter, e))
        })?;

        Ok(())
    }

    fn apply_env_overrides(&mut self) -> ConfigResult<()> {
        self.apply_overrides(
            std::env::var(OUTPUT_ENV).ok(),
            std::env::var(LOG_ENV).ok(),
        )
    }

    /// Env overrides with the lookups already done, so tests need not touch
    /// the process environment.
    fn apply_overrides(
        &mut self,
        output: Option<String>,
        log_filter: Option<String>,
    ) -> ConfigResult<()> {
        if let Some(output) = output {
            self.output = output.parse()?;
        }
        if let Some(filter) = log_filter {
            self.log_filter = filter;
        }
        Ok(())
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("dev", "prescale", "prescale")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}
