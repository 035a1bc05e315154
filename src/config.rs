//! Configuration for the Brandforge generator
//!
//! Settings are layered: built-in defaults, then an optional TOML file,
//! then `BRANDFORGE_`-prefixed environment variables (`__` separates
//! nesting, e.g. `BRANDFORGE_RETRY__MAX_ATTEMPTS=3`). `ANTHROPIC_API_KEY`
//! always wins for the API key when it is set.

use crate::error::{Result, ThemeError};
use crate::services::llm::LlmConfig;
use crate::services::retry::RetryPolicy;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

const ENV_PREFIX: &str = "BRANDFORGE";

/// Top-level generator configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub llm: LlmConfig,
    pub retry: RetrySettings,
    pub validator: ValidatorSettings,
    pub output: OutputSettings,
}

/// Backoff for generative-text calls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrySettings {
    /// Total attempts, including the first
    pub max_attempts: u32,

    /// Delay before the second attempt; doubles for each one after
    pub initial_backoff_secs: f64,

    /// Upper bound of the random delay added to every backoff
    pub jitter_secs: f64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_backoff_secs: 2.0,
            jitter_secs: 1.0,
        }
    }
}

/// Longest configurable backoff or jitter, in seconds
pub const MAX_DELAY_SECS: f64 = 3600.0;

impl RetrySettings {
    /// Delays outside `0..=MAX_DELAY_SECS` are clamped; NaN becomes zero.
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            initial_backoff: seconds(self.initial_backoff_secs),
            jitter: seconds(self.jitter_secs),
        }
    }
}

/// Syntax checking of merged documents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorSettings {
    /// Try `node --check` before the in-process checks
    pub use_node: bool,
    /// Parse with the tree-sitter JavaScript grammar before the bracket scan
    pub use_tree_sitter: bool,
    pub node_binary: String,
}

impl Default for ValidatorSettings {
    fn default() -> Self {
        Self {
            use_node: true,
            use_tree_sitter: true,
            node_binary: "node".to_string(),
        }
    }
}

/// Where generated files are written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub clients_dir: PathBuf,
    /// Stylesheet each new theme is appended to
    pub themes_css: PathBuf,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            clients_dir: PathBuf::from("src/config/clients"),
            themes_css: PathBuf::from("src/styles/client-themes.css"),
        }
    }
}

impl GeneratorConfig {
    /// Load defaults, then `path` (if given and present), then environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            debug!("Reading configuration from {}", path.display());
            builder = builder.add_source(
                config::File::from(path)
                    .format(config::FileFormat::Toml)
                    .required(false),
            );
        }
        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let mut config: GeneratorConfig = builder.build()?.try_deserialize()?;
        config.apply_api_key_env();
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML document (no file or environment layering)
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: GeneratorConfig = toml::from_str(toml_str)
            .map_err(|e| config_error(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.retry.max_attempts == 0 {
            return Err(config_error("retry.max_attempts must be at least 1"));
        }
        for (name, value) in [
            ("retry.initial_backoff_secs", self.retry.initial_backoff_secs),
            ("retry.jitter_secs", self.retry.jitter_secs),
        ] {
            if !(0.0..=MAX_DELAY_SECS).contains(&value) {
                return Err(config_error(format!(
                    "{} must be between 0 and {} seconds, got {}",
                    name, MAX_DELAY_SECS, value
                )));
            }
        }
        if self.llm.max_tokens == 0 {
            return Err(config_error("llm.max_tokens must be at least 1"));
        }
        if self.llm.request_timeout_secs == 0 {
            return Err(config_error("llm.request_timeout_secs must be at least 1"));
        }
        Ok(())
    }

    fn apply_api_key_env(&mut self) {
        if let Ok(key) = env::var("ANTHROPIC_API_KEY") {
            if !key.trim().is_empty() {
                debug!("Using API key from ANTHROPIC_API_KEY environment variable");
                self.llm.api_key = key;
            }
        }
    }
}

fn seconds(value: f64) -> Duration {
    Duration::try_from_secs_f64(value.clamp(0.0, MAX_DELAY_SECS)).unwrap_or(Duration::ZERO)
}

fn config_error(message: impl Into<String>) -> ThemeError {
    ThemeError::Config(config::ConfigError::Message(message.into()))
}
