//! Client configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Base address of the public hangman service.
pub const DEFAULT_BASE_URL: &str = "http://hangman-cities.herokuapp.com";

/// Guesses a new game starts with.
pub const DEFAULT_MAX_GUESSES: u32 = 10;

/// Environment variable overriding the base URL.
pub const ENV_BASE_URL: &str = "HANGMAN_BASE_URL";
/// Environment variable overriding the guess maximum.
pub const ENV_MAX_GUESSES: &str = "HANGMAN_MAX_GUESSES";
/// Environment variable setting the transport timeout in seconds.
pub const ENV_TIMEOUT_SECS: &str = "HANGMAN_TIMEOUT_SECS";

/// Settings handed to [`crate::GameClient`] at construction.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Service base URL, without trailing slash.
    base_url: String,

    /// Guesses a fresh game is expected to start with.
    max_guesses: u32,

    /// Transport timeout. `None` keeps the HTTP client default.
    timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_guesses: DEFAULT_MAX_GUESSES,
            timeout_secs: None,
        }
    }
}

impl ClientConfig {
    /// Creates a configuration for `base_url` with default limits.
    #[instrument(skip(base_url), fields(base_url = %base_url.as_ref()))]
    pub fn new(base_url: impl AsRef<str>) -> Self {
        Self::default().with_base_url(base_url)
    }

    /// Replaces the base URL.
    pub fn with_base_url(mut self, base_url: impl AsRef<str>) -> Self {
        self.base_url = base_url.as_ref().trim_end_matches('/').to_string();
        self
    }

    /// Replaces the guess maximum.
    pub fn with_max_guesses(mut self, max_guesses: u32) -> Self {
        self.max_guesses = max_guesses;
        self
    }

    /// Sets the transport timeout.
    pub fn with_timeout_secs(mut self, timeout_secs: Option<u64>) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Transport timeout as a [`Duration`].
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Loads configuration from a TOML file. Missing keys keep their defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        let base_url = config.base_url.clone();
        let config = config.with_base_url(base_url);
        info!(base_url = %config.base_url, "Config loaded successfully");
        Ok(config)
    }

    /// Applies `HANGMAN_*` environment variables on top of this config.
    #[instrument(skip(self))]
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from `lookup`, keyed by the `HANGMAN_*` names.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_BASE_URL) {
            debug!(base_url = %url, "Overriding base URL");
            self = self.with_base_url(url);
        }
        if let Some(raw) = lookup(ENV_MAX_GUESSES) {
            let max = raw.trim().parse::<u32>().map_err(|e| {
                ConfigError::new(format!("Invalid {}={:?}: {}", ENV_MAX_GUESSES, raw, e))
            })?;
            self.max_guesses = max;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs = raw.trim().parse::<u64>().map_err(|e| {
                ConfigError::new(format!("Invalid {}={:?}: {}", ENV_TIMEOUT_SECS, raw, e))
            })?;
            self.timeout_secs = Some(secs);
        }
        Ok(self)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
