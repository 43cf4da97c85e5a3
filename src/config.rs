//! Game configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Settings for a play session.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Whether O is played by the computer.
    #[serde(default = "default_ai_enabled")]
    ai_enabled: bool,

    /// Computer thinking delay in milliseconds.
    #[serde(default = "default_ai_delay_ms")]
    ai_delay_ms: u64,

    /// Seed for the computer's random choices; random when absent.
    #[serde(default)]
    seed: Option<u64>,
}

fn default_ai_enabled() -> bool {
    true
}

fn default_ai_delay_ms() -> u64 {
    350
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            ai_enabled: default_ai_enabled(),
            ai_delay_ms: default_ai_delay_ms(),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Creates a configuration from explicit values.
    pub fn new(ai_enabled: bool, ai_delay_ms: u64, seed: Option<u64>) -> Self {
        Self {
            ai_enabled,
            ai_delay_ms,
            seed,
        }
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(?config, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise returns the defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Thinking delay as a [`Duration`].
    pub fn ai_delay(&self) -> Duration {
        Duration::from_millis(self.ai_delay_ms)
    }

    /// Applies command-line overrides.
    pub fn with_overrides(
        mut self,
        ai_enabled: Option<bool>,
        ai_delay_ms: Option<u64>,
        seed: Option<u64>,
    ) -> Self {
        if let Some(ai_enabled) = ai_enabled {
            self.ai_enabled = ai_enabled;
        }
        if let Some(ai_delay_ms) = ai_delay_ms {
            self.ai_delay_ms = ai_delay_ms;
        }
        if seed.is_some() {
            self.seed = seed;
        }
        self
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
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
