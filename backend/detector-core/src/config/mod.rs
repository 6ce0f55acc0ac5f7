//! Detector configuration stored as `lsdetect.json` in the config directory.

use crate::DEFAULT_PROCESS_NAME;
use crate::error::config::ConfigError;

use common::ErrorLocation;
use models::DetectionMode;

use std::env;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

const CONFIG_FILE_NAME: &str = "lsdetect.json";
const CONFIG_DIR_NAME: &str = "lsdetect";
const CONFIG_VERSION: u32 = 1;

pub const CONFIG_DIR_ENV: &str = "LSDETECT_CONFIG_DIR";
pub const PROCESS_NAME_ENV: &str = "LSDETECT_PROCESS_NAME";
pub const MODE_ENV: &str = "LSDETECT_MODE";

// ============================================
// CONFIG STRUCTS
// ============================================

/// Backoff schedule used while waiting for the language server to appear.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollConfig {
    #[serde(default = "default_initial_interval_ms")]
    pub initial_interval_ms: u64,
    #[serde(default = "default_max_interval_ms")]
    pub max_interval_ms: u64,
    #[serde(default = "default_max_elapsed_secs")]
    pub max_elapsed_secs: u64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            initial_interval_ms: default_initial_interval_ms(),
            max_interval_ms: default_max_interval_ms(),
            max_elapsed_secs: default_max_elapsed_secs(),
        }
    }
}

impl PollConfig {
    pub fn initial_interval(&self) -> Duration {
        Duration::from_millis(self.initial_interval_ms)
    }

    pub fn max_interval(&self) -> Duration {
        Duration::from_millis(self.max_interval_ms)
    }

    pub fn max_elapsed(&self) -> Duration {
        Duration::from_secs(self.max_elapsed_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectorConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default = "default_process_name")]
    pub process_name: String,

    /// Forced query tool. `None` lets the caller probe for one.
    #[serde(default)]
    pub mode: Option<DetectionMode>,

    #[serde(default)]
    pub poll: PollConfig,

    #[serde(default = "default_command_timeout_secs")]
    pub command_timeout_secs: u64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            process_name: default_process_name(),
            mode: None,
            poll: PollConfig::default(),
            command_timeout_secs: default_command_timeout_secs(),
        }
    }
}

// ============================================
// DEFAULT FUNCTIONS
// ============================================

fn default_version() -> u32 {
    CONFIG_VERSION
}
fn default_process_name() -> String {
    DEFAULT_PROCESS_NAME.to_string()
}
fn default_initial_interval_ms() -> u64 {
    500
}
fn default_max_interval_ms() -> u64 {
    5_000
}
fn default_max_elapsed_secs() -> u64 {
    60
}
fn default_command_timeout_secs() -> u64 {
    10
}

/// Resolve the directory holding `lsdetect.json`.
///
/// `LSDETECT_CONFIG_DIR` wins over the platform config directory.
#[track_caller]
pub fn default_config_dir() -> Result<PathBuf, ConfigError> {
    if let Ok(custom_dir) = env::var(CONFIG_DIR_ENV) {
        debug!("Using {CONFIG_DIR_ENV} override: {custom_dir}");
        return Ok(PathBuf::from(custom_dir));
    }

    dirs::config_dir()
        .map(|dir| dir.join(CONFIG_DIR_NAME))
        .ok_or_else(|| ConfigError::DirectoryNotFound {
            location: ErrorLocation::from(Location::caller()),
            reason: String::from("Platform config directory could not be determined"),
        })
}

// ============================================
// IMPLEMENTATION
// ============================================

impl DetectorConfig {
    /// Load config from {config_dir}/lsdetect.json.
    ///
    /// A missing file yields defaults. A file that exists but cannot be read,
    /// parsed or validated is an error.
    pub fn load(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            info!(
                "Config file not found at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path).map_err(|e| {
            warn!("Failed to read config file: {e}");
            ConfigError::ReadError {
                location: ErrorLocation::from(Location::caller()),
                path: config_path.clone(),
                source: e,
            }
        })?;

        let config: DetectorConfig = serde_json::from_str(&contents).map_err(|e| {
            warn!("Failed to parse config JSON: {e}");
            ConfigError::ParseError {
                location: ErrorLocation::from(Location::caller()),
                path: config_path.clone(),
                reason: e.to_string(),
            }
        })?;

        config.validate()?;

        info!("Config loaded from {}", config_path.display());
        Ok(config)
    }

    /// Save config to {config_dir}/lsdetect.json using temp file + rename.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        self.validate()?;

        std::fs::create_dir_all(config_dir).map_err(|e| ConfigError::WriteError {
            location: ErrorLocation::from(Location::caller()),
            path: config_dir.to_path_buf(),
            source: e,
        })?;

        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let temp_path = config_dir.join(format!("{CONFIG_FILE_NAME}.tmp"));

        let json = serde_json::to_string_pretty(self).map_err(|e| ConfigError::SerializeError {
            location: ErrorLocation::from(Location::caller()),
            reason: e.to_string(),
        })?;

        std::fs::write(&temp_path, json).map_err(|e| ConfigError::WriteError {
            location: ErrorLocation::from(Location::caller()),
            path: temp_path.clone(),
            source: e,
        })?;

        std::fs::rename(&temp_path, &config_path).map_err(|e| ConfigError::WriteError {
            location: ErrorLocation::from(Location::caller()),
            path: config_path.clone(),
            source: e,
        })?;

        info!("Config saved to {}", config_path.display());
        Ok(())
    }

    /// Apply `LSDETECT_PROCESS_NAME` and `LSDETECT_MODE`, then re-validate.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(process_name) = env::var(PROCESS_NAME_ENV) {
            debug!("Using {PROCESS_NAME_ENV} override: {process_name}");
            self.process_name = process_name;
        }

        if let Ok(mode) = env::var(MODE_ENV) {
            let mode = mode
                .parse::<DetectionMode>()
                .map_err(|e| ConfigError::ValidationError {
                    location: ErrorLocation::from(Location::caller()),
                    reason: format!("{MODE_ENV}: {e}"),
                })?;
            debug!("Using {MODE_ENV} override: {mode}");
            self.mode = Some(mode);
        }

        self.validate()
    }

    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout_secs)
    }

    /// Validate config values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version == 0 || self.version > CONFIG_VERSION {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!(
                    "Invalid version: {} (expected 1-{CONFIG_VERSION})",
                    self.version
                ),
            });
        }

        if self.process_name.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: String::from("process_name cannot be empty"),
            });
        }

        // Embedded verbatim inside quoted command text.
        if self.process_name.contains(['\'', '"']) {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!("process_name cannot contain quotes: {}", self.process_name),
            });
        }

        if self.poll.initial_interval_ms == 0 || self.poll.max_elapsed_secs == 0 {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: String::from("poll intervals must be greater than zero"),
            });
        }

        if self.poll.max_interval_ms < self.poll.initial_interval_ms {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!(
                    "poll.max_interval_ms ({}) must be at least poll.initial_interval_ms ({})",
                    self.poll.max_interval_ms, self.poll.initial_interval_ms
                ),
            });
        }

        if self.command_timeout_secs == 0 {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: String::from("command_timeout_secs must be greater than zero"),
            });
        }

        Ok(())
    }
}
