//! Application configuration and persisted session state.
//!
//! Configuration is a versioned JSON document stored under
//! [`storage_keys::CONFIG`]. Session state (last route, active navbar tab,
//! theme) lives under individual keys so other pages can read them directly.

use serde::{Deserialize, Serialize};

use crate::constants::storage_keys;
use crate::error::StorageError;
use crate::storage::{self, KeyValueStore};

/// Log level setting for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Get the display name for this log level.
    pub fn name(&self) -> &'static str {
        match self {
            LogLevel::Error => "Error",
            LogLevel::Warn => "Warn",
            LogLevel::Info => "Info",
            LogLevel::Debug => "Debug",
            LogLevel::Trace => "Trace",
        }
    }

    /// Get all log levels in order from least to most verbose.
    pub fn all() -> &'static [LogLevel] {
        &[
            LogLevel::Error,
            LogLevel::Warn,
            LogLevel::Info,
            LogLevel::Debug,
            LogLevel::Trace,
        ]
    }

    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Current configuration format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Version of the configuration format
    pub version: u32,

    /// User preferences
    #[serde(default)]
    pub preferences: UserPreferences,
}

/// User preferences section of the config.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreferences {
    /// Dark theme enabled
    #[serde(default)]
    pub dark_theme: bool,

    /// Log verbosity level
    #[serde(default)]
    pub log_level: LogLevel,
}

impl AppConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            preferences: UserPreferences::default(),
        }
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;

        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        Ok(config)
    }

    /// Load the configuration from a store, or defaults if absent or unreadable.
    pub fn load(store: &impl KeyValueStore) -> Self {
        match store.get_item(storage_keys::CONFIG) {
            Ok(Some(json)) => match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded configuration");
                    config
                }
                Err(e) => {
                    log::warn!("Failed to parse configuration, using defaults: {}", e);
                    Self::new()
                }
            },
            Ok(None) => {
                log::debug!("No configuration stored, using defaults");
                Self::new()
            }
            Err(e) => {
                log::warn!("Failed to read configuration: {}", e);
                Self::new()
            }
        }
    }

    /// Save the configuration to a store.
    pub fn save(&self, store: &mut impl KeyValueStore) -> Result<(), ConfigError> {
        let json = self.to_json()?;
        store.set_item(storage_keys::CONFIG, &json)?;
        log::info!("Saved configuration");
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Configuration version is newer than supported
    #[error(
        "Configuration file version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    /// Storage error (file store or localStorage)
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Light or dark page theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Navigation and theme state restored when the app is reopened.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub last_route: Option<String>,
    pub active_navbar_tab: Option<String>,
    pub theme: Theme,
}

impl Session {
    /// Read every session key; missing or corrupt values fall back to defaults.
    pub fn load(store: &impl KeyValueStore) -> Self {
        Self {
            last_route: storage::load_json(store, storage_keys::LAST_ROUTE),
            active_navbar_tab: storage::load_json(store, storage_keys::ACTIVE_NAVBAR_TAB),
            theme: storage::load_json(store, storage_keys::THEME).unwrap_or_default(),
        }
    }

    /// Write every session key. Unset routes are removed from the store.
    pub fn save(&self, store: &mut impl KeyValueStore) {
        for (key, value) in [
            (storage_keys::LAST_ROUTE, &self.last_route),
            (storage_keys::ACTIVE_NAVBAR_TAB, &self.active_navbar_tab),
        ] {
            match value {
                Some(value) => {
                    storage::save_json(store, key, value);
                }
                None => {
                    if let Err(e) = store.remove_item(key) {
                        log::warn!("Failed to clear '{}': {}", key, e);
                    }
                }
            }
        }
        storage::save_json(store, storage_keys::THEME, &self.theme);
    }
}
