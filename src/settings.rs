//! Player preferences
//!
//! Persisted in LocalStorage on the web. Game rules (win threshold, pause
//! lengths, ball size) live in `consts`.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_SAMPLE_INTERVAL_MS, DEFAULT_SENSITIVITY, MIN_SAMPLE_INTERVAL_MS};
use crate::error::SettingsError;

/// Tracking and logging preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Head movement to ball speed scale
    pub sensitivity: f32,
    /// Interval between face estimations (ms)
    pub sample_interval_ms: u32,
    /// Deadline for a single face estimation; `None` waits indefinitely
    pub estimation_timeout_ms: Option<u32>,
    /// Log level name ("error" .. "trace")
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sensitivity: DEFAULT_SENSITIVITY,
            sample_interval_ms: DEFAULT_SAMPLE_INTERVAL_MS,
            estimation_timeout_ms: None,
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "head_goal_settings";

    /// Parse and validate settings from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !self.sensitivity.is_finite() || self.sensitivity <= 0.0 {
            return Err(SettingsError::Sensitivity(self.sensitivity));
        }
        if self.sample_interval_ms < MIN_SAMPLE_INTERVAL_MS {
            return Err(SettingsError::SampleInterval {
                min: MIN_SAMPLE_INTERVAL_MS,
                got: self.sample_interval_ms,
            });
        }
        if self.estimation_timeout_ms == Some(0) {
            return Err(SettingsError::EstimationTimeout);
        }
        self.log_level()?;
        Ok(())
    }

    /// Parsed log level
    pub fn log_level(&self) -> Result<log::Level, SettingsError> {
        log::Level::from_str(&self.log_level)
            .map_err(|_| SettingsError::LogLevel(self.log_level.clone()))
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            match storage.get_item(Self::STORAGE_KEY) {
                Ok(Some(json)) => match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                },
                // First visit: write the defaults so they can be edited in place
                Ok(None) => Self::default().save(),
                Err(_) => {}
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Load settings from a JSON file (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
