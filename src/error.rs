//! Error types
//!
//! None of these ever reach the player as a dialog. Tracking errors degrade
//! the game to a neutral signal; settings errors fall back to defaults.

use thiserror::Error;

/// Failures of the camera / face-landmark pipeline
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrackingError {
    #[error("camera unavailable: {0}")]
    CameraUnavailable(String),
    #[error("face landmark model failed to load: {0}")]
    ModelLoad(String),
    #[error("face estimation failed: {0}")]
    Estimation(String),
    #[error("face estimation exceeded {0} ms")]
    EstimationTimeout(u32),
    #[error("malformed face prediction: {0}")]
    MalformedPrediction(String),
}

/// Invalid or unreadable settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid settings json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("sensitivity must be positive and finite, got {0}")]
    Sensitivity(f32),
    #[error("sample interval must be at least {min} ms, got {got}")]
    SampleInterval { min: u32, got: u32 },
    #[error("estimation timeout must be non-zero")]
    EstimationTimeout,
    #[error("unknown log level {0:?}")]
    LogLevel(String),
}
