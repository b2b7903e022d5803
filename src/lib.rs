//! Head Goal - a head-steered arcade goal game
//!
//! Core modules:
//! - `sim`: Deterministic game core (signal sampling, ball physics, phases, frame tick)
//! - `renderer`: Draw list generation and the 2D canvas backend
//! - `platform`: Browser wiring and the synthetic face source
//! - `settings`: Tunable sensitivity and sampling preferences
//! - `error`: Tracking and settings error types

pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{SettingsError, TrackingError};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Ball radius in canvas pixels
    pub const BALL_RADIUS: f32 = 20.0;

    /// Goals either side needs to end the match
    pub const WIN_THRESHOLD: u32 = 5;

    /// Pause after the player scores ("GOAL!" overlay), in milliseconds
    pub const GOAL_PAUSE_MS: f64 = 1000.0;
    /// Pause after an opponent goal or a replay, in milliseconds
    pub const RESET_PAUSE_MS: f64 = 1000.0;

    /// Face mesh landmark indices of the eye centers
    pub const LEFT_EYE_LANDMARK: usize = 33;
    pub const RIGHT_EYE_LANDMARK: usize = 263;
    /// Number of points in a full face mesh
    pub const FACE_MESH_POINTS: usize = 468;

    /// Ball pixels per frame, per pixel of eye offset from the baseline
    pub const DEFAULT_SENSITIVITY: f32 = 0.1;
    pub const DEFAULT_SAMPLE_INTERVAL_MS: u32 = 100;
    /// Anything faster than a display frame is pointless
    pub const MIN_SAMPLE_INTERVAL_MS: u32 = 16;

    /// Goal bar dimensions
    pub const GOAL_DEPTH: f32 = 10.0;
    pub const GOAL_HEIGHT: f32 = 100.0;

    /// Field used by the headless runner
    pub const HEADLESS_FIELD_WIDTH: f32 = 640.0;
    pub const HEADLESS_FIELD_HEIGHT: f32 = 480.0;
    /// Simulated display refresh for the headless runner
    pub const HEADLESS_FRAME_MS: f64 = 1000.0 / 60.0;
}
