//! Synthetic face source and headless runner
//!
//! Stands in for the webcam + landmark model: a head swaying on a sine wave
//! with seeded jitter and occasional missed detections. The headless runner
//! interleaves the frame clock and the sampler clock the way a browser event
//! loop would, on a simulated timeline.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::consts::{
    FACE_MESH_POINTS, HEADLESS_FIELD_HEIGHT, HEADLESS_FIELD_WIDTH, HEADLESS_FRAME_MS,
    LEFT_EYE_LANDMARK, RIGHT_EYE_LANDMARK,
};
use crate::settings::Settings;
use crate::sim::{
    FaceLandmarks, Field, GamePhase, GameState, Snapshot, TickInput, TrackerStatus, sample, tick,
};

/// Horizontal distance between the synthetic eye centers
pub const EYE_SPACING: f32 = 60.0;
const EYE_HEIGHT: f32 = 200.0;

/// A full face mesh whose eye midpoint sits at `eye_mid_x`
pub fn face_at(eye_mid_x: f32) -> FaceLandmarks {
    let mut points = vec![Vec2::new(eye_mid_x, EYE_HEIGHT); FACE_MESH_POINTS];
    points[LEFT_EYE_LANDMARK].x = eye_mid_x - EYE_SPACING / 2.0;
    points[RIGHT_EYE_LANDMARK].x = eye_mid_x + EYE_SPACING / 2.0;
    FaceLandmarks::new(points)
}

/// Shape of the scripted head movement
#[derive(Debug, Clone, Serialize)]
pub struct HeadScript {
    /// Resting eye midpoint in video pixels
    pub center_x: f32,
    /// Peak sway either side of center
    pub amplitude: f32,
    pub period_ms: f64,
    /// Uniform noise added to each detection
    pub jitter: f32,
    /// Probability that a sample detects no face
    pub dropout: f64,
}

impl Default for HeadScript {
    fn default() -> Self {
        Self {
            center_x: 320.0,
            amplitude: 120.0,
            period_ms: 4000.0,
            jitter: 2.0,
            dropout: 0.1,
        }
    }
}

/// Deterministic replacement for the landmark model
#[derive(Debug, Clone)]
pub struct ScriptedFaces {
    script: HeadScript,
    rng: Pcg32,
}

impl ScriptedFaces {
    pub fn new(script: HeadScript, seed: u64) -> Self {
        Self {
            script,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Faces visible at `now_ms`: zero or one
    pub fn estimate(&mut self, now_ms: f64) -> Vec<FaceLandmarks> {
        if self.rng.random_bool(self.script.dropout.clamp(0.0, 1.0)) {
            return Vec::new();
        }
        let angle = (now_ms / self.script.period_ms * std::f64::consts::TAU) as f32;
        let noise = self.rng.random_range(-1.0f32..=1.0) * self.script.jitter;
        let x = self.script.center_x + self.script.amplitude * angle.sin() + noise;
        vec![face_at(x)]
    }
}

/// Summary of a headless match
#[derive(Debug, Clone, Serialize)]
pub struct HeadlessRun {
    pub frames: u64,
    /// Estimations handed to the sampler (skipped ones excluded)
    pub samples: u64,
    pub goals: u32,
    pub snapshot: Snapshot,
}

/// Play until game over or `max_frames`, on a simulated 60 Hz display
pub fn run_headless(
    settings: &Settings,
    faces: &mut ScriptedFaces,
    max_frames: u64,
) -> HeadlessRun {
    let field = Field::new(HEADLESS_FIELD_WIDTH, HEADLESS_FIELD_HEIGHT);
    let mut state = GameState::new(field, settings);
    state.set_tracker_status(TrackerStatus::Ready);

    let interval_ms = f64::from(settings.sample_interval_ms);
    let mut next_sample_ms = interval_ms;
    let mut frames = 0;
    let mut samples = 0;
    let mut goals = 0;

    for frame in 0..max_frames {
        let now_ms = frame as f64 * HEADLESS_FRAME_MS;

        // Sampler callbacks that came due before this frame run first
        while next_sample_ms <= now_ms {
            if state.accepts_input() {
                let detected = faces.estimate(next_sample_ms);
                sample(&mut state, &detected);
                samples += 1;
            }
            next_sample_ms += interval_ms;
        }

        let report = tick(&mut state, &TickInput::default(), now_ms);
        frames += 1;
        if report.goal.is_some() {
            goals += 1;
        }
        if let GamePhase::GameOver { winner } = report.phase {
            log::info!("{} after {} frames", winner.win_message(), frames);
            break;
        }
    }

    HeadlessRun {
        frames,
        samples,
        goals,
        snapshot: state.snapshot(),
    }
}
