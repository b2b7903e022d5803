//! Head-position signal sampling
//!
//! Turns periodic face-landmark estimates into a horizontal displacement
//! delta. The sampler is the only writer of the delta; everything else reads
//! it by value.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{LEFT_EYE_LANDMARK, RIGHT_EYE_LANDMARK};

/// Landmark positions of one detected face, in video pixel coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceLandmarks {
    pub points: Vec<Vec2>,
}

impl FaceLandmarks {
    pub fn new(points: Vec<Vec2>) -> Self {
        Self { points }
    }

    /// Build from a flat coordinate buffer (`stride` values per point, x first)
    pub fn from_flat(data: &[f32], stride: usize) -> Option<Self> {
        if stride < 2 || data.is_empty() || data.len() % stride != 0 {
            return None;
        }
        let points = data
            .chunks_exact(stride)
            .map(|p| Vec2::new(p[0], p[1]))
            .collect();
        Some(Self { points })
    }

    /// Horizontal midpoint between the two eye centers
    pub fn eye_midpoint_x(&self) -> Option<f32> {
        let left = self.points.get(LEFT_EYE_LANDMARK)?;
        let right = self.points.get(RIGHT_EYE_LANDMARK)?;
        let avg_x = (left.x + right.x) / 2.0;
        avg_x.is_finite().then_some(avg_x)
    }
}

/// Latest horizontal displacement, in ball pixels per frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DisplacementSignal {
    current_delta: f32,
}

impl DisplacementSignal {
    pub fn current_delta(&self) -> f32 {
        self.current_delta
    }
}

/// Zero point for head displacement
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TrackingBaseline {
    reference_x: Option<f32>,
}

impl TrackingBaseline {
    pub fn reference_x(&self) -> Option<f32> {
        self.reference_x
    }

    pub fn is_set(&self) -> bool {
        self.reference_x.is_some()
    }
}

/// Readiness of the camera + landmark model pipeline
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackerStatus {
    #[default]
    Loading,
    Ready,
    /// No video stream; the signal stays neutral
    CameraUnavailable,
    /// Model never loaded; the loading indicator is never cleared
    ModelUnavailable,
}

impl TrackerStatus {
    /// Whether the "loading" indicator should be visible
    pub fn shows_loading(&self) -> bool {
        matches!(self, TrackerStatus::Loading | TrackerStatus::ModelUnavailable)
    }

    pub fn notice(&self) -> Option<&'static str> {
        match self {
            TrackerStatus::CameraUnavailable => Some("Camera unavailable"),
            _ => None,
        }
    }
}

/// What a single sample did to the signal
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SampleOutcome {
    /// First detection since the last reset; establishes the zero point
    Baselined { reference_x: f32 },
    /// Delta recomputed against the existing baseline
    Updated { delta: f32 },
    /// No usable face; the previous delta persists
    NoFace,
}

/// Owns the displacement signal and its baseline
#[derive(Debug, Clone)]
pub struct SignalSampler {
    signal: DisplacementSignal,
    baseline: TrackingBaseline,
    sensitivity: f32,
}

impl SignalSampler {
    pub fn new(sensitivity: f32) -> Self {
        Self {
            signal: DisplacementSignal::default(),
            baseline: TrackingBaseline::default(),
            sensitivity,
        }
    }

    pub fn signal(&self) -> DisplacementSignal {
        self.signal
    }

    pub fn baseline(&self) -> TrackingBaseline {
        self.baseline
    }

    pub fn sensitivity(&self) -> f32 {
        self.sensitivity
    }

    /// Apply one estimation result. Only the first face is used.
    pub fn ingest(&mut self, faces: &[FaceLandmarks]) -> SampleOutcome {
        let Some(avg_x) = faces.first().and_then(FaceLandmarks::eye_midpoint_x) else {
            return SampleOutcome::NoFace;
        };

        let first = !self.baseline.is_set();
        let reference_x = *self.baseline.reference_x.get_or_insert(avg_x);

        // Leaning toward the camera's left moves the ball right on screen
        self.signal.current_delta = -(avg_x - reference_x) * self.sensitivity;

        if first {
            SampleOutcome::Baselined { reference_x }
        } else {
            SampleOutcome::Updated {
                delta: self.signal.current_delta,
            }
        }
    }

    /// Forget the zero point; the next detection re-establishes it
    pub fn rebaseline(&mut self) {
        self.baseline = TrackingBaseline::default();
        self.signal = DisplacementSignal::default();
    }
}
