//! Deterministic game core
//!
//! All gameplay logic lives here. No rendering or platform dependencies:
//! time comes in as a frame-clock timestamp and face estimates come in as
//! plain landmark lists.

pub mod phase;
pub mod physics;
pub mod signal;
pub mod tick;

pub use phase::{GamePhase, PhaseMachine, Transition};
pub use physics::{Ball, BallPhysics, Field, GoalEvent, Score, Side};
pub use signal::{
    DisplacementSignal, FaceLandmarks, SampleOutcome, SignalSampler, TrackerStatus,
    TrackingBaseline,
};
pub use tick::{FrameReport, GameState, Overlay, Snapshot, TickInput, sample, tick};
