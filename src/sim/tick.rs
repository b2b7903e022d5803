//! Frame tick
//!
//! `tick` runs once per display frame and `sample` once per sampler interval.
//! Both take the whole `GameState` by `&mut`, so on a single thread they can
//! never interleave mid-update.

use glam::Vec2;
use serde::Serialize;

use super::phase::{GamePhase, PhaseMachine};
use super::physics::{BallPhysics, Field, GoalEvent, Score, Side};
use super::signal::{FaceLandmarks, SampleOutcome, SignalSampler, TrackerStatus};
use crate::settings::Settings;

/// One-shot commands collected between frames
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Reset scores and restart through a reset pause
    pub replay: bool,
    /// Hide the overlay and clear the scene
    pub quit: bool,
}

/// Overlay the presentation layer should show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Overlay {
    None,
    Goal,
    GameOver { winner: Side },
}

impl Overlay {
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Overlay::None => None,
            Overlay::Goal => Some("GOAL!"),
            Overlay::GameOver { winner } => Some(winner.win_message()),
        }
    }
}

/// Read-only view of the game for drawing
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Snapshot {
    pub field: Field,
    pub ball_pos: Vec2,
    pub ball_radius: f32,
    pub score: Score,
    pub phase: GamePhase,
    pub overlay: Overlay,
    /// Scene wiped by quit; nothing but a blank surface is drawn
    pub cleared: bool,
    pub tracker: TrackerStatus,
    pub frame: u64,
}

/// What happened during one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Whether the ball was stepped this frame
    pub advanced: bool,
    pub goal: Option<GoalEvent>,
    /// Phase after the frame
    pub phase: GamePhase,
}

/// Complete game session
#[derive(Debug, Clone)]
pub struct GameState {
    sampler: SignalSampler,
    physics: BallPhysics,
    phases: PhaseMachine,
    tracker: TrackerStatus,
    cleared: bool,
    frame: u64,
}

impl GameState {
    pub fn new(field: Field, settings: &Settings) -> Self {
        Self {
            sampler: SignalSampler::new(settings.sensitivity),
            physics: BallPhysics::new(field),
            phases: PhaseMachine::new(),
            tracker: TrackerStatus::default(),
            cleared: false,
            frame: 0,
        }
    }

    pub fn sampler(&self) -> &SignalSampler {
        &self.sampler
    }

    pub fn physics(&self) -> &BallPhysics {
        &self.physics
    }

    pub fn phases(&self) -> &PhaseMachine {
        &self.phases
    }

    pub fn phase(&self) -> GamePhase {
        self.phases.phase()
    }

    pub fn score(&self) -> Score {
        self.physics.score()
    }

    pub fn tracker(&self) -> TrackerStatus {
        self.tracker
    }

    pub fn is_cleared(&self) -> bool {
        self.cleared
    }

    /// True only while the ball is live: playing and not quit
    pub fn accepts_input(&self) -> bool {
        self.phases.is_playing() && !self.cleared
    }

    pub fn set_tracker_status(&mut self, status: TrackerStatus) {
        if status == self.tracker {
            return;
        }
        match status {
            TrackerStatus::Ready => log::info!("Face tracking ready"),
            TrackerStatus::Loading => log::info!("Face tracking loading"),
            other => log::warn!("Face tracking degraded: {:?}", other),
        }
        self.tracker = status;
    }

    /// Zero the score, recenter the ball, forget the head baseline and
    /// restart through a reset pause
    pub fn replay(&mut self, now_ms: f64) {
        self.physics.reset_score();
        self.physics.reset_position();
        self.sampler.rebaseline();
        self.cleared = false;
        self.phases.replay(now_ms);
        log::info!("Replay requested");
    }

    /// Hide the overlay and blank the scene. Repeating it changes nothing.
    pub fn quit(&mut self) {
        if !self.cleared {
            log::info!("Quit: scene cleared");
        }
        self.cleared = true;
    }

    pub fn snapshot(&self) -> Snapshot {
        let phase = self.phases.phase();
        let overlay = if self.cleared {
            Overlay::None
        } else {
            match phase {
                GamePhase::GoalPause => Overlay::Goal,
                GamePhase::GameOver { winner } => Overlay::GameOver { winner },
                GamePhase::Playing | GamePhase::ResetPause => Overlay::None,
            }
        };
        let ball = self.physics.ball();

        Snapshot {
            field: self.physics.field(),
            ball_pos: ball.pos(),
            ball_radius: ball.radius(),
            score: self.physics.score(),
            phase,
            overlay,
            cleared: self.cleared,
            tracker: self.tracker,
            frame: self.frame,
        }
    }
}

/// Advance the game by one display frame
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: f64) -> FrameReport {
    state.frame += 1;

    if input.quit {
        state.quit();
    }
    if input.replay {
        state.replay(now_ms);
    }

    state.phases.poll(now_ms);

    let mut report = FrameReport {
        advanced: false,
        goal: None,
        phase: state.phases.phase(),
    };

    if state.accepts_input() {
        let delta = state.sampler.signal().current_delta();
        report.advanced = true;

        if let Some(goal) = state.physics.advance(delta) {
            let score = state.physics.score();
            log::info!(
                "Goal by {} (You {} - {} Opponent)",
                goal.scorer.label(),
                score.player,
                score.opponent
            );
            state.sampler.rebaseline();
            state.phases.on_goal(goal, now_ms);
            report.goal = Some(goal);
        }
    }

    report.phase = state.phases.phase();
    report
}

/// Feed one face estimation into the signal.
///
/// Returns `None` when the ball is not live; the estimate is discarded so a
/// paused ball takes no displacement input.
pub fn sample(state: &mut GameState, faces: &[FaceLandmarks]) -> Option<SampleOutcome> {
    if !state.accepts_input() {
        return None;
    }
    let outcome = state.sampler.ingest(faces);
    log::trace!("Sample: {:?}", outcome);
    Some(outcome)
}
