//! Game phase state machine
//!
//! Playing → GoalPause (player scored) → Playing
//! Playing → ResetPause (opponent scored, or replay) → Playing
//! Playing → GameOver (win threshold) → ResetPause on replay
//!
//! Pauses end on a one-shot timer measured against the frame clock. There is
//! at most one pending timer: scheduling a new one replaces the old.

use serde::{Deserialize, Serialize};

use super::physics::{GoalEvent, Side};
use crate::consts::{GOAL_PAUSE_MS, RESET_PAUSE_MS};

/// Current phase of play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball follows the head signal
    Playing,
    /// "GOAL!" overlay after a player goal
    GoalPause,
    /// Ball waits at center after an opponent goal or a replay
    ResetPause,
    /// Match decided; only a replay leaves this phase
    GameOver { winner: Side },
}

impl GamePhase {
    pub fn is_pause(&self) -> bool {
        matches!(self, GamePhase::GoalPause | GamePhase::ResetPause)
    }
}

/// A phase change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: GamePhase,
    pub to: GamePhase,
}

/// Owns the phase and its resume timer
#[derive(Debug, Clone)]
pub struct PhaseMachine {
    phase: GamePhase,
    /// Frame-clock time at which the current pause ends
    resume_at_ms: Option<f64>,
}

impl Default for PhaseMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl PhaseMachine {
    pub fn new() -> Self {
        Self {
            phase: GamePhase::Playing,
            resume_at_ms: None,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// When the pending resume fires, if one is scheduled
    pub fn resume_at_ms(&self) -> Option<f64> {
        self.resume_at_ms
    }

    /// React to a goal. Ignored once the match is over.
    pub fn on_goal(&mut self, goal: GoalEvent, now_ms: f64) -> Option<Transition> {
        if let GamePhase::GameOver { .. } = self.phase {
            log::debug!("Goal by {:?} after game over ignored", goal.scorer);
            return None;
        }

        if let Some(winner) = goal.winner {
            self.resume_at_ms = None;
            return Some(self.transition_to(GamePhase::GameOver { winner }));
        }

        let (next, pause_ms) = match goal.scorer {
            Side::Player => (GamePhase::GoalPause, GOAL_PAUSE_MS),
            Side::Opponent => (GamePhase::ResetPause, RESET_PAUSE_MS),
        };
        self.schedule_resume(now_ms + pause_ms);
        Some(self.transition_to(next))
    }

    /// Fire the resume timer if it is due
    pub fn poll(&mut self, now_ms: f64) -> Option<Transition> {
        let due = self.resume_at_ms?;
        if now_ms < due {
            return None;
        }
        self.resume_at_ms = None;

        if self.phase.is_pause() {
            Some(self.transition_to(GamePhase::Playing))
        } else {
            None
        }
    }

    /// Restart the match from any phase, through a reset pause
    pub fn replay(&mut self, now_ms: f64) -> Transition {
        self.schedule_resume(now_ms + RESET_PAUSE_MS);
        self.transition_to(GamePhase::ResetPause)
    }

    fn schedule_resume(&mut self, due_ms: f64) {
        if let Some(previous) = self.resume_at_ms.replace(due_ms) {
            log::debug!("Resume at {:.0} ms superseded by {:.0} ms", previous, due_ms);
        }
    }

    fn transition_to(&mut self, to: GamePhase) -> Transition {
        let from = self.phase;
        self.phase = to;
        log::info!("Phase {:?} -> {:?}", from, to);
        Transition { from, to }
    }
}
