//! Ball physics and scoring
//!
//! The ball only moves horizontally. Each advance shifts it by the current
//! displacement delta and checks the two goal lines.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{BALL_RADIUS, WIN_THRESHOLD};

/// Which side of the field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Local player, defending the left goal
    Player,
    /// Opponent, defending the right goal
    Opponent,
}

impl Side {
    /// Goal label
    pub fn label(&self) -> &'static str {
        match self {
            Side::Player => "You",
            Side::Opponent => "Opponent",
        }
    }

    pub fn win_message(&self) -> &'static str {
        match self {
            Side::Player => "You win!",
            Side::Opponent => "Opponent wins!",
        }
    }
}

/// Playing field, sized from the drawing surface at load
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub width: f32,
    pub height: f32,
}

impl Field {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// The ball. Radius and height are fixed once created.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    pos: Vec2,
    vel_x: f32,
    radius: f32,
}

impl Ball {
    fn at(pos: Vec2) -> Self {
        Self {
            pos,
            vel_x: 0.0,
            radius: BALL_RADIUS,
        }
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    /// Horizontal displacement applied on the last advance
    pub fn vel_x(&self) -> f32 {
        self.vel_x
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }
}

/// Goal counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub player: u32,
    pub opponent: u32,
}

impl Score {
    pub fn of(&self, side: Side) -> u32 {
        match side {
            Side::Player => self.player,
            Side::Opponent => self.opponent,
        }
    }

    fn award(&mut self, side: Side) {
        match side {
            Side::Player => self.player += 1,
            Side::Opponent => self.opponent += 1,
        }
    }

    /// Side that has reached `threshold`, if any
    pub fn winner(&self, threshold: u32) -> Option<Side> {
        if self.player >= threshold {
            Some(Side::Player)
        } else if self.opponent >= threshold {
            Some(Side::Opponent)
        } else {
            None
        }
    }
}

/// A goal produced by one advance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoalEvent {
    pub scorer: Side,
    /// Set when this goal ended the match
    pub winner: Option<Side>,
}

/// Owns the ball and the score
#[derive(Debug, Clone)]
pub struct BallPhysics {
    field: Field,
    ball: Ball,
    score: Score,
}

impl BallPhysics {
    pub fn new(field: Field) -> Self {
        Self {
            field,
            ball: Ball::at(field.center()),
            score: Score::default(),
        }
    }

    pub fn field(&self) -> Field {
        self.field
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    pub fn score(&self) -> Score {
        self.score
    }

    /// Move the ball by `delta` and resolve goal-line crossings.
    ///
    /// On a goal the scorer is credited and the ball returns to center. The
    /// caller is responsible for clearing the tracking baseline.
    pub fn advance(&mut self, delta: f32) -> Option<GoalEvent> {
        self.ball.vel_x = delta;
        self.ball.pos.x += delta;

        let left = self.ball.pos.x - self.ball.radius < 0.0;
        let right = self.ball.pos.x + self.ball.radius > self.field.width;

        let scorer = match (left, right) {
            (true, true) => {
                // Field narrower than the ball; count only the left goal
                log::warn!(
                    "Ball overlaps both goals (field width {}), ignoring right goal",
                    self.field.width
                );
                Side::Opponent
            }
            (true, false) => Side::Opponent,
            (false, true) => Side::Player,
            (false, false) => return None,
        };

        self.score.award(scorer);
        self.reset_position();

        Some(GoalEvent {
            scorer,
            winner: self.score.winner(WIN_THRESHOLD),
        })
    }

    /// Put the ball back at the center of the field, at rest
    pub fn reset_position(&mut self) {
        self.ball.pos = self.field.center();
        self.ball.vel_x = 0.0;
    }

    /// Zero both counters (replay only)
    pub fn reset_score(&mut self) {
        self.score = Score::default();
    }
}
