//! Scene generation for the 2D field
//!
//! Turns a snapshot into an ordered list of draw commands. Pure; the canvas
//! backend executes the list.

use std::f32::consts::FRAC_PI_2;

use glam::Vec2;

use crate::consts::{GOAL_DEPTH, GOAL_HEIGHT};
use crate::sim::{Field, Overlay, Side, Snapshot};

pub const LABEL_FONT_PX: f32 = 24.0;
pub const SCORE_FONT_PX: f32 = 24.0;
pub const GOAL_FONT_PX: f32 = 48.0;
pub const FONT_FAMILY: &str = "Arial";

/// Horizontal text alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn as_css(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

/// Text drawn in a translated and rotated frame
#[derive(Debug, Clone, PartialEq)]
pub struct TextCmd {
    pub text: String,
    /// Origin of the rotated frame
    pub anchor: Vec2,
    /// Text position inside the rotated frame
    pub offset: Vec2,
    /// Radians, clockwise on screen
    pub rotation: f32,
    pub font_px: f32,
    pub color: &'static str,
    pub align: TextAlign,
    /// Vertically center on the position instead of the alphabetic baseline
    pub middle: bool,
}

impl TextCmd {
    pub fn font(&self) -> String {
        format!("{}px {}", self.font_px, FONT_FAMILY)
    }
}

/// One drawing operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Clear { width: f32, height: f32 },
    FillRect { origin: Vec2, size: Vec2, color: &'static str },
    Text(TextCmd),
    /// Football sprite (or a plain disc until the image is loaded)
    Ball { center: Vec2, radius: f32 },
}

/// Build the draw list for one frame
pub fn build_scene(snapshot: &Snapshot) -> Vec<DrawCmd> {
    let field = snapshot.field;
    let mut cmds = vec![DrawCmd::Clear {
        width: field.width,
        height: field.height,
    }];
    if snapshot.cleared {
        return cmds;
    }

    push_goals(&mut cmds, field);
    cmds.push(DrawCmd::Ball {
        center: snapshot.ball_pos,
        radius: snapshot.ball_radius,
    });
    cmds.push(DrawCmd::Text(TextCmd {
        text: scoreboard_text(snapshot),
        anchor: Vec2::ZERO,
        offset: Vec2::new(field.width - 10.0, 40.0),
        rotation: 0.0,
        font_px: SCORE_FONT_PX,
        color: "white",
        align: TextAlign::Right,
        middle: false,
    }));

    if snapshot.overlay == Overlay::Goal {
        cmds.push(DrawCmd::Text(TextCmd {
            text: "GOAL!".to_string(),
            anchor: Vec2::ZERO,
            offset: field.center(),
            rotation: 0.0,
            font_px: GOAL_FONT_PX,
            color: "yellow",
            align: TextAlign::Center,
            middle: true,
        }));
    }

    cmds
}

pub fn scoreboard_text(snapshot: &Snapshot) -> String {
    format!(
        "{}: {} - {}: {}",
        Side::Player.label(),
        snapshot.score.player,
        Side::Opponent.label(),
        snapshot.score.opponent
    )
}

/// Goal bars on both side walls, with their labels reading along the wall
fn push_goals(cmds: &mut Vec<DrawCmd>, field: Field) {
    let mid_y = field.height / 2.0;
    let size = Vec2::new(GOAL_DEPTH, GOAL_HEIGHT);

    // Opponent goal on the right wall
    cmds.push(DrawCmd::FillRect {
        origin: Vec2::new(field.width - GOAL_DEPTH, mid_y - GOAL_HEIGHT / 2.0),
        size,
        color: "white",
    });
    cmds.push(DrawCmd::Text(goal_label(
        Side::Opponent,
        Vec2::new(field.width - GOAL_DEPTH / 2.0, mid_y),
        FRAC_PI_2,
        Vec2::new(-50.0, 50.0),
    )));

    // Player goal on the left wall
    cmds.push(DrawCmd::FillRect {
        origin: Vec2::new(0.0, mid_y - GOAL_HEIGHT / 2.0),
        size,
        color: "white",
    });
    cmds.push(DrawCmd::Text(goal_label(
        Side::Player,
        Vec2::new(GOAL_DEPTH / 2.0, mid_y),
        -FRAC_PI_2,
        Vec2::new(-25.0, 50.0),
    )));
}

fn goal_label(side: Side, anchor: Vec2, rotation: f32, offset: Vec2) -> TextCmd {
    TextCmd {
        text: side.label().to_string(),
        anchor,
        offset,
        rotation,
        font_px: LABEL_FONT_PX,
        color: "white",
        align: TextAlign::Left,
        middle: false,
    }
}
