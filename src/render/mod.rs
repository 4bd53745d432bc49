//! Draw requests for an external renderer
//!
//! The core never touches pixels. Each frame it emits polylines and ellipses
//! in normalized coordinates (`[0, 1]` across the playfield) into a
//! [`RenderSink`]; the renderer maps those to its own surface.

pub mod draw;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::PLAYFIELD;

pub use draw::draw_frame;

/// RGBA color, components in `[0, 1]`
pub type Color = [f32; 4];

pub const WHITE: Color = [1.0, 1.0, 1.0, 1.0];
pub const AMBER: Color = [1.0, 0.7, 0.2, 1.0];
pub const DEBUG_GREEN: Color = [0.2, 1.0, 0.3, 0.6];
pub const DEBUG_RED: Color = [1.0, 0.25, 0.25, 0.6];

/// Line style for a draw call
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: Color,
    /// Line width in normalized units
    pub width: f32,
}

impl Stroke {
    pub const fn new(color: Color, width: f32) -> Self {
        Self { color, width }
    }
}

/// Output surface the core draws into
pub trait RenderSink {
    /// Wipe the surface before a frame
    fn clear(&mut self);

    /// Open (`closed = false`) or closed polyline through `points`
    fn polyline(&mut self, points: &[Vec2], closed: bool, stroke: Stroke);

    /// Axis-aligned ellipse
    fn ellipse(&mut self, center: Vec2, radii: Vec2, stroke: Stroke);
}

/// A recorded draw call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    Clear,
    Polyline {
        points: Vec<Vec2>,
        closed: bool,
        stroke: Stroke,
    },
    Ellipse {
        center: Vec2,
        radii: Vec2,
        stroke: Stroke,
    },
}

/// Sink that records every call, for headless runs and tests
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn polylines(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Polyline { .. }))
            .count()
    }

    pub fn ellipses(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Ellipse { .. }))
            .count()
    }
}

impl RenderSink for DrawList {
    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
    }

    fn polyline(&mut self, points: &[Vec2], closed: bool, stroke: Stroke) {
        self.commands.push(DrawCommand::Polyline {
            points: points.to_vec(),
            closed,
            stroke,
        });
    }

    fn ellipse(&mut self, center: Vec2, radii: Vec2, stroke: Stroke) {
        self.commands.push(DrawCommand::Ellipse {
            center,
            radii,
            stroke,
        });
    }
}

/// Playfield units to normalized coordinates
#[inline]
pub fn to_screen(p: Vec2) -> Vec2 {
    p / PLAYFIELD
}

/// Playfield length to normalized length
#[inline]
pub fn to_screen_len(len: f32) -> f32 {
    len / PLAYFIELD
}
