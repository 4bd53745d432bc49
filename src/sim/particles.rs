//! Visual-only particle effects
//!
//! Effects never touch gameplay state. Each one knows how to advance itself
//! by one rendered frame and how to draw itself; the [`ParticleSystem`] pulls
//! the next state of every live effect once per frame, draws the ones still
//! running and retires the rest into a free list for reuse.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::FRAME_DT;
use crate::error::SimError;
use crate::render::{Color, RenderSink, Stroke, to_screen, to_screen_len};

/// Outcome of advancing an effect by one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Live,
    Done,
}

/// A line segment spinning about a pivot while it drifts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RotatingSegment {
    pub a: Vec2,
    pub b: Vec2,
    /// Rotation center, carried along with the segment
    pub pivot: Vec2,
    /// Radians per second
    pub angular_vel: f32,
    /// Units per second
    pub vel: Vec2,
    /// Frames left; the effect is still drawn on the frame this reaches zero
    pub frames_left: i32,
    pub color: Color,
}

impl RotatingSegment {
    fn advance(&mut self) -> Advance {
        if self.frames_left < 0 {
            return Advance::Done;
        }
        let spin = Vec2::from_angle(self.angular_vel * FRAME_DT);
        let shift = self.vel * FRAME_DT;
        self.a = self.pivot + spin.rotate(self.a - self.pivot) + shift;
        self.b = self.pivot + spin.rotate(self.b - self.pivot) + shift;
        self.pivot += shift;
        self.frames_left -= 1;
        Advance::Live
    }

    fn render(&self, sink: &mut dyn RenderSink) {
        sink.polyline(
            &[to_screen(self.a), to_screen(self.b)],
            false,
            Stroke::new(self.color, to_screen_len(0.3)),
        );
    }
}

/// The closed set of effect variants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Effect {
    Segment(RotatingSegment),
}

impl Effect {
    pub fn kind(&self) -> EffectKind {
        match self {
            Effect::Segment(_) => EffectKind::Segment,
        }
    }

    /// Step to the next frame's state
    pub fn advance(&mut self) -> Advance {
        match self {
            Effect::Segment(segment) => segment.advance(),
        }
    }

    pub fn render(&self, sink: &mut dyn RenderSink) {
        match self {
            Effect::Segment(segment) => segment.render(sink),
        }
    }
}

/// Effect variant tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectKind {
    Segment,
}

impl EffectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EffectKind::Segment => "segment",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "segment" | "rotating_segment" => Some(EffectKind::Segment),
            _ => None,
        }
    }

    /// Build this kind of effect from request parameters
    pub fn build(self, params: EffectParams) -> Effect {
        match self {
            EffectKind::Segment => Effect::Segment(RotatingSegment {
                a: params.a,
                b: params.b,
                pivot: (params.a + params.b) / 2.0,
                angular_vel: params.angular_vel,
                vel: params.vel,
                frames_left: params.frames_left,
                color: params.color,
            }),
        }
    }
}

/// What an effect request carries; each kind reads the fields it needs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectParams {
    pub a: Vec2,
    pub b: Vec2,
    /// Radians per second
    pub angular_vel: f32,
    /// Units per second
    pub vel: Vec2,
    pub frames_left: i32,
    pub color: Color,
}

/// Pool of live effects.
///
/// Slots are index-stable: a finished effect leaves a hole that the next
/// insert fills, so inserts and retirements are O(1) and nothing shifts.
#[derive(Debug, Clone, Default)]
pub struct ParticleSystem {
    slots: Vec<Option<Effect>>,
    free: Vec<usize>,
    live: usize,
    /// Log rejected requests
    debug: bool,
}

impl ParticleSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an effect; returns its slot
    pub fn insert(&mut self, effect: Effect) -> usize {
        self.live += 1;
        match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(effect);
                slot
            }
            None => {
                self.slots.push(Some(effect));
                self.slots.len() - 1
            }
        }
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Create an effect of the named kind from `params`.
    ///
    /// An unknown kind is rejected and nothing is inserted.
    pub fn create(&mut self, kind: &str, params: EffectParams) -> Result<usize, SimError> {
        match EffectKind::from_name(kind) {
            Some(kind) => Ok(self.insert(kind.build(params))),
            None => {
                let err = SimError::UnknownEffect(kind.to_string());
                if self.debug {
                    log::debug!("effect dropped: {}", err);
                }
                Err(err)
            }
        }
    }

    /// Advance every effect one frame, draw the live ones, retire the finished ones
    pub fn draw_all(&mut self, sink: &mut dyn RenderSink) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            let Some(effect) = slot else {
                continue;
            };
            match effect.advance() {
                Advance::Live => effect.render(sink),
                Advance::Done => {
                    *slot = None;
                    self.free.push(index);
                    self.live -= 1;
                }
            }
        }
    }

    /// Number of live effects
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &Effect> {
        self.slots.iter().flatten()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.live = 0;
    }
}
