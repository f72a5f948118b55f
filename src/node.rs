//! Nodes of the ambient network and their per-frame motion.

use glam::Vec2;

use crate::config::{AnchorConfig, NetworkConfig};
use crate::spawn::{RandomSource, SpawnContext};
use crate::visuals::Color;

/// How a node behaves each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRole {
    /// Drifts with its velocity and reflects off the surface edges.
    Mobile,
    /// Pinned to the surface center.
    Anchor,
}

/// A labeled point drawn on the surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Current position in logical pixels.
    pub position: Vec2,
    /// Displacement per frame.
    pub velocity: Vec2,
    /// Glyph drawn at the position.
    pub glyph: String,
    /// Glyph color.
    pub color: Color,
    /// Glyph opacity, fixed for the node's lifetime.
    pub opacity: f32,
    /// Glyph font size, fixed for the node's lifetime.
    pub font_size: f32,
    /// Mobile or anchor.
    pub role: NodeRole,
}

impl Node {
    /// Spawn a mobile node from the config's ranges.
    ///
    /// The config must have passed [`NetworkConfig::validate`]; the glyph and
    /// palette lookups fall back to defaults rather than panic otherwise.
    pub fn spawn<R: RandomSource + ?Sized>(ctx: &mut SpawnContext<'_, R>, config: &NetworkConfig) -> Self {
        let position = ctx.random_in_bounds();
        let velocity = ctx.random_velocity(config.speed);
        let glyph = ctx.pick(&config.glyphs).cloned().unwrap_or_default();
        let color = ctx.pick(&config.palette).copied().unwrap_or(Color::BLACK);
        let opacity = config.opacity.lerp(ctx.random());
        let font_size = config.font_size.lerp(ctx.random());

        Self {
            position,
            velocity,
            glyph,
            color,
            opacity,
            font_size,
            role: NodeRole::Mobile,
        }
    }

    /// Create the anchor node at `center`.
    pub fn anchor(anchor: &AnchorConfig, center: Vec2) -> Self {
        Self {
            position: center,
            velocity: Vec2::ZERO,
            glyph: anchor.glyph.clone(),
            color: anchor.color,
            opacity: anchor.opacity,
            font_size: anchor.font_size,
            role: NodeRole::Anchor,
        }
    }

    /// Whether this node moves.
    #[inline]
    pub fn is_mobile(&self) -> bool {
        self.role == NodeRole::Mobile
    }

    /// Advance one frame inside a `bounds`-sized surface.
    ///
    /// Mobile nodes move by their velocity. On each axis where the new
    /// coordinate is at or past either edge the velocity component is
    /// negated and the coordinate clamped back onto the edge. The anchor
    /// ignores its velocity and snaps to the center.
    pub fn advance(&mut self, bounds: Vec2) {
        match self.role {
            NodeRole::Anchor => self.position = bounds * 0.5,
            NodeRole::Mobile => {
                self.position += self.velocity;
                let (x, vx) = reflect(self.position.x, self.velocity.x, bounds.x);
                let (y, vy) = reflect(self.position.y, self.velocity.y, bounds.y);
                self.position = Vec2::new(x, y);
                self.velocity = Vec2::new(vx, vy);
            }
        }
    }
}

/// Bounce a single axis off `[0, extent]`.
#[inline]
fn reflect(coord: f32, velocity: f32, extent: f32) -> (f32, f32) {
    let extent = extent.max(0.0);
    if coord <= 0.0 || coord >= extent {
        (coord.clamp(0.0, extent), -velocity)
    } else {
        (coord, velocity)
    }
}
