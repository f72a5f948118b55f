use glam::Vec2;

use super::{sanitize_size, GlyphPaint, Shadow, Stroke, Surface};
use crate::visuals::Color;

/// One call made against a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// The surface was resized.
    Resize(Vec2),
    /// The surface was cleared.
    Clear(Option<Color>),
    /// A line was stroked.
    Line {
        /// Start point.
        from: Vec2,
        /// End point.
        to: Vec2,
        /// Style used.
        stroke: Stroke,
    },
    /// The shadow state changed.
    Shadow(Shadow),
    /// A glyph was filled.
    Glyph {
        /// Center point.
        at: Vec2,
        /// Text drawn.
        text: String,
        /// Font size.
        font_size: f32,
        /// Fill color.
        color: Color,
        /// Alpha.
        alpha: f32,
        /// Shadow active while filling.
        shadow: Shadow,
    },
}

/// A surface that records what is drawn on it.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    size: Vec2,
    shadow: Shadow,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    /// Create an empty recording of the given size.
    pub fn new(size: Vec2) -> Self {
        Self {
            size: sanitize_size(size),
            shadow: Shadow::NONE,
            commands: Vec::new(),
        }
    }

    /// Everything drawn since creation or the last [`take`](Self::take).
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drain the recorded commands.
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Recorded line strokes.
    pub fn lines(&self) -> impl Iterator<Item = (Vec2, Vec2, &Stroke)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Line { from, to, stroke } => Some((*from, *to, stroke)),
            _ => None,
        })
    }

    /// Number of recorded glyph fills.
    pub fn glyph_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Glyph { .. }))
            .count()
    }

    /// Shadow state currently in effect.
    pub fn shadow(&self) -> Shadow {
        self.shadow
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn resize(&mut self, size: Vec2) {
        self.size = sanitize_size(size);
        self.commands.push(DrawCommand::Resize(self.size));
    }

    fn clear(&mut self, background: Option<Color>) {
        self.commands.push(DrawCommand::Clear(background));
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, stroke: &Stroke) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            stroke: *stroke,
        });
    }

    fn set_shadow(&mut self, shadow: Shadow) {
        self.shadow = shadow;
        self.commands.push(DrawCommand::Shadow(shadow));
    }

    fn fill_glyph(&mut self, at: Vec2, paint: &GlyphPaint<'_>) {
        self.commands.push(DrawCommand::Glyph {
            at,
            text: paint.text.to_string(),
            font_size: paint.font_size,
            color: paint.color,
            alpha: paint.alpha,
            shadow: self.shadow,
        });
    }
}
