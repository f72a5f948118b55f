//! Drawing surfaces.
//!
//! [`Surface`] is the slice of an immediate-mode 2D canvas the network
//! draws with. Implementations:
//!
//! - [`RecordingSurface`] keeps the command stream for inspection.
//! - `RasterSurface` (feature `raster`) rasterizes into an RGBA image for
//!   headless snapshots.
//! - The browser binding forwards each call to a `CanvasRenderingContext2d`.

#[cfg(feature = "raster")]
mod raster;
mod recording;

#[cfg(feature = "raster")]
pub use raster::RasterSurface;
pub use recording::{DrawCommand, RecordingSurface};

use glam::Vec2;

use crate::visuals::Color;

/// Stroke style for a line segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    /// Line color.
    pub color: Color,
    /// Line width in logical pixels.
    pub width: f32,
    /// Global alpha applied to the line.
    pub alpha: f32,
}

/// Fill style for a glyph.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphPaint<'a> {
    /// Text to draw, centered on the position horizontally and vertically.
    pub text: &'a str,
    /// Font size in logical pixels.
    pub font_size: f32,
    /// CSS font family.
    pub font_family: &'a str,
    /// Fill color.
    pub color: Color,
    /// Global alpha applied to the glyph.
    pub alpha: f32,
}

impl GlyphPaint<'_> {
    /// CSS font shorthand, e.g. `bold 18px serif`.
    pub fn css_font(&self) -> String {
        format!("bold {}px {}", self.font_size, self.font_family)
    }
}

/// Shadow applied to subsequent glyph fills.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    /// Blur radius; zero disables the shadow.
    pub blur: f32,
    /// Shadow color.
    pub color: Color,
}

impl Shadow {
    /// No shadow, the state every glyph pass must leave behind.
    pub const NONE: Shadow = Shadow {
        blur: 0.0,
        color: Color::BLACK,
    };
}

/// An immediate-mode 2D drawing target.
pub trait Surface {
    /// Current size in logical pixels.
    fn size(&self) -> Vec2;

    /// Match a new container size. Existing pixels may be discarded.
    fn resize(&mut self, size: Vec2);

    /// Clear the whole surface, then paint `background` if given.
    fn clear(&mut self, background: Option<Color>);

    /// Stroke a straight segment.
    fn stroke_line(&mut self, from: Vec2, to: Vec2, stroke: &Stroke);

    /// Set the shadow used by later [`Surface::fill_glyph`] calls.
    fn set_shadow(&mut self, shadow: Shadow);

    /// Fill a glyph centered at `at`.
    fn fill_glyph(&mut self, at: Vec2, paint: &GlyphPaint<'_>);
}

impl<S: Surface + ?Sized> Surface for Box<S> {
    fn size(&self) -> Vec2 {
        (**self).size()
    }

    fn resize(&mut self, size: Vec2) {
        (**self).resize(size);
    }

    fn clear(&mut self, background: Option<Color>) {
        (**self).clear(background);
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, stroke: &Stroke) {
        (**self).stroke_line(from, to, stroke);
    }

    fn set_shadow(&mut self, shadow: Shadow) {
        (**self).set_shadow(shadow);
    }

    fn fill_glyph(&mut self, at: Vec2, paint: &GlyphPaint<'_>) {
        (**self).fill_glyph(at, paint);
    }
}

/// Clamp a host-reported size to something drawable: finite and non-negative.
#[inline]
pub fn sanitize_size(size: Vec2) -> Vec2 {
    let clean = |v: f32| if v.is_finite() { v.max(0.0) } else { 0.0 };
    Vec2::new(clean(size.x), clean(size.y))
}
