//! `CanvasRenderingContext2d` as a glyphnet surface.

use glam::Vec2;
use glyphnet::{sanitize_size, Color, GlyphPaint, Shadow, Stroke, Surface};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// A `<canvas>` element drawn through its 2D context.
///
/// Sizes are logical (CSS) pixels. With a pixel ratio above one the backing
/// store is enlarged and the context scaled, so glyphs stay sharp on HiDPI
/// screens while the network keeps working in CSS pixels.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    size: Vec2,
    pixel_ratio: f64,
}

impl CanvasSurface {
    /// Wrap a canvas and size it to `size` logical pixels.
    pub fn new(canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d, size: Vec2, pixel_ratio: f64) -> Self {
        let pixel_ratio = if pixel_ratio.is_finite() && pixel_ratio > 0.0 {
            pixel_ratio
        } else {
            1.0
        };
        let mut surface = Self {
            canvas,
            ctx,
            size: Vec2::ZERO,
            pixel_ratio,
        };
        surface.resize(size);
        surface
    }

    /// The underlying element.
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn resize(&mut self, size: Vec2) {
        self.size = sanitize_size(size);
        let ratio = self.pixel_ratio;
        self.canvas.set_width((f64::from(self.size.x) * ratio).round() as u32);
        self.canvas.set_height((f64::from(self.size.y) * ratio).round() as u32);

        let style = self.canvas.style();
        let _ = style.set_property("width", &format!("{}px", self.size.x));
        let _ = style.set_property("height", &format!("{}px", self.size.y));

        // Assigning width/height resets the context, transform included.
        let _ = self.ctx.set_transform(ratio, 0.0, 0.0, ratio, 0.0, 0.0);
    }

    fn clear(&mut self, background: Option<Color>) {
        let (w, h) = (f64::from(self.size.x), f64::from(self.size.y));
        self.ctx.clear_rect(0.0, 0.0, w, h);
        if let Some(color) = background {
            self.ctx.set_global_alpha(1.0);
            self.ctx.set_fill_style_str(&color.to_hex());
            self.ctx.fill_rect(0.0, 0.0, w, h);
        }
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, stroke: &Stroke) {
        self.ctx.set_global_alpha(f64::from(stroke.alpha));
        self.ctx.set_stroke_style_str(&stroke.color.to_hex());
        self.ctx.set_line_width(f64::from(stroke.width));
        self.ctx.begin_path();
        self.ctx.move_to(f64::from(from.x), f64::from(from.y));
        self.ctx.line_to(f64::from(to.x), f64::from(to.y));
        self.ctx.stroke();
        self.ctx.set_global_alpha(1.0);
    }

    fn set_shadow(&mut self, shadow: Shadow) {
        self.ctx.set_shadow_blur(f64::from(shadow.blur));
        self.ctx.set_shadow_color(&shadow.color.to_hex());
    }

    fn fill_glyph(&mut self, at: Vec2, paint: &GlyphPaint<'_>) {
        self.ctx.set_font(&paint.css_font());
        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("middle");
        self.ctx.set_fill_style_str(&paint.color.to_hex());
        self.ctx.set_global_alpha(f64::from(paint.alpha));
        let _ = self.ctx.fill_text(paint.text, f64::from(at.x), f64::from(at.y));
        self.ctx.set_global_alpha(1.0);
    }
}
