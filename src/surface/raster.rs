use std::path::Path;

use glam::Vec2;
use image::{Rgba, RgbaImage};

use super::{sanitize_size, GlyphPaint, Shadow, Stroke, Surface};
use crate::error::NetworkError;
use crate::visuals::Color;

/// Software surface backed by an RGBA image.
///
/// There is no font rasterizer here: a glyph is approximated by a disc a
/// third of its font size across, and its shadow by a halo fading out over
/// the blur radius. That is enough to preview layout, density, links and
/// glow strength of a configuration without a browser.
pub struct RasterSurface {
    image: RgbaImage,
    shadow: Shadow,
}

impl RasterSurface {
    /// Create a transparent surface. Sizes are rounded up to whole pixels.
    pub fn new(size: Vec2) -> Self {
        let (w, h) = pixel_dims(size);
        Self {
            image: RgbaImage::new(w, h),
            shadow: Shadow::NONE,
        }
    }

    /// The rendered pixels.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Write the current pixels to a PNG file.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), NetworkError> {
        self.image.save(path)?;
        Ok(())
    }

    /// Source-over blend of `color` at `alpha` into one pixel.
    fn blend(&mut self, x: i64, y: i64, color: Color, alpha: f32) {
        if alpha <= 0.0 || x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as u32, y as u32);
        if x >= self.image.width() || y >= self.image.height() {
            return;
        }

        let a = alpha.min(1.0);
        let src = color.to_unit();
        let dst = self.image.get_pixel_mut(x, y);
        let dst_a = f32::from(dst[3]) / 255.0;
        let out_a = a + dst_a * (1.0 - a);
        if out_a <= 0.0 {
            return;
        }

        let mut out = [0u8; 4];
        for c in 0..3 {
            let d = f32::from(dst[c]) / 255.0;
            let v = (src[c] * a + d * dst_a * (1.0 - a)) / out_a;
            out[c] = to_byte(v);
        }
        out[3] = to_byte(out_a);
        *dst = Rgba(out);
    }

    /// Fill a disc with soft edges, optionally with a fading rim out to `fade`.
    fn disc(&mut self, center: Vec2, radius: f32, fade: f32, color: Color, alpha: f32) {
        let reach = radius + fade + 1.0;
        let (x0, y0) = ((center.x - reach).floor() as i64, (center.y - reach).floor() as i64);
        let (x1, y1) = ((center.x + reach).ceil() as i64, (center.y + reach).ceil() as i64);

        for y in y0..=y1 {
            for x in x0..=x1 {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let d = p.distance(center);
                let coverage = if fade > 0.0 {
                    let t = ((d - radius) / fade).clamp(0.0, 1.0);
                    (1.0 - t) * (1.0 - t)
                } else {
                    (radius + 0.5 - d).clamp(0.0, 1.0)
                };
                self.blend(x, y, color, alpha * coverage);
            }
        }
    }
}

impl Surface for RasterSurface {
    fn size(&self) -> Vec2 {
        Vec2::new(self.image.width() as f32, self.image.height() as f32)
    }

    fn resize(&mut self, size: Vec2) {
        let (w, h) = pixel_dims(size);
        if (w, h) != self.image.dimensions() {
            self.image = RgbaImage::new(w, h);
        }
    }

    fn clear(&mut self, background: Option<Color>) {
        let fill = match background {
            Some(c) => Rgba([c.r, c.g, c.b, 255]),
            None => Rgba([0, 0, 0, 0]),
        };
        for pixel in self.image.pixels_mut() {
            *pixel = fill;
        }
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, stroke: &Stroke) {
        let half = stroke.width.max(0.0) * 0.5;
        let reach = half + 1.0;
        let (x0, y0) = (
            (from.x.min(to.x) - reach).floor() as i64,
            (from.y.min(to.y) - reach).floor() as i64,
        );
        let (x1, y1) = (
            (from.x.max(to.x) + reach).ceil() as i64,
            (from.y.max(to.y) + reach).ceil() as i64,
        );

        for y in y0..=y1 {
            for x in x0..=x1 {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let coverage = (half + 0.5 - distance_to_segment(p, from, to)).clamp(0.0, 1.0);
                self.blend(x, y, stroke.color, stroke.alpha * coverage);
            }
        }
    }

    fn set_shadow(&mut self, shadow: Shadow) {
        self.shadow = shadow;
    }

    fn fill_glyph(&mut self, at: Vec2, paint: &GlyphPaint<'_>) {
        let radius = paint.font_size.max(0.0) / 3.0;
        if self.shadow.blur > 0.0 {
            let halo = self.shadow;
            self.disc(at, radius, halo.blur, halo.color, paint.alpha * 0.5);
        }
        self.disc(at, radius, 0.0, paint.color, paint.alpha);
    }
}

fn pixel_dims(size: Vec2) -> (u32, u32) {
    let size = sanitize_size(size);
    (size.x.ceil() as u32, size.y.ceil() as u32)
}

#[inline]
fn to_byte(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn distance_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paint(color: Color) -> GlyphPaint<'static> {
        GlyphPaint {
            text: "π",
            font_size: 18.0,
            font_family: "serif",
            color,
            alpha: 1.0,
        }
    }

    #[test]
    fn test_clear_with_background() {
        let mut surface = RasterSurface::new(Vec2::new(4.0, 3.0));
        surface.clear(Some(Color::WHITE));
        assert!(surface.image().pixels().all(|p| *p == Rgba([255, 255, 255, 255])));
        surface.clear(None);
        assert!(surface.image().pixels().all(|p| p[3] == 0));
    }

    #[test]
    fn test_line_covers_its_path_only() {
        let mut surface = RasterSurface::new(Vec2::new(20.0, 20.0));
        surface.clear(Some(Color::WHITE));
        let stroke = Stroke {
            color: Color::BLACK,
            width: 2.0,
            alpha: 1.0,
        };
        surface.stroke_line(Vec2::new(2.0, 10.0), Vec2::new(18.0, 10.0), &stroke);

        assert!(surface.image().get_pixel(10, 9)[0] < 128);
        assert_eq!(surface.image().get_pixel(10, 2)[0], 255);
    }

    #[test]
    fn test_glyph_disc_and_halo() {
        let mut surface = RasterSurface::new(Vec2::new(40.0, 40.0));
        surface.clear(Some(Color::WHITE));
        surface.set_shadow(Shadow {
            blur: 8.0,
            color: Color::rgb(255, 0, 0),
        });
        surface.fill_glyph(Vec2::new(20.0, 20.0), &paint(Color::BLACK));

        // Center is the glyph color, the rim picks up the red halo.
        assert_eq!(surface.image().get_pixel(20, 20)[0], 0);
        let rim = surface.image().get_pixel(20, 28);
        assert!(rim[0] > rim[1]);
    }

    #[test]
    fn test_out_of_bounds_drawing_is_ignored() {
        let mut surface = RasterSurface::new(Vec2::new(8.0, 8.0));
        surface.fill_glyph(Vec2::new(-50.0, -50.0), &paint(Color::BLACK));
        assert!(surface.image().pixels().all(|p| p[3] == 0));
    }

    #[test]
    fn test_zero_size_is_harmless() {
        let mut surface = RasterSurface::new(Vec2::ZERO);
        surface.clear(None);
        surface.fill_glyph(Vec2::ZERO, &paint(Color::BLACK));
        assert_eq!(surface.size(), Vec2::ZERO);
    }

    #[test]
    fn test_resize_reallocates() {
        let mut surface = RasterSurface::new(Vec2::new(8.0, 8.0));
        surface.resize(Vec2::new(16.5, 4.0));
        assert_eq!(surface.image().dimensions(), (17, 4));
    }
}
