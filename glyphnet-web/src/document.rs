//! The browser document as a surface host.

use glam::Vec2;
use glyphnet::{NetworkError, SurfaceHost};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, HtmlElement, Window};

use crate::canvas::CanvasSurface;

/// Looks containers up by id and appends a canvas to them.
#[derive(Clone)]
pub struct DocumentHost {
    window: Window,
    document: Document,
    hidpi: bool,
}

impl DocumentHost {
    /// Host for the window's document. `None` outside a browser page.
    pub fn new(window: Window, hidpi: bool) -> Option<Self> {
        let document = window.document()?;
        Some(Self {
            window,
            document,
            hidpi,
        })
    }

    /// Make `container` the containing block of the absolutely placed
    /// canvas. Containers that already set a position are left alone.
    fn establish_containing_block(&self, container: &Element) {
        let position = self
            .window
            .get_computed_style(container)
            .ok()
            .flatten()
            .and_then(|style| style.get_property_value("position").ok())
            .unwrap_or_default();
        if !is_static_position(&position) {
            return;
        }
        if let Some(container) = container.dyn_ref::<HtmlElement>() {
            let _ = container.style().set_property("position", "relative");
        }
    }

    fn pixel_ratio(&self) -> f64 {
        if self.hidpi {
            self.window.device_pixel_ratio()
        } else {
            1.0
        }
    }
}

impl SurfaceHost for DocumentHost {
    type Surface = CanvasSurface;

    fn container_size(&self, container_id: &str) -> Option<Vec2> {
        let container = self.document.get_element_by_id(container_id)?;
        Some(Vec2::new(
            container.client_width() as f32,
            container.client_height() as f32,
        ))
    }

    fn create_surface(&mut self, container_id: &str, size: Vec2) -> Result<CanvasSurface, NetworkError> {
        let unavailable = |what: &str| NetworkError::ContextUnavailable(what.to_string());

        let container = self
            .document
            .get_element_by_id(container_id)
            .ok_or_else(|| NetworkError::ContainerNotFound(container_id.to_string()))?;

        let canvas: HtmlCanvasElement = self
            .document
            .create_element("canvas")
            .map_err(|e| unavailable(&format!("cannot create canvas: {e:?}")))?
            .dyn_into()
            .map_err(|_| unavailable("created element is not a canvas"))?;

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .ok_or_else(|| unavailable("2d context not supported"))?
            .dyn_into()
            .map_err(|_| unavailable("2d context has unexpected type"))?;

        // Decorative backdrop: fill the container, never catch input.
        let style = canvas.style();
        for (name, value) in [
            ("position", "absolute"),
            ("inset", "0"),
            ("display", "block"),
            ("pointer-events", "none"),
        ] {
            let _ = style.set_property(name, value);
        }
        let _ = canvas.set_attribute("aria-hidden", "true");

        self.establish_containing_block(&container);
        container
            .append_child(&canvas)
            .map_err(|e| unavailable(&format!("cannot attach canvas: {e:?}")))?;

        Ok(CanvasSurface::new(canvas, ctx, size, self.pixel_ratio()))
    }
}

/// Whether a computed CSS `position` leaves absolutely placed children
/// anchored to some ancestor instead of the element itself.
pub fn is_static_position(position: &str) -> bool {
    matches!(position.trim(), "" | "static")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_containers_need_positioning() {
        assert!(is_static_position("static"));
        assert!(is_static_position(""));
        assert!(is_static_position(" static "));
    }

    #[test]
    fn test_positioned_containers_are_kept() {
        for position in ["relative", "absolute", "fixed", "sticky"] {
            assert!(!is_static_position(position), "{position}");
        }
    }
}
