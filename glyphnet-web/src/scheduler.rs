//! `requestAnimationFrame` as a frame scheduler.

use std::cell::RefCell;
use std::rc::Rc;

use glyphnet::FrameScheduler;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::Window;

/// Shared slot holding the animation frame callback.
pub type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Requests the callback in a [`FrameCallback`] slot before each repaint.
///
/// The slot is filled by whoever owns the frame loop; an empty slot turns
/// requests into no-ops.
pub struct AnimationFrameScheduler {
    window: Window,
    callback: FrameCallback,
    handle: Option<i32>,
}

impl AnimationFrameScheduler {
    /// Schedule the callback in `callback` on `window`.
    pub fn new(window: Window, callback: FrameCallback) -> Self {
        Self {
            window,
            callback,
            handle: None,
        }
    }
}

impl FrameScheduler for AnimationFrameScheduler {
    fn request_frame(&mut self) {
        let slot = self.callback.borrow();
        let Some(callback) = slot.as_ref() else {
            return;
        };
        self.handle = match self.window.request_animation_frame(callback.as_ref().unchecked_ref()) {
            Ok(id) => Some(id),
            Err(err) => {
                log::debug!("requestAnimationFrame failed: {err:?}");
                None
            }
        };
    }

    fn cancel_frame(&mut self) {
        if let Some(id) = self.handle.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
    }
}
