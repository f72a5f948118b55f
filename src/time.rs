//! Frame timing.
//!
//! The browser hands every animation frame callback a high-resolution
//! timestamp in milliseconds; [`FrameClock`] turns that stream into frame
//! counts, deltas and a periodically refreshed FPS figure. Timestamps come
//! from the caller rather than `std::time::Instant`, which does not exist
//! on `wasm32-unknown-unknown`, so the clock behaves the same in the browser,
//! the snapshot CLI and tests.
//!
//! ```ignore
//! use glyphnet::time::FrameClock;
//!
//! let mut clock = FrameClock::new();
//! clock.tick(16.7);
//! clock.tick(33.4);
//! assert_eq!(clock.frame(), 2);
//! ```

/// How often the FPS figure is recomputed, in milliseconds.
const FPS_UPDATE_INTERVAL_MS: f64 = 500.0;

/// Frame timing fed by external timestamps.
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Timestamp of the first frame.
    start_ms: Option<f64>,
    /// Timestamp of the latest frame.
    last_ms: Option<f64>,
    /// Milliseconds between the two latest frames.
    delta_ms: f64,
    /// Frames ticked so far.
    frame_count: u64,
    /// Last computed frames per second.
    fps: f32,
    /// Frame count at the last FPS update.
    fps_frame_count: u64,
    /// Timestamp of the last FPS update.
    fps_update_ms: f64,
}

impl FrameClock {
    /// Create a clock that has seen no frames.
    pub fn new() -> Self {
        Self {
            start_ms: None,
            last_ms: None,
            delta_ms: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_ms: 0.0,
        }
    }

    /// Record a frame at `now_ms`. Returns `true` when the FPS figure was
    /// just refreshed.
    ///
    /// Timestamps that run backwards are treated as a zero-length frame.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        let start = *self.start_ms.get_or_insert(now_ms);
        if self.frame_count == 0 {
            // The first frame opens the measurement window.
            self.fps_update_ms = start;
            self.fps_frame_count = 1;
        }

        self.delta_ms = match self.last_ms {
            Some(last) => (now_ms - last).max(0.0),
            None => 0.0,
        };
        self.last_ms = Some(now_ms.max(self.last_ms.unwrap_or(now_ms)));
        self.frame_count += 1;

        let since_update = now_ms - self.fps_update_ms;
        if since_update >= FPS_UPDATE_INTERVAL_MS {
            let frames = self.frame_count - self.fps_frame_count;
            self.fps = (frames as f64 * 1000.0 / since_update) as f32;
            self.fps_frame_count = self.frame_count;
            self.fps_update_ms = now_ms;
            return true;
        }
        false
    }

    /// Frames ticked so far.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Milliseconds between the two latest frames.
    #[inline]
    pub fn delta_ms(&self) -> f64 {
        self.delta_ms
    }

    /// Milliseconds between the first and the latest frame.
    #[inline]
    pub fn elapsed_ms(&self) -> f64 {
        match (self.start_ms, self.last_ms) {
            (Some(start), Some(last)) => last - start,
            _ => 0.0,
        }
    }

    /// Frames per second over the last measurement window.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Forget every frame seen so far.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_new() {
        let clock = FrameClock::new();
        assert_eq!(clock.frame(), 0);
        assert_eq!(clock.elapsed_ms(), 0.0);
        assert_eq!(clock.fps(), 0.0);
    }

    #[test]
    fn test_clock_delta_and_elapsed() {
        let mut clock = FrameClock::new();
        clock.tick(1000.0);
        assert_eq!(clock.delta_ms(), 0.0);
        clock.tick(1016.0);
        assert_eq!(clock.delta_ms(), 16.0);
        assert_eq!(clock.elapsed_ms(), 16.0);
        assert_eq!(clock.frame(), 2);
    }

    #[test]
    fn test_clock_fps_at_sixty_hz() {
        let mut clock = FrameClock::new();
        let mut refreshed = false;
        for i in 0..=60 {
            refreshed |= clock.tick(f64::from(i) * 1000.0 / 60.0);
        }
        assert!(refreshed);
        assert!((clock.fps() - 60.0).abs() < 1.0, "fps = {}", clock.fps());
    }

    #[test]
    fn test_clock_backwards_timestamp() {
        let mut clock = FrameClock::new();
        clock.tick(100.0);
        clock.tick(50.0);
        assert_eq!(clock.delta_ms(), 0.0);
        assert_eq!(clock.frame(), 2);
    }

    #[test]
    fn test_clock_reset() {
        let mut clock = FrameClock::new();
        clock.tick(0.0);
        clock.tick(16.0);
        clock.reset();
        assert_eq!(clock.frame(), 0);
    }
}
