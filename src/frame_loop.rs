//! The repaint loop.
//!
//! A [`FrameLoop`] owns a network and a [`FrameScheduler`]. Starting it
//! requests one display-refresh callback; every callback runs one frame and
//! requests the next, so exactly one request is outstanding while the loop
//! runs. Stopping cancels the outstanding request and ignores any callback
//! that still arrives.
//!
//! ```ignore
//! let mut frames = FrameLoop::new(network, ManualScheduler::new());
//! frames.start();
//! while frames.scheduler_mut().take_pending() {
//!     frames.on_frame(now_ms);
//! }
//! ```

use glam::Vec2;

use crate::network::AmbientNetwork;
use crate::surface::Surface;
use crate::time::FrameClock;

/// Source of display-refresh callbacks.
///
/// Implementations arrange for [`FrameLoop::on_frame`] to be called once
/// per request, before the next repaint.
pub trait FrameScheduler {
    /// Ask for one callback before the next repaint.
    fn request_frame(&mut self);

    /// Withdraw the outstanding request, if any.
    fn cancel_frame(&mut self);
}

impl<T: FrameScheduler + ?Sized> FrameScheduler for &mut T {
    fn request_frame(&mut self) {
        (**self).request_frame();
    }

    fn cancel_frame(&mut self) {
        (**self).cancel_frame();
    }
}

/// A scheduler driven by hand, for tests and headless rendering.
#[derive(Debug, Default, Clone)]
pub struct ManualScheduler {
    pending: bool,
    requests: u64,
    cancels: u64,
}

impl ManualScheduler {
    /// Create a scheduler with nothing requested.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a callback is outstanding.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Consume the outstanding request. Returns `false` if none was pending.
    pub fn take_pending(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    /// Requests made so far.
    pub fn requests(&self) -> u64 {
        self.requests
    }

    /// Cancellations made so far.
    pub fn cancels(&self) -> u64 {
        self.cancels
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) {
        self.pending = true;
        self.requests += 1;
    }

    fn cancel_frame(&mut self) {
        self.pending = false;
        self.cancels += 1;
    }
}

/// Lifecycle of a [`FrameLoop`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Built but never started.
    Idle,
    /// A frame is always outstanding.
    Running,
    /// Stopped for good; callbacks are ignored.
    Stopped,
}

/// A cancellable repeat-every-frame task around a network.
pub struct FrameLoop<S: Surface, F: FrameScheduler> {
    network: AmbientNetwork<S>,
    scheduler: F,
    clock: FrameClock,
    state: LoopState,
}

impl<S: Surface, F: FrameScheduler> FrameLoop<S, F> {
    /// Wrap a network. Nothing is scheduled until [`start`](Self::start).
    pub fn new(network: AmbientNetwork<S>, scheduler: F) -> Self {
        Self {
            network,
            scheduler,
            clock: FrameClock::new(),
            state: LoopState::Idle,
        }
    }

    /// Request the first frame. Only has an effect when idle.
    pub fn start(&mut self) {
        if self.state != LoopState::Idle {
            return;
        }
        self.state = LoopState::Running;
        log::debug!("frame loop started");
        self.scheduler.request_frame();
    }

    /// Cancel the outstanding frame and refuse all later ones.
    pub fn stop(&mut self) {
        if self.state == LoopState::Stopped {
            return;
        }
        if self.state == LoopState::Running {
            self.scheduler.cancel_frame();
        }
        self.state = LoopState::Stopped;
        log::debug!("frame loop stopped after {} frames", self.clock.frame());
    }

    /// Display-refresh callback. Runs one frame and requests the next.
    ///
    /// Returns `false`, doing nothing, unless the loop is running.
    pub fn on_frame(&mut self, timestamp_ms: f64) -> bool {
        if self.state != LoopState::Running {
            return false;
        }

        if self.clock.tick(timestamp_ms) {
            log::trace!(
                "frame {}: {:.1} fps, {:.2} ms delta",
                self.clock.frame(),
                self.clock.fps(),
                self.clock.delta_ms()
            );
        }
        self.network.frame();
        self.scheduler.request_frame();
        true
    }

    /// Viewport resize callback.
    pub fn on_resize(&mut self, size: Vec2) {
        self.network.resize(size);
    }

    /// Current lifecycle state.
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Whether frames are being produced.
    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    /// The animated network.
    pub fn network(&self) -> &AmbientNetwork<S> {
        &self.network
    }

    /// The animated network, mutably.
    pub fn network_mut(&mut self) -> &mut AmbientNetwork<S> {
        &mut self.network
    }

    /// The scheduler.
    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }

    /// The scheduler, mutably.
    pub fn scheduler_mut(&mut self) -> &mut F {
        &mut self.scheduler
    }

    /// Frame timing.
    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }
}

impl<S: Surface> FrameLoop<S, ManualScheduler> {
    /// Deliver the pending callback, if any, at `timestamp_ms`.
    ///
    /// Returns whether a frame ran.
    pub fn step(&mut self, timestamp_ms: f64) -> bool {
        if !self.scheduler.take_pending() {
            return false;
        }
        self.on_frame(timestamp_ms)
    }
}
