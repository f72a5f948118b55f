//! # glyphnet - Ambient Glyph Particle Network
//!
//! A decorative backdrop of drifting symbols. Nodes carrying glyphs such as
//! `π`, `λ` or `Ω` float across a drawing surface, bounce off its edges,
//! link to their neighbours with faint lines and glow softly. An optional
//! anchor glyph sits pinned at the center.
//!
//! The crate is platform independent: drawing goes through the [`Surface`]
//! trait, the repaint loop through [`FrameScheduler`], and randomness
//! through [`RandomSource`]. The `glyphnet-web` crate binds all three to
//! the browser; tests drive them by hand.
//!
//! ## Quick Start
//!
//! ```ignore
//! use glyphnet::prelude::*;
//!
//! let surface = RecordingSurface::new(Vec2::new(800.0, 400.0));
//! let config = NetworkConfig::default().with_node_count(50);
//! let network = AmbientNetwork::new(surface, config, &mut seeded(42));
//!
//! let mut frames = FrameLoop::new(network, ManualScheduler::new());
//! frames.start();
//! frames.step(0.0);
//! frames.step(16.7);
//! ```
//!
//! ## Frame Anatomy
//!
//! Every frame, in order:
//!
//! 1. clear the surface
//! 2. move mobile nodes, reflecting off the edges; pin the anchor to the center
//! 3. stroke a line between every pair closer than `links.threshold`, with
//!    alpha `(1 - d / threshold) * links.weight`
//! 4. draw each glyph twice with two shadow-blur radii, then reset the shadow
//! 5. request the next frame
//!
//! ## Mounting
//!
//! [`mount`] looks up a container through a [`SurfaceHost`], creates a
//! surface of the container's size, populates the network and starts the
//! loop. A missing container or drawing context yields `None` and nothing
//! else: the effect must never break the page it decorates.

pub mod config;
pub mod error;
pub mod frame_loop;
pub mod host;
pub mod links;
pub mod network;
pub mod node;
pub mod spawn;
pub mod surface;
pub mod time;
pub mod visuals;

pub use config::{AnchorConfig, GlowConfig, LinkConfig, NetworkConfig, ValueRange, MAX_NODE_COUNT};
pub use error::NetworkError;
pub use frame_loop::{FrameLoop, FrameScheduler, LoopState, ManualScheduler};
pub use glam::Vec2;
pub use host::{mount, try_mount, SurfaceHost, DEFAULT_CONTAINER_ID};
pub use links::{find_links, link_alpha, Link};
pub use network::AmbientNetwork;
pub use node::{Node, NodeRole};
pub use spawn::{seeded, RandomSource, ScriptedRandom, SpawnContext};
#[cfg(feature = "raster")]
pub use surface::RasterSurface;
pub use surface::{sanitize_size, DrawCommand, GlyphPaint, RecordingSurface, Shadow, Stroke, Surface};
pub use time::FrameClock;
pub use visuals::Color;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use glyphnet::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{AnchorConfig, GlowConfig, LinkConfig, NetworkConfig, ValueRange};
    pub use crate::error::NetworkError;
    pub use crate::frame_loop::{FrameLoop, FrameScheduler, LoopState, ManualScheduler};
    pub use crate::host::{mount, try_mount, SurfaceHost, DEFAULT_CONTAINER_ID};
    pub use crate::network::AmbientNetwork;
    pub use crate::node::{Node, NodeRole};
    pub use crate::spawn::{seeded, RandomSource, ScriptedRandom};
    #[cfg(feature = "raster")]
    pub use crate::surface::RasterSurface;
    pub use crate::surface::{RecordingSurface, Surface};
    pub use crate::visuals::Color;
    pub use crate::Vec2;
}
