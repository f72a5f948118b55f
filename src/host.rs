//! Mounting a network into a host document.
//!
//! The effect is decorative, so mounting never fails loudly: a missing
//! container, a missing 2D context or a bad configuration all end in
//! [`mount`] returning `None` with nothing created and nothing scheduled.
//! [`try_mount`] exposes the reason for callers that care.

use glam::Vec2;

use crate::config::NetworkConfig;
use crate::error::NetworkError;
use crate::frame_loop::{FrameLoop, FrameScheduler};
use crate::network::AmbientNetwork;
use crate::spawn::RandomSource;
use crate::surface::{sanitize_size, Surface};

/// Container id the site's hero section uses.
pub const DEFAULT_CONTAINER_ID: &str = "hero-network";

/// A document that can host drawing surfaces.
pub trait SurfaceHost {
    /// Surface type this host creates.
    type Surface: Surface;

    /// Current pixel size of the container, or `None` if it does not exist.
    fn container_size(&self, container_id: &str) -> Option<Vec2>;

    /// Create a surface of `size` inside the container.
    fn create_surface(&mut self, container_id: &str, size: Vec2) -> Result<Self::Surface, NetworkError>;
}

/// Mount and start a network, reporting why it could not be mounted.
///
/// On success the returned loop is running: its first frame has been
/// requested from `scheduler`.
pub fn try_mount<H, F, R>(
    host: &mut H,
    container_id: &str,
    config: NetworkConfig,
    scheduler: F,
    rng: &mut R,
) -> Result<FrameLoop<H::Surface, F>, NetworkError>
where
    H: SurfaceHost,
    F: FrameScheduler,
    R: RandomSource + ?Sized,
{
    config.validate()?;
    let size = host
        .container_size(container_id)
        .map(sanitize_size)
        .ok_or_else(|| NetworkError::ContainerNotFound(container_id.to_string()))?;
    let surface = host.create_surface(container_id, size)?;

    let network = AmbientNetwork::new(surface, config, rng);
    let mut frames = FrameLoop::new(network, scheduler);
    frames.start();
    Ok(frames)
}

/// Mount and start a network, or do nothing.
pub fn mount<H, F, R>(
    host: &mut H,
    container_id: &str,
    config: NetworkConfig,
    scheduler: F,
    rng: &mut R,
) -> Option<FrameLoop<H::Surface, F>>
where
    H: SurfaceHost,
    F: FrameScheduler,
    R: RandomSource + ?Sized,
{
    match try_mount(host, container_id, config, scheduler, rng) {
        Ok(frames) => Some(frames),
        Err(err) => {
            log::debug!("ambient network not mounted: {err}");
            None
        }
    }
}
