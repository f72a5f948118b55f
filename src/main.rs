//! Headless snapshot renderer.
//!
//! Runs the network for a number of frames on a software surface and writes
//! the last frame to a PNG, so configurations can be previewed without a
//! browser:
//!
//! ```text
//! glyphnet --config hero.json --frames 240 --output hero.png
//! ```

use std::path::PathBuf;

use clap::Parser;
use glyphnet::prelude::*;

/// Render the ambient glyph network to a PNG.
#[derive(Parser, Debug)]
#[command(name = "glyphnet", version, about)]
struct Args {
    /// Surface width in pixels.
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Surface height in pixels.
    #[arg(long, default_value_t = 640)]
    height: u32,

    /// Frames to simulate before capturing.
    #[arg(long, default_value_t = 120)]
    frames: u32,

    /// RNG seed. Defaults to the current time.
    #[arg(long)]
    seed: Option<u64>,

    /// JSON configuration file. Defaults are used when absent.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the effective configuration to this file and exit.
    #[arg(long)]
    dump_config: Option<PathBuf>,

    /// Output PNG path.
    #[arg(short, long, default_value = "glyphnet.png")]
    output: PathBuf,
}

/// Frame interval fed to the clock, matching a 60 Hz display.
const FRAME_MS: f64 = 1000.0 / 60.0;

fn main() -> Result<(), NetworkError> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => NetworkConfig::load(path)?,
        None => NetworkConfig::default(),
    };
    if let Some(path) = &args.dump_config {
        config.save(path)?;
        log::info!("configuration written to {}", path.display());
        return Ok(());
    }
    // A transparent PNG hides the glow; preview on the white page background.
    config.background.get_or_insert(Color::WHITE);

    let seed = args.seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42)
    });
    log::info!(
        "rendering {} frames at {}x{} (seed {seed})",
        args.frames,
        args.width,
        args.height
    );

    let surface = RasterSurface::new(Vec2::new(args.width as f32, args.height as f32));
    let network = AmbientNetwork::new(surface, config, &mut seeded(seed));
    let mut frames = FrameLoop::new(network, ManualScheduler::new());
    frames.start();
    for i in 0..args.frames {
        frames.step(f64::from(i) * FRAME_MS);
    }
    if args.frames == 0 {
        frames.network_mut().render();
    }

    frames.network().surface().save_png(&args.output)?;
    log::info!(
        "wrote {} ({} links in final frame)",
        args.output.display(),
        frames.network().links().count()
    );
    Ok(())
}
