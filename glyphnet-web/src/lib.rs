//! Browser binding for glyphnet.
//!
//! Exposes a single JavaScript entry point:
//!
//! ```js
//! import init, { startAmbientNetwork } from "./glyphnet_web.js";
//!
//! await init();
//! const handle = startAmbientNetwork("hero-network");
//! // later, optionally:
//! handle?.stop();
//! ```
//!
//! The network is drawn on a canvas appended to the container, sized to it,
//! and kept running with `requestAnimationFrame` until stopped. A missing
//! container, a missing 2D context or an unusable configuration returns
//! `undefined` and leaves the page untouched.

pub mod canvas;
pub mod document;
pub mod scheduler;

use std::cell::RefCell;
use std::rc::Rc;

use glyphnet::{seeded, FrameLoop, NetworkConfig, NetworkError, SurfaceHost, DEFAULT_CONTAINER_ID};
use log::{Level, LevelFilter, Log, Metadata, Record};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

pub use canvas::CanvasSurface;
pub use document::DocumentHost;
pub use scheduler::{AnimationFrameScheduler, FrameCallback};

type WebFrameLoop = FrameLoop<CanvasSurface, AnimationFrameScheduler>;

/// Container id to mount into, falling back to the site default.
pub fn container_id_or_default(container_id: Option<String>) -> String {
    match container_id {
        Some(id) if !id.trim().is_empty() => id,
        _ => DEFAULT_CONTAINER_ID.to_string(),
    }
}

/// Parse an optional JSON configuration. Absent or blank means defaults.
pub fn parse_config(config_json: Option<&str>) -> Result<NetworkConfig, NetworkError> {
    match config_json {
        Some(json) if !json.trim().is_empty() => NetworkConfig::from_json(json),
        _ => Ok(NetworkConfig::default()),
    }
}

/// Everything a running network keeps alive.
///
/// The frame callback holds an `Rc` to this struct, so a mounted network
/// lives until [`Mounted::stop`] drops the callbacks, whether or not the
/// page kept its handle.
struct Mounted {
    window: Window,
    frames: RefCell<Option<WebFrameLoop>>,
    frame_callback: FrameCallback,
    resize_callback: RefCell<Option<Closure<dyn FnMut()>>>,
}

impl Mounted {
    fn new(window: Window) -> Self {
        Self {
            window,
            frames: RefCell::new(None),
            frame_callback: Rc::new(RefCell::new(None)),
            resize_callback: RefCell::new(None),
        }
    }

    fn is_running(&self) -> bool {
        self.frames
            .borrow()
            .as_ref()
            .is_some_and(FrameLoop::is_running)
    }

    fn stop(&self) {
        if let Some(frames) = self.frames.borrow_mut().as_mut() {
            frames.stop();
        }
        if let Some(on_resize) = self.resize_callback.borrow_mut().take() {
            let _ = self
                .window
                .remove_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref());
        }
        let _ = self.frame_callback.borrow_mut().take();
    }
}

/// Handle to a running ambient network.
#[wasm_bindgen]
pub struct AmbientHandle {
    mounted: Rc<Mounted>,
}

#[wasm_bindgen]
impl AmbientHandle {
    /// Cancel the pending frame and stop listening for resizes. The last
    /// drawn frame stays on the canvas. Calling it again does nothing.
    pub fn stop(&self) {
        self.mounted.stop();
    }

    #[wasm_bindgen(getter, js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.mounted.is_running()
    }
}

/// Mount an ambient network into the element with id `containerId`
/// (default `"hero-network"`), optionally configured by a JSON string.
#[wasm_bindgen(js_name = startAmbientNetwork)]
pub fn start_ambient_network(container_id: Option<String>, config_json: Option<String>) -> Option<AmbientHandle> {
    install_hooks();

    let container_id = container_id_or_default(container_id);
    let config = match parse_config(config_json.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            log::debug!("ambient network not mounted: {err}");
            return None;
        }
    };

    let window = web_sys::window()?;
    let mut host = DocumentHost::new(window.clone(), config.hidpi)?;
    let mounted = Rc::new(Mounted::new(window.clone()));

    // The callback must exist before mounting: starting the loop requests
    // the first frame.
    let frame_mounted = Rc::clone(&mounted);
    let on_frame = Closure::wrap(Box::new(move |timestamp_ms: f64| {
        if let Some(frames) = frame_mounted.frames.borrow_mut().as_mut() {
            frames.on_frame(timestamp_ms);
        }
    }) as Box<dyn FnMut(f64)>);
    *mounted.frame_callback.borrow_mut() = Some(on_frame);

    let scheduler = AnimationFrameScheduler::new(window.clone(), Rc::clone(&mounted.frame_callback));
    let mut rng = seeded(random_seed());
    let Some(frames) = glyphnet::mount(&mut host, &container_id, config, scheduler, &mut rng) else {
        let _ = mounted.frame_callback.borrow_mut().take();
        return None;
    };
    *mounted.frames.borrow_mut() = Some(frames);

    let resize_mounted = Rc::clone(&mounted);
    let on_resize = Closure::wrap(Box::new(move || {
        let Some(size) = host.container_size(&container_id) else {
            return;
        };
        if let Some(frames) = resize_mounted.frames.borrow_mut().as_mut() {
            frames.on_resize(size);
        }
    }) as Box<dyn FnMut()>);
    if window
        .add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())
        .is_ok()
    {
        *mounted.resize_callback.borrow_mut() = Some(on_resize);
    }

    Some(AmbientHandle { mounted })
}

fn random_seed() -> u64 {
    (js_sys::Math::random() * 2f64.powi(53)) as u64
}

fn install_hooks() {
    console_error_panic_hook::set_once();
    if log::set_logger(&CONSOLE_LOGGER).is_ok() {
        log::set_max_level(if cfg!(debug_assertions) {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        });
    }
}

/// Forwards `log` records to the browser console.
struct ConsoleLogger;

static CONSOLE_LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = JsValue::from_str(&format!("[{}] {}", record.target(), record.args()));
        match record.level() {
            Level::Error => web_sys::console::error_1(&line),
            Level::Warn => web_sys::console::warn_1(&line),
            Level::Info => web_sys::console::info_1(&line),
            Level::Debug | Level::Trace => web_sys::console::debug_1(&line),
        }
    }

    fn flush(&self) {}
}
