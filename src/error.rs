//! Error types for glyphnet.
//!
//! Mounting failures are never shown to the page: [`crate::host::mount`]
//! turns every [`NetworkError`] into a silent no-op. The variants exist so
//! hosts, tests and the snapshot CLI can tell the cases apart.

use thiserror::Error;

/// Errors that can occur while mounting or configuring a network.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// No element with the requested id exists in the document.
    #[error("container element '{0}' not found")]
    ContainerNotFound(String),

    /// The host could not provide a 2D drawing context.
    #[error("2D drawing context unavailable: {0}")]
    ContextUnavailable(String),

    /// A configuration value is out of range or inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A configuration file could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// Reading or writing a file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding a raster snapshot failed.
    #[cfg(feature = "raster")]
    #[error("failed to write snapshot: {0}")]
    Snapshot(#[from] image::ImageError),
}
