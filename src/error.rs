// src/error.rs

use std::path::PathBuf;
use thiserror::Error;

/// Failures reported to the immediate caller.
///
/// Absent hardware is never one of these: every hardware-facing operation
/// degrades to a no-op instead.
#[derive(Error, Debug)]
pub enum PanelError {
    #[error("Panel is already locked")]
    AlreadyLocked,
    #[error("Front-panel control device {path:?} unavailable: {source}")]
    ControlDeviceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to write attribute {path:?}: {source}")]
    AttributeWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Unusable buffer geometry {width}x{height}x{bits_per_pixel}")]
    InvalidGeometry {
        width: u32,
        height: u32,
        bits_per_pixel: u32,
    },
    #[error("Failed to load configuration from {path:?}: {reason}")]
    Config { path: PathBuf, reason: String },
}

pub type PanelResult<T> = std::result::Result<T, PanelError>;
