// src/lib.rs

//! Front-panel display core: probes the attached panel, keeps a pixel
//! buffer for the renderer, packs it into the panel's native frame format
//! and drives the auxiliary controls.

pub mod bridge;
pub mod buffer;
pub mod compositor;
pub mod config;
pub mod controls;
pub mod device;
pub mod error;
pub mod geometry;
pub mod lock;
pub mod panel;
pub mod probe;
pub mod variant;

#[cfg(test)]
mod test_support;

pub use buffer::PixelBuffer;
pub use config::Config;
pub use error::{PanelError, PanelResult};
pub use geometry::DisplayGeometry;
pub use panel::{FrameSession, FrameStatus, Panel};
pub use variant::DisplayVariant;
