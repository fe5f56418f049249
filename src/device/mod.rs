// src/device/mod.rs

//! Access to the display character device.
//!
//! - `PanelChannel`: what the panel needs from an open descriptor (frame
//!   writes plus the handful of control operations issued on it)
//! - `CharDevice`: the real implementation over a device node
//! - `DeviceHandle`: an owned channel, or nothing when no hardware answered

pub mod chardev;
pub mod ioctl;
#[cfg(test)]
pub mod mock;

pub use chardev::CharDevice;
pub use ioctl::LcdMode;

use crate::controls::led::LedChannel;
use anyhow::Result;
use std::io::{self, Write};
use std::os::unix::io::RawFd;

/// An open descriptor to the display.
pub trait PanelChannel: Write + Send {
    fn set_mode(&mut self, mode: LcdMode) -> Result<()>;
    fn set_contrast(&mut self, contrast: i32) -> Result<()>;
    fn set_led(&mut self, channel: LedChannel, value: u8) -> Result<()>;
    fn raw_fd(&self) -> RawFd;
}

/// The display descriptor owned by the panel.
///
/// An absent handle turns every hardware-facing call into a no-op.
#[derive(Default)]
pub struct DeviceHandle {
    channel: Option<Box<dyn PanelChannel>>,
}

impl DeviceHandle {
    pub fn new(channel: Box<dyn PanelChannel>) -> Self {
        Self {
            channel: Some(channel),
        }
    }

    pub fn absent() -> Self {
        Self { channel: None }
    }

    pub fn is_valid(&self) -> bool {
        self.channel.is_some()
    }

    /// The raw descriptor, or -1 when absent.
    pub fn raw_fd(&self) -> RawFd {
        self.channel.as_ref().map_or(-1, |c| c.raw_fd())
    }

    pub fn channel_mut(&mut self) -> Option<&mut (dyn PanelChannel + 'static)> {
        self.channel.as_deref_mut()
    }

    /// Issues exactly one write call and returns how many bytes it took.
    pub fn write_frame(&mut self, frame: &[u8]) -> io::Result<usize> {
        match self.channel.as_mut() {
            Some(channel) => channel.write(frame),
            None => Ok(0),
        }
    }

    /// Closes the descriptor. Later calls become no-ops.
    pub fn close(&mut self) {
        self.channel = None;
    }
}

impl std::fmt::Debug for DeviceHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceHandle")
            .field("fd", &self.raw_fd())
            .finish()
    }
}
