// src/controls/mod.rs

//! Auxiliary front-panel controls.
//!
//! Contrast, brightness, LEDs and scroll timing each sit on their own narrow
//! protocol and are independent of frame transmission. None of them takes
//! the access serializer.

pub mod attr;
pub mod led;
pub mod scroll;

#[cfg(test)]
mod tests;

pub use led::LedChannel;
pub use scroll::{ScrollAttribute, ScrollFormat, ScrollPaths, ScrollTiming};

use crate::device::{CharDevice, DeviceHandle};
use crate::error::{PanelError, PanelResult};
use log::{debug, trace, warn};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ControlSurface {
    control_device: PathBuf,
    brightness_paths: Vec<PathBuf>,
    scroll: ScrollTiming,
}

impl ControlSurface {
    pub fn new(control_device: PathBuf, brightness_paths: Vec<PathBuf>, scroll: ScrollTiming) -> Self {
        Self {
            control_device,
            brightness_paths,
            scroll,
        }
    }

    fn open_control_device(&self) -> PanelResult<CharDevice> {
        CharDevice::open(&self.control_device).map_err(|source| {
            debug!("ControlSurface: can't open {:?}: {}", self.control_device, source);
            PanelError::ControlDeviceUnavailable {
                path: self.control_device.clone(),
                source,
            }
        })
    }

    /// Sets the panel contrast.
    ///
    /// The control device must be present; the operation itself is issued
    /// on the display descriptor and an ioctl failure is only logged.
    pub fn set_contrast(&self, display: &mut DeviceHandle, contrast: i32) -> PanelResult<()> {
        let Some(channel) = display.channel_mut() else {
            return Ok(());
        };
        trace!("ControlSurface: set contrast {}", contrast);
        let _control = self.open_control_device()?;
        if let Err(e) = channel.set_contrast(contrast) {
            warn!("ControlSurface: can't set lcd contrast: {:#}", e);
        }
        Ok(())
    }

    /// Sets the panel brightness, preferring the attribute files over the
    /// control device's dimming ioctl.
    ///
    /// Attributes are tried in order; the ioctl is used only when none of
    /// them accepted the value.
    pub fn set_brightness(&self, display: &DeviceHandle, brightness: i32) -> PanelResult<()> {
        if !display.is_valid() {
            return Ok(());
        }
        for path in self.brightness_paths.iter().filter(|p| attr::is_writable(p)) {
            match attr::write_decimal(path, brightness) {
                Ok(()) => return Ok(()),
                Err(e) => warn!("ControlSurface: write {:?} failed: {}", path, e),
            }
        }
        let mut control = self.open_control_device()?;
        if let Err(e) = control.set_dimming(brightness) {
            warn!("ControlSurface: can't set lcd brightness: {:#}", e);
        }
        Ok(())
    }

    /// Sets one LED channel selected by its option tag. Unknown tags are ignored.
    pub fn set_led(&self, display: &mut DeviceHandle, value: i32, tag: i32) {
        let Some(channel) = LedChannel::from_tag(tag) else {
            trace!("ControlSurface: ignoring unknown led option {}", tag);
            return;
        };
        let Some(device) = display.channel_mut() else {
            return;
        };
        debug!("ControlSurface: set led {:?} {}", channel, value);
        // The driver takes the value as an unsigned char.
        if let Err(e) = device.set_led(channel, value as u8) {
            warn!("ControlSurface: can't set led {:?}: {:#}", channel, e);
        }
    }

    pub fn scroll(&self) -> &ScrollTiming {
        &self.scroll
    }
}
