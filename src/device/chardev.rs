// src/device/chardev.rs

use super::ioctl::{self, LcdMode};
use super::PanelChannel;
use crate::controls::led::LedChannel;
use anyhow::{Context, Result};
use log::trace;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::os::unix::io::{AsRawFd, RawFd};
use std::path::{Path, PathBuf};

/// A front-panel device node opened read/write.
#[derive(Debug)]
pub struct CharDevice {
    file: File,
    path: PathBuf,
}

impl CharDevice {
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new().read(true).write(true).open(path)?;
        trace!("CharDevice: opened {:?} as fd {}", path, file.as_raw_fd());
        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Front-panel dimming on a control descriptor. Only the brightness
    /// fallback uses this.
    pub fn set_dimming(&mut self, brightness: i32) -> Result<()> {
        let value: libc::c_int = brightness;
        unsafe { ioctl::fp_set_dimming(self.file.as_raw_fd(), &value) }
            .with_context(|| format!("FP_IOCTL_LCD_DIMM({}) on {:?}", brightness, self.path))?;
        Ok(())
    }
}

impl Write for CharDevice {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

impl PanelChannel for CharDevice {
    fn set_mode(&mut self, mode: LcdMode) -> Result<()> {
        let value = mode as libc::c_int;
        unsafe { ioctl::lcd_set_mode(self.file.as_raw_fd(), &value) }
            .with_context(|| format!("LCD_IOCTL_ASC_MODE({:?}) on {:?}", mode, self.path))?;
        Ok(())
    }

    fn set_contrast(&mut self, contrast: i32) -> Result<()> {
        let value: libc::c_int = contrast;
        unsafe { ioctl::lcd_set_contrast(self.file.as_raw_fd(), &value) }
            .with_context(|| format!("LCD_IOCTL_SRV({}) on {:?}", contrast, self.path))?;
        Ok(())
    }

    fn set_led(&mut self, channel: LedChannel, value: u8) -> Result<()> {
        let fd = self.file.as_raw_fd();
        let res = unsafe {
            match channel {
                LedChannel::Brightness => ioctl::led_set_brightness_normal(fd, value as _),
                LedChannel::DeepStandby => ioctl::led_set_brightness_deep_standby(fd, value as _),
                LedChannel::BlinkingTime => ioctl::led_set_blinking_time(fd, value as _),
            }
        };
        res.with_context(|| format!("LED ioctl {:?}({}) on {:?}", channel, value, self.path))?;
        Ok(())
    }

    fn raw_fd(&self) -> RawFd {
        self.file.as_raw_fd()
    }
}
