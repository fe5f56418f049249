// src/device/mock.rs

use super::{LcdMode, PanelChannel};
use crate::controls::led::LedChannel;
use anyhow::Result;
use std::io::{self, Write};
use std::os::unix::io::RawFd;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlOp {
    Mode(LcdMode),
    Contrast(i32),
    Led(LedChannel, u8),
}

#[derive(Debug, Default)]
pub struct Recording {
    pub frames: Vec<Vec<u8>>,
    pub write_calls: usize,
    pub ops: Vec<ControlOp>,
}

/// How the channel answers frame writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteBehavior {
    Accept,
    Truncate(usize),
    Fail,
}

/// A channel that remembers every frame and control operation.
///
/// Clone the `Arc` from `recording()` before handing the channel over to
/// a `DeviceHandle`.
pub struct RecordingChannel {
    recording: Arc<Mutex<Recording>>,
    behavior: WriteBehavior,
}

impl RecordingChannel {
    pub fn new() -> Self {
        Self::with_behavior(WriteBehavior::Accept)
    }

    pub fn with_behavior(behavior: WriteBehavior) -> Self {
        Self {
            recording: Arc::new(Mutex::new(Recording::default())),
            behavior,
        }
    }

    pub fn recording(&self) -> Arc<Mutex<Recording>> {
        Arc::clone(&self.recording)
    }
}

impl Write for RecordingChannel {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut rec = self.recording.lock().unwrap();
        rec.write_calls += 1;
        match self.behavior {
            WriteBehavior::Accept => {
                rec.frames.push(buf.to_vec());
                Ok(buf.len())
            }
            WriteBehavior::Truncate(limit) => {
                let n = limit.min(buf.len());
                rec.frames.push(buf[..n].to_vec());
                Ok(n)
            }
            WriteBehavior::Fail => Err(io::Error::from_raw_os_error(libc::EIO)),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl PanelChannel for RecordingChannel {
    fn set_mode(&mut self, mode: LcdMode) -> Result<()> {
        self.recording.lock().unwrap().ops.push(ControlOp::Mode(mode));
        Ok(())
    }

    fn set_contrast(&mut self, contrast: i32) -> Result<()> {
        self.recording
            .lock()
            .unwrap()
            .ops
            .push(ControlOp::Contrast(contrast));
        Ok(())
    }

    fn set_led(&mut self, channel: LedChannel, value: u8) -> Result<()> {
        self.recording
            .lock()
            .unwrap()
            .ops
            .push(ControlOp::Led(channel, value));
        Ok(())
    }

    fn raw_fd(&self) -> RawFd {
        // Any non-negative value; never handed to the kernel.
        42
    }
}
