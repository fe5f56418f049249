// src/panel/mod.rs

//! The front-panel display core.
//!
//! `Panel` owns everything the display needs: the probed variant, the
//! device handle, the pixel buffer, the current transform, the packing
//! strategy, the access gate and the auxiliary controls. It is passed
//! explicitly to whatever drives redraws; see `bridge` for the process-wide
//! accessor kept for older call sites.
//!
//! ## Frame path
//! renderer writes `buffer_mut()` → `update_frame()` → packer for the
//! variant → gate → one write on the device.
//!
//! ## Failure policy
//! Only lock contention and control-device/attribute failures reach the
//! caller as errors. Absent hardware, short writes and failed writes are
//! logged and reported as a `FrameStatus`; the buffer is never touched.


use crate::buffer::PixelBuffer;
use crate::compositor::{packer_for, FramePacker, Transform};
use crate::config::{Config, ControlsConfig};
use crate::controls::{ControlSurface, LedChannel, ScrollAttribute, ScrollFormat, ScrollTiming};
use crate::device::DeviceHandle;
use crate::error::PanelResult;
use crate::geometry::DisplayGeometry;
use crate::lock::AccessSerializer;
use crate::probe::{self, ProbeReport};
use crate::variant::DisplayVariant;
use log::{debug, info, trace, warn};
use std::io;
use std::os::unix::io::RawFd;
use std::path::Path;

/// Text panels show this many rows.
const TEXT_ROWS: u32 = 5;

/// What became of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// The whole frame was accepted.
    Written(usize),
    /// The device took fewer bytes than offered.
    ShortWrite { written: usize, expected: usize },
    /// The write call failed.
    WriteFailed(io::ErrorKind),
    /// No device is attached; nothing was packed or written.
    NoDevice,
    /// The packer declined to produce a frame for this transform.
    Suppressed,
    /// Text-only panel, or a text row it cannot show.
    NotApplicable,
}

pub struct Panel {
    variant: DisplayVariant,
    handle: DeviceHandle,
    buffer: PixelBuffer,
    transform: Transform,
    packer: Box<dyn FramePacker>,
    gate: AccessSerializer,
    controls: ControlSurface,
    text_lcd: bool,
    report: Option<ProbeReport>,
}

impl Panel {
    /// Probes the hardware described by `config` and builds a panel around
    /// whatever was found. Never fails.
    pub fn open(config: &Config) -> Self {
        let probed = probe::probe(config);
        let mut panel = Self::with_device(
            probed.report.variant,
            probed.report.geometry,
            probed.handle,
            config,
        );
        panel.report = Some(probed.report);
        panel
    }

    /// Builds a panel around an already opened handle.
    pub fn with_device(
        variant: DisplayVariant,
        geometry: DisplayGeometry,
        handle: DeviceHandle,
        config: &Config,
    ) -> Self {
        let scroll_format = config.controls.scroll_format.unwrap_or_default();
        let controls = ControlSurface::new(
            config.paths.control_device.clone(),
            config.paths.oled_brightness.clone(),
            ScrollTiming::new(config.paths.scroll.clone(), scroll_format, config.display.text_lcd),
        );
        let buffer = PixelBuffer::new(geometry)
            .or_else(|_| PixelBuffer::new(variant.native_geometry().unwrap_or_default()))
            .unwrap_or_default();
        let actual = buffer.geometry();
        info!(
            "Panel: {} on fd {}, buffer {}x{}x{}",
            variant,
            handle.raw_fd(),
            actual.width,
            actual.height,
            actual.bits_per_pixel
        );
        Self {
            variant,
            handle,
            buffer,
            transform: Transform {
                flipped: config.display.flipped,
                inverted: config.display.inverted,
            },
            packer: packer_for(variant, config.display.segmented_flip),
            gate: AccessSerializer::new(),
            controls,
            text_lcd: config.display.text_lcd,
            report: None,
        }
    }

    // --- Buffer ---

    /// Replaces the pixel buffer with a zeroed one of the given geometry.
    /// An unusable geometry is refused and the current buffer kept.
    pub fn configure(&mut self, width: u32, height: u32, bits_per_pixel: u32) -> PanelResult<()> {
        self.buffer.configure(width, height, bits_per_pixel)
    }

    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut PixelBuffer {
        &mut self.buffer
    }

    pub fn stride(&self) -> usize {
        self.buffer.stride()
    }

    pub fn geometry(&self) -> DisplayGeometry {
        self.buffer.geometry()
    }

    // --- State ---

    pub fn variant(&self) -> DisplayVariant {
        self.variant
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn is_attached(&self) -> bool {
        self.handle.is_valid()
    }

    /// Probe details, when the panel was built by `open`.
    pub fn report(&self) -> Option<&ProbeReport> {
        self.report.as_ref()
    }

    // --- Transform ---

    /// Sets mirroring and pushes a frame with the new state.
    pub fn set_flipped(&mut self, flipped: bool) {
        self.transform.flipped = flipped;
        self.redraw();
    }

    /// Sets the inversion mask and pushes a frame with the new state.
    pub fn set_inverted(&mut self, mask: u8) {
        self.transform.inverted = mask;
        self.redraw();
    }

    fn redraw(&mut self) {
        if let Err(e) = self.update_frame() {
            debug!("Panel: redraw skipped: {}", e);
        }
    }

    // --- Frames ---

    /// Packs the buffer for the attached variant and writes it in one call.
    ///
    /// Fails only if the panel is locked by someone else.
    pub fn update_frame(&mut self) -> PanelResult<FrameStatus> {
        let _guard = self.gate.guard()?;
        Ok(transmit(
            &mut self.handle,
            &*self.packer,
            &self.buffer,
            self.transform,
            self.text_lcd,
        ))
    }

    /// Writes `text` to a text-only panel. Newlines become spaces; rows past
    /// the last visible one are ignored.
    pub fn render_text(&mut self, row: u32, text: &str) -> PanelResult<FrameStatus> {
        let _guard = self.gate.guard()?;
        if !self.text_lcd || row >= TEXT_ROWS {
            return Ok(FrameStatus::NotApplicable);
        }
        if !self.handle.is_valid() {
            return Ok(FrameStatus::NoDevice);
        }
        let message = text.replace('\n', " ");
        Ok(write_once(&mut self.handle, message.as_bytes()))
    }

    // --- Access serialization ---

    /// Takes the gate and returns the raw descriptor (-1 without hardware).
    ///
    /// The caller must call `release`. Prefer `lock`.
    pub fn acquire(&self) -> PanelResult<RawFd> {
        self.gate.acquire()?;
        Ok(self.handle.raw_fd())
    }

    pub fn release(&self) {
        self.gate.release();
    }

    pub fn is_locked(&self) -> bool {
        self.gate.is_locked()
    }

    /// Takes the gate for the lifetime of the returned session.
    pub fn lock(&mut self) -> PanelResult<FrameSession<'_>> {
        self.gate.acquire()?;
        Ok(FrameSession { panel: self })
    }

    // --- Auxiliary controls ---

    pub fn set_contrast(&mut self, contrast: i32) -> PanelResult<()> {
        self.controls.set_contrast(&mut self.handle, contrast)
    }

    pub fn set_brightness(&mut self, brightness: i32) -> PanelResult<()> {
        self.controls.set_brightness(&self.handle, brightness)
    }

    /// `tag` selects the LED channel: 0 brightness, 1 deep standby,
    /// 2 blinking time. Other tags are ignored.
    pub fn set_led(&mut self, value: i32, tag: i32) {
        self.controls.set_led(&mut self.handle, value, tag);
    }

    /// The scroll attribute path, or `None` when the panel lacks the feature.
    pub fn scroll_path(&self, which: ScrollAttribute) -> Option<&Path> {
        self.controls.scroll().path(which)
    }

    pub fn set_scroll(&mut self, which: ScrollAttribute, value: i32) -> PanelResult<()> {
        if !self.handle.is_valid() {
            return Ok(());
        }
        self.controls.scroll().set(which, value)
    }

    pub fn scroll_format(&self) -> ScrollFormat {
        self.controls.scroll().format()
    }

    /// Applies every start-up value present in `controls`. Failures are
    /// logged and do not stop the remaining settings.
    pub fn apply_controls(&mut self, controls: &ControlsConfig) {
        if let Some(v) = controls.contrast {
            if let Err(e) = self.set_contrast(v) {
                warn!("Panel: contrast {}: {}", v, e);
            }
        }
        if let Some(v) = controls.brightness {
            if let Err(e) = self.set_brightness(v) {
                warn!("Panel: brightness {}: {}", v, e);
            }
        }
        let leds = [
            (controls.led_brightness, LedChannel::Brightness),
            (controls.led_deep_standby, LedChannel::DeepStandby),
            (controls.led_blinking_time, LedChannel::BlinkingTime),
        ];
        for (value, channel) in leds {
            if let Some(v) = value {
                self.set_led(v, channel.tag());
            }
        }
        let scroll = [
            (controls.scroll_delay, ScrollAttribute::Delay),
            (controls.initial_scroll_delay, ScrollAttribute::InitialDelay),
            (controls.final_scroll_delay, ScrollAttribute::FinalDelay),
            (controls.scroll_repeats, ScrollAttribute::Repeats),
        ];
        for (value, which) in scroll {
            let Some(v) = value else { continue };
            if self.scroll_path(which).is_none() {
                debug!("Panel: {:?} not supported, skipping", which);
                continue;
            }
            if let Err(e) = self.set_scroll(which, v) {
                warn!("Panel: {:?} {}: {}", which, v, e);
            }
        }
    }

    /// Closes the device. The panel stays usable as an inert display.
    pub fn close(&mut self) {
        if self.handle.is_valid() {
            info!("Panel: closing fd {}", self.handle.raw_fd());
        }
        self.handle.close();
    }
}

impl std::fmt::Debug for Panel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Panel")
            .field("variant", &self.variant)
            .field("handle", &self.handle)
            .field("geometry", &self.buffer.geometry())
            .field("transform", &self.transform)
            .field("locked", &self.gate.is_locked())
            .finish()
    }
}

fn transmit(
    handle: &mut DeviceHandle,
    packer: &dyn FramePacker,
    buffer: &PixelBuffer,
    transform: Transform,
    text_lcd: bool,
) -> FrameStatus {
    if text_lcd {
        return FrameStatus::NotApplicable;
    }
    // Without a device there is nothing to pack for.
    if !handle.is_valid() {
        return FrameStatus::NoDevice;
    }
    let Some(frame) = packer.pack(buffer, transform) else {
        return FrameStatus::Suppressed;
    };
    write_once(handle, &frame)
}

/// Issues exactly one write and classifies the outcome.
fn write_once(handle: &mut DeviceHandle, bytes: &[u8]) -> FrameStatus {
    match handle.write_frame(bytes) {
        Ok(n) if n == bytes.len() => {
            trace!("Panel: wrote {} bytes", n);
            FrameStatus::Written(n)
        }
        Ok(n) => {
            warn!("Panel: short write, {} of {} bytes", n, bytes.len());
            FrameStatus::ShortWrite {
                written: n,
                expected: bytes.len(),
            }
        }
        Err(e) => {
            warn!("Panel: write of {} bytes failed: {}", bytes.len(), e);
            FrameStatus::WriteFailed(e.kind())
        }
    }
}

/// Exclusive use of the panel; the gate is released on drop.
pub struct FrameSession<'a> {
    panel: &'a mut Panel,
}

impl FrameSession<'_> {
    pub fn buffer_mut(&mut self) -> &mut PixelBuffer {
        &mut self.panel.buffer
    }

    /// Pushes the buffer without taking the gate again.
    pub fn update(&mut self) -> FrameStatus {
        let panel = &mut *self.panel;
        transmit(
            &mut panel.handle,
            &*panel.packer,
            &panel.buffer,
            panel.transform,
            panel.text_lcd,
        )
    }

    pub fn raw_fd(&self) -> RawFd {
        self.panel.handle.raw_fd()
    }
}

impl Drop for FrameSession<'_> {
    fn drop(&mut self) {
        self.panel.gate.release();
    }
}
