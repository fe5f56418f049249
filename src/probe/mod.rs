// src/probe/mod.rs

//! Start-up detection of the attached front-panel hardware.
//!
//! Probing never fails. Each step that finds nothing falls through to the
//! next, and if no device node opens at all the panel ends up as an inert
//! `SegmentedBinary` with an absent handle. A box without a working front
//! panel must still boot.
//!
//! Order:
//! 1. Read the fp version marker. The legacy front-panel revision has no
//!    OLED node and gets the null sink instead.
//! 2. Open the OLED candidate.
//! 3. Otherwise open the legacy lcd node; if an OLED brightness attribute
//!    is writable it is a `LegacySegmented` panel.
//! 4. With a device open, switch it to binary mode and look for the
//!    resolution override attributes, which make it a `GenericFramebuffer`.
//! 5. Write the right-half selector.


use crate::config::Config;
use crate::controls::attr;
use crate::device::{CharDevice, DeviceHandle, LcdMode, PanelChannel};
use crate::geometry::DisplayGeometry;
use crate::variant::DisplayVariant;
use bitflags::bitflags;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

bitflags! {
    /// What the prober found along the way.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ProbeFlags: u8 {
        /// fp version marker matched the legacy revision.
        const LEGACY_FP_REVISION = 1 << 0;
        /// An OLED brightness attribute is writable.
        const OLED_BRIGHTNESS = 1 << 1;
        /// The driver accepted the switch to binary mode.
        const BINARY_MODE = 1 << 2;
        /// Resolution override attributes were present.
        const RESOLUTION_OVERRIDE = 1 << 3;
        /// The right-half selector was written.
        const RIGHT_HALF = 1 << 4;
    }
}

/// Outcome of probing, minus the descriptor itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeReport {
    pub variant: DisplayVariant,
    pub geometry: DisplayGeometry,
    pub device_path: Option<PathBuf>,
    pub flags: ProbeFlags,
}

#[derive(Debug)]
pub struct Probed {
    pub handle: DeviceHandle,
    pub report: ProbeReport,
}

/// Runs every probe step against the paths in `config`.
pub fn probe(config: &Config) -> Probed {
    let paths = &config.paths;
    let mut flags = ProbeFlags::empty();

    let fp_version = attr::read_first_line(&paths.fp_version).ok();
    if fp_version
        .as_deref()
        .is_some_and(|v| v.trim_end() == config.display.legacy_fp_version)
    {
        flags |= ProbeFlags::LEGACY_FP_REVISION;
    }
    debug!("Prober: fp version {:?}", fp_version);

    let oled_candidate = if flags.contains(ProbeFlags::LEGACY_FP_REVISION) {
        &paths.null_device
    } else {
        &paths.oled_device
    };

    let (mut variant, opened) = match open_device(oled_candidate) {
        Some(device) => {
            info!("Prober: found OLED display at {:?}", oled_candidate);
            (DisplayVariant::MonochromeOled, Some(device))
        }
        None => {
            let variant = if paths.oled_brightness.iter().any(|p| attr::is_writable(p)) {
                flags |= ProbeFlags::OLED_BRIGHTNESS;
                DisplayVariant::LegacySegmented
            } else {
                DisplayVariant::SegmentedBinary
            };
            (variant, open_device(&paths.lcd_device))
        }
    };

    let mut geometry = config.display.fallback_geometry;
    let mut device_path = None;
    let handle = match opened {
        Some(mut device) => {
            match device.set_mode(LcdMode::Binary) {
                Ok(()) => flags |= ProbeFlags::BINARY_MODE,
                Err(e) => warn!("Prober: binary mode not accepted: {:#}", e),
            }
            match read_resolution_override(config) {
                Some(probed) => {
                    flags |= ProbeFlags::RESOLUTION_OVERRIDE;
                    variant = DisplayVariant::GenericFramebuffer;
                    geometry = probed;
                }
                None => {
                    geometry = variant.native_geometry().unwrap_or(geometry);
                }
            }
            device_path = Some(device.path().to_path_buf());
            DeviceHandle::new(Box::new(device))
        }
        None => {
            warn!("Prober: no oled0 or lcd0 device found, front panel disabled");
            variant = DisplayVariant::SegmentedBinary;
            DeviceHandle::absent()
        }
    };

    if attr::write_str(&paths.right_half, &config.display.right_half_mode).is_ok() {
        flags |= ProbeFlags::RIGHT_HALF;
    }

    info!(
        "Prober: xres={}, yres={}, bpp={} lcd_type={} ({}) flags={:?}",
        geometry.width,
        geometry.height,
        geometry.bits_per_pixel,
        variant.legacy_code(),
        variant,
        flags
    );

    Probed {
        handle,
        report: ProbeReport {
            variant,
            geometry,
            device_path,
            flags,
        },
    }
}

fn open_device(path: &Path) -> Option<CharDevice> {
    match CharDevice::open(path) {
        Ok(device) => Some(device),
        Err(e) => {
            debug!("Prober: can't open {:?}: {}", path, e);
            None
        }
    }
}

/// Reads `xres`, then `yres`, then `bpp`, each only if the previous file
/// could be opened. Unparseable values keep the fallback. Returns `None`
/// when `xres` itself is absent or the result is not a usable geometry.
fn read_resolution_override(config: &Config) -> Option<DisplayGeometry> {
    let paths = &config.paths;
    let mut geometry = config.display.fallback_geometry;

    let xres = attr::read_hex(&paths.xres).ok()?;
    if let Some(v) = xres {
        geometry.width = v;
    }
    if let Ok(yres) = attr::read_hex(&paths.yres) {
        if let Some(v) = yres {
            geometry.height = v;
        }
        if let Ok(Some(v)) = attr::read_hex(&paths.bpp) {
            geometry.bits_per_pixel = v;
        }
    }
    if geometry.checked_len().is_none() {
        warn!(
            "Prober: ignoring resolution override {}x{}x{}",
            geometry.width, geometry.height, geometry.bits_per_pixel
        );
        return None;
    }
    Some(geometry)
}
