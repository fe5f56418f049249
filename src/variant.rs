// src/variant.rs

//! The four mutually exclusive front-panel hardware families.

use crate::geometry::DisplayGeometry;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which physical front-panel display is attached.
///
/// Decided once by the prober and fixed for the lifetime of the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayVariant {
    /// 1-bit segmented panel, 132 columns by 8 byte-rows. Also the
    /// classification used when no device could be opened at all.
    SegmentedBinary,
    /// 64x64 4-bit grayscale OLED panel.
    MonochromeOled,
    /// Legacy lcd device that advertises OLED brightness control. Packs
    /// exactly like `SegmentedBinary`.
    LegacySegmented,
    /// Panel that reports its own resolution and depth.
    GenericFramebuffer,
}

impl DisplayVariant {
    /// Geometry of the logical buffer the renderer draws into for this
    /// variant, when the hardware does not report one.
    ///
    /// Both the segmented and the OLED packers read from a 132-byte
    /// stride, 64-row source.
    pub fn native_geometry(&self) -> Option<DisplayGeometry> {
        match self {
            DisplayVariant::SegmentedBinary
            | DisplayVariant::LegacySegmented
            | DisplayVariant::MonochromeOled => Some(DisplayGeometry::new(132, 64, 8)),
            DisplayVariant::GenericFramebuffer => None,
        }
    }

    /// The numeric `lcd_type` code used by older tooling and log parsers.
    pub fn legacy_code(&self) -> u8 {
        match self {
            DisplayVariant::SegmentedBinary => 0,
            DisplayVariant::MonochromeOled => 1,
            DisplayVariant::LegacySegmented => 2,
            DisplayVariant::GenericFramebuffer => 3,
        }
    }
}

impl fmt::Display for DisplayVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DisplayVariant::SegmentedBinary => "segmented-binary",
            DisplayVariant::MonochromeOled => "monochrome-oled",
            DisplayVariant::LegacySegmented => "legacy-segmented",
            DisplayVariant::GenericFramebuffer => "generic-framebuffer",
        };
        f.write_str(name)
    }
}
