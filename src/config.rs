// src/config.rs

//! Defines the configuration structures for the front-panel display core.
//!
//! Every device node and attribute file the core touches is listed here, so
//! a box with a non-standard layout (or a test) can point the core somewhere
//! else without code changes. Defaults describe the stock `/dev/dbox` and
//! `/proc/stb` layout.
//!
//! The configuration is read from a JSON file. Missing fields fall back to
//! their defaults.

// Serde is used for deserializing the configuration from a file.
// The `Serialize` trait is also derived so the effective configuration can be
// dumped for diagnostics.
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::compositor::SegmentedFlip;
use crate::controls::{ScrollFormat, ScrollPaths};
use crate::error::{PanelError, PanelResult};
use crate::geometry::DisplayGeometry;

/// Environment variable naming the configuration file.
pub const CONFIG_ENV_VAR: &str = "FRONTPANEL_CONFIG";

// --- Top-Level Configuration Structure ---

/// Represents the complete configuration for the display core.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)] // Apply default values for the entire struct if a field is missing.
pub struct Config {
    /// Device nodes and attribute files.
    pub paths: PathsConfig,
    /// Panel behaviour.
    pub display: DisplayConfig,
    /// Values applied to the auxiliary controls at start-up.
    pub controls: ControlsConfig,
}

impl Config {
    /// Loads a configuration file.
    pub fn load(path: impl AsRef<Path>) -> PanelResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| PanelError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_json(&text).map_err(|reason| PanelError::Config {
            path: path.to_path_buf(),
            reason,
        })
    }

    pub fn from_json(text: &str) -> Result<Self, String> {
        serde_json::from_str(text).map_err(|e| e.to_string())
    }

    /// Loads `path` if given, else the file named by `FRONTPANEL_CONFIG`,
    /// else the defaults.
    pub fn resolve(path: Option<PathBuf>) -> PanelResult<Self> {
        match path.or_else(|| std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from)) {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

// --- Paths ---

/// Device nodes and attribute files.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PathsConfig {
    /// Front-panel firmware revision marker.
    pub fp_version: PathBuf,
    /// OLED panel device node.
    pub oled_device: PathBuf,
    /// Sink used instead of the OLED node on the legacy front-panel revision.
    pub null_device: PathBuf,
    /// Legacy lcd device node.
    pub lcd_device: PathBuf,
    /// Front-panel control device used for contrast presence and dimming.
    pub control_device: PathBuf,
    /// OLED brightness attributes, tried in order.
    pub oled_brightness: Vec<PathBuf>,
    /// Resolution override attributes (hexadecimal).
    pub xres: PathBuf,
    pub yres: PathBuf,
    pub bpp: PathBuf,
    /// Display-mode selector written once at start-up.
    pub right_half: PathBuf,
    /// VFD scroll timing attributes.
    pub scroll: ScrollPaths,
}

impl Default for PathsConfig {
    fn default() -> Self {
        PathsConfig {
            fp_version: PathBuf::from("/proc/stb/fp/version"),
            oled_device: PathBuf::from("/dev/dbox/oled0"),
            null_device: PathBuf::from("/dev/null"),
            lcd_device: PathBuf::from("/dev/dbox/lcd0"),
            control_device: PathBuf::from("/dev/dbox/fp0"),
            oled_brightness: vec![
                PathBuf::from("/proc/stb/lcd/oled_brightness"),
                PathBuf::from("/proc/stb/fp/oled_brightness"),
            ],
            xres: PathBuf::from("/proc/stb/lcd/xres"),
            yres: PathBuf::from("/proc/stb/lcd/yres"),
            bpp: PathBuf::from("/proc/stb/lcd/bpp"),
            right_half: PathBuf::from("/proc/stb/lcd/right_half"),
            scroll: ScrollPaths::default(),
        }
    }
}

// --- Display ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Mirror the panel at start-up.
    pub flipped: bool,
    /// Inversion mask at start-up. 0 leaves intensities alone.
    pub inverted: u8,
    /// Flipped-frame handling on the segmented panels.
    pub segmented_flip: SegmentedFlip,
    /// Text-only panel: frames are never sent, `render_text` is.
    pub text_lcd: bool,
    /// Literal written to the right-half selector.
    pub right_half_mode: String,
    /// fp version line that identifies the legacy front-panel revision.
    pub legacy_fp_version: String,
    /// Buffer geometry when nothing could be probed.
    pub fallback_geometry: DisplayGeometry,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            flipped: false,
            inverted: 0,
            segmented_flip: SegmentedFlip::default(),
            text_lcd: false,
            right_half_mode: "skin".to_string(),
            legacy_fp_version: "4".to_string(),
            fallback_geometry: DisplayGeometry::default(),
        }
    }
}

// --- Controls ---

/// Start-up values for the auxiliary controls. `None` leaves the hardware
/// setting untouched.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ControlsConfig {
    pub contrast: Option<i32>,
    pub brightness: Option<i32>,
    pub led_brightness: Option<i32>,
    pub led_deep_standby: Option<i32>,
    pub led_blinking_time: Option<i32>,
    pub scroll_delay: Option<i32>,
    pub initial_scroll_delay: Option<i32>,
    pub final_scroll_delay: Option<i32>,
    pub scroll_repeats: Option<i32>,
    /// Overrides the build-time scroll attribute format.
    pub scroll_format: Option<ScrollFormat>,
}
