// src/controls/scroll.rs

//! VFD text-scroll timing attributes.
//!
//! Most panels have none of these files; the accessors report that as
//! `None` and callers hide the corresponding settings.

use super::attr;
use crate::error::{PanelError, PanelResult};
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollAttribute {
    Delay,
    InitialDelay,
    FinalDelay,
    Repeats,
}

/// Number format the driver expects in the delay attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollFormat {
    Decimal,
    Hex,
}

impl Default for ScrollFormat {
    fn default() -> Self {
        if cfg!(feature = "scroll-hex") {
            ScrollFormat::Hex
        } else {
            ScrollFormat::Decimal
        }
    }
}

/// Locations of the four scroll attribute files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollPaths {
    pub delay: PathBuf,
    pub initial_delay: PathBuf,
    pub final_delay: PathBuf,
    pub repeats: PathBuf,
}

impl Default for ScrollPaths {
    fn default() -> Self {
        Self {
            delay: PathBuf::from("/proc/stb/lcd/scroll_delay"),
            initial_delay: PathBuf::from("/proc/stb/lcd/initial_scroll_delay"),
            final_delay: PathBuf::from("/proc/stb/lcd/final_scroll_delay"),
            repeats: PathBuf::from("/proc/stb/lcd/scroll_repeats"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScrollTiming {
    paths: ScrollPaths,
    format: ScrollFormat,
    text_lcd: bool,
}

impl ScrollTiming {
    pub fn new(paths: ScrollPaths, format: ScrollFormat, text_lcd: bool) -> Self {
        Self {
            paths,
            format,
            text_lcd,
        }
    }

    pub fn format(&self) -> ScrollFormat {
        self.format
    }

    fn path_of(&self, which: ScrollAttribute) -> &Path {
        match which {
            ScrollAttribute::Delay => &self.paths.delay,
            ScrollAttribute::InitialDelay => &self.paths.initial_delay,
            ScrollAttribute::FinalDelay => &self.paths.final_delay,
            ScrollAttribute::Repeats => &self.paths.repeats,
        }
    }

    /// The attribute path if the feature is available, checked on every call.
    ///
    /// Text-only panels scroll in firmware, so they never expose the delay
    /// settings; the repeat count is still honoured.
    pub fn path(&self, which: ScrollAttribute) -> Option<&Path> {
        if self.text_lcd && which != ScrollAttribute::Repeats {
            return None;
        }
        let path = self.path_of(which);
        attr::is_writable(path).then_some(path)
    }

    pub fn set(&self, which: ScrollAttribute, value: i32) -> PanelResult<()> {
        let path = self.path_of(which);
        // The repeat count is always decimal.
        let res = match (which, self.format) {
            (ScrollAttribute::Repeats, _) | (_, ScrollFormat::Decimal) => {
                attr::write_decimal(path, value)
            }
            (_, ScrollFormat::Hex) => attr::write_hex(path, value),
        };
        res.map_err(|source| {
            debug!("ScrollTiming: write {:?}={} failed: {}", which, value, source);
            PanelError::AttributeWrite {
                path: path.to_path_buf(),
                source,
            }
        })
    }
}
