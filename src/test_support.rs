// src/test_support.rs

//! Shared fixtures for unit tests.

use crate::config::{Config, PathsConfig};
use crate::controls::ScrollPaths;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// A config whose every path lives inside `dir`. Nothing is created.
pub(crate) fn config_in(dir: &TempDir) -> Config {
    let p = |name: &str| dir.path().join(name);
    let mut config = Config::default();
    config.paths = PathsConfig {
        fp_version: p("fp_version"),
        oled_device: p("oled0"),
        null_device: p("null"),
        lcd_device: p("lcd0"),
        control_device: p("fp0"),
        oled_brightness: vec![p("lcd_oled_brightness"), p("fp_oled_brightness")],
        xres: p("xres"),
        yres: p("yres"),
        bpp: p("bpp"),
        right_half: p("right_half"),
        scroll: ScrollPaths {
            delay: p("scroll_delay"),
            initial_delay: p("initial_scroll_delay"),
            final_delay: p("final_scroll_delay"),
            repeats: p("scroll_repeats"),
        },
    };
    config
}

pub(crate) fn touch(path: &Path) {
    fs::write(path, "").unwrap();
}
