// src/main.rs

//! `frontpanel`: probes the panel, applies the configured controls and
//! pushes one frame.
//!
//! Usage: `frontpanel [--test-pattern] [CONFIG]`. Without `CONFIG` the file
//! named by `FRONTPANEL_CONFIG` is used, else the built-in defaults.

use anyhow::{bail, Context};
use frontpanel::{Config, FrameStatus, Panel, PixelBuffer};
use log::{info, warn};
use std::path::PathBuf;

struct Args {
    config: Option<PathBuf>,
    test_pattern: bool,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = Args {
        config: None,
        test_pattern: false,
    };
    for arg in std::env::args_os().skip(1) {
        match arg.to_str() {
            Some("--test-pattern") => args.test_pattern = true,
            Some(flag) if flag.starts_with("--") => bail!("unknown option {}", flag),
            _ if args.config.is_none() => args.config = Some(PathBuf::from(&arg)),
            _ => bail!("more than one config file given"),
        }
    }
    Ok(args)
}

/// Vertical bars, alternating full and zero intensity every 8 columns.
fn draw_test_pattern(buffer: &mut PixelBuffer) {
    let width = buffer.width() as usize;
    let bytes_per_pixel = (buffer.geometry().bits_per_pixel as usize).div_ceil(8).max(1);
    for y in 0..buffer.height() {
        let Some(row) = buffer.row_mut(y) else { break };
        for (i, byte) in row.iter_mut().enumerate() {
            let x = i / bytes_per_pixel;
            if x < width {
                *byte = if (x / 8) % 2 == 0 { 0xFF } else { 0x00 };
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Default filter is "info" if RUST_LOG is not set.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    let args = parse_args()?;
    let config = Config::resolve(args.config).context("Failed to load configuration")?;

    let mut panel = Panel::open(&config);
    if let Some(report) = panel.report() {
        info!(
            "Detected {} ({}x{}x{}) at {:?}",
            report.variant,
            report.geometry.width,
            report.geometry.height,
            report.geometry.bits_per_pixel,
            report.device_path
        );
    }
    panel.apply_controls(&config.controls);

    if args.test_pattern {
        draw_test_pattern(panel.buffer_mut());
    }
    match panel.update_frame().context("Failed to push frame")? {
        FrameStatus::Written(n) => info!("Frame written ({} bytes)", n),
        FrameStatus::NoDevice => warn!("No front panel attached"),
        other => warn!("Frame not written: {:?}", other),
    }

    panel.close();
    Ok(())
}
