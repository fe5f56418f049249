// src/controls/tests.rs

use super::*;
use crate::device::mock::{ControlOp, RecordingChannel};
use std::fs;
use tempfile::{tempdir, TempDir};
use test_log::test;

fn surface_in(dir: &TempDir) -> ControlSurface {
    ControlSurface::new(
        dir.path().join("fp0"),
        vec![
            dir.path().join("lcd_oled_brightness"),
            dir.path().join("fp_oled_brightness"),
        ],
        ScrollTiming::new(ScrollPaths::default(), ScrollFormat::Decimal, false),
    )
}

#[test]
fn contrast_without_display_is_silent_success() {
    let dir = tempdir().unwrap();
    let surface = surface_in(&dir);
    let mut display = DeviceHandle::absent();
    assert!(surface.set_contrast(&mut display, 20).is_ok());
}

#[test]
fn contrast_requires_control_device() {
    let dir = tempdir().unwrap();
    let surface = surface_in(&dir);
    let channel = RecordingChannel::new();
    let rec = channel.recording();
    let mut display = DeviceHandle::new(Box::new(channel));

    let err = surface.set_contrast(&mut display, 20).unwrap_err();
    assert!(matches!(err, PanelError::ControlDeviceUnavailable { .. }));
    assert!(rec.lock().unwrap().ops.is_empty());
}

#[test]
fn contrast_is_issued_on_display_descriptor() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("fp0"), "").unwrap();
    let surface = surface_in(&dir);
    let channel = RecordingChannel::new();
    let rec = channel.recording();
    let mut display = DeviceHandle::new(Box::new(channel));

    surface.set_contrast(&mut display, 37).unwrap();
    assert_eq!(rec.lock().unwrap().ops, vec![ControlOp::Contrast(37)]);
}

#[test]
fn brightness_prefers_first_writable_attribute() {
    let dir = tempdir().unwrap();
    let first = dir.path().join("lcd_oled_brightness");
    let second = dir.path().join("fp_oled_brightness");
    fs::write(&second, "").unwrap();
    let surface = surface_in(&dir);
    let display = DeviceHandle::new(Box::new(RecordingChannel::new()));

    surface.set_brightness(&display, 128).unwrap();
    assert!(!first.exists());
    assert_eq!(fs::read_to_string(&second).unwrap(), "128");

    fs::write(&first, "").unwrap();
    surface.set_brightness(&display, 7).unwrap();
    assert_eq!(fs::read_to_string(&first).unwrap(), "7");
    assert_eq!(fs::read_to_string(&second).unwrap(), "128");
}

#[test]
fn brightness_falls_back_to_control_device() {
    let dir = tempdir().unwrap();
    let surface = surface_in(&dir);
    let display = DeviceHandle::new(Box::new(RecordingChannel::new()));

    // Neither attribute nor control device.
    assert!(matches!(
        surface.set_brightness(&display, 3),
        Err(PanelError::ControlDeviceUnavailable { .. })
    ));

    // A regular file stands in for the control device; its ioctl fails and
    // is only logged.
    fs::write(dir.path().join("fp0"), "").unwrap();
    assert!(surface.set_brightness(&display, 3).is_ok());
}

#[test]
fn brightness_skips_attribute_that_cannot_be_opened() {
    let dir = tempdir().unwrap();
    let first = dir.path().join("lcd_oled_brightness");
    let second = dir.path().join("fp_oled_brightness");
    // Passes the access check but cannot be opened for writing.
    fs::create_dir(&first).unwrap();
    let surface = surface_in(&dir);
    let display = DeviceHandle::new(Box::new(RecordingChannel::new()));

    fs::write(&second, "").unwrap();
    surface.set_brightness(&display, 64).unwrap();
    assert_eq!(fs::read_to_string(&second).unwrap(), "64");

    fs::remove_file(&second).unwrap();
    assert!(matches!(
        surface.set_brightness(&display, 64),
        Err(PanelError::ControlDeviceUnavailable { .. })
    ));

    fs::write(dir.path().join("fp0"), "").unwrap();
    assert!(surface.set_brightness(&display, 64).is_ok());
}

#[test]
fn brightness_without_display_is_noop() {
    let dir = tempdir().unwrap();
    let attr = dir.path().join("lcd_oled_brightness");
    fs::write(&attr, "").unwrap();
    let surface = surface_in(&dir);

    surface.set_brightness(&DeviceHandle::absent(), 99).unwrap();
    assert_eq!(fs::read_to_string(&attr).unwrap(), "");
}

#[test]
fn led_tags_select_channel_and_unknown_is_ignored() {
    let dir = tempdir().unwrap();
    let surface = surface_in(&dir);
    let channel = RecordingChannel::new();
    let rec = channel.recording();
    let mut display = DeviceHandle::new(Box::new(channel));

    surface.set_led(&mut display, 0xff, 0);
    surface.set_led(&mut display, 4, 1);
    surface.set_led(&mut display, 300, 2);
    surface.set_led(&mut display, 1, 9);

    assert_eq!(
        rec.lock().unwrap().ops,
        vec![
            ControlOp::Led(LedChannel::Brightness, 0xff),
            ControlOp::Led(LedChannel::DeepStandby, 4),
            ControlOp::Led(LedChannel::BlinkingTime, 44),
        ]
    );
}

#[test]
fn led_without_display_is_noop() {
    let dir = tempdir().unwrap();
    let surface = surface_in(&dir);
    surface.set_led(&mut DeviceHandle::absent(), 1, 0);
}
