// src/device/ioctl.rs

//! Control operation codes understood by the front-panel drivers.
//!
//! The drivers use "bad" (non-`_IOC`-encoded) request numbers, so every
//! wrapper is generated with the `_bad` flavour of nix's ioctl macros.

const LCDSET: u32 = 0x1000;

pub const LCD_IOCTL_ASC_MODE: u32 = 21 | LCDSET;
pub const LCD_IOCTL_SRV: u32 = 10 | LCDSET;
pub const FP_IOCTL_LCD_DIMM: u32 = 3;
pub const LED_IOCTL_BRIGHTNESS_NORMAL: u32 = 0x10;
pub const LED_IOCTL_BRIGHTNESS_DEEPSTANDBY: u32 = 0x11;
pub const LED_IOCTL_BLINKING_TIME: u32 = 0x12;

/// Pixel transfer mode of the lcd driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum LcdMode {
    Ascii = 0,
    Binary = 1,
}

nix::ioctl_write_ptr_bad!(lcd_set_mode, LCD_IOCTL_ASC_MODE, libc::c_int);
nix::ioctl_write_ptr_bad!(lcd_set_contrast, LCD_IOCTL_SRV, libc::c_int);
nix::ioctl_write_ptr_bad!(fp_set_dimming, FP_IOCTL_LCD_DIMM, libc::c_int);
nix::ioctl_write_int_bad!(led_set_brightness_normal, LED_IOCTL_BRIGHTNESS_NORMAL);
nix::ioctl_write_int_bad!(led_set_brightness_deep_standby, LED_IOCTL_BRIGHTNESS_DEEPSTANDBY);
nix::ioctl_write_int_bad!(led_set_blinking_time, LED_IOCTL_BLINKING_TIME);
