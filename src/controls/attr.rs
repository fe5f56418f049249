// src/controls/attr.rs

//! Small text attribute files (`/proc/stb/...`).
//!
//! Writes never create files: an attribute that does not exist means the
//! driver does not offer the feature.

use nix::unistd::{access, AccessFlags};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

/// True when `path` exists and this process may write it.
pub fn is_writable(path: &Path) -> bool {
    access(path, AccessFlags::W_OK).is_ok()
}

pub fn write_str(path: &Path, text: &str) -> io::Result<()> {
    let mut file = OpenOptions::new().write(true).truncate(true).open(path)?;
    file.write_all(text.as_bytes())
}

pub fn write_decimal(path: &Path, value: i32) -> io::Result<()> {
    write_str(path, &value.to_string())
}

pub fn write_hex(path: &Path, value: i32) -> io::Result<()> {
    write_str(path, &format!("{:x}", value))
}

/// First line of the file including its newline, like `fgets`.
pub fn read_first_line(path: &Path) -> io::Result<String> {
    let text = fs::read_to_string(path)?;
    let end = text.find('\n').map_or(text.len(), |i| i + 1);
    Ok(text[..end].to_string())
}

/// Reads a hexadecimal number the way the drivers print them: optional
/// leading whitespace, optional `0x`, then hex digits.
pub fn read_hex(path: &Path) -> io::Result<Option<u32>> {
    Ok(parse_hex(&fs::read_to_string(path)?))
}

pub fn parse_hex(text: &str) -> Option<u32> {
    let text = text.trim_start();
    let text = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    let digits = text
        .find(|c: char| !c.is_ascii_hexdigit())
        .map_or(text, |end| &text[..end]);
    u32::from_str_radix(digits, 16).ok()
}
