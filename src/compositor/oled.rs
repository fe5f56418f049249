// src/compositor/oled.rs

//! 64x64 4-bit OLED: two source pixels per output byte.

use super::{sample, FramePacker, Transform};
use crate::buffer::PixelBuffer;
use std::borrow::Cow;

pub const SIDE: usize = 64;
pub const FRAME_LEN: usize = SIDE * SIDE;
const SOURCE_STRIDE: usize = 132;
// The first two source columns are not visible on this panel.
const SOURCE_X_OFFSET: usize = 2;

#[derive(Debug, Clone, Copy, Default)]
pub struct OledPacker;

impl FramePacker for OledPacker {
    fn pack<'a>(&self, buffer: &'a PixelBuffer, transform: Transform) -> Option<Cow<'a, [u8]>> {
        let src = buffer.as_slice();
        let mut raw = vec![0u8; FRAME_LEN];
        for y in 0..SIDE {
            for x in 0..SIDE {
                let at = y * SOURCE_STRIDE + x * 2 + SOURCE_X_OFFSET;
                let mut pix = (sample(src, at) & 0xF0) | (sample(src, at + 1) >> 4);
                if transform.inverted != 0 {
                    pix = 0xFF - pix;
                }
                if transform.flipped {
                    // 4bpp device: mirroring swaps the nibbles, not the bits.
                    raw[(SIDE - 1 - y) * SIDE + (SIDE - 1 - x)] = pix.rotate_left(4);
                } else {
                    raw[y * SIDE + x] = pix;
                }
            }
        }
        Some(Cow::Owned(raw))
    }
}
