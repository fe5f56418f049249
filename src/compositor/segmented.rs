// src/compositor/segmented.rs

//! 1-bit page layout of the segmented panels.
//!
//! The panel is addressed as 8 pages of 132 columns. Each output byte holds
//! 8 vertically stacked pixels of one column, bit 0 on top. The source is
//! always read with a 132-byte stride, whatever the configured geometry.

use super::{sample, FramePacker, Transform};
use crate::buffer::PixelBuffer;
use log::trace;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

pub const COLUMNS: usize = 132;
pub const PAGES: usize = 8;
pub const FRAME_LEN: usize = COLUMNS * PAGES;
/// Source intensities at or above this light the segment.
pub const THRESHOLD: u8 = 108;

/// How a flipped frame is handled on the segmented panels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentedFlip {
    /// Mirror pages and columns and reverse the bits in each byte.
    #[default]
    Mirror,
    /// Do not transmit flipped frames at all.
    Suppress,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SegmentedPacker {
    flip: SegmentedFlip,
}

impl SegmentedPacker {
    pub fn new(flip: SegmentedFlip) -> Self {
        Self { flip }
    }

    fn column_byte(src: &[u8], page: usize, x: usize) -> u8 {
        (0..8).fold(0u8, |acc, bit| {
            let lit = sample(src, (page * 8 + bit) * COLUMNS + x) >= THRESHOLD;
            acc | (u8::from(lit) << bit)
        })
    }
}

impl FramePacker for SegmentedPacker {
    fn pack<'a>(&self, buffer: &'a PixelBuffer, transform: Transform) -> Option<Cow<'a, [u8]>> {
        if transform.flipped && self.flip == SegmentedFlip::Suppress {
            trace!("SegmentedPacker: flipped frame suppressed");
            return None;
        }

        let src = buffer.as_slice();
        let mut raw = vec![0u8; FRAME_LEN];
        for page in 0..PAGES {
            for x in 0..COLUMNS {
                let pix = Self::column_byte(src, page, x) ^ transform.inverted;
                if transform.flipped {
                    raw[(PAGES - 1 - page) * COLUMNS + (COLUMNS - 1 - x)] = pix.reverse_bits();
                } else {
                    raw[page * COLUMNS + x] = pix;
                }
            }
        }
        Some(Cow::Owned(raw))
    }
}
