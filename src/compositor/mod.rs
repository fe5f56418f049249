// src/compositor/mod.rs

//! Frame packing: logical intensity buffer to device byte stream.
//!
//! One `FramePacker` per `DisplayVariant`, chosen once when the panel is
//! built (Strategy Pattern). A packer only prepares bytes; the panel issues
//! the single write.
//!
//! - `segmented`: 1-bit 132x8-page panels (SegmentedBinary, LegacySegmented)
//! - `oled`: 64x64 4-bit OLED
//! - `framebuffer`: panels that report their own geometry

pub mod framebuffer;
pub mod oled;
pub mod segmented;


pub use framebuffer::FramebufferPacker;
pub use oled::OledPacker;
pub use segmented::{SegmentedFlip, SegmentedPacker};

use crate::buffer::PixelBuffer;
use crate::variant::DisplayVariant;
use std::borrow::Cow;

/// Geometric and intensity transform applied on every frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Transform {
    /// Mirror both axes.
    pub flipped: bool,
    /// XOR mask applied to packed bytes. Zero disables inversion.
    pub inverted: u8,
}

impl Transform {
    pub fn is_identity(&self) -> bool {
        !self.flipped && self.inverted == 0
    }
}

/// Converts the logical buffer into the wire format of one variant.
pub trait FramePacker: Send + Sync + std::fmt::Debug {
    /// Bytes to hand to the device in one write, or `None` when nothing
    /// should be transmitted for this transform.
    ///
    /// Borrows the buffer unchanged when no conversion is needed.
    fn pack<'a>(&self, buffer: &'a PixelBuffer, transform: Transform) -> Option<Cow<'a, [u8]>>;
}

/// Picks the packer for `variant`.
pub fn packer_for(variant: DisplayVariant, segmented_flip: SegmentedFlip) -> Box<dyn FramePacker> {
    match variant {
        DisplayVariant::SegmentedBinary | DisplayVariant::LegacySegmented => {
            Box::new(SegmentedPacker::new(segmented_flip))
        }
        DisplayVariant::MonochromeOled => Box::new(OledPacker),
        DisplayVariant::GenericFramebuffer => Box::new(FramebufferPacker),
    }
}

/// Source byte at `index`, reading past the end as dark.
#[inline]
pub(crate) fn sample(src: &[u8], index: usize) -> u8 {
    src.get(index).copied().unwrap_or(0)
}
