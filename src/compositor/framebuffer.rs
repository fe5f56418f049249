// src/compositor/framebuffer.rs

use super::{FramePacker, Transform};
use crate::buffer::PixelBuffer;
use log::trace;
use std::borrow::Cow;

/// Panels that report their own resolution take the buffer as-is.
///
/// Flip and invert are only supported for 8bpp buffers without row
/// padding; any other layout is sent untransformed.
#[derive(Debug, Clone, Copy, Default)]
pub struct FramebufferPacker;

impl FramePacker for FramebufferPacker {
    fn pack<'a>(&self, buffer: &'a PixelBuffer, transform: Transform) -> Option<Cow<'a, [u8]>> {
        let src = buffer.as_slice();
        let geometry = buffer.geometry();
        if transform.is_identity() {
            return Some(Cow::Borrowed(src));
        }
        if geometry.bits_per_pixel != 8 || buffer.stride() != geometry.width as usize {
            trace!(
                "FramebufferPacker: transform ignored for {}bpp stride {} width {}",
                geometry.bits_per_pixel,
                buffer.stride(),
                geometry.width
            );
            return Some(Cow::Borrowed(src));
        }

        let mask = transform.inverted;
        let raw: Vec<u8> = if transform.flipped {
            // Mirroring both axes of a packed 8bpp frame reverses its bytes.
            src.iter().rev().map(|p| p ^ mask).collect()
        } else {
            src.iter().map(|p| p ^ mask).collect()
        };
        Some(Cow::Owned(raw))
    }
}
