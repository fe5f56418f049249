// src/geometry.rs

//! Pixel geometry of the logical front-panel buffer.

use serde::{Deserialize, Serialize};

/// Largest frame buffer the core will allocate.
pub const MAX_BUFFER_LEN: usize = 16 * 1024 * 1024;

/// Width, height and depth of the logical pixel buffer.
///
/// The buffer is always tightly packed: one row occupies exactly
/// `width * bits_per_pixel / 8` bytes and there is no trailing padding
/// beyond the last row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DisplayGeometry {
    pub width: u32,
    pub height: u32,
    pub bits_per_pixel: u32,
}

impl DisplayGeometry {
    pub const fn new(width: u32, height: u32, bits_per_pixel: u32) -> Self {
        Self {
            width,
            height,
            bits_per_pixel,
        }
    }

    /// Bytes per row, or `None` if it does not fit in `usize`.
    pub fn stride(&self) -> Option<usize> {
        (self.width as usize)
            .checked_mul(self.bits_per_pixel as usize)
            .map(|bits| bits / 8)
    }

    /// Total bytes needed to hold one frame, or `None` on overflow.
    pub fn buffer_len(&self) -> Option<usize> {
        self.stride()?.checked_mul(self.height as usize)
    }

    /// Byte length of a buffer with this geometry, if one may be allocated.
    ///
    /// Rejects zero dimensions, rows narrower than one byte, and anything
    /// above `MAX_BUFFER_LEN`.
    pub fn checked_len(&self) -> Option<usize> {
        if self.width == 0 || self.height == 0 || self.bits_per_pixel == 0 {
            return None;
        }
        self.buffer_len().filter(|&len| len > 0 && len <= MAX_BUFFER_LEN)
    }
}

impl Default for DisplayGeometry {
    fn default() -> Self {
        // Used when nothing could be probed.
        Self::new(32, 32, 8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stride_and_len_follow_depth() {
        let g = DisplayGeometry::new(132, 64, 8);
        assert_eq!(g.stride(), Some(132));
        assert_eq!(g.buffer_len(), Some(132 * 64));

        let g = DisplayGeometry::new(400, 240, 16);
        assert_eq!(g.stride(), Some(800));
        assert_eq!(g.buffer_len(), Some(800 * 240));

        let g = DisplayGeometry::new(128, 64, 4);
        assert_eq!(g.stride(), Some(64));
        assert_eq!(g.buffer_len(), Some(64 * 64));
    }

    #[test]
    fn default_is_fallback_32x32x8() {
        assert_eq!(DisplayGeometry::default(), DisplayGeometry::new(32, 32, 8));
    }

    #[test]
    fn checked_len_rejects_unusable_geometry() {
        assert_eq!(DisplayGeometry::new(132, 64, 8).checked_len(), Some(132 * 64));
        assert_eq!(DisplayGeometry::new(0, 64, 8).checked_len(), None);
        assert_eq!(DisplayGeometry::new(132, 0, 8).checked_len(), None);
        assert_eq!(DisplayGeometry::new(132, 64, 0).checked_len(), None);
        // Narrower than one byte per row.
        assert_eq!(DisplayGeometry::new(1, 64, 4).checked_len(), None);
        assert_eq!(DisplayGeometry::new(0xffff, 0xffff, 0x20).checked_len(), None);
    }

    #[test]
    fn huge_values_do_not_overflow() {
        let g = DisplayGeometry::new(u32::MAX, u32::MAX, u32::MAX);
        assert_eq!(g.buffer_len(), None);
        assert_eq!(g.checked_len(), None);
    }
}
