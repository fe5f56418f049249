// src/buffer.rs

//! The single CPU-side intensity buffer that renderers paint into.

use crate::error::{PanelError, PanelResult};
use crate::geometry::DisplayGeometry;
use log::{debug, warn};

/// Owned, zero-initialised frame storage.
///
/// Reconfiguring replaces the storage wholesale; nothing from a previous
/// geometry survives. The geometry is validated before anything is
/// allocated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    geometry: DisplayGeometry,
    stride: usize,
    data: Box<[u8]>,
}

impl PixelBuffer {
    /// Allocates a zeroed buffer, or fails if `geometry` has a zero
    /// dimension, overflows, or exceeds `MAX_BUFFER_LEN`.
    pub fn new(geometry: DisplayGeometry) -> PanelResult<Self> {
        let (Some(len), Some(stride)) = (geometry.checked_len(), geometry.stride()) else {
            warn!(
                "PixelBuffer: rejecting geometry {}x{}x{}",
                geometry.width, geometry.height, geometry.bits_per_pixel
            );
            return Err(PanelError::InvalidGeometry {
                width: geometry.width,
                height: geometry.height,
                bits_per_pixel: geometry.bits_per_pixel,
            });
        };
        debug!(
            "PixelBuffer: ({}x{}x{}) {} bytes, stride {}",
            geometry.width, geometry.height, geometry.bits_per_pixel, len, stride
        );
        Ok(Self {
            geometry,
            stride,
            data: vec![0u8; len].into_boxed_slice(),
        })
    }

    /// Drops the current storage and allocates a fresh zeroed one. An
    /// unusable geometry leaves the current buffer untouched.
    pub fn configure(&mut self, width: u32, height: u32, bits_per_pixel: u32) -> PanelResult<()> {
        *self = Self::new(DisplayGeometry::new(width, height, bits_per_pixel))?;
        Ok(())
    }

    pub fn geometry(&self) -> DisplayGeometry {
        self.geometry
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn width(&self) -> u32 {
        self.geometry.width
    }

    pub fn height(&self) -> u32 {
        self.geometry.height
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Raw write access for rasterizers.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Mutable view of row `y`, or `None` past the last row.
    pub fn row_mut(&mut self, y: u32) -> Option<&mut [u8]> {
        let stride = self.stride();
        let start = (y as usize).checked_mul(stride)?;
        self.data.get_mut(start..start + stride)
    }

    pub fn fill(&mut self, value: u8) {
        self.data.fill(value);
    }
}

impl Default for PixelBuffer {
    fn default() -> Self {
        let geometry = DisplayGeometry::default();
        let stride = geometry.stride().unwrap_or_default();
        Self {
            geometry,
            stride,
            data: vec![0u8; stride * geometry.height as usize].into_boxed_slice(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn configure_sizes_buffer_from_geometry() {
        let mut buf = PixelBuffer::default();
        for &(w, h, bpp) in &[(132, 64, 8), (64, 64, 4), (400, 240, 16), (1, 1, 8)] {
            buf.configure(w, h, bpp).unwrap();
            assert_eq!(buf.stride(), (w * bpp / 8) as usize);
            assert_eq!(buf.len(), buf.stride() * h as usize);
        }
    }

    #[test]
    fn reconfigure_always_zero_fills() {
        let mut buf = PixelBuffer::new(DisplayGeometry::new(132, 64, 8)).unwrap();
        buf.fill(0xAB);

        buf.configure(32, 32, 8).unwrap();
        assert!(buf.as_slice().iter().all(|&b| b == 0));

        buf.fill(0x11);
        buf.configure(132, 64, 8).unwrap();
        assert_eq!(buf.len(), 132 * 64);
        assert!(buf.as_slice().iter().all(|&b| b == 0));
    }

    #[test]
    fn row_mut_is_bounded() {
        let mut buf = PixelBuffer::new(DisplayGeometry::new(4, 2, 8)).unwrap();
        buf.row_mut(1).unwrap().copy_from_slice(&[1, 2, 3, 4]);
        assert_eq!(buf.as_slice(), &[0, 0, 0, 0, 1, 2, 3, 4]);
        assert!(buf.row_mut(2).is_none());
    }

    #[test]
    fn unusable_geometry_is_rejected_without_allocating() {
        assert!(matches!(
            PixelBuffer::new(DisplayGeometry::new(0xffff_ffff, 0xffff_ffff, 0x20)),
            Err(PanelError::InvalidGeometry { .. })
        ));
        assert!(PixelBuffer::new(DisplayGeometry::new(0, 64, 8)).is_err());
    }

    #[test]
    fn failed_configure_keeps_previous_buffer() {
        let mut buf = PixelBuffer::new(DisplayGeometry::new(4, 2, 8)).unwrap();
        buf.fill(9);
        assert!(buf.configure(0xffff, 0xffff, 0x20).is_err());
        assert_eq!(buf.geometry(), DisplayGeometry::new(4, 2, 8));
        assert_eq!(buf.as_slice(), &[9; 8]);
    }
}
