//! Bulk-memory framebuffer
//!
//! Owns the full-frame pixel surface: `width * height * 2` bytes of
//! allocator-backed memory (PSRAM on the target), reserved once during
//! setup and never resized. Writes are bounds-checked; reads hand out the
//! whole buffer for transfer, since the RGB panel scan-out is full-frame.

use alloc::vec::Vec;

use crate::color::{self, BYTES_PER_PIXEL};
use crate::region::Region;

/// Framebuffer memory could not be reserved
///
/// Terminal for the owning component: there is no retry, the component
/// enters a permanently failed state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AllocationError;

/// Full-frame pixel surface in 5-6-5 packed color
pub struct FrameBuffer {
    width: u16,
    height: u16,
    data: Vec<u8>,
}

impl FrameBuffer {
    /// Reserve a `width` × `height` surface from the global allocator
    ///
    /// The reservation is fallible: on a platform without enough bulk
    /// memory this returns [`AllocationError`] instead of aborting.
    pub fn allocate(width: u16, height: u16) -> Result<Self, AllocationError> {
        let len = width as usize * height as usize * BYTES_PER_PIXEL;
        let data = reserve_bytes(len)?;
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Surface width in pixels
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Surface height in pixels
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Store one pixel
    ///
    /// Out-of-bounds coordinates are silently ignored: drawing callbacks
    /// may compute coordinates slightly out of range during scrolling or
    /// animation, and tolerating that here is part of the contract.
    pub fn write_pixel(&mut self, x: i32, y: i32, r: u8, g: u8, b: u8) {
        if x < 0 || x >= i32::from(self.width) || y < 0 || y >= i32::from(self.height) {
            return;
        }
        let offset = (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL;
        let encoded = color::encode(r, g, b).to_le_bytes();
        self.data[offset] = encoded[0];
        self.data[offset + 1] = encoded[1];
    }

    /// Fill the entire surface with one color
    ///
    /// Used at first successful setup so the panel never scans out
    /// undefined memory.
    pub fn clear(&mut self, r: u8, g: u8, b: u8) {
        let encoded = color::encode(r, g, b).to_le_bytes();
        for pixel in self.data.chunks_exact_mut(BYTES_PER_PIXEL) {
            pixel[0] = encoded[0];
            pixel[1] = encoded[1];
        }
    }

    /// Read-only view of the bytes to transfer for `region`
    ///
    /// This implementation only supports full-frame transfer, so the view
    /// is always the whole buffer regardless of the requested rectangle.
    pub fn region_bytes(&self, _region: &Region) -> &[u8] {
        &self.data
    }

    /// The whole surface as raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

fn reserve_bytes(len: usize) -> Result<Vec<u8>, AllocationError> {
    let mut data = Vec::new();
    data.try_reserve_exact(len).map_err(|_| AllocationError)?;
    data.resize(len, 0);
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel_at(fb: &FrameBuffer, x: u16, y: u16) -> [u8; 2] {
        let offset = (y as usize * fb.width() as usize + x as usize) * BYTES_PER_PIXEL;
        [fb.as_bytes()[offset], fb.as_bytes()[offset + 1]]
    }

    #[test]
    fn allocates_two_bytes_per_pixel() {
        let fb = FrameBuffer::allocate(10, 10).unwrap();
        assert_eq!(fb.as_bytes().len(), 200);
        assert!(fb.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn impossible_reservation_fails_cleanly() {
        assert_eq!(reserve_bytes(usize::MAX), Err(AllocationError));
    }

    #[test]
    fn addressing_is_row_major_little_endian() {
        let mut fb = FrameBuffer::allocate(10, 10).unwrap();
        fb.write_pixel(3, 2, 255, 0, 0);
        let expected = crate::color::encode(255, 0, 0).to_le_bytes();
        assert_eq!(pixel_at(&fb, 3, 2), expected);
        // Low byte first
        assert_eq!(expected, [0x00, 0xF8]);
    }

    #[test]
    fn out_of_bounds_writes_are_no_ops() {
        let mut fb = FrameBuffer::allocate(10, 10).unwrap();
        let before = fb.as_bytes().to_vec();
        fb.write_pixel(-1, 0, 255, 255, 255);
        fb.write_pixel(0, -1, 255, 255, 255);
        fb.write_pixel(10, 0, 255, 255, 255);
        fb.write_pixel(0, 10, 255, 255, 255);
        fb.write_pixel(i32::MAX, i32::MAX, 255, 255, 255);
        assert_eq!(fb.as_bytes(), &before[..]);
    }

    #[test]
    fn last_write_wins() {
        let mut fb = FrameBuffer::allocate(4, 4).unwrap();
        fb.write_pixel(1, 1, 255, 0, 0);
        fb.write_pixel(1, 1, 0, 0, 255);
        assert_eq!(
            pixel_at(&fb, 1, 1),
            crate::color::encode(0, 0, 255).to_le_bytes()
        );
    }

    #[test]
    fn clear_fills_every_pixel() {
        let mut fb = FrameBuffer::allocate(5, 3).unwrap();
        fb.clear(0, 255, 0);
        let expected = crate::color::encode(0, 255, 0).to_le_bytes();
        for chunk in fb.as_bytes().chunks_exact(2) {
            assert_eq!(chunk, expected);
        }
    }

    #[test]
    fn region_view_is_always_the_full_frame() {
        let mut fb = FrameBuffer::allocate(8, 8).unwrap();
        fb.write_pixel(0, 0, 1, 2, 3);
        let partial = Region::new(2, 2, 4, 4);
        assert_eq!(fb.region_bytes(&partial).len(), 8 * 8 * 2);
    }
}
