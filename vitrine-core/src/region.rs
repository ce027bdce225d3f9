//! Repaint region rectangles
//!
//! A region names the inclusive pixel rectangle that changed and must be
//! transferred to the panel. Regions are ephemeral values: constructed per
//! repaint, consumed by the transport, never retained.

use crate::color::BYTES_PER_PIXEL;

/// Inclusive pixel rectangle, `x1 <= x2`, `y1 <= y2`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Region {
    pub x1: u16,
    pub y1: u16,
    pub x2: u16,
    pub y2: u16,
}

impl Region {
    /// Region covering the rectangle `(x1,y1)..=(x2,y2)`
    pub const fn new(x1: u16, y1: u16, x2: u16, y2: u16) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// The full-frame region for a `width` × `height` surface
    ///
    /// Used whenever the transport cannot do partial updates or a full
    /// redraw was requested. Both dimensions must be positive; a zero
    /// dimension has no inclusive bound to name.
    pub const fn full(width: u16, height: u16) -> Self {
        debug_assert!(width > 0 && height > 0);
        Self {
            x1: 0,
            y1: 0,
            x2: width.wrapping_sub(1),
            y2: height.wrapping_sub(1),
        }
    }

    /// Width in pixels
    pub const fn width(&self) -> u16 {
        self.x2 - self.x1 + 1
    }

    /// Height in pixels
    pub const fn height(&self) -> u16 {
        self.y2 - self.y1 + 1
    }

    /// Number of pixels covered
    pub const fn pixel_count(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    /// Byte length of the packed pixel data for this region
    pub const fn byte_len(&self) -> usize {
        self.pixel_count() * BYTES_PER_PIXEL
    }

    /// Whether the region is well-formed and lies inside a
    /// `width` × `height` surface
    pub const fn fits(&self, width: u16, height: u16) -> bool {
        self.x1 <= self.x2 && self.y1 <= self.y2 && self.x2 < width && self.y2 < height
    }
}
