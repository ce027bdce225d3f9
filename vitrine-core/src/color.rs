//! 5-6-5 pixel encoding
//!
//! The panel latches 16 data lines per pixel clock: 5 bits red, 6 bits
//! green, 5 bits blue, red in the high bits. No alpha, no dithering, no
//! gamma correction. When stored into a byte-addressed buffer the value is
//! little-endian (low byte first), matching what the panel peripheral
//! expects on the wire.

/// Bytes per packed pixel in the framebuffer
pub const BYTES_PER_PIXEL: usize = 2;

/// Pack an 8-bit-per-channel color into 5-6-5
///
/// Keeps the top 5 bits of red, top 6 of green, top 5 of blue.
pub const fn encode(r: u8, g: u8, b: u8) -> u16 {
    ((r as u16 & 0xF8) << 8) | ((g as u16 & 0xFC) << 3) | (b as u16 >> 3)
}

/// Top 5 bits of the red channel, right-aligned
pub const fn red_bits(encoded: u16) -> u8 {
    (encoded >> 11) as u8
}

/// Top 6 bits of the green channel, right-aligned
pub const fn green_bits(encoded: u16) -> u8 {
    ((encoded >> 5) & 0x3F) as u8
}

/// Top 5 bits of the blue channel, right-aligned
pub const fn blue_bits(encoded: u16) -> u8 {
    (encoded & 0x1F) as u8
}
