//! Panel transport trait
//!
//! The transport owns the timing-panel peripheral handle. After one-time
//! configuration the panel hardware scans continuously on its own; the
//! only runtime operation is pushing pixel data for a rectangle.

use crate::region::Region;

/// One-time panel setup failed
///
/// Fatal: the owning component is marked permanently failed and performs
/// no further hardware access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigurationError {
    /// Timing values out of range
    InvalidTiming,
    /// Duplicate data/control pin assignment
    PinConflict,
    /// Panel reset pulse failed
    ResetFailed,
    /// Panel initialization handshake failed
    InitFailed,
    /// Peripheral driver rejected the configuration
    PeripheralFailed,
}

/// A single pixel transfer failed
///
/// Transient: logged and skipped, the next scheduled repaint retries. The
/// panel keeps scanning the previous frame's content in the meantime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// Region does not fit the panel resolution
    RegionOutOfBounds,
    /// Pixel data length does not match the region
    LengthMismatch,
    /// `push_region` before successful `configure`
    NotConfigured,
    /// The peripheral reported a transfer failure
    Transfer,
}

/// Pixel delivery to the timing-driven RGB panel
pub trait PanelTransport {
    /// One-time setup: reset pulse, init handshake, timing configuration
    fn configure(&mut self) -> Result<(), ConfigurationError>;

    /// Transfer pixel data for `region` into the panel's scan buffer
    ///
    /// `pixels` is 5-6-5 packed little-endian, row-major for the region.
    fn push_region(&mut self, region: &Region, pixels: &[u8]) -> Result<(), TransportError>;

    /// Panel resolution `(width, height)` in pixels
    fn resolution(&self) -> (u16, u16);
}
