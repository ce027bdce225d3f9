//! Touch sampler trait and pointer state
//!
//! The sampler polls a register-addressed touch chip and debounces it into
//! a single-point pointer stream. Multi-touch hardware is reduced to the
//! first reported point; the host UI's pointer model is single-touch.

/// Normalized pointer state, recomputed on every poll
///
/// When `pressed` is false, `x`/`y` hold the last-known position rather
/// than zeros. Consumers must not treat the position as meaningful on
/// release except to avoid discontinuity in pointer trails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchPoint {
    /// Horizontal position in panel space
    pub x: u16,
    /// Vertical position in panel space
    pub y: u16,
    /// Whether a finger is currently down
    pub pressed: bool,
}

impl TouchPoint {
    /// Released pointer at the origin (the state before any touch)
    pub const fn idle() -> Self {
        Self {
            x: 0,
            y: 0,
            pressed: false,
        }
    }
}

/// The touch chip did not come up during setup
///
/// Non-fatal to the owning display: touch becomes permanently unavailable
/// for the session, the display path is unaffected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TouchInitError {
    /// The chip never acknowledged the identity read
    NoAck,
    /// The reset sequence could not be driven
    ResetFailed,
}

/// Polled single-point touch source
pub trait TouchSampler {
    /// Reset the chip and verify its identity (one-time)
    fn initialize(&mut self) -> Result<(), TouchInitError>;

    /// Sample the current pointer state
    ///
    /// Never fails: transient bus noise reads as "not touched this tick".
    fn poll(&mut self) -> TouchPoint;
}
