//! Blocking delay abstraction
//!
//! Reset sequencing for the touch controller needs millisecond-scale
//! blocking waits during setup. Chip HALs implement this over their timer
//! peripheral; host tests implement it as a no-op that records durations.

/// Blocking delay provider
pub trait DelayProvider {
    /// Block for at least `us` microseconds
    fn delay_us(&mut self, us: u32);

    /// Block for at least `ms` milliseconds
    fn delay_ms(&mut self, ms: u32) {
        self.delay_us(ms.saturating_mul(1_000));
    }
}
