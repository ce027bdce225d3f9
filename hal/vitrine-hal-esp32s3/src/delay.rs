//! Blocking delay over the esp-hal timer

use embedded_hal::delay::DelayNs;
use esp_hal::delay::Delay;

impl vitrine_hal::DelayProvider for Delay {
    fn delay_us(&mut self, us: u32) {
        DelayNs::delay_us(self, us);
    }
}
