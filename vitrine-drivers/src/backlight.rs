//! Display backlight control
//!
//! On/off only; the module's backlight is a plain GPIO-driven LED rail.
//! "No backlight pin" is an explicit configuration (`None`), never a
//! sentinel pin number.

use vitrine_hal::OutputPin;

/// GPIO backlight, possibly absent
pub struct Backlight<O> {
    pin: Option<O>,
}

impl<O: OutputPin> Backlight<O> {
    /// Wrap the configured backlight pin, or `None` if the board has no
    /// controllable backlight
    pub fn new(pin: Option<O>) -> Self {
        Self { pin }
    }

    /// Whether a backlight pin is configured at all
    pub fn is_configured(&self) -> bool {
        self.pin.is_some()
    }

    /// Turn the backlight on (no-op without a pin)
    pub fn on(&mut self) {
        if let Some(pin) = &mut self.pin {
            pin.set_high();
        }
    }

    /// Turn the backlight off (no-op without a pin)
    pub fn off(&mut self) {
        if let Some(pin) = &mut self.pin {
            pin.set_low();
        }
    }

    /// Whether the backlight is currently driven on
    pub fn is_on(&self) -> bool {
        self.pin.as_ref().is_some_and(|pin| pin.is_set_high())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct MockPin {
        high: bool,
    }

    impl OutputPin for MockPin {
        fn set_high(&mut self) {
            self.high = true;
        }
        fn set_low(&mut self) {
            self.high = false;
        }
        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    #[test]
    fn drives_the_pin_when_configured() {
        let mut backlight = Backlight::new(Some(MockPin::default()));
        assert!(backlight.is_configured());
        backlight.on();
        assert!(backlight.is_on());
        backlight.off();
        assert!(!backlight.is_on());
    }

    #[test]
    fn absent_pin_is_a_distinct_quiet_config() {
        let mut backlight = Backlight::<MockPin>::new(None);
        assert!(!backlight.is_configured());
        backlight.on();
        assert!(!backlight.is_on());
    }
}
