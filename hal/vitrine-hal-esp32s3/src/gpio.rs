//! GPIO trait implementations for `esp-hal` pins

use esp_hal::gpio::{Input, Output};

impl vitrine_hal::OutputPin for Output<'_> {
    fn set_high(&mut self) {
        Output::set_high(self);
    }

    fn set_low(&mut self) {
        Output::set_low(self);
    }

    fn is_set_high(&self) -> bool {
        Output::is_set_high(self)
    }
}

impl vitrine_hal::InputPin for Input<'_> {
    fn is_high(&self) -> bool {
        Input::is_high(self)
    }
}
