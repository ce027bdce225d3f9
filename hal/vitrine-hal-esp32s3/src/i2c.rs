//! I2C bus trait implementation for the blocking esp-hal master

use esp_hal::i2c::master::{Error, I2c};
use esp_hal::Blocking;

impl vitrine_hal::I2cBus for I2c<'_, Blocking> {
    type Error = Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        I2c::write(self, address, data)
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        I2c::write_read(self, address, write_data, read_buf)
    }
}
