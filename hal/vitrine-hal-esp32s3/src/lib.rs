//! ESP32-S3 implementation of the `vitrine-hal` traits
//!
//! Maps the shared abstractions onto `esp-hal`:
//!
//! - GPIO traits directly onto [`esp_hal::gpio::Output`] / [`Input`](esp_hal::gpio::Input)
//! - [`I2cBus`](vitrine_hal::I2cBus) onto the blocking I2C master
//! - [`DelayProvider`](vitrine_hal::DelayProvider) onto [`esp_hal::delay::Delay`]
//! - [`PanelPeripheral`](vitrine_hal::PanelPeripheral) onto the LCD_CAM
//!   RGB/DPI engine with a DMA scan-out buffer ([`panel::DpiPanel`])
//!
//! Everything chip-specific lives here; the drivers above only see the
//! trait surface and stay host-testable.

#![no_std]
#![deny(unsafe_code)]

pub mod delay;
pub mod gpio;
pub mod i2c;
pub mod panel;

pub use panel::{DpiPanel, DpiPins};
