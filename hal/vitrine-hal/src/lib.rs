//! Vitrine Hardware Abstraction Layer
//!
//! This crate defines hardware abstraction traits that can be implemented
//! by chip-specific HALs (ESP32-S3 today, others later). This enables the
//! display pipeline to run unchanged on different hardware platforms and,
//! just as importantly, on the host under `cargo test` with mock
//! implementations.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (vitrine-firmware, etc.)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  vitrine-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  vitrine-hal-esp32s3                    │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`i2c::I2cBus`] - I2C bus operations
//! - [`delay::DelayProvider`] - Blocking delays
//! - [`panel::PanelPeripheral`] - RGB timing-panel peripheral

#![no_std]
#![deny(unsafe_code)]

pub mod delay;
pub mod gpio;
pub mod i2c;
pub mod panel;

// Re-export key traits at crate root for convenience
pub use delay::DelayProvider;
pub use gpio::{InputPin, OutputPin};
pub use i2c::I2cBus;
pub use panel::{PanelError, PanelPeripheral, PanelTimingConfig};
