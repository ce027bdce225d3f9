//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in vitrine-core, generic over the vitrine-hal bus/pin abstractions:
//!
//! - RGB panel transport (timing-driven parallel LCD)
//! - GT911 capacitive touch sampler (I2C)
//! - Backlight control
//! - The display component binding them to the host lifecycle
//!
//! Everything here is host-testable: the tests drive the drivers with
//! scripted mock buses, pins and panels.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod backlight;
pub mod display;
pub mod panel;
pub mod touch;
