//! Board-agnostic core logic for the Vitrine display firmware
//!
//! This crate contains all pipeline logic that does not depend on
//! specific hardware implementations:
//!
//! - 5-6-5 pixel encoding
//! - Repaint region rectangles
//! - The bulk-memory framebuffer
//! - Panel transport and touch sampler traits
//! - The repaint scheduler
//! - The host component lifecycle contract
//!
//! The framebuffer lives in allocator-backed bulk memory (PSRAM on the
//! target), so the crate requires `alloc` but not `std`.

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

pub mod color;
pub mod component;
pub mod framebuffer;
pub mod region;
pub mod scheduler;
pub mod traits;
