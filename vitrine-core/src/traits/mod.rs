//! Pipeline abstraction traits
//!
//! These traits define the interface between the repaint/touch pipeline
//! and the hardware-specific driver implementations.

pub mod panel;
pub mod touch;

pub use panel::{ConfigurationError, PanelTransport, TransportError};
pub use touch::{TouchInitError, TouchPoint, TouchSampler};
