//! Shared state between Embassy tasks
//!
//! The display component is shared behind one async mutex; lock holders
//! are expected to bound their hold time so the repaint task can keep its
//! cadence. The pointer sample is published through a packed atomic so the
//! renderer can read it without taking any lock.

use core::sync::atomic::{AtomicU32, Ordering};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use esp_hal::delay::Delay;
use esp_hal::gpio::{Input, Output};
use esp_hal::i2c::master::I2c;
use esp_hal::peripherals::DMA_CH2;
use esp_hal::Blocking;

use vitrine_core::traits::touch::TouchPoint;
use vitrine_drivers::display::PanelDisplay;
use vitrine_drivers::panel::RgbPanel;
use vitrine_drivers::touch::Gt911;
use vitrine_hal_esp32s3::DpiPanel;

/// Panel transport as wired on this board
pub type BoardPanel = RgbPanel<DpiPanel<'static, DMA_CH2<'static>>>;

/// Touch sampler as wired on this board
pub type BoardTouch = Gt911<I2c<'static, Blocking>, Output<'static>, Input<'static>, Delay>;

/// The display component with board-concrete drivers
pub type BoardDisplay = PanelDisplay<BoardPanel, BoardTouch, Output<'static>>;

/// Async mutex guarding the shared display component
pub type DisplayMutex = Mutex<CriticalSectionRawMutex, BoardDisplay>;

const PRESSED: u32 = 1 << 31;

/// Last pointer sample, packed (bit 31 pressed, bits 16..=30 x, 0..=15 y)
pub static POINTER: AtomicU32 = AtomicU32::new(0);

/// Publish a pointer sample for the renderer
///
/// Coordinates above 15 bits cannot collide with the pressed flag; the
/// GT911 only ever reports 12-bit values.
pub fn publish_pointer(point: TouchPoint) {
    let raw = (point.pressed as u32) << 31
        | (u32::from(point.x) & 0x7FFF) << 16
        | u32::from(point.y);
    POINTER.store(raw, Ordering::Relaxed);
}

/// The last published pointer sample
pub fn pointer() -> TouchPoint {
    let raw = POINTER.load(Ordering::Relaxed);
    TouchPoint {
        x: ((raw >> 16) & 0x7FFF) as u16,
        y: (raw & 0xFFFF) as u16,
        pressed: raw & PRESSED != 0,
    }
}
