//! Touch sampling task
//!
//! Polls the pointer, publishes the sample for the renderer and requests
//! a repaint while a finger is down (and once on release, to erase the
//! cursor).

use defmt::info;
use embassy_time::{with_timeout, Duration, Ticker};

use crate::channels::{self, DisplayMutex};
use crate::tasks::LOCK_TIMEOUT;

/// Touch poll interval
pub const POLL_INTERVAL_MS: u64 = 20;

#[embassy_executor::task]
pub async fn input_task(display: &'static DisplayMutex) {
    info!("input task started");

    let mut ticker = Ticker::every(Duration::from_millis(POLL_INTERVAL_MS));
    let mut was_pressed = false;
    loop {
        ticker.next().await;
        let Ok(mut guard) = with_timeout(LOCK_TIMEOUT, display.lock()).await else {
            continue;
        };
        let point = guard.read_pointer();
        if point.pressed || was_pressed {
            guard.mark_dirty();
        }
        drop(guard);

        channels::publish_pointer(point);
        if point.pressed != was_pressed {
            if point.pressed {
                info!("touch down at ({}, {})", point.x, point.y);
            } else {
                info!("touch up");
            }
            was_pressed = point.pressed;
        }
    }
}
