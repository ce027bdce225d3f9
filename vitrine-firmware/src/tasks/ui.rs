//! Display repaint tasks
//!
//! `update_task` runs the periodic full repaint on the configured update
//! interval. `repaint_task` runs on a much faster cadence and only
//! services the dirty flag, so pointer feedback does not wait for the
//! next periodic update.

use defmt::{info, warn};
use embassy_time::{with_timeout, Duration, Ticker};
use vitrine_core::component::Lifecycle;

use crate::channels::DisplayMutex;
use crate::tasks::LOCK_TIMEOUT;

/// Dirty-flag service interval
pub const TICK_INTERVAL_MS: u64 = 5;

/// Periodic full-repaint interval
pub const UPDATE_INTERVAL_MS: u64 = 1000;

#[embassy_executor::task]
pub async fn repaint_task(display: &'static DisplayMutex) {
    info!("repaint task started");

    let mut ticker = Ticker::every(Duration::from_millis(TICK_INTERVAL_MS));
    loop {
        ticker.next().await;
        match with_timeout(LOCK_TIMEOUT, display.lock()).await {
            Ok(mut guard) => guard.tick(),
            Err(_) => warn!("display lock contended, skipping repaint tick"),
        }
    }
}

#[embassy_executor::task]
pub async fn update_task(display: &'static DisplayMutex) {
    info!("update task started");

    let mut ticker = Ticker::every(Duration::from_millis(UPDATE_INTERVAL_MS));
    loop {
        ticker.next().await;
        match with_timeout(LOCK_TIMEOUT, display.lock()).await {
            Ok(mut guard) => guard.update(),
            Err(_) => warn!("display lock contended, skipping update"),
        }
    }
}
