//! Embassy async tasks
//!
//! Two tasks drive the display component and one samples the touch
//! controller. All of them share the component through one async mutex
//! and bound their wait with [`LOCK_TIMEOUT`]; a task that cannot take
//! the lock in time skips its cycle instead of stalling the pipeline.

use embassy_time::Duration;

pub mod input;
pub mod ui;

pub use input::input_task;
pub use ui::{repaint_task, update_task};

/// Longest any task waits for the shared display lock
pub const LOCK_TIMEOUT: Duration = Duration::from_millis(30);
