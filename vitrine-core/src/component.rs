//! Host component lifecycle contract
//!
//! The drivers are plugins hosted by an external firmware framework. The
//! host constructs a component, calls `setup` exactly once, then drives it
//! with `tick` (every host loop pass) and `update` (on the configured
//! update interval). `dump_config` emits a human-readable diagnostic dump.
//!
//! A component that fails fatally during setup stays alive but inert:
//! every later lifecycle call is a no-op. The embedded host has no
//! supervisor to restart it mid-session.

/// Component lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ComponentState {
    /// Constructed, `setup` not yet called
    #[default]
    New,
    /// Setup succeeded, lifecycle calls are productive
    Ready,
    /// Fatal setup failure; all lifecycle calls are no-ops
    Failed,
}

impl ComponentState {
    /// Whether the component is permanently failed
    pub fn is_failed(&self) -> bool {
        matches!(self, ComponentState::Failed)
    }

    /// Whether lifecycle calls should do work
    pub fn is_ready(&self) -> bool {
        matches!(self, ComponentState::Ready)
    }
}

/// The host's setup/loop/update/dump_config call contract
pub trait Lifecycle {
    /// One-time initialization; a hard failure here is permanent
    fn setup(&mut self);

    /// Called every host loop pass
    fn tick(&mut self);

    /// Called on the host's configured update interval
    fn update(&mut self);

    /// Log the resolved configuration for diagnostics
    fn dump_config(&self);
}
