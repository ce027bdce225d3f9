//! RGB panel display component
//!
//! Ties the panel transport, touch sampler and backlight together behind
//! the host lifecycle contract. Two runtime modes:
//!
//! - **Periodic**: the component owns a framebuffer and a draw callback.
//!   Every `update` redraws and pushes the full frame; `tick` serves
//!   dirty-flag repaints between updates.
//! - **Retained**: an external widget runtime owns rendering and partial
//!   redraw. The component provides [`flush`](PanelDisplay::flush) and
//!   [`read_pointer`](PanelDisplay::read_pointer) passthroughs and never
//!   allocates a framebuffer of its own.
//!
//! Failure policy follows the host contract: configuration and
//! framebuffer allocation errors are fatal and make every later lifecycle
//! call a no-op; a missing touch controller only disables the pointer;
//! transfer errors are logged and retried on the next cycle.

use vitrine_core::component::{ComponentState, Lifecycle};
use vitrine_core::framebuffer::FrameBuffer;
use vitrine_core::region::Region;
use vitrine_core::scheduler::RepaintScheduler;
use vitrine_core::traits::panel::{PanelTransport, TransportError};
use vitrine_core::traits::touch::{TouchPoint, TouchSampler};
use vitrine_hal::OutputPin;

use crate::backlight::Backlight;

/// Who owns rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RepaintMode {
    /// Component-owned framebuffer, caller-supplied draw callback
    Periodic,
    /// External widget runtime renders; the component only forwards
    Retained,
}

/// Display component hosted by the firmware lifecycle
pub struct PanelDisplay<P, T, O, F = fn(&mut FrameBuffer)> {
    panel: P,
    touch: Option<T>,
    backlight: Backlight<O>,
    draw: Option<F>,
    scheduler: Option<RepaintScheduler>,
    state: ComponentState,
    mode: RepaintMode,
}

impl<P, T, O> PanelDisplay<P, T, O>
where
    P: PanelTransport,
    T: TouchSampler,
    O: OutputPin,
{
    /// Retained-runtime display: no framebuffer, no draw callback
    pub fn retained(panel: P, touch: Option<T>, backlight: Backlight<O>) -> Self {
        Self {
            panel,
            touch,
            backlight,
            draw: None,
            scheduler: None,
            state: ComponentState::New,
            mode: RepaintMode::Retained,
        }
    }
}

impl<P, T, O, F> PanelDisplay<P, T, O, F>
where
    P: PanelTransport,
    T: TouchSampler,
    O: OutputPin,
    F: FnMut(&mut FrameBuffer),
{
    /// Periodic-repaint display: `draw` runs against the owned
    /// framebuffer on every update interval
    pub fn periodic(panel: P, touch: Option<T>, backlight: Backlight<O>, draw: F) -> Self {
        Self {
            panel,
            touch,
            backlight,
            draw: Some(draw),
            scheduler: None,
            state: ComponentState::New,
            mode: RepaintMode::Periodic,
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> ComponentState {
        self.state
    }

    /// The configured runtime mode
    pub fn mode(&self) -> RepaintMode {
        self.mode
    }

    /// Force the component into the permanently failed state
    ///
    /// Also used internally for fatal setup errors.
    pub fn mark_failed(&mut self) {
        self.state = ComponentState::Failed;
    }

    /// The backlight, for host-side switches
    pub fn backlight(&self) -> &Backlight<O> {
        &self.backlight
    }

    /// Drive the backlight rail
    pub fn set_backlight(&mut self, on: bool) {
        if on {
            self.backlight.on();
        } else {
            self.backlight.off();
        }
    }

    /// Request a repaint on the next host loop tick (periodic mode)
    pub fn mark_dirty(&mut self) {
        if let Some(scheduler) = &mut self.scheduler {
            scheduler.mark_dirty();
        }
    }

    /// Forward a rendered rectangle straight to the panel
    ///
    /// Retained-runtime flush hook. Rejected until setup succeeds.
    pub fn flush(&mut self, region: &Region, pixels: &[u8]) -> Result<(), TransportError> {
        if !self.state.is_ready() {
            return Err(TransportError::NotConfigured);
        }
        self.panel.push_region(region, pixels)
    }

    /// Sample the pointer for the widget runtime
    ///
    /// Idle when the component is not ready or touch never came up.
    pub fn read_pointer(&mut self) -> TouchPoint {
        if !self.state.is_ready() {
            return TouchPoint::idle();
        }
        match &mut self.touch {
            Some(touch) => touch.poll(),
            None => TouchPoint::idle(),
        }
    }
}

impl<P, T, O, F> Lifecycle for PanelDisplay<P, T, O, F>
where
    P: PanelTransport,
    T: TouchSampler,
    O: OutputPin,
    F: FnMut(&mut FrameBuffer),
{
    fn setup(&mut self) {
        if self.state != ComponentState::New {
            return;
        }

        self.backlight.on();

        if let Err(_e) = self.panel.configure() {
            #[cfg(feature = "defmt")]
            defmt::error!("panel configuration failed: {}", _e);
            self.state = ComponentState::Failed;
            return;
        }

        if self.mode == RepaintMode::Periodic {
            let (width, height) = self.panel.resolution();
            let frame = match FrameBuffer::allocate(width, height) {
                Ok(frame) => frame,
                Err(_e) => {
                    #[cfg(feature = "defmt")]
                    defmt::error!("framebuffer allocation failed ({}x{})", width, height);
                    self.state = ComponentState::Failed;
                    return;
                }
            };
            let mut scheduler = RepaintScheduler::new(frame);
            scheduler.frame_mut().clear(0, 0, 0);
            // First transfer so the panel never scans uninitialized
            // memory. A transient error here retries on the next update.
            if let Err(_e) = scheduler.repaint(&mut self.panel, |_| {}) {
                #[cfg(feature = "defmt")]
                defmt::warn!("initial frame transfer failed: {}", _e);
            }
            self.scheduler = Some(scheduler);
        }

        if let Some(touch) = &mut self.touch {
            if let Err(_e) = touch.initialize() {
                #[cfg(feature = "defmt")]
                defmt::warn!("touch controller unavailable: {}", _e);
                self.touch = None;
            }
        }

        self.state = ComponentState::Ready;
    }

    fn tick(&mut self) {
        if !self.state.is_ready() {
            return;
        }
        if let (Some(scheduler), Some(draw)) = (self.scheduler.as_mut(), self.draw.as_mut()) {
            if let Err(_e) = scheduler.repaint_if_dirty(&mut self.panel, |frame| draw(frame)) {
                #[cfg(feature = "defmt")]
                defmt::warn!("frame transfer failed: {}", _e);
            }
        }
    }

    fn update(&mut self) {
        if !self.state.is_ready() {
            return;
        }
        if let (Some(scheduler), Some(draw)) = (self.scheduler.as_mut(), self.draw.as_mut()) {
            if let Err(_e) = scheduler.repaint(&mut self.panel, |frame| draw(frame)) {
                #[cfg(feature = "defmt")]
                defmt::warn!("frame transfer failed: {}", _e);
            }
        }
    }

    fn dump_config(&self) {
        #[cfg(feature = "defmt")]
        {
            let (width, height) = self.panel.resolution();
            defmt::info!("RGB panel display:");
            defmt::info!("  resolution: {}x{}, 16-bit 5-6-5 color", width, height);
            defmt::info!(
                "  mode: {}",
                match self.mode {
                    RepaintMode::Periodic => "periodic repaint",
                    RepaintMode::Retained => "retained runtime",
                }
            );
            defmt::info!("  backlight: {}", self.backlight.is_configured());
            defmt::info!("  touch: {}", self.touch.is_some());
            if self.state.is_failed() {
                defmt::error!("  setup FAILED");
            }
        }
    }
}
