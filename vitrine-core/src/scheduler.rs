//! Repaint scheduler
//!
//! Orchestrates the periodic repaint path: run the caller-supplied draw
//! routine against the framebuffer, then push the result to the panel
//! transport. There is no dirty-rectangle tracking at this level - the
//! panel refresh is full-frame, so every repaint transfers the whole
//! buffer. A dirty flag lets the host loop request an extra repaint
//! between periodic updates.
//!
//! In the retained-runtime mode the widget runtime owns partial redraw
//! and bypasses the framebuffer entirely; see the display component's
//! flush/pointer passthroughs.

use crate::framebuffer::FrameBuffer;
use crate::region::Region;
use crate::traits::panel::{PanelTransport, TransportError};

/// Periodic-mode repaint orchestration over one framebuffer
pub struct RepaintScheduler {
    frame: FrameBuffer,
    dirty: bool,
}

impl RepaintScheduler {
    /// Wrap an allocated framebuffer
    pub fn new(frame: FrameBuffer) -> Self {
        Self {
            frame,
            dirty: false,
        }
    }

    /// The owned framebuffer
    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    /// Mutable access for an initial clear or direct drawing
    pub fn frame_mut(&mut self) -> &mut FrameBuffer {
        &mut self.frame
    }

    /// Request a repaint on the next host loop tick
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Whether a loop-tick repaint is pending
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// One repaint cycle: draw, then push the full frame
    ///
    /// The draw routine must not fail by contract. A transport error is
    /// returned for the caller to log and skip; the framebuffer keeps the
    /// freshly drawn contents so the next tick retries the same frame.
    pub fn repaint<P, F>(&mut self, panel: &mut P, draw: F) -> Result<(), TransportError>
    where
        P: PanelTransport,
        F: FnOnce(&mut FrameBuffer),
    {
        draw(&mut self.frame);
        self.dirty = false;
        let region = Region::full(self.frame.width(), self.frame.height());
        panel.push_region(&region, self.frame.region_bytes(&region))
    }

    /// Repaint only if the dirty flag is set
    ///
    /// Returns `Ok(true)` if a repaint ran. Used by the host loop hook;
    /// the periodic update path calls [`repaint`](Self::repaint) directly.
    pub fn repaint_if_dirty<P, F>(&mut self, panel: &mut P, draw: F) -> Result<bool, TransportError>
    where
        P: PanelTransport,
        F: FnOnce(&mut FrameBuffer),
    {
        if !self.dirty {
            return Ok(false);
        }
        self.repaint(panel, draw)?;
        Ok(true)
    }
}
