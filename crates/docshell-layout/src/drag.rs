#![forbid(unsafe_code)]

//! Drag-resize sessions for side panels.
//!
//! A [`DragSession`] records where the pointer went down and how wide the
//! panel was at that moment. Every subsequent pointer position maps to a
//! width by `initial + delta * sign`, clamped into the panel's bounds. The
//! mapping is absolute (relative to the origin, not the previous step), so
//! dropped or coalesced pointer moves never accumulate error.
//!
//! Sizing is live: each step writes the width into [`LayoutState`]. There
//! is no commit on release; the last clamped width stands.

use crate::panel::PanelSide;
use crate::state::LayoutState;

/// An in-progress drag on a panel's resize handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSession {
    panel: PanelSide,
    origin_x: u16,
    initial_width: u16,
    /// Width the pointer delta is applied to. Equals `initial_width` unless
    /// the panel was drawn narrower than its state width.
    anchor_width: u16,
}

impl DragSession {
    /// Begin a drag at pointer column `origin_x`.
    ///
    /// Returns `None` if the panel has no handle: it is collapsed, or the
    /// viewport is mobile.
    #[must_use]
    pub fn begin(state: &LayoutState, panel: PanelSide, origin_x: u16) -> Option<Self> {
        if !state.is_resizable(panel) {
            tracing::debug!(panel = panel.label(), "resize unavailable");
            return None;
        }
        let session = Self {
            panel,
            origin_x,
            initial_width: state.width(panel),
            anchor_width: state.width(panel),
        };
        tracing::debug!(
            panel = panel.label(),
            origin_x,
            initial_width = session.initial_width,
            "drag started"
        );
        Some(session)
    }

    /// Measure deltas from the width the panel is actually drawn at.
    ///
    /// A panel clipped by a narrow viewport is drawn narrower than its state
    /// width; anchoring there keeps the edge under the pointer. Cancelling
    /// still restores the state width.
    #[must_use]
    pub fn anchored_at(mut self, visible_width: u16) -> Self {
        self.anchor_width = visible_width.min(self.initial_width);
        self
    }

    #[must_use]
    pub fn panel(&self) -> PanelSide {
        self.panel
    }

    #[must_use]
    pub fn origin_x(&self) -> u16 {
        self.origin_x
    }

    #[must_use]
    pub fn initial_width(&self) -> u16 {
        self.initial_width
    }

    /// Unclamped candidate width for a pointer at `pointer_x`.
    #[must_use]
    pub fn candidate_width(&self, pointer_x: u16) -> i32 {
        let delta = i32::from(pointer_x) - i32::from(self.origin_x);
        i32::from(self.anchor_width) + delta * self.panel.drag_sign()
    }

    /// Apply a pointer position to the state. Returns the clamped width.
    pub fn update(&self, state: &mut LayoutState, pointer_x: u16) -> u16 {
        let width = state.set_width_signed(self.panel, self.candidate_width(pointer_x));
        tracing::trace!(panel = self.panel.label(), pointer_x, width, "drag update");
        width
    }

    /// Abandon the drag, restoring the width from when it began.
    pub fn cancel(&self, state: &mut LayoutState) -> u16 {
        tracing::debug!(panel = self.panel.label(), "drag cancelled");
        state.set_width(self.panel, self.initial_width)
    }
}
