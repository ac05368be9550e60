#![forbid(unsafe_code)]

//! Event coalescing for high-frequency input events.
//!
//! Hosts deliver a flood of events during continuous interaction: a window
//! being dragged wider emits dozens of resizes per second, and a panel drag
//! emits a pointer move per pixel. Without coalescing, each one triggers a
//! layout recomputation and a re-render.
//!
//! [`EventCoalescer`] applies two rules:
//! - Pointer motion (moves and drags): latest position wins
//! - Viewport resizes: trailing-edge debounce, the last size is released once
//!   no further resize arrived for the configured quiet period
//!
//! Everything else (button presses, keys) passes through immediately. The
//! caller is responsible for draining pending motion before handling a
//! pass-through event, so ordering between a final move and a button release
//! is preserved.
//!
//! # Usage
//!
//! ```
//! use std::time::Duration;
//! use docshell_core::event::{Event, MouseEvent, MouseEventKind};
//! use docshell_core::event_coalescer::EventCoalescer;
//! use web_time::Instant;
//!
//! let mut coalescer = EventCoalescer::with_debounce(Duration::from_millis(120));
//! let t0 = Instant::now();
//!
//! assert!(coalescer.push_at(Event::Resize { width: 900, height: 600 }, t0).is_none());
//! assert!(coalescer.push_at(Event::Resize { width: 700, height: 600 }, t0).is_none());
//!
//! // Still inside the quiet period.
//! assert!(coalescer.poll_resize(t0 + Duration::from_millis(50)).is_none());
//!
//! // Quiet period elapsed: only the latest size is released.
//! let released = coalescer.poll_resize(t0 + Duration::from_millis(120));
//! assert_eq!(released, Some(Event::Resize { width: 700, height: 600 }));
//! ```

use std::time::Duration;

use web_time::Instant;

use crate::event::{Event, MouseEvent};

/// Default quiet period before a pending resize is released.
pub const DEFAULT_RESIZE_DEBOUNCE: Duration = Duration::from_millis(120);

/// Coalesces high-frequency input events.
///
/// # Thread Safety
///
/// `EventCoalescer` is not thread-safe. It should be used from the single
/// event processing loop that owns the layout state.
///
/// # Performance
///
/// All operations are O(1). The coalescer holds at most one pending motion
/// event and one pending resize.
#[derive(Debug, Clone)]
pub struct EventCoalescer {
    /// Pending pointer motion (latest position wins).
    pending_motion: Option<MouseEvent>,

    /// Pending resize and the instant it becomes releasable.
    pending_resize: Option<PendingResize>,

    /// Quiet period for resize debouncing.
    debounce: Duration,
}

#[derive(Debug, Clone, Copy)]
struct PendingResize {
    width: u16,
    height: u16,
    deadline: Instant,
}

impl Default for EventCoalescer {
    fn default() -> Self {
        Self::with_debounce(DEFAULT_RESIZE_DEBOUNCE)
    }
}

impl EventCoalescer {
    /// Create a coalescer with the default resize debounce.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a coalescer with an explicit resize quiet period.
    ///
    /// A zero duration releases every resize on the next poll.
    #[must_use]
    pub fn with_debounce(debounce: Duration) -> Self {
        Self {
            pending_motion: None,
            pending_resize: None,
            debounce,
        }
    }

    /// The configured resize quiet period.
    #[must_use]
    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    /// Push an event, timestamped with the current instant.
    pub fn push(&mut self, event: Event) -> Option<Event> {
        self.push_at(event, Instant::now())
    }

    /// Push an event observed at `now`.
    ///
    /// Returns `Some(event)` if the event should be processed immediately,
    /// or `None` if it was coalesced and is pending.
    ///
    /// # Coalescing Rules
    ///
    /// - **Pointer move / drag**: replaces any pending motion. Returns `None`.
    /// - **Resize**: replaces any pending resize and restarts the quiet
    ///   period from `now`. Returns `None`.
    /// - **Other events**: returned immediately. Pending motion is NOT
    ///   flushed automatically; call [`take_motion`](Self::take_motion) first.
    pub fn push_at(&mut self, event: Event, now: Instant) -> Option<Event> {
        match event {
            Event::Mouse(mouse) if mouse.is_motion() => {
                self.pending_motion = Some(mouse);
                None
            }
            Event::Resize { width, height } => {
                self.pending_resize = Some(PendingResize {
                    width,
                    height,
                    deadline: now + self.debounce,
                });
                None
            }
            other => Some(other),
        }
    }

    /// Take the pending pointer motion, if any.
    pub fn take_motion(&mut self) -> Option<Event> {
        self.pending_motion.take().map(Event::Mouse)
    }

    /// Release the pending resize if its quiet period has elapsed at `now`.
    pub fn poll_resize(&mut self, now: Instant) -> Option<Event> {
        match self.pending_resize {
            Some(pending) if now >= pending.deadline => {
                self.pending_resize = None;
                Some(Event::Resize {
                    width: pending.width,
                    height: pending.height,
                })
            }
            _ => None,
        }
    }

    /// Instant at which the pending resize becomes releasable.
    ///
    /// Hosts use this to schedule their next wake-up.
    #[must_use]
    pub fn resize_deadline(&self) -> Option<Instant> {
        self.pending_resize.map(|p| p.deadline)
    }

    /// Flush all pending coalesced events, ignoring the resize deadline.
    ///
    /// Order: pending resize first (it changes the geometry the motion is
    /// interpreted against), then pending motion.
    #[must_use]
    pub fn flush(&mut self) -> Vec<Event> {
        let mut events = Vec::with_capacity(2);
        if let Some(pending) = self.pending_resize.take() {
            events.push(Event::Resize {
                width: pending.width,
                height: pending.height,
            });
        }
        if let Some(mouse) = self.pending_motion.take() {
            events.push(Event::Mouse(mouse));
        }
        events
    }

    /// Check if there are any pending coalesced events.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending_motion.is_some() || self.pending_resize.is_some()
    }

    /// Discard all pending events without processing them.
    pub fn clear(&mut self) {
        self.pending_motion = None;
        self.pending_resize = None;
    }
}
