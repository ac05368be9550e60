#![forbid(unsafe_code)]

//! The layout provider: single owner of the shell's layout state.
//!
//! A [`LayoutProvider`] is mounted once per shell. On mount it registers a
//! window listener for viewport resizes; while a panel is being dragged it
//! also holds a document listener for the pointer stream. Both are RAII
//! registrations on the [`EventHub`], so dropping the provider (unmount)
//! releases everything it registered.
//!
//! # Event flow
//!
//! ```text
//! host ── emit ──▶ EventHub ──▶ window listener ──┐
//!                          └──▶ document listener ─┤ (drag only)
//!                                                  ▼
//! host ── handle_event (down, keys) ──▶ LayoutProvider::pump ──▶ LayoutState
//!                                                  ▲
//! LayoutContext::toggle_* ── LayoutMsg ────────────┘
//! ```
//!
//! Resizes are debounced (trailing edge, `resize_debounce_ms`) and pointer
//! moves are coalesced latest-wins, both through [`EventCoalescer`]. Nothing
//! is applied until [`LayoutProvider::pump`] runs.
//!
//! # Invariants
//!
//! 1. The document listener exists if and only if a drag is in progress.
//! 2. Entering mobile ends any drag in the same pump that applies the resize.
//! 3. After drop, the provider holds no hub registrations.

use std::sync::mpsc;

use web_time::Instant;

use docshell_core::event::{Event, KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use docshell_core::event_coalescer::EventCoalescer;
use docshell_layout::{
    Breakpoint, DragSession, LayoutConfig, LayoutState, PanelSide, Rect, ShellGeometry, ShellHit,
    ShellLayout, ViewportChange,
};

use crate::context::{LayoutContext, LayoutMsg};
use crate::hub::{EventHub, ListenTarget, Listener};
use crate::persistence::{StorageBackend, StorageError};

/// An in-progress drag and the document listener that feeds it.
#[derive(Debug)]
struct ActiveDrag {
    session: DragSession,
    pointer: Listener,
}

/// Owns [`LayoutState`] and applies every change to it.
pub struct LayoutProvider {
    config: LayoutConfig,
    state: LayoutState,
    geometry: ShellGeometry,
    hub: EventHub,
    viewport: Listener,
    drag: Option<ActiveDrag>,
    coalescer: EventCoalescer,
    sender: mpsc::Sender<LayoutMsg>,
    messages: mpsc::Receiver<LayoutMsg>,
    storage: Option<Box<dyn StorageBackend>>,
    last_change: ViewportChange,
}

impl std::fmt::Debug for LayoutProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutProvider")
            .field("state", &self.state)
            .field("drag", &self.drag.as_ref().map(|d| d.session))
            .field("storage", &self.storage.as_ref().map(|s| s.name().to_owned()))
            .finish_non_exhaustive()
    }
}

impl LayoutProvider {
    /// Mount a provider for a viewport of `width` x `height`.
    ///
    /// Mounting counts as entering the initial breakpoint: on a mobile
    /// viewport both panels start collapsed.
    #[must_use]
    pub fn mount(config: LayoutConfig, hub: &EventHub, width: u16, height: u16) -> Self {
        let state = LayoutState::new(&config, width, height);
        let (sender, messages) = mpsc::channel();
        let current = state.breakpoint();
        tracing::debug!(
            width,
            height,
            breakpoint = current.label(),
            "layout provider mounted"
        );
        Self {
            coalescer: EventCoalescer::with_debounce(config.resize_debounce()),
            config,
            state,
            geometry: ShellGeometry::default(),
            hub: hub.clone(),
            viewport: hub.listen(ListenTarget::Window),
            drag: None,
            sender,
            messages,
            storage: None,
            last_change: ViewportChange {
                previous: None,
                current,
                forced_collapse: current == Breakpoint::Mobile,
            },
        }
    }

    /// Attach a preference store and restore what it holds.
    ///
    /// Load failures are logged and leave the freshly mounted state in place.
    #[must_use]
    pub fn with_storage(mut self, storage: impl StorageBackend + 'static) -> Self {
        match storage.load() {
            Ok(Some(prefs)) => {
                self.state = LayoutState::from_prefs(
                    &self.config,
                    prefs,
                    self.state.viewport_width(),
                    self.state.viewport_height(),
                );
                tracing::debug!(storage = storage.name(), ?prefs, "panel preferences restored");
            }
            Ok(None) => {}
            Err(error) => {
                tracing::warn!(storage = storage.name(), %error, "failed to load panel preferences");
            }
        }
        self.storage = Some(Box::new(storage));
        self
    }

    /// Use non-default slot presentation rules.
    #[must_use]
    pub fn with_geometry(mut self, geometry: ShellGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    #[must_use]
    pub fn state(&self) -> &LayoutState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    #[must_use]
    pub fn breakpoint(&self) -> Breakpoint {
        self.state.breakpoint()
    }

    /// The most recent viewport change (the mount, if none since).
    #[must_use]
    pub fn last_viewport_change(&self) -> ViewportChange {
        self.last_change
    }

    /// Slot placement for the current state and viewport.
    #[must_use]
    pub fn shell_layout(&self) -> ShellLayout {
        let area = Rect::from_size(self.state.viewport_width(), self.state.viewport_height());
        ShellLayout::compute_with(&self.state, &self.config, area, &self.geometry)
    }

    /// A snapshot for slots, with toggles routed back to this provider.
    #[must_use]
    pub fn context(&self) -> LayoutContext {
        LayoutContext::new(
            self.state.clone(),
            self.config.clone(),
            self.shell_layout(),
            self.sender.clone(),
        )
    }

    #[must_use]
    pub fn is_resizing(&self) -> bool {
        self.drag.is_some()
    }

    /// The panel being dragged, if any.
    #[must_use]
    pub fn resizing_panel(&self) -> Option<PanelSide> {
        self.drag.as_ref().map(|d| d.session.panel())
    }

    /// When the pending resize becomes due, for host wake-up scheduling.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.coalescer.resize_deadline()
    }

    // -----------------------------------------------------------------------
    // Toggles
    // -----------------------------------------------------------------------

    /// Flip the navigation panel. Returns the new collapsed value.
    pub fn toggle_navigation(&mut self) -> bool {
        self.toggle(PanelSide::Navigation)
    }

    /// Flip the intelligence panel. Returns the new collapsed value.
    pub fn toggle_intelligence(&mut self) -> bool {
        self.toggle(PanelSide::Intelligence)
    }

    pub fn toggle(&mut self, panel: PanelSide) -> bool {
        let collapsed = self.state.toggle(panel);
        self.end_drag_if_unavailable();
        collapsed
    }

    pub fn set_collapsed(&mut self, panel: PanelSide, collapsed: bool) {
        self.state.set_collapsed(panel, collapsed);
        self.end_drag_if_unavailable();
    }

    // -----------------------------------------------------------------------
    // Drag resize
    // -----------------------------------------------------------------------

    /// Begin dragging `panel`'s handle from pointer column `pointer_x`.
    ///
    /// Returns `false` when the panel has no handle (collapsed, or mobile).
    /// A drag already in progress is ended first.
    pub fn start_resize(&mut self, panel: PanelSide, pointer_x: u16) -> bool {
        self.end_resize();
        let Some(session) = DragSession::begin(&self.state, panel, pointer_x) else {
            return false;
        };
        let visible = self.shell_layout().rect(panel.into()).width;
        let session = session.anchored_at(visible);
        self.drag = Some(ActiveDrag {
            session,
            pointer: self.hub.listen(ListenTarget::Document),
        });
        true
    }

    /// Finish the drag, keeping the current width. Returns whether one was active.
    pub fn end_resize(&mut self) -> bool {
        let Some(drag) = self.drag.take() else {
            return false;
        };
        tracing::debug!(
            panel = drag.session.panel().label(),
            width = self.state.width(drag.session.panel()),
            "drag ended"
        );
        self.coalescer.take_motion();
        true
    }

    /// Abandon the drag, restoring the width it started from.
    pub fn cancel_resize(&mut self) -> bool {
        let Some(drag) = self.drag.take() else {
            return false;
        };
        drag.session.cancel(&mut self.state);
        self.coalescer.take_motion();
        true
    }

    fn end_drag_if_unavailable(&mut self) {
        if self
            .resizing_panel()
            .is_some_and(|panel| !self.state.is_resizable(panel))
        {
            self.end_resize();
        }
    }

    // -----------------------------------------------------------------------
    // Input
    // -----------------------------------------------------------------------

    /// Handle input delivered to the shell itself: pointer presses and keys.
    ///
    /// Pointer motion and release during a drag arrive through the document
    /// listener instead, and viewport resizes through the window listener.
    /// Returns whether the event was consumed.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        match event {
            Event::Mouse(mouse) => self.handle_press(mouse),
            Event::Key(key) => self.handle_key(key),
            Event::Resize { .. } => false,
        }
    }

    fn handle_press(&mut self, mouse: &MouseEvent) -> bool {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return false;
        }
        match self.shell_layout().hit(mouse.x, mouse.y) {
            Some(ShellHit::Handle(panel)) => self.start_resize(panel, mouse.x),
            Some(ShellHit::HeaderAction(action)) => {
                self.toggle(action.panel());
                true
            }
            Some(ShellHit::Backdrop) => {
                // Same as pressing each open panel's header toggle.
                for panel in PanelSide::ALL {
                    if !self.state.is_collapsed(panel) {
                        self.toggle(panel);
                    }
                }
                true
            }
            Some(ShellHit::Slot(_)) | None => false,
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if key.ctrl() {
            // Shift may upper-case the char; the shortcut is the same.
            let panel = match key.code {
                KeyCode::Char(c) if c.eq_ignore_ascii_case(&'b') => Some(PanelSide::Navigation),
                KeyCode::Char(c) if c.eq_ignore_ascii_case(&'i') => Some(PanelSide::Intelligence),
                _ => None,
            };
            if let Some(panel) = panel {
                self.toggle(panel);
                return true;
            }
        }
        key.code == KeyCode::Escape && self.cancel_resize()
    }

    /// Apply everything that arrived since the last pump.
    ///
    /// Returns whether the layout state changed.
    pub fn pump(&mut self) -> bool {
        self.pump_at(Instant::now())
    }

    /// [`pump`](Self::pump) with an explicit clock, for deterministic hosts.
    pub fn pump_at(&mut self, now: Instant) -> bool {
        let before = self.state.clone();

        let messages: Vec<LayoutMsg> = self.messages.try_iter().collect();
        for msg in messages {
            match msg {
                LayoutMsg::Toggle(panel) => {
                    self.toggle(panel);
                }
                LayoutMsg::SetCollapsed(panel, collapsed) => self.set_collapsed(panel, collapsed),
            }
        }

        for event in self.viewport.drain() {
            if event.is_resize() {
                self.coalescer.push_at(event, now);
            }
        }

        self.pump_pointer(now);

        if let Some(Event::Resize { width, height }) = self.coalescer.poll_resize(now) {
            self.apply_viewport(width, height);
        }

        self.state != before
    }

    fn pump_pointer(&mut self, now: Instant) {
        let events = match &self.drag {
            Some(drag) => drag.pointer.drain(),
            None => return,
        };
        for event in events {
            let Some(event) = self.coalescer.push_at(event, now) else {
                continue;
            };
            if let Event::Mouse(MouseEvent {
                kind: MouseEventKind::Up(_),
                x,
                ..
            }) = event
            {
                self.apply_motion();
                self.drag_to(x);
                self.end_resize();
                return;
            }
        }
        self.apply_motion();
    }

    fn apply_motion(&mut self) {
        if let Some(Event::Mouse(mouse)) = self.coalescer.take_motion() {
            self.drag_to(mouse.x);
        }
    }

    fn drag_to(&mut self, pointer_x: u16) {
        if let Some(drag) = &self.drag {
            drag.session.update(&mut self.state, pointer_x);
        }
    }

    /// Apply a pending debounced resize now instead of waiting for the quiet period.
    pub fn flush_resize(&mut self) -> Option<ViewportChange> {
        for event in self.viewport.drain() {
            if event.is_resize() {
                self.coalescer.push(event);
            }
        }
        let deadline = self.coalescer.resize_deadline()?;
        match self.coalescer.poll_resize(deadline) {
            Some(Event::Resize { width, height }) => Some(self.apply_viewport(width, height)),
            _ => None,
        }
    }

    fn apply_viewport(&mut self, width: u16, height: u16) -> ViewportChange {
        let change = self.state.apply_viewport(width, height);
        self.end_drag_if_unavailable();
        self.last_change = change;
        change
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    /// Write current preferences to the attached store, if any.
    pub fn save_prefs(&self) -> Result<(), StorageError> {
        match &self.storage {
            Some(storage) => storage.save(&self.state.prefs()),
            None => Ok(()),
        }
    }

    /// Unmount explicitly. Equivalent to dropping the provider.
    pub fn unmount(self) {}
}

impl Drop for LayoutProvider {
    fn drop(&mut self) {
        self.drag = None;
        if let Err(error) = self.save_prefs() {
            tracing::warn!(%error, "failed to save panel preferences on unmount");
        }
        tracing::debug!("layout provider unmounted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docshell_core::event::Modifiers;
    use docshell_layout::Slot;
    use std::time::Duration;

    fn desktop(hub: &EventHub) -> LayoutProvider {
        LayoutProvider::mount(LayoutConfig::default(), hub, 1280, 800)
    }

    fn down(x: u16, y: u16) -> Event {
        Event::Mouse(MouseEvent::new(MouseEventKind::Down(MouseButton::Left), x, y))
    }

    fn ctrl(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c)).with_modifiers(Modifiers::CTRL))
    }

    #[test]
    fn mount_registers_one_window_listener() {
        let hub = EventHub::new();
        let provider = desktop(&hub);
        assert_eq!(hub.listener_count(ListenTarget::Window), 1);
        assert_eq!(hub.listener_count(ListenTarget::Document), 0);
        assert_eq!(provider.last_viewport_change().previous, None);
        drop(provider);
        assert_eq!(hub.total_listeners(), 0);
    }

    #[test]
    fn mount_on_mobile_starts_collapsed() {
        let hub = EventHub::new();
        let provider = LayoutProvider::mount(LayoutConfig::default(), &hub, 375, 667);
        assert!(provider.state().navigation_collapsed());
        assert!(provider.state().intelligence_collapsed());
        assert!(provider.last_viewport_change().forced_collapse);
    }

    #[test]
    fn keyboard_shortcuts_toggle_panels() {
        let hub = EventHub::new();
        let mut provider = desktop(&hub);
        assert!(provider.handle_event(&ctrl('b')));
        assert!(provider.state().navigation_collapsed());
        assert!(provider.handle_event(&ctrl('i')));
        assert!(provider.state().intelligence_collapsed());
        assert!(!provider.handle_event(&Event::Key(KeyEvent::new(KeyCode::Char('b')))));
    }

    #[test]
    fn clipped_panel_drag_starts_from_visible_width() {
        let hub = EventHub::new();
        let mut provider = LayoutProvider::mount(LayoutConfig::default(), &hub, 768, 800);
        provider.state.set_width(PanelSide::Navigation, 400);
        provider.state.set_width(PanelSide::Intelligence, 560);

        let shell = provider.shell_layout();
        assert_eq!(shell.rect(Slot::Intelligence).width, 368);
        assert_eq!(shell.rect(Slot::Canvas).width, 0);
        let handle = shell.handle(PanelSide::Intelligence).unwrap();
        assert_eq!(handle.x, 400);

        assert!(provider.start_resize(PanelSide::Intelligence, 400));
        hub.emit(Event::Mouse(MouseEvent::new(
            MouseEventKind::Drag(MouseButton::Left),
            420,
            300,
        )));
        provider.pump();

        // Narrowing by 20 from the drawn edge, not from 560.
        assert_eq!(provider.state().width(PanelSide::Intelligence), 348);
        let shell = provider.shell_layout();
        assert_eq!(shell.rect(Slot::Intelligence).x, 420);
        assert_eq!(shell.rect(Slot::Canvas).width, 20);
    }

    #[test]
    fn shifted_shortcuts_toggle_panels() {
        let hub = EventHub::new();
        let mut provider = desktop(&hub);
        let chord = Modifiers::CTRL | Modifiers::SHIFT;
        let shifted = |c| Event::Key(KeyEvent::new(KeyCode::Char(c)).with_modifiers(chord));
        assert!(provider.handle_event(&shifted('B')));
        assert!(provider.state().navigation_collapsed());
        assert!(provider.handle_event(&shifted('I')));
        assert!(provider.state().intelligence_collapsed());
        assert!(!provider.handle_event(&shifted('X')));
    }

    #[test]
    fn press_on_handle_starts_drag_and_registers_document_listener() {
        let hub = EventHub::new();
        let mut provider = desktop(&hub);
        assert!(provider.handle_event(&down(239, 300)));
        assert_eq!(provider.resizing_panel(), Some(PanelSide::Navigation));
        assert_eq!(hub.listener_count(ListenTarget::Document), 1);

        assert!(provider.handle_event(&Event::Key(KeyEvent::new(KeyCode::Escape))));
        assert!(!provider.is_resizing());
        assert_eq!(hub.listener_count(ListenTarget::Document), 0);
    }

    #[test]
    fn collapsing_the_dragged_panel_ends_the_drag() {
        let hub = EventHub::new();
        let mut provider = desktop(&hub);
        assert!(provider.start_resize(PanelSide::Intelligence, 920));
        provider.toggle_intelligence();
        assert!(!provider.is_resizing());
        assert_eq!(hub.listener_count(ListenTarget::Document), 0);
    }

    #[test]
    fn context_toggles_apply_on_pump() {
        let hub = EventHub::new();
        let mut provider = desktop(&hub);
        let ctx = provider.context();
        ctx.toggle_navigation();
        assert!(!provider.state().navigation_collapsed());
        assert!(provider.pump());
        assert!(provider.state().navigation_collapsed());
    }

    #[test]
    fn resize_waits_for_quiet_period() {
        let hub = EventHub::new();
        let mut provider = desktop(&hub);
        let t0 = Instant::now();
        hub.emit(Event::Resize { width: 800, height: 600 });
        assert!(!provider.pump_at(t0));
        assert_eq!(provider.breakpoint(), Breakpoint::Desktop);
        assert!(provider.next_deadline().is_some());
        assert!(provider.pump_at(t0 + Duration::from_millis(120)));
        assert_eq!(provider.breakpoint(), Breakpoint::Tablet);
        assert!(provider.next_deadline().is_none());
    }

    #[test]
    fn flush_resize_applies_immediately() {
        let hub = EventHub::new();
        let mut provider = desktop(&hub);
        hub.emit(Event::Resize { width: 375, height: 600 });
        let change = provider.flush_resize().unwrap();
        assert!(change.forced_collapse);
        assert!(provider.state().is_mobile());
        assert!(provider.flush_resize().is_none());
    }
}
