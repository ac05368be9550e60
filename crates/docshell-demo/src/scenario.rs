#![forbid(unsafe_code)]

//! Scripted host for the walkthrough.

use docshell_core::event::{
    Event, KeyCode, KeyEvent, Modifiers, MouseButton, MouseEvent, MouseEventKind,
};
use docshell_layout::{HeaderAction, LayoutConfig, PanelSide, ShellGeometry};
use docshell_runtime::{
    EventHub, LayoutError, LayoutProvider, RenderScope, SlotRegistry, StorageBackend, TextBuffer,
};

use crate::views;

/// One rendered step of the walkthrough.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub title: String,
    pub frame: String,
}

/// Plays the host around a mounted provider.
#[derive(Debug)]
pub struct Host {
    hub: EventHub,
    provider: LayoutProvider,
    registry: SlotRegistry,
}

impl Host {
    #[must_use]
    pub fn mount(config: LayoutConfig, width: u16, height: u16) -> Self {
        let hub = EventHub::new();
        // Cell-sized header buttons.
        let geometry = ShellGeometry {
            action_width: 3,
            ..ShellGeometry::default()
        };
        let provider = LayoutProvider::mount(config, &hub, width, height).with_geometry(geometry);
        Self {
            hub,
            provider,
            registry: views::registry(),
        }
    }

    /// Mount with a preference store attached.
    #[must_use]
    pub fn with_storage(mut self, storage: impl StorageBackend + 'static) -> Self {
        self.provider = self.provider.with_storage(storage);
        self
    }

    #[must_use]
    pub fn provider(&self) -> &LayoutProvider {
        &self.provider
    }

    #[must_use]
    pub fn hub(&self) -> &EventHub {
        &self.hub
    }

    /// Dispatch one event the way a host would: global listeners, then the
    /// shell's own handler, then a pump.
    pub fn deliver(&mut self, event: Event) {
        self.hub.emit(event.clone());
        self.provider.handle_event(&event);
        self.provider.pump();
    }

    /// Resize the viewport and wait out the debounce.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.hub.emit(Event::Resize { width, height });
        self.provider.pump();
        self.settle();
    }

    /// Pump at the pending resize deadline, if any.
    pub fn settle(&mut self) {
        if let Some(deadline) = self.provider.next_deadline() {
            self.provider.pump_at(deadline);
        }
    }

    /// Press, drag by `delta` columns, and release a panel's handle.
    ///
    /// Returns `false` if the panel has no handle right now.
    pub fn drag_handle(&mut self, panel: PanelSide, delta: i32) -> bool {
        let Some(handle) = self.provider.shell_layout().handle(panel) else {
            return false;
        };
        let (x, y) = (handle.x, handle.y + handle.height / 2);
        let target = u16::try_from((i32::from(x) + delta).max(0)).unwrap_or(u16::MAX);
        self.deliver(pointer(MouseEventKind::Down(MouseButton::Left), x, y));
        self.deliver(pointer(MouseEventKind::Drag(MouseButton::Left), target, y));
        self.deliver(pointer(MouseEventKind::Up(MouseButton::Left), target, y));
        true
    }

    /// Click a header toggle. Returns `false` if it is not shown.
    pub fn click_header(&mut self, action: HeaderAction) -> bool {
        let Some(rect) = self.provider.shell_layout().header_action(action) else {
            return false;
        };
        self.click(rect.x, rect.y);
        true
    }

    /// Click the backdrop. Returns `false` if there is none.
    pub fn click_backdrop(&mut self) -> bool {
        let shell = self.provider.shell_layout();
        let Some(backdrop) = shell.backdrop() else {
            return false;
        };
        let (x, y) = (backdrop.right().saturating_sub(1), backdrop.bottom().saturating_sub(1));
        self.click(x, y);
        true
    }

    pub fn click(&mut self, x: u16, y: u16) {
        self.deliver(pointer(MouseEventKind::Down(MouseButton::Left), x, y));
        self.deliver(pointer(MouseEventKind::Up(MouseButton::Left), x, y));
    }

    pub fn shortcut(&mut self, c: char) {
        self.deliver(Event::Key(
            KeyEvent::new(KeyCode::Char(c)).with_modifiers(Modifiers::CTRL),
        ));
    }

    /// Render the shell as text.
    pub fn render(&self) -> Result<String, LayoutError> {
        let ctx = self.provider.context();
        let mut buffer = TextBuffer::new(ctx.viewport_width(), ctx.viewport_height());
        self.registry
            .render(&RenderScope::with_layout(&ctx), &mut buffer)?;
        Ok(buffer.to_text())
    }

    fn snapshot(&self, title: impl Into<String>) -> Result<Snapshot, LayoutError> {
        Ok(Snapshot {
            title: title.into(),
            frame: self.render()?,
        })
    }
}

fn pointer(kind: MouseEventKind, x: u16, y: u16) -> Event {
    Event::Mouse(MouseEvent::new(kind, x, y))
}

/// Run the full walkthrough on `host`, returning a snapshot per step.
pub fn walkthrough(host: &mut Host) -> Result<Vec<Snapshot>, LayoutError> {
    let mut snapshots = Vec::new();
    snapshots.push(host.snapshot(format!("mounted ({})", host.provider.breakpoint()))?);

    if host.drag_handle(PanelSide::Navigation, 10) {
        snapshots.push(host.snapshot("navigation handle dragged +10")?);
    }
    if host.drag_handle(PanelSide::Intelligence, -100) {
        snapshots.push(host.snapshot("intelligence handle dragged -100 (clamped)")?);
    }

    host.shortcut('i');
    snapshots.push(host.snapshot("ctrl+i collapses intelligence to a rail")?);

    let height = host.provider.state().viewport_height();
    host.resize(80, height);
    snapshots.push(host.snapshot("viewport 80 cols (tablet), flags unchanged")?);

    host.resize(50, height);
    snapshots.push(host.snapshot("viewport 50 cols (mobile), both panels forced collapsed")?);

    if host.click_header(HeaderAction::ToggleNavigation) {
        snapshots.push(host.snapshot("header toggle opens navigation as an overlay")?);
    }
    if host.click_backdrop() {
        snapshots.push(host.snapshot("backdrop click closes the overlay")?);
    }

    host.resize(120, height);
    host.shortcut('b');
    snapshots.push(host.snapshot("back to desktop, ctrl+b reopens navigation")?);

    tracing::info!(steps = snapshots.len(), "walkthrough complete");
    Ok(snapshots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo_config;
    use docshell_runtime::{FileStorage, ListenTarget};

    fn host() -> Host {
        Host::mount(demo_config().unwrap(), 120, 16)
    }

    #[test]
    fn walkthrough_visits_every_breakpoint() {
        let mut host = host();
        let snapshots = walkthrough(&mut host).unwrap();
        assert_eq!(snapshots.len(), 9);
        assert!(snapshots[0].frame.contains("Documents"));
        assert!(snapshots[0].frame.contains("desktop"));
        assert!(snapshots[5].frame.contains("[≡]"));
        assert!(snapshots[6].frame.contains('░'));
        assert!(!snapshots[7].frame.contains('░'));
    }

    #[test]
    fn drag_is_clamped_and_listener_released() {
        let mut host = host();
        assert!(host.drag_handle(PanelSide::Intelligence, -100));
        assert_eq!(host.provider().state().width(PanelSide::Intelligence), 44);
        assert_eq!(host.hub().listener_count(ListenTarget::Document), 0);
    }

    #[test]
    fn mobile_forces_collapse_and_desktop_keeps_it() {
        let mut host = host();
        host.resize(50, 16);
        assert!(host.provider().state().navigation_collapsed());
        assert!(host.provider().state().intelligence_collapsed());
        assert!(!host.drag_handle(PanelSide::Navigation, 5));

        host.resize(120, 16);
        assert!(host.provider().state().navigation_collapsed());
    }

    #[test]
    fn header_toggles_exist_only_on_mobile() {
        let mut host = host();
        assert!(!host.click_header(HeaderAction::ToggleIntelligence));
        host.resize(50, 16);
        assert!(host.click_header(HeaderAction::ToggleIntelligence));
        assert!(!host.provider().state().intelligence_collapsed());
    }

    #[test]
    fn preferences_survive_a_remount() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        {
            let mut host = host().with_storage(FileStorage::new(&path));
            assert!(host.drag_handle(PanelSide::Navigation, 6));
            host.shortcut('i');
        }
        let host = host().with_storage(FileStorage::new(&path));
        let state = host.provider().state();
        assert_eq!(state.width(PanelSide::Navigation), 28);
        assert!(state.intelligence_collapsed());
    }
}
