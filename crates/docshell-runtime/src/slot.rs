#![forbid(unsafe_code)]

//! Slot composition.
//!
//! A [`SlotRegistry`] maps each [`Slot`] to a [`SlotView`]. Rendering reads
//! the [`LayoutContext`] from the [`RenderScope`], asks the shell layout
//! where every slot goes, and paints in z-order:
//!
//! 0. main, as the background of everything below the header,
//! 1. header and inline slots,
//! 2. resize handles,
//! 3. the backdrop (dims what is under it),
//! 4. overlays.
//!
//! Each view draws through a [`SlotFrame`] clipped to its own rect.

use rustc_hash::FxHashMap;

use docshell_layout::{PanelSide, Rect, Slot, SlotMode, SlotPlacement};

use crate::buffer::TextBuffer;
use crate::context::{LayoutContext, LayoutError, RenderScope};

/// A view's drawing surface: the shared buffer, clipped to one slot.
#[derive(Debug)]
pub struct SlotFrame<'a> {
    buffer: &'a mut TextBuffer,
    placement: SlotPlacement,
}

impl<'a> SlotFrame<'a> {
    pub fn new(buffer: &'a mut TextBuffer, placement: SlotPlacement) -> Self {
        Self { buffer, placement }
    }

    /// The slot's rect in buffer coordinates.
    #[must_use]
    pub fn area(&self) -> Rect {
        self.placement.rect
    }

    #[must_use]
    pub fn placement(&self) -> &SlotPlacement {
        &self.placement
    }

    /// Fill the slot with `ch`.
    pub fn fill(&mut self, ch: char) {
        self.buffer.fill(self.placement.rect, ch);
    }

    /// Print at `(col, row)` relative to the slot's top-left corner.
    pub fn print(&mut self, col: u16, row: u16, text: &str) -> u16 {
        let area = self.placement.rect;
        self.buffer.print(
            area.x.saturating_add(col),
            area.y.saturating_add(row),
            text,
            area,
        )
    }
}

/// Something that draws a slot.
pub trait SlotView {
    fn render(&self, ctx: &LayoutContext, frame: &mut SlotFrame<'_>);
}

impl<F> SlotView for F
where
    F: Fn(&LayoutContext, &mut SlotFrame<'_>),
{
    fn render(&self, ctx: &LayoutContext, frame: &mut SlotFrame<'_>) {
        self(ctx, frame);
    }
}

/// Glyphs used for chrome drawn by the registry itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotChrome {
    pub handle: char,
    pub backdrop: char,
}

impl Default for SlotChrome {
    fn default() -> Self {
        Self {
            handle: '│',
            backdrop: '░',
        }
    }
}

/// Registered views, keyed by slot.
#[derive(Default)]
pub struct SlotRegistry {
    views: FxHashMap<Slot, Box<dyn SlotView>>,
    chrome: SlotChrome,
}

impl std::fmt::Debug for SlotRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut slots: Vec<Slot> = self.views.keys().copied().collect();
        slots.sort();
        f.debug_struct("SlotRegistry")
            .field("slots", &slots)
            .field("chrome", &self.chrome)
            .finish()
    }
}

impl SlotRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_chrome(mut self, chrome: SlotChrome) -> Self {
        self.chrome = chrome;
        self
    }

    /// Register a view, returning the one it replaced.
    pub fn register(
        &mut self,
        slot: Slot,
        view: impl SlotView + 'static,
    ) -> Option<Box<dyn SlotView>> {
        self.views.insert(slot, Box::new(view))
    }

    pub fn unregister(&mut self, slot: Slot) -> Option<Box<dyn SlotView>> {
        self.views.remove(&slot)
    }

    #[must_use]
    pub fn contains(&self, slot: Slot) -> bool {
        self.views.contains_key(&slot)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.views.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// Paint every registered slot into `buffer`.
    ///
    /// Returns the slots that were drawn, in paint order. Fails with
    /// [`LayoutError::MissingProvider`] if a registered slot is rendered
    /// without a provider in scope.
    pub fn render(
        &self,
        scope: &RenderScope<'_>,
        buffer: &mut TextBuffer,
    ) -> Result<Vec<Slot>, LayoutError> {
        let mut drawn = Vec::new();
        let Some(first) = Slot::ALL.into_iter().find(|slot| self.contains(*slot)) else {
            return Ok(drawn);
        };
        let ctx = scope.layout(first.name())?;
        let shell = ctx.shell();
        let paint_order = shell.paint_order();
        let (inline, overlays): (Vec<&SlotPlacement>, Vec<&SlotPlacement>) = paint_order
            .into_iter()
            .partition(|p| p.mode == SlotMode::Inline);

        // Main is the container the panels and canvas sit in.
        let main = shell.placement(Slot::Main);
        if main.is_visible() && self.draw(ctx, main, buffer) {
            drawn.push(Slot::Main);
        }

        for placement in inline {
            if self.draw(ctx, placement, buffer) {
                drawn.push(placement.slot);
            }
        }

        for panel in PanelSide::ALL {
            if let Some(handle) = shell.handle(panel) {
                buffer.fill(handle, self.chrome.handle);
            }
        }

        if let Some(backdrop) = shell.backdrop() {
            let dim = self.chrome.backdrop;
            buffer.map_cells(backdrop, |c| if c == ' ' { dim } else { c });
        }

        for placement in overlays {
            buffer.fill(placement.rect, ' ');
            if self.draw(ctx, placement, buffer) {
                drawn.push(placement.slot);
            }
        }

        tracing::trace!(slots = drawn.len(), breakpoint = %ctx.breakpoint(), "slots rendered");
        Ok(drawn)
    }

    fn draw(&self, ctx: &LayoutContext, placement: &SlotPlacement, buffer: &mut TextBuffer) -> bool {
        let Some(view) = self.views.get(&placement.slot) else {
            return false;
        };
        let mut frame = SlotFrame::new(buffer, *placement);
        view.render(ctx, &mut frame);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hub::EventHub;
    use crate::provider::LayoutProvider;
    use docshell_layout::LayoutConfig;

    fn label(text: &'static str) -> impl Fn(&LayoutContext, &mut SlotFrame<'_>) {
        move |_ctx, frame| {
            frame.print(0, 0, text);
        }
    }

    fn small_config() -> LayoutConfig {
        LayoutConfig {
            navigation_min_width: 6,
            navigation_max_width: 12,
            navigation_default_width: 8,
            intelligence_min_width: 6,
            intelligence_max_width: 12,
            intelligence_default_width: 8,
            mobile_breakpoint_px: 30,
            desktop_breakpoint_px: 50,
            collapsed_width_px: 2,
            header_height: 1,
            resize_debounce_ms: 0,
        }
    }

    fn registry() -> SlotRegistry {
        let mut registry = SlotRegistry::new();
        registry.register(Slot::Header, label("HEAD"));
        registry.register(Slot::Navigation, label("NAV"));
        registry.register(Slot::Canvas, label("DOC"));
        registry.register(Slot::Intelligence, label("AI"));
        registry
    }

    #[test]
    fn rendering_outside_provider_fails() {
        let mut buffer = TextBuffer::new(40, 5);
        let err = registry()
            .render(&RenderScope::root(), &mut buffer)
            .unwrap_err();
        assert_eq!(
            err,
            LayoutError::MissingProvider {
                consumer: "header".into()
            }
        );
    }

    #[test]
    fn empty_registry_needs_no_provider() {
        let mut buffer = TextBuffer::new(4, 2);
        let drawn = SlotRegistry::new()
            .render(&RenderScope::root(), &mut buffer)
            .unwrap();
        assert!(drawn.is_empty());
    }

    #[test]
    fn desktop_renders_inline_with_handles() {
        let hub = EventHub::new();
        let provider = LayoutProvider::mount(small_config(), &hub, 60, 4);
        let ctx = provider.context();
        let mut buffer = TextBuffer::new(60, 4);
        let drawn = registry()
            .render(&RenderScope::with_layout(&ctx), &mut buffer)
            .unwrap();
        assert_eq!(
            drawn,
            vec![Slot::Header, Slot::Navigation, Slot::Canvas, Slot::Intelligence]
        );
        assert!(buffer.row(0).starts_with("HEAD"));
        let row: Vec<char> = buffer.row(1).chars().collect();
        let text = |from: usize, len: usize| row[from..from + len].iter().collect::<String>();
        assert_eq!(text(0, 3), "NAV");
        // Navigation handle on its right edge, intelligence handle on its left.
        assert_eq!(row[7], '│');
        assert_eq!(text(8, 3), "DOC");
        assert_eq!(row[52], '│');
        assert_eq!(row[53], 'I');
    }

    #[test]
    fn main_view_is_painted_under_its_children() {
        fn dots(_ctx: &LayoutContext, frame: &mut SlotFrame<'_>) {
            frame.fill('.');
        }

        let hub = EventHub::new();
        let provider = LayoutProvider::mount(small_config(), &hub, 60, 4);
        let ctx = provider.context();
        let mut registry = registry();
        registry.register(Slot::Main, dots);
        let mut buffer = TextBuffer::new(60, 4);
        let drawn = registry
            .render(&RenderScope::with_layout(&ctx), &mut buffer)
            .unwrap();
        assert_eq!(drawn[0], Slot::Main);
        assert_eq!(drawn.len(), 5);

        assert!(buffer.row(0).starts_with("HEAD"));
        assert!(!buffer.row(0).contains('.'));
        let row: Vec<char> = buffer.row(2).chars().collect();
        assert_eq!(row[0], '.');
        assert_eq!(row[7], '│');
        assert_eq!(row[20], '.');
        assert!(buffer.row(1).starts_with("NAV"));
    }

    #[test]
    fn main_view_alone_renders() {
        fn dots(_ctx: &LayoutContext, frame: &mut SlotFrame<'_>) {
            frame.fill('.');
        }

        let hub = EventHub::new();
        let provider = LayoutProvider::mount(small_config(), &hub, 20, 3);
        let ctx = provider.context();
        let mut registry = SlotRegistry::new();
        registry.register(Slot::Main, dots);
        let mut buffer = TextBuffer::new(20, 3);
        let drawn = registry
            .render(&RenderScope::with_layout(&ctx), &mut buffer)
            .unwrap();
        assert_eq!(drawn, vec![Slot::Main]);
        assert_eq!(buffer.row(2), "....................");
    }

    #[test]
    fn mobile_overlay_paints_over_backdrop() {
        let hub = EventHub::new();
        let mut provider = LayoutProvider::mount(small_config(), &hub, 20, 3);
        provider.toggle_navigation();
        let ctx = provider.context();
        let mut buffer = TextBuffer::new(20, 3);
        let drawn = registry()
            .render(&RenderScope::with_layout(&ctx), &mut buffer)
            .unwrap();
        assert_eq!(drawn, vec![Slot::Header, Slot::Canvas, Slot::Navigation]);
        // Overlay (width 8) then dimmed canvas.
        assert_eq!(buffer.row(1), "NAV     ░░░░░░░░░░░░");
        assert_eq!(buffer.row(2), "        ░░░░░░░░░░░░");
    }
}
