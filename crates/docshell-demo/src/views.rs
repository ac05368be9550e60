#![forbid(unsafe_code)]

//! Placeholder slot views for the walkthrough.

use docshell_layout::{HeaderAction, PanelSide, Slot};
use docshell_runtime::{LayoutContext, SlotFrame, SlotRegistry};

const DOCUMENTS: [&str; 4] = ["contract.pdf", "invoice-042.pdf", "minutes.docx", "notes.md"];

/// A registry with a view for every content slot.
#[must_use]
pub fn registry() -> SlotRegistry {
    let mut registry = SlotRegistry::new();
    registry.register(Slot::Header, header);
    registry.register(Slot::Navigation, navigation);
    registry.register(Slot::Canvas, canvas);
    registry.register(Slot::Intelligence, intelligence);
    registry
}

fn header(ctx: &LayoutContext, frame: &mut SlotFrame<'_>) {
    let area = frame.area();
    let title = "docshell";
    let title_col = area.width.saturating_sub(title.len() as u16) / 2;
    frame.print(title_col, 0, title);

    for &(action, rect) in ctx.shell().header_actions() {
        let glyph = match action {
            HeaderAction::ToggleNavigation => "[≡]",
            HeaderAction::ToggleIntelligence => "[✦]",
        };
        frame.print(rect.x.saturating_sub(area.x), 0, glyph);
    }
    if !ctx.is_mobile() {
        frame.print(1, 0, ctx.breakpoint().label());
    }

    if area.height > 1 {
        let rule = "─".repeat(usize::from(area.width));
        frame.print(0, area.height - 1, &rule);
    }
}

fn navigation(ctx: &LayoutContext, frame: &mut SlotFrame<'_>) {
    if rail(ctx, frame, PanelSide::Navigation, "»") {
        return;
    }
    frame.print(1, 0, "Documents");
    for (row, name) in (1u16..).zip(DOCUMENTS) {
        frame.print(2, row, name);
    }
    let width = format!("{} cols", ctx.navigation_width());
    frame.print(1, frame.area().height.saturating_sub(1), &width);
}

fn canvas(ctx: &LayoutContext, frame: &mut SlotFrame<'_>) {
    frame.print(2, 0, "Document canvas");
    let size = format!(
        "{}x{} {}",
        ctx.viewport_width(),
        ctx.viewport_height(),
        ctx.breakpoint()
    );
    frame.print(2, 1, &size);
}

fn intelligence(ctx: &LayoutContext, frame: &mut SlotFrame<'_>) {
    if rail(ctx, frame, PanelSide::Intelligence, "«") {
        return;
    }
    frame.print(2, 0, "Intelligence");
    frame.print(2, 1, "Ask about this document");
    let width = format!("{} cols", ctx.intelligence_width());
    frame.print(2, frame.area().height.saturating_sub(1), &width);
}

/// Draw a collapsed rail. Returns whether the panel was collapsed.
fn rail(ctx: &LayoutContext, frame: &mut SlotFrame<'_>, panel: PanelSide, glyph: &str) -> bool {
    if !ctx.state().is_collapsed(panel) {
        return false;
    }
    frame.print(1, 0, glyph);
    true
}
