#![no_main]

use arbitrary::Arbitrary;
use docshell_core::geometry::Rect;
use docshell_layout::{DragSession, LayoutConfig, LayoutState, PanelSide, ShellLayout};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Op {
    Toggle(bool),
    Begin(bool, u16),
    Move(u16),
    End,
    Viewport(u16, u16),
}

fn side(nav: bool) -> PanelSide {
    if nav {
        PanelSide::Navigation
    } else {
        PanelSide::Intelligence
    }
}

fuzz_target!(|input: (u16, u16, Vec<Op>)| {
    let (width, height, ops) = input;
    let config = LayoutConfig::default();
    let mut state = LayoutState::new(&config, width, height);
    let mut drag: Option<DragSession> = None;

    for op in ops.into_iter().take(256) {
        match op {
            Op::Toggle(nav) => {
                state.toggle(side(nav));
                if drag.is_some_and(|d| !state.is_resizable(d.panel())) {
                    drag = None;
                }
            }
            Op::Begin(nav, x) => drag = DragSession::begin(&state, side(nav), x),
            Op::Move(x) => {
                if let Some(session) = &drag {
                    session.update(&mut state, x);
                }
            }
            Op::End => drag = None,
            Op::Viewport(w, h) => {
                let change = state.apply_viewport(w, h);
                if change.forced_collapse {
                    drag = None;
                }
            }
        }

        // Widths always within bounds.
        for panel in PanelSide::ALL {
            let bounds = state.bounds(panel);
            let w = state.width(panel);
            assert!(bounds.contains(w), "{panel:?} width {w} out of bounds");
        }
        // No drag survives into mobile.
        if state.is_mobile() {
            assert!(drag.is_none(), "drag active on mobile");
        }

        // Slots stay inside the viewport.
        let area = Rect::from_size(state.viewport_width(), state.viewport_height());
        let shell = ShellLayout::compute(&state, &config, area);
        for placement in shell.paint_order() {
            let rect = placement.rect;
            assert!(rect.right() <= area.right() && rect.bottom() <= area.bottom());
        }
    }
});
