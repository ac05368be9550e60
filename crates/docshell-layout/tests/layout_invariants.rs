//! Property invariants for layout state and slot placement.
//!
//! Random streams of toggles, drag steps and viewport changes are applied
//! to a [`LayoutState`]; after every step the width bounds, the mobile
//! collapse rule and the slot tiling must hold.

use docshell_layout::{
    Breakpoint, Breakpoints, DragSession, LayoutConfig, LayoutState, PanelSide, Rect, ShellLayout,
    Slot, SlotMode,
};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Toggle(PanelSide),
    Drag { panel: PanelSide, from: u16, to: u16 },
    Viewport(u16),
}

fn panel_strategy() -> impl Strategy<Value = PanelSide> {
    prop_oneof![Just(PanelSide::Navigation), Just(PanelSide::Intelligence)]
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        panel_strategy().prop_map(Op::Toggle),
        (panel_strategy(), any::<u16>(), any::<u16>())
            .prop_map(|(panel, from, to)| Op::Drag { panel, from, to }),
        (0u16..2_000).prop_map(Op::Viewport),
    ]
}

fn apply(state: &mut LayoutState, op: &Op) {
    match *op {
        Op::Toggle(panel) => {
            state.toggle(panel);
        }
        Op::Drag { panel, from, to } => {
            if let Some(session) = DragSession::begin(state, panel, from) {
                session.update(state, to);
            }
        }
        Op::Viewport(width) => {
            state.apply_viewport(width, 800);
        }
    }
}

fn assert_widths_in_bounds(state: &LayoutState, config: &LayoutConfig) {
    for panel in PanelSide::ALL {
        let bounds = config.bounds(panel);
        let width = state.width(panel);
        assert!(
            bounds.contains(width),
            "{panel} width {width} outside [{}, {}]",
            bounds.min(),
            bounds.max()
        );
    }
}

fn assert_tiling(shell: &ShellLayout, area: Rect) {
    let header = shell.rect(Slot::Header);
    let main = shell.rect(Slot::Main);
    assert_eq!(header.height + main.height, area.height);
    assert_eq!(main.y, header.bottom());

    let inline_width: u32 = [Slot::Navigation, Slot::Canvas, Slot::Intelligence]
        .into_iter()
        .map(|slot| shell.placement(slot))
        .filter(|p| p.mode == SlotMode::Inline && p.slot != Slot::Canvas)
        .map(|p| u32::from(p.rect.width))
        .sum::<u32>()
        + u32::from(shell.rect(Slot::Canvas).width);
    assert!(inline_width <= u32::from(main.width));

    for slot in Slot::ALL {
        let rect = shell.rect(slot);
        if !rect.is_empty() {
            assert_eq!(rect.intersection_opt(&area), Some(rect), "{slot} escapes area");
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn widths_stay_within_bounds(ops in prop::collection::vec(op_strategy(), 1..80)) {
        let config = LayoutConfig::default();
        let mut state = LayoutState::new(&config, 1280, 800);
        for op in &ops {
            apply(&mut state, op);
            assert_widths_in_bounds(&state, &config);
        }
    }

    #[test]
    fn drag_width_is_clamped_candidate(
        panel in panel_strategy(),
        from in 0u16..2_000,
        to in 0u16..2_000,
    ) {
        let config = LayoutConfig::default();
        let mut state = LayoutState::new(&config, 1280, 800);
        let session = DragSession::begin(&state, panel, from).unwrap();
        let width = session.update(&mut state, to);
        let bounds = config.bounds(panel);
        let candidate = session.candidate_width(to);
        prop_assert_eq!(i32::from(width), candidate.clamp(i32::from(bounds.min()), i32::from(bounds.max())));
    }

    #[test]
    fn breakpoint_classification_is_pure(width in any::<u16>()) {
        let bps = Breakpoints::DEFAULT;
        let first = bps.classify_width(width);
        prop_assert_eq!(first, bps.classify_width(width));
        let expected = if width < 768 {
            Breakpoint::Mobile
        } else if width >= 1024 {
            Breakpoint::Desktop
        } else {
            Breakpoint::Tablet
        };
        prop_assert_eq!(first, expected);
    }

    #[test]
    fn entering_mobile_always_collapses(
        ops in prop::collection::vec(op_strategy(), 0..40),
        mobile_width in 0u16..768,
    ) {
        let config = LayoutConfig::default();
        let mut state = LayoutState::new(&config, 1280, 800);
        for op in &ops {
            apply(&mut state, op);
        }
        // Make sure the next step is a crossing into mobile.
        state.apply_viewport(1024, 800);
        let change = state.apply_viewport(mobile_width, 800);
        prop_assert!(change.forced_collapse);
        prop_assert!(state.navigation_collapsed());
        prop_assert!(state.intelligence_collapsed());
    }

    #[test]
    fn double_toggle_is_identity(
        ops in prop::collection::vec(op_strategy(), 0..40),
        panel in panel_strategy(),
    ) {
        let config = LayoutConfig::default();
        let mut state = LayoutState::new(&config, 1280, 800);
        for op in &ops {
            apply(&mut state, op);
        }
        let before = state.clone();
        state.toggle(panel);
        state.toggle(panel);
        prop_assert_eq!(state, before);
    }

    #[test]
    fn slots_tile_the_area(
        ops in prop::collection::vec(op_strategy(), 0..40),
        height in 0u16..1_200,
    ) {
        let config = LayoutConfig::default();
        let mut state = LayoutState::new(&config, 1280, 800);
        for op in &ops {
            apply(&mut state, op);
        }
        let area = Rect::from_size(state.viewport_width(), height);
        let shell = ShellLayout::compute(&state, &config, area);
        assert_tiling(&shell, area);

        for panel in PanelSide::ALL {
            if shell.handle(panel).is_some() {
                prop_assert!(state.is_resizable(panel));
            }
        }
        if state.is_mobile() {
            prop_assert!(shell.handle(PanelSide::Navigation).is_none());
            prop_assert!(shell.handle(PanelSide::Intelligence).is_none());
        }
    }
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn viewport_375_collapses_both_and_hides_them() {
    let config = LayoutConfig::default();
    let mut state = LayoutState::new(&config, 1280, 800);
    state.apply_viewport(375, 800);
    assert!(state.navigation_collapsed());
    assert!(state.intelligence_collapsed());
    assert_eq!(state.render_width(PanelSide::Navigation), 0);
    assert_eq!(state.render_width(PanelSide::Intelligence), 0);

    let shell = ShellLayout::compute(&state, &config, Rect::from_size(375, 800));
    assert_eq!(shell.placement(Slot::Navigation).mode, SlotMode::Hidden);
    assert_eq!(shell.rect(Slot::Canvas).width, 375);
}

#[test]
fn desktop_to_tablet_leaves_flags_alone() {
    let config = LayoutConfig::default();
    let mut state = LayoutState::new(&config, 1024, 800);
    state.toggle_intelligence();
    state.apply_viewport(800, 800);
    assert!(!state.navigation_collapsed());
    assert!(state.intelligence_collapsed());
}

#[test]
fn navigation_drag_of_500_clamps_to_max() {
    let config = LayoutConfig::default();
    let mut state = LayoutState::new(&config, 1280, 800);
    let session = DragSession::begin(&state, PanelSide::Navigation, 240).unwrap();
    assert_eq!(session.update(&mut state, 740), 400);
}
