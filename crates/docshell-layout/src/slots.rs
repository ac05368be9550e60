#![forbid(unsafe_code)]

//! Slot placement and hit testing for the three-pane shell.
//!
//! [`ShellLayout::compute`] turns a [`LayoutState`] and a viewport area into
//! one [`SlotPlacement`] per [`Slot`], plus the interactive regions that sit
//! on top of them: resize handles, header toggle actions and the mobile
//! backdrop.
//!
//! ```text
//! Tablet / Desktop                    Mobile (navigation expanded)
//! ┌──────────────────────────────┐    ┌────────────────────┐
//! │ header                       │    │ ≡   header       ✦ │
//! ├──────┬┬──────────────┬┬──────┤    ├─────────┬──────────┤
//! │ nav  ││ canvas       ││ intel│    │ nav     │░backdrop░│
//! │      ││              ││      │    │ overlay │░░░░░░░░░░│
//! └──────┴┴──────────────┴┴──────┘    └─────────┴──────────┘
//!        ^ handles       ^
//! ```
//!
//! # Invariants
//!
//! 1. Header and main tile the area vertically; header height is fixed.
//! 2. Inline slots (navigation, canvas, intelligence) tile main horizontally.
//! 3. Handles exist only for panels that are inline and resizable
//!    (expanded, not mobile).
//! 4. Overlays and the backdrop exist only when a panel is expanded on a
//!    breakpoint whose presentation is [`SlotMode::Overlay`].
//! 5. Header toggle actions follow [`ShellGeometry::header_actions`].

use std::fmt;

use crate::config::LayoutConfig;
use crate::panel::{PanelEdge, PanelSide};
use crate::responsive::Responsive;
use crate::state::LayoutState;
use crate::visibility::Visibility;
use crate::{Breakpoint, Rect};

// ---------------------------------------------------------------------------
// Slot vocabulary
// ---------------------------------------------------------------------------

/// A named region of the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Slot {
    Header,
    Main,
    Navigation,
    Canvas,
    Intelligence,
}

impl Slot {
    /// All slots, outermost first.
    pub const ALL: [Slot; 5] = [
        Self::Header,
        Self::Main,
        Self::Navigation,
        Self::Canvas,
        Self::Intelligence,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::Main => "main",
            Self::Navigation => "navigation",
            Self::Canvas => "canvas",
            Self::Intelligence => "intelligence",
        }
    }

    /// The panel this slot hosts, if it is a side panel.
    #[must_use]
    pub const fn panel(self) -> Option<PanelSide> {
        match self {
            Self::Navigation => Some(PanelSide::Navigation),
            Self::Intelligence => Some(PanelSide::Intelligence),
            _ => None,
        }
    }
}

impl From<PanelSide> for Slot {
    fn from(panel: PanelSide) -> Self {
        match panel {
            PanelSide::Navigation => Self::Navigation,
            PanelSide::Intelligence => Self::Intelligence,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a slot is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SlotMode {
    /// Takes part in the horizontal tiling of main.
    #[default]
    Inline,
    /// Floats above the canvas, behind nothing but the header.
    Overlay,
    /// Not rendered. The rect is empty.
    Hidden,
}

/// Where one slot landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotPlacement {
    pub slot: Slot,
    pub rect: Rect,
    pub mode: SlotMode,
    /// For side panels: whether the panel is collapsed. Always false otherwise.
    pub collapsed: bool,
}

impl SlotPlacement {
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.mode != SlotMode::Hidden && !self.rect.is_empty()
    }
}

/// A header button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderAction {
    ToggleNavigation,
    ToggleIntelligence,
}

impl HeaderAction {
    pub const ALL: [HeaderAction; 2] = [Self::ToggleNavigation, Self::ToggleIntelligence];

    /// The panel this action toggles.
    #[must_use]
    pub const fn panel(self) -> PanelSide {
        match self {
            Self::ToggleNavigation => PanelSide::Navigation,
            Self::ToggleIntelligence => PanelSide::Intelligence,
        }
    }
}

/// Result of a hit test, topmost region first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellHit {
    /// A panel's resize handle.
    Handle(PanelSide),
    /// A header toggle button.
    HeaderAction(HeaderAction),
    /// The dimmed area behind mobile overlays.
    Backdrop,
    /// Plain slot content.
    Slot(Slot),
}

// ---------------------------------------------------------------------------
// Geometry rules
// ---------------------------------------------------------------------------

/// Breakpoint-dependent presentation rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellGeometry {
    /// How an expanded side panel is presented.
    pub panel_presentation: Responsive<SlotMode>,
    /// Where the header toggle buttons exist.
    pub header_actions: Visibility,
    /// Width of a resize handle strip.
    pub handle_width: u16,
    /// Width of a header toggle button.
    pub action_width: u16,
}

impl Default for ShellGeometry {
    fn default() -> Self {
        Self {
            panel_presentation: Responsive::new(SlotMode::Overlay)
                .at(Breakpoint::Tablet, SlotMode::Inline),
            header_actions: Visibility::only(Breakpoint::Mobile),
            handle_width: 1,
            action_width: 48,
        }
    }
}

// ---------------------------------------------------------------------------
// ShellLayout
// ---------------------------------------------------------------------------

/// Computed placement of every slot for one layout state and area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellLayout {
    breakpoint: Breakpoint,
    area: Rect,
    header: SlotPlacement,
    main: SlotPlacement,
    navigation: SlotPlacement,
    canvas: SlotPlacement,
    intelligence: SlotPlacement,
    backdrop: Option<Rect>,
    navigation_handle: Option<Rect>,
    intelligence_handle: Option<Rect>,
    header_actions: Vec<(HeaderAction, Rect)>,
}

impl ShellLayout {
    /// Place every slot with the default [`ShellGeometry`].
    #[must_use]
    pub fn compute(state: &LayoutState, config: &LayoutConfig, area: Rect) -> Self {
        Self::compute_with(state, config, area, &ShellGeometry::default())
    }

    /// Place every slot with explicit presentation rules.
    #[must_use]
    pub fn compute_with(
        state: &LayoutState,
        config: &LayoutConfig,
        area: Rect,
        geometry: &ShellGeometry,
    ) -> Self {
        let breakpoint = state.breakpoint();
        let (header_rect, main_rect) = area.take_top(config.header_height);
        let panel_mode = *geometry.panel_presentation.resolve(breakpoint);

        let header_actions = if geometry.header_actions.is_visible(breakpoint) {
            // Each button gets at most half the header so they never overlap.
            let action_width = geometry.action_width.min(header_rect.width / 2);
            HeaderAction::ALL
                .into_iter()
                .map(|action| {
                    let (rect, _) = match action.panel().edge() {
                        PanelEdge::Left => header_rect.take_left(action_width),
                        PanelEdge::Right => header_rect.take_right(action_width),
                    };
                    (action, rect)
                })
                .filter(|(_, rect)| !rect.is_empty())
                .collect()
        } else {
            Vec::new()
        };

        let mut layout = Self {
            breakpoint,
            area,
            header: SlotPlacement {
                slot: Slot::Header,
                rect: header_rect,
                mode: SlotMode::Inline,
                collapsed: false,
            },
            main: SlotPlacement {
                slot: Slot::Main,
                rect: main_rect,
                mode: SlotMode::Inline,
                collapsed: false,
            },
            navigation: hidden(Slot::Navigation, main_rect, state),
            canvas: SlotPlacement {
                slot: Slot::Canvas,
                rect: main_rect,
                mode: SlotMode::Inline,
                collapsed: false,
            },
            intelligence: hidden(Slot::Intelligence, main_rect, state),
            backdrop: None,
            navigation_handle: None,
            intelligence_handle: None,
            header_actions,
        };

        match panel_mode {
            SlotMode::Inline => layout.tile_inline(state, main_rect, geometry.handle_width),
            SlotMode::Overlay => layout.stack_overlays(state, main_rect),
            SlotMode::Hidden => {}
        }
        layout
    }

    /// Panels share main with the canvas. Collapsed panels keep a rail.
    ///
    /// When both panels do not fit, navigation keeps its width and the
    /// intelligence panel is clipped to what is left (the canvas gets
    /// nothing). Drags on a clipped panel start from its visible width.
    fn tile_inline(&mut self, state: &LayoutState, main: Rect, handle_width: u16) {
        let (nav_rect, rest) = main.take_left(state.render_width(PanelSide::Navigation));
        let (intel_rect, canvas_rect) = rest.take_right(state.render_width(PanelSide::Intelligence));

        for (panel, rect) in [
            (PanelSide::Navigation, nav_rect),
            (PanelSide::Intelligence, intel_rect),
        ] {
            let placement = SlotPlacement {
                slot: panel.into(),
                rect,
                mode: SlotMode::Inline,
                collapsed: state.is_collapsed(panel),
            };
            let handle = (state.is_resizable(panel) && rect.width >= handle_width && handle_width > 0)
                .then(|| match panel.edge() {
                    // Inner edge: right side of the left panel, left side of the right one.
                    PanelEdge::Left => rect.take_right(handle_width).0,
                    PanelEdge::Right => rect.take_left(handle_width).0,
                });
            match panel {
                PanelSide::Navigation => {
                    self.navigation = placement;
                    self.navigation_handle = handle;
                }
                PanelSide::Intelligence => {
                    self.intelligence = placement;
                    self.intelligence_handle = handle;
                }
            }
        }
        self.canvas.rect = canvas_rect;
    }

    /// Expanded panels float above a full-width canvas.
    fn stack_overlays(&mut self, state: &LayoutState, main: Rect) {
        let mut any_open = false;
        for panel in PanelSide::ALL {
            if state.is_collapsed(panel) {
                continue;
            }
            any_open = true;
            let (rect, _) = match panel.edge() {
                PanelEdge::Left => main.take_left(state.width(panel)),
                PanelEdge::Right => main.take_right(state.width(panel)),
            };
            let placement = SlotPlacement {
                slot: panel.into(),
                rect,
                mode: SlotMode::Overlay,
                collapsed: false,
            };
            match panel {
                PanelSide::Navigation => self.navigation = placement,
                PanelSide::Intelligence => self.intelligence = placement,
            }
        }
        if any_open {
            self.backdrop = Some(main);
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    #[must_use]
    pub fn breakpoint(&self) -> Breakpoint {
        self.breakpoint
    }

    #[must_use]
    pub fn area(&self) -> Rect {
        self.area
    }

    /// Placement of a slot.
    #[must_use]
    pub fn placement(&self, slot: Slot) -> &SlotPlacement {
        match slot {
            Slot::Header => &self.header,
            Slot::Main => &self.main,
            Slot::Navigation => &self.navigation,
            Slot::Canvas => &self.canvas,
            Slot::Intelligence => &self.intelligence,
        }
    }

    /// Shorthand for `placement(slot).rect`.
    #[must_use]
    pub fn rect(&self, slot: Slot) -> Rect {
        self.placement(slot).rect
    }

    /// Resize handle for a panel, if it has one.
    #[must_use]
    pub fn handle(&self, panel: PanelSide) -> Option<Rect> {
        match panel {
            PanelSide::Navigation => self.navigation_handle,
            PanelSide::Intelligence => self.intelligence_handle,
        }
    }

    /// The dimmed region behind overlays.
    #[must_use]
    pub fn backdrop(&self) -> Option<Rect> {
        self.backdrop
    }

    /// Header toggle buttons at this breakpoint.
    #[must_use]
    pub fn header_actions(&self) -> &[(HeaderAction, Rect)] {
        &self.header_actions
    }

    /// Rect of a header action, if it is shown.
    #[must_use]
    pub fn header_action(&self, action: HeaderAction) -> Option<Rect> {
        self.header_actions
            .iter()
            .find(|(a, _)| *a == action)
            .map(|(_, rect)| *rect)
    }

    /// Panels currently presented as overlays.
    pub fn overlays(&self) -> impl Iterator<Item = &SlotPlacement> {
        [&self.navigation, &self.intelligence]
            .into_iter()
            .filter(|p| p.mode == SlotMode::Overlay)
    }

    /// Visible placements in paint order: header, inline content, then overlays.
    ///
    /// `Main` is a container and is not included; renderers paint it first.
    #[must_use]
    pub fn paint_order(&self) -> Vec<&SlotPlacement> {
        let mut order: Vec<&SlotPlacement> = [
            &self.header,
            &self.navigation,
            &self.canvas,
            &self.intelligence,
        ]
        .into_iter()
        .filter(|p| p.mode == SlotMode::Inline && p.is_visible())
        .collect();
        order.extend(self.overlays().filter(|p| p.is_visible()));
        order
    }

    /// Topmost interactive region under `(x, y)`.
    #[must_use]
    pub fn hit(&self, x: u16, y: u16) -> Option<ShellHit> {
        if self.header.rect.contains(x, y) {
            let action = self
                .header_actions
                .iter()
                .find(|(_, rect)| rect.contains(x, y))
                .map(|(action, _)| ShellHit::HeaderAction(*action));
            return Some(action.unwrap_or(ShellHit::Slot(Slot::Header)));
        }

        if let Some(overlay) = self.overlays().find(|p| p.rect.contains(x, y)) {
            return Some(ShellHit::Slot(overlay.slot));
        }
        if self.backdrop.is_some_and(|rect| rect.contains(x, y)) {
            return Some(ShellHit::Backdrop);
        }

        for panel in PanelSide::ALL {
            if self.handle(panel).is_some_and(|rect| rect.contains(x, y)) {
                return Some(ShellHit::Handle(panel));
            }
        }

        [&self.navigation, &self.canvas, &self.intelligence]
            .into_iter()
            .find(|p| p.mode == SlotMode::Inline && p.rect.contains(x, y))
            .map(|p| ShellHit::Slot(p.slot))
    }
}

fn hidden(slot: Slot, main: Rect, state: &LayoutState) -> SlotPlacement {
    let collapsed = slot.panel().is_some_and(|panel| state.is_collapsed(panel));
    SlotPlacement {
        slot,
        rect: Rect::new(main.x, main.y, 0, main.height),
        mode: SlotMode::Hidden,
        collapsed,
    }
}
