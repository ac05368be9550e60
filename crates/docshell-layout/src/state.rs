#![forbid(unsafe_code)]

//! Shared layout state: collapse flags, panel widths, and the viewport.
//!
//! [`LayoutState`] is the single value every slot reads. It is mutated by
//! exactly three things: toggles, drag steps, and viewport changes.
//!
//! # Invariants
//!
//! 1. Each panel width is within its configured `[min, max]` at all times.
//!    Every write goes through [`PanelBounds::clamp`].
//! 2. The breakpoint is derived from `viewport_width` on every read; it is
//!    never stored, so it cannot drift from the viewport.
//! 3. Entering [`Breakpoint::Mobile`] from any other breakpoint forces both
//!    panels collapsed in the same call that changes the viewport, so no
//!    reader sees `(collapsed = false, Mobile)` after a transition.
//! 4. The forced collapse touches the visible flags only. The user's
//!    preferred flags (set by toggles) are left alone and are what
//!    [`LayoutState::prefs`] reports.
//! 5. `toggle(); toggle()` restores the whole state, preferences included.
//!    Opening a force-collapsed panel and closing it again on the same
//!    breakpoint is not recorded as a choice to collapse it.
//!
//! # Failure Modes
//!
//! None. Out-of-range widths are clamped, not rejected.

use serde::{Deserialize, Serialize};

use crate::config::LayoutConfig;
use crate::panel::{PanelBounds, PanelSide};
use crate::{Breakpoint, Breakpoints};

/// Per-panel state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PanelState {
    collapsed: bool,
    /// Last collapse state the user chose explicitly.
    preferred_collapsed: bool,
    /// Preference to put back if the next toggle undoes a toggle that
    /// started from a forced collapse.
    undo_preference: Option<bool>,
    width: u16,
    bounds: PanelBounds,
}

impl PanelState {
    fn new(bounds: PanelBounds, width: u16, collapsed: bool) -> Self {
        Self {
            collapsed,
            preferred_collapsed: collapsed,
            undo_preference: None,
            width: bounds.clamp(width),
            bounds,
        }
    }

    fn toggle(&mut self) -> bool {
        let collapsed = !self.collapsed;
        match self.undo_preference.take() {
            Some(preferred) => self.preferred_collapsed = preferred,
            None => {
                if self.collapsed != self.preferred_collapsed {
                    self.undo_preference = Some(self.preferred_collapsed);
                }
                self.preferred_collapsed = collapsed;
            }
        }
        self.collapsed = collapsed;
        collapsed
    }
}

/// The user's explicit panel choices, suitable for persisting across sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelPrefs {
    pub navigation_collapsed: bool,
    pub intelligence_collapsed: bool,
    pub navigation_width: u16,
    pub intelligence_width: u16,
}

impl PanelPrefs {
    /// Preferences matching a fresh layout for `config`: both panels
    /// expanded at their default widths.
    #[must_use]
    pub fn from_config(config: &LayoutConfig) -> Self {
        Self {
            navigation_collapsed: false,
            intelligence_collapsed: false,
            navigation_width: config.default_width(PanelSide::Navigation),
            intelligence_width: config.default_width(PanelSide::Intelligence),
        }
    }
}

/// Outcome of applying a new viewport size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportChange {
    /// Breakpoint before the change; `None` on the initial mount.
    pub previous: Option<Breakpoint>,
    /// Breakpoint after the change.
    pub current: Breakpoint,
    /// Whether this change forced both panels collapsed.
    pub forced_collapse: bool,
}

impl ViewportChange {
    /// Returns `Some((old, new))` if the breakpoint changed.
    #[must_use]
    pub fn transition(&self) -> Option<(Breakpoint, Breakpoint)> {
        match self.previous {
            Some(previous) if previous != self.current => Some((previous, self.current)),
            _ => None,
        }
    }
}

/// Collapse flags, panel widths, and viewport size for one shell instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutState {
    navigation: PanelState,
    intelligence: PanelState,
    viewport_width: u16,
    viewport_height: u16,
    breakpoints: Breakpoints,
    collapsed_width: u16,
}

impl LayoutState {
    /// Create state for a freshly mounted shell.
    ///
    /// Both panels start expanded at their default widths. Mounting counts as
    /// entering the initial breakpoint, so a mobile viewport starts collapsed.
    #[must_use]
    pub fn new(config: &LayoutConfig, viewport_width: u16, viewport_height: u16) -> Self {
        Self::from_prefs(
            config,
            PanelPrefs::from_config(config),
            viewport_width,
            viewport_height,
        )
    }

    /// Create state seeded from persisted preferences.
    ///
    /// Widths are re-clamped against the current config, so preferences
    /// saved under different bounds cannot violate the width invariant.
    #[must_use]
    pub fn from_prefs(
        config: &LayoutConfig,
        prefs: PanelPrefs,
        viewport_width: u16,
        viewport_height: u16,
    ) -> Self {
        let mut state = Self {
            navigation: PanelState::new(
                config.bounds(PanelSide::Navigation),
                prefs.navigation_width,
                prefs.navigation_collapsed,
            ),
            intelligence: PanelState::new(
                config.bounds(PanelSide::Intelligence),
                prefs.intelligence_width,
                prefs.intelligence_collapsed,
            ),
            viewport_width,
            viewport_height,
            breakpoints: config.breakpoints(),
            collapsed_width: config.collapsed_width_px,
        };
        if state.breakpoint() == Breakpoint::Mobile {
            state.force_collapse();
        }
        state
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    #[must_use]
    pub fn viewport_width(&self) -> u16 {
        self.viewport_width
    }

    #[must_use]
    pub fn viewport_height(&self) -> u16 {
        self.viewport_height
    }

    /// Breakpoint for the current viewport width.
    #[must_use]
    pub fn breakpoint(&self) -> Breakpoint {
        self.breakpoints.classify_width(self.viewport_width)
    }

    #[must_use]
    pub fn is_mobile(&self) -> bool {
        self.breakpoint() == Breakpoint::Mobile
    }

    #[must_use]
    pub fn is_tablet(&self) -> bool {
        self.breakpoint() == Breakpoint::Tablet
    }

    #[must_use]
    pub fn is_desktop(&self) -> bool {
        self.breakpoint() == Breakpoint::Desktop
    }

    #[must_use]
    pub fn breakpoints(&self) -> Breakpoints {
        self.breakpoints
    }

    #[must_use]
    pub fn is_collapsed(&self, panel: PanelSide) -> bool {
        self.panel(panel).collapsed
    }

    #[must_use]
    pub fn navigation_collapsed(&self) -> bool {
        self.navigation.collapsed
    }

    #[must_use]
    pub fn intelligence_collapsed(&self) -> bool {
        self.intelligence.collapsed
    }

    /// Live (expanded) width of a panel, regardless of collapse state.
    #[must_use]
    pub fn width(&self, panel: PanelSide) -> u16 {
        self.panel(panel).width
    }

    #[must_use]
    pub fn bounds(&self, panel: PanelSide) -> PanelBounds {
        self.panel(panel).bounds
    }

    /// Width of the collapsed rail on tablet and desktop.
    #[must_use]
    pub fn collapsed_width(&self) -> u16 {
        self.collapsed_width
    }

    /// Width a panel occupies when rendered.
    ///
    /// - expanded: the live width
    /// - collapsed on tablet/desktop: the collapsed rail width
    /// - collapsed on mobile: 0 (hidden)
    #[must_use]
    pub fn render_width(&self, panel: PanelSide) -> u16 {
        let state = self.panel(panel);
        if !state.collapsed {
            state.width
        } else if self.is_mobile() {
            0
        } else {
            self.collapsed_width
        }
    }

    /// Whether a drag handle exists for the panel.
    ///
    /// Collapsed panels have no handle, and on mobile panels are overlays
    /// without handles.
    #[must_use]
    pub fn is_resizable(&self, panel: PanelSide) -> bool {
        !self.is_collapsed(panel) && !self.is_mobile()
    }

    /// The user's explicit choices (forced mobile collapse excluded).
    #[must_use]
    pub fn prefs(&self) -> PanelPrefs {
        PanelPrefs {
            navigation_collapsed: self.navigation.preferred_collapsed,
            intelligence_collapsed: self.intelligence.preferred_collapsed,
            navigation_width: self.navigation.width,
            intelligence_width: self.intelligence.width,
        }
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Flip a panel's collapse flag. Returns the new collapsed value.
    pub fn toggle(&mut self, panel: PanelSide) -> bool {
        let collapsed = self.panel_mut(panel).toggle();
        tracing::debug!(panel = panel.label(), collapsed, "panel toggled");
        collapsed
    }

    pub fn toggle_navigation(&mut self) -> bool {
        self.toggle(PanelSide::Navigation)
    }

    pub fn toggle_intelligence(&mut self) -> bool {
        self.toggle(PanelSide::Intelligence)
    }

    /// Explicitly collapse or expand a panel. Counts as a user choice.
    pub fn set_collapsed(&mut self, panel: PanelSide, collapsed: bool) {
        let state = self.panel_mut(panel);
        state.collapsed = collapsed;
        state.preferred_collapsed = collapsed;
        state.undo_preference = None;
        tracing::debug!(panel = panel.label(), collapsed, "panel collapse set");
    }

    /// Set a panel's live width, clamped into its bounds. Returns the stored width.
    pub fn set_width(&mut self, panel: PanelSide, width: u16) -> u16 {
        let state = self.panel_mut(panel);
        state.width = state.bounds.clamp(width);
        state.width
    }

    /// Set a panel's live width from a signed candidate, clamped into its bounds.
    pub fn set_width_signed(&mut self, panel: PanelSide, width: i32) -> u16 {
        let state = self.panel_mut(panel);
        state.width = state.bounds.clamp_signed(width);
        state.width
    }

    /// Apply a new viewport size.
    ///
    /// Recomputes the breakpoint and, only when crossing into mobile, forces
    /// both panels collapsed before returning.
    pub fn apply_viewport(&mut self, width: u16, height: u16) -> ViewportChange {
        let previous = self.breakpoint();
        self.viewport_width = width;
        self.viewport_height = height;
        let current = self.breakpoint();

        let forced_collapse = previous != Breakpoint::Mobile && current == Breakpoint::Mobile;
        if forced_collapse {
            self.force_collapse();
        }

        if previous != current {
            // A toggle pair only undoes itself within one breakpoint.
            self.navigation.undo_preference = None;
            self.intelligence.undo_preference = None;
            tracing::debug!(
                from = previous.label(),
                to = current.label(),
                width,
                height,
                forced_collapse,
                "breakpoint transition"
            );
        }

        ViewportChange {
            previous: Some(previous),
            current,
            forced_collapse,
        }
    }

    fn force_collapse(&mut self) {
        for state in [&mut self.navigation, &mut self.intelligence] {
            state.collapsed = true;
            state.undo_preference = None;
        }
    }

    fn panel(&self, panel: PanelSide) -> &PanelState {
        match panel {
            PanelSide::Navigation => &self.navigation,
            PanelSide::Intelligence => &self.intelligence,
        }
    }

    fn panel_mut(&mut self, panel: PanelSide) -> &mut PanelState {
        match panel {
            PanelSide::Navigation => &mut self.navigation,
            PanelSide::Intelligence => &mut self.intelligence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desktop() -> LayoutState {
        LayoutState::new(&LayoutConfig::default(), 1280, 800)
    }

    #[test]
    fn fresh_desktop_state() {
        let state = desktop();
        assert_eq!(state.breakpoint(), Breakpoint::Desktop);
        assert!(!state.navigation_collapsed());
        assert!(!state.intelligence_collapsed());
        assert_eq!(state.width(PanelSide::Navigation), 240);
        assert_eq!(state.width(PanelSide::Intelligence), 360);
        assert_eq!(state.render_width(PanelSide::Navigation), 240);
    }

    #[test]
    fn mounting_on_mobile_starts_collapsed() {
        let state = LayoutState::new(&LayoutConfig::default(), 375, 667);
        assert!(state.is_mobile());
        assert!(state.navigation_collapsed());
        assert!(state.intelligence_collapsed());
        // Forced collapse is not a preference.
        assert!(!state.prefs().navigation_collapsed);
    }

    #[test]
    fn toggle_twice_is_identity() {
        let mut state = desktop();
        let before = state.clone();
        state.toggle_navigation();
        assert!(state.navigation_collapsed());
        state.toggle_navigation();
        assert_eq!(state, before);

        state.toggle_intelligence();
        state.toggle_intelligence();
        assert_eq!(state, before);
    }

    #[test]
    fn open_then_close_on_mobile_keeps_prefs() {
        let mut state = desktop();
        state.apply_viewport(375, 800);
        let before = state.clone();
        let prefs = state.prefs();

        assert!(!state.toggle(PanelSide::Navigation));
        assert!(!state.prefs().navigation_collapsed);
        assert!(state.toggle(PanelSide::Navigation));

        assert_eq!(state.prefs(), prefs);
        assert!(!state.prefs().navigation_collapsed);
        assert_eq!(state, before);
    }

    #[test]
    fn closing_after_leaving_mobile_is_a_choice() {
        let mut state = desktop();
        state.apply_viewport(375, 800);
        state.toggle(PanelSide::Navigation);
        state.apply_viewport(1280, 800);
        assert!(state.toggle(PanelSide::Navigation));
        assert!(state.prefs().navigation_collapsed);
    }

    #[test]
    fn widths_are_clamped() {
        let mut state = desktop();
        assert_eq!(state.set_width(PanelSide::Navigation, 10), 180);
        assert_eq!(state.set_width(PanelSide::Navigation, 4000), 400);
        assert_eq!(state.set_width_signed(PanelSide::Intelligence, -20), 280);
        assert_eq!(state.set_width_signed(PanelSide::Intelligence, 500), 500);
    }

    #[test]
    fn entering_mobile_forces_collapse() {
        let mut state = desktop();
        let change = state.apply_viewport(375, 800);
        assert_eq!(change.current, Breakpoint::Mobile);
        assert!(change.forced_collapse);
        assert_eq!(
            change.transition(),
            Some((Breakpoint::Desktop, Breakpoint::Mobile))
        );
        assert!(state.navigation_collapsed());
        assert!(state.intelligence_collapsed());
        assert_eq!(state.render_width(PanelSide::Navigation), 0);
        assert_eq!(state.render_width(PanelSide::Intelligence), 0);
    }

    #[test]
    fn staying_on_mobile_does_not_force_again() {
        let mut state = desktop();
        state.apply_viewport(375, 800);
        state.toggle_navigation();
        assert!(!state.navigation_collapsed());

        let change = state.apply_viewport(400, 800);
        assert!(!change.forced_collapse);
        assert!(!state.navigation_collapsed());
    }

    #[test]
    fn desktop_to_tablet_keeps_flags() {
        let mut state = desktop();
        state.apply_viewport(1024, 800);
        state.toggle_navigation();
        let change = state.apply_viewport(800, 800);
        assert_eq!(
            change.transition(),
            Some((Breakpoint::Desktop, Breakpoint::Tablet))
        );
        assert!(!change.forced_collapse);
        assert!(state.navigation_collapsed());
        assert!(!state.intelligence_collapsed());
    }

    #[test]
    fn collapsed_render_width_depends_on_breakpoint() {
        let mut state = desktop();
        state.toggle(PanelSide::Intelligence);
        assert_eq!(state.render_width(PanelSide::Intelligence), 48);
        state.apply_viewport(900, 800);
        assert_eq!(state.render_width(PanelSide::Intelligence), 48);
        state.apply_viewport(500, 800);
        assert_eq!(state.render_width(PanelSide::Intelligence), 0);
    }

    #[test]
    fn forced_collapse_keeps_preferences() {
        let mut state = desktop();
        state.set_width(PanelSide::Navigation, 320);
        state.apply_viewport(375, 800);
        let prefs = state.prefs();
        assert!(!prefs.navigation_collapsed);
        assert!(!prefs.intelligence_collapsed);
        assert_eq!(prefs.navigation_width, 320);
    }

    #[test]
    fn prefs_are_reclamped_on_load() {
        let config = LayoutConfig::default();
        let prefs = PanelPrefs {
            navigation_collapsed: true,
            intelligence_collapsed: false,
            navigation_width: 9_000,
            intelligence_width: 1,
        };
        let state = LayoutState::from_prefs(&config, prefs, 1280, 800);
        assert!(state.navigation_collapsed());
        assert_eq!(state.width(PanelSide::Navigation), 400);
        assert_eq!(state.width(PanelSide::Intelligence), 280);
    }

    #[test]
    fn resizable_only_when_expanded_and_not_mobile() {
        let mut state = desktop();
        assert!(state.is_resizable(PanelSide::Navigation));
        state.toggle_navigation();
        assert!(!state.is_resizable(PanelSide::Navigation));
        state.apply_viewport(375, 800);
        state.toggle_intelligence();
        assert!(!state.intelligence_collapsed());
        assert!(!state.is_resizable(PanelSide::Intelligence));
    }
}
