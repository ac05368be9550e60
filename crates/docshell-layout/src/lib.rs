#![forbid(unsafe_code)]

//! Layout primitives for the adaptive three-pane shell.
//!
//! # Role in docshell
//! `docshell-layout` is pure state and geometry: no I/O, no listeners, no
//! clocks. It answers three questions for the runtime:
//!
//! - Which [`Breakpoint`] does a viewport width fall into?
//! - What is the [`LayoutState`] after a toggle, a drag step, or a resize?
//! - Where does each [`Slot`] go, and what is under the pointer?
//!
//! Everything here is deterministic, so the runtime's event handling can be
//! replayed and property-tested against it.

pub mod config;
pub mod drag;
pub mod panel;
pub mod responsive;
pub mod slots;
pub mod state;
pub mod visibility;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use config::{LayoutConfig, LayoutConfigError};
pub use docshell_core::geometry::Rect;
pub use drag::DragSession;
pub use panel::{PanelBounds, PanelEdge, PanelSide};
pub use responsive::Responsive;
pub use slots::{
    HeaderAction, ShellGeometry, ShellHit, ShellLayout, Slot, SlotMode, SlotPlacement,
};
pub use state::{LayoutState, PanelPrefs, ViewportChange};
pub use visibility::Visibility;

/// Responsive tier derived from the viewport width.
///
/// Ordered from narrowest to widest, so `Breakpoint::Mobile < Breakpoint::Desktop`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Breakpoint {
    /// Narrower than the mobile threshold.
    Mobile = 0,
    /// Between the mobile and desktop thresholds.
    Tablet = 1,
    /// At or above the desktop threshold.
    Desktop = 2,
}

impl Breakpoint {
    /// All breakpoints, narrowest first.
    pub const ALL: [Breakpoint; 3] = [Self::Mobile, Self::Tablet, Self::Desktop];

    /// Short lowercase label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Mobile => "mobile",
            Self::Tablet => "tablet",
            Self::Desktop => "desktop",
        }
    }
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Width thresholds separating the three breakpoints.
///
/// `mobile` is the first width that is no longer mobile; `desktop` is the
/// first width that is desktop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Breakpoints {
    /// Widths below this are [`Breakpoint::Mobile`].
    pub mobile: u16,
    /// Widths at or above this are [`Breakpoint::Desktop`].
    pub desktop: u16,
}

impl Breakpoints {
    /// 768 / 1024, the conventional tablet and desktop cut-offs.
    pub const DEFAULT: Self = Self {
        mobile: 768,
        desktop: 1024,
    };

    /// Create thresholds. A `desktop` below `mobile` is raised to `mobile`,
    /// which leaves no tablet tier.
    #[must_use]
    pub const fn new(mobile: u16, desktop: u16) -> Self {
        let desktop = if desktop < mobile { mobile } else { desktop };
        Self { mobile, desktop }
    }

    /// Classify a viewport width.
    #[must_use]
    pub const fn classify_width(self, width: u16) -> Breakpoint {
        if width < self.mobile {
            Breakpoint::Mobile
        } else if width >= self.desktop {
            Breakpoint::Desktop
        } else {
            Breakpoint::Tablet
        }
    }

    /// Returns `Some((old, new))` if moving between the widths crosses a threshold.
    #[must_use]
    pub fn detect_transition(
        self,
        old_width: u16,
        new_width: u16,
    ) -> Option<(Breakpoint, Breakpoint)> {
        let old_bp = self.classify_width(old_width);
        let new_bp = self.classify_width(new_width);
        (old_bp != new_bp).then_some((old_bp, new_bp))
    }
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_default_thresholds() {
        let bps = Breakpoints::DEFAULT;
        assert_eq!(bps.classify_width(0), Breakpoint::Mobile);
        assert_eq!(bps.classify_width(375), Breakpoint::Mobile);
        assert_eq!(bps.classify_width(767), Breakpoint::Mobile);
        assert_eq!(bps.classify_width(768), Breakpoint::Tablet);
        assert_eq!(bps.classify_width(800), Breakpoint::Tablet);
        assert_eq!(bps.classify_width(1023), Breakpoint::Tablet);
        assert_eq!(bps.classify_width(1024), Breakpoint::Desktop);
        assert_eq!(bps.classify_width(u16::MAX), Breakpoint::Desktop);
    }

    #[test]
    fn inverted_thresholds_drop_tablet() {
        let bps = Breakpoints::new(900, 600);
        assert_eq!(bps.desktop, 900);
        assert_eq!(bps.classify_width(899), Breakpoint::Mobile);
        assert_eq!(bps.classify_width(900), Breakpoint::Desktop);
    }

    #[test]
    fn detect_transition_some_and_none() {
        let bps = Breakpoints::DEFAULT;
        assert_eq!(
            bps.detect_transition(1024, 800),
            Some((Breakpoint::Desktop, Breakpoint::Tablet))
        );
        assert_eq!(bps.detect_transition(900, 800), None);
    }

    #[test]
    fn breakpoint_order_and_labels() {
        assert!(Breakpoint::Mobile < Breakpoint::Tablet);
        assert!(Breakpoint::Tablet < Breakpoint::Desktop);
        assert_eq!(Breakpoint::Tablet.to_string(), "tablet");
        assert_eq!(
            serde_json::to_string(&Breakpoint::Desktop).unwrap(),
            "\"desktop\""
        );
    }
}
