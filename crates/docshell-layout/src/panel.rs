#![forbid(unsafe_code)]

//! Side panels and their width bounds.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the two resizable side panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelSide {
    /// Document/workspace navigation, docked left.
    Navigation,
    /// Chat/"intelligence" panel, docked right.
    Intelligence,
}

/// Which viewport edge a panel is docked to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelEdge {
    Left,
    Right,
}

impl PanelSide {
    /// Both panels, left first.
    pub const ALL: [PanelSide; 2] = [Self::Navigation, Self::Intelligence];

    /// Short lowercase label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Navigation => "navigation",
            Self::Intelligence => "intelligence",
        }
    }

    #[must_use]
    pub const fn edge(self) -> PanelEdge {
        match self {
            Self::Navigation => PanelEdge::Left,
            Self::Intelligence => PanelEdge::Right,
        }
    }

    /// Sign applied to a rightward pointer delta to get a width delta.
    ///
    /// Dragging right widens a left-docked panel and narrows a right-docked one.
    #[must_use]
    pub const fn drag_sign(self) -> i32 {
        match self.edge() {
            PanelEdge::Left => 1,
            PanelEdge::Right => -1,
        }
    }
}

impl fmt::Display for PanelSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Inclusive `[min, max]` width bounds for a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelBounds {
    min: u16,
    max: u16,
}

impl PanelBounds {
    /// Create bounds. Swapped arguments are normalized so `min <= max`.
    #[must_use]
    pub const fn new(min: u16, max: u16) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    #[must_use]
    pub const fn min(self) -> u16 {
        self.min
    }

    #[must_use]
    pub const fn max(self) -> u16 {
        self.max
    }

    #[must_use]
    pub const fn contains(self, width: u16) -> bool {
        width >= self.min && width <= self.max
    }

    /// Clamp a width into the bounds.
    #[must_use]
    pub const fn clamp(self, width: u16) -> u16 {
        if width < self.min {
            self.min
        } else if width > self.max {
            self.max
        } else {
            width
        }
    }

    /// Clamp a signed candidate width (e.g. initial width plus a large
    /// negative drag delta) into the bounds.
    #[must_use]
    pub fn clamp_signed(self, width: i32) -> u16 {
        let clamped = width.clamp(i32::from(self.min), i32::from(self.max));
        // In range by construction.
        u16::try_from(clamped).unwrap_or(self.min)
    }
}
