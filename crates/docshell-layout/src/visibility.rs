#![forbid(unsafe_code)]

//! Breakpoint-based visibility rules.
//!
//! [`Visibility`] decides whether a shell element exists at a given
//! breakpoint. Hidden elements produce no rect and no hit target.
//!
//! # Usage
//!
//! ```
//! use docshell_layout::{Breakpoint, Visibility};
//!
//! // Header toggle buttons exist only on mobile.
//! let toggles = Visibility::only(Breakpoint::Mobile);
//! assert!(toggles.is_visible(Breakpoint::Mobile));
//! assert!(!toggles.is_visible(Breakpoint::Tablet));
//! ```

use crate::Breakpoint;

const ALL_MASK: u8 = 0b111;

/// Breakpoint-aware visibility rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visibility {
    /// Bitmask: bit i set = visible at Breakpoint with ordinal i.
    mask: u8,
}

impl Visibility {
    /// Visible at all breakpoints.
    pub const ALWAYS: Self = Self { mask: ALL_MASK };

    /// Hidden at all breakpoints.
    pub const NEVER: Self = Self { mask: 0 };

    /// Visible at the given breakpoint and all wider ones.
    #[must_use]
    pub const fn visible_above(bp: Breakpoint) -> Self {
        Self {
            mask: (ALL_MASK << (bp as u8)) & ALL_MASK,
        }
    }

    /// Visible at the given breakpoint and all narrower ones.
    #[must_use]
    pub const fn visible_below(bp: Breakpoint) -> Self {
        Self {
            mask: (1u8 << (bp as u8 + 1)) - 1,
        }
    }

    /// Visible at exactly one breakpoint.
    #[must_use]
    pub const fn only(bp: Breakpoint) -> Self {
        Self {
            mask: 1u8 << (bp as u8),
        }
    }

    #[must_use]
    pub const fn is_visible(self, bp: Breakpoint) -> bool {
        self.mask & (1u8 << (bp as u8)) != 0
    }

    #[must_use]
    pub const fn is_hidden(self, bp: Breakpoint) -> bool {
        !self.is_visible(bp)
    }

    /// Iterator over breakpoints where visible.
    pub fn visible_breakpoints(self) -> impl Iterator<Item = Breakpoint> {
        Breakpoint::ALL
            .into_iter()
            .filter(move |&bp| self.is_visible(bp))
    }
}
