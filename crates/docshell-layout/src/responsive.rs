#![forbid(unsafe_code)]

//! Responsive value mapping: apply different values based on breakpoint.
//!
//! [`Responsive<T>`] maps [`Breakpoint`] tiers to values of any type,
//! with inheritance from narrower breakpoints. If no value is set for a
//! given breakpoint, the value from the next narrower breakpoint is used.
//!
//! # Usage
//!
//! ```
//! use docshell_layout::{Breakpoint, Responsive, SlotMode};
//!
//! // Overlay on mobile, inline from tablet up.
//! let panels = Responsive::new(SlotMode::Overlay).at(Breakpoint::Tablet, SlotMode::Inline);
//! assert_eq!(panels.resolve(Breakpoint::Mobile), &SlotMode::Overlay);
//! assert_eq!(panels.resolve(Breakpoint::Desktop), &SlotMode::Inline); // inherits Tablet
//! ```
//!
//! # Invariants
//!
//! 1. `Mobile` always has a value (set via `new()`).
//! 2. A missing tier inherits from the nearest narrower tier that has a value.
//! 3. `resolve()` never fails.

use crate::Breakpoint;

/// A breakpoint-aware value with inheritance from narrower tiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Responsive<T> {
    /// Values indexed by `Breakpoint` ordinal. Slot 0 is always `Some`.
    values: [Option<T>; 3],
}

impl<T: Clone> Responsive<T> {
    /// Create a responsive value with a base value for `Mobile`.
    #[must_use]
    pub fn new(base: T) -> Self {
        Self {
            values: [Some(base), None, None],
        }
    }

    /// Set the value for a specific breakpoint (builder pattern).
    #[must_use]
    pub fn at(mut self, bp: Breakpoint, value: T) -> Self {
        self.set(bp, value);
        self
    }

    /// Set the value for a specific breakpoint (mutating).
    pub fn set(&mut self, bp: Breakpoint, value: T) {
        self.values[bp as usize] = Some(value);
    }

    /// Clear the override for a breakpoint, reverting to inheritance.
    ///
    /// Clearing `Mobile` is a no-op.
    pub fn clear(&mut self, bp: Breakpoint) {
        if bp != Breakpoint::Mobile {
            self.values[bp as usize] = None;
        }
    }

    /// Resolve the value for a given breakpoint.
    #[must_use]
    pub fn resolve(&self, bp: Breakpoint) -> &T {
        self.values[..=bp as usize]
            .iter()
            .rev()
            .find_map(Option::as_ref)
            .unwrap_or_else(|| self.base())
    }

    /// Whether a breakpoint has an explicit (non-inherited) value.
    #[must_use]
    pub fn has_explicit(&self, bp: Breakpoint) -> bool {
        self.values[bp as usize].is_some()
    }

    fn base(&self) -> &T {
        match &self.values[0] {
            Some(value) => value,
            None => unreachable!("Mobile always has a value"),
        }
    }
}

impl<T: Clone + Default> Default for Responsive<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_value_at_all_breakpoints() {
        let r = Responsive::new(42);
        for bp in Breakpoint::ALL {
            assert_eq!(r.resolve(bp), &42);
        }
    }

    #[test]
    fn override_inherits_upward() {
        let r = Responsive::new(1).at(Breakpoint::Tablet, 2);
        assert_eq!(r.resolve(Breakpoint::Mobile), &1);
        assert_eq!(r.resolve(Breakpoint::Tablet), &2);
        assert_eq!(r.resolve(Breakpoint::Desktop), &2);
    }

    #[test]
    fn clear_reverts_to_inheritance() {
        let mut r = Responsive::new(1)
            .at(Breakpoint::Tablet, 2)
            .at(Breakpoint::Desktop, 3);
        r.clear(Breakpoint::Desktop);
        assert_eq!(r.resolve(Breakpoint::Desktop), &2);
        r.clear(Breakpoint::Mobile);
        assert_eq!(r.resolve(Breakpoint::Mobile), &1);
    }

    #[test]
    fn has_explicit() {
        let r = Responsive::new(0).at(Breakpoint::Desktop, 3);
        assert!(r.has_explicit(Breakpoint::Mobile));
        assert!(!r.has_explicit(Breakpoint::Tablet));
        assert!(r.has_explicit(Breakpoint::Desktop));
    }
}
