#![forbid(unsafe_code)]

//! Canonical input/event types.
//!
//! These are the events a host (a windowing toolkit, a terminal backend, a
//! test driver) feeds into the layout runtime. All events derive `Clone`,
//! `PartialEq`, and `Eq` for use in tests and pattern matching.
//!
//! # Design Notes
//!
//! - Pointer coordinates are 0-indexed, origin at the top-left of the viewport
//! - Pointer events are modelled as mouse events; touch hosts map the primary
//!   contact to `MouseButton::Left`
//! - `Modifiers` use bitflags for easy combination

use bitflags::bitflags;

/// Canonical input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A keyboard event.
    Key(KeyEvent),

    /// A pointer event.
    Mouse(MouseEvent),

    /// The viewport was resized.
    Resize {
        /// New viewport width.
        width: u16,
        /// New viewport height.
        height: u16,
    },
}

impl Event {
    /// Whether this is a viewport resize.
    #[must_use]
    pub const fn is_resize(&self) -> bool {
        matches!(self, Self::Resize { .. })
    }
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key code that was pressed.
    pub code: KeyCode,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Create a new key event with no modifiers.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
        }
    }

    /// Create a key event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Check if this is a specific character key.
    #[must_use]
    pub fn is_char(&self, c: char) -> bool {
        matches!(self.code, KeyCode::Char(ch) if ch == c)
    }

    /// Check if Ctrl modifier is held.
    #[must_use]
    pub const fn ctrl(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }
}

/// Key codes for keyboard events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A character key.
    Char(char),
    /// Enter/Return.
    Enter,
    /// Escape.
    Escape,
    /// Tab.
    Tab,
}

bitflags! {
    /// Modifier keys that can be held during an input event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Super/Meta/Command key.
        const SUPER = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

/// A pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    /// The type of pointer event.
    pub kind: MouseEventKind,

    /// X coordinate (0-indexed, leftmost column is 0).
    pub x: u16,

    /// Y coordinate (0-indexed, topmost row is 0).
    pub y: u16,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
}

impl MouseEvent {
    /// Create a new pointer event.
    #[must_use]
    pub const fn new(kind: MouseEventKind, x: u16, y: u16) -> Self {
        Self {
            kind,
            x,
            y,
            modifiers: Modifiers::NONE,
        }
    }

    /// Create a pointer event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Whether the pointer moved (with or without a button held).
    #[must_use]
    pub const fn is_motion(&self) -> bool {
        matches!(self.kind, MouseEventKind::Moved | MouseEventKind::Drag(_))
    }
}

/// The type of pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseEventKind {
    /// Button pressed down.
    Down(MouseButton),

    /// Button released.
    Up(MouseButton),

    /// Pointer dragged while button held.
    Drag(MouseButton),

    /// Pointer moved (no button pressed).
    Moved,
}

/// Pointer button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button (or touch contact).
    Left,

    /// Secondary button.
    Right,

    /// Middle button.
    Middle,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_event_ctrl_detection() {
        let plain = KeyEvent::new(KeyCode::Char('b'));
        assert!(!plain.ctrl());
        assert!(plain.is_char('b'));

        let chord = plain.with_modifiers(Modifiers::CTRL | Modifiers::SHIFT);
        assert!(chord.ctrl());
        assert!(!chord.is_char('x'));
    }

    #[test]
    fn mouse_motion_kinds() {
        assert!(MouseEvent::new(MouseEventKind::Moved, 0, 0).is_motion());
        assert!(MouseEvent::new(MouseEventKind::Drag(MouseButton::Left), 0, 0).is_motion());
        assert!(!MouseEvent::new(MouseEventKind::Down(MouseButton::Left), 0, 0).is_motion());
        assert!(!MouseEvent::new(MouseEventKind::Up(MouseButton::Left), 0, 0).is_motion());
    }

    #[test]
    fn resize_predicate() {
        assert!(
            Event::Resize {
                width: 80,
                height: 24
            }
            .is_resize()
        );
        assert!(!Event::Key(KeyEvent::new(KeyCode::Enter)).is_resize());
    }

    #[test]
    fn modifiers_default_is_none() {
        assert_eq!(Modifiers::default(), Modifiers::NONE);
        assert!(Modifiers::default().is_empty());
    }
}
