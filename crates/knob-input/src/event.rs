// SPDX-License-Identifier: MIT
//
// Input event types.
//
// Whatever hosts the panel (a browser shim, a native window, a test)
// translates its own events into these before handing them over.
// Pointer coordinates are floating point in the host's layout space;
// there is no notion of a cell grid here.

use bitflags::bitflags;

// ─── Event Types ────────────────────────────────────────────────────────────

/// An input event delivered to a panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    Pointer(PointerEvent),
    Key(KeyEvent),
}

/// A pointer event with action and position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// What happened (press, release, move).
    pub kind: PointerEventKind,
    /// Horizontal position in layout units.
    pub x: f64,
    /// Vertical position in layout units, growing downward.
    pub y: f64,
}

impl PointerEvent {
    /// A left-button press at `(x, y)`.
    #[must_use]
    pub const fn press(x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Press(Button::Left), x, y)
    }

    /// A left-button release at `(x, y)`.
    #[must_use]
    pub const fn release(x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Release(Button::Left), x, y)
    }

    /// A move to `(x, y)`.
    #[must_use]
    pub const fn moved(x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Move, x, y)
    }

    #[must_use]
    pub const fn new(kind: PointerEventKind, x: f64, y: f64) -> Self {
        Self { kind, x, y }
    }
}

/// Pointer event classification.
///
/// Moves are reported whether or not a button is held; the drag machinery
/// decides what a move means from its own session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEventKind {
    Press(Button),
    Release(Button),
    Move,
}

/// Pointer button identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Left,
    Middle,
    Right,
}

/// A key press with key identity and modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// A key press with no modifiers.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self { code, modifiers: Modifiers::empty() }
    }

    #[must_use]
    pub const fn with_modifiers(code: KeyCode, modifiers: Modifiers) -> Self {
        Self { code, modifiers }
    }

    #[must_use]
    pub const fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }
}

/// Identity of a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    /// A Unicode character (printable).
    Char(char),
    // ── Named keys ──────────────────────────────────────────────
    Enter,
    Tab,
    Backspace,
    Escape,
    // ── Navigation ──────────────────────────────────────────────
    Up,
    Down,
    Left,
    Right,
}

bitflags! {
    /// Keyboard modifier flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0000_0001;
        const ALT   = 0b0000_0010;
        const CTRL  = 0b0000_0100;
        const META  = 0b0000_1000;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_helpers_use_left_button() {
        assert_eq!(PointerEvent::press(1.0, 2.0).kind, PointerEventKind::Press(Button::Left));
        assert_eq!(PointerEvent::release(1.0, 2.0).kind, PointerEventKind::Release(Button::Left));
        assert_eq!(PointerEvent::moved(1.0, 2.0).kind, PointerEventKind::Move);
    }

    #[test]
    fn key_modifiers() {
        assert!(KeyEvent::new(KeyCode::Up).modifiers.is_empty());
        assert!(!KeyEvent::new(KeyCode::Up).shift());
        let shifted = KeyEvent::with_modifiers(KeyCode::Up, Modifiers::SHIFT | Modifiers::ALT);
        assert!(shifted.shift());
        assert!(!KeyEvent::with_modifiers(KeyCode::Up, Modifiers::CTRL).shift());
    }

    #[test]
    fn modifiers_combine() {
        let m = Modifiers::SHIFT | Modifiers::CTRL;
        assert!(m.contains(Modifiers::SHIFT));
        assert!(!m.contains(Modifiers::ALT));
        assert_eq!(m.bits(), 0b0101);
    }
}
