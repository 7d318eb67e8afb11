// SPDX-License-Identifier: MIT
//
// knob-input — Pointer and key input for knob panels.
//
// Event types the host translates its native input into, layout
// rectangles, and the drag session machinery that turns a press, a run
// of moves and a release into frames on a draggable surface.

pub mod error;
pub mod event;
pub mod geometry;
pub mod session;

pub use error::{InputError, Result};
pub use event::{Button, Event, KeyCode, KeyEvent, Modifiers, PointerEvent, PointerEventKind};
pub use geometry::{Point, Rect, unit_fraction};
pub use session::{DragSession, DragTracker, Draggable, route};
