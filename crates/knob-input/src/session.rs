// SPDX-License-Identifier: MIT
//
// Drag sessions — the lifetime of one press-to-release gesture.
//
// A widget with draggable surfaces owns a `DragTracker` keyed by its
// own surface type. A press that lands on a surface opens a session for
// it; every later move feeds every open session, wherever the pointer
// is; any release closes them all. This is the "global" listener model:
// a drag that leaves the widget keeps tracking and still terminates.
//
// At most one session per surface is open at a time. Different surfaces
// may have overlapping sessions (a second pointer on another surface).
//
// The tracker only stores session state. `route` is the dispatcher that
// combines it with a `Draggable` target:
//
//   Press    hit-test → open session → first frame
//   Move     one frame per open session
//   Release  close every session, notify each surface

use std::fmt;

use tracing::{debug, trace};

use crate::error::{InputError, Result};
use crate::event::{Button, PointerEvent, PointerEventKind};
use crate::geometry::Point;

// ─── Draggable ──────────────────────────────────────────────────────────────

/// Something with surfaces a pointer can drag across.
pub trait Draggable {
    /// Identifies one surface of the target.
    type Surface: Copy + Eq + fmt::Debug;

    /// The surface under `point`, if any.
    fn hit_test(&self, point: Point) -> Option<Self::Surface>;

    /// One frame of a drag on `surface`, the pointer now at `point`.
    fn drag_to(&mut self, surface: Self::Surface, point: Point);

    /// The session on `surface` ended.
    fn drag_end(&mut self, _surface: Self::Surface) {}
}

// ─── Session ────────────────────────────────────────────────────────────────

/// One open drag session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession<S> {
    surface: S,
    origin: Point,
    last: Point,
    frames: usize,
}

impl<S: Copy> DragSession<S> {
    #[must_use]
    pub const fn surface(&self) -> S {
        self.surface
    }

    /// Where the press landed.
    #[must_use]
    pub const fn origin(&self) -> Point {
        self.origin
    }

    /// The latest pointer position.
    #[must_use]
    pub const fn last(&self) -> Point {
        self.last
    }

    /// Frames delivered so far, including the press.
    #[must_use]
    pub const fn frames(&self) -> usize {
        self.frames
    }
}

// ─── Tracker ────────────────────────────────────────────────────────────────

/// The open sessions of one widget, in the order they began.
#[derive(Debug, Clone)]
pub struct DragTracker<S> {
    sessions: Vec<DragSession<S>>,
}

impl<S> Default for DragTracker<S> {
    fn default() -> Self {
        Self { sessions: Vec::new() }
    }
}

impl<S: Copy + Eq + fmt::Debug> DragTracker<S> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a session on `surface`.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::SessionActive`] if `surface` already has one.
    pub fn begin(&mut self, surface: S, point: Point) -> Result<()> {
        if self.is_active(surface) {
            return Err(InputError::SessionActive { surface: format!("{surface:?}") });
        }
        debug!(?surface, x = point.x, y = point.y, "drag session begin");
        self.sessions.push(DragSession { surface, origin: point, last: point, frames: 1 });
        Ok(())
    }

    /// Record a pointer move; returns the surfaces that should redraw.
    pub fn update(&mut self, point: Point) -> Vec<S> {
        self.sessions
            .iter_mut()
            .map(|session| {
                session.last = point;
                session.frames += 1;
                trace!(surface = ?session.surface, x = point.x, y = point.y, "drag frame");
                session.surface
            })
            .collect()
    }

    /// Close the session on `surface`, if one is open.
    pub fn end(&mut self, surface: S) -> Option<DragSession<S>> {
        let index = self.sessions.iter().position(|s| s.surface == surface)?;
        let session = self.sessions.remove(index);
        debug!(?surface, frames = session.frames, "drag session end");
        Some(session)
    }

    /// Close every open session.
    pub fn end_all(&mut self) -> Vec<DragSession<S>> {
        let ended: Vec<_> = self.sessions.drain(..).collect();
        for session in &ended {
            debug!(surface = ?session.surface, frames = session.frames, "drag session end");
        }
        ended
    }

    #[must_use]
    pub fn is_active(&self, surface: S) -> bool {
        self.sessions.iter().any(|s| s.surface == surface)
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.sessions.is_empty()
    }

    #[must_use]
    pub fn session(&self, surface: S) -> Option<&DragSession<S>> {
        self.sessions.iter().find(|s| s.surface == surface)
    }

    pub fn sessions(&self) -> impl Iterator<Item = &DragSession<S>> {
        self.sessions.iter()
    }
}

// ─── Dispatch ───────────────────────────────────────────────────────────────

/// Feed one pointer event to a draggable target.
///
/// Returns `true` when the event was consumed: a press that opened a
/// session, a move that drove one, or a release that closed one.
///
/// # Errors
///
/// Returns [`InputError::SessionActive`] when a press hits a surface whose
/// previous session never saw its release. The old session stays open.
pub fn route<D: Draggable>(
    target: &mut D,
    tracker: &mut DragTracker<D::Surface>,
    event: &PointerEvent,
) -> Result<bool> {
    let point = Point::new(event.x, event.y);
    match event.kind {
        PointerEventKind::Press(Button::Left) => {
            let Some(surface) = target.hit_test(point) else {
                return Ok(false);
            };
            tracker.begin(surface, point)?;
            target.drag_to(surface, point);
            Ok(true)
        }
        PointerEventKind::Move => {
            let surfaces = tracker.update(point);
            for &surface in &surfaces {
                target.drag_to(surface, point);
            }
            Ok(!surfaces.is_empty())
        }
        PointerEventKind::Release(_) => {
            let ended = tracker.end_all();
            for session in &ended {
                target.drag_end(session.surface);
            }
            Ok(!ended.is_empty())
        }
        PointerEventKind::Press(_) => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Surface {
        Left,
        Right,
    }

    /// Two side-by-side 10×10 surfaces that log what they are told.
    #[derive(Default)]
    struct Pad {
        frames: Vec<(Surface, f64, f64)>,
        ended: Vec<Surface>,
    }

    impl Draggable for Pad {
        type Surface = Surface;

        fn hit_test(&self, point: Point) -> Option<Surface> {
            if Rect::new(0.0, 0.0, 10.0, 10.0).contains(point) {
                Some(Surface::Left)
            } else if Rect::new(10.0, 0.0, 10.0, 10.0).contains(point) {
                Some(Surface::Right)
            } else {
                None
            }
        }

        fn drag_to(&mut self, surface: Surface, point: Point) {
            self.frames.push((surface, point.x, point.y));
        }

        fn drag_end(&mut self, surface: Surface) {
            self.ended.push(surface);
        }
    }

    #[test]
    fn press_move_release() {
        let mut pad = Pad::default();
        let mut tracker = DragTracker::new();

        assert!(route(&mut pad, &mut tracker, &PointerEvent::press(2.0, 3.0)).unwrap());
        assert!(tracker.is_active(Surface::Left));
        assert!(route(&mut pad, &mut tracker, &PointerEvent::moved(4.0, 5.0)).unwrap());
        assert_eq!(tracker.session(Surface::Left).map(DragSession::frames), Some(2));
        assert!(route(&mut pad, &mut tracker, &PointerEvent::release(4.0, 5.0)).unwrap());

        assert_eq!(pad.frames, vec![(Surface::Left, 2.0, 3.0), (Surface::Left, 4.0, 5.0)]);
        assert_eq!(pad.ended, vec![Surface::Left]);
        assert!(tracker.is_idle());
    }

    #[test]
    fn moves_outside_keep_tracking() {
        let mut pad = Pad::default();
        let mut tracker = DragTracker::new();
        route(&mut pad, &mut tracker, &PointerEvent::press(1.0, 1.0)).unwrap();
        route(&mut pad, &mut tracker, &PointerEvent::moved(500.0, -40.0)).unwrap();
        assert_eq!(pad.frames.last(), Some(&(Surface::Left, 500.0, -40.0)));

        // Released far away: the session still ends.
        route(&mut pad, &mut tracker, &PointerEvent::release(900.0, 900.0)).unwrap();
        assert!(tracker.is_idle());
    }

    #[test]
    fn idle_moves_and_missed_presses_are_ignored() {
        let mut pad = Pad::default();
        let mut tracker = DragTracker::new();
        assert!(!route(&mut pad, &mut tracker, &PointerEvent::moved(1.0, 1.0)).unwrap());
        assert!(!route(&mut pad, &mut tracker, &PointerEvent::press(50.0, 50.0)).unwrap());
        assert!(!route(&mut pad, &mut tracker, &PointerEvent::release(1.0, 1.0)).unwrap());
        assert!(pad.frames.is_empty());
        assert!(pad.ended.is_empty());
    }

    #[test]
    fn non_left_press_is_ignored() {
        let mut pad = Pad::default();
        let mut tracker = DragTracker::new();
        let press = PointerEvent::new(PointerEventKind::Press(Button::Right), 1.0, 1.0);
        assert!(!route(&mut pad, &mut tracker, &press).unwrap());
        assert!(tracker.is_idle());
    }

    #[test]
    fn one_session_per_surface() {
        let mut tracker = DragTracker::new();
        tracker.begin(Surface::Left, Point::new(0.0, 0.0)).unwrap();
        let err = tracker.begin(Surface::Left, Point::new(1.0, 1.0)).unwrap_err();
        assert_eq!(err, InputError::SessionActive { surface: "Left".into() });
        assert_eq!(tracker.sessions().count(), 1);
        assert_eq!(tracker.session(Surface::Left).map(DragSession::origin), Some(Point::new(0.0, 0.0)));
    }

    #[test]
    fn distinct_surfaces_may_overlap() {
        let mut pad = Pad::default();
        let mut tracker = DragTracker::new();
        route(&mut pad, &mut tracker, &PointerEvent::press(1.0, 1.0)).unwrap();
        route(&mut pad, &mut tracker, &PointerEvent::press(15.0, 1.0)).unwrap();
        route(&mut pad, &mut tracker, &PointerEvent::moved(7.0, 7.0)).unwrap();
        assert_eq!(
            &pad.frames[2..],
            &[(Surface::Left, 7.0, 7.0), (Surface::Right, 7.0, 7.0)]
        );
        route(&mut pad, &mut tracker, &PointerEvent::release(7.0, 7.0)).unwrap();
        assert_eq!(pad.ended, vec![Surface::Left, Surface::Right]);
    }

    #[test]
    fn end_single_surface() {
        let mut tracker = DragTracker::new();
        tracker.begin(Surface::Left, Point::new(0.0, 0.0)).unwrap();
        tracker.begin(Surface::Right, Point::new(0.0, 0.0)).unwrap();
        let ended = tracker.end(Surface::Left).unwrap();
        assert_eq!(ended.surface(), Surface::Left);
        assert!(!tracker.is_active(Surface::Left));
        assert!(tracker.is_active(Surface::Right));
        assert_eq!(tracker.end(Surface::Left), None);
    }

    #[test]
    fn repeated_press_without_release_is_an_error() {
        let mut pad = Pad::default();
        let mut tracker = DragTracker::new();
        route(&mut pad, &mut tracker, &PointerEvent::press(1.0, 1.0)).unwrap();
        assert!(route(&mut pad, &mut tracker, &PointerEvent::press(2.0, 2.0)).is_err());
        assert_eq!(pad.frames.len(), 1);
    }
}
