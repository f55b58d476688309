//! Input events and pointer tracking for touch/mouse gestures.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

use crate::scene::ItemType;

/// Editing mode of the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Dragging on empty canvas draws a new room.
    #[default]
    Draw,
    /// Dragging selects, moves, resizes and rotates rooms, or pans.
    Move,
    PlaceDoor,
    PlaceWindow,
    PlaceStairs,
}

impl Mode {
    /// The item a tap places in this mode, if any.
    pub fn placement(self) -> Option<ItemType> {
        match self {
            Mode::PlaceDoor => Some(ItemType::Door),
            Mode::PlaceWindow => Some(ItemType::Window),
            Mode::PlaceStairs => Some(ItemType::Stairs),
            Mode::Draw | Mode::Move => None,
        }
    }
}

/// Gesture events delivered by the host, all in screen pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InputEvent {
    /// A single pointer went down.
    PointerStart { position: Point },
    /// The pointer moved; `delta` is relative to the previous move.
    PointerMove {
        position: Point,
        #[serde(default)]
        delta: Vec2,
    },
    /// The pointer was lifted or the gesture was cancelled.
    PointerEnd,
    /// One step of a multi-touch pinch/pan.
    Transform { centroid: Point, pan: Vec2, zoom: f64 },
    Tap { position: Point },
    DoubleTap { position: Point },
}

/// Tracks the active pointer between start and end of a drag.
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    /// Where the pointer went down, if a drag is in progress.
    drag_start: Option<Point>,
    /// Last reported pointer position.
    pub pointer_position: Point,
    /// Whether the pointer has left the touch-slop circle.
    moved_enough: bool,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin tracking a drag at `position`.
    pub fn start(&mut self, position: Point) {
        self.drag_start = Some(position);
        self.pointer_position = position;
        self.moved_enough = false;
    }

    /// Record a move. Returns `true` once the cumulative distance from the
    /// press point has exceeded `slop`; until then the move should be ignored.
    pub fn update(&mut self, position: Point, slop: f64) -> bool {
        self.pointer_position = position;
        let Some(start) = self.drag_start else {
            return false;
        };
        if !self.moved_enough && (position - start).hypot() > slop {
            self.moved_enough = true;
        }
        self.moved_enough
    }

    /// Stop tracking. Returns whether a drag was in progress.
    pub fn end(&mut self) -> bool {
        self.moved_enough = false;
        self.drag_start.take().is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_start.is_some()
    }

    /// Get the drag delta from start position, if dragging.
    pub fn drag_delta(&self) -> Option<Vec2> {
        self.drag_start.map(|start| self.pointer_position - start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slop_is_cumulative() {
        let mut tracker = PointerTracker::new();
        tracker.start(Point::new(100.0, 100.0));
        // Many tiny moves in one direction eventually cross the threshold.
        assert!(!tracker.update(Point::new(103.0, 100.0), 6.0));
        assert!(!tracker.update(Point::new(106.0, 100.0), 6.0));
        assert!(tracker.update(Point::new(106.5, 100.0), 6.0));
        // Once past the slop, coming back near the start still counts.
        assert!(tracker.update(Point::new(100.0, 100.0), 6.0));
    }

    #[test]
    fn test_drag_delta() {
        let mut tracker = PointerTracker::new();
        assert!(tracker.drag_delta().is_none());
        tracker.start(Point::new(10.0, 10.0));
        tracker.update(Point::new(40.0, 30.0), 6.0);
        assert_eq!(tracker.drag_delta(), Some(Vec2::new(30.0, 20.0)));
        assert!(tracker.end());
        assert!(!tracker.is_dragging());
        assert!(!tracker.end());
    }

    #[test]
    fn test_update_without_start() {
        let mut tracker = PointerTracker::new();
        assert!(!tracker.update(Point::new(500.0, 500.0), 6.0));
    }

    #[test]
    fn test_mode_placement() {
        assert_eq!(Mode::PlaceDoor.placement(), Some(ItemType::Door));
        assert_eq!(Mode::Move.placement(), None);
        assert_eq!(Mode::default(), Mode::Draw);
    }

    #[test]
    fn test_event_json() {
        let event: InputEvent =
            serde_json::from_str(r#"{"kind":"pointer_start","position":{"x":1.0,"y":2.0}}"#).unwrap();
        assert_eq!(
            event,
            InputEvent::PointerStart {
                position: Point::new(1.0, 2.0)
            }
        );
        let end: InputEvent = serde_json::from_str(r#"{"kind":"pointer_end"}"#).unwrap();
        assert_eq!(end, InputEvent::PointerEnd);
    }
}
