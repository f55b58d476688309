//! Hit-testing for rooms and their manipulation handles.
//!
//! All tests run in world space with radii already divided by the view
//! scale, so handles keep a constant on-screen size.

use kurbo::Point;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::scene::Room;

/// Type of manipulation handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleKind {
    /// Corner handle for resizing both sides at once.
    Corner(Corner),
    /// Edge band for resizing a single side.
    Edge(Edge),
    /// Rotation handle, above the top edge.
    Rotate,
}

/// Corner positions, in the room's local frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    pub fn is_left(self) -> bool {
        matches!(self, Corner::TopLeft | Corner::BottomLeft)
    }

    pub fn is_top(self) -> bool {
        matches!(self, Corner::TopLeft | Corner::TopRight)
    }

    /// Local position for a `w x h` rect centered on the origin.
    pub fn local_position(self, w: f64, h: f64) -> Point {
        let x = if self.is_left() { -w / 2.0 } else { w / 2.0 };
        let y = if self.is_top() { -h / 2.0 } else { h / 2.0 };
        Point::new(x, y)
    }
}

/// Edge positions, in the room's local frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Left, Edge::Right, Edge::Top, Edge::Bottom];

    /// Local midpoint for a `w x h` rect centered on the origin.
    pub fn local_midpoint(self, w: f64, h: f64) -> Point {
        match self {
            Edge::Top => Point::new(0.0, -h / 2.0),
            Edge::Right => Point::new(w / 2.0, 0.0),
            Edge::Bottom => Point::new(0.0, h / 2.0),
            Edge::Left => Point::new(-w / 2.0, 0.0),
        }
    }
}

/// A handle with its world position and type.
#[derive(Debug, Clone, Copy)]
pub struct Handle {
    /// Position in world coordinates.
    pub position: Point,
    /// Handle type.
    pub kind: HandleKind,
}

impl Handle {
    /// Create a new handle.
    pub fn new(position: Point, kind: HandleKind) -> Self {
        Self { position, kind }
    }

    /// Check if a world point lies within `tolerance` of this handle.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        (point - self.position).hypot2() <= tolerance * tolerance
    }
}

/// Handle geometry in world units for a given view scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRadii {
    pub rotate_gap: f64,
    pub rotate_radius: f64,
    pub corner_radius: f64,
    pub edge_band: f64,
}

impl HitRadii {
    /// Convert the configured pixel sizes into world units at `scale`.
    pub fn for_scale(config: &EngineConfig, scale: f64) -> Self {
        Self {
            rotate_gap: config.rotate_gap_px / scale,
            rotate_radius: config.rotate_hit_radius_px / scale,
            corner_radius: config.corner_hit_radius_px / scale,
            edge_band: config.edge_band_px / scale,
        }
    }
}

impl Default for HitRadii {
    fn default() -> Self {
        Self::for_scale(&EngineConfig::default(), 1.0)
    }
}

/// World position of the rotate handle.
pub fn rotate_handle_position(room: &Room, gap: f64) -> Point {
    room.to_world(Point::new(0.0, -room.h / 2.0 - gap))
}

/// Every handle of a room: rotate, four corners, four edge midpoints.
pub fn room_handles(room: &Room, radii: &HitRadii) -> Vec<Handle> {
    let mut handles = Vec::with_capacity(9);
    handles.push(Handle::new(
        rotate_handle_position(room, radii.rotate_gap),
        HandleKind::Rotate,
    ));
    for corner in Corner::ALL {
        handles.push(Handle::new(
            room.to_world(corner.local_position(room.w, room.h)),
            HandleKind::Corner(corner),
        ));
    }
    for edge in Edge::ALL {
        handles.push(Handle::new(
            room.to_world(edge.local_midpoint(room.w, room.h)),
            HandleKind::Edge(edge),
        ));
    }
    handles
}

/// Find which handle of `room` (if any) is hit at a world point.
///
/// Priority is rotate, then corners, then edge bands.
pub fn hit_test_handle(room: &Room, point: Point, radii: &HitRadii) -> Option<HandleKind> {
    if Handle::new(rotate_handle_position(room, radii.rotate_gap), HandleKind::Rotate)
        .hit_test(point, radii.rotate_radius)
    {
        return Some(HandleKind::Rotate);
    }

    let local = room.to_local(point);
    for corner in Corner::ALL {
        let handle = Handle::new(
            corner.local_position(room.w, room.h),
            HandleKind::Corner(corner),
        );
        if handle.hit_test(local, radii.corner_radius) {
            return Some(handle.kind);
        }
    }

    let (hw, hh) = (room.w / 2.0, room.h / 2.0);
    let band = radii.edge_band;
    let within_y = local.y.abs() <= hh + band;
    let within_x = local.x.abs() <= hw + band;
    Edge::ALL
        .into_iter()
        .find(|edge| match edge {
            Edge::Left => (local.x + hw).abs() <= band && within_y,
            Edge::Right => (local.x - hw).abs() <= band && within_y,
            Edge::Top => (local.y + hh).abs() <= band && within_x,
            Edge::Bottom => (local.y - hh).abs() <= band && within_x,
        })
        .map(HandleKind::Edge)
}

/// Whether a world point lies inside the room body.
pub fn hit_test_body(room: &Room, point: Point) -> bool {
    room.contains(point)
}

/// Topmost room containing the world point (last in drawing order wins).
pub fn room_at(rooms: &[Room], point: Point) -> Option<&Room> {
    rooms.iter().rev().find(|room| hit_test_body(room, point))
}
