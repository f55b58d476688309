//! Snap functionality for aligning rooms to the grid, to each other and
//! placing items on walls.

use kurbo::Point;

use crate::geometry::normalize_degrees;
use crate::hit::Edge;
use crate::scene::Room;

pub use crate::config::{ANGLE_SNAP_INCREMENT, GRID_SIZE};

/// Result of a snap operation.
#[derive(Debug, Clone, Copy)]
pub struct SnapResult {
    /// The snapped point.
    pub point: Point,
    /// Whether the X coordinate was snapped.
    pub snapped_x: bool,
    /// Whether the Y coordinate was snapped.
    pub snapped_y: bool,
}

impl SnapResult {
    /// Create a result with no snapping.
    pub fn none(point: Point) -> Self {
        Self {
            point,
            snapped_x: false,
            snapped_y: false,
        }
    }

    /// Check if any snapping occurred.
    pub fn is_snapped(&self) -> bool {
        self.snapped_x || self.snapped_y
    }
}

/// Round a value to the nearest multiple of `grid_size`.
pub fn snap_value(value: f64, grid_size: f64) -> f64 {
    (value / grid_size).round() * grid_size
}

/// Snap a point to the nearest grid intersection.
pub fn snap_to_grid(point: Point, grid_size: f64) -> SnapResult {
    SnapResult {
        point: Point::new(snap_value(point.x, grid_size), snap_value(point.y, grid_size)),
        snapped_x: true,
        snapped_y: true,
    }
}

/// Snap a point when grid snapping is enabled.
pub fn snap_point(point: Point, grid: Option<f64>) -> SnapResult {
    match grid {
        Some(size) => snap_to_grid(point, size),
        None => SnapResult::none(point),
    }
}

/// Snap an angle to the nearest increment.
/// Returns the snapped angle in degrees (0-360).
pub fn snap_angle(angle_degrees: f64, increment: f64) -> f64 {
    normalize_degrees((angle_degrees / increment).round() * increment)
}

/// The target nearest to `value` within `radius`, if any.
///
/// Ties keep the earliest target.
pub fn nearest_target(value: f64, targets: &[f64], radius: f64) -> Option<f64> {
    let mut best: Option<(f64, f64)> = None;
    for &t in targets {
        let d = (t - value).abs();
        if d > radius {
            continue;
        }
        if best.is_none_or(|(_, best_d)| d < best_d) {
            best = Some((t, d));
        }
    }
    best.map(|(t, _)| t)
}

/// Replace `value` with the nearest target within `radius`.
pub fn snap_to_targets(value: f64, targets: &[f64], radius: f64) -> f64 {
    nearest_target(value, targets, radius).unwrap_or(value)
}

/// Edge coordinates of neighbouring rooms, used as magnetic guides.
///
/// Uses each room's unrotated rectangle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AxisTargets {
    /// Left and right edges.
    pub xs: Vec<f64>,
    /// Top and bottom edges.
    pub ys: Vec<f64>,
}

impl AxisTargets {
    /// Collect targets from `rooms`.
    pub fn from_rooms<'a, I>(rooms: I) -> Self
    where
        I: IntoIterator<Item = &'a Room>,
    {
        let mut targets = Self::default();
        for room in rooms {
            targets.xs.extend([room.x, room.x + room.w]);
            targets.ys.extend([room.y, room.y + room.h]);
        }
        targets
    }

    pub fn snap_x(&self, x: f64, radius: f64) -> f64 {
        snap_to_targets(x, &self.xs, radius)
    }

    pub fn snap_y(&self, y: f64, radius: f64) -> f64 {
        snap_to_targets(y, &self.ys, radius)
    }

    /// Snap a span `[start, start + len]` so whichever end lies closer to a
    /// target touches it. Returns the new start.
    pub fn snap_span_x(&self, start: f64, len: f64, radius: f64) -> f64 {
        snap_span(&self.xs, start, len, radius)
    }

    pub fn snap_span_y(&self, start: f64, len: f64, radius: f64) -> f64 {
        snap_span(&self.ys, start, len, radius)
    }
}

fn snap_span(targets: &[f64], start: f64, len: f64, radius: f64) -> f64 {
    let lead = nearest_target(start, targets, radius).map(|t| t - start);
    let trail = nearest_target(start + len, targets, radius).map(|t| t - (start + len));
    let shift = match (lead, trail) {
        (Some(a), Some(b)) => {
            if b.abs() < a.abs() {
                b
            } else {
                a
            }
        }
        (Some(a), None) => a,
        (None, Some(b)) => b,
        (None, None) => 0.0,
    };
    start + shift
}

/// Where an item lands when snapped onto a wall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeSnap {
    /// Closest point on the wall.
    pub point: Point,
    /// Item orientation in degrees: top 0, right 90, bottom 180, left -90,
    /// plus the room's own rotation.
    pub angle_deg: f64,
    /// Which wall of the room was hit.
    pub edge: Edge,
}

/// Snap a world point onto the nearest wall of a single room.
///
/// Returns the snap and the squared distance to it.
pub fn snap_to_room_edge(room: &Room, point: Point) -> (EdgeSnap, f64) {
    let local = room.to_local(point);
    let (hw, hh) = (room.w / 2.0, room.h / 2.0);

    // Order decides ties.
    let candidates = [
        (Edge::Left, (local.x + hw).abs()),
        (Edge::Right, (local.x - hw).abs()),
        (Edge::Top, (local.y + hh).abs()),
        (Edge::Bottom, (local.y - hh).abs()),
    ];
    let (edge, _) = candidates
        .into_iter()
        .fold(candidates[0], |best, c| if c.1 < best.1 { c } else { best });

    let (on_edge, base) = match edge {
        Edge::Left => (Point::new(-hw, local.y.clamp(-hh, hh)), -90.0),
        Edge::Right => (Point::new(hw, local.y.clamp(-hh, hh)), 90.0),
        Edge::Top => (Point::new(local.x.clamp(-hw, hw), -hh), 0.0),
        Edge::Bottom => (Point::new(local.x.clamp(-hw, hw), hh), 180.0),
    };
    let world = room.to_world(on_edge);
    let snap = EdgeSnap {
        point: world,
        angle_deg: base + room.angle,
        edge,
    };
    (snap, (world - point).hypot2())
}

/// Snap a world point onto the closest wall among `rooms`.
///
/// Ties keep the earliest room.
pub fn snap_to_nearest_room_edge(rooms: &[Room], point: Point) -> Option<EdgeSnap> {
    let mut best: Option<(EdgeSnap, f64)> = None;
    for room in rooms {
        let (snap, dist_sq) = snap_to_room_edge(room, point);
        if best.is_none_or(|(_, d)| dist_sq < d) {
            best = Some((snap, dist_sq));
        }
    }
    best.map(|(snap, _)| snap)
}
