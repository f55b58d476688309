//! Drag gestures: what a press turned into and how each move updates the
//! room being manipulated.
//!
//! Every update is computed from the state captured at press time plus the
//! current pointer, never by accumulating per-event deltas.

use kurbo::{Point, Rect, Size, Vec2};

use crate::geometry::{local_from_world, normalize_degrees, points_bounds, world_from_local};
use crate::hit::{Corner, Edge, HandleKind};
use crate::scene::{Room, RoomId};
use crate::snap::{AxisTargets, snap_angle, snap_point};

/// The gesture in progress.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragState {
    #[default]
    None,
    /// Panning the view.
    Pan { start_pan: Vec2 },
    /// Translating a room.
    Move {
        id: RoomId,
        start: Point,
        start_rect: Rect,
    },
    /// Rotating a room about its center.
    Rotate {
        id: RoomId,
        start: Point,
        start_deg: f64,
    },
    /// Resizing from a corner.
    Resize {
        id: RoomId,
        corner: Corner,
        center: Point,
        start_size: Size,
    },
    /// Resizing one side.
    EdgeResize {
        id: RoomId,
        edge: Edge,
        center: Point,
        start_size: Size,
    },
    /// Drawing a new room.
    Draft(DraftRect),
}

impl DragState {
    /// Start manipulating `room` through the given handle at world point `at`.
    pub fn for_handle(room: &Room, handle: HandleKind, at: Point) -> Self {
        match handle {
            HandleKind::Rotate => DragState::Rotate {
                id: room.id.clone(),
                start: at,
                start_deg: room.angle,
            },
            HandleKind::Corner(corner) => DragState::Resize {
                id: room.id.clone(),
                corner,
                center: room.center(),
                start_size: room.size(),
            },
            HandleKind::Edge(edge) => DragState::EdgeResize {
                id: room.id.clone(),
                edge,
                center: room.center(),
                start_size: room.size(),
            },
        }
    }

    /// Start moving `room` from world point `at`.
    pub fn for_move(room: &Room, at: Point) -> Self {
        DragState::Move {
            id: room.id.clone(),
            start: at,
            start_rect: room.rect(),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, DragState::None)
    }

    /// The room this gesture manipulates, if any.
    pub fn room_id(&self) -> Option<&str> {
        match self {
            DragState::Move { id, .. }
            | DragState::Rotate { id, .. }
            | DragState::Resize { id, .. }
            | DragState::EdgeResize { id, .. } => Some(id),
            DragState::None | DragState::Pan { .. } | DragState::Draft(_) => None,
        }
    }

    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            DragState::None => "none",
            DragState::Pan { .. } => "pan",
            DragState::Move { .. } => "move",
            DragState::Rotate { .. } => "rotate",
            DragState::Resize { .. } => "resize",
            DragState::EdgeResize { .. } => "edge-resize",
            DragState::Draft(_) => "draft",
        }
    }
}

/// A room being drawn: an anchor plus a signed extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DraftRect {
    pub origin: Point,
    /// May be negative when dragging up or left of the anchor.
    pub extent: Vec2,
}

impl DraftRect {
    /// Anchor a draft at `world`, snapped to the grid when `grid` is set.
    pub fn start(world: Point, grid: Option<f64>) -> Self {
        Self {
            origin: snap_point(world, grid).point,
            extent: Vec2::ZERO,
        }
    }

    /// Stretch the draft to `world`.
    pub fn update(&mut self, world: Point, grid: Option<f64>) {
        self.extent = snap_point(world, grid).point - self.origin;
    }

    /// Normalized rectangle with positive width and height.
    pub fn rect(&self) -> Rect {
        Rect::from_points(self.origin, self.origin + self.extent)
    }

    /// Whether both sides reach `min_side`.
    pub fn is_large_enough(&self, min_side: f64) -> bool {
        self.extent.x.abs() >= min_side && self.extent.y.abs() >= min_side
    }
}

/// Snapping inputs for one drag update, all in world units.
#[derive(Debug, Clone)]
pub struct SnapContext {
    /// Edges of the other rooms on the floor.
    pub targets: AxisTargets,
    pub radius: f64,
    /// Grid spacing when grid snapping is on.
    pub grid: Option<f64>,
    pub min_side: f64,
}

/// New unrotated rect for a room dragged by `delta` from `start_rect`.
///
/// The origin is grid-snapped first, then on each axis whichever side lies
/// nearer a neighbouring edge is pulled onto it.
pub fn move_rect(start_rect: Rect, delta: Vec2, ctx: &SnapContext) -> Rect {
    let size = start_rect.size();
    let origin = snap_point(start_rect.origin() + delta, ctx.grid).point;
    let x = ctx.targets.snap_span_x(origin.x, size.width, ctx.radius);
    let y = ctx.targets.snap_span_y(origin.y, size.height, ctx.radius);
    Rect::from_origin_size(Point::new(x, y), size)
}

/// New angle for a room rotated about `center` from `start` to `current`.
pub fn rotate_angle(
    center: Point,
    start: Point,
    current: Point,
    start_deg: f64,
    angle_snap: Option<f64>,
) -> f64 {
    let a0 = (start.y - center.y).atan2(start.x - center.x);
    let a1 = (current.y - center.y).atan2(current.x - center.x);
    let deg = (a1 - a0).to_degrees() + start_deg;
    match angle_snap {
        Some(increment) => snap_angle(deg, increment),
        None => normalize_degrees(deg),
    }
}

/// Resize from `corner` with the opposite corner held in place.
///
/// The new size is found in the room's local frame, then its four world
/// edges are snapped to neighbouring rooms. Returns the unrotated rect.
pub fn resize_from_corner(
    corner: Corner,
    center: Point,
    start_size: Size,
    angle_deg: f64,
    current: Point,
    ctx: &SnapContext,
) -> Rect {
    let local = local_from_world(current, center, angle_deg);
    let (hw, hh) = (start_size.width / 2.0, start_size.height / 2.0);
    let min = ctx.min_side;

    let (left, right) = if corner.is_left() {
        (hw - (hw - local.x).max(min), hw)
    } else {
        (-hw, -hw + (local.x + hw).max(min))
    };
    let (top, bottom) = if corner.is_top() {
        (hh - (hh - local.y).max(min), hh)
    } else {
        (-hh, -hh + (local.y + hh).max(min))
    };

    let new_center = world_from_local(
        Point::new((left + right) / 2.0, (top + bottom) / 2.0),
        center,
        angle_deg,
    );
    let size = Size::new(right - left, bottom - top);
    snap_edges(Rect::from_center_size(new_center, size), ctx)
}

/// Resize by dragging one side.
///
/// The dragged side follows the pointer in the local frame, never closer
/// than `min_side` to the opposite side. The rotated rect's world bounds
/// are then snapped and become the new unrotated rect.
pub fn resize_from_edge(
    edge: Edge,
    center: Point,
    start_size: Size,
    angle_deg: f64,
    current: Point,
    ctx: &SnapContext,
) -> Rect {
    let local = local_from_world(current, center, angle_deg);
    let (hw, hh) = (start_size.width / 2.0, start_size.height / 2.0);
    let min = ctx.min_side;
    let (mut left, mut right, mut top, mut bottom) = (-hw, hw, -hh, hh);
    match edge {
        Edge::Left => left = local.x.min(right - min),
        Edge::Right => right = local.x.max(left + min),
        Edge::Top => top = local.y.min(bottom - min),
        Edge::Bottom => bottom = local.y.max(top + min),
    }
    let corners = [
        Point::new(left, top),
        Point::new(right, top),
        Point::new(right, bottom),
        Point::new(left, bottom),
    ]
    .map(|p| world_from_local(p, center, angle_deg));
    let bounds = points_bounds(&corners).unwrap_or_default();
    snap_edges(bounds, ctx)
}

/// Snap the four sides of `rect` independently, then enforce the minimum
/// size around the snapped center.
fn snap_edges(rect: Rect, ctx: &SnapContext) -> Rect {
    let left = ctx.targets.snap_x(rect.x0, ctx.radius);
    let right = ctx.targets.snap_x(rect.x1, ctx.radius);
    let top = ctx.targets.snap_y(rect.y0, ctx.radius);
    let bottom = ctx.targets.snap_y(rect.y1, ctx.radius);
    let size = Size::new(
        (right - left).max(ctx.min_side),
        (bottom - top).max(ctx.min_side),
    );
    let center = Point::new((left + right) / 2.0, (top + bottom) / 2.0);
    Rect::from_center_size(center, size)
}
