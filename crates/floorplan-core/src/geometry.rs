//! Coordinate-space conversions and rotated-rectangle helpers.
//!
//! Three spaces are in play: screen (device pixels), world (plan units) and
//! room-local (origin at the room center, axes along the room's edges).
//! Angles are in degrees and grow clockwise on screen since y points down.

use kurbo::{Affine, Point, Rect, Vec2};

/// Convert a screen point to world coordinates.
pub fn world_from_screen(screen: Point, pan: Vec2, scale: f64) -> Point {
    Point::new((screen.x - pan.x) / scale, (screen.y - pan.y) / scale)
}

/// Convert a world point to screen coordinates.
pub fn screen_from_world(world: Point, pan: Vec2, scale: f64) -> Point {
    Point::new(world.x * scale + pan.x, world.y * scale + pan.y)
}

/// Express a world point in the frame of a rectangle centered at `center`
/// and rotated by `angle_deg`.
pub fn local_from_world(world: Point, center: Point, angle_deg: f64) -> Point {
    let (sin, cos) = (-angle_deg).to_radians().sin_cos();
    let d = world - center;
    Point::new(d.x * cos - d.y * sin, d.x * sin + d.y * cos)
}

/// Inverse of [`local_from_world`].
pub fn world_from_local(local: Point, center: Point, angle_deg: f64) -> Point {
    let (sin, cos) = angle_deg.to_radians().sin_cos();
    Point::new(
        center.x + local.x * cos - local.y * sin,
        center.y + local.x * sin + local.y * cos,
    )
}

/// Affine mapping room-local coordinates to world coordinates.
///
/// Renderers can draw an axis-aligned `w x h` rect centered on the origin
/// under this transform.
pub fn local_to_world_transform(center: Point, angle_deg: f64) -> Affine {
    Affine::translate(center.to_vec2()) * Affine::rotate(angle_deg.to_radians())
}

/// Whether a local point lies inside a `w x h` rect centered on the origin.
pub fn inside_local_rect(local: Point, w: f64, h: f64) -> bool {
    local.x.abs() <= w / 2.0 && local.y.abs() <= h / 2.0
}

/// Normalize an angle to `[0, 360)`.
pub fn normalize_degrees(deg: f64) -> f64 {
    let a = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if a >= 360.0 { 0.0 } else { a }
}

/// World-space corners of a rotated rectangle, clockwise from top-left.
pub fn rotated_corners(center: Point, w: f64, h: f64, angle_deg: f64) -> [Point; 4] {
    let (hw, hh) = (w / 2.0, h / 2.0);
    [
        Point::new(-hw, -hh),
        Point::new(hw, -hh),
        Point::new(hw, hh),
        Point::new(-hw, hh),
    ]
    .map(|p| world_from_local(p, center, angle_deg))
}

/// Axis-aligned bounds of a set of points.
pub fn points_bounds(points: &[Point]) -> Option<Rect> {
    let (first, rest) = points.split_first()?;
    Some(
        rest.iter()
            .fold(Rect::from_points(*first, *first), |acc, p| acc.union_pt(*p)),
    )
}

/// Union of a sequence of rectangles, or `None` when empty.
pub fn union_bounds<I>(rects: I) -> Option<Rect>
where
    I: IntoIterator<Item = Rect>,
{
    rects.into_iter().reduce(|acc, r| acc.union(r))
}
