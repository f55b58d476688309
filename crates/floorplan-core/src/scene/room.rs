//! Room shape.

use kurbo::{Point, Rect, Size, Vec2};
use peniko::Color;
use serde::{Deserialize, Serialize};

use super::{RoomId, argb, new_id};
use crate::geometry::{self, normalize_degrees};

/// Default fill for ordinary rooms (opaque green).
pub const ROOM_COLOR: u32 = 0xFF22_C55E;
/// Default fill for utility rooms (opaque red).
pub const UTILITY_ROOM_COLOR: u32 = 0xFFE5_3935;

/// A rectangular room, possibly rotated about its center.
///
/// `x`/`y` is the top-left corner of the unrotated rectangle; `angle` is the
/// clockwise rotation in degrees about the rectangle's center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    #[serde(default)]
    pub angle: f64,
    #[serde(default)]
    pub is_utility: bool,
    /// ARGB fill color.
    #[serde(with = "argb", default = "default_color")]
    pub color: u32,
}

fn default_color() -> u32 {
    ROOM_COLOR
}

impl Room {
    /// Create an unrotated room covering `rect`.
    pub fn new(name: impl Into<String>, rect: Rect) -> Self {
        let rect = rect.abs();
        Self {
            id: new_id(),
            name: name.into(),
            x: rect.x0,
            y: rect.y0,
            w: rect.width(),
            h: rect.height(),
            angle: 0.0,
            is_utility: false,
            color: ROOM_COLOR,
        }
    }

    /// Create a room of the given size centered on `center`.
    pub fn centered(name: impl Into<String>, center: Point, size: Size, is_utility: bool) -> Self {
        let mut room = Self::new(name, Rect::from_center_size(center, size));
        room.set_utility(is_utility);
        room
    }

    /// Mark the room as utility (or not) and pick the matching default color.
    pub fn set_utility(&mut self, is_utility: bool) {
        self.is_utility = is_utility;
        self.color = if is_utility { UTILITY_ROOM_COLOR } else { ROOM_COLOR };
    }

    /// The unrotated rectangle.
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.w, self.y + self.h)
    }

    /// Replace position and size from an unrotated rectangle.
    pub fn set_rect(&mut self, rect: Rect) {
        self.x = rect.x0;
        self.y = rect.y0;
        self.w = rect.width();
        self.h = rect.height();
    }

    pub fn size(&self) -> Size {
        Size::new(self.w, self.h)
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Move the room so its center sits on `center`, keeping its size.
    pub fn set_center(&mut self, center: Point) {
        self.x = center.x - self.w / 2.0;
        self.y = center.y - self.h / 2.0;
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    /// Convert a world point into this room's local frame.
    pub fn to_local(&self, world: Point) -> Point {
        geometry::local_from_world(world, self.center(), self.angle)
    }

    /// Convert a local point into world coordinates.
    pub fn to_world(&self, local: Point) -> Point {
        geometry::world_from_local(local, self.center(), self.angle)
    }

    /// Whether the world point lies inside the rotated rectangle.
    pub fn contains(&self, world: Point) -> bool {
        geometry::inside_local_rect(self.to_local(world), self.w, self.h)
    }

    /// World-space corners, clockwise from the local top-left.
    pub fn corners(&self) -> [Point; 4] {
        geometry::rotated_corners(self.center(), self.w, self.h, self.angle)
    }

    /// Axis-aligned bounds of the rotated rectangle.
    pub fn bounds(&self) -> Rect {
        geometry::points_bounds(&self.corners()).unwrap_or_else(|| self.rect())
    }

    /// Area in square world units.
    pub fn area(&self) -> f64 {
        self.w * self.h
    }

    /// Fill color for rendering. Colors with no alpha are shown opaque.
    pub fn fill(&self) -> Color {
        let [a, r, g, b] = self.color.to_be_bytes();
        let a = if a == 0 { 0xFF } else { a };
        Color::from_rgba8(r, g, b, a)
    }

    /// Set the fill color from a renderer color.
    pub fn set_fill(&mut self, color: Color) {
        let rgba = color.to_rgba8();
        self.color = u32::from_be_bytes([rgba.a, rgba.r, rgba.g, rgba.b]);
    }

    /// Clamp size to `min_side` and bring the angle into `[0, 360)`.
    pub fn normalize(&mut self, min_side: f64) {
        self.w = self.w.max(min_side);
        self.h = self.h.max(min_side);
        self.angle = normalize_degrees(self.angle);
    }

    pub fn is_finite(&self) -> bool {
        [self.x, self.y, self.w, self.h, self.angle]
            .iter()
            .all(|v| v.is_finite())
    }
}
