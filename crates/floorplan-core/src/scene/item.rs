//! Doors, windows and stairs placed on a floor.

use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

use crate::geometry::normalize_degrees;
use crate::snap::EdgeSnap;

/// Kind of placed item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemType {
    Door,
    Window,
    Stairs,
}

impl ItemType {
    /// Footprint in meters (along the wall, across the wall).
    pub fn default_size_m(self) -> (f64, f64) {
        match self {
            ItemType::Door => (0.9, 0.15),
            ItemType::Window => (1.2, 0.15),
            ItemType::Stairs => (1.0, 3.0),
        }
    }

    /// Doors and windows sit on walls; stairs are free-standing.
    pub fn snaps_to_walls(self) -> bool {
        matches!(self, ItemType::Door | ItemType::Window)
    }
}

/// An item placed at a world position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedItem {
    #[serde(rename = "type")]
    pub kind: ItemType,
    /// Center position.
    pub x: f64,
    pub y: f64,
    /// Rotation in degrees.
    #[serde(default)]
    pub rotation: f64,
    pub size_w: f64,
    pub size_h: f64,
    /// Number of steps drawn; only stairs carry one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<u32>,
}

/// Step count for newly placed stairs.
pub const DEFAULT_STAIR_STEPS: u32 = 12;

impl PlacedItem {
    /// Create an item at `at` sized for a floor with `ppm` pixels per meter.
    pub fn new(kind: ItemType, at: Point, ppm: f64) -> Self {
        let (w_m, h_m) = kind.default_size_m();
        Self {
            kind,
            x: at.x,
            y: at.y,
            rotation: 0.0,
            size_w: w_m * ppm,
            size_h: h_m * ppm,
            steps: (kind == ItemType::Stairs).then_some(DEFAULT_STAIR_STEPS),
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.size_w, self.size_h)
    }

    /// Unrotated footprint centered on the position.
    pub fn rect(&self) -> Rect {
        Rect::from_center_size(self.position(), self.size())
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    /// Move onto a wall and align with it.
    pub fn apply_edge_snap(&mut self, snap: &EdgeSnap) {
        self.x = snap.point.x;
        self.y = snap.point.y;
        self.rotation = normalize_degrees(snap.angle_deg);
    }

    pub fn is_finite(&self) -> bool {
        [self.x, self.y, self.rotation, self.size_w, self.size_h]
            .iter()
            .all(|v| v.is_finite())
    }
}
