//! A single floor: its metadata, rooms and placed items.

use std::collections::HashSet;

use kurbo::{Rect, Vec2};
use serde::{Deserialize, Serialize};

use super::{FloorId, PlacedItem, Room, new_id};
use crate::error::{PlanError, PlanResult};
use crate::geometry::union_bounds;

/// Descriptive metadata for a floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FloorParams {
    pub floor_id: String,
    pub year: i32,
    pub use_type: String,
    pub sub_use_type: String,
    pub is_renter: bool,
    pub construction_type: String,
    /// Pixels (world units) per meter.
    pub ppm: f64,
}

impl Default for FloorParams {
    fn default() -> Self {
        Self {
            floor_id: "Floor-1".to_string(),
            year: 2025,
            use_type: "Residential".to_string(),
            sub_use_type: "Apartment".to_string(),
            is_renter: false,
            construction_type: "Concrete".to_string(),
            ppm: 50.0,
        }
    }
}

impl FloorParams {
    /// Default parameters with `floor_id` derived from a display name.
    pub fn for_name(name: &str) -> Self {
        Self {
            floor_id: floor_id_from_name(name),
            ..Self::default()
        }
    }

    /// Pixels per meter, never below one.
    pub fn effective_ppm(&self) -> f64 {
        self.ppm.max(1.0)
    }
}

/// Turn a display name into a floor id by replacing whitespace runs with `-`.
pub fn floor_id_from_name(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join("-")
}

/// A floor of the plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Floor {
    pub id: FloorId,
    pub name: String,
    #[serde(default)]
    pub params: FloorParams,
    #[serde(default)]
    pub rooms: Vec<Room>,
    #[serde(default)]
    pub items: Vec<PlacedItem>,
}

impl Floor {
    /// Create an empty floor with default parameters.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: new_id(),
            params: FloorParams::for_name(&name),
            name,
            rooms: Vec::new(),
            items: Vec::new(),
        }
    }

    pub fn room(&self, id: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    pub fn room_mut(&mut self, id: &str) -> Option<&mut Room> {
        self.rooms.iter_mut().find(|r| r.id == id)
    }

    /// Append a room on top of the drawing order.
    pub fn add_room(&mut self, room: Room) {
        self.rooms.push(room);
    }

    /// Remove a room by id.
    pub fn remove_room(&mut self, id: &str) -> Option<Room> {
        let index = self.rooms.iter().position(|r| r.id == id)?;
        Some(self.rooms.remove(index))
    }

    pub fn add_item(&mut self, item: PlacedItem) {
        self.items.push(item);
    }

    /// Rooms other than `id`, in drawing order.
    pub fn other_rooms<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Room> + 'a {
        self.rooms.iter().filter(move |r| r.id != id)
    }

    /// Union of the rooms' unrotated rectangles.
    pub fn rooms_bounds(&self) -> Option<Rect> {
        union_bounds(self.rooms.iter().map(Room::rect))
    }

    /// Sum of room areas in square world units.
    pub fn rooms_area(&self) -> f64 {
        self.rooms.iter().map(Room::area).sum()
    }

    /// Copy of this floor with fresh floor and room ids, shifted by `offset`.
    pub fn cloned_with_offset(&self, name: impl Into<String>, offset: Vec2) -> Self {
        let name = name.into();
        let mut copy = self.clone();
        copy.id = new_id();
        copy.params.floor_id = name.clone();
        copy.name = name;
        for room in &mut copy.rooms {
            room.id = new_id();
            room.translate(offset);
        }
        for item in &mut copy.items {
            item.translate(offset);
        }
        copy
    }

    /// Check id uniqueness and finiteness, then clamp sizes and angles.
    pub fn validate_and_normalize(&mut self, min_side: f64) -> PlanResult<()> {
        let mut seen = HashSet::new();
        for room in &mut self.rooms {
            if !seen.insert(room.id.clone()) {
                return Err(PlanError::DuplicateRoomId {
                    floor: self.name.clone(),
                    id: room.id.clone(),
                });
            }
            if !room.is_finite() {
                return Err(PlanError::NonFiniteGeometry(room.id.clone()));
            }
            room.normalize(min_side);
        }
        for item in &self.items {
            if !item.is_finite() {
                return Err(PlanError::NonFiniteGeometry(format!(
                    "{:?} item on floor {}",
                    item.kind, self.name
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    #[test]
    fn test_floor_id_from_name() {
        assert_eq!(floor_id_from_name("Ground  floor\tA"), "Ground-floor-A");
        assert_eq!(floor_id_from_name("Floor 2"), "Floor-2");
    }

    #[test]
    fn test_new_floor_params() {
        let floor = Floor::new("Floor 3");
        assert_eq!(floor.params.floor_id, "Floor-3");
        assert_eq!(floor.params.year, 2025);
        assert!((floor.params.ppm - 50.0).abs() < f64::EPSILON);
        assert!(floor.rooms.is_empty());
    }

    #[test]
    fn test_effective_ppm() {
        let params = FloorParams {
            ppm: 0.0,
            ..Default::default()
        };
        assert!((params.effective_ppm() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_remove_room() {
        let mut floor = Floor::new("F");
        let room = Room::new("A", Rect::new(0.0, 0.0, 10.0, 10.0));
        let id = room.id.clone();
        floor.add_room(room);
        assert!(floor.remove_room(&id).is_some());
        assert!(floor.remove_room(&id).is_none());
    }

    #[test]
    fn test_cloned_with_offset() {
        let mut floor = Floor::new("F");
        floor.add_room(Room::new("A", Rect::new(0.0, 0.0, 10.0, 10.0)));
        let copy = floor.cloned_with_offset("F-copy", Vec2::new(30.0, 30.0));
        assert_ne!(copy.id, floor.id);
        assert_ne!(copy.rooms[0].id, floor.rooms[0].id);
        assert!((copy.rooms[0].x - 30.0).abs() < f64::EPSILON);
        assert_eq!(copy.params.floor_id, "F-copy");
    }

    #[test]
    fn test_validate_duplicate_ids() {
        let mut floor = Floor::new("F");
        let room = Room::new("A", Rect::new(0.0, 0.0, 10.0, 10.0));
        floor.add_room(room.clone());
        floor.add_room(room);
        let err = floor.validate_and_normalize(24.0).unwrap_err();
        assert!(matches!(err, PlanError::DuplicateRoomId { .. }));
    }

    #[test]
    fn test_validate_non_finite() {
        let mut floor = Floor::new("F");
        let mut room = Room::new("A", Rect::new(0.0, 0.0, 10.0, 10.0));
        room.x = f64::NAN;
        floor.add_room(room);
        assert!(matches!(
            floor.validate_and_normalize(24.0),
            Err(PlanError::NonFiniteGeometry(_))
        ));
    }

    #[test]
    fn test_rooms_bounds() {
        let mut floor = Floor::new("F");
        assert!(floor.rooms_bounds().is_none());
        floor.add_room(Room::new("A", Rect::new(0.0, 0.0, 100.0, 50.0)));
        floor.add_room(Room::new("B", Rect::new(200.0, 100.0, 300.0, 200.0)));
        let b = floor.rooms_bounds().unwrap();
        assert_eq!(b.origin(), Point::new(0.0, 0.0));
        assert!((b.width() - 300.0).abs() < 1e-9);
        assert!((b.height() - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_rooms_bounds_ignores_rotation() {
        let mut floor = Floor::new("F");
        let mut hall = Room::new("Hall", Rect::new(0.0, 0.0, 200.0, 20.0));
        hall.angle = 90.0;
        floor.add_room(hall);
        assert_eq!(floor.rooms_bounds(), Some(Rect::new(0.0, 0.0, 200.0, 20.0)));
    }
}
