//! Plan document model: floors, rooms and placed items.

mod floor;
mod item;
mod room;

pub use floor::{Floor, FloorParams, floor_id_from_name};
pub use item::{DEFAULT_STAIR_STEPS, ItemType, PlacedItem};
pub use room::{ROOM_COLOR, Room, UTILITY_ROOM_COLOR};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::PlanResult;

/// Identifier of a room, unique within its floor.
pub type RoomId = String;
/// Identifier of a floor.
pub type FloorId = String;

/// Generate a fresh identifier.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// The whole plan: an ordered list of floors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub floors: Vec<Floor>,
}

impl Plan {
    /// Create an empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse a plan, rejecting duplicate room ids and non-finite geometry.
    ///
    /// Room sizes are clamped to `min_side` and angles brought into `[0, 360)`.
    pub fn from_json(json: &str, min_side: f64) -> PlanResult<Self> {
        let mut plan: Plan = serde_json::from_str(json)?;
        for floor in &mut plan.floors {
            floor.validate_and_normalize(min_side)?;
        }
        Ok(plan)
    }

    pub fn is_empty(&self) -> bool {
        self.floors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.floors.len()
    }
}

/// Serde adapter storing ARGB colors as signed 32-bit integers.
///
/// Accepts either the signed form or the unsigned `0xAARRGGBB` value on input.
pub(crate) mod argb {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(color: &u32, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(*color as i32)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
        let raw = i64::deserialize(deserializer)?;
        if (i64::from(i32::MIN)..0).contains(&raw) {
            Ok(raw as i32 as u32)
        } else {
            u32::try_from(raw).map_err(|_| D::Error::custom(format!("color out of range: {raw}")))
        }
    }
}
