//! Gesture scripts: recorded host input replayed against a session.

use floorplan_core::{EditorSession, EngineConfig, FloorParamsUpdate, InputEvent, Mode, Room};
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};

/// A sequence of editor operations with the canvas size they assume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Script {
    #[serde(default = "default_viewport")]
    pub viewport: Size,
    /// Overrides for the engine defaults.
    #[serde(default)]
    pub config: Option<EngineConfig>,
    pub steps: Vec<Step>,
}

fn default_viewport() -> Size {
    Size::new(1280.0, 800.0)
}

/// One scripted operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    /// Feed a raw input event.
    Input { event: InputEvent },
    SetMode { mode: Mode },
    SetSnapGrid { enabled: bool },
    SetAngleSnap { enabled: bool },
    ZoomIn,
    ZoomOut,
    ResetView,
    ZoomToFit,
    MinimapJump { position: Point },
    AddFloor {
        #[serde(default)]
        name: Option<String>,
    },
    SetFloor { index: usize },
    RemoveFloor,
    SaveFloorParams { params: FloorParamsUpdate },
    DuplicateFloor,
    CopyFloor,
    PasteFloor,
    AddRoom {
        name: String,
        size: Size,
        center: Point,
        #[serde(default)]
        utility: bool,
    },
    SelectRoom {
        #[serde(default)]
        id: Option<String>,
    },
    DuplicateRoom,
    DeleteRoom,
    /// Inspector edit of the selected room.
    UpdateRoom { patch: RoomPatch },
    ClearRooms,
    /// Commit outside of a gesture, e.g. after inspector edits.
    Commit,
}

/// Fields to overwrite on the selected room.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RoomPatch {
    pub name: Option<String>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub w: Option<f64>,
    pub h: Option<f64>,
    pub angle: Option<f64>,
    pub is_utility: Option<bool>,
}

impl RoomPatch {
    fn apply(&self, room: &mut Room) {
        if let Some(name) = &self.name {
            room.name.clone_from(name);
        }
        let fields = [
            (self.x, &mut room.x),
            (self.y, &mut room.y),
            (self.w, &mut room.w),
            (self.h, &mut room.h),
            (self.angle, &mut room.angle),
        ];
        for (value, field) in fields {
            if let Some(v) = value.filter(|v| v.is_finite()) {
                *field = v;
            }
        }
        if let Some(v) = self.is_utility {
            room.is_utility = v;
        }
    }
}

impl Script {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Run every step in order.
    pub fn replay(&self, session: &mut EditorSession) {
        session.set_viewport_size(self.viewport);
        for (index, step) in self.steps.iter().enumerate() {
            log::trace!("Step {}: {:?}", index, step);
            step.apply(session);
        }
    }
}

impl Step {
    pub fn apply(&self, session: &mut EditorSession) {
        match self {
            Step::Input { event } => session.handle_event(event.clone()),
            Step::SetMode { mode } => session.mode = *mode,
            Step::SetSnapGrid { enabled } => session.snap_grid = *enabled,
            Step::SetAngleSnap { enabled } => session.angle_snap = *enabled,
            Step::ZoomIn => session.zoom_in(),
            Step::ZoomOut => session.zoom_out(),
            Step::ResetView => session.reset_view(),
            Step::ZoomToFit => {
                if !session.zoom_to_fit() {
                    log::debug!("Nothing to fit");
                }
            }
            Step::MinimapJump { position } => {
                session.minimap_jump(*position);
            }
            Step::AddFloor { name } => session.add_floor(name.as_deref()),
            Step::SetFloor { index } => {
                if !session.set_current_floor(*index) {
                    log::warn!("No floor at index {}", index);
                }
            }
            Step::RemoveFloor => session.remove_current_floor(),
            Step::SaveFloorParams { params } => session.save_floor_params(params.clone()),
            Step::DuplicateFloor => session.duplicate_current_floor(),
            Step::CopyFloor => session.copy_floor(),
            Step::PasteFloor => session.paste_floor(),
            Step::AddRoom {
                name,
                size,
                center,
                utility,
            } => {
                if session
                    .add_room_from_template(name, *size, *utility, *center)
                    .is_none()
                {
                    log::warn!("No current floor for room {}", name);
                }
            }
            Step::SelectRoom { id } => session.select_room(id.as_deref()),
            Step::DuplicateRoom => {
                session.duplicate_selected_room();
            }
            Step::DeleteRoom => {
                session.delete_selected_room();
            }
            Step::UpdateRoom { patch } => {
                if !session.update_selected_room(|room| patch.apply(room)) {
                    log::warn!("No selected room to update");
                }
            }
            Step::ClearRooms => session.clear_rooms(),
            Step::Commit => session.commit(),
        }
    }
}
