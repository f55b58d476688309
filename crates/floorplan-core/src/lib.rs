//! Floor-plan Core Library
//!
//! Platform-agnostic interaction engine for editing floor plans: geometry,
//! snapping, hit-testing, viewport control and the gesture state machine.

pub mod config;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod hit;
pub mod input;
pub mod measure;
pub mod minimap;
pub mod scene;
pub mod session;
pub mod snap;
pub mod viewport;

pub use config::EngineConfig;
pub use error::{PlanError, PlanResult};
pub use gesture::{DraftRect, DragState};
pub use hit::{Corner, Edge, Handle, HandleKind, HitRadii};
pub use input::{InputEvent, Mode, PointerTracker};
pub use measure::ScaleBar;
pub use minimap::MiniMap;
pub use scene::{Floor, FloorParams, ItemType, PlacedItem, Plan, Room, RoomId};
pub use session::{CommitObserver, EditorSession, FloorParamsUpdate};
pub use snap::{AxisTargets, EdgeSnap, SnapResult, snap_point, snap_to_grid, GRID_SIZE};
pub use viewport::Viewport;
