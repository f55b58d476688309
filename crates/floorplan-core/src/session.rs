//! Editor session: the plan plus all interaction state, driven by gestures.

use std::fmt;

use kurbo::{Point, Size, Vec2};
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::error::PlanResult;
use crate::gesture::{self, DraftRect, DragState, SnapContext};
use crate::hit::{self, HitRadii};
use crate::input::{InputEvent, Mode, PointerTracker};
use crate::measure::{self, ScaleBar};
use crate::minimap::MiniMap;
use crate::scene::{Floor, FloorParams, PlacedItem, Plan, Room, RoomId};
use crate::snap::{AxisTargets, snap_to_nearest_room_edge};
use crate::viewport::Viewport;

/// Offset applied to rooms of a duplicated floor.
const DUPLICATE_FLOOR_OFFSET: f64 = 30.0;
/// Offset applied to rooms of a pasted floor.
const PASTE_FLOOR_OFFSET: f64 = 40.0;
/// Offset applied to a duplicated room.
const DUPLICATE_ROOM_OFFSET: f64 = 20.0;

/// Callback receiving the pretty JSON of the plan after each commit.
pub type CommitObserver = Box<dyn FnMut(&str)>;

/// Partial update of a floor's parameters; `None` fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FloorParamsUpdate {
    pub floor_id: Option<String>,
    pub year: Option<i32>,
    pub use_type: Option<String>,
    pub sub_use_type: Option<String>,
    pub is_renter: Option<bool>,
    pub construction_type: Option<String>,
    pub ppm: Option<f64>,
}

impl FloorParamsUpdate {
    fn apply(self, params: &mut FloorParams) {
        if let Some(v) = self.floor_id {
            params.floor_id = v;
        }
        if let Some(v) = self.year {
            params.year = v;
        }
        if let Some(v) = self.use_type {
            params.use_type = v;
        }
        if let Some(v) = self.sub_use_type {
            params.sub_use_type = v;
        }
        if let Some(v) = self.is_renter {
            params.is_renter = v;
        }
        if let Some(v) = self.construction_type {
            params.construction_type = v;
        }
        if let Some(v) = self.ppm {
            params.ppm = v;
        }
    }
}

/// Owns the plan and every piece of editor state the gestures touch.
///
/// Renderers, inspectors and the minimap read through the accessors; all
/// mutation goes through the methods below.
pub struct EditorSession {
    config: EngineConfig,
    plan: Plan,
    current_floor: Option<usize>,
    selection: Option<RoomId>,
    pub mode: Mode,
    pub show_grid: bool,
    pub snap_grid: bool,
    pub angle_snap: bool,
    viewport: Viewport,
    viewport_size: Size,
    drag: DragState,
    pointer: PointerTracker,
    clipboard: Option<Floor>,
    revision: u64,
    on_commit: Option<CommitObserver>,
}

impl fmt::Debug for EditorSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorSession")
            .field("floors", &self.plan.floors.len())
            .field("current_floor", &self.current_floor)
            .field("selection", &self.selection)
            .field("mode", &self.mode)
            .field("viewport", &self.viewport)
            .field("drag", &self.drag)
            .field("revision", &self.revision)
            .finish_non_exhaustive()
    }
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl EditorSession {
    /// Start a session with a single empty floor in draw mode.
    pub fn new(config: EngineConfig) -> Self {
        let mut session = Self::with_plan(Plan::new(), config);
        session.add_floor(None);
        session
    }

    /// Start a session on an existing plan, with its first floor current.
    pub fn with_plan(plan: Plan, config: EngineConfig) -> Self {
        let current_floor = if plan.floors.is_empty() { None } else { Some(0) };
        Self {
            viewport: Viewport::from_config(&config),
            config,
            plan,
            current_floor,
            selection: None,
            mode: Mode::Draw,
            show_grid: true,
            snap_grid: false,
            angle_snap: true,
            viewport_size: Size::ZERO,
            drag: DragState::None,
            pointer: PointerTracker::new(),
            clipboard: None,
            revision: 0,
            on_commit: None,
        }
    }

    // --- Accessors -------------------------------------------------------

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn plan(&self) -> &Plan {
        &self.plan
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_size(&self) -> Size {
        self.viewport_size
    }

    /// Tell the session how large the canvas is on screen.
    pub fn set_viewport_size(&mut self, size: Size) {
        self.viewport_size = size;
    }

    pub fn drag_state(&self) -> &DragState {
        &self.drag
    }

    /// Increases by one on every commit.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn current_floor_index(&self) -> Option<usize> {
        self.current_floor
    }

    pub fn current_floor(&self) -> Option<&Floor> {
        self.current_floor.and_then(|i| self.plan.floors.get(i))
    }

    fn current_floor_mut(&mut self) -> Option<&mut Floor> {
        self.current_floor.and_then(|i| self.plan.floors.get_mut(i))
    }

    pub fn selected_room_id(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    /// The selected room, if the selection still names a room on the current floor.
    pub fn selected_room(&self) -> Option<&Room> {
        let id = self.selection.as_deref()?;
        self.current_floor()?.room(id)
    }

    fn grid(&self) -> Option<f64> {
        self.snap_grid.then_some(self.config.grid_size)
    }

    fn angle_increment(&self) -> Option<f64> {
        self.angle_snap.then_some(self.config.angle_snap_increment)
    }

    /// Handle radii in world units at the current scale.
    pub fn hit_radii(&self) -> HitRadii {
        HitRadii::for_scale(&self.config, self.viewport.scale())
    }

    /// Minimap for the current floor, when it has rooms.
    pub fn minimap(&self) -> Option<MiniMap> {
        MiniMap::for_floor(self.current_floor()?, &self.config)
    }

    /// Scale bar for the current floor at the current zoom.
    pub fn scale_bar(&self) -> Option<ScaleBar> {
        let floor = self.current_floor()?;
        Some(ScaleBar::for_view(&floor.params, self.viewport.scale()))
    }

    // --- Commit and persistence -----------------------------------------

    /// Register the callback run after every committed edit.
    pub fn set_commit_observer(&mut self, observer: Option<CommitObserver>) {
        self.on_commit = observer;
    }

    /// Mark the current plan as committed and notify the observer.
    pub fn commit(&mut self) {
        self.revision += 1;
        log::debug!("Commit revision {}", self.revision);
        let Some(observer) = self.on_commit.as_mut() else {
            return;
        };
        match self.plan.to_json() {
            Ok(json) => observer(&json),
            Err(e) => log::warn!("Failed to serialize plan for commit observer: {}", e),
        }
    }

    /// Pretty JSON of the whole plan.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        self.plan.to_json()
    }

    /// Replace the plan with one parsed from JSON.
    ///
    /// On error the session is left untouched.
    pub fn load_json(&mut self, json: &str) -> PlanResult<()> {
        let plan = Plan::from_json(json, self.config.min_side)?;
        log::info!("Loaded plan with {} floor(s)", plan.floors.len());
        self.current_floor = if plan.floors.is_empty() { None } else { Some(0) };
        self.plan = plan;
        self.selection = None;
        self.drag = DragState::None;
        self.pointer.end();
        Ok(())
    }

    // --- Floors ----------------------------------------------------------

    /// Append a floor and make it current. Defaults to `Floor N`.
    pub fn add_floor(&mut self, name: Option<&str>) {
        let name = name
            .map(str::to_string)
            .unwrap_or_else(|| format!("Floor {}", self.plan.floors.len() + 1));
        log::info!("Adding floor: {}", name);
        self.push_floor(Floor::new(name));
    }

    fn push_floor(&mut self, floor: Floor) {
        self.plan.floors.push(floor);
        self.current_floor = Some(self.plan.floors.len() - 1);
        self.selection = None;
    }

    /// Remove the current floor; the next one (or the new last) becomes current.
    pub fn remove_current_floor(&mut self) {
        let Some(index) = self.current_floor else {
            return;
        };
        if index < self.plan.floors.len() {
            let removed = self.plan.floors.remove(index);
            log::info!("Removed floor: {}", removed.name);
        }
        self.current_floor = match self.plan.floors.len() {
            0 => None,
            len => Some(index.min(len - 1)),
        };
        self.selection = None;
    }

    /// Switch floors. Returns `false` when the index is out of range.
    pub fn set_current_floor(&mut self, index: usize) -> bool {
        if index >= self.plan.floors.len() {
            return false;
        }
        self.current_floor = Some(index);
        self.selection = None;
        true
    }

    /// Append a copy of the current floor with fresh ids, shifted slightly.
    pub fn duplicate_current_floor(&mut self) {
        let Some(floor) = self.current_floor() else {
            return;
        };
        let copy = floor.cloned_with_offset(
            format!("{}-copy", floor.name),
            Vec2::new(DUPLICATE_FLOOR_OFFSET, DUPLICATE_FLOOR_OFFSET),
        );
        self.push_floor(copy);
    }

    /// Copy the current floor to the in-session clipboard.
    pub fn copy_floor(&mut self) {
        self.clipboard = self.current_floor().cloned();
    }

    /// Append the clipboard floor with fresh ids, shifted slightly.
    pub fn paste_floor(&mut self) {
        let Some(clip) = self.clipboard.as_ref() else {
            return;
        };
        let copy = clip.cloned_with_offset(
            format!("{}-pasted", clip.name),
            Vec2::new(PASTE_FLOOR_OFFSET, PASTE_FLOOR_OFFSET),
        );
        self.push_floor(copy);
    }

    /// Update the current floor's parameters; its name follows `floor_id`.
    pub fn save_floor_params(&mut self, update: FloorParamsUpdate) {
        let Some(floor) = self.current_floor_mut() else {
            return;
        };
        update.apply(&mut floor.params);
        floor.name = floor.params.floor_id.clone();
    }

    // --- Rooms -----------------------------------------------------------

    /// Add a room centered on `center` and select it.
    pub fn add_room_from_template(
        &mut self,
        name: &str,
        size: Size,
        is_utility: bool,
        center: Point,
    ) -> Option<RoomId> {
        let min_side = self.config.min_side;
        let floor = self.current_floor_mut()?;
        let mut room = Room::centered(name, center, size, is_utility);
        room.normalize(min_side);
        let id = room.id.clone();
        floor.add_room(room);
        self.selection = Some(id.clone());
        Some(id)
    }

    /// Remove every room on the current floor.
    pub fn clear_rooms(&mut self) {
        if let Some(floor) = self.current_floor_mut() {
            floor.rooms.clear();
        }
        self.selection = None;
    }

    /// Copy the selected room next to itself and select the copy.
    pub fn duplicate_selected_room(&mut self) -> Option<RoomId> {
        let mut copy = self.selected_room()?.clone();
        copy.id = crate::scene::new_id();
        copy.translate(Vec2::new(DUPLICATE_ROOM_OFFSET, DUPLICATE_ROOM_OFFSET));
        let id = copy.id.clone();
        self.current_floor_mut()?.add_room(copy);
        self.selection = Some(id.clone());
        Some(id)
    }

    pub fn delete_selected_room(&mut self) -> bool {
        let Some(id) = self.selection.clone() else {
            return false;
        };
        let removed = self
            .current_floor_mut()
            .and_then(|floor| floor.remove_room(&id))
            .is_some();
        if removed {
            self.selection = None;
        }
        removed
    }

    /// Edit the selected room in place; size and angle are re-normalized
    /// afterwards. Returns whether a room was updated.
    pub fn update_selected_room<F>(&mut self, update: F) -> bool
    where
        F: FnOnce(&mut Room),
    {
        let min_side = self.config.min_side;
        let Some(id) = self.selection.clone() else {
            return false;
        };
        let Some(room) = self.current_floor_mut().and_then(|f| f.room_mut(&id)) else {
            return false;
        };
        update(room);
        room.normalize(min_side);
        true
    }

    /// Select a room by id, or clear the selection with `None`.
    pub fn select_room(&mut self, id: Option<&str>) {
        self.selection = id.map(str::to_string);
    }

    /// Total room area of a floor in square meters.
    pub fn total_area_m2(&self, floor: &Floor) -> f64 {
        measure::total_area_m2(floor)
    }

    // --- View ------------------------------------------------------------

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in(self.viewport_size, self.config.zoom_step);
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out(self.viewport_size, self.config.zoom_step);
    }

    pub fn reset_view(&mut self) {
        self.viewport.reset();
    }

    /// Fit the current floor's rooms in view. Returns `false` when there
    /// are no rooms to fit.
    pub fn zoom_to_fit(&mut self) -> bool {
        let bounds = self.current_floor().and_then(Floor::rooms_bounds);
        self.viewport
            .zoom_to_fit(bounds, self.viewport_size, self.config.fit_padding_px)
    }

    /// Center the main view on the world point under a minimap tap.
    pub fn minimap_jump(&mut self, tap: Point) -> bool {
        let Some(map) = self.minimap() else {
            return false;
        };
        self.viewport.pan = map.jump_pan(tap, &self.viewport, self.viewport_size);
        true
    }

    // --- Gestures --------------------------------------------------------

    /// Dispatch a host input event.
    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerStart { position } => self.pointer_start(position),
            InputEvent::PointerMove { position, delta } => self.pointer_move(position, delta),
            InputEvent::PointerEnd => self.pointer_end(),
            InputEvent::Transform {
                centroid,
                pan,
                zoom,
            } => self.transform(centroid, pan, zoom),
            InputEvent::Tap { position } => self.tap(position),
            InputEvent::DoubleTap { position } => self.double_tap(position),
        }
    }

    /// A single pointer went down at a screen position.
    pub fn pointer_start(&mut self, screen: Point) {
        self.pointer.start(screen);
        let world = self.viewport.screen_to_world(screen);
        self.drag = match self.mode {
            Mode::Draw => {
                if self.current_floor().is_some() {
                    DragState::Draft(DraftRect::start(world, self.grid()))
                } else {
                    DragState::None
                }
            }
            Mode::Move => self.classify_press(world),
            Mode::PlaceDoor | Mode::PlaceWindow | Mode::PlaceStairs => DragState::Pan {
                start_pan: self.viewport.pan,
            },
        };
        log::debug!("Gesture started: {}", self.drag.name());
    }

    /// Decide what a press in move mode manipulates. Handles of the
    /// selected room win over bodies; a body press selects that room;
    /// empty canvas clears the selection and pans.
    fn classify_press(&mut self, world: Point) -> DragState {
        let pan = DragState::Pan {
            start_pan: self.viewport.pan,
        };
        let radii = self.hit_radii();
        if let Some(room) = self.selected_room() {
            if let Some(handle) = hit::hit_test_handle(room, world, &radii) {
                return DragState::for_handle(room, handle, world);
            }
        }
        let Some(floor) = self.current_floor() else {
            self.selection = None;
            return pan;
        };
        let Some(room) = hit::room_at(&floor.rooms, world) else {
            self.selection = None;
            return pan;
        };
        let drag = match hit::hit_test_handle(room, world, &radii) {
            Some(handle) => DragState::for_handle(room, handle, world),
            None => DragState::for_move(room, world),
        };
        self.selection = Some(room.id.clone());
        drag
    }

    /// The pointer moved. Movement inside the touch slop is ignored.
    pub fn pointer_move(&mut self, screen: Point, _delta: Vec2) {
        if !self.pointer.is_dragging() {
            return;
        }
        if !self.pointer.update(screen, self.config.touch_slop_px) {
            return;
        }
        let world = self.viewport.screen_to_world(screen);

        match self.drag.clone() {
            DragState::None => return,
            DragState::Pan { start_pan } => {
                if let Some(delta) = self.pointer.drag_delta() {
                    self.viewport.pan = start_pan + delta;
                }
                return;
            }
            DragState::Draft(mut draft) => {
                draft.update(world, self.grid());
                self.drag = DragState::Draft(draft);
            }
            DragState::Move {
                id,
                start,
                start_rect,
            } => {
                let ctx = self.snap_context(&id);
                let rect = gesture::move_rect(start_rect, world - start, &ctx);
                self.with_room(&id, |room| room.set_rect(rect));
            }
            DragState::Rotate {
                id,
                start,
                start_deg,
            } => {
                let increment = self.angle_increment();
                self.with_room(&id, |room| {
                    room.angle =
                        gesture::rotate_angle(room.center(), start, world, start_deg, increment);
                });
            }
            DragState::Resize {
                id,
                corner,
                center,
                start_size,
            } => {
                let ctx = self.snap_context(&id);
                self.with_room(&id, |room| {
                    let rect = gesture::resize_from_corner(
                        corner, center, start_size, room.angle, world, &ctx,
                    );
                    room.set_rect(rect);
                });
            }
            DragState::EdgeResize {
                id,
                edge,
                center,
                start_size,
            } => {
                let ctx = self.snap_context(&id);
                self.with_room(&id, |room| {
                    let rect =
                        gesture::resize_from_edge(edge, center, start_size, room.angle, world, &ctx);
                    room.set_rect(rect);
                });
            }
        }

        self.viewport.auto_scroll(
            screen,
            self.viewport_size,
            self.config.auto_scroll_margin_px,
            self.config.auto_scroll_speed_px,
        );
    }

    /// The pointer was lifted or cancelled: finish the gesture and commit.
    pub fn pointer_end(&mut self) {
        if !self.pointer.end() {
            return;
        }
        let drag = std::mem::take(&mut self.drag);
        log::debug!("Gesture ended: {}", drag.name());

        if let DragState::Draft(draft) = drag {
            if draft.is_large_enough(self.config.min_side) {
                let mut room = Room::new("Room", draft.rect());
                room.normalize(self.config.min_side);
                log::debug!("Created room {} from draft", room.id);
                let id = room.id.clone();
                if let Some(floor) = self.current_floor_mut() {
                    floor.add_room(room);
                    self.selection = Some(id);
                }
            }
        }

        self.viewport.clamp_pan(self.viewport_size);
        self.commit();
    }

    /// One step of a pinch/pan gesture.
    pub fn transform(&mut self, centroid: Point, pan: Vec2, zoom: f64) {
        self.viewport.apply_transform_gesture(centroid, pan, zoom);
    }

    /// A discrete tap: places an item in placement modes, selects in move mode.
    pub fn tap(&mut self, screen: Point) {
        let world = self.viewport.screen_to_world(screen);
        if let Some(kind) = self.mode.placement() {
            let Some(floor) = self.current_floor_mut() else {
                return;
            };
            let mut item = PlacedItem::new(kind, world, floor.params.effective_ppm());
            if kind.snaps_to_walls() {
                if let Some(snap) = snap_to_nearest_room_edge(&floor.rooms, world) {
                    item.apply_edge_snap(&snap);
                }
            }
            log::debug!("Placed {:?} at ({:.1}, {:.1})", kind, item.x, item.y);
            floor.add_item(item);
            self.commit();
        } else if self.mode == Mode::Move {
            let id = self
                .current_floor()
                .and_then(|floor| hit::room_at(&floor.rooms, world))
                .map(|room| room.id.clone());
            self.selection = id;
        }
    }

    /// Zoom in a step around the tapped point.
    pub fn double_tap(&mut self, screen: Point) {
        self.viewport.zoom_by(screen, self.config.double_tap_zoom);
    }

    fn snap_context(&self, exclude: &str) -> SnapContext {
        let targets = self
            .current_floor()
            .map(|floor| AxisTargets::from_rooms(floor.other_rooms(exclude)))
            .unwrap_or_default();
        SnapContext {
            targets,
            radius: self.config.snap_radius_px / self.viewport.scale(),
            grid: self.grid(),
            min_side: self.config.min_side,
        }
    }

    fn with_room<F>(&mut self, id: &str, update: F)
    where
        F: FnOnce(&mut Room),
    {
        if let Some(room) = self.current_floor_mut().and_then(|f| f.room_mut(id)) {
            update(room);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hit::Corner;
    use crate::scene::{ItemType, UTILITY_ROOM_COLOR};
    use kurbo::Rect;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn session() -> EditorSession {
        let mut s = EditorSession::default();
        s.set_viewport_size(Size::new(800.0, 600.0));
        s
    }

    fn add_room(s: &mut EditorSession, rect: Rect) -> RoomId {
        let room = Room::new("Room", rect);
        let id = room.id.clone();
        s.current_floor_mut().unwrap().add_room(room);
        id
    }

    fn drag(s: &mut EditorSession, from: Point, to: Point) {
        s.pointer_start(from);
        s.pointer_move(to, to - from);
        s.pointer_end();
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_new_session() {
        let s = EditorSession::default();
        assert_eq!(s.plan().floors.len(), 1);
        assert_eq!(s.current_floor().unwrap().name, "Floor 1");
        assert_eq!(s.mode, Mode::Draw);
        assert!(s.show_grid && !s.snap_grid && s.angle_snap);
    }

    #[test]
    fn test_draw_room() {
        let mut s = session();
        drag(&mut s, Point::new(0.0, 0.0), Point::new(100.0, 80.0));
        let floor = s.current_floor().unwrap();
        assert_eq!(floor.rooms.len(), 1);
        let room = &floor.rooms[0];
        assert_eq!(room.rect(), Rect::new(0.0, 0.0, 100.0, 80.0));
        assert!(approx(room.angle, 0.0));
        assert!(!room.is_utility);
        assert_eq!(s.selected_room_id(), Some(room.id.as_str()));
        assert_eq!(s.revision(), 1);
    }

    #[test]
    fn test_draw_too_small_discarded() {
        let mut s = session();
        drag(&mut s, Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        assert!(s.current_floor().unwrap().rooms.is_empty());
        // The gesture still ends with a commit.
        assert_eq!(s.revision(), 1);
    }

    #[test]
    fn test_draw_upwards() {
        let mut s = session();
        drag(&mut s, Point::new(200.0, 200.0), Point::new(100.0, 150.0));
        let room = &s.current_floor().unwrap().rooms[0];
        assert_eq!(room.rect(), Rect::new(100.0, 150.0, 200.0, 200.0));
    }

    #[test]
    fn test_move_within_slop_is_ignored() {
        let mut s = session();
        s.mode = Mode::Move;
        let id = add_room(&mut s, Rect::new(100.0, 100.0, 200.0, 200.0));
        drag(&mut s, Point::new(150.0, 150.0), Point::new(154.0, 150.0));
        let room = s.current_floor().unwrap().room(&id).unwrap();
        assert!(approx(room.x, 100.0));
        assert_eq!(s.selected_room_id(), Some(id.as_str()));
    }

    #[test]
    fn test_move_room() {
        let mut s = session();
        s.mode = Mode::Move;
        let id = add_room(&mut s, Rect::new(100.0, 100.0, 200.0, 200.0));
        drag(&mut s, Point::new(150.0, 150.0), Point::new(180.0, 170.0));
        let room = s.current_floor().unwrap().room(&id).unwrap();
        assert!(approx(room.x, 130.0));
        assert!(approx(room.y, 120.0));
    }

    #[test]
    fn test_move_snaps_to_neighbour() {
        let mut s = session();
        s.mode = Mode::Move;
        add_room(&mut s, Rect::new(0.0, 0.0, 200.0, 200.0));
        let id = add_room(&mut s, Rect::new(300.0, 0.0, 400.0, 100.0));
        // Left edge lands at 210, within 16 of the neighbour's right edge.
        drag(&mut s, Point::new(350.0, 50.0), Point::new(260.0, 50.0));
        let room = s.current_floor().unwrap().room(&id).unwrap();
        assert!(approx(room.x, 200.0));
    }

    #[test]
    fn test_move_with_grid() {
        let mut s = session();
        s.mode = Mode::Move;
        s.snap_grid = true;
        let id = add_room(&mut s, Rect::new(100.0, 100.0, 200.0, 200.0));
        drag(&mut s, Point::new(150.0, 150.0), Point::new(183.0, 157.0));
        let room = s.current_floor().unwrap().room(&id).unwrap();
        assert!(approx(room.x, 140.0));
        assert!(approx(room.y, 100.0));
    }

    #[test]
    fn test_corner_resize_gesture() {
        let mut s = session();
        s.mode = Mode::Move;
        let id = add_room(&mut s, Rect::new(0.0, 0.0, 100.0, 100.0));
        s.select_room(Some(&id));
        s.pointer_start(Point::new(0.0, 0.0));
        assert!(matches!(
            s.drag_state(),
            DragState::Resize {
                corner: Corner::TopLeft,
                ..
            }
        ));
        s.pointer_move(Point::new(40.0, 40.0), Vec2::new(40.0, 40.0));
        s.pointer_end();
        let room = s.current_floor().unwrap().room(&id).unwrap();
        assert!(approx(room.w, 60.0) && approx(room.h, 60.0));
        assert!(approx(room.x, 40.0) && approx(room.y, 40.0));
    }

    #[test]
    fn test_rotate_gesture() {
        let mut s = session();
        s.mode = Mode::Move;
        let id = add_room(&mut s, Rect::new(100.0, 100.0, 200.0, 200.0));
        s.select_room(Some(&id));
        // Rotate handle sits 28px above the top-center.
        s.pointer_start(Point::new(150.0, 72.0));
        assert!(matches!(s.drag_state(), DragState::Rotate { .. }));
        s.pointer_move(Point::new(228.0, 150.0), Vec2::ZERO);
        s.pointer_end();
        let room = s.current_floor().unwrap().room(&id).unwrap();
        assert!((room.angle - 90.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_target_snap_radius_shrinks_with_zoom() {
        let mut s = session();
        s.mode = Mode::Move;
        s.transform(Point::ZERO, Vec2::ZERO, 2.0);
        assert!(approx(s.viewport().scale(), 2.0));
        add_room(&mut s, Rect::new(0.0, 0.0, 100.0, 100.0));
        let id = add_room(&mut s, Rect::new(110.0, 0.0, 160.0, 50.0));

        // A 10-unit gap is outside the 8-unit world radius at 2x.
        drag(&mut s, Point::new(270.0, 50.0), Point::new(270.0, 70.0));
        let room = s.current_floor().unwrap().room(&id).unwrap();
        assert!(approx(room.x, 110.0));
        assert!(approx(room.y, 10.0));

        // Closing it to 6 units pulls the room onto the neighbour.
        drag(&mut s, Point::new(270.0, 70.0), Point::new(262.0, 70.0));
        let room = s.current_floor().unwrap().room(&id).unwrap();
        assert!(approx(room.x, 100.0));
        assert!(approx(room.y, 10.0));
    }

    #[test]
    fn test_min_side_holds_during_resize_sequence() {
        let mut s = session();
        s.mode = Mode::Move;
        let id = add_room(&mut s, Rect::new(100.0, 100.0, 200.0, 200.0));
        s.select_room(Some(&id));
        let check = |s: &EditorSession| {
            let room = s.current_floor().unwrap().room(&id).unwrap();
            assert!(room.w >= 24.0 - 1e-9 && room.h >= 24.0 - 1e-9);
        };

        s.pointer_start(Point::new(205.0, 150.0));
        assert!(matches!(s.drag_state(), DragState::EdgeResize { .. }));
        for p in [(90.0, 150.0), (30.0, 150.0), (300.0, 150.0), (110.0, 150.0)] {
            s.pointer_move(Point::new(p.0, p.1), Vec2::ZERO);
            check(&s);
        }
        s.pointer_end();
        let room = s.current_floor().unwrap().room(&id).unwrap();
        assert!(approx(room.w, 24.0));

        let corner = Point::new(room.x + room.w, room.y + room.h);
        s.pointer_start(corner);
        assert!(matches!(
            s.drag_state(),
            DragState::Resize {
                corner: Corner::BottomRight,
                ..
            }
        ));
        for p in [(30.0, 30.0), (110.0, 110.0), (500.0, 90.0), (101.0, 300.0)] {
            s.pointer_move(Point::new(p.0, p.1), Vec2::ZERO);
            check(&s);
        }
        s.pointer_end();
        check(&s);
    }

    #[test]
    fn test_edge_resize_gesture() {
        let mut s = session();
        s.mode = Mode::Move;
        let id = add_room(&mut s, Rect::new(100.0, 100.0, 200.0, 200.0));
        s.select_room(Some(&id));
        s.pointer_start(Point::new(205.0, 150.0));
        assert!(matches!(s.drag_state(), DragState::EdgeResize { .. }));
        s.pointer_move(Point::new(260.0, 150.0), Vec2::ZERO);
        s.pointer_end();
        let room = s.current_floor().unwrap().room(&id).unwrap();
        assert!(approx(room.x, 100.0));
        assert!(approx(room.w, 160.0));
        assert!(approx(room.h, 100.0));
    }

    #[test]
    fn test_press_on_body_selects_then_handles_need_selection() {
        let mut s = session();
        s.mode = Mode::Move;
        let id = add_room(&mut s, Rect::new(100.0, 100.0, 200.0, 200.0));
        // Unselected: pressing above the room is empty canvas, so it pans.
        s.pointer_start(Point::new(150.0, 72.0));
        assert!(matches!(s.drag_state(), DragState::Pan { .. }));
        s.pointer_end();
        assert!(s.selected_room_id().is_none());

        s.pointer_start(Point::new(150.0, 150.0));
        assert!(matches!(s.drag_state(), DragState::Move { .. }));
        assert_eq!(s.selected_room_id(), Some(id.as_str()));
        s.pointer_end();
    }

    #[test]
    fn test_empty_press_clears_selection_and_pans() {
        let mut s = session();
        s.mode = Mode::Move;
        let id = add_room(&mut s, Rect::new(100.0, 100.0, 200.0, 200.0));
        s.select_room(Some(&id));
        drag(&mut s, Point::new(500.0, 400.0), Point::new(550.0, 420.0));
        assert!(s.selected_room_id().is_none());
        assert_eq!(s.viewport().pan, Vec2::new(50.0, 20.0));
    }

    #[test]
    fn test_pan_clamped_at_end() {
        let mut s = session();
        s.mode = Mode::Move;
        s.set_viewport_size(Size::new(100.0, 100.0));
        s.pointer_start(Point::new(50.0, 50.0));
        assert!(matches!(s.drag_state(), DragState::Pan { .. }));
        // Pan drags are not bounded while in progress.
        s.pointer_move(Point::new(350.0, 50.0), Vec2::new(300.0, 0.0));
        assert!(approx(s.viewport().pan.x, 300.0));
        s.pointer_end();
        assert!(approx(s.viewport().pan.x, 100.0));
    }

    #[test]
    fn test_auto_scroll_during_move() {
        let mut s = session();
        s.mode = Mode::Move;
        add_room(&mut s, Rect::new(700.0, 100.0, 790.0, 200.0));
        s.pointer_start(Point::new(750.0, 150.0));
        s.pointer_move(Point::new(790.0, 150.0), Vec2::ZERO);
        assert!(approx(s.viewport().pan.x, -10.0));
        s.pointer_end();
    }

    #[test]
    fn test_commit_observer() {
        let mut s = session();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        s.set_commit_observer(Some(Box::new(move |json: &str| {
            sink.borrow_mut().push(json.to_string());
        })));
        drag(&mut s, Point::new(0.0, 0.0), Point::new(100.0, 80.0));
        let seen = seen.borrow();
        assert_eq!(seen.len(), 1);
        let plan = Plan::from_json(&seen[0], 24.0).unwrap();
        assert_eq!(plan.floors[0].rooms.len(), 1);
    }

    #[test]
    fn test_pointer_end_without_start_is_ignored() {
        let mut s = session();
        s.pointer_end();
        assert_eq!(s.revision(), 0);
    }

    #[test]
    fn test_place_door_snaps_to_wall() {
        let mut s = session();
        add_room(&mut s, Rect::new(0.0, 0.0, 100.0, 80.0));
        s.mode = Mode::PlaceDoor;
        s.tap(Point::new(-5.0, 40.0));
        let floor = s.current_floor().unwrap();
        let door = &floor.items[0];
        assert_eq!(door.kind, ItemType::Door);
        assert!(approx(door.x, 0.0) && approx(door.y, 40.0));
        assert!(approx(door.rotation, 270.0));
        assert!(approx(door.size_w, 45.0));
        assert_eq!(s.revision(), 1);
    }

    #[test]
    fn test_place_stairs_free() {
        let mut s = session();
        add_room(&mut s, Rect::new(0.0, 0.0, 100.0, 80.0));
        s.mode = Mode::PlaceStairs;
        s.tap(Point::new(300.0, 300.0));
        let stairs = &s.current_floor().unwrap().items[0];
        assert!(approx(stairs.x, 300.0) && approx(stairs.y, 300.0));
        assert_eq!(stairs.steps, Some(12));
    }

    #[test]
    fn test_place_window_without_rooms() {
        let mut s = session();
        s.mode = Mode::PlaceWindow;
        s.tap(Point::new(30.0, 40.0));
        let window = &s.current_floor().unwrap().items[0];
        assert!(approx(window.x, 30.0));
        assert!(approx(window.rotation, 0.0));
    }

    #[test]
    fn test_tap_selects_in_move_mode() {
        let mut s = session();
        s.mode = Mode::Move;
        let id = add_room(&mut s, Rect::new(0.0, 0.0, 100.0, 100.0));
        s.tap(Point::new(50.0, 50.0));
        assert_eq!(s.selected_room_id(), Some(id.as_str()));
        s.tap(Point::new(500.0, 500.0));
        assert!(s.selected_room_id().is_none());
    }

    #[test]
    fn test_double_tap_zoom_capped() {
        let mut s = session();
        s.double_tap(Point::new(400.0, 300.0));
        assert!(approx(s.viewport().scale(), 1.35));
        for _ in 0..10 {
            s.double_tap(Point::new(400.0, 300.0));
        }
        assert!(approx(s.viewport().scale(), 3.0));
    }

    #[test]
    fn test_zoom_buttons_and_reset() {
        let mut s = session();
        s.zoom_in();
        assert!(approx(s.viewport().scale(), 1.2));
        s.zoom_out();
        assert!(approx(s.viewport().scale(), 1.0));
        s.zoom_in();
        s.reset_view();
        assert!(approx(s.viewport().scale(), 1.0));
        assert_eq!(s.viewport().pan, Vec2::ZERO);
    }

    #[test]
    fn test_zoom_to_fit() {
        let mut s = session();
        assert!(!s.zoom_to_fit());
        add_room(&mut s, Rect::new(0.0, 0.0, 400.0, 300.0));
        assert!(s.zoom_to_fit());
        assert!(approx(s.viewport().scale(), 1.68));
        let center = s.viewport().world_to_screen(Point::new(200.0, 150.0));
        assert!(approx(center.x, 400.0) && approx(center.y, 300.0));
    }

    #[test]
    fn test_minimap_jump() {
        let mut s = session();
        assert!(!s.minimap_jump(Point::new(10.0, 10.0)));
        add_room(&mut s, Rect::new(0.0, 0.0, 320.0, 240.0));
        assert!(s.minimap_jump(Point::new(88.0, 68.0)));
        let center = s.viewport().screen_to_world(Point::new(400.0, 300.0));
        assert!(approx(center.x, 160.0) && approx(center.y, 120.0));
    }

    #[test]
    fn test_transform_event() {
        let mut s = session();
        s.handle_event(InputEvent::Transform {
            centroid: Point::new(100.0, 100.0),
            pan: Vec2::ZERO,
            zoom: 2.0,
        });
        assert!(approx(s.viewport().scale(), 2.0));
        let p = s.viewport().screen_to_world(Point::new(100.0, 100.0));
        assert!(approx(p.x, 100.0) && approx(p.y, 100.0));
    }

    #[test]
    fn test_floor_management() {
        let mut s = session();
        s.add_floor(None);
        assert_eq!(s.current_floor().unwrap().name, "Floor 2");
        assert_eq!(s.current_floor().unwrap().params.floor_id, "Floor-2");
        s.add_floor(Some("Attic"));
        assert_eq!(s.current_floor_index(), Some(2));

        s.remove_current_floor();
        assert_eq!(s.current_floor_index(), Some(1));
        assert!(s.set_current_floor(0));
        assert!(!s.set_current_floor(5));
        s.remove_current_floor();
        s.remove_current_floor();
        assert!(s.current_floor().is_none());
        s.remove_current_floor();
        assert!(s.plan().is_empty());
    }

    #[test]
    fn test_duplicate_and_paste_floor() {
        let mut s = session();
        let id = add_room(&mut s, Rect::new(0.0, 0.0, 100.0, 100.0));
        s.duplicate_current_floor();
        let copy = s.current_floor().unwrap();
        assert_eq!(copy.name, "Floor 1-copy");
        assert_ne!(copy.rooms[0].id, id);
        assert!(approx(copy.rooms[0].x, 30.0));

        s.set_current_floor(0);
        s.copy_floor();
        s.paste_floor();
        let pasted = s.current_floor().unwrap();
        assert_eq!(pasted.name, "Floor 1-pasted");
        assert!(approx(pasted.rooms[0].x, 40.0));
        assert_eq!(s.plan().floors.len(), 3);
    }

    #[test]
    fn test_save_floor_params() {
        let mut s = session();
        s.save_floor_params(FloorParamsUpdate {
            floor_id: Some("Ground".into()),
            ppm: Some(100.0),
            ..Default::default()
        });
        let floor = s.current_floor().unwrap();
        assert_eq!(floor.name, "Ground");
        assert!(approx(floor.params.ppm, 100.0));
        assert_eq!(floor.params.use_type, "Residential");
    }

    #[test]
    fn test_room_operations() {
        let mut s = session();
        let id = s
            .add_room_from_template("Bath", Size::new(80.0, 60.0), true, Point::new(100.0, 100.0))
            .unwrap();
        assert_eq!(s.selected_room_id(), Some(id.as_str()));
        let room = s.selected_room().unwrap();
        assert_eq!(room.color, UTILITY_ROOM_COLOR);
        assert!(approx(room.x, 60.0));

        let dup = s.duplicate_selected_room().unwrap();
        assert_ne!(dup, id);
        assert!(approx(s.selected_room().unwrap().x, 80.0));

        assert!(s.update_selected_room(|room| {
            room.w = 5.0;
            room.angle = -15.0;
        }));
        let room = s.selected_room().unwrap();
        assert!(approx(room.w, 24.0));
        assert!(approx(room.angle, 345.0));

        assert!(s.delete_selected_room());
        assert!(s.selected_room_id().is_none());
        assert!(!s.delete_selected_room());
        assert_eq!(s.current_floor().unwrap().rooms.len(), 1);

        let floor = s.current_floor().unwrap().clone();
        assert!(approx(s.total_area_m2(&floor), 80.0 * 60.0 / 2500.0));

        s.clear_rooms();
        assert!(s.current_floor().unwrap().rooms.is_empty());
    }

    #[test]
    fn test_dangling_selection_is_ignored() {
        let mut s = session();
        s.select_room(Some("missing"));
        assert!(s.selected_room().is_none());
        assert!(!s.update_selected_room(|room| room.x = 1.0));
        assert!(s.duplicate_selected_room().is_none());
    }

    #[test]
    fn test_load_json() {
        let mut s = session();
        add_room(&mut s, Rect::new(0.0, 0.0, 100.0, 100.0));
        let json = s.to_json().unwrap();

        let mut other = session();
        other.load_json(&json).unwrap();
        assert_eq!(other.plan(), s.plan());

        let before = other.plan().clone();
        assert!(other.load_json("{\"floors\": 3}").is_err());
        assert_eq!(other.plan(), &before);
    }
}
