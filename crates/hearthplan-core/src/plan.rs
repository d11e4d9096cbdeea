//! The plan document: every entity collection plus canvas-level settings.
//!
//! A [`Plan`] is the unit of undo/redo. Gestures and discrete actions mutate
//! it in place; the history manager stores whole-document clones.

use kurbo::Point;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::entities::{EntityId, ExitMarker, Feature, FeatureKind, Room, Route};
use crate::geometry::{self, Frame};

pub const DEFAULT_CANVAS_WIDTH: f64 = 800.0;
pub const DEFAULT_CANVAS_HEIGHT: f64 = 800.0;
pub const DEFAULT_GRID_SIZE: f64 = 20.0;
/// Canvas-pixels-to-inches factor used when rendering dimension labels.
pub const DEFAULT_SCALE: f64 = 0.6;

const MIN_CANVAS_SIZE: f64 = 100.0;

/// Which editing surface the UI is presenting. Route mode changes
/// pointer-down semantics (click accumulation instead of gestures).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Edit,
    Safety,
    Details,
    Route,
}

/// Free-text metadata about the property.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanDetails {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub notes: String,
}

/// Errors importing a serialized plan.
#[derive(Debug, Error)]
pub enum PlanFormatError {
    #[error("invalid plan JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("plan is missing a project id")]
    MissingProjectId,
    #[error("plan is missing its rooms collection")]
    MissingRooms,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub id: Uuid,
    pub name: String,
    pub rooms: Vec<Room>,
    #[serde(default)]
    pub features: Vec<Feature>,
    #[serde(default)]
    pub exits: Vec<ExitMarker>,
    #[serde(default)]
    pub routes: Vec<Route>,
    #[serde(default)]
    pub details: PlanDetails,
    /// Opaque reference to a traced background image, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    #[serde(default)]
    pub selected_id: Option<EntityId>,
    #[serde(default)]
    pub mode: Mode,
    #[serde(default)]
    pub show_dimensions: bool,
    pub grid_size: f64,
    pub snap_to_grid: bool,
    #[serde(default = "default_true")]
    pub snap_to_objects: bool,
    pub canvas_width: f64,
    pub canvas_height: f64,
    #[serde(default = "default_scale")]
    pub scale: f64,
}

fn default_true() -> bool {
    true
}

fn default_scale() -> f64 {
    DEFAULT_SCALE
}

impl Plan {
    /// An empty plan with default canvas settings and no entities.
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            rooms: Vec::new(),
            features: Vec::new(),
            exits: Vec::new(),
            routes: Vec::new(),
            details: PlanDetails::default(),
            background_image: None,
            selected_id: None,
            mode: Mode::Edit,
            show_dimensions: false,
            grid_size: DEFAULT_GRID_SIZE,
            snap_to_grid: true,
            snap_to_objects: true,
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            scale: DEFAULT_SCALE,
        }
    }

    /// The factory starting state: two seeded rooms so a new project is not
    /// a blank canvas.
    pub fn starter(name: impl Into<String>) -> Self {
        let mut plan = Self::empty(name);
        plan.rooms.push(Room::new("Master Bedroom", 100.0, 100.0, 240.0, 180.0));
        plan.rooms.push(Room::new("Living Room", 340.0, 100.0, 300.0, 240.0));
        plan
    }

    pub fn canvas_center(&self) -> Point {
        Point::new(self.canvas_width / 2.0, self.canvas_height / 2.0)
    }

    // Lookup -----------------------------------------------------------

    pub fn room(&self, id: EntityId) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    pub fn room_mut(&mut self, id: EntityId) -> Option<&mut Room> {
        self.rooms.iter_mut().find(|r| r.id == id)
    }

    pub fn feature(&self, id: EntityId) -> Option<&Feature> {
        self.features.iter().find(|f| f.id == id)
    }

    pub fn feature_mut(&mut self, id: EntityId) -> Option<&mut Feature> {
        self.features.iter_mut().find(|f| f.id == id)
    }

    pub fn exit(&self, id: EntityId) -> Option<&ExitMarker> {
        self.exits.iter().find(|e| e.id == id)
    }

    pub fn exit_mut(&mut self, id: EntityId) -> Option<&mut ExitMarker> {
        self.exits.iter_mut().find(|e| e.id == id)
    }

    pub fn route(&self, id: EntityId) -> Option<&Route> {
        self.routes.iter().find(|r| r.id == id)
    }

    /// The placement frame of a rectangular entity (room or feature).
    /// Markers and routes have no frame.
    pub fn entity_frame(&self, id: EntityId) -> Option<Frame> {
        self.room(id)
            .map(Room::frame)
            .or_else(|| self.feature(id).map(Feature::frame))
    }

    pub fn set_entity_frame(&mut self, id: EntityId, frame: Frame) {
        if let Some(room) = self.room_mut(id) {
            room.set_frame(frame);
        } else if let Some(feature) = self.feature_mut(id) {
            feature.set_frame(frame);
        }
    }

    pub fn contains_entity(&self, id: EntityId) -> bool {
        self.room(id).is_some()
            || self.feature(id).is_some()
            || self.exit(id).is_some()
            || self.route(id).is_some()
    }

    // CRUD -------------------------------------------------------------

    pub fn add_room(&mut self, room: Room) -> EntityId {
        let id = room.id;
        self.rooms.push(room);
        id
    }

    pub fn add_feature(&mut self, feature: Feature) -> EntityId {
        let id = feature.id;
        self.features.push(feature);
        id
    }

    pub fn add_exit(&mut self, exit: ExitMarker) -> EntityId {
        let id = exit.id;
        self.exits.push(exit);
        id
    }

    /// Commit a route. Returns `None` without mutating when the polyline has
    /// fewer than two points.
    pub fn add_route(&mut self, route: Route) -> Option<EntityId> {
        if route.points.len() < 2 {
            return None;
        }
        let id = route.id;
        self.routes.push(route);
        Some(id)
    }

    /// Remove an entity from whichever collection holds it. Clears the
    /// selection if it pointed at the removed entity. Returns whether
    /// anything was removed.
    pub fn remove_entity(&mut self, id: EntityId) -> bool {
        let before = self.rooms.len() + self.features.len() + self.exits.len() + self.routes.len();
        self.rooms.retain(|r| r.id != id);
        self.features.retain(|f| f.id != id);
        self.exits.retain(|e| e.id != id);
        self.routes.retain(|r| r.id != id);
        let removed =
            self.rooms.len() + self.features.len() + self.exits.len() + self.routes.len() < before;
        if removed && self.selected_id == Some(id) {
            self.selected_id = None;
        }
        removed
    }

    pub fn select(&mut self, id: Option<EntityId>) {
        self.selected_id = id;
    }

    /// Add a new feature of `kind` at the default placement point.
    pub fn place_feature(&mut self, kind: FeatureKind) -> EntityId {
        self.add_feature(Feature::new(kind, 250.0, 250.0))
    }

    // Canvas-level operations ------------------------------------------

    /// Round to the nearest grid line when grid snap is on, else identity.
    pub fn snap_value(&self, v: f64) -> f64 {
        if self.snap_to_grid {
            (v / self.grid_size).round() * self.grid_size
        } else {
            v
        }
    }

    /// Dimension text for `px` canvas pixels, e.g. `96"`.
    pub fn format_dimension(&self, px: f64) -> String {
        format!("{}\"", (px * self.scale).round() as i64)
    }

    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        self.canvas_width = width.max(MIN_CANVAS_SIZE);
        self.canvas_height = height.max(MIN_CANVAS_SIZE);
    }

    /// Rotate the whole plan a quarter turn clockwise about the canvas
    /// center: every entity's center swings 90 degrees, each entity's own
    /// rotation advances 90 degrees, route points and markers follow, and
    /// the canvas dimensions swap.
    pub fn rotate_quarter_turn(&mut self) {
        let pivot = self.canvas_center();
        for room in &mut self.rooms {
            let mut f = room.frame();
            rotate_frame_about(&mut f, pivot);
            room.set_frame(f);
        }
        for feature in &mut self.features {
            let mut f = feature.frame();
            rotate_frame_about(&mut f, pivot);
            feature.set_frame(f);
        }
        for exit in &mut self.exits {
            let p = geometry::rotate_about(exit.position(), pivot, 90.0);
            exit.set_position(p);
            exit.set_rotation(exit.rotation + 90.0);
        }
        for route in &mut self.routes {
            for p in &mut route.points {
                *p = geometry::rotate_about(*p, pivot, 90.0);
            }
        }
        std::mem::swap(&mut self.canvas_width, &mut self.canvas_height);
    }

    // Serialization ----------------------------------------------------

    pub fn to_json(&self) -> Result<String, PlanFormatError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a plan from JSON. Structural validation happens before
    /// deserialization so a rejected import never produces a partial plan.
    pub fn from_json(json: &str) -> Result<Self, PlanFormatError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if value.get("id").and_then(|v| v.as_str()).is_none() {
            return Err(PlanFormatError::MissingProjectId);
        }
        if !value.get("rooms").is_some_and(serde_json::Value::is_array) {
            return Err(PlanFormatError::MissingRooms);
        }
        Ok(serde_json::from_value(value)?)
    }
}

fn rotate_frame_about(frame: &mut Frame, pivot: Point) {
    let center = geometry::rotate_about(frame.center(), pivot, 90.0);
    frame.x = center.x - frame.width / 2.0;
    frame.y = center.y - frame.height / 2.0;
    frame.rotation = geometry::wrap_degrees(frame.rotation + 90.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::MarkerKind;

    #[test]
    fn starter_plan_has_seeded_rooms() {
        let plan = Plan::starter("Home");
        assert_eq!(plan.rooms.len(), 2);
        assert_eq!(plan.rooms[0].name, "Master Bedroom");
        assert_eq!(
            (plan.rooms[1].x, plan.rooms[1].width, plan.rooms[1].height),
            (340.0, 300.0, 240.0)
        );
        assert_eq!(plan.grid_size, 20.0);
        assert!(plan.snap_to_grid);
    }

    #[test]
    fn snap_value_rounds_to_grid() {
        let mut plan = Plan::empty("p");
        assert_eq!(plan.snap_value(107.0), 100.0);
        assert_eq!(plan.snap_value(110.0), 120.0);
        plan.snap_to_grid = false;
        assert_eq!(plan.snap_value(107.0), 107.0);
    }

    #[test]
    fn remove_entity_clears_selection() {
        let mut plan = Plan::empty("p");
        let id = plan.add_room(Room::new("A", 0.0, 0.0, 100.0, 100.0));
        plan.select(Some(id));
        assert!(plan.remove_entity(id));
        assert_eq!(plan.selected_id, None);
        assert!(plan.rooms.is_empty());
    }

    #[test]
    fn remove_unknown_entity_is_noop() {
        let mut plan = Plan::starter("p");
        let before = plan.clone();
        assert!(!plan.remove_entity(Uuid::new_v4()));
        assert_eq!(plan, before);
    }

    #[test]
    fn route_needs_two_points() {
        let mut plan = Plan::empty("p");
        assert!(plan.add_route(Route::new(vec![Point::new(0.0, 0.0)])).is_none());
        assert!(plan.routes.is_empty());
        assert!(plan
            .add_route(Route::new(vec![Point::new(0.0, 0.0), Point::new(5.0, 5.0)]))
            .is_some());
    }

    #[test]
    fn quarter_turn_square_canvas() {
        let mut plan = Plan::empty("p");
        plan.set_canvas_size(200.0, 200.0);
        let id = plan.add_room(Room::new("r1", 0.0, 0.0, 100.0, 100.0));
        plan.rotate_quarter_turn();
        let room = plan.room(id).unwrap();
        assert_eq!((room.width, room.height), (100.0, 100.0));
        assert!((room.rotation - 90.0).abs() < 1e-9);
        // Center (50,50) swings clockwise about (100,100) to (150,50).
        assert!((room.x - 100.0).abs() < 1e-9);
        assert!(room.y.abs() < 1e-9);
    }

    #[test]
    fn quarter_turn_swaps_canvas_and_moves_markers() {
        let mut plan = Plan::empty("p");
        plan.set_canvas_size(400.0, 200.0);
        plan.add_exit(ExitMarker::new(MarkerKind::Primary, 200.0, 100.0));
        plan.add_route(Route::new(vec![Point::new(0.0, 0.0), Point::new(200.0, 100.0)]));
        plan.rotate_quarter_turn();
        assert_eq!((plan.canvas_width, plan.canvas_height), (200.0, 400.0));
        // The canvas center is a fixed point of the rotation.
        let exit = &plan.exits[0];
        assert!((exit.x - 200.0).abs() < 1e-9 && (exit.y - 100.0).abs() < 1e-9);
        assert!((exit.rotation - 90.0).abs() < 1e-9);
        let p1 = plan.routes[0].points[1];
        assert!((p1.x - 200.0).abs() < 1e-9 && (p1.y - 100.0).abs() < 1e-9);
    }

    #[test]
    fn four_quarter_turns_identity() {
        let mut plan = Plan::starter("p");
        plan.add_exit(ExitMarker::new(MarkerKind::FirstAid, 123.0, 456.0));
        let before = plan.clone();
        for _ in 0..4 {
            plan.rotate_quarter_turn();
        }
        assert_eq!(plan.canvas_width, before.canvas_width);
        for (a, b) in plan.rooms.iter().zip(&before.rooms) {
            assert!((a.x - b.x).abs() < 1e-9);
            assert!((a.y - b.y).abs() < 1e-9);
            assert!((a.rotation - b.rotation).abs() < 1e-9);
        }
        let (a, b) = (&plan.exits[0], &before.exits[0]);
        assert!((a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9);
    }

    #[test]
    fn canvas_size_clamped() {
        let mut plan = Plan::empty("p");
        plan.set_canvas_size(10.0, 5000.0);
        assert_eq!(plan.canvas_width, 100.0);
        assert_eq!(plan.canvas_height, 5000.0);
    }

    #[test]
    fn json_round_trip() {
        let mut plan = Plan::starter("Round Trip");
        plan.place_feature(FeatureKind::Sofa);
        plan.add_exit(ExitMarker::new(MarkerKind::Extinguisher, 50.0, 60.0));
        plan.add_route(Route::new(vec![Point::new(0.0, 0.0), Point::new(9.0, 9.0)]));
        plan.details.address = "12 Elm St".into();
        let json = plan.to_json().unwrap();
        let back = Plan::from_json(&json).unwrap();
        assert_eq!(back, plan);
    }

    #[test]
    fn import_rejects_missing_id() {
        let err = Plan::from_json(r#"{"name":"x","rooms":[]}"#).unwrap_err();
        assert!(matches!(err, PlanFormatError::MissingProjectId));
    }

    #[test]
    fn import_rejects_missing_rooms() {
        let json = format!(r#"{{"id":"{}","name":"x"}}"#, Uuid::new_v4());
        let err = Plan::from_json(&json).unwrap_err();
        assert!(matches!(err, PlanFormatError::MissingRooms));
    }

    #[test]
    fn import_tolerates_missing_optional_collections() {
        let json = format!(
            r#"{{"id":"{}","name":"x","rooms":[],"gridSize":20,"snapToGrid":true,
               "canvasWidth":800,"canvasHeight":800}}"#,
            Uuid::new_v4()
        );
        let plan = Plan::from_json(&json).unwrap();
        assert!(plan.features.is_empty());
        assert_eq!(plan.mode, Mode::Edit);
        assert_eq!(plan.scale, DEFAULT_SCALE);
        assert!(plan.snap_to_objects);
    }
}
