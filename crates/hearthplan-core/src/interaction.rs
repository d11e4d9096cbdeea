//! Pointer gesture state machine: drag, resize, rotate, label move, and
//! route drawing.
//!
//! The controller owns only transient state (the gesture, the pre-gesture
//! snapshot, the route draft, the snap indicator). The plan and history are
//! borrowed per event, so the embedding shell decides where they live.

use kurbo::{Point, Vec2};
use log::debug;

use crate::entities::EntityId;
use crate::geometry::{self, Frame};
use crate::history::History;
use crate::plan::{Mode, Plan};
use crate::snap;

/// Distance above the top edge at which the rotate handle floats.
pub const ROTATE_HANDLE_OFFSET: f64 = 25.0;
/// Pick radius for the resize/rotate/label handles.
const HANDLE_RADIUS: f64 = 10.0;
/// Pick radius for exit markers.
const MARKER_RADIUS: f64 = 18.0;
/// Maximum distance at which a click selects a route polyline.
const ROUTE_HIT_DISTANCE: f64 = 8.0;

/// Modifier keys accompanying a pointer event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

/// The in-progress gesture. All `start_*` fields capture state at
/// pointer-down so every pointer-move recomputes from scratch and the same
/// event applied twice yields the same document.
#[derive(Debug, Clone, PartialEq)]
pub enum Gesture {
    Idle,
    Dragging {
        id: EntityId,
        /// Pointer position minus the entity origin at pointer-down.
        grab: Vec2,
    },
    Resizing {
        id: EntityId,
        start_pointer: Point,
        start_width: f64,
        start_height: f64,
    },
    Rotating {
        id: EntityId,
        pivot: Point,
        start_pointer_angle: f64,
        start_rotation: f64,
    },
    MovingLabel {
        id: EntityId,
        start_pointer: Point,
        start_offset: (f64, f64),
        rotation: f64,
    },
}

pub struct InteractionController {
    gesture: Gesture,
    /// Document state at gesture start, for the commit-if-changed diff.
    pre_gesture: Option<Plan>,
    /// Points accumulated while in route mode, not yet committed.
    route_draft: Vec<Point>,
    /// Transient highlight for the winning snap target.
    snap_indicator: Option<Point>,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new()
    }
}

impl InteractionController {
    pub fn new() -> Self {
        Self {
            gesture: Gesture::Idle,
            pre_gesture: None,
            route_draft: Vec::new(),
            snap_indicator: None,
        }
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn snap_indicator(&self) -> Option<Point> {
        self.snap_indicator
    }

    pub fn route_draft(&self) -> &[Point] {
        &self.route_draft
    }

    /// Pointer-down. In route mode this appends a (grid-snapped) point to
    /// the draft; otherwise it hit-tests handles and bodies and may start a
    /// gesture.
    pub fn pointer_down(&mut self, plan: &mut Plan, pointer: Point, _mods: Modifiers) {
        if plan.mode == Mode::Route {
            let p = Point::new(plan.snap_value(pointer.x), plan.snap_value(pointer.y));
            self.route_draft.push(p);
            return;
        }

        // Handles of the current selection win over body hits, so a handle
        // overlapping a neighbor stays grabbable.
        if let Some(selected) = plan.selected_id {
            if self.try_begin_handle_gesture(plan, selected, pointer) {
                return;
            }
        }

        if let Some(id) = hit_test(plan, pointer) {
            self.begin_body_gesture(plan, id, pointer);
        } else {
            // Selection changes are not undoable.
            plan.select(None);
        }
    }

    /// Pointer-move. Recomputes the gesture target's state from the values
    /// captured at pointer-down.
    pub fn pointer_move(&mut self, plan: &mut Plan, pointer: Point, mods: Modifiers) {
        match self.gesture.clone() {
            Gesture::Idle => {}
            Gesture::Dragging { id, grab } => self.move_drag(plan, id, pointer, grab),
            Gesture::Resizing {
                id,
                start_pointer,
                start_width,
                start_height,
            } => self.move_resize(plan, id, pointer, start_pointer, start_width, start_height),
            Gesture::Rotating {
                id,
                pivot,
                start_pointer_angle,
                start_rotation,
            } => {
                let angle = pointer_angle(pointer, pivot);
                let mut rotation = start_rotation + (angle - start_pointer_angle);
                if mods.shift {
                    rotation = (rotation / 45.0).round() * 45.0;
                }
                let rotation = geometry::wrap_degrees(rotation);
                if let Some(frame) = plan.entity_frame(id) {
                    plan.set_entity_frame(id, Frame { rotation, ..frame });
                } else if let Some(exit) = plan.exit_mut(id) {
                    exit.set_rotation(rotation);
                }
            }
            Gesture::MovingLabel {
                id,
                start_pointer,
                start_offset,
                rotation,
            } => {
                let (dx, dy) = geometry::rotate_vector(
                    pointer.x - start_pointer.x,
                    pointer.y - start_pointer.y,
                    -rotation,
                );
                let offset = (start_offset.0 + dx, start_offset.1 + dy);
                if let Some(style) = label_style_mut(plan, id) {
                    style.offset_x = Some(offset.0);
                    style.offset_y = Some(offset.1);
                }
            }
        }
    }

    /// Pointer-up: end the gesture and commit one history entry if the
    /// document changed. Returns whether an entry was pushed.
    pub fn pointer_up(&mut self, plan: &Plan, history: &mut History) -> bool {
        self.gesture = Gesture::Idle;
        self.snap_indicator = None;
        let Some(before) = self.pre_gesture.take() else {
            return false;
        };
        if before == *plan {
            return false;
        }
        debug!("gesture committed on {:?}", plan.selected_id);
        history.push(plan.clone());
        true
    }

    /// Abandon the current gesture, restoring the pre-gesture document.
    pub fn cancel_gesture(&mut self, plan: &mut Plan) {
        self.gesture = Gesture::Idle;
        self.snap_indicator = None;
        if let Some(before) = self.pre_gesture.take() {
            *plan = before;
        }
    }

    /// Commit the drafted route. Requires at least two points; on success
    /// the plan returns to safety mode and one history entry is pushed.
    pub fn finish_route(&mut self, plan: &mut Plan, history: &mut History) -> bool {
        if self.route_draft.len() < 2 {
            return false;
        }
        let points = std::mem::take(&mut self.route_draft);
        if plan
            .add_route(crate::entities::Route::new(points))
            .is_none()
        {
            return false;
        }
        plan.mode = Mode::Safety;
        history.push(plan.clone());
        true
    }

    /// Discard the drafted route without touching the document.
    pub fn cancel_route(&mut self) {
        self.route_draft.clear();
    }

    // Gesture starts ---------------------------------------------------

    fn begin(&mut self, plan: &mut Plan, id: EntityId, gesture: Gesture) {
        plan.select(Some(id));
        self.pre_gesture = Some(plan.clone());
        self.gesture = gesture;
    }

    fn try_begin_handle_gesture(
        &mut self,
        plan: &mut Plan,
        id: EntityId,
        pointer: Point,
    ) -> bool {
        if let Some(frame) = plan.entity_frame(id) {
            let resize = frame.local_to_world(frame.width, frame.height);
            if geometry::distance(pointer, resize) <= HANDLE_RADIUS {
                self.begin(
                    plan,
                    id,
                    Gesture::Resizing {
                        id,
                        start_pointer: pointer,
                        start_width: frame.width,
                        start_height: frame.height,
                    },
                );
                return true;
            }
            let rotate = frame.local_to_world(frame.width / 2.0, -ROTATE_HANDLE_OFFSET);
            if geometry::distance(pointer, rotate) <= HANDLE_RADIUS {
                let pivot = frame.center();
                self.begin(
                    plan,
                    id,
                    Gesture::Rotating {
                        id,
                        pivot,
                        start_pointer_angle: pointer_angle(pointer, pivot),
                        start_rotation: frame.rotation,
                    },
                );
                return true;
            }
            if let Some(anchor) = label_anchor_world(plan, id) {
                if geometry::distance(pointer, anchor) <= HANDLE_RADIUS {
                    let offset = label_offset(plan, id);
                    self.begin(
                        plan,
                        id,
                        Gesture::MovingLabel {
                            id,
                            start_pointer: pointer,
                            start_offset: offset,
                            rotation: frame.rotation,
                        },
                    );
                    return true;
                }
            }
            return false;
        }

        if let Some(exit) = plan.exit(id) {
            let pivot = exit.position();
            let rotate =
                geometry::rotate_about(pivot + Vec2::new(0.0, -ROTATE_HANDLE_OFFSET), pivot, exit.rotation);
            if geometry::distance(pointer, rotate) <= HANDLE_RADIUS {
                let start_rotation = exit.rotation;
                self.begin(
                    plan,
                    id,
                    Gesture::Rotating {
                        id,
                        pivot,
                        start_pointer_angle: pointer_angle(pointer, pivot),
                        start_rotation,
                    },
                );
                return true;
            }
            if let Some(anchor) = label_anchor_world(plan, id) {
                if geometry::distance(pointer, anchor) <= HANDLE_RADIUS {
                    let offset = label_offset(plan, id);
                    let rotation = exit.rotation;
                    self.begin(
                        plan,
                        id,
                        Gesture::MovingLabel {
                            id,
                            start_pointer: pointer,
                            start_offset: offset,
                            rotation,
                        },
                    );
                    return true;
                }
            }
        }
        false
    }

    fn begin_body_gesture(&mut self, plan: &mut Plan, id: EntityId, pointer: Point) {
        if let Some(frame) = plan.entity_frame(id) {
            let grab = Vec2::new(pointer.x - frame.x, pointer.y - frame.y);
            self.begin(plan, id, Gesture::Dragging { id, grab });
        } else if let Some(exit) = plan.exit(id) {
            let pos = exit.position();
            let grab = Vec2::new(pointer.x - pos.x, pointer.y - pos.y);
            self.begin(plan, id, Gesture::Dragging { id, grab });
        } else {
            // Routes are select-only.
            plan.select(Some(id));
        }
    }

    // Gesture moves ----------------------------------------------------

    fn move_drag(&mut self, plan: &mut Plan, id: EntityId, pointer: Point, grab: Vec2) {
        let candidate = Point::new(
            plan.snap_value(pointer.x - grab.x),
            plan.snap_value(pointer.y - grab.y),
        );
        if let Some(frame) = plan.entity_frame(id) {
            let (origin, indicator) = if plan.snap_to_objects {
                let targets = snap::collect_targets(plan, id);
                let result = snap::snap_drag_origin(&frame, candidate, &targets);
                (result.origin, result.indicator)
            } else {
                (candidate, None)
            };
            self.snap_indicator = indicator;
            plan.set_entity_frame(
                id,
                Frame {
                    x: origin.x,
                    y: origin.y,
                    ..frame
                },
            );
        } else if let Some(exit) = plan.exit_mut(id) {
            exit.set_position(candidate);
        }
    }

    fn move_resize(
        &mut self,
        plan: &mut Plan,
        id: EntityId,
        pointer: Point,
        start_pointer: Point,
        start_width: f64,
        start_height: f64,
    ) {
        let Some(frame) = plan.entity_frame(id) else {
            return;
        };
        let floor = if plan.snap_to_grid { plan.grid_size } else { 1.0 };
        let width = plan.snap_value((start_width + pointer.x - start_pointer.x).max(floor));
        let mut height = plan.snap_value((start_height + pointer.y - start_pointer.y).max(floor));
        if plan.feature(id).is_some_and(|f| f.fixed_thickness()) {
            height = start_height;
        }

        let resized = Frame {
            width,
            height,
            ..frame
        };
        let (width, indicator) = if plan.snap_to_objects {
            let targets = snap::collect_targets(plan, id);
            let result = snap::snap_resize_width(&resized, &targets);
            (result.width, result.indicator)
        } else {
            (width, None)
        };
        self.snap_indicator = indicator;
        plan.set_entity_frame(id, Frame { width, ..resized });
    }
}

/// Angle of `pointer` around `pivot`, in degrees, matching the clockwise
/// screen-space rotation convention.
fn pointer_angle(pointer: Point, pivot: Point) -> f64 {
    (pointer.y - pivot.y).atan2(pointer.x - pivot.x).to_degrees()
}

/// Topmost entity under the pointer: markers, then features, then rooms
/// (later entries draw above earlier ones), then routes.
pub fn hit_test(plan: &Plan, pointer: Point) -> Option<EntityId> {
    for exit in plan.exits.iter().rev() {
        if geometry::distance(pointer, exit.position()) <= MARKER_RADIUS {
            return Some(exit.id);
        }
    }
    for feature in plan.features.iter().rev() {
        if feature.frame().contains(pointer, 0.0) {
            return Some(feature.id);
        }
    }
    for room in plan.rooms.iter().rev() {
        if room.frame().contains(pointer, 0.0) {
            return Some(room.id);
        }
    }
    for route in plan.routes.iter().rev() {
        if route.distance_to(pointer) <= ROUTE_HIT_DISTANCE {
            return Some(route.id);
        }
    }
    None
}

/// World position of an entity's label anchor (kind default plus stored
/// local offset, carried through the entity's rotation).
pub fn label_anchor_world(plan: &Plan, id: EntityId) -> Option<Point> {
    if let Some(room) = plan.room(id) {
        let local = room.label_anchor_local();
        return Some(room.frame().local_to_world(local.x, local.y));
    }
    if let Some(feature) = plan.feature(id) {
        let local = feature.label_anchor_local();
        return Some(feature.frame().local_to_world(local.x, local.y));
    }
    if let Some(exit) = plan.exit(id) {
        let local = exit.label_anchor_local();
        let world = exit.position() + Vec2::new(local.x, local.y);
        return Some(geometry::rotate_about(world, exit.position(), exit.rotation));
    }
    None
}

fn label_offset(plan: &Plan, id: EntityId) -> (f64, f64) {
    plan.room(id)
        .map(|r| r.label.offset())
        .or_else(|| plan.feature(id).map(|f| f.label_style.offset()))
        .or_else(|| plan.exit(id).map(|e| e.label_style.offset()))
        .unwrap_or((0.0, 0.0))
}

fn label_style_mut(plan: &mut Plan, id: EntityId) -> Option<&mut crate::entities::LabelStyle> {
    if plan.room(id).is_some() {
        return plan.room_mut(id).map(|r| &mut r.label);
    }
    if plan.feature(id).is_some() {
        return plan.feature_mut(id).map(|f| &mut f.label_style);
    }
    plan.exit_mut(id).map(|e| &mut e.label_style)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{ExitMarker, Feature, FeatureKind, MarkerKind, Room, Route};

    fn setup() -> (Plan, History, InteractionController) {
        let plan = Plan::empty("test");
        let history = History::new(plan.clone());
        (plan, history, InteractionController::new())
    }

    fn press_move_release(
        ctl: &mut InteractionController,
        plan: &mut Plan,
        history: &mut History,
        down: Point,
        up: Point,
    ) -> bool {
        ctl.pointer_down(plan, down, Modifiers::default());
        ctl.pointer_move(plan, up, Modifiers::default());
        ctl.pointer_up(plan, history)
    }

    #[test]
    fn drag_moves_room_and_pushes_once() {
        let (mut plan, mut history, mut ctl) = setup();
        plan.snap_to_objects = false;
        let id = plan.add_room(Room::new("A", 100.0, 100.0, 100.0, 100.0));

        let pushed = press_move_release(
            &mut ctl,
            &mut plan,
            &mut history,
            Point::new(150.0, 150.0),
            Point::new(250.0, 170.0),
        );
        assert!(pushed);
        let room = plan.room(id).unwrap();
        assert_eq!((room.x, room.y), (200.0, 120.0));
        assert_eq!(plan.selected_id, Some(id));
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn drag_without_movement_pushes_nothing() {
        let (mut plan, mut history, mut ctl) = setup();
        plan.add_room(Room::new("A", 100.0, 100.0, 100.0, 100.0));

        let pushed = press_move_release(
            &mut ctl,
            &mut plan,
            &mut history,
            Point::new(150.0, 150.0),
            Point::new(150.0, 150.0),
        );
        assert!(!pushed);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn drag_snaps_to_grid() {
        let (mut plan, mut history, mut ctl) = setup();
        plan.snap_to_objects = false;
        let id = plan.add_room(Room::new("A", 100.0, 100.0, 100.0, 100.0));

        // Grab at the exact origin so the candidate equals the pointer.
        ctl.pointer_down(&mut plan, Point::new(100.0, 100.0), Modifiers::default());
        ctl.pointer_move(&mut plan, Point::new(147.0, 213.0), Modifiers::default());
        ctl.pointer_up(&plan, &mut history);
        let room = plan.room(id).unwrap();
        assert_eq!((room.x, room.y), (140.0, 220.0));
    }

    #[test]
    fn drag_snaps_flush_to_neighbor_corner() {
        let (mut plan, mut history, mut ctl) = setup();
        plan.snap_to_grid = false;
        plan.add_room(Room::new("A", 0.0, 0.0, 100.0, 100.0));
        let b = plan.add_room(Room::new("B", 300.0, 0.0, 100.0, 100.0));

        ctl.pointer_down(&mut plan, Point::new(300.0, 0.0), Modifiers::default());
        ctl.pointer_move(&mut plan, Point::new(102.0, 0.0), Modifiers::default());
        let room = plan.room(b).unwrap();
        assert_eq!((room.x, room.y), (100.0, 0.0));
        assert_eq!(ctl.snap_indicator(), Some(Point::new(100.0, 0.0)));

        ctl.pointer_up(&plan, &mut history);
        assert_eq!(ctl.snap_indicator(), None);
    }

    #[test]
    fn pointer_move_is_idempotent() {
        let (mut plan, mut history, mut ctl) = setup();
        let id = plan.add_room(Room::new("A", 100.0, 100.0, 100.0, 100.0));

        ctl.pointer_down(&mut plan, Point::new(120.0, 120.0), Modifiers::default());
        ctl.pointer_move(&mut plan, Point::new(260.0, 180.0), Modifiers::default());
        let first = plan.room(id).unwrap().clone();
        ctl.pointer_move(&mut plan, Point::new(260.0, 180.0), Modifiers::default());
        assert_eq!(plan.room(id).unwrap(), &first);
        ctl.pointer_up(&plan, &mut history);
    }

    #[test]
    fn resize_from_corner_handle() {
        let (mut plan, mut history, mut ctl) = setup();
        plan.snap_to_objects = false;
        let id = plan.add_room(Room::new("A", 100.0, 100.0, 100.0, 100.0));
        plan.select(Some(id));

        // Bottom-right handle sits at (200, 200).
        ctl.pointer_down(&mut plan, Point::new(200.0, 200.0), Modifiers::default());
        assert!(matches!(ctl.gesture(), Gesture::Resizing { .. }));
        ctl.pointer_move(&mut plan, Point::new(262.0, 238.0), Modifiers::default());
        let pushed = ctl.pointer_up(&plan, &mut history);
        assert!(pushed);
        let room = plan.room(id).unwrap();
        assert_eq!((room.width, room.height), (160.0, 140.0));
        assert_eq!((room.x, room.y), (100.0, 100.0));
    }

    #[test]
    fn resize_floors_at_one_grid_unit() {
        let (mut plan, mut history, mut ctl) = setup();
        plan.snap_to_objects = false;
        let id = plan.add_room(Room::new("A", 100.0, 100.0, 100.0, 100.0));
        plan.select(Some(id));

        ctl.pointer_down(&mut plan, Point::new(200.0, 200.0), Modifiers::default());
        ctl.pointer_move(&mut plan, Point::new(-500.0, -500.0), Modifiers::default());
        ctl.pointer_up(&plan, &mut history);
        let room = plan.room(id).unwrap();
        assert_eq!((room.width, room.height), (20.0, 20.0));
    }

    #[test]
    fn resize_keeps_wall_thickness() {
        let (mut plan, mut history, mut ctl) = setup();
        plan.snap_to_objects = false;
        let mut wall = Feature::new(FeatureKind::Wall, 100.0, 100.0);
        wall.width = 200.0;
        let id = plan.add_feature(wall);
        plan.select(Some(id));

        // Handle at local (200, 6) -> world (300, 106).
        ctl.pointer_down(&mut plan, Point::new(300.0, 106.0), Modifiers::default());
        ctl.pointer_move(&mut plan, Point::new(360.0, 180.0), Modifiers::default());
        ctl.pointer_up(&plan, &mut history);
        let wall = plan.feature(id).unwrap();
        assert_eq!(wall.width, 260.0);
        assert_eq!(wall.height, 6.0);
    }

    #[test]
    fn rotate_follows_pointer_angle() {
        let (mut plan, mut history, mut ctl) = setup();
        let id = plan.add_room(Room::new("A", 100.0, 100.0, 100.0, 100.0));
        plan.select(Some(id));

        // Rotate handle floats above the top edge at (150, 75).
        ctl.pointer_down(&mut plan, Point::new(150.0, 75.0), Modifiers::default());
        assert!(matches!(ctl.gesture(), Gesture::Rotating { .. }));
        // Swing the pointer a quarter turn clockwise around the center.
        ctl.pointer_move(&mut plan, Point::new(225.0, 150.0), Modifiers::default());
        let pushed = ctl.pointer_up(&plan, &mut history);
        assert!(pushed);
        let room = plan.room(id).unwrap();
        assert!((room.rotation - 90.0).abs() < 1e-9);
    }

    #[test]
    fn shift_rounds_rotation_to_45() {
        let (mut plan, mut history, mut ctl) = setup();
        let id = plan.add_room(Room::new("A", 100.0, 100.0, 100.0, 100.0));
        plan.select(Some(id));

        ctl.pointer_down(&mut plan, Point::new(150.0, 75.0), Modifiers::default());
        let shift = Modifiers {
            shift: true,
            ..Modifiers::default()
        };
        // 38 degrees of swing rounds to 45 under shift.
        let pivot = Point::new(150.0, 150.0);
        let swung = geometry::rotate_about(Point::new(150.0, 75.0), pivot, 38.0);
        ctl.pointer_move(&mut plan, swung, shift);
        ctl.pointer_up(&plan, &mut history);
        assert!((plan.room(id).unwrap().rotation - 45.0).abs() < 1e-9);
    }

    #[test]
    fn full_turn_returns_to_start() {
        let (mut plan, mut history, mut ctl) = setup();
        let id = plan.add_room(Room::new("A", 100.0, 100.0, 100.0, 100.0));
        plan.select(Some(id));

        for _ in 0..4 {
            let frame = plan.entity_frame(id).unwrap();
            let handle = frame.local_to_world(frame.width / 2.0, -ROTATE_HANDLE_OFFSET);
            ctl.pointer_down(&mut plan, handle, Modifiers::default());
            let pivot = frame.center();
            ctl.pointer_move(&mut plan, geometry::rotate_about(handle, pivot, 90.0), Modifiers::default());
            ctl.pointer_up(&plan, &mut history);
        }
        assert!(plan.room(id).unwrap().rotation.abs() < 1e-9);
    }

    #[test]
    fn label_move_respects_entity_rotation() {
        let (mut plan, mut history, mut ctl) = setup();
        let mut room = Room::new("A", 100.0, 100.0, 100.0, 100.0);
        room.rotation = 90.0;
        let id = plan.add_room(room);
        plan.select(Some(id));

        let anchor = label_anchor_world(&plan, id).unwrap();
        ctl.pointer_down(&mut plan, anchor, Modifiers::default());
        assert!(matches!(ctl.gesture(), Gesture::MovingLabel { .. }));
        // At 90 degrees the local x axis points down in world space, so a
        // pointer move of +10 world x is -10 along local y.
        ctl.pointer_move(
            &mut plan,
            Point::new(anchor.x + 10.0, anchor.y),
            Modifiers::default(),
        );
        ctl.pointer_up(&plan, &mut history);
        let label = &plan.room(id).unwrap().label;
        assert!(label.offset_x.unwrap().abs() < 1e-9);
        assert!((label.offset_y.unwrap() + 10.0).abs() < 1e-9);
    }

    #[test]
    fn marker_drag_and_rotate() {
        let (mut plan, mut history, mut ctl) = setup();
        plan.snap_to_grid = false;
        let id = plan.add_exit(ExitMarker::new(MarkerKind::Primary, 400.0, 400.0));

        // Body drag.
        press_move_release(
            &mut ctl,
            &mut plan,
            &mut history,
            Point::new(400.0, 400.0),
            Point::new(450.0, 380.0),
        );
        let exit = plan.exit(id).unwrap();
        assert_eq!((exit.x, exit.y), (450.0, 380.0));

        // Rotate handle floats above the point.
        ctl.pointer_down(&mut plan, Point::new(450.0, 355.0), Modifiers::default());
        assert!(matches!(ctl.gesture(), Gesture::Rotating { .. }));
        ctl.pointer_move(&mut plan, Point::new(475.0, 380.0), Modifiers::default());
        ctl.pointer_up(&plan, &mut history);
        assert!((plan.exit(id).unwrap().rotation - 90.0).abs() < 1e-9);
    }

    #[test]
    fn background_click_clears_selection_without_history() {
        let (mut plan, mut history, mut ctl) = setup();
        let id = plan.add_room(Room::new("A", 100.0, 100.0, 100.0, 100.0));
        plan.select(Some(id));

        ctl.pointer_down(&mut plan, Point::new(700.0, 700.0), Modifiers::default());
        let pushed = ctl.pointer_up(&plan, &mut history);
        assert!(!pushed);
        assert_eq!(plan.selected_id, None);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn route_clicks_accumulate_and_finish() {
        let (mut plan, mut history, mut ctl) = setup();
        plan.mode = Mode::Route;

        ctl.pointer_down(&mut plan, Point::new(103.0, 99.0), Modifiers::default());
        ctl.pointer_down(&mut plan, Point::new(200.0, 200.0), Modifiers::default());
        assert_eq!(ctl.route_draft(), &[Point::new(100.0, 100.0), Point::new(200.0, 200.0)]);
        assert!(plan.routes.is_empty());

        assert!(ctl.finish_route(&mut plan, &mut history));
        assert_eq!(plan.routes.len(), 1);
        assert_eq!(plan.mode, Mode::Safety);
        assert_eq!(plan.routes[0].color.to_hex(), "#ef4444");
        assert!(ctl.route_draft().is_empty());
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn route_finish_requires_two_points() {
        let (mut plan, mut history, mut ctl) = setup();
        plan.mode = Mode::Route;
        ctl.pointer_down(&mut plan, Point::new(100.0, 100.0), Modifiers::default());
        assert!(!ctl.finish_route(&mut plan, &mut history));
        assert!(plan.routes.is_empty());
        assert_eq!(plan.mode, Mode::Route);
    }

    #[test]
    fn route_cancel_discards_draft() {
        let (mut plan, _history, mut ctl) = setup();
        plan.mode = Mode::Route;
        ctl.pointer_down(&mut plan, Point::new(100.0, 100.0), Modifiers::default());
        ctl.pointer_down(&mut plan, Point::new(200.0, 100.0), Modifiers::default());
        ctl.cancel_route();
        assert!(ctl.route_draft().is_empty());
        assert!(plan.routes.is_empty());
    }

    #[test]
    fn clicking_route_selects_it() {
        let (mut plan, _history, mut ctl) = setup();
        let route = Route::new(vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0)]);
        let id = plan.add_route(route).unwrap();

        ctl.pointer_down(&mut plan, Point::new(50.0, 5.0), Modifiers::default());
        assert_eq!(plan.selected_id, Some(id));
        assert!(matches!(ctl.gesture(), Gesture::Idle));
    }

    #[test]
    fn cancel_gesture_restores_snapshot() {
        let (mut plan, _history, mut ctl) = setup();
        let id = plan.add_room(Room::new("A", 100.0, 100.0, 100.0, 100.0));

        ctl.pointer_down(&mut plan, Point::new(150.0, 150.0), Modifiers::default());
        ctl.pointer_move(&mut plan, Point::new(400.0, 400.0), Modifiers::default());
        assert_ne!(plan.room(id).unwrap().x, 100.0);
        ctl.cancel_gesture(&mut plan);
        assert_eq!(plan.room(id).unwrap().x, 100.0);
    }

    #[test]
    fn topmost_feature_wins_hit_test() {
        let mut plan = Plan::empty("p");
        plan.add_room(Room::new("A", 0.0, 0.0, 400.0, 400.0));
        let table = plan.add_feature(Feature::new(FeatureKind::Table, 100.0, 100.0));
        assert_eq!(hit_test(&plan, Point::new(120.0, 120.0)), Some(table));
        let room_hit = hit_test(&plan, Point::new(20.0, 20.0));
        assert_eq!(room_hit, Some(plan.rooms[0].id));
    }
}
