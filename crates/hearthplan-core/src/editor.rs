//! Discrete editing actions and undo/redo orchestration on top of the
//! interaction controller.
//!
//! Every action here is atomic: mutate the plan, then push exactly one
//! history entry. Mode/selection/setting changes are deliberately not
//! undoable and bypass the history.

use kurbo::Point;
use log::warn;

use crate::analysis::{self, AnalysisOutput, DetectedRoom};
use crate::entities::{EntityId, ExitMarker, Feature, FeatureKind, MarkerKind, Room};
use crate::history::History;
use crate::interaction::{InteractionController, Modifiers};
use crate::plan::{Mode, Plan};
use crate::storage::{BoxFuture, Storage, StorageError, StorageResult};

/// Where a save actually landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Persisted,
    /// The persistent backend was out of quota; the plan lives on in the
    /// in-memory fallback and editing continues.
    MemoryOnly,
}

/// Save a plan, degrading to the fallback backend when the primary reports
/// an exceeded quota.
pub fn save_with_fallback<'a>(
    plan: &'a Plan,
    primary: &'a dyn Storage,
    fallback: &'a dyn Storage,
) -> BoxFuture<'a, StorageResult<SaveOutcome>> {
    Box::pin(async move {
        let key = plan.id.to_string();
        match primary.save(&key, plan).await {
            Ok(()) => Ok(SaveOutcome::Persisted),
            Err(StorageError::QuotaExceeded) => {
                warn!("storage quota exceeded, keeping project {key} in memory only");
                fallback.save(&key, plan).await?;
                Ok(SaveOutcome::MemoryOnly)
            }
            Err(e) => Err(e),
        }
    })
}

pub struct Editor {
    plan: Plan,
    history: History,
    controller: InteractionController,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    /// Fresh editor seeded with the starter plan.
    pub fn new() -> Self {
        Self::with_plan(Plan::starter("My Floor Plan"))
    }

    /// Editor over an existing plan, with a fresh history.
    pub fn with_plan(plan: Plan) -> Self {
        let history = History::new(plan.clone());
        Self {
            plan,
            history,
            controller: InteractionController::new(),
        }
    }

    pub fn plan(&self) -> &Plan {
        &self.plan
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // Pointer events ---------------------------------------------------

    pub fn pointer_down(&mut self, pointer: Point, mods: Modifiers) {
        self.controller.pointer_down(&mut self.plan, pointer, mods);
    }

    pub fn pointer_move(&mut self, pointer: Point, mods: Modifiers) {
        self.controller.pointer_move(&mut self.plan, pointer, mods);
    }

    /// Returns whether the gesture committed a history entry.
    pub fn pointer_up(&mut self) -> bool {
        self.controller.pointer_up(&self.plan, &mut self.history)
    }

    pub fn cancel_gesture(&mut self) {
        self.controller.cancel_gesture(&mut self.plan);
    }

    // Discrete actions -------------------------------------------------

    /// Apply an arbitrary mutation as one undoable step. No entry is
    /// pushed when the closure leaves the plan unchanged.
    pub fn commit<F: FnOnce(&mut Plan)>(&mut self, f: F) -> bool {
        let before = self.plan.clone();
        f(&mut self.plan);
        if self.plan == before {
            return false;
        }
        self.history.push(self.plan.clone());
        true
    }

    pub fn add_room(&mut self) -> EntityId {
        let room = Room::new("Room", 100.0, 100.0, 160.0, 120.0);
        let id = room.id;
        self.commit(|plan| {
            plan.add_room(room);
            plan.select(Some(id));
        });
        id
    }

    pub fn add_feature(&mut self, kind: FeatureKind) -> EntityId {
        let feature = Feature::new(kind, 250.0, 250.0);
        let id = feature.id;
        self.commit(|plan| {
            plan.add_feature(feature);
            plan.select(Some(id));
        });
        id
    }

    /// Place a safety marker at the canvas center.
    pub fn add_exit_marker(&mut self, kind: MarkerKind) -> EntityId {
        let center = self.plan.canvas_center();
        let marker = ExitMarker::new(kind, center.x, center.y);
        let id = marker.id;
        self.commit(|plan| {
            plan.add_exit(marker);
            plan.select(Some(id));
        });
        id
    }

    /// Delete the selected entity, if any. Returns whether one was removed.
    pub fn delete_selected(&mut self) -> bool {
        let Some(id) = self.plan.selected_id else {
            return false;
        };
        self.commit(|plan| {
            plan.remove_entity(id);
        })
    }

    pub fn rotate_plan(&mut self) {
        self.commit(Plan::rotate_quarter_turn);
    }

    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        self.commit(|plan| plan.set_canvas_size(width, height));
    }

    // Route drafting ---------------------------------------------------

    pub fn begin_route(&mut self) {
        self.controller.cancel_route();
        self.plan.mode = Mode::Route;
    }

    pub fn finish_route(&mut self) -> bool {
        self.controller.finish_route(&mut self.plan, &mut self.history)
    }

    pub fn cancel_route(&mut self) {
        self.controller.cancel_route();
        self.plan.mode = Mode::Safety;
    }

    // Non-undoable state -----------------------------------------------

    pub fn set_mode(&mut self, mode: Mode) {
        self.plan.mode = mode;
    }

    pub fn select(&mut self, id: Option<EntityId>) {
        self.plan.select(id);
    }

    // History ----------------------------------------------------------

    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(snapshot) => {
                self.plan = snapshot.clone();
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(snapshot) => {
                self.plan = snapshot.clone();
                true
            }
            None => false,
        }
    }

    /// Install a loaded plan; history restarts at this state.
    pub fn load_plan(&mut self, plan: Plan) {
        self.plan = plan;
        self.history.reset(self.plan.clone());
        self.controller.cancel_route();
    }

    /// Discard everything and start over from the factory state.
    pub fn new_project(&mut self) {
        self.load_plan(Plan::starter("My Floor Plan"));
    }

    // Collaborators ----------------------------------------------------

    /// Fold an analysis result into the plan. Detected rooms arrive as new
    /// entities in one undoable step; narrative text is handed back for the
    /// shell to display.
    pub fn apply_analysis(&mut self, output: AnalysisOutput) -> Option<String> {
        match output {
            AnalysisOutput::Text(text) => Some(text),
            AnalysisOutput::Rooms(detected) => {
                self.merge_detected_rooms(detected);
                None
            }
        }
    }

    pub fn merge_detected_rooms(&mut self, detected: Vec<DetectedRoom>) -> usize {
        if detected.is_empty() {
            return 0;
        }
        let mut count = 0;
        self.commit(|plan| {
            count = analysis::merge_detected_rooms(plan, detected).len();
        });
        count
    }

    pub fn save<'a>(
        &'a self,
        primary: &'a dyn Storage,
        fallback: &'a dyn Storage,
    ) -> BoxFuture<'a, StorageResult<SaveOutcome>> {
        save_with_fallback(&self.plan, primary, fallback)
    }
}
