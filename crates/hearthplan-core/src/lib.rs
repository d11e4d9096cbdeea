//! Hearthplan Core Library
//!
//! Platform-agnostic data structures and interaction logic for the
//! Hearthplan floor-plan editor: the geometry kernel, the entity model, the
//! snap engine, the pointer gesture state machine, and the undo/redo
//! history.

pub mod analysis;
pub mod catalog;
pub mod editor;
pub mod entities;
pub mod geometry;
pub mod history;
pub mod interaction;
pub mod plan;
pub mod render;
pub mod snap;
pub mod storage;

pub use analysis::{AnalysisError, AnalysisOutput, DetectedRoom, PlanAnalyzer};
pub use editor::{Editor, SaveOutcome};
pub use entities::{
    EntityId, ExitMarker, Feature, FeatureKind, LabelStyle, MarkerKind, RgbaColor, Room, Route,
};
pub use geometry::Frame;
pub use history::{History, MAX_HISTORY};
pub use interaction::{Gesture, InteractionController, Modifiers, ROTATE_HANDLE_OFFSET};
pub use plan::{Mode, Plan, PlanDetails, PlanFormatError};
pub use snap::{DragSnap, ResizeSnap, SNAP_THRESHOLD, snap_drag_origin, snap_resize_width};
pub use storage::{BoxFuture, MemoryStorage, Storage, StorageError, StorageResult};

#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStorage;
