//! Contract with the external plan-analysis service.
//!
//! The service receives a read-only snapshot of the entity data and answers
//! either with narrative text or with a structured list of detected room
//! rectangles. Failures never touch the document; detected rooms are merged
//! as brand-new entities.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::entities::{EntityId, Room};
use crate::plan::Plan;
use crate::storage::BoxFuture;

/// A room rectangle proposed by the analysis service. Every field is
/// optional; defaults are substituted on merge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedRoom {
    pub name: Option<String>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

/// Either narrative feedback or structured detections.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutput {
    Text(String),
    Rooms(Vec<DetectedRoom>),
}

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("analysis service unavailable: {0}")]
    Unavailable(String),
    #[error("analysis response was malformed: {0}")]
    MalformedResponse(String),
}

/// Boundary trait for the analysis collaborator. Implementations live
/// outside the core (HTTP client, test stub).
pub trait PlanAnalyzer: Send + Sync {
    fn analyze<'a>(&'a self, plan: &'a Plan) -> BoxFuture<'a, Result<AnalysisOutput, AnalysisError>>;
}

const DEFAULT_DETECTED_SIZE: (f64, f64) = (160.0, 120.0);

/// Merge detected rooms into the plan as new entities with fresh ids.
/// Missing fields fall back to defaults; existing entities are never
/// touched. Returns the ids of the rooms that were added.
pub fn merge_detected_rooms(plan: &mut Plan, detected: Vec<DetectedRoom>) -> Vec<EntityId> {
    let mut added = Vec::with_capacity(detected.len());
    for (i, d) in detected.into_iter().enumerate() {
        let name = d.name.unwrap_or_else(|| format!("Room {}", plan.rooms.len() + 1));
        // Stagger unplaced rooms so they do not stack exactly.
        let fallback = 100.0 + 20.0 * i as f64;
        let room = Room::new(
            name,
            d.x.unwrap_or(fallback),
            d.y.unwrap_or(fallback),
            d.width.unwrap_or(DEFAULT_DETECTED_SIZE.0),
            d.height.unwrap_or(DEFAULT_DETECTED_SIZE.1),
        );
        added.push(plan.add_room(room));
    }
    added
}
