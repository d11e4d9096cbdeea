//! Safety markers: exits and emergency equipment, placed at a point.

use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{EntityId, LabelStyle};
use crate::catalog;
use crate::geometry::wrap_degrees;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarkerKind {
    Primary,
    Secondary,
    Extinguisher,
    FireAlarm,
    FirstAid,
}

/// A point entity with no extent; rotation pivots on the point itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExitMarker {
    pub id: EntityId,
    #[serde(rename = "type")]
    pub kind: MarkerKind,
    pub x: f64,
    pub y: f64,
    pub label: String,
    #[serde(default)]
    pub rotation: f64,
    #[serde(flatten)]
    pub label_style: LabelStyle,
}

impl ExitMarker {
    pub fn new(kind: MarkerKind, x: f64, y: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            x,
            y,
            label: catalog::default_marker_label(kind).to_string(),
            rotation: 0.0,
            label_style: LabelStyle::default(),
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn set_position(&mut self, p: Point) {
        self.x = p.x;
        self.y = p.y;
    }

    pub fn set_rotation(&mut self, degrees: f64) {
        self.rotation = wrap_degrees(degrees);
    }

    /// Default label anchor relative to the marker point, before rotation.
    pub fn label_anchor_local(&self) -> Point {
        let (dx, dy) = self.label_style.offset();
        Point::new(dx, 30.0 + dy)
    }
}
