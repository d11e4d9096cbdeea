//! Rooms: the named rectangular spaces of the plan.

use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{EntityId, LabelStyle, RgbaColor};
use crate::geometry::Frame;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: EntityId,
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Degrees, clockwise, `[0, 360)`.
    #[serde(default)]
    pub rotation: f64,
    pub color: RgbaColor,
    #[serde(flatten)]
    pub label: LabelStyle,
}

impl Room {
    pub fn new(name: impl Into<String>, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            x,
            y,
            width,
            height,
            rotation: 0.0,
            color: RgbaColor::white(),
            label: LabelStyle::default(),
        }
    }

    pub fn frame(&self) -> Frame {
        Frame::new(self.x, self.y, self.width, self.height, self.rotation)
    }

    pub fn set_frame(&mut self, frame: Frame) {
        self.x = frame.x;
        self.y = frame.y;
        self.width = frame.width;
        self.height = frame.height;
        self.rotation = frame.rotation;
    }

    /// Default anchor of the name label, in local coordinates: just inside
    /// the top-left corner.
    pub fn label_anchor_local(&self) -> Point {
        let (dx, dy) = self.label.offset();
        Point::new(8.0 + dx, 18.0 + dy)
    }
}
