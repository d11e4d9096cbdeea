//! Placed fixtures: doors, windows, furniture, structural elements.

use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{EntityId, LabelStyle};
use crate::catalog;
use crate::geometry::Frame;

/// The closed fixture catalog. Serialized in kebab-case to match the saved
/// project format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FeatureKind {
    Door,
    SlidingDoor,
    ClosetDoor,
    Window,
    Stairs,
    ClosetUnit,
    ClosetDouble,
    SingleBed,
    DoubleBed,
    Shower,
    Bathtub,
    SinkSingle,
    SinkDouble,
    VanitySingle,
    VanityDouble,
    Toilet,
    Sofa,
    Table,
    Desk,
    Balcony,
    Entry,
    Garden,
    Driveway,
    Hallway,
    Pantry,
    Linen,
    KitchenIsland,
    Fridge,
    Dishwasher,
    Range,
    WasherDryer,
    WaterHeater,
    ElecPanel,
    Fireplace,
    Wall,
    Fence,
    Bathroom,
    Label,
}

impl FeatureKind {
    pub const ALL: [FeatureKind; 38] = [
        FeatureKind::Door,
        FeatureKind::SlidingDoor,
        FeatureKind::ClosetDoor,
        FeatureKind::Window,
        FeatureKind::Stairs,
        FeatureKind::ClosetUnit,
        FeatureKind::ClosetDouble,
        FeatureKind::SingleBed,
        FeatureKind::DoubleBed,
        FeatureKind::Shower,
        FeatureKind::Bathtub,
        FeatureKind::SinkSingle,
        FeatureKind::SinkDouble,
        FeatureKind::VanitySingle,
        FeatureKind::VanityDouble,
        FeatureKind::Toilet,
        FeatureKind::Sofa,
        FeatureKind::Table,
        FeatureKind::Desk,
        FeatureKind::Balcony,
        FeatureKind::Entry,
        FeatureKind::Garden,
        FeatureKind::Driveway,
        FeatureKind::Hallway,
        FeatureKind::Pantry,
        FeatureKind::Linen,
        FeatureKind::KitchenIsland,
        FeatureKind::Fridge,
        FeatureKind::Dishwasher,
        FeatureKind::Range,
        FeatureKind::WasherDryer,
        FeatureKind::WaterHeater,
        FeatureKind::ElecPanel,
        FeatureKind::Fireplace,
        FeatureKind::Wall,
        FeatureKind::Fence,
        FeatureKind::Bathroom,
        FeatureKind::Label,
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    pub id: EntityId,
    #[serde(rename = "type")]
    pub kind: FeatureKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub rotation: f64,
    pub label: String,
    #[serde(flatten)]
    pub label_style: LabelStyle,
}

impl Feature {
    /// Place a feature of `kind` with its catalog default size, anchored so
    /// the given point is its top-left corner.
    pub fn new(kind: FeatureKind, x: f64, y: f64) -> Self {
        let (width, height) = catalog::default_size(kind);
        Self {
            id: Uuid::new_v4(),
            kind,
            x,
            y,
            width,
            height,
            rotation: 0.0,
            label: catalog::default_label(kind).to_string(),
            label_style: LabelStyle::default(),
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

    /// Resize keeps the thickness of thin linear features (walls, fences,
    /// windows, door tracks); only their length follows the pointer.
    pub fn fixed_thickness(&self) -> bool {
        catalog::has_fixed_thickness(self.kind)
    }

    /// Default label anchor in local coordinates: centered just below the
    /// bottom edge.
    pub fn label_anchor_local(&self) -> Point {
        let (dx, dy) = self.label_style.offset();
        Point::new(self.width / 2.0 + dx, self.height + 11.0 + dy)
    }
}
