//! Default placement data for the fixture and marker catalogs.

use crate::entities::{FeatureKind, MarkerKind};

/// Default width and height, in canvas pixels, for a freshly placed feature.
pub fn default_size(kind: FeatureKind) -> (f64, f64) {
    use FeatureKind::*;
    match kind {
        Door => (40.0, 40.0),
        SlidingDoor => (80.0, 10.0),
        ClosetDoor => (60.0, 10.0),
        Window => (60.0, 10.0),
        Stairs => (60.0, 120.0),
        ClosetUnit => (80.0, 40.0),
        ClosetDouble => (120.0, 40.0),
        SingleBed => (50.0, 90.0),
        DoubleBed => (90.0, 100.0),
        Shower => (60.0, 60.0),
        Bathtub => (120.0, 60.0),
        SinkSingle => (30.0, 30.0),
        SinkDouble => (60.0, 30.0),
        VanitySingle => (60.0, 40.0),
        VanityDouble => (120.0, 40.0),
        Toilet => (30.0, 45.0),
        Sofa => (120.0, 60.0),
        Table => (80.0, 80.0),
        Desk => (80.0, 45.0),
        Balcony => (200.0, 60.0),
        Entry => (60.0, 40.0),
        Garden => (300.0, 200.0),
        Driveway => (100.0, 300.0),
        Hallway => (40.0, 200.0),
        Pantry => (40.0, 40.0),
        Linen => (40.0, 20.0),
        KitchenIsland => (100.0, 50.0),
        Fridge => (40.0, 40.0),
        Dishwasher => (30.0, 30.0),
        Range => (40.0, 40.0),
        WasherDryer => (60.0, 35.0),
        WaterHeater => (30.0, 30.0),
        ElecPanel => (30.0, 10.0),
        Fireplace => (80.0, 30.0),
        Wall => (200.0, 6.0),
        Fence => (200.0, 6.0),
        Bathroom => (100.0, 80.0),
        Label => (60.0, 20.0),
    }
}

/// Thin linear features keep their thickness during resize; only their length
/// follows the pointer.
pub fn has_fixed_thickness(kind: FeatureKind) -> bool {
    matches!(
        kind,
        FeatureKind::Wall
            | FeatureKind::Fence
            | FeatureKind::Window
            | FeatureKind::SlidingDoor
            | FeatureKind::ClosetDoor
    )
}

/// Human-readable default label for a placed feature.
pub fn default_label(kind: FeatureKind) -> &'static str {
    use FeatureKind::*;
    match kind {
        Door => "Door",
        SlidingDoor => "Sliding Door",
        ClosetDoor => "Closet Door",
        Window => "Window",
        Stairs => "Stairs",
        ClosetUnit => "Closet",
        ClosetDouble => "Double Closet",
        SingleBed => "Single Bed",
        DoubleBed => "Double Bed",
        Shower => "Shower",
        Bathtub => "Bathtub",
        SinkSingle => "Sink",
        SinkDouble => "Double Sink",
        VanitySingle => "Vanity",
        VanityDouble => "Double Vanity",
        Toilet => "Toilet",
        Sofa => "Sofa",
        Table => "Table",
        Desk => "Desk",
        Balcony => "Balcony",
        Entry => "Entry",
        Garden => "Garden",
        Driveway => "Driveway",
        Hallway => "Hallway",
        Pantry => "Pantry",
        Linen => "Linen",
        KitchenIsland => "Kitchen Island",
        Fridge => "Fridge",
        Dishwasher => "Dishwasher",
        Range => "Range",
        WasherDryer => "Washer/Dryer",
        WaterHeater => "Water Heater",
        ElecPanel => "Electrical Panel",
        Fireplace => "Fireplace",
        Wall => "Wall",
        Fence => "Fence",
        Bathroom => "Bathroom",
        Label => "Label",
    }
}

/// Default label for a freshly placed safety marker.
pub fn default_marker_label(kind: MarkerKind) -> &'static str {
    match kind {
        MarkerKind::Primary => "Primary Exit",
        MarkerKind::Secondary => "Secondary Exit",
        MarkerKind::Extinguisher => "Extinguisher",
        MarkerKind::FireAlarm => "Fire Alarm",
        MarkerKind::FirstAid => "First Aid",
    }
}
