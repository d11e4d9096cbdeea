//! Evacuation routes: committed polylines drawn in route mode.

use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{EntityId, RgbaColor};
use crate::geometry::point_to_polyline_dist;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub id: EntityId,
    /// At least two points once committed to the plan.
    pub points: Vec<Point>,
    pub color: RgbaColor,
}

impl Route {
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            id: Uuid::new_v4(),
            points,
            color: RgbaColor::route_red(),
        }
    }

    /// Distance from a world point to the nearest segment of the route.
    pub fn distance_to(&self, point: Point) -> f64 {
        point_to_polyline_dist(point, &self.points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_route_is_red() {
        let r = Route::new(vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)]);
        assert_eq!(r.color.to_hex(), "#ef4444");
    }

    #[test]
    fn distance_to_segment() {
        let r = Route::new(vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0)]);
        assert!((r.distance_to(Point::new(50.0, 8.0)) - 8.0).abs() < 1e-9);
    }
}
