//! Render-facing geometry: outline paths, grid lines, label anchors, and
//! dimension text.
//!
//! No drawing happens here. The shell (SVG, canvas, GPU) consumes these
//! primitives however it likes.

use kurbo::{BezPath, Point};

use crate::entities::{EntityId, Route};
use crate::geometry::Frame;
use crate::interaction;
use crate::plan::Plan;

/// Closed outline of a rotated rectangle.
pub fn outline_path(frame: &Frame) -> BezPath {
    let corners = frame.corners();
    let mut path = BezPath::new();
    path.move_to(corners[0]);
    for corner in &corners[1..] {
        path.line_to(*corner);
    }
    path.close_path();
    path
}

/// Open polyline for a committed route or an in-progress draft.
pub fn polyline_path(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    if let Some((first, rest)) = points.split_first() {
        path.move_to(*first);
        for p in rest {
            path.line_to(*p);
        }
    }
    path
}

pub fn route_path(route: &Route) -> BezPath {
    polyline_path(&route.points)
}

/// Grid lines across the canvas, as (from, to) segment pairs.
pub fn grid_segments(plan: &Plan) -> Vec<(Point, Point)> {
    let mut segments = Vec::new();
    if plan.grid_size <= 0.0 {
        return segments;
    }
    let mut x = 0.0;
    while x <= plan.canvas_width {
        segments.push((Point::new(x, 0.0), Point::new(x, plan.canvas_height)));
        x += plan.grid_size;
    }
    let mut y = 0.0;
    while y <= plan.canvas_height {
        segments.push((Point::new(0.0, y), Point::new(plan.canvas_width, y)));
        y += plan.grid_size;
    }
    segments
}

/// World-space corners of a rectangular entity, if it has any.
pub fn entity_corners(plan: &Plan, id: EntityId) -> Option<[Point; 4]> {
    plan.entity_frame(id).map(|f| f.corners())
}

/// World-space label anchor for any labelled entity.
pub fn label_anchor(plan: &Plan, id: EntityId) -> Option<Point> {
    interaction::label_anchor_world(plan, id)
}

/// Dimension callouts for a rectangular entity: text and its anchor point,
/// placed at the midpoint of the top and right edges.
pub fn dimension_labels(plan: &Plan, frame: &Frame) -> [(Point, String); 2] {
    let top_mid = frame.local_to_world(frame.width / 2.0, -6.0);
    let right_mid = frame.local_to_world(frame.width + 6.0, frame.height / 2.0);
    [
        (top_mid, plan.format_dimension(frame.width)),
        (right_mid, plan.format_dimension(frame.height)),
    ]
}
