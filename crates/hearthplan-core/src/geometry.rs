//! Rotated-rectangle math shared by snapping, hit-testing and gestures.
//!
//! Every rectangular entity on the canvas is described by a [`Frame`]: an
//! unrotated top-left anchor, an extent along the local axes, and a clockwise
//! rotation in degrees applied around the frame's center. All functions here
//! are pure; the interaction and snap layers round-trip points through them,
//! so `world_to_local(local_to_world(p)) == p` must hold to floating-point
//! precision.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Placement of a rectangular entity: unrotated top-left anchor, extent, and
/// clockwise rotation in degrees around the center `(x + w/2, y + h/2)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Degrees, clockwise (screen space is y-down), in `[0, 360)`.
    pub rotation: f64,
}

impl Frame {
    pub fn new(x: f64, y: f64, width: f64, height: f64, rotation: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            rotation: wrap_degrees(rotation),
        }
    }

    /// Rotation pivot: the center of the unrotated rectangle.
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// The four corners in world space, in TL, TR, BR, BL order.
    ///
    /// The order is stable across calls; object snapping relies on that to
    /// keep its corner/target pairing consistent during a drag.
    pub fn corners(&self) -> [Point; 4] {
        let c = self.center();
        let (hw, hh) = (self.width / 2.0, self.height / 2.0);
        let offsets = [(-hw, -hh), (hw, -hh), (hw, hh), (-hw, hh)];
        let theta = self.rotation.to_radians();
        let (sin, cos) = theta.sin_cos();
        offsets.map(|(dx, dy)| Point::new(c.x + dx * cos - dy * sin, c.y + dx * sin + dy * cos))
    }

    /// Map a point in the frame's unrotated local space (origin at the
    /// top-left corner) into world space.
    pub fn local_to_world(&self, lx: f64, ly: f64) -> Point {
        let c = self.center();
        let dx = lx - self.width / 2.0;
        let dy = ly - self.height / 2.0;
        let theta = self.rotation.to_radians();
        let (sin, cos) = theta.sin_cos();
        Point::new(c.x + dx * cos - dy * sin, c.y + dx * sin + dy * cos)
    }

    /// Inverse of [`Frame::local_to_world`].
    pub fn world_to_local(&self, world: Point) -> Point {
        let c = self.center();
        let dx = world.x - c.x;
        let dy = world.y - c.y;
        let theta = (-self.rotation).to_radians();
        let (sin, cos) = theta.sin_cos();
        Point::new(
            dx * cos - dy * sin + self.width / 2.0,
            dx * sin + dy * cos + self.height / 2.0,
        )
    }

    /// Hit test in world space: inside the rotated rectangle, inflated by
    /// `tolerance` on every side.
    pub fn contains(&self, world: Point, tolerance: f64) -> bool {
        let local = self.world_to_local(world);
        local.x >= -tolerance
            && local.x <= self.width + tolerance
            && local.y >= -tolerance
            && local.y <= self.height + tolerance
    }
}

/// Euclidean distance between two world-space points.
pub fn distance(a: Point, b: Point) -> f64 {
    ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
}

/// Wrap an angle in degrees into `[0, 360)`.
pub fn wrap_degrees(degrees: f64) -> f64 {
    degrees.rem_euclid(360.0)
}

/// Rotate a point clockwise around a pivot by `degrees`.
pub fn rotate_about(point: Point, pivot: Point, degrees: f64) -> Point {
    let theta = degrees.to_radians();
    let (sin, cos) = theta.sin_cos();
    let dx = point.x - pivot.x;
    let dy = point.y - pivot.y;
    Point::new(pivot.x + dx * cos - dy * sin, pivot.y + dx * sin + dy * cos)
}

/// Rotate a vector expressed as `(dx, dy)` by `degrees` (clockwise).
///
/// Used to carry pointer deltas into an entity's unrotated local space by
/// passing the negated rotation.
pub fn rotate_vector(dx: f64, dy: f64, degrees: f64) -> (f64, f64) {
    let theta = degrees.to_radians();
    let (sin, cos) = theta.sin_cos();
    (dx * cos - dy * sin, dx * sin + dy * cos)
}

/// Minimum distance from a point to a polyline (sequence of segments).
pub fn point_to_polyline_dist(point: Point, points: &[Point]) -> f64 {
    points
        .windows(2)
        .map(|w| point_to_segment_dist(point, w[0], w[1]))
        .fold(f64::INFINITY, f64::min)
}

/// Distance from a point to a line segment (a->b).
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = kurbo::Vec2::new(b.x - a.x, b.y - a.y);
    let pv = kurbo::Vec2::new(point.x - a.x, point.y - a.y);
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = Point::new(a.x + t * seg.x, a.y + t * seg.y);
    distance(point, proj)
}
