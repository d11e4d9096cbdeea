//! Object snapping: pulls a dragged or resized entity into exact alignment
//! with another entity's corner.
//!
//! Pure functions over candidate values and a flat list of world-space
//! target points; the interaction layer collects targets, applies the
//! results, and owns the transient indicator lifetime.

use kurbo::Point;

use crate::entities::EntityId;
use crate::geometry::Frame;
use crate::plan::Plan;

/// Snap activates when the best candidate lies within this many pixels.
pub const SNAP_THRESHOLD: f64 = 15.0;

/// Outcome of drag snapping: the (possibly corrected) origin plus the target
/// point to highlight, if any.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSnap {
    pub origin: Point,
    pub indicator: Option<Point>,
}

/// Outcome of resize-width snapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeSnap {
    pub width: f64,
    pub indicator: Option<Point>,
}

/// World-space snap targets: the corners of every room and feature plus
/// every marker point, excluding the entity being manipulated.
pub fn collect_targets(plan: &Plan, exclude: EntityId) -> Vec<Point> {
    let mut targets = Vec::new();
    for room in &plan.rooms {
        if room.id != exclude {
            targets.extend(room.frame().corners());
        }
    }
    for feature in &plan.features {
        if feature.id != exclude {
            targets.extend(feature.frame().corners());
        }
    }
    for exit in &plan.exits {
        if exit.id != exclude {
            targets.push(exit.position());
        }
    }
    targets
}

/// Drag snapping. `frame` carries the dragged entity's extent and rotation
/// (its position is ignored); `candidate` is the grid-snapped origin the
/// pointer proposes.
///
/// Each of the entity's corners, computed as if the entity sat at the
/// origin, is a fixed offset from the origin. For a corner to land exactly
/// on a target the origin must be `target - offset`; the closest such
/// origin across all (corner, target) pairs wins if it is within
/// [`SNAP_THRESHOLD`] of the candidate.
pub fn snap_drag_origin(frame: &Frame, candidate: Point, targets: &[Point]) -> DragSnap {
    let at_origin = Frame::new(0.0, 0.0, frame.width, frame.height, frame.rotation);
    let offsets = at_origin.corners();

    let mut best_dist = f64::INFINITY;
    let mut best: Option<(Point, Point)> = None;
    for offset in offsets {
        for &target in targets {
            let needed = Point::new(target.x - offset.x, target.y - offset.y);
            let dist = crate::geometry::distance(candidate, needed);
            if dist < best_dist {
                best_dist = dist;
                best = Some((needed, target));
            }
        }
    }

    match best {
        Some((origin, indicator)) if best_dist < SNAP_THRESHOLD => DragSnap {
            origin,
            indicator: Some(indicator),
        },
        _ => DragSnap {
            origin: candidate,
            indicator: None,
        },
    }
}

/// Resize-width snapping for the width-extension handle.
///
/// `frame` is the entity under its candidate new dimensions. The handle
/// tracks the local end point `(width, height/2)`; a target within
/// threshold of that point, and roughly collinear with the entity's
/// center-line, donates its local x-coordinate as the new width.
pub fn snap_resize_width(frame: &Frame, targets: &[Point]) -> ResizeSnap {
    let end = frame.local_to_world(frame.width, frame.height / 2.0);
    let collinear_tolerance = frame.height.max(SNAP_THRESHOLD);

    let mut best_dist = f64::INFINITY;
    let mut best: Option<(f64, Point)> = None;
    for &target in targets {
        let dist = crate::geometry::distance(end, target);
        if dist >= SNAP_THRESHOLD || dist >= best_dist {
            continue;
        }
        let local = frame.world_to_local(target);
        if (local.y - frame.height / 2.0).abs() <= collinear_tolerance && local.x > 0.0 {
            best_dist = dist;
            best = Some((local.x, target));
        }
    }

    match best {
        Some((width, indicator)) => ResizeSnap {
            width,
            indicator: Some(indicator),
        },
        None => ResizeSnap {
            width: frame.width,
            indicator: None,
        },
    }
}
