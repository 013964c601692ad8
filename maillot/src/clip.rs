//! Segment clipping against the window (Cohen–Sutherland).
//!
//! This is the HOT PATH - every polygon edge goes through `clip_segment`.

use tracing::trace;

use crate::error::ClipError;
use crate::geometry::{Line, Point, Rect};
use crate::region::{Boundary, RegionCode};

/// Determinants at or below this magnitude mean the lines are parallel.
pub const PARALLEL_EPSILON: f64 = 1e-6;

/// Each endpoint can be moved onto at most one vertical and one horizontal
/// boundary before the segment is accepted or rejected.
const MAX_CLIP_STEPS: usize = 8;

// ============================================================================
// LINE-LINE INTERSECTION
// ============================================================================

/// Intersect the infinite line through `g1`,`g2` with the one through `t1`,`t2`.
///
/// Each line is written in implicit form `a·x + b·y = c` and the 2×2 system
/// is solved by Cramer's rule.
pub fn line_intersection(g1: Point, g2: Point, t1: Point, t2: Point) -> Result<Point, ClipError> {
    let a1 = g2.y - g1.y;
    let b1 = g1.x - g2.x;
    let c1 = a1 * g1.x + b1 * g1.y;

    let a2 = t2.y - t1.y;
    let b2 = t1.x - t2.x;
    let c2 = a2 * t1.x + b2 * t1.y;

    let det = a1 * b2 - a2 * b1;

    if det.abs() <= PARALLEL_EPSILON {
        return Err(ClipError::DegenerateIntersection {
            segment: Line::from_points(g1, g2),
            boundary: Line::from_points(t1, t2),
        });
    }

    let x = (b2 * c1 - b1 * c2) / det;
    let y = (c2 * a1 - c1 * a2) / det;

    // Huge but finite inputs can overflow `c1`/`c2` and poison the result
    if !x.is_finite() || !y.is_finite() {
        return Err(ClipError::DegenerateIntersection {
            segment: Line::from_points(g1, g2),
            boundary: Line::from_points(t1, t2),
        });
    }

    Ok(Point::new(x, y))
}

/// Move the outside endpoint of `g1`-`g2` onto `boundary`.
fn clip_to_boundary(g1: Point, g2: Point, rect: &Rect, boundary: Boundary) -> Result<Point, ClipError> {
    let edge = rect.boundary_line(boundary);
    let mut p = line_intersection(g1, g2, edge.start(), edge.end())?;

    // Sit exactly on the boundary so the bit we just cleared stays cleared
    match boundary {
        Boundary::Left => p.x = rect.xmin,
        Boundary::Right => p.x = rect.xmax,
        Boundary::Bottom => p.y = rect.ymin,
        Boundary::Top => p.y = rect.ymax,
    }

    trace!(?boundary, x = p.x, y = p.y, "clipped endpoint");
    Ok(p)
}

// ============================================================================
// SEGMENT CLIPPING
// ============================================================================

/// Clip the directed segment `g1`-`g2` to `rect`.
///
/// Returns `Ok(None)` when no part of the segment is inside the window.
/// Endpoints that were already inside are returned unchanged.
///
/// ## Rust Lesson #5: Result<Option<T>, E>
///
/// Three outcomes, all explicit: `Ok(Some(..))` = clipped segment,
/// `Ok(None)` = nothing visible, `Err(..)` = we couldn't compute it.
pub fn clip_segment(g1: Point, g2: Point, rect: &Rect) -> Result<Option<(Point, Point)>, ClipError> {
    let (mut g1, mut g2) = (g1, g2);
    let mut g1_code = RegionCode::of(g1, rect).boundaries();
    let mut g2_code = RegionCode::of(g2, rect).boundaries();

    for _ in 0..MAX_CLIP_STEPS {
        if g1_code.is_inside() && g2_code.is_inside() {
            return Ok(Some((g1, g2)));
        }
        if g1_code.shares_boundary(g2_code) {
            return Ok(None);
        }

        // `first_boundary` is Some for any non-zero code
        if let Some(boundary) = g1_code.first_boundary() {
            g1 = clip_to_boundary(g1, g2, rect, boundary)?;
            g1_code = RegionCode::of(g1, rect).boundaries();
        } else if let Some(boundary) = g2_code.first_boundary() {
            g2 = clip_to_boundary(g1, g2, rect, boundary)?;
            g2_code = RegionCode::of(g2, rect).boundaries();
        }
    }

    // Only reachable when rounding keeps the segment grazing a corner
    trace!(?g1, ?g2, "segment did not settle, rejecting");
    Ok(None)
}

// ============================================================================
// TESTS
// ============================================================================
