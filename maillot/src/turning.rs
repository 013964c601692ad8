//! Turning points: window corners that keep the clipped boundary closed.
//!
//! When an edge runs around the outside of the window, plain segment
//! clipping drops it entirely. If the edge goes from one side of the window
//! to another, the clipped polygon has to follow the window border through
//! the corner in between. This module decides which corner that is.

use tracing::debug;

use crate::error::ClipError;
use crate::geometry::{Corner, Point, Rect};
use crate::region::{Boundary, RegionCode};

/// Outcome of resolving an edge that missed the window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    /// Corner to emit right away.
    pub corner: Option<Point>,
    /// Code handed to the basic turning-point test.
    pub code: RegionCode,
}

/// Offset that moves a corner code next to the side region of `side`.
///
/// Adding `offset(side)` to a corner code that does not touch `side`
/// lands on the corner formed by `side` and the corner's other axis.
pub fn offset(side: Boundary) -> i8 {
    match side {
        Boundary::Right => -3,
        Boundary::Top => -6,
        Boundary::Left => 3,
        Boundary::Bottom => 6,
    }
}

impl Corner {
    /// Corner for a two-boundary region code. The corner flag is ignored.
    ///
    /// Only RIGHT|TOP, TOP|LEFT, RIGHT|BOTTOM and LEFT|BOTTOM name a
    /// corner; anything else means the caller built an impossible code.
    pub fn from_code(code: RegionCode) -> Result<Corner, ClipError> {
        match code.boundaries().bits() {
            3 => Ok(Corner::TopRight),
            6 => Ok(Corner::TopLeft),
            9 => Ok(Corner::BottomRight),
            12 => Ok(Corner::BottomLeft),
            _ => Err(ClipError::UnresolvedCorner { code: code.bits() }),
        }
    }
}

/// Basic turning-point test, run for every edge.
///
/// If `code` is a corner code, the matching window corner is needed.
pub fn turning_point(code: RegionCode, rect: &Rect) -> Result<Option<Point>, ClipError> {
    if !code.is_corner() {
        return Ok(None);
    }
    let corner = Corner::from_code(code)?;
    Ok(Some(rect.corner(corner)))
}

/// Turning point for an edge between two opposite corner regions.
///
/// The two window diagonals split the plane into four wedges, one per
/// window corner. "Left" is strict, so points on a diagonal count as
/// being on its right.
pub fn corner_between_corners(start: Point, end: Point, rect: &Rect) -> Point {
    let anti = rect.anti_diagonal();
    let start_left = anti.is_point_left(start);
    let end_left = anti.is_point_left(end);

    let corner = if start_left && end_left {
        Corner::BottomLeft
    } else if !start_left && !end_left {
        Corner::TopRight
    } else if rect.diagonal().is_point_left(start) {
        Corner::TopLeft
    } else {
        Corner::BottomRight
    };

    rect.corner(corner)
}

/// Resolve an edge `start` -> `end` that `clip_segment` rejected.
///
/// `start_code` and `end_code` are the full codes, corner flag included.
///
/// | start  | end    | when               | result                       |
/// |--------|--------|--------------------|------------------------------|
/// | corner | corner | no shared boundary | diagonal test corner         |
/// | side   | corner | disjoint           | corner of end + offset(start)|
/// | corner | side   | disjoint           | code := start + offset(end)  |
/// | side   | side   | different sides    | code := start \| end \| TWO  |
pub fn resolve(
    start: Point,
    end: Point,
    start_code: RegionCode,
    end_code: RegionCode,
    rect: &Rect,
) -> Result<Resolution, ClipError> {
    let disjoint = (start_code & end_code).is_inside();
    let mut resolution = Resolution { corner: None, code: end_code };

    match (start_code.single_boundary(), end_code.single_boundary()) {
        // 2-2
        (None, None) if start_code.is_corner() && end_code.is_corner() => {
            if !start_code.shares_boundary(end_code) {
                let corner = corner_between_corners(start, end, rect);
                debug!(?start, ?end, ?corner, "2-2 turning point");
                resolution.corner = Some(corner);
            }
        }
        // 1-2
        (Some(side), None) if end_code.is_corner() && disjoint => {
            let combined = end_code.offset_by(offset(side));
            let corner = rect.corner(Corner::from_code(combined)?);
            debug!(?start, ?end, ?corner, "1-2 turning point");
            resolution.corner = Some(corner);
        }
        // 2-1
        (None, Some(side)) if start_code.is_corner() && disjoint => {
            resolution.code = start_code.offset_by(offset(side));
            debug!(?start, ?end, code = resolution.code.bits(), "2-1 turning code");
        }
        // 1-1
        (Some(_), Some(_)) if start_code != end_code => {
            resolution.code = start_code | end_code | RegionCode::TWO_BIT;
            debug!(?start, ?end, code = resolution.code.bits(), "1-1 turning code");
        }
        _ => {}
    }

    Ok(resolution)
}
