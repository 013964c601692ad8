//! Error types for clipping operations.

use thiserror::Error;

use crate::geometry::Line;

/// Errors that can occur while clipping a polygon.
///
/// ## Rust Lesson #3: Error Handling
///
/// Rust uses `Result<T, E>` instead of exceptions. `thiserror` writes the
/// `Display` and `std::error::Error` impls from the `#[error(...)]`
/// attributes, so callers can `?` these straight into `anyhow`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClipError {
    /// Polygon or window that cannot be clipped.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The segment is parallel (or nearly so) to the boundary it was
    /// supposed to cross. Raised when the determinant is within 1e-6 of zero.
    #[error(
        "lines are parallel or collinear: segment ({}, {})-({}, {}), boundary ({}, {})-({}, {})",
        segment.x1, segment.y1, segment.x2, segment.y2,
        boundary.x1, boundary.y1, boundary.x2, boundary.y2
    )]
    DegenerateIntersection { segment: Line, boundary: Line },

    /// A turning point was requested for a region code that is not one of
    /// the four corner regions.
    #[error("region code {code} does not name a window corner")]
    UnresolvedCorner { code: u8 },
}
