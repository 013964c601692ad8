//! # maillot
//!
//! Clip simple polygons against an axis-aligned rectangular window.
//!
//! Each polygon edge is clipped as a segment (Cohen–Sutherland), and
//! window corners ("turning points") are inserted wherever an edge goes
//! around the window instead of through it, so the result is still one
//! closed polygon.
//!
//! ```
//! use maillot::{clip_polygon, Point};
//!
//! let triangle = [Point::new(3.0, 4.0), Point::new(3.0, 1.0), Point::new(5.0, 3.0)];
//! let clipped = clip_polygon(&triangle, Point::new(2.0, 2.0), Point::new(6.0, 5.0)).unwrap();
//! assert_eq!(clipped.len(), 4);
//! ```

pub mod clip;
pub mod error;
pub mod geometry;
pub mod polygon;
pub mod region;
pub mod svg;
pub mod turning;

// Re-export common types at crate root for convenience.
pub use clip::{clip_segment, line_intersection};
pub use error::ClipError;
pub use geometry::{Corner, Line, Point, Polygon, Rect};
pub use polygon::{clip_polygon, clip_polygon_in_rect, clip_polygons, EdgePairs};
pub use region::{Boundary, RegionCode};
pub use svg::{extract_polygons_from_svg, parse_points, SvgError};
