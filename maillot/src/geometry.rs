//! Core geometry types for maillot.
//!
//! ## Rust Lesson #1: Structs & Derives
//!
//! The `#[derive(...)]` macro auto-generates common functionality:
//! - `Debug` = lets you print with `{:?}`
//! - `Clone` / `Copy` = small stack values are copied implicitly
//! - `PartialEq` = can compare with `==` (used to drop repeated vertices)

use crate::error::ClipError;
use crate::region::Boundary;

/// A 2D point with x,y coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A directed line segment defined by two endpoints.
///
/// Also used as the infinite line through those endpoints when
/// intersecting or running half-plane tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// One of the four corners of a clipping window.
///
/// The discriminants are the corner indices of [`Rect::corners`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    BottomLeft = 0,
    BottomRight = 1,
    TopRight = 2,
    TopLeft = 3,
}

/// An axis-aligned clipping window, normalized so `xmin <= xmax` and
/// `ymin <= ymax`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
}

/// A simple polygon. The closing edge (last -> first) is implicit.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    /// Boundary vertices, in input winding order
    pub outer: Vec<Point>,
    /// Optional ID from the SVG element or job file
    pub id: Option<String>,
}

// ============================================================================
// IMPLEMENTATIONS
// ============================================================================

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

impl Line {
    #[inline]
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    #[inline]
    pub fn from_points(start: Point, end: Point) -> Self {
        Self::new(start.x, start.y, end.x, end.y)
    }

    #[inline]
    pub fn start(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    #[inline]
    pub fn end(&self) -> Point {
        Point::new(self.x2, self.y2)
    }

    /// Is `p` strictly to the left of this directed line?
    ///
    /// Signed cross product of the line direction and the vector from the
    /// line start to `p`. Points exactly on the line are *not* left.
    #[inline]
    pub fn is_point_left(&self, p: Point) -> bool {
        let (dx, dy) = (self.x2 - self.x1, self.y2 - self.y1);
        let (px, py) = (p.x - self.x1, p.y - self.y1);
        dx * py > dy * px
    }
}

impl Rect {
    /// Build a window from two points on one of its diagonals, in either order.
    ///
    /// ## Rust Lesson #2: Result<T, E>
    ///
    /// A zero-width or zero-height window cannot be clipped against, so
    /// instead of producing garbage later we refuse to build one. The
    /// caller gets `Err(...)` and decides what to do with it.
    pub fn from_diagonal(a: Point, b: Point) -> Result<Self, ClipError> {
        if !a.is_finite() || !b.is_finite() {
            return Err(ClipError::InvalidInput(format!(
                "window corners must be finite, got ({}, {}) and ({}, {})",
                a.x, a.y, b.x, b.y
            )));
        }

        let rect = Self {
            xmin: a.x.min(b.x),
            xmax: a.x.max(b.x),
            ymin: a.y.min(b.y),
            ymax: a.y.max(b.y),
        };

        if rect.width() == 0.0 || rect.height() == 0.0 {
            return Err(ClipError::InvalidInput(format!(
                "window ({}, {})-({}, {}) has zero width or height",
                a.x, a.y, b.x, b.y
            )));
        }

        Ok(rect)
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    /// Closed containment: points on the border are inside.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.xmin && p.x <= self.xmax && p.y >= self.ymin && p.y <= self.ymax
    }

    /// Corners in index order: bottom-left, bottom-right, top-right, top-left.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.xmin, self.ymin),
            Point::new(self.xmax, self.ymin),
            Point::new(self.xmax, self.ymax),
            Point::new(self.xmin, self.ymax),
        ]
    }

    #[inline]
    pub fn corner(&self, corner: Corner) -> Point {
        self.corners()[corner as usize]
    }

    /// The window side for `boundary`, as a line between two corners.
    pub fn boundary_line(&self, boundary: Boundary) -> Line {
        match boundary {
            Boundary::Left => Line::new(self.xmin, self.ymin, self.xmin, self.ymax),
            Boundary::Right => Line::new(self.xmax, self.ymin, self.xmax, self.ymax),
            Boundary::Bottom => Line::new(self.xmin, self.ymin, self.xmax, self.ymin),
            Boundary::Top => Line::new(self.xmin, self.ymax, self.xmax, self.ymax),
        }
    }

    /// (xmin, ymin) -> (xmax, ymax)
    pub fn diagonal(&self) -> Line {
        Line::new(self.xmin, self.ymin, self.xmax, self.ymax)
    }

    /// (xmax, ymin) -> (xmin, ymax)
    pub fn anti_diagonal(&self) -> Line {
        Line::new(self.xmax, self.ymin, self.xmin, self.ymax)
    }
}

impl Polygon {
    /// Create a polygon with no ID.
    pub fn new(outer: Vec<Point>) -> Self {
        Self { outer, id: None }
    }

    /// Create a polygon with an ID.
    pub fn with_id(outer: Vec<Point>, id: Option<String>) -> Self {
        Self { outer, id }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.outer.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.outer.is_empty()
    }
}

// ============================================================================
// TESTS
// ============================================================================
