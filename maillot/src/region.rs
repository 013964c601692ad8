//! Region codes (outcodes) for points relative to a clipping window.
//!
//! Every point outside the window violates one boundary (a side region)
//! or two perpendicular boundaries (a corner region). The bit pattern is
//! fixed because the turning-point tables are keyed on it:
//!
//! ```text
//!          LEFT|TOP  |  TOP   | RIGHT|TOP
//!          ----------+--------+----------
//!            LEFT    | inside |  RIGHT
//!          ----------+--------+----------
//!        LEFT|BOTTOM | BOTTOM | RIGHT|BOTTOM
//! ```

use std::ops::{BitAnd, BitOr};

use crate::geometry::{Point, Rect};

/// One side of the clipping window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Boundary {
    Left,
    Right,
    Bottom,
    Top,
}

impl Boundary {
    /// Order in which violated boundaries are clipped away.
    pub const PRIORITY: [Boundary; 4] = [Boundary::Left, Boundary::Right, Boundary::Bottom, Boundary::Top];

    #[inline]
    pub const fn bit(self) -> u8 {
        match self {
            Boundary::Right => 1,
            Boundary::Top => 2,
            Boundary::Left => 4,
            Boundary::Bottom => 8,
        }
    }
}

/// Bitmask describing which window boundaries a point violates.
///
/// ## Rust Lesson #4: Newtypes
///
/// Wrapping the `u8` in a struct means a region code can't be confused
/// with any other integer, and only the methods below can build one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RegionCode(u8);

impl RegionCode {
    pub const INSIDE: RegionCode = RegionCode(0);
    pub const RIGHT: RegionCode = RegionCode(Boundary::Right.bit());
    pub const TOP: RegionCode = RegionCode(Boundary::Top.bit());
    pub const LEFT: RegionCode = RegionCode(Boundary::Left.bit());
    pub const BOTTOM: RegionCode = RegionCode(Boundary::Bottom.bit());
    /// Set when the point is in one of the four corner regions.
    pub const TWO_BIT: RegionCode = RegionCode(16);
    /// The four boundary bits without the corner flag.
    pub const MASK: u8 = 15;

    /// Classify `p` against `rect`. The x axis is tested first.
    pub fn of(p: Point, rect: &Rect) -> Self {
        let mut code = 0;

        if p.x < rect.xmin {
            code |= Self::LEFT.0;
        } else if p.x > rect.xmax {
            code |= Self::RIGHT.0;
        }

        if p.y < rect.ymin || p.y > rect.ymax {
            code |= if p.y < rect.ymin { Self::BOTTOM.0 } else { Self::TOP.0 };
            if code & (Self::LEFT.0 | Self::RIGHT.0) != 0 {
                code |= Self::TWO_BIT.0;
            }
        }

        RegionCode(code)
    }

    /// Raw bit pattern, corner flag included.
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        RegionCode(bits)
    }

    #[inline]
    pub const fn is_inside(self) -> bool {
        self.0 == 0
    }

    /// In a corner region (two perpendicular boundaries violated).
    #[inline]
    pub const fn is_corner(self) -> bool {
        self.0 & Self::TWO_BIT.0 != 0
    }

    /// Outside the window across exactly one boundary.
    #[inline]
    pub const fn is_single(self) -> bool {
        !self.is_inside() && !self.is_corner()
    }

    #[inline]
    pub const fn contains(self, boundary: Boundary) -> bool {
        self.0 & boundary.bit() != 0
    }

    /// The code with the corner flag stripped.
    #[inline]
    pub const fn boundaries(self) -> Self {
        RegionCode(self.0 & Self::MASK)
    }

    /// Both codes violate at least one common boundary.
    #[inline]
    pub const fn shares_boundary(self, other: Self) -> bool {
        self.0 & other.0 & Self::MASK != 0
    }

    /// First violated boundary in clipping priority order.
    pub fn first_boundary(self) -> Option<Boundary> {
        Boundary::PRIORITY.into_iter().find(|b| self.contains(*b))
    }

    /// The single violated boundary of a side-region code.
    pub fn single_boundary(self) -> Option<Boundary> {
        if self.is_single() { self.first_boundary() } else { None }
    }

    /// Add a signed offset to the raw bit pattern.
    ///
    /// Turning-point resolution moves between neighbouring region codes
    /// by plain arithmetic on the bits; see `turning::offset`.
    #[inline]
    pub(crate) fn offset_by(self, delta: i8) -> Self {
        RegionCode(self.0.wrapping_add_signed(delta))
    }
}

impl BitOr for RegionCode {
    type Output = RegionCode;

    fn bitor(self, rhs: Self) -> Self::Output {
        RegionCode(self.0 | rhs.0)
    }
}

impl BitAnd for RegionCode {
    type Output = RegionCode;

    fn bitand(self, rhs: Self) -> Self::Output {
        RegionCode(self.0 & rhs.0)
    }
}
