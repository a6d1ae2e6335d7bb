//! Exact lattice points and orientation results.
//!
//! - `Point`: fixed-width integer coordinates; no floating point ever enters
//!   an orientation decision.
//! - `Turn`: result of the orientation predicate.

use nalgebra::Vector2;
use std::fmt;

/// Largest admissible absolute coordinate.
///
/// Coordinate differences then stay below 2^62 and every cross product of two
/// differences fits in `i128` without overflow.
pub const MAX_COORD: i64 = 1 << 61;

/// Lattice point with exact coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    #[inline]
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Both coordinates within `MAX_COORD` in absolute value.
    #[inline]
    pub fn in_range(&self) -> bool {
        self.x.unsigned_abs() <= MAX_COORD as u64 && self.y.unsigned_abs() <= MAX_COORD as u64
    }

    /// Strictly lower in `(y, x)` order. Every point set has a unique lowest point.
    #[inline]
    pub fn is_below(&self, other: &Point) -> bool {
        (self.y, self.x) < (other.y, other.x)
    }

    /// `self − origin` in floating point. Exact for in-range points up to the
    /// `f64` rounding of the difference.
    #[inline]
    pub fn offset_from(self, origin: Point) -> Vector2<f64> {
        Vector2::new((self.x - origin.x) as f64, (self.y - origin.y) as f64)
    }
}

impl From<[i64; 2]> for Point {
    fn from(c: [i64; 2]) -> Self {
        Self::new(c[0], c[1])
    }
}

impl From<(i64, i64)> for Point {
    fn from(c: (i64, i64)) -> Self {
        Self::new(c.0, c.1)
    }
}

impl From<Point> for [i64; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.x, self.y)
    }
}

/// Orientation of an ordered triple.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Turn {
    /// Counterclockwise.
    Left,
    /// Clockwise.
    Right,
    Collinear,
}
