//! Planar points and cached pairwise distances.
//!
//! A [`ProblemInstance`] owns an ordered point list (the index of a point
//! is its identity everywhere else in the crate) and a dense
//! [`DistanceTable`] derived from it. The table is rebuilt eagerly after
//! every mutation, which is fine for interactive problem sizes.

mod distance;
mod instance;

pub use distance::DistanceTable;
pub use instance::ProblemInstance;

/// A point in the plane.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Creates a point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns true if both coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Orientation test: true if `a`, `b`, `c` turn counter-clockwise.
///
/// Collinear triples are not counter-clockwise.
pub(crate) fn ccw(a: Point, b: Point, c: Point) -> bool {
    (c.y - a.y) * (b.x - a.x) > (b.y - a.y) * (c.x - a.x)
}

/// Returns true if segments `ab` and `cd` properly intersect.
pub(crate) fn segments_cross(a: Point, b: Point, c: Point, d: Point) -> bool {
    ccw(a, c, d) != ccw(b, c, d) && ccw(a, b, c) != ccw(a, b, d)
}
