//! Problem instance: an ordered point set plus its distance table.

use super::{DistanceTable, Point};
use crate::error::{Result, TspError};

/// An ordered set of points and the distance table derived from it.
///
/// Points are only ever appended, replaced wholesale, or cleared; there is
/// no partial removal, so an index stays valid until the next clear.
///
/// # Examples
///
/// ```
/// use u_tsp::geometry::{Point, ProblemInstance};
///
/// let mut instance = ProblemInstance::new();
/// instance.add_point(Point::new(0.0, 0.0)).unwrap();
/// instance.add_point(Point::new(3.0, 4.0)).unwrap();
/// assert_eq!(instance.distance(0, 1).unwrap(), 5.0);
/// assert!(instance.distance(0, 2).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct ProblemInstance {
    points: Vec<Point>,
    scale: (f64, f64),
    table: DistanceTable,
}

impl Default for ProblemInstance {
    fn default() -> Self {
        Self::new()
    }
}

impl ProblemInstance {
    /// Creates an empty instance with unit scale.
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            scale: (1.0, 1.0),
            table: DistanceTable::default(),
        }
    }

    /// Creates an instance from a point sequence.
    pub fn from_points<I, P>(points: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: Into<Point>,
    {
        let mut instance = Self::new();
        instance.set_points(points)?;
        Ok(instance)
    }

    /// Sets the coordinate scale and returns the instance.
    ///
    /// Distances are measured over `(x·sx, y·sy)`, so points may be stored
    /// normalized to `0..1` and measured in pixels.
    pub fn with_scale(mut self, sx: f64, sy: f64) -> Result<Self> {
        self.set_scale(sx, sy)?;
        Ok(self)
    }

    /// Changes the coordinate scale and rebuilds the distance table.
    pub fn set_scale(&mut self, sx: f64, sy: f64) -> Result<()> {
        if !(sx.is_finite() && sy.is_finite() && sx > 0.0 && sy > 0.0) {
            return Err(TspError::invalid_config(format!(
                "scale must be positive and finite, got ({sx}, {sy})"
            )));
        }
        self.scale = (sx, sy);
        self.rebuild();
        Ok(())
    }

    /// Current coordinate scale.
    pub fn scale(&self) -> (f64, f64) {
        self.scale
    }

    /// Appends a point and returns its index.
    pub fn add_point(&mut self, point: impl Into<Point>) -> Result<usize> {
        let point = checked(point.into())?;
        self.points.push(point);
        self.rebuild();
        Ok(self.points.len() - 1)
    }

    /// Replaces the whole point set.
    ///
    /// On error the previous points are kept.
    pub fn set_points<I, P>(&mut self, points: I) -> Result<()>
    where
        I: IntoIterator<Item = P>,
        P: Into<Point>,
    {
        let points = points
            .into_iter()
            .map(|p| checked(p.into()))
            .collect::<Result<Vec<_>>>()?;
        self.points = points;
        self.rebuild();
        Ok(())
    }

    /// Removes all points.
    pub fn clear(&mut self) {
        self.points.clear();
        self.rebuild();
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if there are no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// All points in index order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The point at `index`.
    pub fn point(&self, index: usize) -> Result<Point> {
        self.points
            .get(index)
            .copied()
            .ok_or(TspError::InvalidIndex {
                index,
                len: self.points.len(),
            })
    }

    /// The point at `index` with the scale applied.
    pub(crate) fn scaled_point(&self, index: usize) -> Point {
        let p = self.points[index];
        Point::new(p.x * self.scale.0, p.y * self.scale.1)
    }

    /// Checked distance between points `i` and `j`.
    pub fn distance(&self, i: usize, j: usize) -> Result<f64> {
        let len = self.points.len();
        for index in [i, j] {
            if index >= len {
                return Err(TspError::InvalidIndex { index, len });
            }
        }
        Ok(self.table.get(i, j))
    }

    /// The cached distance table.
    pub fn distances(&self) -> &DistanceTable {
        &self.table
    }

    fn rebuild(&mut self) {
        self.table = DistanceTable::from_points(&self.points, self.scale);
    }
}

fn checked(point: Point) -> Result<Point> {
    if point.is_finite() {
        Ok(point)
    } else {
        Err(TspError::InvalidPoint {
            x: point.x,
            y: point.y,
        })
    }
}
