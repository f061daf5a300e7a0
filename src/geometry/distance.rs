//! Dense symmetric distance table.

use super::Point;

/// An n×n symmetric matrix of Euclidean distances with a zero diagonal.
///
/// Stored row-major in a single `Vec<f64>`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DistanceTable {
    n: usize,
    data: Vec<f64>,
}

impl DistanceTable {
    /// Builds the table for `points`, measuring over `(x·sx, y·sy)`.
    pub fn from_points(points: &[Point], scale: (f64, f64)) -> Self {
        let n = points.len();
        let (sx, sy) = scale;
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let dx = (points[i].x - points[j].x) * sx;
                let dy = (points[i].y - points[j].y) * sy;
                let d = dx.hypot(dy);
                data[i * n + j] = d;
                data[j * n + i] = d;
            }
        }
        Self { n, data }
    }

    /// Number of points covered by the table.
    pub fn len(&self) -> usize {
        self.n
    }

    /// Returns true if the table covers no points.
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Distance between `i` and `j`.
    ///
    /// # Panics
    /// Panics if either index is out of range. Use
    /// [`ProblemInstance::distance`](super::ProblemInstance::distance) for a
    /// checked lookup.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.n + j]
    }

    /// Returns row `i` as a slice.
    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.n..(i + 1) * self.n]
    }
}
