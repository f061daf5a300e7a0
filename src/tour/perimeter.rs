//! Bounded closed-tour length evaluation.

use crate::geometry::DistanceTable;

/// Outcome of a bounded perimeter evaluation.
///
/// `ExceedsBound` means the tour is provably no shorter than the bound. It
/// is a control-flow signal, not an error, and compares like `+∞`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Perimeter {
    /// The exact perimeter, strictly below the bound.
    Length(f64),
    /// Evaluation stopped once the running sum reached the bound.
    ExceedsBound,
}

impl Perimeter {
    /// The length, or `f64::INFINITY` if pruned.
    pub fn value(self) -> f64 {
        match self {
            Perimeter::Length(len) => len,
            Perimeter::ExceedsBound => f64::INFINITY,
        }
    }

    /// The length if the evaluation completed.
    pub fn length(self) -> Option<f64> {
        match self {
            Perimeter::Length(len) => Some(len),
            Perimeter::ExceedsBound => None,
        }
    }

    /// Returns true if evaluation was cut short.
    pub fn is_pruned(self) -> bool {
        matches!(self, Perimeter::ExceedsBound)
    }
}

/// Sums the closed-tour length of `order`, stopping at `bound`.
///
/// Edges are non-negative, so the running sum never decreases and stopping
/// once it reaches `bound` cannot hide a total below it. The unbounded call
/// (`bound = ∞`) runs the same additions in the same order, so a completed
/// bounded evaluation returns the identical value.
pub(crate) fn perimeter_of(order: &[usize], table: &DistanceTable, bound: f64) -> Perimeter {
    let n = order.len();
    if n == 0 {
        return Perimeter::Length(0.0);
    }
    let mut total = 0.0;
    for w in order.windows(2) {
        total += table.get(w[0], w[1]);
        if total >= bound {
            return Perimeter::ExceedsBound;
        }
    }
    total += table.get(order[n - 1], order[0]);
    if total >= bound {
        Perimeter::ExceedsBound
    } else {
        Perimeter::Length(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    fn line() -> DistanceTable {
        let pts: Vec<Point> = (0..4).map(|i| Point::new(i as f64, 0.0)).collect();
        DistanceTable::from_points(&pts, (1.0, 1.0))
    }

    #[test]
    fn test_unbounded() {
        assert_eq!(perimeter_of(&[0, 1, 2, 3], &line(), f64::INFINITY), Perimeter::Length(6.0));
    }

    #[test]
    fn test_prunes_at_bound() {
        let t = line();
        assert_eq!(perimeter_of(&[0, 1, 2, 3], &t, 6.0), Perimeter::ExceedsBound);
        assert_eq!(perimeter_of(&[0, 1, 2, 3], &t, 6.5), Perimeter::Length(6.0));
        // 0->3 already costs 3
        assert_eq!(perimeter_of(&[0, 3, 1, 2], &t, 2.5), Perimeter::ExceedsBound);
    }

    #[test]
    fn test_value_and_accessors() {
        assert_eq!(Perimeter::ExceedsBound.value(), f64::INFINITY);
        assert_eq!(Perimeter::Length(2.0).value(), 2.0);
        assert_eq!(Perimeter::Length(2.0).length(), Some(2.0));
        assert!(Perimeter::ExceedsBound.is_pruned());
        assert!(!Perimeter::Length(0.0).is_pruned());
    }

    #[test]
    fn test_single_point() {
        assert_eq!(perimeter_of(&[2], &line(), f64::INFINITY), Perimeter::Length(0.0));
    }
}
