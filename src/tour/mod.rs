//! Tours and perimeter evaluation.
//!
//! A [`Tour`] is a permutation of point indices read as a closed cycle:
//! there is an implicit edge from the last index back to the first.
//! [`Perimeter`] is the result of a bounded evaluation, which may stop early
//! once the running length reaches the caller's bound.
//!
//! [`BestTracker`] holds the best `(tour, length)` pair seen so far and is
//! the only place where a best solution is replaced.

mod best;
mod perimeter;

pub use best::{BestSolution, BestTracker};
pub use perimeter::Perimeter;
pub(crate) use perimeter::perimeter_of;

use crate::error::{Result, TspError};
use crate::geometry::DistanceTable;
use crate::random::random_permutation;
use rand::Rng;

/// A closed visiting order over points `0..n`.
///
/// Invariant: every index in `0..len()` appears exactly once and
/// `len() >= 1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tour {
    order: Vec<usize>,
}

impl Tour {
    /// Creates a tour, checking that `order` is a permutation of `0..n`.
    pub fn new(order: Vec<usize>) -> Result<Self> {
        let n = order.len();
        if n == 0 {
            return Err(TspError::invalid_tour("a tour needs at least one point"));
        }
        let mut seen = vec![false; n];
        for &index in &order {
            if index >= n {
                return Err(TspError::InvalidIndex { index, len: n });
            }
            if seen[index] {
                return Err(TspError::invalid_tour(format!(
                    "index {index} appears more than once"
                )));
            }
            seen[index] = true;
        }
        Ok(Self { order })
    }

    /// Wraps an order already known to be a permutation.
    pub(crate) fn from_permutation(order: Vec<usize>) -> Self {
        debug_assert!(is_permutation(&order), "not a permutation: {order:?}");
        Self { order }
    }

    /// The tour `0, 1, ..., n-1`.
    ///
    /// # Panics
    /// Panics if `n == 0`.
    pub fn identity(n: usize) -> Self {
        assert!(n > 0, "a tour needs at least one point");
        Self {
            order: (0..n).collect(),
        }
    }

    /// A uniformly random tour over `n` points.
    ///
    /// # Panics
    /// Panics if `n == 0`.
    pub fn random<R: Rng>(n: usize, rng: &mut R) -> Self {
        assert!(n > 0, "a tour needs at least one point");
        Self {
            order: random_permutation(n, rng),
        }
    }

    /// The visiting order.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Number of points visited.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Always false; a tour visits at least one point.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Consumes the tour and returns the visiting order.
    pub fn into_order(self) -> Vec<usize> {
        self.order
    }

    /// The same cycle started `k` positions later.
    pub fn rotated(&self, k: usize) -> Self {
        let mut order = self.order.clone();
        let n = order.len();
        order.rotate_left(k % n);
        Self { order }
    }

    /// The same cycle traversed in the opposite direction.
    pub fn reversed(&self) -> Self {
        let mut order = self.order.clone();
        order.reverse();
        Self { order }
    }

    /// Bounded perimeter evaluation.
    ///
    /// Sums edge lengths in tour order plus the closing edge and stops as
    /// soon as the running sum reaches `bound`. Pass `f64::INFINITY` to
    /// disable pruning.
    ///
    /// Fails with [`TspError::InvalidIndex`] if the tour visits more points
    /// than `table` covers.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_tsp::geometry::ProblemInstance;
    /// use u_tsp::tour::{Perimeter, Tour};
    ///
    /// let square = ProblemInstance::from_points([(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]).unwrap();
    /// let tour = Tour::identity(4);
    /// assert_eq!(tour.perimeter(square.distances(), f64::INFINITY).unwrap(), Perimeter::Length(4.0));
    /// assert_eq!(tour.perimeter(square.distances(), 3.0).unwrap(), Perimeter::ExceedsBound);
    /// ```
    pub fn perimeter(&self, table: &DistanceTable, bound: f64) -> Result<Perimeter> {
        self.check_table(table)?;
        Ok(perimeter_of(&self.order, table, bound))
    }

    /// Full (unpruned) perimeter.
    pub fn length(&self, table: &DistanceTable) -> Result<f64> {
        self.check_table(table)?;
        Ok(self.length_unchecked(table))
    }

    /// Full perimeter without the range check.
    pub(crate) fn length_unchecked(&self, table: &DistanceTable) -> f64 {
        match perimeter_of(&self.order, table, f64::INFINITY) {
            Perimeter::Length(len) => len,
            Perimeter::ExceedsBound => f64::INFINITY,
        }
    }

    // A permutation of 0..len stays in range iff len <= table size.
    fn check_table(&self, table: &DistanceTable) -> Result<()> {
        if self.order.len() > table.len() {
            return Err(TspError::InvalidIndex {
                index: self.order.len() - 1,
                len: table.len(),
            });
        }
        Ok(())
    }
}

impl TryFrom<Vec<usize>> for Tour {
    type Error = TspError;

    fn try_from(order: Vec<usize>) -> Result<Self> {
        Self::new(order)
    }
}

impl AsRef<[usize]> for Tour {
    fn as_ref(&self) -> &[usize] {
        &self.order
    }
}

/// Returns true if `perm` holds every value of `0..perm.len()` exactly once.
pub fn is_permutation(perm: &[usize]) -> bool {
    let n = perm.len();
    let mut seen = vec![false; n];
    for &v in perm {
        if v >= n || seen[v] {
            return false;
        }
        seen[v] = true;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::ProblemInstance;
    use crate::random::create_rng;

    fn square() -> ProblemInstance {
        ProblemInstance::from_points([(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]).unwrap()
    }

    #[test]
    fn test_new_validates_permutation() {
        assert!(Tour::new(vec![2, 0, 1]).is_ok());
        assert_eq!(
            Tour::new(vec![0, 3, 1]),
            Err(TspError::InvalidIndex { index: 3, len: 3 })
        );
        assert!(matches!(
            Tour::new(vec![0, 1, 1]),
            Err(TspError::InvalidTour(_))
        ));
        assert!(matches!(Tour::new(vec![]), Err(TspError::InvalidTour(_))));
    }

    #[test]
    fn test_square_perimeter() {
        let inst = square();
        let table = inst.distances();
        assert!((Tour::identity(4).length(table).unwrap() - 4.0).abs() < 1e-12);

        let crossing = Tour::new(vec![0, 2, 1, 3]).unwrap();
        let expected = 2.0 + 2.0 * 2f64.sqrt();
        assert!((crossing.length(table).unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_tours() {
        let inst = ProblemInstance::from_points([(0.0, 0.0), (3.0, 4.0)]).unwrap();
        let table = inst.distances();
        assert_eq!(Tour::identity(1).length(table).unwrap(), 0.0);
        assert!((Tour::identity(2).length(table).unwrap() - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_perimeter_rejects_oversized_tour() {
        let inst = ProblemInstance::from_points([(0.0, 0.0), (1.0, 0.0)]).unwrap();
        let tour = Tour::identity(3);
        assert_eq!(
            tour.perimeter(inst.distances(), f64::INFINITY),
            Err(TspError::InvalidIndex { index: 2, len: 2 })
        );
    }

    #[test]
    fn test_rotation_and_reversal_keep_length() {
        let inst = ProblemInstance::from_points([
            (0.0, 0.0),
            (5.0, 1.0),
            (3.0, 7.0),
            (-2.0, 4.0),
            (1.0, 2.0),
        ])
        .unwrap();
        let table = inst.distances();
        let mut rng = create_rng(3);
        let tour = Tour::random(5, &mut rng);
        let base = tour.length(table).unwrap();
        for k in 0..5 {
            assert!((tour.rotated(k).length(table).unwrap() - base).abs() < 1e-9);
        }
        assert!((tour.reversed().length(table).unwrap() - base).abs() < 1e-9);
    }

    #[test]
    fn test_is_permutation() {
        assert!(is_permutation(&[1, 0, 2]));
        assert!(!is_permutation(&[1, 1, 2]));
        assert!(!is_permutation(&[0, 3]));
        assert!(is_permutation(&[]));
    }
}
