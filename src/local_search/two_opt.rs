//! Distance-driven 2-opt.
//!
//! For edges `(a, b) = (t[i], t[i+1])` and `(c, d) = (t[j], t[j+1])`:
//!
//! ```text
//! delta = d(a, c) + d(b, d) - d(a, b) - d(c, d)
//! ```
//!
//! If `delta` is negative, reversing `t[i+1..=j]` shortens the tour by
//! exactly `-delta`.

use super::{refine_with, RefineOutcome};
use crate::geometry::DistanceTable;
use crate::tour::Tour;

/// Moves must shorten the tour by more than this to count.
///
/// Keeps floating-point noise from producing endless zero-gain reversals.
const MIN_GAIN: f64 = 1e-10;

/// Applies 2-opt until a local optimum is reached.
///
/// The result is never longer than `tour`, and refining it again returns it
/// unchanged.
///
/// # Examples
///
/// ```
/// use u_tsp::geometry::ProblemInstance;
/// use u_tsp::local_search::two_opt;
/// use u_tsp::tour::Tour;
///
/// let square = ProblemInstance::from_points([(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]).unwrap();
/// let crossing = Tour::new(vec![0, 2, 1, 3]).unwrap();
/// let fixed = two_opt(&crossing, square.distances());
/// assert!((fixed.length(square.distances()).unwrap() - 4.0).abs() < 1e-12);
/// ```
pub fn two_opt(tour: &Tour, table: &DistanceTable) -> Tour {
    two_opt_limited(tour, table, 0).tour
}

/// Applies 2-opt for at most `max_passes` passes (`0` = until converged).
///
/// # Complexity
/// O(n²) per pass. The number of passes is finite but not bounded in
/// general, which is what the cap is for.
pub fn two_opt_limited(tour: &Tour, table: &DistanceTable, max_passes: usize) -> RefineOutcome {
    refine_with(tour, max_passes, |order, i, j| {
        let n = order.len();
        let a = order[i];
        let b = order[i + 1];
        let c = order[j];
        let d = order[(j + 1) % n];
        let delta = table.get(a, c) + table.get(b, d) - table.get(a, b) - table.get(c, d);
        if delta < -MIN_GAIN {
            order[i + 1..=j].reverse();
            true
        } else {
            false
        }
    })
}
