//! Local refinement by segment reversal.
//!
//! - [`two_opt`] / [`two_opt_limited`]: first-improvement 2-opt driven by
//!   the distance delta of each edge exchange.
//! - [`uncross`]: the same move, triggered when the two edges geometrically
//!   cross instead of by distance delta.
//!
//! Both are used by the genetic strategy (final polish of the best tour) and
//! the colony strategy (per-ant repair).
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

mod two_opt;
mod uncross;

pub use two_opt::{two_opt, two_opt_limited};
pub use uncross::uncross;

use crate::tour::Tour;

/// Result of a refinement run.
#[derive(Debug, Clone)]
pub struct RefineOutcome {
    /// The refined tour.
    pub tour: Tour,
    /// Number of full passes over all edge pairs.
    pub passes: usize,
    /// Number of segment reversals applied.
    pub moves: usize,
    /// True if the last pass made no move, i.e. a local optimum was reached
    /// before the pass cap.
    pub converged: bool,
}

/// Visits every edge pair `(i, i+1)`, `(j, j+1)` with `j >= i + 2` of a
/// closed tour, skipping the pair that shares the closing point.
///
/// `apply` returns true when it reversed `order[i+1..=j]`. Returns the number
/// of reversals made in this pass.
pub(crate) fn scan_pass<F>(order: &mut [usize], mut apply: F) -> usize
where
    F: FnMut(&mut [usize], usize, usize) -> bool,
{
    let n = order.len();
    let mut moves = 0;
    for i in 0..n.saturating_sub(2) {
        for j in (i + 2)..n {
            if i == 0 && j == n - 1 {
                continue;
            }
            if apply(order, i, j) {
                moves += 1;
            }
        }
    }
    moves
}

/// Repeats `scan_pass` until a pass makes no move or `max_passes` passes
/// have run (`0` = unlimited).
pub(crate) fn refine_with<F>(tour: &Tour, max_passes: usize, mut apply: F) -> RefineOutcome
where
    F: FnMut(&mut [usize], usize, usize) -> bool,
{
    let mut order = tour.order().to_vec();
    let mut passes = 0;
    let mut moves = 0;
    let mut converged = order.len() < 4;

    while !converged {
        if max_passes > 0 && passes >= max_passes {
            break;
        }
        passes += 1;
        let pass_moves = scan_pass(&mut order, &mut apply);
        moves += pass_moves;
        converged = pass_moves == 0;
    }

    log::trace!("refine: passes={passes} moves={moves} converged={converged}");

    RefineOutcome {
        tour: Tour::from_permutation(order),
        passes,
        moves,
        converged,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_pass_pairs() {
        let mut order: Vec<usize> = (0..5).collect();
        let mut pairs = Vec::new();
        scan_pass(&mut order, |_, i, j| {
            pairs.push((i, j));
            false
        });
        assert_eq!(pairs, vec![(0, 2), (0, 3), (1, 3), (1, 4), (2, 4)]);
    }

    #[test]
    fn test_small_tours_untouched() {
        let tour = Tour::new(vec![2, 0, 1]).unwrap();
        let out = refine_with(&tour, 0, |_, _, _| panic!("no pairs for n < 4"));
        assert_eq!(out.tour, tour);
        assert!(out.converged);
        assert_eq!(out.passes, 0);
    }

    #[test]
    fn test_pass_cap() {
        let tour = Tour::identity(6);
        // always claims a move, so only the cap stops it
        let out = refine_with(&tour, 3, |_, _, _| true);
        assert_eq!(out.passes, 3);
        assert!(!out.converged);
    }
}
