//! Geometric crossing removal.

use super::{refine_with, RefineOutcome};
use crate::geometry::{segments_cross, ProblemInstance};
use crate::tour::Tour;

/// Reverses segments while any two tour edges properly intersect.
///
/// Uses an orientation test on the (scaled) coordinates rather than
/// distances, so it only removes crossings and does not chase other 2-opt
/// gains. Collinear overlaps are not treated as crossings.
///
/// `max_passes` caps the number of passes (`0` = until no crossing is
/// left).
///
/// # Panics
/// Panics if the tour visits more points than `instance` holds.
pub fn uncross(tour: &Tour, instance: &ProblemInstance, max_passes: usize) -> RefineOutcome {
    refine_with(tour, max_passes, |order, i, j| {
        let n = order.len();
        let a = instance.scaled_point(order[i]);
        let b = instance.scaled_point(order[i + 1]);
        let c = instance.scaled_point(order[j]);
        let d = instance.scaled_point(order[(j + 1) % n]);
        if segments_cross(a, b, c, d) {
            order[i + 1..=j].reverse();
            true
        } else {
            false
        }
    })
}
