//! Best-so-far solution tracking.

use super::Tour;

/// A tour together with its perimeter.
#[derive(Debug, Clone, PartialEq)]
pub struct BestSolution {
    tour: Tour,
    length: f64,
}

impl BestSolution {
    /// The tour.
    pub fn tour(&self) -> &Tour {
        &self.tour
    }

    /// The tour's perimeter.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Splits into `(tour, length)`.
    pub fn into_parts(self) -> (Tour, f64) {
        (self.tour, self.length)
    }
}

/// Holds the shortest tour observed so far.
///
/// [`consider`](Self::consider) is the only way to replace the held
/// solution, and it does so only on a strictly shorter length. Ties keep
/// the tour found first, so the held length never increases.
#[derive(Debug, Clone, Default)]
pub struct BestTracker {
    current: Option<BestSolution>,
}

impl BestTracker {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Offers a candidate. Returns true if it replaced the held solution.
    ///
    /// Non-finite lengths are never accepted.
    pub fn consider(&mut self, tour: &Tour, length: f64) -> bool {
        if !length.is_finite() || length >= self.bound() {
            return false;
        }
        self.current = Some(BestSolution {
            tour: tour.clone(),
            length,
        });
        true
    }

    /// The held solution, if any.
    pub fn get(&self) -> Option<&BestSolution> {
        self.current.as_ref()
    }

    /// Length of the held solution, or `f64::INFINITY` when empty.
    ///
    /// This is the natural pruning bound for new candidates.
    pub fn bound(&self) -> f64 {
        self.current
            .as_ref()
            .map_or(f64::INFINITY, |best| best.length)
    }

    /// Returns true if nothing has been accepted yet.
    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }

    /// Forgets the held solution.
    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Takes the held solution out of the tracker.
    pub fn take(&mut self) -> Option<BestSolution> {
        self.current.take()
    }
}
