//! Dense pheromone table.

/// Non-negative pheromone levels on every ordered pair of points.
///
/// Stored row-major like [`DistanceTable`](crate::geometry::DistanceTable).
/// Updates are applied to both directions of an edge, so the table stays
/// symmetric. The diagonal is never read.
#[derive(Debug, Clone, PartialEq)]
pub struct PheromoneMatrix {
    n: usize,
    data: Vec<f64>,
}

impl PheromoneMatrix {
    /// An `n × n` matrix filled with `initial`.
    pub fn new(n: usize, initial: f64) -> Self {
        Self {
            n,
            data: vec![initial; n * n],
        }
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.n
    }

    /// Returns true for a zero-point matrix.
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Pheromone on edge `(i, j)`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.n + j]
    }

    /// Multiplies every entry by `1 - rate`.
    pub fn evaporate(&mut self, rate: f64) {
        let keep = (1.0 - rate).max(0.0);
        for tau in &mut self.data {
            *tau *= keep;
        }
    }

    /// Adds `amount` to every edge of the closed tour, both directions.
    ///
    /// Self-edges (a one-point tour) are skipped.
    pub fn deposit(&mut self, order: &[usize], amount: f64) {
        let n = order.len();
        for k in 0..n {
            let i = order[k];
            let j = order[(k + 1) % n];
            if i == j {
                continue;
            }
            self.data[i * self.n + j] += amount;
            self.data[j * self.n + i] += amount;
        }
    }

    /// Iterates over all entries.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.data.iter().copied()
    }
}
