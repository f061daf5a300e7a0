//! Colony iteration loop.
//!
//! Each [`AcoRun::step`] sends `ant_count` ants through the graph, repairs
//! and scores their tours, then evaporates and reinforces the pheromone
//! table. There is no early stop: the run completes after
//! `max_iterations`.

use super::config::{AcoConfig, Deposit, Repair};
use super::pheromone::PheromoneMatrix;
use crate::error::{Result, TspError};
use crate::ga::MIN_POINTS;
use crate::geometry::{DistanceTable, ProblemInstance};
use crate::local_search::{two_opt_limited, uncross};
use crate::random::rng_from_seed;
use crate::session::{RunStatus, StepReport};
use crate::tour::{perimeter_of, BestTracker, Perimeter, Tour};
use rand::rngs::StdRng;
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Distance floor for the heuristic term of coincident points.
const MIN_DISTANCE: f64 = 1e-10;

/// Result of a batch colony run.
#[derive(Debug, Clone)]
pub struct AcoResult {
    /// The shortest tour found.
    pub best: Tour,

    /// Perimeter of `best`.
    pub best_length: f64,

    /// Number of iterations executed.
    pub iterations: usize,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Best length at the end of each iteration.
    pub length_history: Vec<f64>,
}

/// A resumable colony run over one problem instance.
#[derive(Debug)]
pub struct AcoRun {
    config: AcoConfig,
    point_count: usize,
    pheromone: PheromoneMatrix,
    rng: StdRng,
    run_best: BestTracker,
    iteration: usize,
    status: RunStatus,
    length_history: Vec<f64>,
}

impl AcoRun {
    /// Validates `config` and fills the pheromone table with τ₀.
    pub fn new(instance: &ProblemInstance, config: &AcoConfig) -> Result<Self> {
        config.validate()?;
        let n = instance.len();
        if n < MIN_POINTS {
            return Err(TspError::InsufficientPoints {
                required: MIN_POINTS,
                found: n,
            });
        }

        Ok(Self {
            config: config.clone(),
            point_count: n,
            pheromone: PheromoneMatrix::new(n, config.initial_pheromone),
            rng: rng_from_seed(config.seed),
            run_best: BestTracker::new(),
            iteration: 0,
            status: RunStatus::Running,
            length_history: Vec::new(),
        })
    }

    /// Current status.
    pub fn status(&self) -> RunStatus {
        self.status
    }

    /// Iterations completed so far.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// The pheromone table.
    pub fn pheromone(&self) -> &PheromoneMatrix {
        &self.pheromone
    }

    /// Best length after each completed iteration.
    pub fn length_history(&self) -> &[f64] {
        &self.length_history
    }

    /// Stops the run. Later steps do nothing.
    pub fn cancel(&mut self) {
        if !self.status.is_terminal() {
            self.status = RunStatus::Cancelled;
        }
    }

    /// Executes one iteration.
    ///
    /// Every ant tour that improves `best` is listed in the report, in
    /// construction order.
    pub fn step(&mut self, instance: &ProblemInstance, best: &mut BestTracker) -> StepReport {
        let mut report = StepReport::new(self.status);
        if self.status.is_terminal() {
            return report;
        }
        debug_assert_eq!(instance.len(), self.point_count);

        let table = instance.distances();
        let prune = self.config.deposit.allows_pruning();
        let mut iteration_best = BestTracker::new();
        let mut scored: Vec<(Tour, f64)> = Vec::new();

        for _ in 0..self.config.ant_count {
            let constructed = Tour::from_permutation(self.construct(table));
            let tour = self.repair(constructed, instance);

            let bound = if prune {
                iteration_best.bound()
            } else {
                f64::INFINITY
            };
            let length = match perimeter_of(tour.order(), table, bound) {
                Perimeter::Length(length) => length,
                Perimeter::ExceedsBound => continue,
            };

            report.offer(best, &tour, length);
            iteration_best.consider(&tour, length);
            if !prune {
                scored.push((tour, length));
            }
        }

        if let Some(it_best) = iteration_best.get() {
            self.run_best.consider(it_best.tour(), it_best.length());
        }

        self.pheromone.evaporate(self.config.evaporation_rate);
        match self.config.deposit {
            Deposit::AllAnts => {
                for (tour, length) in &scored {
                    self.reinforce(tour, *length);
                }
            }
            Deposit::IterationBest => {
                if let Some(it_best) = iteration_best.get() {
                    self.reinforce(it_best.tour(), it_best.length());
                }
            }
            Deposit::BestSoFar => {
                let target = self
                    .run_best
                    .get()
                    .map(|run_best| (run_best.tour().clone(), run_best.length()));
                if let Some((tour, length)) = target {
                    self.reinforce(&tour, length);
                }
            }
        }

        self.iteration += 1;
        self.length_history.push(best.bound());
        log::debug!(
            "aco iteration {}: iteration best {:.4}, best {:.4}",
            self.iteration,
            iteration_best.bound(),
            best.bound()
        );

        if self.iteration >= self.config.max_iterations {
            self.status = RunStatus::Completed;
        }
        report.status = self.status;
        report
    }

    /// Builds one ant tour from a random start.
    fn construct(&mut self, table: &DistanceTable) -> Vec<usize> {
        let n = table.len();
        let mut visited = vec![false; n];
        let mut order = Vec::with_capacity(n);
        let mut candidates = Vec::with_capacity(n);
        let mut weights = Vec::with_capacity(n);

        let mut current = self.rng.random_range(0..n);
        visited[current] = true;
        order.push(current);

        while order.len() < n {
            candidates.clear();
            weights.clear();
            let mut sum = 0.0;
            for next in 0..n {
                if visited[next] {
                    continue;
                }
                let tau = self.pheromone.get(current, next).powf(self.config.alpha);
                let eta = (1.0 / table.get(current, next).max(MIN_DISTANCE)).powf(self.config.beta);
                let weight = tau * eta;
                candidates.push(next);
                weights.push(weight);
                sum += weight;
            }

            current = roulette(&candidates, &weights, sum, &mut self.rng);
            visited[current] = true;
            order.push(current);
        }

        order
    }

    fn repair(&self, tour: Tour, instance: &ProblemInstance) -> Tour {
        let passes = self.config.refine_max_passes;
        match self.config.repair {
            Repair::None => tour,
            Repair::TwoOpt => two_opt_limited(&tour, instance.distances(), passes).tour,
            Repair::Uncross => uncross(&tour, instance, passes).tour,
        }
    }

    fn reinforce(&mut self, tour: &Tour, length: f64) {
        if length > 0.0 && length.is_finite() {
            self.pheromone
                .deposit(tour.order(), self.config.deposit_constant / length);
        }
    }
}

/// Picks a candidate with probability proportional to its weight.
///
/// Draws uniformly in `[0, sum)` and returns the first candidate whose
/// running weight reaches the draw. A zero or non-finite `sum` falls back to
/// a uniform choice.
///
/// `candidates` must be non-empty.
pub(crate) fn roulette<R: Rng>(candidates: &[usize], weights: &[f64], sum: f64, rng: &mut R) -> usize {
    if !(sum > 0.0 && sum.is_finite()) {
        return candidates[rng.random_range(0..candidates.len())];
    }
    let draw = rng.random::<f64>() * sum;
    let mut acc = 0.0;
    for (&candidate, &weight) in candidates.iter().zip(weights) {
        acc += weight;
        if acc >= draw {
            return candidate;
        }
    }
    // rounding left acc just short of the draw
    candidates[candidates.len() - 1]
}

/// Runs the colony to completion.
///
/// # Usage
///
/// ```
/// use u_tsp::aco::{AcoConfig, AcoRunner};
/// use u_tsp::geometry::ProblemInstance;
///
/// let square = ProblemInstance::from_points([(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]).unwrap();
/// let config = AcoConfig::default().with_max_iterations(20).with_seed(42);
/// let result = AcoRunner::run(&square, &config).unwrap();
/// assert!((result.best_length - 4.0).abs() < 1e-9);
/// ```
pub struct AcoRunner;

impl AcoRunner {
    /// Runs the colony optimization.
    ///
    /// # Errors
    /// [`TspError::InvalidConfig`] for an invalid configuration and
    /// [`TspError::InsufficientPoints`] for fewer than three points.
    pub fn run(instance: &ProblemInstance, config: &AcoConfig) -> Result<AcoResult> {
        Self::run_with_cancel(instance, config, None)
    }

    /// Runs the colony with an optional cancellation token.
    ///
    /// The flag is checked between iterations; at least one iteration
    /// always runs.
    pub fn run_with_cancel(
        instance: &ProblemInstance,
        config: &AcoConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<AcoResult> {
        let mut run = AcoRun::new(instance, config)?;
        let mut best = BestTracker::new();
        log::info!(
            "aco run started: {} points, {} ants, {} iterations",
            instance.len(),
            config.ant_count,
            config.max_iterations
        );

        loop {
            let report = run.step(instance, &mut best);
            if report.status.is_terminal() {
                break;
            }
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    run.cancel();
                    break;
                }
            }
        }

        let status = run.status();
        let iterations = run.iteration();
        let length_history = std::mem::take(&mut run.length_history);
        let (best, best_length) = best
            .take()
            .ok_or(TspError::NoFiniteTour)?
            .into_parts();

        log::info!(
            "aco run finished: {:?} after {} iterations, best {:.4}",
            status,
            iterations,
            best_length
        );

        Ok(AcoResult {
            best,
            best_length,
            iterations,
            cancelled: status == RunStatus::Cancelled,
            length_history,
        })
    }
}
