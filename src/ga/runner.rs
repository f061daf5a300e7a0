//! GA generational loop.
//!
//! [`GaRun`] is the resumable form: one [`step`](GaRun::step) scores, ranks
//! and breeds one generation. [`GaRunner`] drives a `GaRun` to completion
//! for batch use.

use super::config::GaConfig;
use super::population::Population;
use crate::error::{Result, TspError};
use crate::geometry::ProblemInstance;
use crate::local_search::two_opt_limited;
use crate::random::rng_from_seed;
use crate::session::{RunStatus, StepReport};
use crate::tour::{BestTracker, Tour};
use rand::rngs::StdRng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Minimum number of points for a run.
pub(crate) const MIN_POINTS: usize = 3;

/// Result of a batch GA run.
#[derive(Debug, Clone)]
pub struct GaResult {
    /// The shortest tour found.
    pub best: Tour,

    /// Perimeter of `best`.
    pub best_length: f64,

    /// Number of generations executed.
    pub generations: usize,

    /// Whether the run stopped on the stagnation limit.
    pub stagnated: bool,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Best length at the end of each generation.
    pub length_history: Vec<f64>,
}

/// A resumable GA run over one problem instance.
///
/// The instance is passed to every [`step`](Self::step) rather than held, so
/// the owner can keep it next to the run. It must not change between steps.
#[derive(Debug)]
pub struct GaRun {
    config: GaConfig,
    point_count: usize,
    population: Population,
    rng: StdRng,
    generation: usize,
    stagnation: usize,
    status: RunStatus,
    length_history: Vec<f64>,
}

impl GaRun {
    /// Validates `config` and seeds a random initial population.
    pub fn new(instance: &ProblemInstance, config: &GaConfig) -> Result<Self> {
        config.validate()?;
        let n = instance.len();
        if n < MIN_POINTS {
            return Err(TspError::InsufficientPoints {
                required: MIN_POINTS,
                found: n,
            });
        }

        let mut rng = rng_from_seed(config.seed);
        let population = Population::random(config.population_size, n, &mut rng);

        Ok(Self {
            config: config.clone(),
            point_count: n,
            population,
            rng,
            generation: 0,
            stagnation: 0,
            status: RunStatus::Running,
            length_history: Vec::new(),
        })
    }

    /// Current status.
    pub fn status(&self) -> RunStatus {
        self.status
    }

    /// Generations completed so far.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Best length after each completed generation.
    pub fn length_history(&self) -> &[f64] {
        &self.length_history
    }

    /// Stops the run. Later steps do nothing.
    pub fn cancel(&mut self) {
        if !self.status.is_terminal() {
            self.status = RunStatus::Cancelled;
            self.population = Population::default();
        }
    }

    /// Executes one generation.
    ///
    /// Every candidate that improves `best` is listed in the report, in the
    /// order it was accepted. On the final generation the best tour is
    /// polished with 2-opt before the terminal status is returned.
    pub fn step(&mut self, instance: &ProblemInstance, best: &mut BestTracker) -> StepReport {
        let mut report = StepReport::new(self.status);
        if self.status.is_terminal() {
            return report;
        }
        debug_assert_eq!(instance.len(), self.point_count);

        let table = instance.distances();
        self.population.evaluate(table, self.config.parallel);
        self.population.rank();

        let previous = best.bound();
        let improved = match self.population.leader() {
            Some((leader, length)) => report.offer(best, leader, length),
            None => false,
        };
        if improved && self.relative_gain(previous, best.bound()) >= self.config.convergence_threshold
        {
            self.stagnation = 0;
        } else {
            self.stagnation += 1;
        }

        self.generation += 1;
        self.length_history.push(best.bound());
        log::debug!(
            "ga generation {}: best {:.4}, stagnation {}",
            self.generation,
            best.bound(),
            self.stagnation
        );

        if self.generation >= self.config.max_generations {
            self.finish(RunStatus::Converged, instance, best, &mut report);
        } else if self.config.stagnation_limit > 0
            && self.stagnation >= self.config.stagnation_limit
        {
            self.finish(RunStatus::Stagnated, instance, best, &mut report);
        } else {
            self.population = self.population.breed(
                self.config.population_size,
                self.config.elite_count,
                self.config.crossover,
                self.config.mutation,
                self.config.mutation_rate,
                &mut self.rng,
            );
        }

        report.status = self.status;
        report
    }

    fn relative_gain(&self, previous: f64, current: f64) -> f64 {
        if previous.is_finite() && previous > 0.0 {
            (previous - current) / previous
        } else {
            f64::INFINITY
        }
    }

    fn finish(
        &mut self,
        status: RunStatus,
        instance: &ProblemInstance,
        best: &mut BestTracker,
        report: &mut StepReport,
    ) {
        let table = instance.distances();
        let refined = best
            .get()
            .map(|current| two_opt_limited(current.tour(), table, self.config.refine_max_passes));
        if let Some(outcome) = refined {
            let length = outcome.tour.length_unchecked(table);
            if report.offer(best, &outcome.tour, length) {
                log::debug!(
                    "ga final 2-opt: {:.4} after {} moves",
                    length,
                    outcome.moves
                );
                if let Some(last) = self.length_history.last_mut() {
                    *last = length;
                }
            }
        }
        self.status = status;
        self.population = Population::default();
    }
}

/// Runs the GA to completion.
///
/// # Usage
///
/// ```
/// use u_tsp::ga::{GaConfig, GaRunner};
/// use u_tsp::geometry::ProblemInstance;
///
/// let square = ProblemInstance::from_points([(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]).unwrap();
/// let config = GaConfig::fast().with_seed(42);
/// let result = GaRunner::run(&square, &config).unwrap();
/// assert!((result.best_length - 4.0).abs() < 1e-9);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA optimization.
    ///
    /// # Errors
    /// [`TspError::InvalidConfig`] for an invalid configuration and
    /// [`TspError::InsufficientPoints`] for fewer than three points.
    pub fn run(instance: &ProblemInstance, config: &GaConfig) -> Result<GaResult> {
        Self::run_with_cancel(instance, config, None)
    }

    /// Runs the GA with an optional cancellation token.
    ///
    /// The flag is checked between generations; at least one generation
    /// always runs, so a result is available even when the flag is set
    /// before the call.
    pub fn run_with_cancel(
        instance: &ProblemInstance,
        config: &GaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<GaResult> {
        let mut run = GaRun::new(instance, config)?;
        let mut best = BestTracker::new();
        log::info!(
            "ga run started: {} points, population {}",
            instance.len(),
            config.population_size
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
        let generations = run.generation();
        let length_history = std::mem::take(&mut run.length_history);
        let (best, best_length) = best
            .take()
            .ok_or(TspError::NoFiniteTour)?
            .into_parts();

        log::info!(
            "ga run finished: {:?} after {} generations, best {:.4}",
            status,
            generations,
            best_length
        );

        Ok(GaResult {
            best,
            best_length,
            generations,
            stagnated: status == RunStatus::Stagnated,
            cancelled: status == RunStatus::Cancelled,
            length_history,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
