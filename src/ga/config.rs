//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the generational loop.

use super::operators::{Crossover, Mutation};
use crate::error::{Result, TspError};

/// Configuration for the genetic tour search.
///
/// Controls population size, elitism, operator choice and rates,
/// termination conditions, and parallelism.
///
/// # Defaults
///
/// ```
/// use u_tsp::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 200);
/// assert_eq!(config.max_generations, 500);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_tsp::ga::{Crossover, GaConfig};
///
/// let config = GaConfig::default()
///     .with_population_size(300)
///     .with_elite_count(30)
///     .with_crossover(Crossover::PartiallyMapped)
///     .with_mutation_rate(0.05);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GaConfig {
    /// Number of tours in the population.
    ///
    /// Larger populations increase diversity but slow down each generation.
    pub population_size: usize,

    /// Number of top-ranked tours carried unchanged into the next generation.
    ///
    /// Parents are drawn uniformly from this elite set. Must be at least 1
    /// and less than `population_size`.
    pub elite_count: usize,

    /// Probability of mutating a freshly bred child (0.0–1.0).
    pub mutation_rate: f64,

    /// Maximum number of generations before termination.
    pub max_generations: usize,

    /// Number of consecutive generations without improvement before stopping.
    ///
    /// Set to 0 to disable stagnation-based termination.
    pub stagnation_limit: usize,

    /// Minimum relative improvement to reset the stagnation counter.
    ///
    /// When a new best length is found, the improvement ratio is computed as
    /// `(old - new) / old`. If this ratio is below `convergence_threshold`,
    /// the generation is still counted as stagnating.
    ///
    /// Set to 0.0 to count any improvement (the default).
    pub convergence_threshold: f64,

    /// Crossover operator.
    pub crossover: Crossover,

    /// Mutation operator.
    pub mutation: Mutation,

    /// Pass cap for the final 2-opt polish (0 = run to a local optimum).
    pub refine_max_passes: usize,

    /// Whether to score the population in parallel.
    ///
    /// Only has an effect when the crate is built with the `parallel`
    /// feature.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 200,
            elite_count: 20,
            mutation_rate: 0.1,
            max_generations: 500,
            stagnation_limit: 100,
            convergence_threshold: 0.0,
            crossover: Crossover::default(),
            mutation: Mutation::default(),
            refine_max_passes: 1_000,
            parallel: true,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of elites.
    pub fn with_elite_count(mut self, n: usize) -> Self {
        self.elite_count = n;
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the maximum number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the stagnation limit (0 to disable).
    pub fn with_stagnation_limit(mut self, limit: usize) -> Self {
        self.stagnation_limit = limit;
        self
    }

    /// Sets the convergence threshold.
    pub fn with_convergence_threshold(mut self, threshold: f64) -> Self {
        self.convergence_threshold = threshold;
        self
    }

    /// Sets the crossover operator.
    pub fn with_crossover(mut self, crossover: Crossover) -> Self {
        self.crossover = crossover;
        self
    }

    /// Sets the mutation operator.
    pub fn with_mutation(mut self, mutation: Mutation) -> Self {
        self.mutation = mutation;
        self
    }

    /// Sets the pass cap of the final 2-opt polish.
    pub fn with_refine_max_passes(mut self, passes: usize) -> Self {
        self.refine_max_passes = passes;
        self
    }

    /// Enables or disables parallel scoring.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Preset for interactive use: small population, early stop.
    ///
    /// - Population: 100 (elites 10), Generations: 200, Stagnation limit: 40
    pub fn fast() -> Self {
        Self {
            population_size: 100,
            elite_count: 10,
            max_generations: 200,
            stagnation_limit: 40,
            ..Self::default()
        }
    }

    /// Preset balancing quality and time.
    ///
    /// - Population: 300 (elites 30), Generations: 500, Stagnation limit: 100
    pub fn balanced() -> Self {
        Self {
            population_size: 300,
            elite_count: 30,
            max_generations: 500,
            stagnation_limit: 100,
            ..Self::default()
        }
    }

    /// Preset for quality: large population, many generations.
    ///
    /// - Population: 1000 (elites 100), Generations: 2000, Stagnation limit: 200
    /// - Convergence threshold: 0.0005
    pub fn quality() -> Self {
        Self {
            population_size: 1000,
            elite_count: 100,
            max_generations: 2000,
            stagnation_limit: 200,
            convergence_threshold: 0.0005,
            ..Self::default()
        }
    }

    /// Automatically selects a preset based on the number of points.
    ///
    /// - `point_count < 30` → [`fast()`](Self::fast)
    /// - `30 ≤ point_count < 100` → [`balanced()`](Self::balanced)
    /// - `point_count ≥ 100` → [`quality()`](Self::quality)
    pub fn auto_select(point_count: usize) -> Self {
        if point_count < 30 {
            Self::fast()
        } else if point_count < 100 {
            Self::balanced()
        } else {
            Self::quality()
        }
    }

    /// Validates the configuration.
    ///
    /// Returns [`TspError::InvalidConfig`] describing the first invalid
    /// parameter.
    pub fn validate(&self) -> Result<()> {
        if self.population_size < 2 {
            return Err(TspError::invalid_config(
                "population_size must be at least 2",
            ));
        }
        if self.elite_count == 0 {
            return Err(TspError::invalid_config("elite_count must be at least 1"));
        }
        if self.elite_count >= self.population_size {
            return Err(TspError::invalid_config(format!(
                "elite_count ({}) must be less than population_size ({})",
                self.elite_count, self.population_size
            )));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(TspError::invalid_config(format!(
                "mutation_rate must be in [0, 1], got {}",
                self.mutation_rate
            )));
        }
        if self.max_generations == 0 {
            return Err(TspError::invalid_config(
                "max_generations must be at least 1",
            ));
        }
        if !(self.convergence_threshold >= 0.0 && self.convergence_threshold.is_finite()) {
            return Err(TspError::invalid_config(format!(
                "convergence_threshold must be finite and non-negative, got {}",
                self.convergence_threshold
            )));
        }
        Ok(())
    }
}
