//! Colony configuration.

use crate::error::{Result, TspError};

/// Which ant tours deposit pheromone after an iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Deposit {
    /// Every ant of the iteration deposits (Ant System).
    #[default]
    AllAnts,
    /// Only the shortest tour of the iteration deposits.
    IterationBest,
    /// Only the shortest tour seen so far in the run deposits.
    BestSoFar,
}

impl Deposit {
    /// Whether ants can be scored with a pruning bound.
    ///
    /// Only policies that ignore everything but the best tour allow pruning.
    pub fn allows_pruning(self) -> bool {
        !matches!(self, Deposit::AllAnts)
    }
}

/// Local repair applied to each constructed ant tour before scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Repair {
    /// Score the tour as constructed.
    None,
    /// Distance-driven 2-opt.
    #[default]
    TwoOpt,
    /// Geometric crossing removal.
    Uncross,
}

/// Configuration for the ant colony tour search.
///
/// # Examples
///
/// ```
/// use u_tsp::aco::{AcoConfig, Deposit, Repair};
///
/// let config = AcoConfig::default()
///     .with_ant_count(30)
///     .with_evaporation_rate(0.3)
///     .with_deposit(Deposit::IterationBest)
///     .with_repair(Repair::None)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AcoConfig {
    /// Pheromone exponent (α).
    pub alpha: f64,

    /// Inverse-distance exponent (β).
    pub beta: f64,

    /// Fraction of pheromone removed per iteration (ρ, 0.0–1.0).
    ///
    /// `1.0` wipes the matrix every iteration; construction then falls back
    /// to uniform choice until new pheromone is deposited.
    pub evaporation_rate: f64,

    /// Deposit numerator (Q): a tour of length `L` adds `Q / L` per edge.
    pub deposit_constant: f64,

    /// Ants per iteration.
    pub ant_count: usize,

    /// Number of iterations.
    pub max_iterations: usize,

    /// Uniform starting pheromone level (τ₀).
    pub initial_pheromone: f64,

    /// Deposit policy.
    pub deposit: Deposit,

    /// Per-ant repair.
    pub repair: Repair,

    /// Pass cap for the per-ant repair (0 = until converged).
    pub refine_max_passes: usize,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for AcoConfig {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            beta: 5.0,
            evaporation_rate: 0.5,
            deposit_constant: 100.0,
            ant_count: 20,
            max_iterations: 200,
            initial_pheromone: 1.0,
            deposit: Deposit::default(),
            repair: Repair::default(),
            refine_max_passes: 1_000,
            seed: None,
        }
    }
}

impl AcoConfig {
    /// Sets α.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Sets β.
    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    /// Sets the evaporation rate.
    pub fn with_evaporation_rate(mut self, rate: f64) -> Self {
        self.evaporation_rate = rate;
        self
    }

    /// Sets the deposit constant Q.
    pub fn with_deposit_constant(mut self, q: f64) -> Self {
        self.deposit_constant = q;
        self
    }

    /// Sets the number of ants per iteration.
    pub fn with_ant_count(mut self, n: usize) -> Self {
        self.ant_count = n;
        self
    }

    /// Sets the number of iterations.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets τ₀.
    pub fn with_initial_pheromone(mut self, tau0: f64) -> Self {
        self.initial_pheromone = tau0;
        self
    }

    /// Sets the deposit policy.
    pub fn with_deposit(mut self, deposit: Deposit) -> Self {
        self.deposit = deposit;
        self
    }

    /// Sets the per-ant repair.
    pub fn with_repair(mut self, repair: Repair) -> Self {
        self.repair = repair;
        self
    }

    /// Sets the pass cap of the per-ant repair.
    pub fn with_refine_max_passes(mut self, passes: usize) -> Self {
        self.refine_max_passes = passes;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// One ant per point, defaults otherwise.
    pub fn auto_select(point_count: usize) -> Self {
        Self {
            ant_count: point_count.max(1),
            ..Self::default()
        }
    }

    /// Validates the configuration.
    ///
    /// Returns [`TspError::InvalidConfig`] describing the first invalid
    /// parameter.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("alpha", self.alpha), ("beta", self.beta)] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(TspError::invalid_config(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.evaporation_rate) {
            return Err(TspError::invalid_config(format!(
                "evaporation_rate must be in [0, 1], got {}",
                self.evaporation_rate
            )));
        }
        if !(self.deposit_constant.is_finite() && self.deposit_constant > 0.0) {
            return Err(TspError::invalid_config(format!(
                "deposit_constant must be positive, got {}",
                self.deposit_constant
            )));
        }
        if self.ant_count == 0 {
            return Err(TspError::invalid_config("ant_count must be at least 1"));
        }
        if self.max_iterations == 0 {
            return Err(TspError::invalid_config("max_iterations must be at least 1"));
        }
        if !(self.initial_pheromone.is_finite() && self.initial_pheromone > 0.0) {
            return Err(TspError::invalid_config(format!(
                "initial_pheromone must be positive, got {}",
                self.initial_pheromone
            )));
        }
        Ok(())
    }
}
