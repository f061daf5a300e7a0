//! Genetic tour search.
//!
//! A population of random tours evolves by elitist breeding: the fittest
//! `elite_count` tours survive unchanged and parent the rest of the next
//! generation through permutation crossover and mutation. The best tour of
//! the run is polished with 2-opt before the run completes.
//!
//! # Key Types
//!
//! - [`GaConfig`]: Algorithm parameters (population size, operators, presets)
//! - [`GaRun`]: Resumable run, one generation per [`step`](GaRun::step)
//! - [`GaRunner`]: Executes a run to completion
//! - [`GaResult`]: Final result with statistics
//! - [`Population`]: Tours with parallel length and fitness vectors
//!
//! # Submodules
//!
//! - [`operators`]: Permutation crossover (OX, PMX) and mutation operators
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Larrañaga et al. (1999), *Genetic Algorithms for the Travelling Salesman Problem:
//!   A Review of Representations and Operators*

mod config;
pub mod operators;
mod population;
mod runner;

pub use config::GaConfig;
pub use operators::{Crossover, Mutation};
pub use population::{fitness_of, Population};
pub use runner::{GaResult, GaRun, GaRunner};
pub(crate) use runner::MIN_POINTS;
