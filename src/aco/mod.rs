//! Ant colony tour search.
//!
//! Ants build tours one point at a time, choosing the next unvisited point
//! with probability proportional to `τ^α · (1/d)^β`, where `τ` is the
//! pheromone on the edge and `d` its length. After each iteration the
//! pheromone evaporates and the selected tours reinforce their edges with
//! `Q / length`.
//!
//! # Key Types
//!
//! - [`AcoConfig`]: Algorithm parameters, [`Deposit`] policy and per-ant [`Repair`]
//! - [`PheromoneMatrix`]: Dense pheromone table
//! - [`AcoRun`]: Resumable run, one iteration per [`step`](AcoRun::step)
//! - [`AcoRunner`] / [`AcoResult`]: Batch execution
//!
//! # References
//!
//! - Dorigo, Maniezzo & Colorni (1996), "Ant System: Optimization by a Colony
//!   of Cooperating Agents"
//! - Dorigo & Stützle (2004), *Ant Colony Optimization*

mod config;
mod pheromone;
mod runner;

pub use config::{AcoConfig, Deposit, Repair};
pub use pheromone::PheromoneMatrix;
pub use runner::{AcoResult, AcoRun, AcoRunner};
