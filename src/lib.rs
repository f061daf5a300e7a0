//! Heuristic closed-tour optimization for planar points.
//!
//! Finds short round trips through a set of points (the Traveling Salesman
//! Problem) with two metaheuristics over one data model:
//!
//! - **Genetic search** ([`ga`]): elitist population of permutations with
//!   order/partially-mapped crossover, swap/invert mutation and a final
//!   2-opt polish.
//! - **Ant colony search** ([`aco`]): probabilistic tour construction guided
//!   by a pheromone table that evaporates and is reinforced every iteration.
//!
//! Both share the [`geometry`] distance table, the [`tour`] representation
//! with bounded perimeter evaluation, and the [`local_search`] refinements.
//! A [`session::Session`] runs either strategy step by step, reports each
//! improving tour to an observer and supports cooperative cancellation.
//! Each strategy can also be run in batch through [`ga::GaRunner`] and
//! [`aco::AcoRunner`].
//!
//! # Features
//!
//! - `parallel`: score GA populations with rayon.
//! - `serde`: `Serialize`/`Deserialize` for points, configurations and
//!   [`session::Strategy`].
//!
//! Progress is logged through the `log` facade; installing a logger is up to
//! the host.

pub mod aco;
pub mod error;
pub mod ga;
pub mod geometry;
pub mod local_search;
pub mod random;
pub mod session;
pub mod tour;

pub use error::{Result, TspError};
