//! Population of tours with parallel score vectors.
//!
//! Scores live next to the tours, not inside them: `lengths[i]` and
//! `fitness[i]` describe `tours[i]` after [`Population::evaluate`].

use super::operators::{Crossover, Mutation};
use crate::geometry::DistanceTable;
use crate::tour::Tour;
use rand::Rng;

/// Fitness of a tour of the given length: `1 / (length + 1)`.
///
/// Lies in `(0, 1]`, decreases with length, and is defined for length 0.
pub fn fitness_of(length: f64) -> f64 {
    1.0 / (length + 1.0)
}

/// An ordered collection of tours and their scores.
#[derive(Debug, Clone, Default)]
pub struct Population {
    tours: Vec<Tour>,
    lengths: Vec<f64>,
    fitness: Vec<f64>,
    ranked: bool,
}

impl Population {
    /// `size` uniformly random tours over `n` points.
    pub fn random<R: Rng>(size: usize, n: usize, rng: &mut R) -> Self {
        Self::from_tours((0..size).map(|_| Tour::random(n, rng)).collect())
    }

    /// Wraps existing tours; scores are computed by [`evaluate`](Self::evaluate).
    pub fn from_tours(tours: Vec<Tour>) -> Self {
        Self {
            tours,
            lengths: Vec::new(),
            fitness: Vec::new(),
            ranked: false,
        }
    }

    /// Number of tours.
    pub fn len(&self) -> usize {
        self.tours.len()
    }

    /// Returns true if the population holds no tours.
    pub fn is_empty(&self) -> bool {
        self.tours.is_empty()
    }

    /// The tours, in rank order once [`rank`](Self::rank) has run.
    pub fn tours(&self) -> &[Tour] {
        &self.tours
    }

    /// Tour lengths, parallel to [`tours`](Self::tours).
    pub fn lengths(&self) -> &[f64] {
        &self.lengths
    }

    /// Fitness scores, parallel to [`tours`](Self::tours).
    pub fn fitness(&self) -> &[f64] {
        &self.fitness
    }

    /// Computes length and fitness of every tour.
    ///
    /// With the `parallel` feature and `parallel == true`, lengths are
    /// computed with rayon.
    pub fn evaluate(&mut self, table: &DistanceTable, parallel: bool) {
        self.lengths = compute_lengths(&self.tours, table, parallel);
        self.fitness = self.lengths.iter().map(|&len| fitness_of(len)).collect();
        self.ranked = false;
    }

    /// Sorts tours by descending fitness. Equal scores keep their order.
    ///
    /// # Panics
    /// Panics if the population has not been evaluated.
    pub fn rank(&mut self) {
        assert_eq!(
            self.fitness.len(),
            self.tours.len(),
            "population must be evaluated before ranking"
        );
        let mut order: Vec<usize> = (0..self.tours.len()).collect();
        order.sort_by(|&a, &b| self.fitness[b].total_cmp(&self.fitness[a]));

        let mut slots: Vec<Option<Tour>> = std::mem::take(&mut self.tours)
            .into_iter()
            .map(Some)
            .collect();
        self.tours = order
            .iter()
            .filter_map(|&i| slots[i].take())
            .collect();
        self.lengths = order.iter().map(|&i| self.lengths[i]).collect();
        self.fitness = order.iter().map(|&i| self.fitness[i]).collect();
        self.ranked = true;
    }

    /// The fittest tour and its length, once ranked.
    pub fn leader(&self) -> Option<(&Tour, f64)> {
        if !self.ranked {
            return None;
        }
        self.tours.first().zip(self.lengths.first().copied())
    }

    /// Breeds the next generation.
    ///
    /// The top `elite_count` tours are copied unchanged; the rest are
    /// children of two parents drawn uniformly from the elites, mutated with
    /// probability `mutation_rate`. The result is unscored.
    ///
    /// # Panics
    /// Panics if the population is not ranked or `elite_count` is zero.
    pub fn breed<R: Rng>(
        &self,
        size: usize,
        elite_count: usize,
        crossover: Crossover,
        mutation: Mutation,
        mutation_rate: f64,
        rng: &mut R,
    ) -> Population {
        assert!(self.ranked, "population must be ranked before breeding");
        let elites = &self.tours[..elite_count.min(self.tours.len())];
        assert!(!elites.is_empty(), "breeding needs at least one elite");

        let mut next: Vec<Tour> = Vec::with_capacity(size);
        next.extend(elites.iter().cloned());

        while next.len() < size {
            let a = &elites[rng.random_range(0..elites.len())];
            let b = &elites[rng.random_range(0..elites.len())];
            let mut child = crossover.apply(a.order(), b.order(), rng);
            if rng.random_range(0.0..1.0) < mutation_rate {
                mutation.apply(&mut child, rng);
            }
            next.push(Tour::from_permutation(child));
        }

        Population::from_tours(next)
    }
}

#[cfg(feature = "parallel")]
fn compute_lengths(tours: &[Tour], table: &DistanceTable, parallel: bool) -> Vec<f64> {
    use rayon::prelude::*;
    if parallel {
        tours
            .par_iter()
            .map(|t| t.length_unchecked(table))
            .collect()
    } else {
        tours.iter().map(|t| t.length_unchecked(table)).collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn compute_lengths(tours: &[Tour], table: &DistanceTable, _parallel: bool) -> Vec<f64> {
    tours.iter().map(|t| t.length_unchecked(table)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::ProblemInstance;
    use crate::random::create_rng;
    use crate::tour::is_permutation;

    fn square() -> ProblemInstance {
        ProblemInstance::from_points([(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]).unwrap()
    }

    #[test]
    fn test_fitness_of() {
        assert_eq!(fitness_of(0.0), 1.0);
        assert!((fitness_of(3.0) - 0.25).abs() < 1e-15);
        assert!(fitness_of(10.0) < fitness_of(9.0));
    }

    #[test]
    fn test_evaluate_and_rank() {
        let inst = square();
        let crossing = Tour::new(vec![0, 2, 1, 3]).unwrap();
        let perimeter = Tour::identity(4);
        let mut pop = Population::from_tours(vec![crossing.clone(), perimeter.clone()]);

        assert!(pop.leader().is_none());
        pop.evaluate(inst.distances(), false);
        pop.rank();

        let (leader, length) = pop.leader().unwrap();
        assert_eq!(leader, &perimeter);
        assert!((length - 4.0).abs() < 1e-12);
        assert_eq!(pop.tours()[1], crossing);
        assert!(pop.fitness()[0] > pop.fitness()[1]);
        assert!((pop.fitness()[0] - fitness_of(pop.lengths()[0])).abs() < 1e-15);
    }

    #[test]
    fn test_rank_is_stable_for_ties() {
        let inst = square();
        let a = Tour::identity(4);
        let b = a.rotated(1);
        let mut pop = Population::from_tours(vec![a.clone(), b.clone()]);
        pop.evaluate(inst.distances(), false);
        pop.rank();
        assert_eq!(pop.tours(), &[a, b]);
    }

    #[test]
    fn test_breed_keeps_elites_and_size() {
        let inst = square();
        let mut rng = create_rng(42);
        let mut pop = Population::random(20, 4, &mut rng);
        pop.evaluate(inst.distances(), false);
        pop.rank();

        let next = pop.breed(20, 5, Crossover::Order, Mutation::Invert, 0.5, &mut rng);
        assert_eq!(next.len(), 20);
        assert_eq!(&next.tours()[..5], &pop.tours()[..5]);
        for tour in next.tours() {
            assert!(is_permutation(tour.order()));
        }
        assert!(next.leader().is_none(), "bred population is unscored");
    }

    #[test]
    fn test_parallel_flag_gives_same_lengths() {
        let inst = square();
        let mut rng = create_rng(1);
        let mut a = Population::random(30, 4, &mut rng);
        let mut b = a.clone();
        a.evaluate(inst.distances(), false);
        b.evaluate(inst.distances(), true);
        assert_eq!(a.lengths(), b.lengths());
    }
}
