//! Property-based tests for u-tsp.
//!
//! Uses proptest to verify tour and operator invariants across many random
//! inputs.

use proptest::prelude::*;
use u_tsp::ga::operators::{invert_mutation, order_crossover, pmx_crossover, swap_mutation};
use u_tsp::geometry::ProblemInstance;
use u_tsp::local_search::{two_opt, uncross};
use u_tsp::random::{create_rng, random_permutation};
use u_tsp::tour::{is_permutation, BestTracker, Perimeter, Tour};

// ============================================================================
// Input Generation Strategies
// ============================================================================

/// Random coordinates for `n` points.
fn random_coords(n: usize) -> impl Strategy<Value = Vec<(f64, f64)>> {
    prop::collection::vec((0.0..100.0f64, 0.0..100.0f64), n)
}

/// A random instance with 3-20 points.
fn random_instance() -> impl Strategy<Value = ProblemInstance> {
    (3usize..20)
        .prop_flat_map(random_coords)
        .prop_map(|coords| ProblemInstance::from_points(coords).unwrap())
}

/// A random instance together with a random tour over it.
fn instance_and_tour() -> impl Strategy<Value = (ProblemInstance, Tour)> {
    (random_instance(), any::<u64>()).prop_map(|(instance, seed)| {
        let mut rng = create_rng(seed);
        let tour = Tour::random(instance.len(), &mut rng);
        (instance, tour)
    })
}

/// Two random permutations of the same length.
fn parent_pair() -> impl Strategy<Value = (Vec<usize>, Vec<usize>, u64)> {
    (1usize..40, any::<u64>(), any::<u64>()).prop_map(|(n, s1, seed)| {
        let mut rng = create_rng(s1);
        let p1 = random_permutation(n, &mut rng);
        let p2 = random_permutation(n, &mut rng);
        (p1, p2, seed)
    })
}

// ============================================================================
// Operator Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_order_crossover_yields_permutation((p1, p2, seed) in parent_pair()) {
        let mut rng = create_rng(seed);
        let child = order_crossover(&p1, &p2, &mut rng);
        prop_assert_eq!(child.len(), p1.len());
        prop_assert!(is_permutation(&child));
    }

    #[test]
    fn prop_pmx_crossover_yields_permutation((p1, p2, seed) in parent_pair()) {
        let mut rng = create_rng(seed);
        let child = pmx_crossover(&p1, &p2, &mut rng);
        prop_assert_eq!(child.len(), p1.len());
        prop_assert!(is_permutation(&child));
    }

    #[test]
    fn prop_mutations_preserve_permutation((mut perm, _, seed) in parent_pair()) {
        let mut rng = create_rng(seed);
        swap_mutation(&mut perm, &mut rng);
        prop_assert!(is_permutation(&perm));
        invert_mutation(&mut perm, &mut rng);
        prop_assert!(is_permutation(&perm));
    }
}

// ============================================================================
// Perimeter Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_perimeter_invariant_under_rotation_and_reversal(
        (instance, tour) in instance_and_tour(),
        k in 0usize..50,
    ) {
        let table = instance.distances();
        let base = tour.length(table).unwrap();
        let rotated = tour.rotated(k).length(table).unwrap();
        let reversed = tour.reversed().length(table).unwrap();
        prop_assert!((base - rotated).abs() < 1e-9 * base.max(1.0));
        prop_assert!((base - reversed).abs() < 1e-9 * base.max(1.0));
    }

    #[test]
    fn prop_pruned_evaluation_agrees_with_full(
        (instance, tour) in instance_and_tour(),
        factor in 0.0..2.0f64,
    ) {
        let table = instance.distances();
        let full = tour.length(table).unwrap();
        let bound = full * factor;
        match tour.perimeter(table, bound).unwrap() {
            Perimeter::Length(len) => {
                prop_assert!(full < bound);
                prop_assert_eq!(len, full);
            }
            Perimeter::ExceedsBound => prop_assert!(full >= bound),
        }
    }

    #[test]
    fn prop_unbounded_perimeter_never_pruned((instance, tour) in instance_and_tour()) {
        let table = instance.distances();
        let result = tour.perimeter(table, f64::INFINITY).unwrap();
        prop_assert_eq!(result.length(), Some(tour.length(table).unwrap()));
    }
}

// ============================================================================
// Local Refinement Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn prop_two_opt_never_longer_and_idempotent((instance, tour) in instance_and_tour()) {
        let table = instance.distances();
        let before = tour.length(table).unwrap();
        let refined = two_opt(&tour, table);
        prop_assert!(is_permutation(refined.order()));
        prop_assert!(refined.length(table).unwrap() <= before + 1e-9);
        prop_assert_eq!(two_opt(&refined, table), refined);
    }

    #[test]
    fn prop_uncross_yields_permutation((instance, tour) in instance_and_tour()) {
        let outcome = uncross(&tour, &instance, 0);
        prop_assert!(is_permutation(outcome.tour.order()));
        prop_assert_eq!(outcome.tour.len(), tour.len());
    }

    #[test]
    fn prop_best_tracker_is_monotone(lengths in prop::collection::vec(0.0..1000.0f64, 1..50)) {
        let mut best = BestTracker::new();
        let tour = Tour::identity(3);
        let mut last = f64::INFINITY;
        for length in lengths {
            let accepted = best.consider(&tour, length);
            prop_assert_eq!(accepted, length < last);
            prop_assert!(best.bound() <= last);
            last = best.bound();
        }
    }
}
