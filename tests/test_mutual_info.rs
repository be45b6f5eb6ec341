//! Tests for the k-NN mutual information estimator

use featrank::pipeline::{mutual_info_regression, FeatureTable, MutualInfoEstimator};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

#[path = "common/mod.rs"]
mod common;

use common::create_synthetic_table;

fn uniform(rng: &mut StdRng, n: usize) -> Vec<f64> {
    (0..n).map(|_| rng.gen_range(0.0..1.0)).collect()
}

#[test]
fn test_independent_variables_near_zero() {
    let mut rng = StdRng::seed_from_u64(7);
    let x = uniform(&mut rng, 500);
    let y = uniform(&mut rng, 500);

    let mi = MutualInfoEstimator::default().estimate(&x, &y);
    assert!(mi >= 0.0);
    assert!(mi < 0.05, "Independent variables gave MI {}", mi);
}

#[test]
fn test_dependent_exceeds_independent() {
    let mut rng = StdRng::seed_from_u64(11);
    let x = uniform(&mut rng, 300);
    let noise = uniform(&mut rng, 300);
    let y: Vec<f64> = x.iter().zip(&noise).map(|(a, e)| a + 0.01 * e).collect();

    let est = MutualInfoEstimator::default();
    let dependent = est.estimate(&x, &y);
    let independent = est.estimate(&x, &noise);

    assert!(dependent > 1.0, "Near-identity relation gave MI {}", dependent);
    assert!(dependent > independent);
}

#[test]
fn test_nonlinear_dependence_detected() {
    let mut rng = StdRng::seed_from_u64(3);
    let x: Vec<f64> = (0..400).map(|_| rng.gen_range(-1.0..1.0)).collect();
    let y: Vec<f64> = x.iter().map(|v| v * v).collect();

    let mi = MutualInfoEstimator::default().estimate(&x, &y);
    assert!(mi > 0.5, "Quadratic relation gave MI {}", mi);
}

#[test]
fn test_estimate_never_negative() {
    let x = [1.0, 1.0, 1.0, 1.0, 1.0, 1.0];
    let y = [0.5, 2.0, 1.0, 3.0, 0.1, 4.0];
    assert!(MutualInfoEstimator::new(3).estimate(&x, &y) >= 0.0);
}

#[test]
fn test_neighbors_clamped_to_sample_size() {
    let x = [1.0, 2.0, 3.0];
    let y = [1.0, 2.0, 3.0];
    let mi = MutualInfoEstimator::new(10).estimate(&x, &y);
    assert!(mi.is_finite());
}

#[test]
fn test_invariant_under_row_permutation() {
    let (table, target) = create_synthetic_table(200, 2, 2, 42);

    let mut order: Vec<usize> = (0..table.n_rows()).collect();
    order.shuffle(&mut StdRng::seed_from_u64(99));
    let permuted = table.permute_rows(&order);
    let permuted_target: Vec<f64> = order.iter().map(|&i| target[i]).collect();

    let original = mutual_info_regression(&table, &target, 3);
    let shuffled = mutual_info_regression(&permuted, &permuted_target, 3);

    for (name, (a, b)) in table.names().iter().zip(original.iter().zip(&shuffled)) {
        assert!((a - b).abs() < 1e-9, "{}: {} vs {}", name, a, b);
    }
}

#[test]
fn test_regression_scores_in_table_order() {
    let x: Vec<f64> = (0..100).map(|i| i as f64).collect();
    let flat = vec![2.0; 100];
    let table = FeatureTable::from_columns([("linear", x.clone()), ("flat", flat)]).unwrap();

    let scores = mutual_info_regression(&table, &x, 3);
    assert_eq!(scores.len(), 2);
    assert!(scores[0] > scores[1]);
    assert!(scores[1] < 0.05);
}
