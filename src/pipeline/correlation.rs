//! Correlation of selected features against the target

use statrs::distribution::{ContinuousCDF, StudentsT};

use super::table::FeatureTable;

/// Pearson correlation of one feature with the target
#[derive(Debug, Clone, PartialEq)]
pub struct TargetCorrelation {
    pub feature: String,
    pub correlation: f64,
    pub p_value: f64,
}

/// Correlate each named feature with the target.
///
/// Features missing from the table are skipped. Degenerate columns (zero
/// variance) get r = 0 and p = 1. Results are sorted by absolute correlation
/// descending; ties keep the order of `features`.
pub fn correlate_with_target(
    table: &FeatureTable,
    features: &[String],
    target: &[f64],
) -> Vec<TargetCorrelation> {
    let mut results: Vec<TargetCorrelation> = features
        .iter()
        .filter_map(|name| {
            let values = table.column(name)?;
            let (correlation, p_value) = match compute_pearson_correlation(values, target) {
                Some(r) => (r, pearson_p_value(r, values.len())),
                None => (0.0, 1.0),
            };
            Some(TargetCorrelation {
                feature: name.clone(),
                correlation,
                p_value,
            })
        })
        .collect();

    results.sort_by(|a, b| b.correlation.abs().total_cmp(&a.correlation.abs()));
    results
}

/// Compute Pearson correlation using Welford's algorithm
///
/// Single pass for numerical stability. Returns `None` for mismatched or
/// empty input and when either side has zero variance.
pub fn compute_pearson_correlation(x: &[f64], y: &[f64]) -> Option<f64> {
    let n = x.len();
    if n == 0 || n != y.len() {
        return None;
    }

    let mut count = 0.0;
    let mut mean_x = 0.0;
    let mut mean_y = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    let mut cov_xy = 0.0;

    for (&xi, &yi) in x.iter().zip(y.iter()) {
        count += 1.0;
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        mean_x += dx / count;
        mean_y += dy / count;
        var_x += dx * (xi - mean_x);
        var_y += dy * (yi - mean_y);
        cov_xy += dx * (yi - mean_y);
    }

    if var_x <= 0.0 || var_y <= 0.0 {
        return None;
    }

    let r = cov_xy / (var_x.sqrt() * var_y.sqrt());
    Some(r.clamp(-1.0, 1.0))
}

/// Two-sided p-value for H0: ρ = 0 using the t-distribution with n - 2 dof
pub fn pearson_p_value(r: f64, n: usize) -> f64 {
    if n < 3 {
        return 1.0;
    }
    if r.abs() >= 1.0 {
        return 0.0;
    }

    let dof = (n - 2) as f64;
    let t = r * (dof / (1.0 - r * r)).sqrt();
    match StudentsT::new(0.0, 1.0, dof) {
        Ok(dist) => (2.0 * dist.sf(t.abs())).min(1.0),
        Err(_) => 1.0,
    }
}
