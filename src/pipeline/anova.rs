//! One-way ANOVA (Fisher discriminant score) across target classes
//!
//! Each distinct target value defines a class. For every feature the
//! F-statistic compares between-class to within-class variance, and the
//! p-value is the upper tail of the F(k - 1, N - k) distribution.

use statrs::distribution::{ContinuousCDF, FisherSnedecor};

use super::table::FeatureTable;

/// F-statistic and p-value for one feature
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnovaResult {
    pub f_statistic: f64,
    pub p_value: f64,
}

impl AnovaResult {
    /// Result for a degenerate test (no defined statistic)
    pub const UNDEFINED: AnovaResult = AnovaResult {
        f_statistic: f64::NAN,
        p_value: f64::NAN,
    };

    /// Replace NaN with the neutral values: F = 0, p = 1.
    pub fn normalized(self) -> Self {
        AnovaResult {
            f_statistic: if self.f_statistic.is_nan() { 0.0 } else { self.f_statistic },
            p_value: if self.p_value.is_nan() { 1.0 } else { self.p_value },
        }
    }
}

/// Row indices for each distinct target value, classes in ascending order
pub fn class_indices(target: &[f64]) -> Vec<Vec<usize>> {
    let mut order: Vec<usize> = (0..target.len()).collect();
    order.sort_by(|&a, &b| target[a].total_cmp(&target[b]));

    let mut classes: Vec<Vec<usize>> = Vec::new();
    let mut current: Option<f64> = None;
    for idx in order {
        if current != Some(target[idx]) {
            classes.push(Vec::new());
            current = Some(target[idx]);
        }
        if let Some(class) = classes.last_mut() {
            class.push(idx);
        }
    }
    classes
}

/// One-way ANOVA over pre-split groups. May return NaN components:
/// fewer than two groups, no within-group degrees of freedom, or a column
/// that is constant everywhere. Zero within-group variance with differing
/// group means gives F = +inf and p = 0.
pub fn f_oneway(groups: &[Vec<f64>]) -> AnovaResult {
    let k = groups.len();
    let n: usize = groups.iter().map(Vec::len).sum();

    if k < 2 || n <= k || groups.iter().any(Vec::is_empty) {
        return AnovaResult::UNDEFINED;
    }

    let grand_mean = groups.iter().flatten().sum::<f64>() / n as f64;
    let constant = {
        let first = groups[0][0];
        groups.iter().flatten().all(|&v| v == first)
    };
    if constant {
        return AnovaResult::UNDEFINED;
    }

    let mut ss_between = 0.0;
    let mut ss_within = 0.0;
    for group in groups {
        let mean = group.iter().sum::<f64>() / group.len() as f64;
        ss_between += group.len() as f64 * (mean - grand_mean).powi(2);

        let first = group[0];
        if group.iter().any(|&v| v != first) {
            ss_within += group.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
        }
    }

    let df_between = (k - 1) as f64;
    let df_within = (n - k) as f64;

    if ss_within == 0.0 {
        return AnovaResult {
            f_statistic: f64::INFINITY,
            p_value: 0.0,
        };
    }

    let f_statistic = (ss_between / df_between) / (ss_within / df_within);
    let p_value = match FisherSnedecor::new(df_between, df_within) {
        Ok(dist) => dist.sf(f_statistic),
        Err(_) => f64::NAN,
    };

    AnovaResult {
        f_statistic,
        p_value,
    }
}

/// Normalised ANOVA result for every feature in table order.
pub fn fisher_scores(table: &FeatureTable, target: &[f64]) -> Vec<AnovaResult> {
    let classes = class_indices(target);

    table
        .iter()
        .map(|(_, values)| {
            let groups: Vec<Vec<f64>> = classes
                .iter()
                .map(|rows| rows.iter().map(|&r| values[r]).collect())
                .collect();
            f_oneway(&groups).normalized()
        })
        .collect()
}
