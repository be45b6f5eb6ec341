//! Mutual-information feature selection with one-hot group awareness
//!
//! Features are ranked by mutual information with the target. Members of a
//! one-hot group share the group's mean score, so indicator columns of one
//! categorical variable rank together, and any group touched by the top-k
//! cut is taken whole. Optionally, the features with the highest Fisher
//! (ANOVA F) scores that were not already chosen are appended.

use serde::Serialize;
use std::collections::HashMap;

use super::anova::{fisher_scores, AnovaResult};
use super::error::SelectionError;
use super::mutual_info::{mutual_info_regression, DEFAULT_MI_NEIGHBORS};
use super::onehot::{identify_one_hot_groups, OneHotGroup};
use super::table::FeatureTable;

/// Default number of features requested
pub const DEFAULT_N_FEATURES: usize = 20;

/// Default cap on Fisher-ranked extras
pub const DEFAULT_MAX_EXTRAS: usize = 10;

/// Parameters for a selection run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SelectionConfig {
    /// Number of features to take from the mutual information ranking
    pub n_features: usize,
    /// Append features ranked highly by Fisher score
    pub add_fisher_features: bool,
    /// Maximum number of Fisher-ranked extras
    pub max_extras: usize,
    /// Neighbour count for the mutual information estimator
    pub mi_neighbors: usize,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            n_features: DEFAULT_N_FEATURES,
            add_fisher_features: false,
            max_extras: DEFAULT_MAX_EXTRAS,
            mi_neighbors: DEFAULT_MI_NEIGHBORS,
        }
    }
}

impl SelectionConfig {
    pub fn new(n_features: usize) -> Self {
        Self {
            n_features,
            ..Self::default()
        }
    }

    pub fn with_fisher_features(mut self, enabled: bool) -> Self {
        self.add_fisher_features = enabled;
        self
    }

    pub fn with_max_extras(mut self, max_extras: usize) -> Self {
        self.max_extras = max_extras;
        self
    }

    pub fn with_mi_neighbors(mut self, k: usize) -> Self {
        self.mi_neighbors = k;
        self
    }
}

/// Why a feature ended up in the selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionSource {
    /// Within the top `n_features` by mutual information
    MutualInfo,
    /// Pulled in because another member of its one-hot group was selected
    GroupExpansion,
    /// Appended from the Fisher score ranking
    Fisher,
}

/// Scores for one feature
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureScore {
    pub feature: String,
    /// Mutual information after one-hot group averaging
    pub mi_score: f64,
    /// Mutual information of the column on its own
    pub raw_mi_score: f64,
    pub fisher_score: f64,
    pub p_value: f64,
    /// One-hot group base, if the feature belongs to a group
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

/// One row of the diagnostic tables
#[derive(Debug, Clone, PartialEq)]
pub struct DiagnosticRow {
    pub feature: String,
    pub mi_score: f64,
    pub fisher_score: f64,
    pub p_value: f64,
}

/// Scores of the selected features, in selection order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionDiagnostics {
    pub rows: Vec<DiagnosticRow>,
}

impl SelectionDiagnostics {
    /// Rows sorted by MI score descending (ties keep selection order)
    pub fn ranked_by_mi(&self) -> Vec<&DiagnosticRow> {
        let mut rows: Vec<&DiagnosticRow> = self.rows.iter().collect();
        rows.sort_by(|a, b| b.mi_score.total_cmp(&a.mi_score));
        rows
    }

    /// Rows sorted by Fisher score descending (ties keep selection order)
    pub fn ranked_by_fisher(&self) -> Vec<&DiagnosticRow> {
        let mut rows: Vec<&DiagnosticRow> = self.rows.iter().collect();
        rows.sort_by(|a, b| b.fisher_score.total_cmp(&a.fisher_score));
        rows
    }
}

/// Result of a selection run
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// Final ordered feature names: group-expanded MI selection, then extras
    pub features: Vec<String>,
    /// Group-expanded MI selection, ordered by group-averaged MI
    pub base: Vec<String>,
    /// Fisher-ranked extras, in descending Fisher order
    pub extras: Vec<String>,
    /// Scores for every feature in the table, in table order
    pub scores: Vec<FeatureScore>,
    /// One-hot groups detected in the table
    pub groups: Vec<OneHotGroup>,
    sources: HashMap<String, SelectionSource>,
}

impl Selection {
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn contains(&self, feature: &str) -> bool {
        self.sources.contains_key(feature)
    }

    pub fn source_of(&self, feature: &str) -> Option<SelectionSource> {
        self.sources.get(feature).copied()
    }

    /// Number of features added only through group expansion
    pub fn group_expanded(&self) -> usize {
        self.sources
            .values()
            .filter(|s| **s == SelectionSource::GroupExpansion)
            .count()
    }

    pub fn score_of(&self, feature: &str) -> Option<&FeatureScore> {
        self.scores.iter().find(|s| s.feature == feature)
    }

    /// Diagnostic rows for the selected features
    pub fn diagnostics(&self) -> SelectionDiagnostics {
        let by_name: HashMap<&str, &FeatureScore> =
            self.scores.iter().map(|s| (s.feature.as_str(), s)).collect();

        let rows = self
            .features
            .iter()
            .filter_map(|name| by_name.get(name.as_str()))
            .map(|s| DiagnosticRow {
                feature: s.feature.clone(),
                mi_score: s.mi_score,
                fisher_score: s.fisher_score,
                p_value: s.p_value,
            })
            .collect();

        SelectionDiagnostics { rows }
    }
}

/// Select features from `table` against `target`.
///
/// Returns the selection and the scores behind it. Fails with
/// `InvalidInput` for an empty table, fewer than two rows, a target whose
/// length differs from the table, non-finite target values, a zero neighbour
/// count, or a requested count of zero or above the number of features.
pub fn select_features(
    table: &FeatureTable,
    target: &[f64],
    config: &SelectionConfig,
) -> Result<Selection, SelectionError> {
    validate(table, target, config)?;

    let names = table.names();
    let n = names.len();

    let raw_mi = mutual_info_regression(table, target, config.mi_neighbors);
    let groups = identify_one_hot_groups(names);

    let index: HashMap<&str, usize> = names
        .iter()
        .enumerate()
        .map(|(i, name)| (name.as_str(), i))
        .collect();

    let mut mi = raw_mi.clone();
    let mut group_of: Vec<Option<usize>> = vec![None; n];
    for (g, group) in groups.iter().enumerate() {
        let members: Vec<usize> = group.members.iter().map(|m| index[m.as_str()]).collect();
        let mean = members.iter().map(|&i| raw_mi[i]).sum::<f64>() / members.len() as f64;
        for &i in &members {
            mi[i] = mean;
            group_of[i] = Some(g);
        }
    }

    // Stable sort: equal scores keep table order
    let mut mi_order: Vec<usize> = (0..n).collect();
    mi_order.sort_by(|&a, &b| mi[b].total_cmp(&mi[a]));

    let mut sources: HashMap<String, SelectionSource> = HashMap::new();
    let mut touched_groups = vec![false; groups.len()];
    for &i in &mi_order[..config.n_features] {
        sources.insert(names[i].clone(), SelectionSource::MutualInfo);
        if let Some(g) = group_of[i] {
            touched_groups[g] = true;
        }
    }

    for (g, group) in groups.iter().enumerate() {
        if !touched_groups[g] {
            continue;
        }
        for member in &group.members {
            sources
                .entry(member.clone())
                .or_insert(SelectionSource::GroupExpansion);
        }
    }

    let base: Vec<String> = mi_order
        .iter()
        .map(|&i| &names[i])
        .filter(|name| sources.contains_key(name.as_str()))
        .cloned()
        .collect();

    let anova: Vec<AnovaResult> = fisher_scores(table, target);

    // Extras are not group-expanded: a Fisher pick from a one-hot group
    // does not pull in the rest of that group.
    let mut extras: Vec<String> = Vec::new();
    if config.add_fisher_features {
        let mut fisher_order: Vec<usize> = (0..n).collect();
        fisher_order.sort_by(|&a, &b| anova[b].f_statistic.total_cmp(&anova[a].f_statistic));

        for i in fisher_order {
            if extras.len() >= config.max_extras {
                break;
            }
            if !sources.contains_key(names[i].as_str()) {
                sources.insert(names[i].clone(), SelectionSource::Fisher);
                extras.push(names[i].clone());
            }
        }
    }

    let scores: Vec<FeatureScore> = (0..n)
        .map(|i| FeatureScore {
            feature: names[i].clone(),
            mi_score: mi[i],
            raw_mi_score: raw_mi[i],
            fisher_score: anova[i].f_statistic,
            p_value: anova[i].p_value,
            group: group_of[i].map(|g| groups[g].base.clone()),
        })
        .collect();

    let features: Vec<String> = base.iter().chain(extras.iter()).cloned().collect();

    Ok(Selection {
        features,
        base,
        extras,
        scores,
        groups,
        sources,
    })
}

fn validate(
    table: &FeatureTable,
    target: &[f64],
    config: &SelectionConfig,
) -> Result<(), SelectionError> {
    if table.is_empty() {
        return Err(SelectionError::invalid("feature table is empty"));
    }
    if table.n_rows() != target.len() {
        return Err(SelectionError::invalid(format!(
            "target has {} rows but feature columns have {}",
            target.len(),
            table.n_rows()
        )));
    }
    if target.len() < 2 {
        return Err(SelectionError::invalid(format!(
            "at least 2 rows are required, got {}",
            target.len()
        )));
    }
    if let Some(row) = target.iter().position(|v| !v.is_finite()) {
        return Err(SelectionError::invalid(format!(
            "target contains a non-finite value at row {}",
            row
        )));
    }
    if config.n_features == 0 {
        return Err(SelectionError::invalid("requested feature count must be positive"));
    }
    if config.n_features > table.n_features() {
        return Err(SelectionError::invalid(format!(
            "requested {} features but the table has only {}",
            config.n_features,
            table.n_features()
        )));
    }
    if config.mi_neighbors == 0 {
        return Err(SelectionError::invalid("neighbour count must be positive"));
    }
    Ok(())
}
