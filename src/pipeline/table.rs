//! In-memory feature table and its construction from a DataFrame
//!
//! The selection routines work on plain `f64` columns. This module owns the
//! conversion from a polars `DataFrame`: picking feature columns, coercing
//! non-numeric values, and applying the missing value policy.

use anyhow::{Context, Result};
use polars::prelude::*;
use std::collections::HashSet;

use super::error::SelectionError;

/// A validated set of equal-length numeric columns, kept in dataset order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureTable {
    names: Vec<String>,
    columns: Vec<Vec<f64>>,
}

impl FeatureTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(name, values)` pairs, validating every column.
    pub fn from_columns<I, S>(columns: I) -> Result<Self, SelectionError>
    where
        I: IntoIterator<Item = (S, Vec<f64>)>,
        S: Into<String>,
    {
        let mut table = Self::new();
        for (name, values) in columns {
            table.push_column(name, values)?;
        }
        Ok(table)
    }

    /// Append a column. Names must be unique, lengths must match the existing
    /// columns, and every value must be finite.
    pub fn push_column(
        &mut self,
        name: impl Into<String>,
        values: Vec<f64>,
    ) -> Result<(), SelectionError> {
        let name = name.into();

        if self.names.contains(&name) {
            return Err(SelectionError::invalid(format!(
                "duplicate feature name '{}'",
                name
            )));
        }

        if let Some(first) = self.columns.first() {
            if first.len() != values.len() {
                return Err(SelectionError::invalid(format!(
                    "column '{}' has {} rows, expected {}",
                    name,
                    values.len(),
                    first.len()
                )));
            }
        }

        if let Some(row) = values.iter().position(|v| !v.is_finite()) {
            return Err(SelectionError::invalid(format!(
                "column '{}' contains a non-finite value at row {}",
                name, row
            )));
        }

        self.names.push(name);
        self.columns.push(values);
        Ok(())
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn n_features(&self) -> usize {
        self.names.len()
    }

    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| self.columns[i].as_slice())
    }

    /// Column by position, in dataset order.
    pub fn column_at(&self, index: usize) -> &[f64] {
        &self.columns[index]
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.names
            .iter()
            .zip(self.columns.iter())
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    /// Reorder every column by the given row permutation.
    pub fn permute_rows(&self, order: &[usize]) -> Self {
        Self {
            names: self.names.clone(),
            columns: self
                .columns
                .iter()
                .map(|col| order.iter().map(|&i| col[i]).collect())
                .collect(),
        }
    }

    /// Build a DataFrame holding the given features followed by the target.
    pub fn to_dataframe(
        &self,
        features: &[String],
        target_name: &str,
        target: &[f64],
    ) -> Result<DataFrame> {
        let mut columns: Vec<Column> = Vec::with_capacity(features.len() + 1);
        for name in features {
            let values = self
                .column(name)
                .ok_or_else(|| anyhow::anyhow!("Feature '{}' not found in table", name))?;
            columns.push(Column::new(name.as_str().into(), values.to_vec()));
        }
        columns.push(Column::new(target_name.into(), target.to_vec()));

        DataFrame::new(columns).context("Failed to assemble selected features")
    }
}

/// How to treat missing (null, NaN or unparseable) feature values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingPolicy {
    /// Drop every row that has a missing value in any feature (default)
    #[default]
    DropRows,
    /// Replace missing values with 0.0
    FillZero,
    /// Refuse to continue when any feature has a missing value
    Error,
}

impl std::fmt::Display for MissingPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MissingPolicy::DropRows => write!(f, "drop-rows"),
            MissingPolicy::FillZero => write!(f, "fill-zero"),
            MissingPolicy::Error => write!(f, "error"),
        }
    }
}

impl std::str::FromStr for MissingPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "drop-rows" | "drop" => Ok(MissingPolicy::DropRows),
            "fill-zero" | "zero" => Ok(MissingPolicy::FillZero),
            "error" => Ok(MissingPolicy::Error),
            _ => Err(format!(
                "Unknown missing policy: '{}'. Use 'drop-rows', 'fill-zero' or 'error'.",
                s
            )),
        }
    }
}

/// Feature table and aligned target extracted from a DataFrame
#[derive(Debug, Clone)]
pub struct PreparedData {
    pub table: FeatureTable,
    pub target: Vec<f64>,
    /// Rows removed because the target or (with `DropRows`) a feature was missing
    pub dropped_rows: usize,
    /// Non-numeric columns that were cast to Float64
    pub coerced_columns: Vec<String>,
    /// Columns that could not be cast, or non-numeric columns with no
    /// parseable value
    pub skipped_columns: Vec<String>,
}

/// Build the feature table and target vector from a DataFrame.
///
/// Every column other than the target and `drop_columns` becomes a feature.
/// Numeric columns are cast to Float64; other columns are cast non-strictly
/// so unparseable values become missing; a non-numeric column in which no
/// value parses is reported in `skipped_columns` instead. Rows with a
/// missing target are always removed; missing feature values follow `policy`.
pub fn prepare_feature_table(
    df: &DataFrame,
    target: &str,
    drop_columns: &[String],
    policy: MissingPolicy,
) -> Result<PreparedData> {
    let target_col = df
        .column(target)
        .with_context(|| format!("Target column '{}' not found", target))?;

    if !target_col.dtype().is_primitive_numeric() && target_col.dtype() != &DataType::Boolean {
        anyhow::bail!(
            "Target column '{}' must be numeric, found {}",
            target,
            target_col.dtype()
        );
    }

    let target_values = column_to_options(target_col)
        .with_context(|| format!("Failed to read target column '{}'", target))?;

    let excluded: HashSet<&str> = drop_columns.iter().map(String::as_str).collect();

    let mut feature_values: Vec<(String, Vec<Option<f64>>)> = Vec::new();
    let mut coerced_columns = Vec::new();
    let mut skipped_columns = Vec::new();

    for col in df.get_columns() {
        let name = col.name().as_str();
        if name == target || excluded.contains(name) {
            continue;
        }

        let numeric = col.dtype().is_primitive_numeric();
        match column_to_options(col) {
            // Non-numeric with nothing parseable: skipped, not a feature
            Ok(values) if !numeric && values.iter().all(Option::is_none) => {
                skipped_columns.push(name.to_string());
            }
            Ok(values) => {
                if !numeric {
                    coerced_columns.push(name.to_string());
                }
                feature_values.push((name.to_string(), values));
            }
            Err(_) => skipped_columns.push(name.to_string()),
        }
    }

    if policy == MissingPolicy::Error {
        for (name, values) in &feature_values {
            let missing = values
                .iter()
                .zip(target_values.iter())
                .filter(|(v, t)| t.is_some() && v.is_none())
                .count();
            if missing > 0 {
                anyhow::bail!(
                    "Feature '{}' has {} missing value(s). Use --missing-policy drop-rows or fill-zero.",
                    name,
                    missing
                );
            }
        }
    }

    let keep: Vec<usize> = (0..df.height())
        .filter(|&row| {
            target_values[row].is_some()
                && (policy != MissingPolicy::DropRows
                    || feature_values.iter().all(|(_, v)| v[row].is_some()))
        })
        .collect();

    let mut table = FeatureTable::new();
    for (name, values) in feature_values {
        let column: Vec<f64> = keep.iter().map(|&row| values[row].unwrap_or(0.0)).collect();
        table.push_column(name, column)?;
    }

    let target: Vec<f64> = keep.iter().filter_map(|&row| target_values[row]).collect();

    Ok(PreparedData {
        table,
        target,
        dropped_rows: df.height() - keep.len(),
        coerced_columns,
        skipped_columns,
    })
}

/// Cast a column to Float64 and read it, treating NaN and infinities as missing
fn column_to_options(col: &Column) -> Result<Vec<Option<f64>>> {
    let float_col = col.cast(&DataType::Float64)?;
    let values = float_col
        .f64()?
        .iter()
        .map(|v| v.filter(|x| x.is_finite()))
        .collect();
    Ok(values)
}
