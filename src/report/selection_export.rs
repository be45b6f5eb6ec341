//! Selection analysis export functionality

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use crate::pipeline::{
    FeatureScore, MissingPolicy, OneHotGroup, Selection, SelectionConfig, SelectionSource,
};

/// Metadata about the analysis run
#[derive(Serialize)]
pub struct AnalysisMetadata {
    /// Timestamp of the analysis (ISO 8601 format)
    pub timestamp: String,
    /// Featrank version
    pub featrank_version: String,
    /// Input file path
    pub input_file: String,
    /// Target column name
    pub target_column: String,
    /// Columns excluded from the feature set
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dropped_columns: Vec<String>,
    /// Missing value policy used to build the table
    pub missing_policy: String,
    /// Rows analysed after the missing value policy
    pub rows_analyzed: usize,
    /// Selection parameters
    pub config: SelectionConfig,
}

/// A single feature's scores with its selection status
#[derive(Serialize)]
pub struct FeatureExportEntry {
    #[serde(flatten)]
    pub score: FeatureScore,
    pub selected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<SelectionSource>,
}

/// Complete selection export with metadata
#[derive(Serialize)]
pub struct SelectionExport {
    pub metadata: AnalysisMetadata,
    /// Final ordered selection
    pub selected_features: Vec<String>,
    /// Fisher-ranked extras (subset of `selected_features`)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fisher_extras: Vec<String>,
    pub one_hot_groups: Vec<OneHotGroup>,
    /// Per-feature scores for every analysed feature
    pub features: Vec<FeatureExportEntry>,
}

/// Parameters for the export metadata
pub struct ExportParams<'a> {
    pub input_file: &'a str,
    pub target_column: &'a str,
    pub dropped_columns: &'a [String],
    pub missing_policy: MissingPolicy,
    pub rows_analyzed: usize,
    pub config: SelectionConfig,
}

/// Build the export structure for a selection
pub fn build_selection_export(selection: &Selection, params: &ExportParams) -> SelectionExport {
    let features = selection
        .scores
        .iter()
        .map(|score| FeatureExportEntry {
            score: score.clone(),
            selected: selection.contains(&score.feature),
            source: selection.source_of(&score.feature),
        })
        .collect();

    SelectionExport {
        metadata: AnalysisMetadata {
            timestamp: Utc::now().to_rfc3339(),
            featrank_version: env!("CARGO_PKG_VERSION").to_string(),
            input_file: params.input_file.to_string(),
            target_column: params.target_column.to_string(),
            dropped_columns: params.dropped_columns.to_vec(),
            missing_policy: params.missing_policy.to_string(),
            rows_analyzed: params.rows_analyzed,
            config: params.config,
        },
        selected_features: selection.features.clone(),
        fisher_extras: selection.extras.clone(),
        one_hot_groups: selection.groups.clone(),
        features,
    }
}

/// Export selection results to a JSON file
pub fn export_selection(
    selection: &Selection,
    output_path: &Path,
    params: &ExportParams,
) -> Result<()> {
    let export = build_selection_export(selection, params);

    let json = serde_json::to_string_pretty(&export)
        .context("Failed to serialize selection analysis to JSON")?;

    std::fs::write(output_path, json).with_context(|| {
        format!(
            "Failed to write selection analysis to {}",
            output_path.display()
        )
    })?;

    Ok(())
}
