//! Command-line argument definitions using clap

use clap::Parser;
use std::path::PathBuf;

use crate::pipeline::{
    MissingPolicy, SelectionConfig, DEFAULT_MAX_EXTRAS, DEFAULT_MI_NEIGHBORS, DEFAULT_N_FEATURES,
};

/// Featrank - Rank and select dataset features by mutual information
#[derive(Parser, Debug)]
#[command(name = "featrank")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input file path (CSV or Parquet)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Target column name (numeric). Used as the continuous target for mutual
    /// information and, through its distinct values, as classes for ANOVA.
    /// If not provided, will be selected interactively from numeric columns.
    #[arg(short, long)]
    pub target: Option<String>,

    /// Number of features to select by mutual information.
    /// Whole one-hot groups are kept, so the result can be larger.
    #[arg(short = 'n', long, default_value_t = DEFAULT_N_FEATURES, value_parser = validate_positive)]
    pub n_features: usize,

    /// Append the features with the highest Fisher scores not already selected
    #[arg(long, default_value = "false")]
    pub add_fisher_features: bool,

    /// Maximum number of Fisher-ranked features to append
    #[arg(long, default_value_t = DEFAULT_MAX_EXTRAS)]
    pub max_extras: usize,

    /// Number of nearest neighbours for the mutual information estimator
    #[arg(long, default_value_t = DEFAULT_MI_NEIGHBORS, value_parser = validate_positive)]
    pub mi_neighbors: usize,

    /// Columns to exclude from the feature set (comma-separated).
    /// The target column is always excluded.
    #[arg(long, value_delimiter = ',')]
    pub drop_columns: Vec<String>,

    /// How to handle missing or non-numeric feature values.
    /// Options: "drop-rows" (default), "fill-zero", "error"
    #[arg(long, default_value = "drop-rows")]
    pub missing_policy: String,

    /// Write the selected features and the target to this file
    /// (CSV or Parquet, determined by extension)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write per-feature scores and the selection to a JSON file.
    /// Without a value, writes `<input stem>_feature_scores.json` next to the input.
    #[arg(long, num_args = 0..=1)]
    pub export_json: Option<Option<PathBuf>>,

    /// Skip the correlation table for the selected features
    #[arg(long, default_value = "false")]
    pub no_correlation: bool,

    /// Skip interactive prompts
    #[arg(long, default_value = "false")]
    pub no_confirm: bool,

    /// Number of rows to use for schema inference (CSV only).
    /// Use 0 for full table scan (very slow for large files).
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,
}

impl Cli {
    pub fn input(&self) -> Option<&PathBuf> {
        self.input.as_ref()
    }

    /// Selection parameters from the parsed flags
    pub fn selection_config(&self) -> SelectionConfig {
        SelectionConfig::new(self.n_features)
            .with_fisher_features(self.add_fisher_features)
            .with_max_extras(self.max_extras)
            .with_mi_neighbors(self.mi_neighbors)
    }

    pub fn parsed_missing_policy(&self) -> Result<MissingPolicy, String> {
        self.missing_policy.parse()
    }

    /// Resolved JSON export path, if an export was requested
    pub fn export_path(&self) -> Option<PathBuf> {
        match &self.export_json {
            Some(Some(path)) => Some(path.clone()),
            Some(None) => self.default_export_path(),
            None => None,
        }
    }

    /// Default JSON export path next to the input: `<stem>_feature_scores.json`
    pub fn default_export_path(&self) -> Option<PathBuf> {
        let input = self.input.as_ref()?;
        let parent = input.parent().unwrap_or_else(|| std::path::Path::new("."));
        let stem = input.file_stem().and_then(|s| s.to_str())?;
        Some(parent.join(format!("{}_feature_scores.json", stem)))
    }
}

/// Validator for counts that must be at least 1
fn validate_positive(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid positive integer", s))?;

    if value == 0 {
        Err("value must be at least 1".to_string())
    } else {
        Ok(value)
    }
}
