//! Shared test utilities and fixture generators

use featrank::pipeline::FeatureTable;
use polars::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a small census-like DataFrame
///
/// This DataFrame includes:
/// - `BIRTHYR`: Numeric target (year of birth)
/// - `AGE`: Deterministic function of the target
/// - `HHSIZE`: Weakly related household size
/// - `REGION_0`..`REGION_2`: One-hot encoded region
/// - `CONST`: Zero variance
pub fn create_census_dataframe() -> DataFrame {
    let birth: Vec<i32> = (0..40).map(|i| 1940 + (i * 7) % 60).collect();
    let age: Vec<f64> = birth.iter().map(|&b| (2020 - b) as f64).collect();
    let hhsize: Vec<f64> = (0..40).map(|i| ((i * 3) % 5 + 1) as f64).collect();
    let region: Vec<usize> = (0..40).map(|i| i % 3).collect();

    let mut columns = vec![
        Column::new("BIRTHYR".into(), birth),
        Column::new("AGE".into(), age),
        Column::new("HHSIZE".into(), hhsize),
    ];
    for r in 0..3 {
        let values: Vec<f64> = region
            .iter()
            .map(|&v| if v == r { 1.0 } else { 0.0 })
            .collect();
        columns.push(Column::new(format!("REGION_{}", r).into(), values));
    }
    columns.push(Column::new("CONST".into(), vec![1.0f64; 40]));

    DataFrame::new(columns).unwrap()
}

/// Seeded synthetic table: `signal_*` columns drive the target, `noise_*`
/// columns are independent, and `grp_0`..`grp_2` form a one-hot group.
pub fn create_synthetic_table(rows: usize, signals: usize, noise: usize, seed: u64) -> (FeatureTable, Vec<f64>) {
    let mut rng = StdRng::seed_from_u64(seed);

    let signal_cols: Vec<Vec<f64>> = (0..signals)
        .map(|_| (0..rows).map(|_| rng.gen_range(-1.0..1.0)).collect())
        .collect();

    let target: Vec<f64> = (0..rows)
        .map(|r| {
            let drive: f64 = signal_cols.iter().map(|c| c[r]).sum();
            drive + 0.05 * rng.gen_range(-1.0..1.0)
        })
        .collect();

    let mut table = FeatureTable::new();
    for (i, col) in signal_cols.into_iter().enumerate() {
        table.push_column(format!("signal_{}", i), col).unwrap();
    }
    for i in 0..noise {
        let col: Vec<f64> = (0..rows).map(|_| rng.gen_range(-1.0..1.0)).collect();
        table.push_column(format!("noise_{}", i), col).unwrap();
    }

    let category: Vec<usize> = (0..rows).map(|_| rng.gen_range(0..3)).collect();
    for g in 0..3 {
        let col: Vec<f64> = category
            .iter()
            .map(|&c| if c == g { 1.0 } else { 0.0 })
            .collect();
        table.push_column(format!("grp_{}", g), col).unwrap();
    }

    (table, target)
}

/// Create a temporary directory with a test CSV file
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("test_data.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    (temp_dir, csv_path)
}

/// Create a temporary directory with a test Parquet file
pub fn create_temp_parquet(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let parquet_path = temp_dir.path().join("test_data.parquet");

    let file = std::fs::File::create(&parquet_path).unwrap();
    ParquetWriter::new(file).finish(df).unwrap();

    (temp_dir, parquet_path)
}

/// Assert that a DataFrame contains specific columns
pub fn assert_has_columns(df: &DataFrame, expected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in expected_cols {
        assert!(
            actual_cols.contains(&col.to_string()),
            "Missing expected column: '{}'. Actual columns: {:?}",
            col,
            actual_cols
        );
    }
}
