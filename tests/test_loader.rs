//! Unit tests for dataset loading and saving

use featrank::pipeline::{
    get_column_names, get_numeric_column_names, load_dataset_with_progress, save_dataset,
};
use polars::prelude::*;
use std::io::Write;
use tempfile::TempDir;

#[path = "common/mod.rs"]
mod common;

#[test]
fn test_load_csv_file() {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("test.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    writeln!(file, "a,b,c").unwrap();
    writeln!(file, "1,2,3").unwrap();
    writeln!(file, "4,5,6").unwrap();
    drop(file);

    let (df, rows, cols, mem_mb) = load_dataset_with_progress(&csv_path, 100).unwrap();

    assert_eq!(rows, 2, "Should have 2 data rows");
    assert_eq!(cols, 3, "Should have 3 columns");
    assert_eq!(df.get_column_names(), &["a", "b", "c"]);
    assert!(mem_mb >= 0.0, "Memory estimate should be non-negative");
}

#[test]
fn test_load_parquet_file() {
    let mut df = common::create_census_dataframe();
    let (_temp_dir, parquet_path) = common::create_temp_parquet(&mut df);

    let (loaded, rows, cols, mem_mb) = load_dataset_with_progress(&parquet_path, 100).unwrap();

    assert_eq!(rows, 40);
    assert_eq!(cols, 7);
    assert!(mem_mb > 0.0);
    common::assert_has_columns(&loaded, &["BIRTHYR", "REGION_0", "CONST"]);
}

#[test]
fn test_get_column_names_csv() {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("test.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    writeln!(file, "col_a,col_b,col_c").unwrap();
    writeln!(file, "1,2,3").unwrap();
    drop(file);

    let columns = get_column_names(&csv_path, 100).unwrap();

    assert_eq!(columns, vec!["col_a", "col_b", "col_c"]);
}

#[test]
fn test_get_numeric_column_names_skips_text() {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("mixed.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    writeln!(file, "STATE,BIRTHYR,INCOME").unwrap();
    writeln!(file, "CA,1970,52000.5").unwrap();
    writeln!(file, "NY,1985,61000.0").unwrap();
    drop(file);

    let columns = get_numeric_column_names(&csv_path, 100).unwrap();

    assert_eq!(columns, vec!["BIRTHYR", "INCOME"]);
}

#[test]
fn test_unsupported_format() {
    let temp_dir = TempDir::new().unwrap();
    let bad_path = temp_dir.path().join("test.xlsx");
    std::fs::File::create(&bad_path).unwrap();

    let result = load_dataset_with_progress(&bad_path, 100);

    assert!(result.is_err(), "Unsupported format should return error");
    let err_msg = result.unwrap_err().to_string();
    assert!(
        err_msg.contains("Unsupported"),
        "Error message should mention unsupported format: {}",
        err_msg
    );
}

#[test]
fn test_nonexistent_file() {
    let path = std::path::Path::new("/nonexistent/path/to/file.csv");

    let result = load_dataset_with_progress(path, 100);

    assert!(result.is_err(), "Nonexistent file should return error");
}

#[test]
fn test_csv_with_missing_values() {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("missing.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    writeln!(file, "a,b,c").unwrap();
    writeln!(file, "1,,3").unwrap();
    writeln!(file, ",2,").unwrap();
    writeln!(file, "4,5,6").unwrap();
    drop(file);

    let (df, rows, cols, _) = load_dataset_with_progress(&csv_path, 100).unwrap();

    assert_eq!(rows, 3);
    assert_eq!(cols, 3);

    let null_counts: Vec<usize> = df.get_columns().iter().map(|c| c.null_count()).collect();
    assert_eq!(null_counts, vec![1, 1, 1]);
}

#[test]
fn test_full_scan_schema_inference() {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("inference.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    writeln!(file, "value").unwrap();
    for i in 0..100 {
        writeln!(file, "{}", i).unwrap();
    }
    drop(file);

    let (df_short, _, _, _) = load_dataset_with_progress(&csv_path, 10).unwrap();
    let (df_full, _, _, _) = load_dataset_with_progress(&csv_path, 0).unwrap();

    assert_eq!(df_short.height(), 100);
    assert_eq!(df_full.height(), 100);
}

#[test]
fn test_save_csv_and_parquet() {
    let temp_dir = TempDir::new().unwrap();
    let mut df = df! {
        "AGE" => [30.0f64, 45.0, 60.0],
        "BIRTHYR" => [1990.0f64, 1975.0, 1960.0],
    }
    .unwrap();

    for name in ["out.csv", "out.parquet"] {
        let path = temp_dir.path().join(name);
        save_dataset(&mut df, &path).unwrap();

        let (loaded, rows, cols, _) = load_dataset_with_progress(&path, 100).unwrap();
        assert_eq!((rows, cols), (3, 2), "{} shape", name);
        assert_eq!(loaded.get_column_names(), &["AGE", "BIRTHYR"]);
    }
}

#[test]
fn test_save_unsupported_format() {
    let temp_dir = TempDir::new().unwrap();
    let mut df = df! { "x" => [1.0f64] }.unwrap();

    let result = save_dataset(&mut df, &temp_dir.path().join("out.json"));

    assert!(result.is_err());
}
