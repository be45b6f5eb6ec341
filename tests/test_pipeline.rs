//! Integration tests for the full selection pipeline

use featrank::pipeline::*;
use featrank::report::{build_selection_export, export_selection, ExportParams};

#[path = "common/mod.rs"]
mod common;

use common::*;

#[test]
fn test_full_pipeline_from_csv() {
    let mut df = create_census_dataframe();
    let (temp_dir, csv_path) = create_temp_csv(&mut df);

    let (df, _rows, _cols, _mem) = load_dataset_with_progress(&csv_path, 100).unwrap();
    let prepared = prepare_feature_table(&df, "BIRTHYR", &[], MissingPolicy::DropRows).unwrap();
    assert_eq!(prepared.table.n_features(), 6);

    let selection = select_features(&prepared.table, &prepared.target, &SelectionConfig::new(1)).unwrap();

    // AGE is an exact function of the target
    assert_eq!(selection.features, vec!["AGE"]);
    assert_eq!(selection.groups.len(), 1);
    assert_eq!(selection.groups[0].base, "REGION");

    let output_path = temp_dir.path().join("selected.parquet");
    let mut reduced = prepared
        .table
        .to_dataframe(&selection.features, "BIRTHYR", &prepared.target)
        .unwrap();
    save_dataset(&mut reduced, &output_path).unwrap();

    let (saved, rows, cols, _) = load_dataset_with_progress(&output_path, 100).unwrap();
    assert_eq!((rows, cols), (40, 2));
    assert_has_columns(&saved, &["AGE", "BIRTHYR"]);
}

#[test]
fn test_pipeline_expands_region_group() {
    let df = create_census_dataframe();
    let drop = vec!["AGE".to_string()];
    let prepared = prepare_feature_table(&df, "BIRTHYR", &drop, MissingPolicy::DropRows).unwrap();

    let config = SelectionConfig::new(4);
    let selection = select_features(&prepared.table, &prepared.target, &config).unwrap();

    let regions = selection
        .features
        .iter()
        .filter(|f| f.starts_with("REGION_"))
        .count();
    assert!(regions == 0 || regions == 3, "REGION split: {:?}", selection.features);
    assert!(selection.len() >= 4);
}

#[test]
fn test_csv_and_parquet_produce_same_results() {
    let mut df = create_census_dataframe();
    let (_csv_dir, csv_path) = create_temp_csv(&mut df);
    let (_pq_dir, parquet_path) = create_temp_parquet(&mut df);

    let config = SelectionConfig::new(3).with_fisher_features(true);
    let mut results = Vec::new();
    for path in [&csv_path, &parquet_path] {
        let (df, _, _, _) = load_dataset_with_progress(path, 100).unwrap();
        let prepared = prepare_feature_table(&df, "BIRTHYR", &[], MissingPolicy::DropRows).unwrap();
        results.push(select_features(&prepared.table, &prepared.target, &config).unwrap());
    }

    assert_eq!(results[0].features, results[1].features);
    assert_eq!(results[0].scores, results[1].scores);
}

#[test]
fn test_export_contains_every_feature() {
    let df = create_census_dataframe();
    let prepared = prepare_feature_table(&df, "BIRTHYR", &[], MissingPolicy::DropRows).unwrap();
    let config = SelectionConfig::new(2).with_fisher_features(true).with_max_extras(1);
    let selection = select_features(&prepared.table, &prepared.target, &config).unwrap();

    let params = ExportParams {
        input_file: "census.csv",
        target_column: "BIRTHYR",
        dropped_columns: &[],
        missing_policy: MissingPolicy::DropRows,
        rows_analyzed: prepared.table.n_rows(),
        config,
    };

    let export = build_selection_export(&selection, &params);
    assert_eq!(export.features.len(), 6);
    assert_eq!(export.selected_features, selection.features);
    assert_eq!(
        export.features.iter().filter(|e| e.selected).count(),
        selection.len()
    );

    let temp_dir = tempfile::TempDir::new().unwrap();
    let path = temp_dir.path().join("scores.json");
    export_selection(&selection, &path, &params).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["metadata"]["target_column"], "BIRTHYR");
    assert_eq!(json["metadata"]["missing_policy"], "drop-rows");
    assert_eq!(json["metadata"]["config"]["n_features"], 2);
    assert_eq!(json["features"].as_array().unwrap().len(), 6);
    assert_eq!(json["one_hot_groups"][0]["base"], "REGION");
}
