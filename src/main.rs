//! Featrank: Feature Ranking CLI Tool
//!
//! Ranks the features of a dataset by mutual information with a numeric
//! target, keeps one-hot groups whole, and optionally appends the strongest
//! features by ANOVA F-score.

use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use console::style;

use featrank::cli::{confirm_overwrite, select_target_column, Cli};
use featrank::pipeline::{
    correlate_with_target, get_numeric_column_names, load_dataset_with_progress,
    prepare_feature_table, save_dataset, select_features,
};
use featrank::report::{
    display_diagnostics, export_selection, render_correlation_table, ExportParams,
    SelectionSummary,
};
use featrank::utils::{
    create_spinner, finish_with_success, finish_with_warning, print_banner, print_completion,
    print_config, print_count, print_info, print_step_header, print_step_time, print_success,
    print_warning,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let input = cli.input().ok_or_else(|| {
        anyhow::anyhow!("Input file is required. Use -i/--input to specify a file.")
    })?;

    let missing_policy = cli
        .parsed_missing_policy()
        .map_err(|e| anyhow::anyhow!(e))?;
    let config = cli.selection_config();

    // Target is required in non-interactive mode
    let target = match (&cli.target, cli.no_confirm) {
        (Some(target), _) => target.clone(),
        (None, true) => anyhow::bail!(
            "Target column is required when using --no-confirm. Use -t/--target to specify."
        ),
        (None, false) => {
            let columns = get_numeric_column_names(input, cli.infer_schema_length)?;
            match select_target_column(&columns)? {
                Some(target) => target,
                None => {
                    println!("Cancelled by user.");
                    return Ok(());
                }
            }
        }
    };

    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(
        input,
        &target,
        cli.output.as_deref(),
        &config,
        missing_policy,
    );

    // Step 1: Load dataset
    print_step_header(1, "Load Dataset");

    let step_start = Instant::now();
    let (df, rows, cols, memory_mb) = load_dataset_with_progress(input, cli.infer_schema_length)?;

    println!("\n    {} Dataset Statistics:", style("✧").cyan());
    println!("      Rows: {}", rows);
    println!("      Columns: {}", cols);
    println!("      Estimated memory: {:.2} MB", memory_mb);

    let load_elapsed = step_start.elapsed();
    print_step_time(load_elapsed);

    let column_names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();
    if !column_names.contains(&target) {
        anyhow::bail!(
            "Target column '{}' not found in dataset. Available columns: {:?}",
            target,
            column_names
        );
    }

    for name in &cli.drop_columns {
        if !column_names.contains(name) {
            print_warning(&format!("Column '{}' in --drop-columns not found, ignoring", name));
        }
    }

    // Step 2: Build the feature table
    print_step_header(2, "Prepare Features");

    let step_start = Instant::now();
    let spinner = create_spinner("Extracting numeric features...");
    let prepared = prepare_feature_table(&df, &target, &cli.drop_columns, missing_policy)?;
    drop(df);

    if prepared.dropped_rows > 0 {
        finish_with_warning(
            &spinner,
            &format!(
                "Dropped {} row(s) with missing values ({})",
                prepared.dropped_rows, missing_policy
            ),
        );
    } else {
        finish_with_success(&spinner, "Feature table ready");
    }

    print_count(
        "feature(s)",
        prepared.table.n_features(),
        Some(&format!("over {} row(s)", prepared.table.n_rows())),
    );
    if !prepared.coerced_columns.is_empty() {
        print_warning(&format!(
            "Cast {} non-numeric column(s) to numbers: {}",
            prepared.coerced_columns.len(),
            prepared.coerced_columns.join(", ")
        ));
    }
    if !prepared.skipped_columns.is_empty() {
        print_warning(&format!(
            "Skipped {} column(s) that cannot be read as numbers: {}",
            prepared.skipped_columns.len(),
            prepared.skipped_columns.join(", ")
        ));
    }
    print_step_time(step_start.elapsed());

    let mut summary = SelectionSummary::new(prepared.table.n_features(), config.n_features);
    summary.set_load_time(load_elapsed);
    summary.set_dropped_rows(prepared.dropped_rows);

    // Step 3: Score and select
    print_step_header(3, "Feature Scoring");

    let step_start = Instant::now();
    let spinner = create_spinner("Estimating mutual information and F-scores...");
    let selection = select_features(&prepared.table, &prepared.target, &config)?;
    finish_with_success(&spinner, "Scoring complete");

    display_diagnostics(&selection.diagnostics());
    println!();

    if selection.groups.is_empty() {
        print_info("No one-hot groups detected");
    } else {
        print_count("one-hot group(s)", selection.groups.len(), None);
    }
    print_success(&format!(
        "Selected {} feature(s) by mutual information",
        selection.base.len()
    ));
    if config.add_fisher_features {
        print_success(&format!(
            "Appended {} feature(s) by Fisher score",
            selection.extras.len()
        ));
    }

    if !cli.no_correlation {
        let correlations =
            correlate_with_target(&prepared.table, &selection.features, &prepared.target);
        print!("{}", render_correlation_table(&correlations, &target));
    }

    summary.record_selection(&selection);
    let scoring_elapsed = step_start.elapsed();
    summary.set_scoring_time(scoring_elapsed);
    print_step_time(scoring_elapsed);

    // Step 4: Save outputs
    if cli.output.is_some() || cli.export_json.is_some() {
        print_step_header(4, "Save Results");
        let step_start = Instant::now();

        if let Some(output_path) = &cli.output {
            if output_path.exists() && !cli.no_confirm && !confirm_overwrite(output_path)? {
                print_info("Skipped writing the reduced dataset");
            } else {
                let spinner = create_spinner("Writing output file...");
                let mut reduced =
                    prepared
                        .table
                        .to_dataframe(&selection.features, &target, &prepared.target)?;
                save_dataset(&mut reduced, output_path)?;
                finish_with_success(&spinner, &format!("Saved to {}", output_path.display()));
            }
        }

        if let Some(json_path) = cli.export_path() {
            let input_file = input.display().to_string();
            let params = ExportParams {
                input_file: &input_file,
                target_column: &target,
                dropped_columns: &cli.drop_columns,
                missing_policy,
                rows_analyzed: prepared.table.n_rows(),
                config,
            };
            export_selection(&selection, &json_path, &params)?;
            print_success(&format!("Scores exported to {}", json_path.display()));
        }

        let save_elapsed = step_start.elapsed();
        summary.set_save_time(save_elapsed);
        print_step_time(save_elapsed);
    }

    summary.display();
    print_completion();

    Ok(())
}
