//! Fixed-width diagnostic tables for a selection run

use std::fmt::Write;

use crate::pipeline::{DiagnosticRow, SelectionDiagnostics, TargetCorrelation};

/// p-values below this are shown as a literal rather than a number
pub const P_VALUE_DISPLAY_FLOOR: f64 = 1e-5;

const SEPARATOR_WIDTH: usize = 70;

/// Format a p-value, collapsing anything below 1e-5 to `< 1E-5`.
///
/// Values under 1e-3 use scientific notation, the rest four decimals, so
/// every rendering fits the 15-character column.
pub fn format_p_value(p: f64) -> String {
    if p < P_VALUE_DISPLAY_FLOOR {
        "< 1E-5".to_string()
    } else if p < 1e-3 {
        format!("{:.4e}", p)
    } else {
        format!("{:.4}", p)
    }
}

/// Selected features ranked by mutual information
pub fn render_mi_table(diagnostics: &SelectionDiagnostics) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\nSelected Features (Ranked by MI Score):");
    let _ = writeln!(
        out,
        "{:<30} {:<10} {:<15} {:<15}",
        "Feature", "MI Score", "Fisher Score", "ANOVA P-Value"
    );
    let _ = writeln!(out, "{}", "=".repeat(SEPARATOR_WIDTH));
    for row in diagnostics.ranked_by_mi() {
        let _ = writeln!(out, "{}", mi_row(row));
    }
    out
}

/// Selected features ranked by Fisher score
pub fn render_fisher_table(diagnostics: &SelectionDiagnostics) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\nSelected Features (Ranked by Fisher Score):");
    let _ = writeln!(
        out,
        "{:<30} {:<15} {:<10} {:<15}",
        "Feature", "Fisher Score", "MI Score", "ANOVA P-Value"
    );
    let _ = writeln!(out, "{}", "=".repeat(SEPARATOR_WIDTH));
    for row in diagnostics.ranked_by_fisher() {
        let _ = writeln!(out, "{}", fisher_row(row));
    }
    out
}

/// Pearson correlation of selected features with the target
pub fn render_correlation_table(correlations: &[TargetCorrelation], target: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\nCorrelation of Selected Features with {}:", target);
    let _ = writeln!(out, "{:<30} {:<12} {:<15}", "Feature", "Correlation", "P-Value");
    let _ = writeln!(out, "{}", "=".repeat(SEPARATOR_WIDTH));
    for c in correlations {
        let _ = writeln!(
            out,
            "{:<30} {:<12.4} {:<15}",
            c.feature,
            c.correlation,
            format_p_value(c.p_value)
        );
    }
    out
}

/// Print both diagnostic tables
pub fn display_diagnostics(diagnostics: &SelectionDiagnostics) {
    print!("{}", render_mi_table(diagnostics));
    print!("{}", render_fisher_table(diagnostics));
}

fn mi_row(row: &DiagnosticRow) -> String {
    format!(
        "{:<30} {:<10.4} {:<15.4} {:<15}",
        row.feature,
        row.mi_score,
        row.fisher_score,
        format_p_value(row.p_value)
    )
}

fn fisher_row(row: &DiagnosticRow) -> String {
    format!(
        "{:<30} {:<15.4} {:<10.4} {:<15}",
        row.feature,
        row.fisher_score,
        row.mi_score,
        format_p_value(row.p_value)
    )
}
