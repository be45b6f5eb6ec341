//! Selection summary report generation

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;
use std::time::Duration;

use crate::pipeline::Selection;

/// Summary of a feature selection run
#[derive(Debug, Default)]
pub struct SelectionSummary {
    pub features_analyzed: usize,
    pub one_hot_groups: usize,
    pub requested: usize,
    pub mi_selected: usize,
    pub group_expanded: usize,
    pub fisher_extras: Vec<String>,
    pub final_features: Vec<String>,
    pub dropped_rows: usize,
    pub load_time: Option<Duration>,
    pub scoring_time: Option<Duration>,
    pub save_time: Option<Duration>,
}

impl SelectionSummary {
    pub fn new(features_analyzed: usize, requested: usize) -> Self {
        Self {
            features_analyzed,
            requested,
            ..Default::default()
        }
    }

    pub fn record_selection(&mut self, selection: &Selection) {
        self.one_hot_groups = selection.groups.len();
        self.group_expanded = selection.group_expanded();
        self.mi_selected = selection.base.len() - self.group_expanded;
        self.fisher_extras = selection.extras.clone();
        self.final_features = selection.features.clone();
    }

    pub fn set_dropped_rows(&mut self, rows: usize) {
        self.dropped_rows = rows;
    }

    pub fn set_load_time(&mut self, elapsed: Duration) {
        self.load_time = Some(elapsed);
    }

    pub fn set_scoring_time(&mut self, elapsed: Duration) {
        self.scoring_time = Some(elapsed);
    }

    pub fn set_save_time(&mut self, elapsed: Duration) {
        self.save_time = Some(elapsed);
    }

    /// Build the summary table (without indentation)
    pub fn to_table(&self) -> Table {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![
            Cell::new("📁 Features Analyzed"),
            Cell::new(self.features_analyzed),
        ]);

        table.add_row(vec![
            Cell::new("🧩 One-Hot Groups"),
            Cell::new(self.one_hot_groups),
        ]);

        table.add_row(vec![
            Cell::new("🎯 Requested"),
            Cell::new(self.requested),
        ]);

        table.add_row(vec![
            Cell::new("📈 Selected (MI)"),
            Cell::new(self.mi_selected),
        ]);

        table.add_row(vec![
            Cell::new("🔗 Added (Group Expansion)"),
            Cell::new(self.group_expanded).fg(if self.group_expanded == 0 {
                Color::White
            } else {
                Color::Yellow
            }),
        ]);

        table.add_row(vec![
            Cell::new("➕ Added (Fisher)"),
            Cell::new(self.fisher_extras.len()).fg(if self.fisher_extras.is_empty() {
                Color::White
            } else {
                Color::Yellow
            }),
        ]);

        if self.dropped_rows > 0 {
            table.add_row(vec![
                Cell::new("🗑️  Rows Dropped (Missing)"),
                Cell::new(self.dropped_rows).fg(Color::Red),
            ]);
        }

        table.add_row(vec![
            Cell::new("✅ Final Features"),
            Cell::new(self.final_features.len())
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
        ]);

        let timings = [
            ("⏱  Load", self.load_time),
            ("⏱  Scoring", self.scoring_time),
            ("⏱  Save", self.save_time),
        ];
        for (label, elapsed) in timings {
            if let Some(elapsed) = elapsed {
                table.add_row(vec![
                    Cell::new(label),
                    Cell::new(format!("{:.2}s", elapsed.as_secs_f64())).fg(Color::Cyan),
                ]);
            }
        }

        table
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("SELECTION SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        // Indent the table
        for line in self.to_table().to_string().lines() {
            println!("    {}", line);
        }

        if !self.final_features.is_empty() {
            println!();
            println!(
                "    {} {}",
                style("📝").cyan(),
                style("SELECTED FEATURES").white().bold()
            );
            println!("    {}", style("─".repeat(50)).dim());
            println!();
            for feature in &self.final_features {
                let marker = if self.fisher_extras.contains(feature) {
                    style("+").yellow()
                } else {
                    style("•").dim()
                };
                println!("        {} {}", marker, feature);
            }
        }
    }
}
