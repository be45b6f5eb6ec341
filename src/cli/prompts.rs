//! Interactive prompts using dialoguer

use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Confirm, Select};
use std::path::Path;

/// Prompt user to confirm proceeding with an action
pub fn confirm_step(message: &str) -> Result<bool> {
    let confirmed = Confirm::new()
        .with_prompt(message)
        .default(true)
        .interact()?;
    Ok(confirmed)
}

/// Prompt user to confirm overwriting an existing file
pub fn confirm_overwrite(path: &Path) -> Result<bool> {
    confirm_step(&format!("{} already exists. Overwrite?", path.display()))
}

/// Let the user pick the target from the numeric columns.
/// Returns `None` if the prompt was cancelled.
pub fn select_target_column(columns: &[String]) -> Result<Option<String>> {
    if columns.is_empty() {
        anyhow::bail!("Dataset has no numeric columns to use as a target");
    }

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Select the target column")
        .items(columns)
        .default(0)
        .interact_opt()?;

    Ok(selection.map(|i| columns[i].clone()))
}
