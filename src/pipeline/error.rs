//! Error types for feature selection.
//!
//! The selection core reports malformed input through `SelectionError`.
//! Numeric degeneracy (zero variance, single class) is recovered inside the
//! scoring routines and never surfaces here.

use thiserror::Error;

/// Errors that can occur when validating or ranking a feature table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// The table, target, or configuration is malformed.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl SelectionError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        SelectionError::InvalidInput(message.into())
    }
}
