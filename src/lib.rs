//! Featrank: Feature Ranking Library
//!
//! Selects dataset features by mutual information with a numeric target,
//! keeping one-hot encoded groups together, with optional extras ranked by
//! one-way ANOVA F-score.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
