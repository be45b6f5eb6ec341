//! Report module - diagnostic tables, summaries, and exports

pub mod diagnostics;
pub mod selection_export;
pub mod summary;

pub use diagnostics::*;
pub use selection_export::*;
pub use summary::*;
