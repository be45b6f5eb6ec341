//! Pipeline module - loading, scoring, and selecting features

pub mod anova;
pub mod correlation;
pub mod error;
pub mod loader;
pub mod mutual_info;
pub mod onehot;
pub mod selection;
pub mod table;

pub use anova::*;
pub use correlation::*;
pub use error::SelectionError;
pub use loader::*;
pub use mutual_info::*;
pub use onehot::*;
pub use selection::*;
pub use table::*;
