//! Mela recipe export interchange
//!
//! Recipes are exchanged as single-recipe JSON documents (`.melarecipe`) or
//! zip archives of such documents (`.melarecipes`).

pub mod domain;
pub use domain::{Export, IdFormatError, Recipe};

/// File format detection, codecs and the load/save operations.
pub mod storage;
pub use storage::{Format, IncompatibleFormatError, LoadError, SaveError};
