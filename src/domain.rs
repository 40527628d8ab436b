//! Domain models for recipe interchange.
//!
//! This module contains the core domain types: the normalized recipe
//! record, the identity invariant constraining recipe ids, and the
//! export container distinguishing single recipes from collections.

/// Recipe domain model.
pub mod recipe;
pub use recipe::Recipe;

/// The id/link identity invariant.
pub mod identity;
pub use identity::IdFormatError;

mod export;
pub use export::Export;
