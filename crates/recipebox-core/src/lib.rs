//! Recipebox Core - domain model and shared facilities
//!
//! This crate provides:
//! - The `Recipe` model and the `RecipeDraft` create/update discriminator
//! - The `|`-delimited ingredient codec used by the storage layer
//! - The canonical error facility (`ExError`, `ExErrorKind`)
//! - The structured logging facility and its lifecycle macros

pub mod errors;
pub mod logging_facility;
pub mod model;

// Re-export commonly used types
pub use errors::{ExError, ExErrorKind, RecipeError, Result};
pub use model::{ExistingRecipe, NewRecipe, Recipe, RecipeDraft};
