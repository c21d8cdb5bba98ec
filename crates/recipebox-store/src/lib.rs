//! Recipebox Store - SQLite persistence for recipes
//!
//! Provides:
//! - Connection management and first-run file bootstrap
//! - Embedded, checksummed, idempotent migrations
//! - `RecipeStore`, the owned handle the rest of the system talks to
//! - `SqliteRepo`, row-level statements used inside upsert transactions

pub mod db;
pub mod errors;
pub mod migrations;
pub mod repo;
pub mod store;

// Re-export key types
pub use errors::{Result, WritePhase};
pub use store::{RecipeStore, StoreConfig};
