//! Repository layer mapping recipes to rows

pub mod sqlite_repo;

pub use sqlite_repo::SqliteRepo;
