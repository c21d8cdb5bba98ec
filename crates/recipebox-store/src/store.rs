//! Recipe store handle
//!
//! `RecipeStore` owns the single SQLite connection used by the application.
//! It is created once at startup and handed to whoever needs it; there is
//! no process-wide connection.

#![allow(clippy::result_large_err)]

use crate::db;
use crate::errors::{setup_error, Result};
use crate::migrations::apply_migrations;
use crate::repo::SqliteRepo;
use recipebox_core::Recipe;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Where and how to open the database
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Directory holding the database file (created if missing)
    pub data_dir: PathBuf,
    /// Database file name inside `data_dir`
    pub file_name: String,
    /// Use write-ahead logging
    pub wal: bool,
    /// How long a statement waits on a locked database before failing
    pub busy_timeout: Duration,
}

impl StoreConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Default::default()
        }
    }

    /// Full path of the database file
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(&self.file_name)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./.data"),
            file_name: "db.sqlite".to_string(),
            wal: true,
            busy_timeout: Duration::from_millis(5000),
        }
    }
}

/// Durable recipe storage
pub struct RecipeStore {
    conn: Connection,
    path: Option<PathBuf>,
}

impl RecipeStore {
    /// Open (creating if needed) the on-disk store and bring its schema up to date
    ///
    /// Every failure here is a `Setup` error; the caller should not continue.
    pub fn open(config: &StoreConfig) -> Result<Self> {
        let path = config.db_path();

        let created = db::ensure_database_file(&path).map_err(|e| {
            setup_error(
                "store_open",
                &format!("Could not create database file {}", path.display()),
                e,
            )
        })?;

        let conn = db::open(&path).map_err(|e| {
            setup_error(
                "store_open",
                &format!("Could not open database {}", path.display()),
                e,
            )
        })?;

        db::configure(&conn, config.busy_timeout, config.wal)
            .map_err(|e| setup_error("store_open", "Could not configure connection", e))?;

        tracing::debug!(path = %path.display(), created, "database opened");

        let mut store = Self::from_connection(conn)?;
        store.path = Some(path);
        Ok(store)
    }

    /// Open a throwaway in-memory store
    pub fn open_in_memory() -> Result<Self> {
        let conn = db::open_in_memory()
            .map_err(|e| setup_error("store_open", "Could not open in-memory database", e))?;
        Self::from_connection(conn)
    }

    /// Wrap an already-open connection, applying migrations first
    pub fn from_connection(mut conn: Connection) -> Result<Self> {
        Self::bootstrap(&mut conn)?;
        Ok(Self { conn, path: None })
    }

    /// Run schema bootstrap; idempotent
    pub fn bootstrap(conn: &mut Connection) -> Result<()> {
        apply_migrations(conn)
            .map_err(|e| setup_error("schema_bootstrap", "Could not initialize schema", e))
    }

    /// All recipes in storage order
    pub fn fetch_all(&self) -> Result<Vec<Recipe>> {
        SqliteRepo::list_recipes(&self.conn)
    }

    /// Look up one recipe
    pub fn get(&self, id: i64) -> Result<Option<Recipe>> {
        SqliteRepo::get_recipe(&self.conn, id)
    }

    /// Number of stored recipes
    pub fn count(&self) -> Result<i64> {
        SqliteRepo::count_recipes(&self.conn)
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Mutable access for operations that open transactions
    pub fn connection_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }

    /// Database file path, `None` for in-memory stores
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recipebox_core::ExErrorKind;

    #[test]
    fn test_default_config_matches_data_layout() {
        let config = StoreConfig::default();
        assert_eq!(config.db_path(), PathBuf::from("./.data/db.sqlite"));
        assert!(config.wal);
    }

    #[test]
    fn test_open_in_memory_is_empty() {
        let store = RecipeStore::open_in_memory().unwrap();
        assert_eq!(store.count().unwrap(), 0);
        assert!(store.fetch_all().unwrap().is_empty());
        assert!(store.path().is_none());
    }

    #[test]
    fn test_open_fails_with_setup_error_when_dir_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"not a directory").unwrap();

        let config = StoreConfig::new(blocker.join("data"));
        let err = RecipeStore::open(&config).err().unwrap();
        assert_eq!(err.kind(), ExErrorKind::Setup);
        assert_eq!(err.op(), Some("store_open"));
    }
}
