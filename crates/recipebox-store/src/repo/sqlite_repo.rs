//! SQLite repository implementation
//!
//! Row-level access to the `recipes` table. Write helpers run inside a
//! transaction owned by the caller and report failures with the
//! `WritePhase` they happened in.

#![allow(clippy::result_large_err)]

use crate::errors::{from_rusqlite, phase_error, phase_failure, Result, WritePhase};
use recipebox_core::model::ingredients;
use recipebox_core::Recipe;
use rusqlite::{Connection, Transaction, TransactionBehavior};

const INSERT_RECIPE: &str = "INSERT INTO recipes (name, ingredients) VALUES (?1, ?2)";
const UPDATE_RECIPE: &str = "UPDATE recipes SET name = ?1, ingredients = ?2 WHERE id = ?3";
const SELECT_RECIPES: &str = "SELECT id, name, ingredients FROM recipes ORDER BY id";

/// SQLite repository for recipes
pub struct SqliteRepo;

impl SqliteRepo {
    /// Read every recipe in primary-key order
    ///
    /// Fails as a whole if any row cannot be read; no partial list is returned.
    pub fn list_recipes(conn: &Connection) -> Result<Vec<Recipe>> {
        let mut stmt = conn.prepare(SELECT_RECIPES).map_err(from_rusqlite)?;

        let recipes = stmt
            .query_map([], |row| {
                let id: i64 = row.get(0)?;
                let name: String = row.get(1)?;
                let stored: String = row.get(2)?;
                Ok(Recipe::new(id, name, ingredients::decode(&stored)))
            })
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| from_rusqlite(e).with_op("recipe_list"))?;

        Ok(recipes)
    }

    /// Get a single recipe by id
    pub fn get_recipe(conn: &Connection, id: i64) -> Result<Option<Recipe>> {
        use rusqlite::OptionalExtension;

        conn.query_row(
            "SELECT id, name, ingredients FROM recipes WHERE id = ?1",
            [id],
            |row| {
                let name: String = row.get(1)?;
                let stored: String = row.get(2)?;
                Ok(Recipe::new(row.get(0)?, name, ingredients::decode(&stored)))
            },
        )
        .optional()
        .map_err(from_rusqlite)
    }

    /// Count rows in the recipes table
    pub fn count_recipes(conn: &Connection) -> Result<i64> {
        conn.query_row("SELECT COUNT(*) FROM recipes", [], |row| row.get(0))
            .map_err(from_rusqlite)
    }

    /// Open the write transaction for one upsert
    ///
    /// `IMMEDIATE` takes the write lock up front, so lock contention surfaces
    /// here rather than halfway through the statements.
    pub fn begin_write(conn: &mut Connection) -> Result<Transaction<'_>> {
        conn.transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(|e| {
                phase_error(
                    WritePhase::Begin,
                    "Could not start database transaction for recipe create/update",
                    e,
                )
            })
    }

    /// Insert a recipe row and return the identifier SQLite assigned to it
    pub fn insert_recipe_tx(tx: &Transaction, name: &str, stored_ingredients: &str) -> Result<i64> {
        let mut stmt = tx.prepare_cached(INSERT_RECIPE).map_err(|e| {
            phase_error(
                WritePhase::Prepare,
                "Could not prepare statement for recipe create",
                e,
            )
        })?;

        let changed = stmt
            .execute(rusqlite::params![name, stored_ingredients])
            .map_err(|e| {
                phase_error(
                    WritePhase::Execute,
                    "Could not execute the recipe create statement",
                    e,
                )
            })?;

        if changed != 1 {
            return Err(phase_failure(
                WritePhase::ExtractId,
                format!(
                    "Recipe create reported {} inserted rows; assigned id is unknown",
                    changed
                ),
            ));
        }

        let id = tx.last_insert_rowid();
        if id <= 0 {
            return Err(phase_failure(
                WritePhase::ExtractId,
                format!("Recipe create returned invalid assigned id {}", id),
            ));
        }

        tracing::debug!(recipe_id = id, "recipe row inserted");
        Ok(id)
    }

    /// Rewrite name and ingredients of an existing row
    ///
    /// Returns the number of rows changed; zero means no row has this id.
    pub fn update_recipe_tx(
        tx: &Transaction,
        id: i64,
        name: &str,
        stored_ingredients: &str,
    ) -> Result<usize> {
        let mut stmt = tx.prepare_cached(UPDATE_RECIPE).map_err(|e| {
            phase_error(
                WritePhase::Prepare,
                "Could not prepare statement for recipe update",
                e,
            )
        })?;

        let changed = stmt
            .execute(rusqlite::params![name, stored_ingredients, id])
            .map_err(|e| {
                phase_error(
                    WritePhase::Execute,
                    "Could not execute the recipe update statement",
                    e,
                )
            })?;

        tracing::debug!(recipe_id = id, changed, "recipe row updated");
        Ok(changed)
    }

    /// Commit the write transaction
    ///
    /// On failure the transaction guard is dropped, which rolls it back.
    pub fn commit_write(tx: Transaction) -> Result<()> {
        tx.commit().map_err(|e| {
            phase_error(
                WritePhase::Commit,
                "Could not commit the recipe create/update",
                e,
            )
        })
    }
}
