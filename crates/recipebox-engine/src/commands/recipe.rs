//! Recipe command handlers with boundary logging.
//!
//! ## Logging Ownership
//!
//! The engine layer owns lifecycle logging for recipe operations:
//! - `log_op_start!` at entry
//! - `log_op_end!` on success
//! - `log_op_error!` on failure
//!
//! Lower layers (store, core) use only `tracing::debug!()` for internal details.

#![allow(clippy::result_large_err)]

use recipebox_core::errors::{ExError, RecipeError};
use recipebox_core::model::ingredients;
use recipebox_core::{log_op_end, log_op_error, log_op_start};
use recipebox_core::{Recipe, RecipeDraft};
use recipebox_store::errors::{Result, UPSERT_OP};
use recipebox_store::repo::SqliteRepo;
use recipebox_store::WritePhase;
use rusqlite::Connection;

/// Create or update a recipe in one transaction
///
/// `RecipeDraft::New` inserts a row and returns it with the id SQLite
/// assigned. `RecipeDraft::Existing` rewrites name and ingredients of the row
/// with that id and returns it unchanged in identity.
///
/// One call is one attempt: there is no retry, and the transaction is rolled
/// back on every failure path, so a failed call leaves storage untouched.
///
/// ## Errors
///
/// Each error names the failing phase in its `op` (`recipe_upsert.<phase>`):
/// - `Serialization` (`encode`): an ingredient contains `|` or is empty
/// - `Transaction` (`begin`, `commit`): transaction could not start or commit
/// - `Statement` (`prepare`, `execute`): statement could not be prepared or run
/// - `ResultUnavailable` (`extract_id`): assigned id could not be read after insert
/// - `NotFound` (`execute`): update targeted an id with no row
pub fn recipe_upsert(conn: &mut Connection, draft: RecipeDraft) -> Result<Recipe> {
    log_op_start!(
        UPSERT_OP,
        recipe_id = ?draft.id(),
        ingredient_count = draft.ingredients().len() as u64
    );
    let start = std::time::Instant::now();

    let recipe = recipe_upsert_impl(conn, draft).map_err(|e| {
        log_op_error!(
            UPSERT_OP,
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        UPSERT_OP,
        duration_ms = start.elapsed().as_millis() as u64,
        recipe_id = recipe.id
    );

    Ok(recipe)
}

fn recipe_upsert_impl(conn: &mut Connection, draft: RecipeDraft) -> Result<Recipe> {
    let stored = encode_ingredients(draft.ingredients())?;

    let tx = SqliteRepo::begin_write(conn)?;

    let recipe = match draft {
        RecipeDraft::New(new) => {
            let id = SqliteRepo::insert_recipe_tx(&tx, &new.name, &stored)?;
            new.into_recipe(id)
        }
        RecipeDraft::Existing(existing) => {
            let changed = SqliteRepo::update_recipe_tx(&tx, existing.id, &existing.name, &stored)?;
            if changed == 0 {
                return Err(ExError::from(RecipeError::RecipeNotFound {
                    recipe_id: existing.id,
                })
                .with_op(WritePhase::Execute.op()));
            }
            existing.into_recipe()
        }
    };

    SqliteRepo::commit_write(tx)?;

    Ok(recipe)
}

fn encode_ingredients(items: &[String]) -> Result<String> {
    ingredients::encode(items)
        .map_err(|e| ExError::from(e).with_op(format!("{}.encode", UPSERT_OP)))
}

/// Fetch every stored recipe
///
/// ## Errors
///
/// - `Persistence`: a row could not be read; no partial list is returned
pub fn recipe_list(conn: &Connection) -> Result<Vec<Recipe>> {
    log_op_start!("recipe_list");
    let start = std::time::Instant::now();

    let recipes = SqliteRepo::list_recipes(conn).map_err(|e| {
        log_op_error!(
            "recipe_list",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "recipe_list",
        duration_ms = start.elapsed().as_millis() as u64,
        recipe_count = recipes.len() as u64
    );

    Ok(recipes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use recipebox_core::ExErrorKind;
    use recipebox_store::RecipeStore;

    fn items(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_create_assigns_fresh_ids() {
        let mut store = RecipeStore::open_in_memory().unwrap();

        let a = recipe_upsert(
            store.connection_mut(),
            RecipeDraft::from_parts(None, "A", items(&["x"])),
        )
        .unwrap();
        let b = recipe_upsert(
            store.connection_mut(),
            RecipeDraft::from_parts(None, "B", items(&["y"])),
        )
        .unwrap();

        assert!(a.id > 0);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_unencodable_ingredients_never_open_a_write() {
        let mut store = RecipeStore::open_in_memory().unwrap();

        let err = recipe_upsert(
            store.connection_mut(),
            RecipeDraft::from_parts(None, "Bad", items(&["salt|pepper"])),
        )
        .unwrap_err();

        assert_eq!(err.kind(), ExErrorKind::Serialization);
        assert_eq!(err.op(), Some("recipe_upsert.encode"));
        assert_eq!(store.count().unwrap(), 0);
    }
}
