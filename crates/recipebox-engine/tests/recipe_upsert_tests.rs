// Integration tests for the recipe upsert coordinator.
// Covers create, update, not-found updates, phase attribution and atomicity.

use recipebox_core::{ExErrorKind, NewRecipe, Recipe, RecipeDraft};
use recipebox_engine::commands::recipe::{recipe_list, recipe_upsert};
use recipebox_store::{RecipeStore, StoreConfig};
use rusqlite::Connection;
use std::time::Duration;
use tempfile::TempDir;

fn items(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// On-disk store in rollback-journal mode with no busy waiting, so lock
/// conflicts from a second connection fail immediately.
fn setup_file_store() -> (TempDir, StoreConfig, RecipeStore) {
    let temp_dir = TempDir::new().unwrap();
    let config = StoreConfig {
        data_dir: temp_dir.path().join(".data"),
        wal: false,
        busy_timeout: Duration::ZERO,
        ..StoreConfig::default()
    };
    let store = RecipeStore::open(&config).unwrap();
    (temp_dir, config, store)
}

fn second_connection(config: &StoreConfig) -> Connection {
    let conn = Connection::open(config.db_path()).unwrap();
    conn.busy_timeout(Duration::ZERO).unwrap();
    conn
}

// ---------------------------------------------------------------------------
// create / update
// ---------------------------------------------------------------------------

#[test]
fn test_create_then_update_scenario() {
    let mut store = RecipeStore::open_in_memory().unwrap();

    // Create
    let created = recipe_upsert(
        store.connection_mut(),
        RecipeDraft::from_parts(None, "Pie", items(&["apple", "sugar", "flour"])),
    )
    .unwrap();

    assert_eq!(created.id, 1);
    assert_eq!(
        recipe_list(store.connection()).unwrap(),
        vec![Recipe::new(1, "Pie", items(&["apple", "sugar", "flour"]))]
    );

    // Update the same id
    let updated = recipe_upsert(
        store.connection_mut(),
        RecipeDraft::from_parts(Some(created.id), "Pie", items(&["apple", "cinnamon"])),
    )
    .unwrap();

    assert_eq!(updated.id, created.id);
    let all = recipe_list(store.connection()).unwrap();
    assert_eq!(all.len(), 1, "Row count unchanged by update");
    assert_eq!(all[0].id, 1);
    assert_eq!(all[0].ingredients, items(&["apple", "cinnamon"]));
}

#[test]
fn test_update_rewrites_name() {
    let mut store = RecipeStore::open_in_memory().unwrap();
    let created = recipe_upsert(
        store.connection_mut(),
        NewRecipe::new("Pie", items(&["apple"])).into(),
    )
    .unwrap();

    recipe_upsert(
        store.connection_mut(),
        RecipeDraft::from_parts(Some(created.id), "Apple Pie", items(&["apple"])),
    )
    .unwrap();

    assert_eq!(store.get(created.id).unwrap().unwrap().name, "Apple Pie");
}

#[test]
fn test_create_ids_are_unused() {
    let mut store = RecipeStore::open_in_memory().unwrap();
    let mut ids = Vec::new();
    for name in ["A", "B", "C", "D"] {
        let recipe = recipe_upsert(
            store.connection_mut(),
            RecipeDraft::from_parts(None, name, items(&["x"])),
        )
        .unwrap();
        assert!(!ids.contains(&recipe.id), "id {} reused", recipe.id);
        ids.push(recipe.id);
    }
    assert_eq!(store.count().unwrap(), 4);
}

#[test]
fn test_empty_name_and_ingredients_are_stored_as_is() {
    let mut store = RecipeStore::open_in_memory().unwrap();
    let created = recipe_upsert(
        store.connection_mut(),
        RecipeDraft::from_parts(None, "", Vec::new()),
    )
    .unwrap();

    let stored = store.get(created.id).unwrap().unwrap();
    assert_eq!(stored.name, "");
    assert!(stored.ingredients.is_empty());
}

#[test]
fn test_update_of_missing_id_is_not_found_and_writes_nothing() {
    let mut store = RecipeStore::open_in_memory().unwrap();

    let err = recipe_upsert(
        store.connection_mut(),
        RecipeDraft::from_parts(Some(42), "Ghost", items(&["air"])),
    )
    .unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::NotFound);
    assert_eq!(err.op(), Some("recipe_upsert.execute"));
    assert_eq!(err.entity_id(), Some("42"));
    assert_eq!(store.count().unwrap(), 0);
}

// ---------------------------------------------------------------------------
// phase attribution
// ---------------------------------------------------------------------------

#[test]
fn test_begin_failure_is_attributed() {
    let (_tmp, config, mut store) = setup_file_store();

    // Another writer holds the write lock
    let other = second_connection(&config);
    other.execute_batch("BEGIN IMMEDIATE").unwrap();

    let err = recipe_upsert(
        store.connection_mut(),
        RecipeDraft::from_parts(None, "Pie", items(&["apple"])),
    )
    .unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::Transaction);
    assert_eq!(err.op(), Some("recipe_upsert.begin"));

    other.execute_batch("ROLLBACK").unwrap();
    assert!(store.fetch_all().unwrap().is_empty());
}

#[test]
fn test_prepare_failure_is_attributed() {
    let mut store = RecipeStore::open_in_memory().unwrap();
    store
        .connection()
        .execute_batch("DROP TABLE recipes")
        .unwrap();

    let err = recipe_upsert(
        store.connection_mut(),
        RecipeDraft::from_parts(None, "Pie", items(&["apple"])),
    )
    .unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::Statement);
    assert_eq!(err.op(), Some("recipe_upsert.prepare"));
    assert!(err.message().contains("Could not prepare statement"));
}

#[test]
fn test_execute_failure_is_attributed_and_rolled_back() {
    let mut store = RecipeStore::open_in_memory().unwrap();
    let kept = recipe_upsert(
        store.connection_mut(),
        RecipeDraft::from_parts(None, "Pie", items(&["apple"])),
    )
    .unwrap();

    store
        .connection()
        .execute_batch(
            "CREATE TRIGGER reject_updates BEFORE UPDATE ON recipes
             BEGIN SELECT RAISE(ABORT, 'updates rejected'); END;",
        )
        .unwrap();

    let err = recipe_upsert(
        store.connection_mut(),
        RecipeDraft::from_parts(Some(kept.id), "Pie", items(&["pear"])),
    )
    .unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::Statement);
    assert_eq!(err.op(), Some("recipe_upsert.execute"));
    assert!(err.message().contains("updates rejected"));
    assert_eq!(store.fetch_all().unwrap(), vec![kept]);
}

#[test]
fn test_insert_without_row_is_result_unavailable() {
    let mut store = RecipeStore::open_in_memory().unwrap();

    // The insert "succeeds" but no row is written, so there is no id to return
    store
        .connection()
        .execute_batch(
            "CREATE TRIGGER swallow_inserts BEFORE INSERT ON recipes
             BEGIN SELECT RAISE(IGNORE); END;",
        )
        .unwrap();

    let err = recipe_upsert(
        store.connection_mut(),
        RecipeDraft::from_parts(None, "Pie", items(&["apple"])),
    )
    .unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::ResultUnavailable);
    assert_eq!(err.op(), Some("recipe_upsert.extract_id"));
    assert!(err.message().contains("0 inserted rows"));
    assert_eq!(store.count().unwrap(), 0);
}

// ---------------------------------------------------------------------------
// atomicity
// ---------------------------------------------------------------------------

#[test]
fn test_commit_failure_leaves_no_row() {
    let (_tmp, config, mut store) = setup_file_store();

    // A reader holding an open read transaction blocks the writer's commit
    let reader = second_connection(&config);
    reader.execute_batch("BEGIN").unwrap();
    let seen: i64 = reader
        .query_row("SELECT COUNT(*) FROM recipes", [], |row| row.get(0))
        .unwrap();
    assert_eq!(seen, 0);

    let err = recipe_upsert(
        store.connection_mut(),
        RecipeDraft::from_parts(None, "Pie", items(&["apple", "sugar"])),
    )
    .unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::Transaction);
    assert_eq!(err.op(), Some("recipe_upsert.commit"));

    reader.execute_batch("COMMIT").unwrap();

    // Nothing durable happened, and the connection is usable again
    assert!(store.fetch_all().unwrap().is_empty());
    let retried = recipe_upsert(
        store.connection_mut(),
        RecipeDraft::from_parts(None, "Pie", items(&["apple", "sugar"])),
    )
    .unwrap();
    assert_eq!(store.fetch_all().unwrap(), vec![retried]);
}

#[test]
fn test_commit_failure_on_update_keeps_old_values() {
    let (_tmp, config, mut store) = setup_file_store();
    let original = recipe_upsert(
        store.connection_mut(),
        RecipeDraft::from_parts(None, "Pie", items(&["apple"])),
    )
    .unwrap();

    let reader = second_connection(&config);
    reader.execute_batch("BEGIN").unwrap();
    let _: i64 = reader
        .query_row("SELECT COUNT(*) FROM recipes", [], |row| row.get(0))
        .unwrap();

    let err = recipe_upsert(
        store.connection_mut(),
        RecipeDraft::from_parts(Some(original.id), "Tart", items(&["pear"])),
    )
    .unwrap_err();
    assert_eq!(err.op(), Some("recipe_upsert.commit"));

    reader.execute_batch("COMMIT").unwrap();
    assert_eq!(store.fetch_all().unwrap(), vec![original]);
}
