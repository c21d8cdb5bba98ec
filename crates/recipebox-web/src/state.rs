//! Shared handler state

use recipebox_core::{ExError, ExErrorKind};
use recipebox_store::RecipeStore;
use std::sync::Arc;
use tokio::sync::Mutex;

/// State shared across handlers
///
/// The store's single connection is serialized behind a mutex; store calls
/// block, so handlers run them on the blocking pool via [`AppState::with_store`].
#[derive(Clone)]
pub struct AppState {
    store: Arc<Mutex<RecipeStore>>,
}

impl AppState {
    pub fn new(store: RecipeStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// Run a blocking store operation off the async runtime
    pub async fn with_store<T, F>(&self, f: F) -> Result<T, ExError>
    where
        F: FnOnce(&mut RecipeStore) -> Result<T, ExError> + Send + 'static,
        T: Send + 'static,
    {
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || {
            let mut guard = store.blocking_lock();
            f(&mut *guard)
        })
        .await
        .map_err(|e| {
            ExError::new(ExErrorKind::Internal)
                .with_op("spawn_blocking")
                .with_message(e.to_string())
        })?
    }
}
