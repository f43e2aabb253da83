//! Backend selection from the application configuration.

use std::sync::Arc;

use tracing::info;

use af_core::errors::StoreError;
use af_core::store::{KeyValueStore, MemoryStore};
use af_shared::config::AppConfig;

use crate::store::file::FileStore;

/// Select the storage backend for the configured environment
///
/// Development gets the ephemeral in-process store; staging and
/// production get the durable file store so sessions survive restarts.
pub fn select_store(config: &AppConfig) -> Result<Arc<dyn KeyValueStore>, StoreError> {
    if config.environment.is_development() {
        info!(
            backend = "memory",
            environment = %config.environment,
            event = "store_selected",
            "Selected ephemeral store"
        );
        return Ok(Arc::new(MemoryStore::new()));
    }

    let store = FileStore::open(&config.store)?;
    info!(
        backend = "file",
        environment = %config.environment,
        path = %config.store.file_path.display(),
        event = "store_selected",
        "Selected durable store"
    );
    Ok(Arc::new(store))
}
