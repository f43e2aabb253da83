//! Durable file-backed key/value store.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use af_core::errors::StoreError;
use af_core::store::{KeyValueStore, SetOptions};
use af_shared::config::StoreConfig;

/// One persisted entry with its cookie-style attributes
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedEntry {
    value: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    expires_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    domain: Option<String>,
}

impl PersistedEntry {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.map_or(false, |at| at <= now)
    }
}

/// Key/value store persisted as a JSON document on disk
///
/// Every mutation rewrites the backing file through a temporary sibling
/// and an atomic rename, so a process restart sees the credentials and
/// flow flags the previous run left behind, never a half-written file.
/// Expired entries are dropped on load and on read.
pub struct FileStore {
    file_path: PathBuf,
    default_path: String,
    default_domain: Option<String>,
    entries: Mutex<HashMap<String, PersistedEntry>>,
}

impl FileStore {
    /// Open the store at the configured file path
    ///
    /// Creates the parent directory when missing. A missing file is an
    /// empty store, not an error.
    pub fn open(config: &StoreConfig) -> Result<Self, StoreError> {
        if let Some(parent) = config.file_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let entries = match fs::read(&config.file_path) {
            Ok(bytes) => {
                let mut loaded: HashMap<String, PersistedEntry> =
                    serde_json::from_slice(&bytes)?;
                let now = Utc::now();
                loaded.retain(|_, entry| !entry.is_expired(now));
                loaded
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(err) => return Err(err.into()),
        };

        debug!(
            path = %config.file_path.display(),
            entries = entries.len(),
            event = "durable_store_opened",
            "Opened durable store"
        );

        Ok(Self {
            file_path: config.file_path.clone(),
            default_path: config.path.clone(),
            default_domain: config.domain.clone(),
            entries: Mutex::new(entries),
        })
    }

    fn persist(&self, entries: &HashMap<String, PersistedEntry>) -> Result<(), StoreError> {
        let serialized = serde_json::to_vec_pretty(entries)?;
        let tmp_path = self.file_path.with_extension("json.tmp");
        fs::write(&tmp_path, serialized)?;
        fs::rename(&tmp_path, &self.file_path)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::Unavailable)?;
        match entries.get(key) {
            Some(entry) if entry.is_expired(Utc::now()) => {
                entries.remove(key);
                self.persist(&entries)?;
                Ok(None)
            }
            Some(entry) => Ok(Some(entry.value.clone())),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &str, options: &SetOptions) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::Unavailable)?;
        let entry = PersistedEntry {
            value: value.to_string(),
            expires_at: options.expires_at,
            path: options
                .path
                .clone()
                .or_else(|| Some(self.default_path.clone())),
            domain: options.domain.clone().or_else(|| self.default_domain.clone()),
        };
        entries.insert(key.to_string(), entry);
        self.persist(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::Unavailable)?;
        if entries.remove(key).is_some() {
            self.persist(&entries)?;
        }
        Ok(())
    }
}
