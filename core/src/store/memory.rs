//! Ephemeral in-process storage backend
//!
//! Entries live for the lifetime of the process and are dropped on exit.
//! Cookie-style path and domain attributes are accepted and ignored;
//! expiry is honored lazily on read.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Mutex;

use crate::errors::StoreError;
use crate::store::{KeyValueStore, SetOptions};

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Option<DateTime<Utc>>,
}

impl Entry {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            Some(expires_at) => now >= expires_at,
            None => false,
        }
    }
}

/// In-memory key/value store
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Entry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live (unexpired) entries
    pub fn len(&self) -> usize {
        let now = Utc::now();
        self.entries
            .lock()
            .map(|entries| entries.values().filter(|e| !e.is_expired(now)).count())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::Unavailable)?;
        let now = Utc::now();
        if let Some(entry) = entries.get(key) {
            if entry.is_expired(now) {
                entries.remove(key);
                return Ok(None);
            }
            return Ok(Some(entry.value.clone()));
        }
        Ok(None)
    }

    fn set(&self, key: &str, value: &str, options: &SetOptions) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::Unavailable)?;
        entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: options.expires_at,
            },
        );
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::Unavailable)?;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_set_get_remove() {
        let store = MemoryStore::new();
        store.set("token", "abc", &SetOptions::default()).unwrap();
        assert_eq!(store.get("token").unwrap(), Some("abc".to_string()));

        store.remove("token").unwrap();
        assert_eq!(store.get("token").unwrap(), None);
    }

    #[test]
    fn test_overwrite_replaces_value() {
        let store = MemoryStore::new();
        store.set("token", "old", &SetOptions::default()).unwrap();
        store.set("token", "new", &SetOptions::default()).unwrap();
        assert_eq!(store.get("token").unwrap(), Some("new".to_string()));
    }

    #[test]
    fn test_expired_entry_reads_as_absent() {
        let store = MemoryStore::new();
        let past = Utc::now() - Duration::seconds(1);
        store
            .set("token", "abc", &SetOptions::expiring_at(past))
            .unwrap();
        assert_eq!(store.get("token").unwrap(), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_future_expiry_still_readable() {
        let store = MemoryStore::new();
        let future = Utc::now() + Duration::hours(1);
        store
            .set("token", "abc", &SetOptions::expiring_at(future))
            .unwrap();
        assert_eq!(store.get("token").unwrap(), Some("abc".to_string()));
    }

    #[test]
    fn test_missing_key_is_none() {
        let store = MemoryStore::new();
        assert_eq!(store.get("nope").unwrap(), None);
    }
}
