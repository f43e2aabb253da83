//! Typed credential accessor over a storage backend
//!
//! All reads and writes go through this wrapper. Backend failures are
//! absorbed here: a failed read behaves as an absent entry and a failed
//! write is logged, so callers above this layer never see `StoreError`.

use std::sync::Arc;

use crate::store::{keys, KeyValueStore, SetOptions};

/// Credential and flow-state accessor
#[derive(Clone)]
pub struct Credentials {
    store: Arc<dyn KeyValueStore>,
}

impl Credentials {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// The currently stored bearer access token
    pub fn token(&self) -> Option<String> {
        self.read(keys::TOKEN)
    }

    /// The currently stored refresh token
    pub fn refresh_token(&self) -> Option<String> {
        self.read(keys::REFRESH_TOKEN)
    }

    /// Store an access/refresh token pair, replacing any previous pair
    ///
    /// Replacement is wholesale: an absent refresh token clears the
    /// refresh slot instead of keeping the previous one.
    pub fn store_tokens(&self, access_token: &str, refresh_token: Option<&str>) {
        self.write(keys::TOKEN, access_token, &SetOptions::default());
        match refresh_token {
            Some(refresh_token) => {
                self.write(keys::REFRESH_TOKEN, refresh_token, &SetOptions::default())
            }
            None => self.delete(keys::REFRESH_TOKEN),
        }
    }

    /// Remove both tokens
    pub fn clear_tokens(&self) {
        self.delete(keys::TOKEN);
        self.delete(keys::REFRESH_TOKEN);
    }

    /// Whether a boolean flag key is set
    ///
    /// Flags are stored as the literal `"true"`; any other value or an
    /// absent entry reads as false.
    pub fn flag(&self, key: &str) -> bool {
        self.read(key).as_deref() == Some(keys::FLAG_TRUE)
    }

    /// Set a boolean flag key
    pub fn set_flag(&self, key: &str) {
        self.write(key, keys::FLAG_TRUE, &SetOptions::default());
    }

    /// Read an arbitrary entry
    pub fn read(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(key = %key, error = %err, event = "store_read_failed", "Storage read failed, treating entry as absent");
                None
            }
        }
    }

    /// Write an arbitrary entry
    pub fn write(&self, key: &str, value: &str, options: &SetOptions) {
        if let Err(err) = self.store.set(key, value, options) {
            tracing::warn!(key = %key, error = %err, event = "store_write_failed", "Storage write failed");
        }
    }

    /// Remove an arbitrary entry
    pub fn delete(&self, key: &str) {
        if let Err(err) = self.store.remove(key) {
            tracing::warn!(key = %key, error = %err, event = "store_remove_failed", "Storage remove failed");
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::StoreError;
    use crate::store::MemoryStore;

    fn credentials() -> Credentials {
        Credentials::new(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn test_token_pair_roundtrip() {
        let creds = credentials();
        assert!(creds.token().is_none());

        creds.store_tokens("access", Some("refresh"));
        assert_eq!(creds.token().as_deref(), Some("access"));
        assert_eq!(creds.refresh_token().as_deref(), Some("refresh"));

        creds.clear_tokens();
        assert!(creds.token().is_none());
        assert!(creds.refresh_token().is_none());
    }

    #[test]
    fn test_pair_replacement_is_wholesale() {
        let creds = credentials();
        creds.store_tokens("access-1", Some("refresh-1"));

        creds.store_tokens("access-2", None);
        assert_eq!(creds.token().as_deref(), Some("access-2"));
        assert!(creds.refresh_token().is_none());
    }

    #[test]
    fn test_flag_semantics() {
        let creds = credentials();
        assert!(!creds.flag("otp_pending"));

        creds.set_flag("otp_pending");
        assert!(creds.flag("otp_pending"));

        creds.delete("otp_pending");
        assert!(!creds.flag("otp_pending"));
    }

    #[test]
    fn test_non_literal_flag_value_is_false() {
        let creds = credentials();
        creds.write("otp_pending", "yes", &SetOptions::default());
        assert!(!creds.flag("otp_pending"));
    }

    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Unavailable)
        }

        fn set(&self, _key: &str, _value: &str, _options: &SetOptions) -> Result<(), StoreError> {
            Err(StoreError::Unavailable)
        }

        fn remove(&self, _key: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable)
        }
    }

    #[test]
    fn test_backend_failures_are_absorbed() {
        let creds = Credentials::new(Arc::new(FailingStore));
        assert!(creds.token().is_none());
        creds.store_tokens("access", Some("refresh"));
        creds.clear_tokens();
        assert!(!creds.flag("otp_pending"));
    }
}
