//! Credential and flow storage
//!
//! - `keys` - Storage key layout shared by every backend
//! - `memory` - Ephemeral in-process backend
//! - `credentials` - Typed accessor over a backend

pub mod credentials;
pub mod keys;
pub mod memory;

pub use credentials::Credentials;
pub use keys::FlowKind;
pub use memory::MemoryStore;

use chrono::{DateTime, Utc};

use crate::errors::StoreError;

/// Optional attributes applied when writing an entry
///
/// Durable backends persist these alongside the value; the ephemeral
/// backend only honors `expires_at`.
#[derive(Debug, Clone, Default)]
pub struct SetOptions {
    /// Absolute expiry for the entry
    pub expires_at: Option<DateTime<Utc>>,

    /// Path attribute for durable entries
    pub path: Option<String>,

    /// Domain attribute for durable entries
    pub domain: Option<String>,
}

impl SetOptions {
    /// Options with an expiry and backend defaults for the rest
    pub fn expiring_at(expires_at: DateTime<Utc>) -> Self {
        Self {
            expires_at: Some(expires_at),
            ..Default::default()
        }
    }
}

/// String key/value storage backend
///
/// Implementations must tolerate concurrent access from multiple tasks.
/// An entry past its expiry behaves as absent.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`
    ///
    /// # Returns
    /// * `Ok(Some(value))` - Entry exists and has not expired
    /// * `Ok(None)` - Entry is absent or expired
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write `value` under `key`, replacing any previous entry
    fn set(&self, key: &str, value: &str, options: &SetOptions) -> Result<(), StoreError>;

    /// Remove the entry under `key`, if present
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}
