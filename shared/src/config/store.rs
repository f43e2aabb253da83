//! Storage backend configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the durable credential/flow store
///
/// The durable backend persists key/value pairs to disk with optional
/// cookie-style attributes. The ephemeral backend ignores this entirely.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// File path for the durable store
    pub file_path: PathBuf,

    /// Default path attribute applied to durable entries
    #[serde(default = "default_path_attribute")]
    pub path: String,

    /// Default domain attribute applied to durable entries
    #[serde(default)]
    pub domain: Option<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            file_path: PathBuf::from(".authflow/store.json"),
            path: default_path_attribute(),
            domain: None,
        }
    }
}

impl StoreConfig {
    /// Create a store configuration with an explicit file path
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
            ..Default::default()
        }
    }
}

fn default_path_attribute() -> String {
    String::from("/")
}
