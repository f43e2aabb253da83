//! Tests for environment-keyed backend selection

use af_core::store::SetOptions;
use af_shared::config::{AppConfig, Environment, StoreConfig};
use uuid::Uuid;

use crate::store::select_store;

fn config_for(environment: Environment) -> AppConfig {
    let path = std::env::temp_dir().join(format!("authflow-select-{}.json", Uuid::new_v4()));
    AppConfig {
        environment,
        store: StoreConfig::new(path),
        ..AppConfig::default()
    }
}

#[test]
fn test_development_selects_ephemeral_store() {
    let config = config_for(Environment::Development);
    let store = select_store(&config).unwrap();

    store.set("token", "jwt", &SetOptions::default()).unwrap();
    assert_eq!(store.get("token").unwrap(), Some("jwt".to_string()));
    assert!(!config.store.file_path.exists());
}

#[test]
fn test_production_selects_durable_store() {
    let config = config_for(Environment::Production);
    let store = select_store(&config).unwrap();

    store.set("token", "jwt", &SetOptions::default()).unwrap();
    assert!(config.store.file_path.exists());

    let _ = std::fs::remove_file(&config.store.file_path);
}

#[test]
fn test_staging_selects_durable_store() {
    let config = config_for(Environment::Staging);
    let store = select_store(&config).unwrap();

    store.set("token", "jwt", &SetOptions::default()).unwrap();
    assert!(config.store.file_path.exists());

    let _ = std::fs::remove_file(&config.store.file_path);
}
