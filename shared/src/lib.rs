//! Shared utilities and common types for AuthFlow
//!
//! This crate provides common functionality used across the workspace:
//! - Configuration types and environment detection
//! - Language types for localized rendering
//! - Validation utilities (field errors, format validators)

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{AppConfig, AuthConfig, Environment, StoreConfig};
pub use types::Language;
pub use utils::validation;
