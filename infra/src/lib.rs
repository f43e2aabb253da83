//! # AuthFlow Infrastructure
//!
//! Concrete implementations of the core abstractions:
//! - **Store**: durable file-backed key/value storage and backend
//!   selection from the application configuration
//! - **HTTP**: reqwest client for the remote authentication API

pub mod http;
pub mod store;

pub use http::{HttpAuthApi, HttpAuthApiConfig};
pub use store::{select_store, FileStore};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfraError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP client construction or transport error
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Storage backend error
    #[error("Store error: {0}")]
    Store(#[from] af_core::errors::StoreError),
}
