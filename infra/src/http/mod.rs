//! HTTP implementations of outward-facing abstractions.

mod auth_api;

pub use auth_api::{HttpAuthApi, HttpAuthApiConfig};
