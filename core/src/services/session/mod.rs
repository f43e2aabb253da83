//! Session state module
//!
//! This module derives and broadcasts the authentication state:
//! - Derivation of `AuthState` from stored credentials
//! - Change notification through a watch channel

mod service;

pub use service::SessionService;
