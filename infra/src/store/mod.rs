//! Storage backends
//!
//! This module provides the durable file-backed store and the backend
//! selection logic keyed on the application environment.

mod file;
mod select;

pub use file::FileStore;
pub use select::select_store;

#[cfg(test)]
mod tests;
