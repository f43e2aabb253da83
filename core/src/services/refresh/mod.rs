//! Refresh advisory module
//!
//! This module decides when the stored access token is close enough to
//! expiry that the caller should refresh it.

mod advisor;

pub use advisor::{should_refresh, RefreshAdvisor, REFRESH_THRESHOLD_MS};
