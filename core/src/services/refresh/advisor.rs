//! Refresh advisory for near-expiry access tokens.

use chrono::{DateTime, Utc};
use std::sync::Mutex;

use crate::domain::entities::TokenClaims;

/// Refresh window before expiry (5 minutes, in milliseconds)
pub const REFRESH_THRESHOLD_MS: i64 = 300_000;

/// Whether a token with the given claims should be refreshed at `now`
///
/// Advises refresh while the remaining lifetime is non-negative and
/// strictly below the threshold. An already expired token is past saving,
/// so a negative remainder never advises refresh, and a token without a
/// known expiry is never advised either.
pub fn should_refresh(claims: &TokenClaims, now: DateTime<Utc>) -> bool {
    match claims.time_until_expiry(now) {
        Some(remaining) => (0..REFRESH_THRESHOLD_MS).contains(&remaining),
        None => false,
    }
}

/// Stateful advisor that reports each expiring token once
///
/// Callers poll `advise` on their own cadence; acknowledging an advisory
/// suppresses further advice for the same expiry instant. A refreshed
/// token carries a new expiry and re-arms the advisor.
#[derive(Debug, Default)]
pub struct RefreshAdvisor {
    acknowledged: Mutex<Option<DateTime<Utc>>>,
}

impl RefreshAdvisor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the caller should refresh now
    pub fn advise(&self, claims: &TokenClaims, now: DateTime<Utc>) -> bool {
        if !should_refresh(claims, now) {
            return false;
        }
        let acknowledged = self
            .acknowledged
            .lock()
            .map(|guard| *guard)
            .unwrap_or(None);
        acknowledged != claims.expiry_instant()
    }

    /// Record that the caller acted on an advisory for these claims
    pub fn acknowledge(&self, claims: &TokenClaims) {
        if let Ok(mut guard) = self.acknowledged.lock() {
            *guard = claims.expiry_instant();
        }
    }
}
