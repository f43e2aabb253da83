//! Derived session state.

use crate::domain::entities::claims::TokenClaims;

/// Session state derived from the stored bearer token
///
/// Never persisted: recomputed from storage whenever credentials change.
/// Presence of a non-empty token is the sole truth value here. Whether
/// the server still accepts the token is the route guard's concern, so a
/// stored-but-expired token still derives `Authenticated`.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthState {
    /// No token is stored, or the stored token is empty
    Unauthenticated,

    /// A non-empty bearer token is stored
    ///
    /// `claims` is `None` when the token payload could not be decoded.
    Authenticated { claims: Option<TokenClaims> },
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated { .. })
    }

    /// Decoded claims of the stored token, if any
    pub fn claims(&self) -> Option<&TokenClaims> {
        match self {
            AuthState::Authenticated { claims } => claims.as_ref(),
            AuthState::Unauthenticated => None,
        }
    }
}

impl Default for AuthState {
    fn default() -> Self {
        AuthState::Unauthenticated
    }
}

/// Point-in-time view of the session
///
/// `is_authenticated` reflects token presence only; `is_expired` carries
/// the codec's verdict separately so the two never get conflated. A
/// token without a readable expiry reports `is_expired == false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// A non-empty access token is stored
    pub is_authenticated: bool,

    /// Milliseconds until the token expires; negative when already past,
    /// `None` when the token has no readable expiry
    pub expires_in_ms: Option<i64>,

    /// The token carries an expiry claim that has passed
    pub is_expired: bool,
}

impl SessionSnapshot {
    /// Snapshot of an unauthenticated session
    pub fn anonymous() -> Self {
        Self {
            is_authenticated: false,
            expires_in_ms: None,
            is_expired: false,
        }
    }
}
