//! Session state derivation and broadcast.

use chrono::Utc;
use tokio::sync::watch;
use tracing::info;

use crate::domain::entities::{AuthState, SessionSnapshot};
use crate::services::token::decode_payload;
use crate::store::Credentials;

/// Derives the session state from stored credentials and broadcasts changes
///
/// State is never stored: every change to the credential pair triggers a
/// re-derivation from what storage actually holds, so storage remains the
/// single source of truth. Token presence alone decides authentication;
/// expiry and decodability are reported through `snapshot` and left for
/// the route guard to act on.
pub struct SessionService {
    credentials: Credentials,
    sender: watch::Sender<AuthState>,
}

impl SessionService {
    /// Create a session service over the given credential accessor
    ///
    /// The initial state is derived immediately from storage, so a
    /// process restart with a durable backend resumes the prior session.
    pub fn new(credentials: Credentials) -> Self {
        let initial = Self::derive(&credentials);
        let (sender, _) = watch::channel(initial);
        Self {
            credentials,
            sender,
        }
    }

    /// Snapshot of the current session state
    pub fn state(&self) -> AuthState {
        self.sender.borrow().clone()
    }

    /// Derived view of authentication, expiry remainder, and expiry flag
    ///
    /// Computed fresh from storage and the token codec on every call.
    pub fn snapshot(&self) -> SessionSnapshot {
        let Some(token) = self.stored_token() else {
            return SessionSnapshot::anonymous();
        };
        let claims = decode_payload(&token).ok();
        let now = Utc::now();
        SessionSnapshot {
            is_authenticated: true,
            expires_in_ms: claims.as_ref().and_then(|c| c.time_until_expiry(now)),
            is_expired: claims.as_ref().map_or(false, |c| c.is_expired(now)),
        }
    }

    /// Subscribe to session state changes
    ///
    /// The receiver observes the current value immediately and every
    /// subsequent transition.
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.sender.subscribe()
    }

    /// Access the underlying credential accessor
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Store a freshly issued token pair and re-derive the state
    ///
    /// The pair replaces the previous one wholesale; no token shape
    /// validation happens here.
    pub fn login(&self, access_token: &str, refresh_token: Option<&str>) {
        self.credentials.store_tokens(access_token, refresh_token);
        self.sync();
    }

    /// Remove the stored token pair and re-derive the state
    ///
    /// Subscribers observe the transition to `Unauthenticated`, which is
    /// the signal the navigation layer uses to leave protected content.
    pub fn logout(&self) {
        self.credentials.clear_tokens();
        self.sync();
    }

    /// Re-derive the state from storage and broadcast it if it changed
    pub fn sync(&self) {
        let next = Self::derive(&self.credentials);
        let changed = self.sender.send_if_modified(|current| {
            if *current == next {
                return false;
            }
            *current = next.clone();
            true
        });
        if changed {
            info!(
                authenticated = next.is_authenticated(),
                event = "auth_state_changed",
                "Session state transition"
            );
        }
    }

    fn stored_token(&self) -> Option<String> {
        self.credentials.token().filter(|token| !token.is_empty())
    }

    fn derive(credentials: &Credentials) -> AuthState {
        match credentials.token().filter(|token| !token.is_empty()) {
            Some(token) => AuthState::Authenticated {
                claims: decode_payload(&token).ok(),
            },
            None => AuthState::Unauthenticated,
        }
    }
}
