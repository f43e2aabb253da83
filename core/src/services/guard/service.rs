//! Stateful route guard over the pure decision table.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::info;

use crate::services::guard::decision::{decide, GuardDecision, UserFetch};
use crate::store::Credentials;

/// Outcome handed to the navigation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Render the protected content
    Allow,

    /// Render a loading placeholder
    Loading,

    /// Navigate to the login route now
    Redirect { return_to: Option<String> },

    /// A redirect was already issued; do not navigate again
    RedirectPending,
}

/// Route guard bound to the credential store
///
/// Adds two behaviors on top of the pure decision: credentials the server
/// no longer accepts are cleared when a settled identity fetch comes back
/// empty, and a redirect is only issued once until the guard allows again.
pub struct RouteGuard {
    credentials: Credentials,
    redirected: AtomicBool,
}

impl RouteGuard {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            redirected: AtomicBool::new(false),
        }
    }

    /// Evaluate access for a protected route
    pub fn evaluate(&self, fetch: &UserFetch, location: &str) -> GuardOutcome {
        let has_token = self.credentials.token().is_some();
        match decide(has_token, fetch, location) {
            GuardDecision::Allow => {
                self.redirected.store(false, Ordering::Release);
                GuardOutcome::Allow
            }
            GuardDecision::Loading => GuardOutcome::Loading,
            GuardDecision::RedirectToLogin { return_to } => {
                if has_token {
                    // The server rejected the identity behind this token
                    self.credentials.clear_tokens();
                    info!(
                        event = "stale_credentials_cleared",
                        "Cleared credentials after failed identity fetch"
                    );
                }
                if self.redirected.swap(true, Ordering::AcqRel) {
                    GuardOutcome::RedirectPending
                } else {
                    GuardOutcome::Redirect { return_to }
                }
            }
        }
    }
}
