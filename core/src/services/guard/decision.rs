//! Pure access decision for protected routes.

/// Snapshot of the external "who am I" fetch keyed off the stored token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserFetch {
    /// The fetch has not settled yet
    pub is_loading: bool,

    /// The fetch settled with a usable identity
    pub has_user: bool,

    /// The fetch settled with an error
    pub is_error: bool,
}

impl UserFetch {
    pub fn loading() -> Self {
        Self {
            is_loading: true,
            has_user: false,
            is_error: false,
        }
    }

    pub fn resolved() -> Self {
        Self {
            is_loading: false,
            has_user: true,
            is_error: false,
        }
    }

    pub fn failed() -> Self {
        Self {
            is_loading: false,
            has_user: false,
            is_error: true,
        }
    }

    pub fn empty() -> Self {
        Self {
            is_loading: false,
            has_user: false,
            is_error: false,
        }
    }
}

/// Outcome of evaluating the decision table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Render the protected content
    Allow,

    /// Render a loading placeholder, no redirect yet
    Loading,

    /// Send the user to the login route
    ///
    /// `return_to` carries the attempted location when the decision comes
    /// from a settled identity fetch, so the post-login flow can return
    /// the user there. A missing token redirects without it.
    RedirectToLogin { return_to: Option<String> },
}

/// Decide access for a protected route
///
/// Without a token the decision never waits for the identity fetch: an
/// absent token cannot produce a successful fetch, so the redirect is
/// issued on the synchronous check alone.
pub fn decide(has_token: bool, fetch: &UserFetch, location: &str) -> GuardDecision {
    if !has_token {
        return GuardDecision::RedirectToLogin { return_to: None };
    }
    if fetch.is_loading {
        return GuardDecision::Loading;
    }
    if fetch.has_user && !fetch.is_error {
        return GuardDecision::Allow;
    }
    GuardDecision::RedirectToLogin {
        return_to: Some(location.to_string()),
    }
}
