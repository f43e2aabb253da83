//! Business services containing session and flow logic.

pub mod countdown;
pub mod flow;
pub mod guard;
pub mod refresh;
pub mod session;
pub mod token;

// Re-export commonly used types
pub use countdown::{format_remaining, FlowCountdown};
pub use flow::{AuthApi, LoginFlow, LoginOutcome, PasswordResetFlow, ResetRequestOutcome};
pub use guard::{decide, GuardDecision, GuardOutcome, RouteGuard, UserFetch};
pub use refresh::{should_refresh, RefreshAdvisor, REFRESH_THRESHOLD_MS};
pub use session::SessionService;
pub use token::decode_payload;
