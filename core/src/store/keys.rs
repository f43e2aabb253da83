//! Storage key layout
//!
//! Every backend shares the same flat key namespace. Key strings are
//! stable: durable backends persist them to disk, so renaming a key
//! orphans previously written entries.

/// Bearer access token
pub const TOKEN: &str = "token";

/// Refresh token paired with the access token
pub const REFRESH_TOKEN: &str = "refreshToken";

/// Login flow has an OTP verification step pending
pub const OTP_PENDING: &str = "otp_pending";

/// Remaining seconds of the login OTP resend countdown
pub const OTP_COUNTDOWN_REMAINING: &str = "otp_countdown_remaining";

/// Password reset flow has an OTP verification step pending
pub const RESET_OTP_PENDING: &str = "reset_otp_pending";

/// Remaining seconds of the password reset OTP resend countdown
pub const RESET_OTP_COUNTDOWN_REMAINING: &str = "reset_otp_countdown_remaining";

/// Identifier the password reset flow was started for
pub const RESET_PASSWORD_IDENTIFIER: &str = "reset_password_identifier";

/// One-time token authorizing the final password change
pub const RESET_PASSWORD_TOKEN: &str = "reset_password_token";

/// Literal stored for boolean flags; absence means false
pub const FLAG_TRUE: &str = "true";

/// Which multi-step flow a pending marker or countdown belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowKind {
    /// Login followed by OTP verification
    LoginOtp,
    /// Password reset followed by OTP verification
    PasswordReset,
}

impl FlowKind {
    /// Key marking that the flow's OTP step is pending
    pub fn pending_key(&self) -> &'static str {
        match self {
            FlowKind::LoginOtp => OTP_PENDING,
            FlowKind::PasswordReset => RESET_OTP_PENDING,
        }
    }

    /// Key holding the flow's persisted countdown remainder
    pub fn countdown_key(&self) -> &'static str {
        match self {
            FlowKind::LoginOtp => OTP_COUNTDOWN_REMAINING,
            FlowKind::PasswordReset => RESET_OTP_COUNTDOWN_REMAINING,
        }
    }
}
