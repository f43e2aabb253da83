//! Multi-step authentication flow module
//!
//! This module sequences the two OTP-gated flows:
//! - Login: credentials → OTP verification → established session
//! - Password reset: identifier → OTP validation → reset-token
//!   consumption
//!
//! Each flow owns its own storage flags and countdown, so abandoning or
//! completing one never disturbs the other.

mod login;
mod reset;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use login::{LoginFlow, LoginOutcome};
pub use reset::{PasswordResetFlow, ResetRequestOutcome};
pub use traits::AuthApi;
pub use types::{
    CompleteResetRequest, CompleteResetResponse, CurrentUserResponse, LoginRequest, LoginResponse,
    OtpChallenge, PasswordResetRequest, PasswordResetResponse, RefreshRequest, RefreshResponse,
    ResendOtpResponse, ValidateResetOtpRequest, ValidateResetOtpResponse, VerifyOtpRequest,
    VerifyOtpResponse, RESET_OTP_PURPOSE,
};
