//! Wire types for the authentication API.

use serde::{Deserialize, Serialize};

/// Purpose discriminator sent with a reset OTP validation
pub const RESET_OTP_PURPOSE: &str = "password_reset";

/// OTP requirement attached to a login or reset response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpChallenge {
    /// Whether an OTP step must be completed
    #[serde(rename = "isRequired")]
    pub is_required: bool,

    /// Countdown duration in seconds before a resend is allowed
    #[serde(rename = "expiresIn")]
    pub expires_in: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub identifier: String,
    pub secret: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    /// Bearer token, granted before the OTP step completes
    pub token: String,

    /// Refresh token, when the backend issues one
    #[serde(rename = "refreshToken", default)]
    pub refresh_token: Option<String>,

    pub otp: OtpChallenge,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyOtpRequest {
    pub code: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VerifyOtpResponse {
    pub token: String,

    #[serde(rename = "refreshToken", default)]
    pub refresh_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResendOtpResponse {
    #[serde(rename = "expiresIn")]
    pub expires_in: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordResetRequest {
    pub identifier: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PasswordResetResponse {
    pub otp: OtpChallenge,

    /// Issued directly when the backend waives the OTP step
    #[serde(rename = "resetToken", default)]
    pub reset_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateResetOtpRequest {
    pub code: String,
    pub purpose: String,
    pub identifier: String,
}

/// Response of a successful reset OTP validation
///
/// The upstream contract returns the reset token under a field literally
/// named `identifier`, colliding with the user identifier sent in the
/// request. The wire name is preserved here and nowhere else.
#[derive(Debug, Clone, Deserialize)]
pub struct ValidateResetOtpResponse {
    #[serde(rename = "identifier")]
    pub reset_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompleteResetRequest {
    #[serde(rename = "resetToken")]
    pub reset_token: String,

    #[serde(rename = "newPassword")]
    pub new_password: String,

    pub confirmation: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompleteResetResponse {
    pub success: bool,

    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    #[serde(rename = "refreshToken")]
    pub refresh_token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RefreshResponse {
    pub token: String,

    #[serde(rename = "refreshToken", default)]
    pub refresh_token: Option<String>,
}

/// Profile of the user the stored bearer belongs to
///
/// Only the identity fields are modelled; the rest of the payload is
/// kept verbatim so callers can surface backend-specific attributes.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentUserResponse {
    pub id: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
