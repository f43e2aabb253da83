//! Trait for the remote authentication API

use async_trait::async_trait;

use crate::errors::ApiError;
use crate::services::flow::types::{
    CompleteResetRequest, CompleteResetResponse, CurrentUserResponse, LoginRequest, LoginResponse,
    PasswordResetRequest, PasswordResetResponse, RefreshRequest, RefreshResponse,
    ResendOtpResponse, ValidateResetOtpRequest, ValidateResetOtpResponse, VerifyOtpRequest,
    VerifyOtpResponse,
};

/// Remote authentication API consumed by the flows
///
/// Implementations carry their own transport; the flows only see wire
/// types and `ApiError`.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Submit primary credentials
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError>;

    /// Submit the login OTP code
    async fn verify_otp(&self, request: &VerifyOtpRequest) -> Result<VerifyOtpResponse, ApiError>;

    /// Ask for a fresh login OTP, authenticated by the stored bearer
    async fn resend_otp(&self) -> Result<ResendOtpResponse, ApiError>;

    /// Start a password reset for an identifier
    async fn request_password_reset(
        &self,
        request: &PasswordResetRequest,
    ) -> Result<PasswordResetResponse, ApiError>;

    /// Validate the reset OTP and obtain a reset token
    async fn validate_reset_otp(
        &self,
        request: &ValidateResetOtpRequest,
    ) -> Result<ValidateResetOtpResponse, ApiError>;

    /// Consume the reset token and set the new password
    async fn complete_reset(
        &self,
        request: &CompleteResetRequest,
    ) -> Result<CompleteResetResponse, ApiError>;

    /// Exchange a refresh token for a new token pair
    async fn refresh(&self, request: &RefreshRequest) -> Result<RefreshResponse, ApiError>;

    /// Fetch the profile of the user the stored bearer belongs to
    ///
    /// A 401 or 403 here means the backend no longer honours the token.
    async fn current_user(&self) -> Result<CurrentUserResponse, ApiError>;
}
