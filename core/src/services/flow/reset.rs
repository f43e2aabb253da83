//! Password reset flow sequencing.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{info, warn};

use af_shared::utils::validation::validators;

use crate::errors::{AuthError, DomainError, DomainResult, ValidationError};
use crate::services::countdown::FlowCountdown;
use crate::services::flow::traits::AuthApi;
use crate::services::flow::types::{
    CompleteResetRequest, PasswordResetRequest, ValidateResetOtpRequest, RESET_OTP_PURPOSE,
};
use crate::store::{keys, Credentials, FlowKind, SetOptions};

/// Result of requesting a password reset
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResetRequestOutcome {
    /// An OTP step is pending; the countdown was seeded with `expires_in`
    OtpRequired { expires_in: u32 },

    /// The backend waived the OTP step and issued the reset token directly
    TokenIssued,
}

/// Sequences password reset request, OTP validation, and completion
///
/// Runs unauthenticated: the identifier submitted in the first step is
/// persisted so the OTP validation and resend steps can reference it
/// after a restart.
pub struct PasswordResetFlow<A: AuthApi> {
    api: Arc<A>,
    credentials: Credentials,
    countdown: FlowCountdown,
    generation: AtomicU64,
}

impl<A: AuthApi> PasswordResetFlow<A> {
    pub fn new(api: Arc<A>, credentials: Credentials) -> Self {
        let countdown = FlowCountdown::new(credentials.clone(), FlowKind::PasswordReset);
        Self {
            api,
            credentials,
            countdown,
            generation: AtomicU64::new(0),
        }
    }

    /// The resend countdown attached to the OTP step
    pub fn countdown(&self) -> &FlowCountdown {
        &self.countdown
    }

    /// Whether an OTP validation step is pending
    pub fn is_otp_pending(&self) -> bool {
        self.credentials.flag(keys::RESET_OTP_PENDING)
    }

    /// The identifier the pending reset was requested for, if any
    pub fn pending_identifier(&self) -> Option<String> {
        self.credentials.read(keys::RESET_PASSWORD_IDENTIFIER)
    }

    /// Request a password reset for an identifier
    pub async fn request(&self, identifier: &str) -> DomainResult<ResetRequestOutcome> {
        if !validators::not_empty(identifier) {
            return Err(ValidationError::RequiredField {
                field: "identifier".to_string(),
            }
            .into());
        }

        let request = PasswordResetRequest {
            identifier: identifier.to_string(),
        };
        let response = self.api.request_password_reset(&request).await?;

        self.credentials.write(
            keys::RESET_PASSWORD_IDENTIFIER,
            identifier,
            &SetOptions::default(),
        );

        if response.otp.is_required {
            self.credentials.set_flag(keys::RESET_OTP_PENDING);
            self.countdown.start(response.otp.expires_in);
            info!(
                expires_in = response.otp.expires_in,
                event = "reset_otp_required",
                "Password reset requested, awaiting OTP validation"
            );
            return Ok(ResetRequestOutcome::OtpRequired {
                expires_in: response.otp.expires_in,
            });
        }

        match response.reset_token {
            Some(reset_token) => {
                self.credentials.write(
                    keys::RESET_PASSWORD_TOKEN,
                    &reset_token,
                    &SetOptions::default(),
                );
                info!(event = "reset_token_issued", "Reset token issued without OTP");
                Ok(ResetRequestOutcome::TokenIssued)
            }
            None => Err(AuthError::MissingResetContext {
                field: "reset_token".to_string(),
            }
            .into()),
        }
    }

    /// Validate the OTP code and persist the issued reset token
    pub async fn verify(&self, code: &str) -> DomainResult<()> {
        if !self.is_otp_pending() {
            return Err(AuthError::NoFlowInProgress.into());
        }
        if !validators::is_otp_code(code) {
            return Err(ValidationError::InvalidFormat {
                field: "code".to_string(),
            }
            .into());
        }
        let Some(identifier) = self.credentials.read(keys::RESET_PASSWORD_IDENTIFIER) else {
            return Err(AuthError::MissingResetContext {
                field: "identifier".to_string(),
            }
            .into());
        };

        let generation = self.generation.load(Ordering::Acquire);
        let request = ValidateResetOtpRequest {
            code: code.to_string(),
            purpose: RESET_OTP_PURPOSE.to_string(),
            identifier,
        };
        let response = self.api.validate_reset_otp(&request).await?;
        if self.generation.load(Ordering::Acquire) != generation {
            warn!(
                event = "reset_otp_result_discarded",
                "Reset OTP validation finished after the flow was abandoned"
            );
            return Err(AuthError::FlowAbandoned.into());
        }

        self.credentials.write(
            keys::RESET_PASSWORD_TOKEN,
            &response.reset_token,
            &SetOptions::default(),
        );
        self.credentials.delete(keys::RESET_OTP_PENDING);
        self.countdown.cancel();
        info!(event = "reset_otp_validated", "Reset OTP validated, token persisted");
        Ok(())
    }

    /// Re-request the reset to obtain a fresh OTP and restart the countdown
    ///
    /// # Returns
    ///
    /// The new countdown duration in seconds
    pub async fn resend(&self) -> DomainResult<u32> {
        if !self.is_otp_pending() {
            return Err(AuthError::NoFlowInProgress.into());
        }
        let Some(identifier) = self.credentials.read(keys::RESET_PASSWORD_IDENTIFIER) else {
            return Err(AuthError::MissingResetContext {
                field: "identifier".to_string(),
            }
            .into());
        };

        let generation = self.generation.load(Ordering::Acquire);
        let request = PasswordResetRequest { identifier };
        let response = self.api.request_password_reset(&request).await?;
        if self.generation.load(Ordering::Acquire) != generation {
            return Err(AuthError::FlowAbandoned.into());
        }

        self.countdown.start(response.otp.expires_in);
        info!(
            expires_in = response.otp.expires_in,
            event = "reset_otp_resent",
            "Reset OTP resent"
        );
        Ok(response.otp.expires_in)
    }

    /// Consume the reset token and submit the new password
    ///
    /// On success every persisted trace of the flow is cleared; a reset
    /// token must never remain readable after it has been consumed.
    pub async fn complete(&self, new_password: &str, confirmation: &str) -> DomainResult<()> {
        if !validators::not_empty(new_password) {
            return Err(ValidationError::RequiredField {
                field: "new_password".to_string(),
            }
            .into());
        }
        if new_password != confirmation {
            return Err(ValidationError::InvalidFormat {
                field: "confirmation".to_string(),
            }
            .into());
        }
        let Some(reset_token) = self.credentials.read(keys::RESET_PASSWORD_TOKEN) else {
            return Err(AuthError::MissingResetContext {
                field: "reset_token".to_string(),
            }
            .into());
        };

        let generation = self.generation.load(Ordering::Acquire);
        let request = CompleteResetRequest {
            reset_token,
            new_password: new_password.to_string(),
            confirmation: confirmation.to_string(),
        };
        let response = self.api.complete_reset(&request).await?;
        if self.generation.load(Ordering::Acquire) != generation {
            return Err(AuthError::FlowAbandoned.into());
        }
        if !response.success {
            return Err(DomainError::BusinessRule {
                message: response.message,
            });
        }

        self.clear_context();
        info!(event = "reset_complete", "Password reset completed");
        Ok(())
    }

    /// Abandon the flow and discard its persisted context
    pub fn abandon(&self) {
        self.generation.fetch_add(1, Ordering::Release);
        self.clear_context();
        info!(event = "reset_flow_abandoned", "Password reset flow abandoned");
    }

    /// Resume a flow interrupted by a restart
    pub fn resume(&self) -> bool {
        if !self.is_otp_pending() {
            return false;
        }
        self.countdown.resume();
        true
    }

    fn clear_context(&self) {
        self.credentials.delete(keys::RESET_OTP_PENDING);
        self.credentials.delete(keys::RESET_PASSWORD_IDENTIFIER);
        self.credentials.delete(keys::RESET_PASSWORD_TOKEN);
        self.countdown.cancel();
    }
}
