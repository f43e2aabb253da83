//! Login flow sequencing.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{info, warn};

use af_shared::utils::validation::validators;

use crate::errors::{AuthError, DomainResult, ValidationError};
use crate::services::countdown::FlowCountdown;
use crate::services::flow::traits::AuthApi;
use crate::services::flow::types::{LoginRequest, VerifyOtpRequest};
use crate::services::session::SessionService;
use crate::store::{keys, FlowKind};

/// Result of submitting primary credentials
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Session established, no second factor required
    Complete,

    /// An OTP step is pending; the countdown was seeded with `expires_in`
    OtpRequired { expires_in: u32 },
}

/// Sequences login, OTP verification, and session establishment
///
/// The bearer token is stored as soon as the backend issues it, before
/// the OTP step completes. The backend gates feature access on the OTP
/// server-side, so the early token only unlocks the verification call
/// itself.
pub struct LoginFlow<A: AuthApi> {
    api: Arc<A>,
    session: Arc<SessionService>,
    countdown: FlowCountdown,
    generation: AtomicU64,
}

impl<A: AuthApi> LoginFlow<A> {
    pub fn new(api: Arc<A>, session: Arc<SessionService>) -> Self {
        let countdown = FlowCountdown::new(session.credentials().clone(), FlowKind::LoginOtp);
        Self {
            api,
            session,
            countdown,
            generation: AtomicU64::new(0),
        }
    }

    /// The resend countdown attached to the OTP step
    pub fn countdown(&self) -> &FlowCountdown {
        &self.countdown
    }

    /// Whether an OTP verification step is pending
    pub fn is_otp_pending(&self) -> bool {
        self.session.credentials().flag(keys::OTP_PENDING)
    }

    /// Submit primary credentials
    ///
    /// # Arguments
    ///
    /// * `identifier` - The user identifier (username or NIP)
    /// * `secret` - The account password
    ///
    /// # Returns
    ///
    /// * `Ok(LoginOutcome::Complete)` - Session established immediately
    /// * `Ok(LoginOutcome::OtpRequired)` - OTP step pending, countdown running
    /// * `Err(DomainError)` - Validation or API failure
    pub async fn submit(&self, identifier: &str, secret: &str) -> DomainResult<LoginOutcome> {
        if !validators::not_empty(identifier) {
            return Err(ValidationError::RequiredField {
                field: "identifier".to_string(),
            }
            .into());
        }
        if !validators::not_empty(secret) {
            return Err(ValidationError::RequiredField {
                field: "secret".to_string(),
            }
            .into());
        }

        let request = LoginRequest {
            identifier: identifier.to_string(),
            secret: secret.to_string(),
        };
        let response = self.api.login(&request).await?;

        self.session
            .login(&response.token, response.refresh_token.as_deref());

        if response.otp.is_required {
            self.session.credentials().set_flag(keys::OTP_PENDING);
            self.countdown.start(response.otp.expires_in);
            info!(
                expires_in = response.otp.expires_in,
                event = "login_otp_required",
                "Login accepted, awaiting OTP verification"
            );
            Ok(LoginOutcome::OtpRequired {
                expires_in: response.otp.expires_in,
            })
        } else {
            // A previous run may have left an unfinished OTP step behind
            self.session.credentials().delete(keys::OTP_PENDING);
            self.countdown.cancel();
            info!(event = "login_complete", "Login completed without OTP");
            Ok(LoginOutcome::Complete)
        }
    }

    /// Submit the OTP code for the pending login
    ///
    /// The code is format-checked before any network call; a well-formed
    /// code the backend rejects surfaces as an API error instead.
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

        let generation = self.generation.load(Ordering::Acquire);
        let request = VerifyOtpRequest {
            code: code.to_string(),
        };
        let response = self.api.verify_otp(&request).await?;
        if self.generation.load(Ordering::Acquire) != generation {
            warn!(
                event = "otp_result_discarded",
                "OTP verification finished after the flow was abandoned"
            );
            return Err(AuthError::FlowAbandoned.into());
        }

        self.session
            .login(&response.token, response.refresh_token.as_deref());
        self.session.credentials().delete(keys::OTP_PENDING);
        self.countdown.cancel();
        info!(event = "login_otp_verified", "Login OTP verified, session established");
        Ok(())
    }

    /// Ask the backend for a fresh OTP and restart the countdown
    ///
    /// # Returns
    ///
    /// The new countdown duration in seconds
    pub async fn resend(&self) -> DomainResult<u32> {
        if !self.is_otp_pending() {
            return Err(AuthError::NoFlowInProgress.into());
        }

        let generation = self.generation.load(Ordering::Acquire);
        let response = self.api.resend_otp().await?;
        if self.generation.load(Ordering::Acquire) != generation {
            return Err(AuthError::FlowAbandoned.into());
        }

        self.countdown.start(response.expires_in);
        info!(
            expires_in = response.expires_in,
            event = "login_otp_resent",
            "Login OTP resent"
        );
        Ok(response.expires_in)
    }

    /// Abandon the pending flow
    ///
    /// Clears the pending flag, the countdown, and the provisional token
    /// pair. Results of requests still in flight are discarded when they
    /// land.
    pub fn abandon(&self) {
        self.generation.fetch_add(1, Ordering::Release);
        self.session.credentials().delete(keys::OTP_PENDING);
        self.countdown.cancel();
        self.session.logout();
        info!(event = "login_flow_abandoned", "Login flow abandoned");
    }

    /// Resume a flow interrupted by a restart
    ///
    /// # Returns
    ///
    /// `true` when an OTP step was pending; the countdown picks up any
    /// persisted remainder
    pub fn resume(&self) -> bool {
        if !self.is_otp_pending() {
            return false;
        }
        self.countdown.resume();
        true
    }
}
