//! Integration tests for the password reset journey

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use std::sync::Arc;

    use af_core::errors::{ApiError, AuthError, DomainError};
    use af_core::services::flow::{
        AuthApi, CompleteResetRequest, CompleteResetResponse, CurrentUserResponse, LoginRequest,
        LoginResponse, PasswordResetFlow, PasswordResetRequest, PasswordResetResponse,
        RefreshRequest, RefreshResponse, ResendOtpResponse, ResetRequestOutcome,
        ValidateResetOtpRequest, ValidateResetOtpResponse, VerifyOtpRequest, VerifyOtpResponse,
        RESET_OTP_PURPOSE,
    };
    use af_core::store::{keys, Credentials, MemoryStore};

    /// Backend stand-in scripted for the reset journey
    struct ResetApi {
        accepted_code: &'static str,
        reset_token: &'static str,
    }

    impl ResetApi {
        fn new() -> Self {
            Self {
                accepted_code: "123456",
                reset_token: "opaque-reset-token",
            }
        }
    }

    #[async_trait]
    impl AuthApi for ResetApi {
        async fn login(&self, _request: &LoginRequest) -> Result<LoginResponse, ApiError> {
            Err(ApiError::Unauthorized)
        }

        async fn verify_otp(
            &self,
            _request: &VerifyOtpRequest,
        ) -> Result<VerifyOtpResponse, ApiError> {
            Err(ApiError::Unauthorized)
        }

        async fn resend_otp(&self) -> Result<ResendOtpResponse, ApiError> {
            Err(ApiError::Unauthorized)
        }

        async fn request_password_reset(
            &self,
            request: &PasswordResetRequest,
        ) -> Result<PasswordResetResponse, ApiError> {
            if request.identifier.is_empty() {
                return Err(ApiError::NotFound {
                    resource: "account".to_string(),
                });
            }
            Ok(PasswordResetResponse {
                otp: af_core::services::flow::OtpChallenge {
                    is_required: true,
                    expires_in: 90,
                },
                reset_token: None,
            })
        }

        async fn validate_reset_otp(
            &self,
            request: &ValidateResetOtpRequest,
        ) -> Result<ValidateResetOtpResponse, ApiError> {
            assert_eq!(request.purpose, RESET_OTP_PURPOSE);
            if request.code != self.accepted_code {
                return Err(ApiError::Unauthorized);
            }
            Ok(ValidateResetOtpResponse {
                reset_token: self.reset_token.to_string(),
            })
        }

        async fn complete_reset(
            &self,
            request: &CompleteResetRequest,
        ) -> Result<CompleteResetResponse, ApiError> {
            if request.reset_token != self.reset_token {
                return Err(ApiError::Unauthorized);
            }
            Ok(CompleteResetResponse {
                success: true,
                message: "Password updated".to_string(),
            })
        }

        async fn refresh(&self, _request: &RefreshRequest) -> Result<RefreshResponse, ApiError> {
            Err(ApiError::Unauthorized)
        }

        async fn current_user(&self) -> Result<CurrentUserResponse, ApiError> {
            Err(ApiError::Unauthorized)
        }
    }

    fn flow_over(store: Arc<MemoryStore>) -> (PasswordResetFlow<ResetApi>, Credentials) {
        let credentials = Credentials::new(store);
        let flow = PasswordResetFlow::new(Arc::new(ResetApi::new()), credentials.clone());
        (flow, credentials)
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_reset_journey_clears_all_context() {
        let store = Arc::new(MemoryStore::new());
        let (flow, credentials) = flow_over(store);

        let outcome = flow.request("199003052015041001").await.unwrap();
        assert_eq!(outcome, ResetRequestOutcome::OtpRequired { expires_in: 90 });
        assert!(flow.is_otp_pending());
        assert_eq!(flow.countdown().remaining(), 90);

        flow.verify("123456").await.unwrap();
        assert!(!flow.is_otp_pending());
        assert_eq!(
            credentials.read(keys::RESET_PASSWORD_TOKEN).as_deref(),
            Some("opaque-reset-token")
        );

        flow.complete("new-password", "new-password").await.unwrap();
        assert!(credentials.read(keys::RESET_PASSWORD_TOKEN).is_none());
        assert!(credentials.read(keys::RESET_PASSWORD_IDENTIFIER).is_none());
        assert!(credentials
            .read(keys::RESET_OTP_COUNTDOWN_REMAINING)
            .is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_resumes_pending_reset_step() {
        let store = Arc::new(MemoryStore::new());
        {
            let (flow, _credentials) = flow_over(store.clone());
            flow.request("199003052015041001").await.unwrap();
        }

        let (flow, credentials) = flow_over(store);
        assert!(flow.resume());
        assert_eq!(flow.countdown().remaining(), 90);
        assert_eq!(
            credentials.read(keys::RESET_PASSWORD_IDENTIFIER).as_deref(),
            Some("199003052015041001")
        );

        // The persisted identifier still reaches the validation call
        flow.verify("123456").await.unwrap();
        assert_eq!(
            credentials.read(keys::RESET_PASSWORD_TOKEN).as_deref(),
            Some("opaque-reset-token")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_complete_without_prior_steps_is_rejected() {
        let store = Arc::new(MemoryStore::new());
        let (flow, _credentials) = flow_over(store);

        let error = flow
            .complete("new-password", "new-password")
            .await
            .unwrap_err();
        assert!(matches!(
            error,
            DomainError::Auth(AuthError::MissingResetContext { .. })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_abandon_discards_reset_context() {
        let store = Arc::new(MemoryStore::new());
        let (flow, credentials) = flow_over(store);

        flow.request("199003052015041001").await.unwrap();
        flow.abandon();

        assert!(!flow.is_otp_pending());
        assert!(credentials.read(keys::RESET_PASSWORD_IDENTIFIER).is_none());
        assert!(credentials
            .read(keys::RESET_OTP_COUNTDOWN_REMAINING)
            .is_none());

        let error = flow.verify("123456").await.unwrap_err();
        assert!(matches!(
            error,
            DomainError::Auth(AuthError::NoFlowInProgress)
        ));
    }
}
