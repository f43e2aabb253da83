//! reqwest client for the remote authentication API.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use af_core::errors::ApiError;
use af_core::services::flow::{
    AuthApi, CompleteResetRequest, CompleteResetResponse, CurrentUserResponse, LoginRequest,
    LoginResponse, PasswordResetRequest, PasswordResetResponse, RefreshRequest, RefreshResponse,
    ResendOtpResponse, ValidateResetOtpRequest, ValidateResetOtpResponse, VerifyOtpRequest,
    VerifyOtpResponse,
};
use af_core::store::Credentials;

use crate::InfraError;

const LOGIN_PATH: &str = "/auth/login";
const VERIFY_OTP_PATH: &str = "/auth/verify-otp";
const RESEND_OTP_PATH: &str = "/auth/resend-otp";
const RESET_REQUEST_PATH: &str = "/auth/reset-password-request";
const VALIDATE_RESET_OTP_PATH: &str = "/auth/validate-reset-otp";
const COMPLETE_RESET_PATH: &str = "/auth/reset-password";
const REFRESH_PATH: &str = "/auth/refresh";
const CURRENT_USER_PATH: &str = "/auth/current-user";

/// HTTP authentication API configuration
#[derive(Debug, Clone)]
pub struct HttpAuthApiConfig {
    /// Base URL of the authentication API
    pub base_url: String,
    /// Timeout for API requests in seconds
    pub request_timeout_secs: u64,
}

impl HttpAuthApiConfig {
    /// Create a configuration with the default timeout
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            request_timeout_secs: 30,
        }
    }

    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self, InfraError> {
        dotenvy::dotenv().ok();
        let base_url = std::env::var("AUTH_API_BASE_URL")
            .map_err(|_| InfraError::Config("AUTH_API_BASE_URL not set".to_string()))?;
        Ok(Self {
            base_url,
            request_timeout_secs: std::env::var("AUTH_API_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        })
    }
}

/// Error body shape for a 422 validation failure
#[derive(Debug, Deserialize)]
struct ValidationBody {
    #[serde(default)]
    errors: HashMap<String, Vec<String>>,
}

/// Authentication API client over HTTP
///
/// Attaches the stored bearer token to every request when one exists,
/// which is what lets the resend endpoint identify the half-logged-in
/// caller. Each request carries a fresh `X-Request-Id` for correlation.
pub struct HttpAuthApi {
    client: Client,
    base_url: String,
    credentials: Credentials,
}

impl HttpAuthApi {
    /// Create a new client bound to the credential store
    pub fn new(config: &HttpAuthApiConfig, credentials: Credentials) -> Result<Self, InfraError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let request_id = Uuid::new_v4();
        debug!(
            request_id = %request_id,
            path = %path,
            "Sending authentication API request"
        );

        let mut request = self
            .client
            .post(&url)
            .header("X-Request-Id", request_id.to_string())
            .json(body);
        if let Some(token) = self.credentials.token() {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|err| ApiError::Transport {
            message: err.to_string(),
        })?;

        let status = response.status();
        if status.is_success() {
            return response.json::<T>().await.map_err(|err| ApiError::Transport {
                message: err.to_string(),
            });
        }

        let body_text = response.text().await.unwrap_or_default();
        warn!(
            request_id = %request_id,
            path = %path,
            status = status.as_u16(),
            event = "auth_api_error_status",
            "Authentication API request failed"
        );
        Err(map_error_status(status, path, &body_text))
    }

    async fn get_json<T>(&self, path: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let request_id = Uuid::new_v4();
        debug!(
            request_id = %request_id,
            path = %path,
            "Sending authentication API request"
        );

        let mut request = self
            .client
            .get(&url)
            .header("X-Request-Id", request_id.to_string());
        if let Some(token) = self.credentials.token() {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|err| ApiError::Transport {
            message: err.to_string(),
        })?;

        let status = response.status();
        if status.is_success() {
            return response.json::<T>().await.map_err(|err| ApiError::Transport {
                message: err.to_string(),
            });
        }

        let body_text = response.text().await.unwrap_or_default();
        warn!(
            request_id = %request_id,
            path = %path,
            status = status.as_u16(),
            event = "auth_api_error_status",
            "Authentication API request failed"
        );
        Err(map_error_status(status, path, &body_text))
    }
}

#[async_trait]
impl AuthApi for HttpAuthApi {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.post_json(LOGIN_PATH, request).await
    }

    async fn verify_otp(&self, request: &VerifyOtpRequest) -> Result<VerifyOtpResponse, ApiError> {
        self.post_json(VERIFY_OTP_PATH, request).await
    }

    async fn resend_otp(&self) -> Result<ResendOtpResponse, ApiError> {
        self.post_json(RESEND_OTP_PATH, &serde_json::json!({})).await
    }

    async fn request_password_reset(
        &self,
        request: &PasswordResetRequest,
    ) -> Result<PasswordResetResponse, ApiError> {
        self.post_json(RESET_REQUEST_PATH, request).await
    }

    async fn validate_reset_otp(
        &self,
        request: &ValidateResetOtpRequest,
    ) -> Result<ValidateResetOtpResponse, ApiError> {
        self.post_json(VALIDATE_RESET_OTP_PATH, request).await
    }

    async fn complete_reset(
        &self,
        request: &CompleteResetRequest,
    ) -> Result<CompleteResetResponse, ApiError> {
        self.post_json(COMPLETE_RESET_PATH, request).await
    }

    async fn refresh(&self, request: &RefreshRequest) -> Result<RefreshResponse, ApiError> {
        self.post_json(REFRESH_PATH, request).await
    }

    async fn current_user(&self) -> Result<CurrentUserResponse, ApiError> {
        self.get_json(CURRENT_USER_PATH).await
    }
}

/// Map a non-success HTTP status to the API error surface
fn map_error_status(status: StatusCode, path: &str, body: &str) -> ApiError {
    match status {
        StatusCode::UNPROCESSABLE_ENTITY => {
            let errors = serde_json::from_str::<ValidationBody>(body)
                .map(|parsed| parsed.errors)
                .unwrap_or_default();
            ApiError::FieldValidation { errors }
        }
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::Unauthorized,
        StatusCode::NOT_FOUND => ApiError::NotFound {
            resource: path.to_string(),
        },
        other => ApiError::UnexpectedStatus {
            status: other.as_u16(),
        },
    }
}
