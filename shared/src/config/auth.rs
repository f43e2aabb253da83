//! Authentication flow configuration

use serde::{Deserialize, Serialize};

/// Authentication and session lifecycle configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Remaining token lifetime (seconds) under which a proactive refresh
    /// is advised
    #[serde(default = "default_refresh_threshold")]
    pub refresh_threshold_seconds: i64,

    /// Default OTP resend countdown duration in seconds
    #[serde(default = "default_otp_countdown")]
    pub otp_countdown_seconds: u32,

    /// Required OTP code length in digits
    #[serde(default = "default_otp_code_length")]
    pub otp_code_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            refresh_threshold_seconds: default_refresh_threshold(),
            otp_countdown_seconds: default_otp_countdown(),
            otp_code_length: default_otp_code_length(),
        }
    }
}

impl AuthConfig {
    /// Set the refresh advisory threshold in minutes
    pub fn with_refresh_threshold_minutes(mut self, minutes: i64) -> Self {
        self.refresh_threshold_seconds = minutes * 60;
        self
    }

    /// Set the OTP countdown duration in seconds
    pub fn with_otp_countdown_seconds(mut self, seconds: u32) -> Self {
        self.otp_countdown_seconds = seconds;
        self
    }
}

fn default_refresh_threshold() -> i64 {
    300 // 5 minutes
}

fn default_otp_countdown() -> u32 {
    60
}

fn default_otp_code_length() -> usize {
    6
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AuthConfig::default();
        assert_eq!(config.refresh_threshold_seconds, 300);
        assert_eq!(config.otp_countdown_seconds, 60);
        assert_eq!(config.otp_code_length, 6);
    }

    #[test]
    fn test_builder_methods() {
        let config = AuthConfig::default()
            .with_refresh_threshold_minutes(10)
            .with_otp_countdown_seconds(90);
        assert_eq!(config.refresh_threshold_seconds, 600);
        assert_eq!(config.otp_countdown_seconds, 90);
    }

    #[test]
    fn test_deserialization_with_defaults() {
        let config: AuthConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.refresh_threshold_seconds, 300);
        assert_eq!(config.otp_code_length, 6);
    }
}
