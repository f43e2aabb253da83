//! Decoded bearer token claims.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Claims carried in a bearer token payload
///
/// Only the registered claims the session layer needs are typed; anything
/// else the issuer includes is preserved in `extra`. All fields are
/// optional because the payload is decoded without validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (user identifier)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Expiration timestamp (seconds since the Unix epoch)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Issued at timestamp (seconds since the Unix epoch)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Remaining issuer-specific claims
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl TokenClaims {
    /// The expiry as an absolute instant
    ///
    /// # Returns
    ///
    /// `None` when the token carries no `exp` claim or the value does not
    /// map to a representable instant
    pub fn expiry_instant(&self) -> Option<DateTime<Utc>> {
        let exp = self.exp?;
        Utc.timestamp_opt(exp, 0).single()
    }

    /// Milliseconds from `now` until expiry
    ///
    /// Negative once the token has expired, `None` when no expiry is known.
    pub fn time_until_expiry(&self, now: DateTime<Utc>) -> Option<i64> {
        let expiry = self.expiry_instant()?;
        Some((expiry - now).num_milliseconds())
    }

    /// Whether the claims have expired as of `now`
    ///
    /// A token without a usable `exp` claim is treated as not expired;
    /// the identity fetch behind the route guard catches tokens the
    /// server no longer accepts.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self.expiry_instant() {
            Some(expiry) => now >= expiry,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn claims_expiring_in(seconds: i64) -> TokenClaims {
        TokenClaims {
            sub: Some("user-1".to_string()),
            exp: Some((Utc::now() + Duration::seconds(seconds)).timestamp()),
            iat: Some(Utc::now().timestamp()),
            extra: serde_json::Map::new(),
        }
    }

    #[test]
    fn test_future_expiry_not_expired() {
        let claims = claims_expiring_in(3600);
        assert!(!claims.is_expired(Utc::now()));
        assert!(claims.time_until_expiry(Utc::now()).unwrap() > 0);
    }

    #[test]
    fn test_past_expiry_is_expired() {
        let claims = claims_expiring_in(-10);
        assert!(claims.is_expired(Utc::now()));
        assert!(claims.time_until_expiry(Utc::now()).unwrap() < 0);
    }

    #[test]
    fn test_missing_exp_not_expired_by_default() {
        let claims = TokenClaims {
            sub: None,
            exp: None,
            iat: None,
            extra: serde_json::Map::new(),
        };
        assert!(!claims.is_expired(Utc::now()));
        assert_eq!(claims.time_until_expiry(Utc::now()), None);
    }

    #[test]
    fn test_extra_claims_preserved() {
        let json = r#"{"sub":"user-1","exp":1900000000,"role":"admin"}"#;
        let claims: TokenClaims = serde_json::from_str(json).unwrap();
        assert_eq!(claims.sub.as_deref(), Some("user-1"));
        assert_eq!(
            claims.extra.get("role"),
            Some(&serde_json::Value::String("admin".to_string()))
        );
    }
}
