//! Bearer token payload decoding
//!
//! Tokens are treated as opaque three-segment strings whose middle segment
//! is a base64url JSON object. The signature segment is never checked:
//! trust in the token comes from the issuing server, decoding only serves
//! to read expiry and identity claims client-side.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;

use crate::domain::entities::TokenClaims;
use crate::errors::TokenError;

/// Number of dot-separated segments in a well-formed token
const TOKEN_SEGMENTS: usize = 3;

/// Decode the claims carried in a bearer token
///
/// # Arguments
///
/// * `token` - The raw compact token string
///
/// # Returns
///
/// * `Ok(TokenClaims)` - The parsed payload claims
/// * `Err(TokenError)` - The token is structurally malformed
pub fn decode_payload(token: &str) -> Result<TokenClaims, TokenError> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != TOKEN_SEGMENTS {
        return Err(TokenError::InvalidTokenFormat);
    }

    // Some issuers pad the payload segment even though the compact form
    // is unpadded
    let payload = segments[1].trim_end_matches('=');
    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|_| TokenError::InvalidPayloadEncoding)?;

    serde_json::from_slice(&bytes).map_err(|_| TokenError::InvalidClaims)
}
