//! Token codec module
//!
//! This module handles bearer token payload decoding:
//! - Payload extraction without signature validation
//! - Claim parsing into typed `TokenClaims`

mod codec;

pub use codec::decode_payload;
