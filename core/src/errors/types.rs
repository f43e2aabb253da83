//! Domain-specific error types for session, credential, and flow operations
//!
//! This module provides error type definitions for credential storage, token
//! decoding, input validation, and the authentication API surface. Error
//! messages are English-only; localized rendering happens at the
//! presentation layer.

use std::collections::HashMap;
use thiserror::Error;

/// Authentication flow errors
///
/// These errors represent failures in the multi-step login and password
/// reset flows.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("No flow in progress")]
    NoFlowInProgress,

    #[error("Verification step already pending")]
    VerificationAlreadyPending,

    #[error("Flow abandoned before completion")]
    FlowAbandoned,

    #[error("Missing reset context: {field}")]
    MissingResetContext { field: String },

    #[error("Authentication failed")]
    AuthenticationFailed,

    #[error("Session expired")]
    SessionExpired,
}

/// Token-related errors
///
/// These errors represent failures while decoding a bearer token payload.
/// Decoding never validates signatures, so all variants concern structure.
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Invalid payload encoding")]
    InvalidPayloadEncoding,

    #[error("Invalid claims")]
    InvalidClaims,

    #[error("Missing claim: {claim}")]
    MissingClaim { claim: String },
}

/// Input validation errors
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid format: {field}")]
    InvalidFormat { field: String },

    #[error("Invalid length: {field} (expected: {expected}, actual: {actual})")]
    InvalidLength {
        field: String,
        expected: usize,
        actual: usize,
    },
}

/// Errors surfaced by the remote authentication API
///
/// Transport and decoding failures are folded into `Transport`; the
/// structured variants carry what the server actually said.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request validation failed")]
    FieldValidation {
        errors: HashMap<String, Vec<String>>,
    },

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Unexpected status: {status}")]
    UnexpectedStatus { status: u16 },

    #[error("Transport failure: {message}")]
    Transport { message: String },
}

impl ApiError {
    /// Field-level messages for a validation failure, if any
    pub fn field_errors(&self) -> Option<&HashMap<String, Vec<String>>> {
        match self {
            ApiError::FieldValidation { errors } => Some(errors),
            _ => None,
        }
    }
}

/// Errors raised by a key/value storage backend
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage I/O failure: {message}")]
    Io { message: String },

    #[error("Storage serialization failure: {message}")]
    Serialization { message: String },

    #[error("Storage unavailable")]
    Unavailable,
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization {
            message: err.to_string(),
        }
    }
}
