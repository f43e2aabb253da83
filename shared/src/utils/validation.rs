//! Common validation utilities

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;

/// Regular expression for a well-formed OTP code (exactly six ASCII digits)
static OTP_CODE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{6}$").unwrap()
});

/// Validation error with field-level details
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
    pub code: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code: code.into(),
        }
    }
}

/// Collection of field-level validation errors
#[derive(Debug, Default)]
pub struct FieldErrors {
    errors: Vec<FieldError>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>, code: impl Into<String>) {
        self.add(FieldError::new(field, message, code));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Group messages by field name, the shape 422-style responses use
    pub fn to_field_errors(&self) -> HashMap<String, Vec<String>> {
        let mut field_errors: HashMap<String, Vec<String>> = HashMap::new();
        for error in &self.errors {
            field_errors
                .entry(error.field.clone())
                .or_default()
                .push(error.message.clone());
        }
        field_errors
    }
}

/// Common validation functions
pub mod validators {
    use super::OTP_CODE_REGEX;

    /// Check if a string is not empty
    pub fn not_empty(value: &str) -> bool {
        !value.trim().is_empty()
    }

    /// Check if a string length is within bounds
    pub fn length_between(value: &str, min: usize, max: usize) -> bool {
        let len = value.chars().count();
        len >= min && len <= max
    }

    /// Check if a value is exactly six ASCII digits
    pub fn is_otp_code(value: &str) -> bool {
        OTP_CODE_REGEX.is_match(value)
    }
}

#[cfg(test)]
mod tests {
    use super::validators::*;
    use super::*;

    #[test]
    fn test_not_empty() {
        assert!(not_empty("value"));
        assert!(!not_empty(""));
        assert!(!not_empty("   "));
    }

    #[test]
    fn test_length_between() {
        assert!(length_between("abc", 1, 5));
        assert!(!length_between("abcdef", 1, 5));
        assert!(!length_between("", 1, 5));
    }

    #[test]
    fn test_otp_code_format() {
        assert!(is_otp_code("123456"));
        assert!(is_otp_code("000000"));
        assert!(!is_otp_code("12345"));
        assert!(!is_otp_code("1234567"));
        assert!(!is_otp_code("12a456"));
        assert!(!is_otp_code(""));
        assert!(!is_otp_code("12 456"));
    }

    #[test]
    fn test_field_errors_grouping() {
        let mut errors = FieldErrors::new();
        errors.add_error("code", "Code is required", "REQUIRED");
        errors.add_error("code", "Code must be 6 digits", "PATTERN");
        errors.add_error("identifier", "Identifier is required", "REQUIRED");

        assert!(errors.has_errors());
        let grouped = errors.to_field_errors();
        assert_eq!(grouped["code"].len(), 2);
        assert_eq!(grouped["identifier"].len(), 1);
    }

    #[test]
    fn test_empty_collection() {
        let errors = FieldErrors::new();
        assert!(errors.is_empty());
        assert!(errors.to_field_errors().is_empty());
    }
}
