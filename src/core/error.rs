//! Typed errors for validation and configuration
//!
//! # Error Categories
//!
//! - [`FieldValidationError`]: the single error shape produced by rule
//!   evaluation, a `(field, message)` pair
//! - [`ValidationError`]: a rejected payload, or input that could not be read
//!   as a payload at all
//! - [`ConfigError`]: invalid policy values or rule definitions
//!
//! Rule evaluation itself never fails. Violations are collected into a
//! [`ValidationResult`](crate::core::validation::ValidationResult) and only
//! become a [`ValidationError`] when the caller decides to reject.

use serde::Serialize;
use thiserror::Error;

/// A single field validation error
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

impl FieldValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Errors related to input validation
#[derive(Debug, Error)]
pub enum ValidationError {
    /// One or more fields violated their rules
    #[error("Validation errors: {}", join_fields(.0))]
    FieldErrors(Vec<FieldValidationError>),

    /// Request body was not valid JSON
    #[error("Invalid JSON: {message}")]
    InvalidJson { message: String },

    /// Unknown entity kind name
    #[error("Unknown entity kind: {value}")]
    UnknownEntityKind { value: String },

    /// Unknown operation name
    #[error("Unknown operation: {value}")]
    UnknownOperation { value: String },
}

impl ValidationError {
    /// Get the error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::FieldErrors(_) => "VALIDATION_FAILED",
            ValidationError::InvalidJson { .. } => "INVALID_JSON",
            ValidationError::UnknownEntityKind { .. } => "UNKNOWN_ENTITY_KIND",
            ValidationError::UnknownOperation { .. } => "UNKNOWN_OPERATION",
        }
    }

    /// Field errors carried by this error, if any
    pub fn field_errors(&self) -> &[FieldValidationError] {
        match self {
            ValidationError::FieldErrors(errors) => errors,
            _ => &[],
        }
    }
}

impl From<serde_json::Error> for ValidationError {
    fn from(err: serde_json::Error) -> Self {
        ValidationError::InvalidJson {
            message: err.to_string(),
        }
    }
}

fn join_fields(errors: &[FieldValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors related to policy and rule configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A user-supplied pattern is not a valid regular expression
    #[error("Invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// A configuration value is out of its allowed range
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}
