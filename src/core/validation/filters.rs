//! Payload sanitizers
//!
//! These transform field values before validation. A sanitizer only touches
//! string values; anything else passes through untouched.

use crate::core::field::FieldPath;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A transformation applied to the value at a field path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Sanitizer {
    /// Trim surrounding whitespace
    Trim { field: FieldPath },

    /// Lowercase the whole string
    Lowercase { field: FieldPath },

    /// Trim and lowercase the domain part of an email address
    NormalizeEmail { field: FieldPath },
}

impl Sanitizer {
    pub fn field(&self) -> &FieldPath {
        match self {
            Sanitizer::Trim { field }
            | Sanitizer::Lowercase { field }
            | Sanitizer::NormalizeEmail { field } => field,
        }
    }

    /// Apply in place; missing fields and non-string values are left alone
    pub fn apply(&self, payload: &mut Value) {
        let Some(slot) = self.field().lookup_mut(payload) else {
            return;
        };
        let Some(s) = slot.as_str() else {
            return;
        };

        let sanitized = match self {
            Sanitizer::Trim { .. } => s.trim().to_string(),
            Sanitizer::Lowercase { .. } => s.to_lowercase(),
            Sanitizer::NormalizeEmail { .. } => normalize_email(s),
        };
        *slot = Value::String(sanitized);
    }
}

/// Apply sanitizers in order to an owned payload
pub fn sanitize_all(sanitizers: &[Sanitizer], mut payload: Value) -> Value {
    for sanitizer in sanitizers {
        sanitizer.apply(&mut payload);
    }
    payload
}

fn normalize_email(email: &str) -> String {
    let email = email.trim();
    match email.rsplit_once('@') {
        Some((local, domain)) => format!("{}@{}", local, domain.to_lowercase()),
        None => email.to_string(),
    }
}
