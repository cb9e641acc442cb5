//! Outcome of validating one payload

use crate::core::error::{FieldValidationError, ValidationError};
use serde::Serialize;

/// Ordered field errors; empty means the payload is accepted
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationResult {
    errors: Vec<FieldValidationError>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: FieldValidationError) {
        self.errors.push(error);
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldValidationError] {
        &self.errors
    }

    /// Errors reported for one field path
    pub fn errors_for<'a>(
        &'a self,
        field: &'a str,
    ) -> impl Iterator<Item = &'a FieldValidationError> + 'a {
        self.errors.iter().filter(move |e| e.field == field)
    }

    /// Whether any error targets the given field path
    pub fn has_error(&self, field: &str) -> bool {
        self.errors_for(field).next().is_some()
    }

    /// Convert into `Ok(())` or a [`ValidationError::FieldErrors`]
    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::FieldErrors(self.errors))
        }
    }
}

impl From<Vec<FieldValidationError>> for ValidationResult {
    fn from(errors: Vec<FieldValidationError>) -> Self {
        Self { errors }
    }
}

impl IntoIterator for ValidationResult {
    type Item = FieldValidationError;
    type IntoIter = std::vec::IntoIter<FieldValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}
