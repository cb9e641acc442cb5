//! Core module containing the validator, the query normalizer and their shared types

pub mod coerce;
pub mod entity;
pub mod error;
pub mod field;
pub mod query;
pub mod validation;

pub use entity::{EntityKind, Operation};
pub use error::{ConfigError, FieldValidationError, ValidationError};
pub use field::{FieldFormat, FieldPath};
pub use query::{
    NormalizedQuery, PaginatedResponse, PaginationPlan, QueryValue, normalize_query, paginate,
    paginate_with,
};
pub use validation::{Schema, ValidationContext, ValidationResult, validate};
