//! # realty-guard
//!
//! Request validation and list-query normalization for a real-estate listing
//! backend.
//!
//! ## Features
//!
//! - **Declarative rule sets**: per-entity rules (Property, Blog, Contact,
//!   Appointment, User) as plain data, evaluated by one interpreter
//! - **Complete error reports**: every violated rule is reported, in
//!   declaration order, as a `{field, message}` pair
//! - **Derived update rules**: identity check plus the create rules with every
//!   field made optional
//! - **Query coercion**: raw query strings become booleans, numbers or text
//! - **Lenient pagination**: malformed `page`/`limit` clamp to defaults instead
//!   of failing
//! - **Axum integration** (feature `axum`): `Validated<T>` and `ListQuery`
//!   extractors
//!
//! ## Quick Start
//!
//! ```rust
//! use realty_guard::prelude::*;
//! use serde_json::json;
//!
//! let result = validate(
//!     EntityKind::Contact,
//!     Operation::Create,
//!     &json!({"name": "J", "email": "jane@example.com"}),
//! );
//! assert!(result.has_error("name"));
//! assert!(result.has_error("subject"));
//!
//! let query = normalize_query([("page", "2"), ("limit", "20"), ("type", "villa")]);
//! let plan = PaginationPlan::from_query(&QueryPolicy::default(), &query, 45);
//! assert_eq!(plan.skip, 20);
//! assert!(plan.has_next);
//! ```

pub mod config;
pub mod core;

/// Re-exports of commonly used types and functions
pub mod prelude {
    // === Validation ===
    pub use crate::core::validation::{
        Constraint, CustomRule, FieldRules, Rule, RuleSet, Sanitizer, Schema, ValidationContext,
        ValidationResult, validate,
    };

    // === Query ===
    pub use crate::core::query::{
        NormalizedQuery, PaginatedResponse, PaginationPlan, QueryValue, normalize_query, paginate,
        paginate_with,
    };

    // === Types ===
    pub use crate::core::{
        entity::{EntityKind, Operation},
        error::{ConfigError, FieldValidationError, ValidationError},
        field::{FieldFormat, FieldPath},
    };

    // === Config ===
    pub use crate::config::{QueryPolicy, RuleSetOverride, SchemaOverrides};

    // === Axum ===
    #[cfg(feature = "axum")]
    pub use crate::core::validation::extractor::{
        AppointmentPayload, BlogPayload, ContactPayload, ListQuery, LoginPayload,
        PasswordChangePayload, PropertyPayload, UserPayload, ValidatableEntity, Validated,
    };
}
