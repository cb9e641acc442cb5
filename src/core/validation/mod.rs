//! Validation and filtering system
//!
//! Rule sets are declarative data ([`RuleSet`] of [`Rule`]s carrying a tagged
//! [`Constraint`]) interpreted by a single evaluator. [`Schema`] maps each
//! entity kind and operation to its rule set and is the entry point callers use.

pub mod catalog;
#[cfg(feature = "axum")]
pub mod extractor;
pub mod filters;
pub mod result;
pub mod rule;
pub mod schema;
pub mod validators;

#[cfg(feature = "axum")]
pub use extractor::{ListQuery, ValidatableEntity, Validated};
pub use filters::Sanitizer;
pub use result::ValidationResult;
pub use rule::{CompiledPattern, Constraint, CustomRule, FieldRules, Rule, RuleSet};
pub use schema::{Schema, validate};
pub use validators::ValidationContext;
