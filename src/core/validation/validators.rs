//! Rule interpreter
//!
//! Every [`Constraint`] variant is evaluated here and nowhere else. Rules run
//! in declaration order and independently: one failing rule never prevents
//! the next from running.

use super::result::ValidationResult;
use super::rule::{Constraint, CustomRule, Rule};
use crate::core::coerce::{value_as_f64, value_as_i64};
use crate::core::error::FieldValidationError;
use crate::core::field::parse_iso_date;
use chrono::{Local, NaiveDate};
use serde_json::Value;
use std::borrow::Cow;

/// Inputs that rules may depend on besides the payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationContext {
    /// Reference date for temporal rules
    pub today: NaiveDate,
}

impl ValidationContext {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    /// Context anchored at the current local date
    pub fn today() -> Self {
        Self::new(Local::now().date_naive())
    }
}

impl Default for ValidationContext {
    fn default() -> Self {
        Self::today()
    }
}

/// Evaluate every rule against the payload
pub fn evaluate_all(rules: &[Rule], payload: &Value, ctx: &ValidationContext) -> ValidationResult {
    let mut result = ValidationResult::new();
    for rule in rules {
        if let Some(error) = evaluate(rule, payload, ctx) {
            result.push(error);
        }
    }
    result
}

/// Evaluate one rule; `Some` carries the rule's message on violation
///
/// Absent values (missing or `null`) only fail [`Constraint::Required`];
/// every other constraint treats them as satisfied.
pub fn evaluate(rule: &Rule, payload: &Value, ctx: &ValidationContext) -> Option<FieldValidationError> {
    let value = rule.field.lookup(payload).filter(|v| !v.is_null());

    let passed = match (&rule.constraint, value) {
        (Constraint::Required, value) => value.is_some(),
        (_, None) => true,
        (constraint, Some(value)) => check(constraint, value, payload, ctx),
    };

    (!passed).then(|| FieldValidationError::new(rule.field.as_str(), rule.message.as_str()))
}

fn check(constraint: &Constraint, value: &Value, payload: &Value, ctx: &ValidationContext) -> bool {
    match constraint {
        Constraint::Required => true,
        Constraint::Length { min, max } => text_of(value).is_some_and(|s| {
            let len = s.trim().chars().count();
            len >= *min && max.is_none_or(|max| len <= max)
        }),
        Constraint::Range { min, max } => value_as_f64(value).is_some_and(|n| {
            min.is_none_or(|min| n >= min) && max.is_none_or(|max| n <= max)
        }),
        Constraint::GreaterThan { min } => value_as_f64(value).is_some_and(|n| n > *min),
        Constraint::Integer { min, max } => value_as_i64(value).is_some_and(|n| {
            min.is_none_or(|min| n >= min) && max.is_none_or(|max| n <= max)
        }),
        Constraint::OneOf { values } => {
            text_of(value).is_some_and(|s| values.iter().any(|allowed| *allowed == *s))
        }
        Constraint::Format { format } => format.matches(value),
        Constraint::Pattern { regex } => text_of(value).is_some_and(|s| regex.is_match(&s)),
        Constraint::Array => value.is_array(),
        Constraint::Custom { check } => check_custom(check, value, payload, ctx),
    }
}

/// Textual form of strings and numbers; other values have none
fn text_of(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) => Some(Cow::Borrowed(s)),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        _ => None,
    }
}

fn check_custom(rule: &CustomRule, value: &Value, payload: &Value, ctx: &ValidationContext) -> bool {
    match rule {
        // Unparseable dates are the format rule's concern
        CustomRule::NotBeforeToday => value
            .as_str()
            .and_then(parse_iso_date)
            .is_none_or(|date| date >= ctx.today),
        CustomRule::AtLeastField { other } => {
            let other = other.lookup(payload).and_then(value_as_f64);
            match (value_as_f64(value), other) {
                (Some(n), Some(floor)) => n >= floor,
                _ => true,
            }
        }
        CustomRule::DiffersFrom { other } => other
            .lookup(payload)
            .filter(|v| !v.is_null())
            .is_none_or(|other| other != value),
    }
}
