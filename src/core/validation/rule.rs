//! Rule data model
//!
//! A rule set is plain data: an ordered list of `(field, constraint, message)`
//! rules plus the sanitizers to run before them. The interpreter in
//! [`validators`](super::validators) is the only code that gives it meaning, so
//! rule sets can be compared, serialized and loaded from YAML.

use super::filters::Sanitizer;
use crate::core::error::ConfigError;
use crate::core::field::{FieldFormat, FieldPath};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A single check applied to the value at a field path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Constraint {
    /// Value must be present and not null
    Required,

    /// String whose trimmed length (in characters) is within `[min, max]`
    Length {
        #[serde(default)]
        min: usize,
        #[serde(default)]
        max: Option<usize>,
    },

    /// Number within `[min, max]`, either bound optional
    Range {
        #[serde(default)]
        min: Option<f64>,
        #[serde(default)]
        max: Option<f64>,
    },

    /// Number strictly greater than `min`
    GreaterThan { min: f64 },

    /// Integral number within `[min, max]`, either bound optional
    Integer {
        #[serde(default)]
        min: Option<i64>,
        #[serde(default)]
        max: Option<i64>,
    },

    /// String from a closed set
    OneOf { values: Vec<String> },

    /// Named string format
    Format { format: FieldFormat },

    /// String matching a user-supplied regular expression
    Pattern { regex: CompiledPattern },

    /// JSON array
    Array,

    /// Predicate that needs more than the value itself
    Custom { check: CustomRule },
}

impl Constraint {
    pub fn length(min: usize, max: usize) -> Self {
        Constraint::Length {
            min,
            max: Some(max),
        }
    }

    pub fn min_length(min: usize) -> Self {
        Constraint::Length { min, max: None }
    }

    pub fn range(min: f64, max: f64) -> Self {
        Constraint::Range {
            min: Some(min),
            max: Some(max),
        }
    }

    pub fn min(min: f64) -> Self {
        Constraint::Range {
            min: Some(min),
            max: None,
        }
    }

    pub fn integer() -> Self {
        Constraint::Integer {
            min: None,
            max: None,
        }
    }

    pub fn one_of<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Constraint::OneOf {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn format(format: FieldFormat) -> Self {
        Constraint::Format { format }
    }

    /// Build a pattern constraint, compiling the expression up front
    pub fn pattern(regex: &str) -> Result<Self, ConfigError> {
        Ok(Constraint::Pattern {
            regex: CompiledPattern::new(regex)?,
        })
    }

    pub fn custom(check: CustomRule) -> Self {
        Constraint::Custom { check }
    }
}

/// Predicates over the whole payload or the validation context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum CustomRule {
    /// Date must not be strictly earlier than the context's current date
    NotBeforeToday,

    /// Number must be at least the number at `other`, when `other` is present
    AtLeastField { other: FieldPath },

    /// Value must differ from the value at `other`
    DiffersFrom { other: FieldPath },
}

/// A regular expression compiled when the rule is built or deserialized
#[derive(Debug, Clone)]
pub struct CompiledPattern(Regex);

impl CompiledPattern {
    pub fn new(pattern: &str) -> Result<Self, ConfigError> {
        Regex::new(pattern)
            .map(Self)
            .map_err(|e| ConfigError::InvalidPattern {
                pattern: pattern.to_string(),
                message: e.to_string(),
            })
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_match(&self, haystack: &str) -> bool {
        self.0.is_match(haystack)
    }
}

impl PartialEq for CompiledPattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Serialize for CompiledPattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CompiledPattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let pattern = String::deserialize(deserializer)?;
        CompiledPattern::new(&pattern).map_err(serde::de::Error::custom)
    }
}

/// A constraint bound to a field, with the message reported on violation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub field: FieldPath,
    pub constraint: Constraint,
    pub message: String,
}

impl Rule {
    pub fn new(
        field: impl Into<FieldPath>,
        constraint: Constraint,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            constraint,
            message: message.into(),
        }
    }
}

/// Builder for the rules of one field
///
/// ```
/// use realty_guard::core::validation::{FieldRules, RuleSet};
///
/// let rules = RuleSet::new().field(
///     FieldRules::for_field("title")
///         .required("Title is required")
///         .length(5, 100, "Title must be between 5 and 100 characters"),
/// );
/// assert_eq!(rules.rules().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct FieldRules {
    field: FieldPath,
    rules: Vec<Rule>,
}

impl FieldRules {
    pub fn for_field(field: impl Into<FieldPath>) -> Self {
        Self {
            field: field.into(),
            rules: Vec::new(),
        }
    }

    /// Add any constraint
    pub fn check(mut self, constraint: Constraint, message: impl Into<String>) -> Self {
        self.rules
            .push(Rule::new(self.field.clone(), constraint, message));
        self
    }

    pub fn required(self, message: impl Into<String>) -> Self {
        self.check(Constraint::Required, message)
    }

    pub fn length(self, min: usize, max: usize, message: impl Into<String>) -> Self {
        self.check(Constraint::length(min, max), message)
    }

    pub fn min_length(self, min: usize, message: impl Into<String>) -> Self {
        self.check(Constraint::min_length(min), message)
    }

    pub fn range(self, min: f64, max: f64, message: impl Into<String>) -> Self {
        self.check(Constraint::range(min, max), message)
    }

    pub fn min(self, min: f64, message: impl Into<String>) -> Self {
        self.check(Constraint::min(min), message)
    }

    pub fn integer(self, message: impl Into<String>) -> Self {
        self.check(Constraint::integer(), message)
    }

    pub fn integer_range(
        self,
        min: Option<i64>,
        max: Option<i64>,
        message: impl Into<String>,
    ) -> Self {
        self.check(Constraint::Integer { min, max }, message)
    }

    pub fn one_of(self, values: &[&str], message: impl Into<String>) -> Self {
        self.check(Constraint::one_of(values.iter().copied()), message)
    }

    pub fn format(self, format: FieldFormat, message: impl Into<String>) -> Self {
        self.check(Constraint::format(format), message)
    }

    pub fn array(self, message: impl Into<String>) -> Self {
        self.check(Constraint::Array, message)
    }

    pub fn custom(self, check: CustomRule, message: impl Into<String>) -> Self {
        self.check(Constraint::custom(check), message)
    }
}

/// Ordered rules and sanitizers for one entity kind and operation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    #[serde(default)]
    rules: Vec<Rule>,

    #[serde(default)]
    sanitizers: Vec<Sanitizer>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the rules of one field
    pub fn field(mut self, field: FieldRules) -> Self {
        self.rules.extend(field.rules);
        self
    }

    /// Append a single rule
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Append a sanitizer
    pub fn sanitize(mut self, sanitizer: Sanitizer) -> Self {
        self.sanitizers.push(sanitizer);
        self
    }

    /// Append another rule set after this one
    pub fn then(mut self, other: RuleSet) -> Self {
        self.rules.extend(other.rules);
        self.sanitizers.extend(other.sanitizers);
        self
    }

    /// Same rules with every presence requirement dropped
    ///
    /// Absent fields then pass; present fields still meet every other
    /// constraint.
    pub fn into_optional(mut self) -> Self {
        self.rules
            .retain(|rule| !matches!(rule.constraint, Constraint::Required));
        self
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn sanitizers(&self) -> &[Sanitizer] {
        &self.sanitizers
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty() && self.sanitizers.is_empty()
    }
}
