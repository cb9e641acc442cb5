//! Rule set registry and validation entry points

use super::catalog;
use super::filters::sanitize_all;
use super::result::ValidationResult;
use super::rule::RuleSet;
use super::validators::{ValidationContext, evaluate_all};
use crate::config::{QueryPolicy, SchemaOverrides};
use crate::core::entity::{EntityKind, Operation};
use crate::core::error::FieldValidationError;
use crate::core::query::NormalizedQuery;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

/// Rule sets keyed by entity kind and operation
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    rule_sets: HashMap<(EntityKind, Operation), RuleSet>,
}

impl Schema {
    /// Schema with the built-in rule sets
    pub fn new() -> Self {
        let creates = [
            (EntityKind::Property, catalog::property()),
            (EntityKind::Blog, catalog::blog()),
            (EntityKind::Contact, catalog::contact()),
            (EntityKind::Appointment, catalog::appointment()),
            (EntityKind::User, catalog::user_register()),
        ];

        let mut rule_sets = HashMap::new();
        for (kind, create) in creates {
            rule_sets.insert((kind, Operation::Update), catalog::update_of(create.clone()));
            rule_sets.insert((kind, Operation::Create), create);
        }
        rule_sets.insert((EntityKind::User, Operation::Login), catalog::user_login());
        rule_sets.insert(
            (EntityKind::User, Operation::ChangePassword),
            catalog::user_change_password(),
        );

        Self { rule_sets }
    }

    /// Shared built-in schema, compiled once
    pub fn builtin() -> &'static Schema {
        static BUILTIN: OnceLock<Schema> = OnceLock::new();
        BUILTIN.get_or_init(Schema::new)
    }

    /// Replace rule sets with configured ones
    ///
    /// A replaced `create` set also replaces the derived `update` set, unless
    /// the overrides define that `update` set explicitly.
    pub fn with_overrides(mut self, overrides: SchemaOverrides) -> Self {
        let explicit_updates: HashSet<EntityKind> = overrides
            .rule_sets
            .iter()
            .filter(|o| o.operation == Operation::Update)
            .map(|o| o.kind)
            .collect();

        for entry in overrides.rule_sets {
            if entry.operation == Operation::Create && !explicit_updates.contains(&entry.kind) {
                self.rule_sets.insert(
                    (entry.kind, Operation::Update),
                    catalog::update_of(entry.rule_set.clone()),
                );
            }
            tracing::debug!(kind = %entry.kind, operation = %entry.operation, "rule set overridden");
            self.rule_sets
                .insert((entry.kind, entry.operation), entry.rule_set);
        }
        self
    }

    /// Rule set for a kind and operation, if one is defined
    pub fn rules(&self, kind: EntityKind, operation: Operation) -> Option<&RuleSet> {
        self.rule_sets.get(&(kind, operation))
    }

    /// Validate a payload; never fails, an empty result means accepted
    pub fn validate(
        &self,
        kind: EntityKind,
        operation: Operation,
        payload: &Value,
        ctx: &ValidationContext,
    ) -> ValidationResult {
        let Some(rule_set) = self.rules(kind, operation) else {
            tracing::warn!(%kind, %operation, "no rule set for operation");
            return ValidationResult::from(vec![FieldValidationError::new(
                "operation",
                format!("Operation '{operation}' is not supported for {kind}"),
            )]);
        };

        let result = evaluate_all(rule_set.rules(), payload, ctx);
        tracing::debug!(
            %kind,
            %operation,
            errors = result.len(),
            "validated payload"
        );
        result
    }

    /// Apply the rule set's sanitizers, returning the cleaned payload
    ///
    /// Unknown kind/operation pairs return the payload unchanged.
    pub fn sanitize(&self, kind: EntityKind, operation: Operation, payload: Value) -> Value {
        match self.rules(kind, operation) {
            Some(rule_set) => sanitize_all(rule_set.sanitizers(), payload),
            None => payload,
        }
    }

    /// Strict rules for list endpoints under the given policy
    pub fn query_rules(policy: &QueryPolicy) -> RuleSet {
        catalog::list_query(policy)
    }

    /// Validate a normalized list query against the policy's bounds
    ///
    /// Rules see the text the client sent, so `page=1e3` is not an integer.
    pub fn validate_query(policy: &QueryPolicy, query: &NormalizedQuery) -> ValidationResult {
        let rules = Self::query_rules(policy);
        let payload = query.to_raw_json();
        let result = evaluate_all(rules.rules(), &payload, &ValidationContext::today());
        tracing::debug!(errors = result.len(), "validated list query");
        result
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate against the built-in schema with today's date
pub fn validate(kind: EntityKind, operation: Operation, payload: &Value) -> ValidationResult {
    Schema::builtin().validate(kind, operation, payload, &ValidationContext::today())
}
