//! Axum extractors for validated payloads and list queries
//!
//! This module provides the `Validated<T>` extractor that sanitizes and
//! validates request bodies before they reach handlers, and the `ListQuery`
//! extractor that normalizes and checks list query strings.

use super::result::ValidationResult;
use super::schema::Schema;
use super::validators::ValidationContext;
use crate::config::QueryPolicy;
use crate::core::entity::{EntityKind, Operation};
use crate::core::query::{NormalizedQuery, PaginationPlan, QueryValue, normalize_query};
use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::{Method, StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use std::collections::HashMap;

/// Payload categories the `Validated` extractor can check
pub trait ValidatableEntity {
    /// Entity kind whose rule sets apply
    const KIND: EntityKind;

    /// Operation for a request method
    ///
    /// POST creates, PUT and PATCH update.
    fn operation(method: &Method) -> Operation {
        if *method == Method::PUT || *method == Method::PATCH {
            Operation::Update
        } else {
            Operation::Create
        }
    }
}

macro_rules! validatable {
    ($(#[$meta:meta])* $name:ident, $kind:expr) => {
        $(#[$meta])*
        pub struct $name;

        impl ValidatableEntity for $name {
            const KIND: EntityKind = $kind;
        }
    };
    ($(#[$meta:meta])* $name:ident, $kind:expr, $operation:expr) => {
        $(#[$meta])*
        pub struct $name;

        impl ValidatableEntity for $name {
            const KIND: EntityKind = $kind;

            fn operation(_: &Method) -> Operation {
                $operation
            }
        }
    };
}

validatable!(PropertyPayload, EntityKind::Property);
validatable!(BlogPayload, EntityKind::Blog);
validatable!(ContactPayload, EntityKind::Contact);
validatable!(AppointmentPayload, EntityKind::Appointment);
validatable!(
    /// Registration on POST, profile update on PUT/PATCH
    UserPayload,
    EntityKind::User
);
validatable!(LoginPayload, EntityKind::User, Operation::Login);
validatable!(
    PasswordChangePayload,
    EntityKind::User,
    Operation::ChangePassword
);

/// Axum extractor that sanitizes and validates a JSON body
///
/// A path parameter named `id` is copied into the payload (unless the body
/// already carries one) so update rule sets can check it.
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_property(
///     Validated(payload, _): Validated<PropertyPayload>,
/// ) -> Json<Value> {
///     // payload is already sanitized and validated
/// }
/// ```
pub struct Validated<T>(pub Value, pub std::marker::PhantomData<T>);

impl<T> Validated<T> {
    /// Create a new validated payload
    pub fn new(payload: Value) -> Self {
        Self(payload, std::marker::PhantomData)
    }

    /// Get the inner payload
    pub fn into_inner(self) -> Value {
        self.0
    }
}

// Allow dereferencing to Value
impl<T> std::ops::Deref for Validated<T> {
    type Target = Value;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S, T> FromRequest<S> for Validated<T>
where
    S: Send + Sync,
    T: ValidatableEntity + Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let operation = T::operation(req.method());

        let (mut parts, body) = req.into_parts();
        let path_params = Path::<HashMap<String, String>>::from_request_parts(&mut parts, state)
            .await
            .ok();
        let req = Request::from_parts(parts, body);

        let Json(mut payload): Json<Value> = match Json::from_request(req, state).await {
            Ok(json) => json,
            Err(e) => {
                return Err((
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "success": false,
                        "message": "Invalid JSON",
                        "details": e.to_string()
                    })),
                )
                    .into_response());
            }
        };

        if let (Some(Path(params)), Some(object)) = (path_params, payload.as_object_mut()) {
            if let Some(id) = params.get("id") {
                object
                    .entry("id")
                    .or_insert_with(|| Value::String(id.clone()));
            }
        }

        let schema = Schema::builtin();
        let payload = schema.sanitize(T::KIND, operation, payload);
        let result = schema.validate(T::KIND, operation, &payload, &ValidationContext::today());

        if result.is_valid() {
            Ok(Validated::new(payload))
        } else {
            Err(result.into_response())
        }
    }
}

impl IntoResponse for ValidationResult {
    fn into_response(self) -> Response {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "success": false,
                "message": "Validation failed",
                "errors": self
            })),
        )
            .into_response()
    }
}

/// Axum extractor for list endpoints
///
/// Normalizes the query string, rejects out-of-range `page`/`limit` and
/// unknown filter values under the default [`QueryPolicy`], and computes the
/// pagination plan once the caller knows the total count.
#[derive(Debug, Clone)]
pub struct ListQuery {
    query: NormalizedQuery,
    policy: QueryPolicy,
}

impl ListQuery {
    /// Keys consumed by pagination and sorting rather than filtering
    pub const RESERVED: &'static [&'static str] = &["page", "limit", "sort"];

    pub fn query(&self) -> &NormalizedQuery {
        &self.query
    }

    /// Filter parameters (everything except `page`, `limit` and `sort`)
    pub fn filters(&self) -> impl Iterator<Item = (&String, &QueryValue)> {
        self.query.without(Self::RESERVED)
    }

    pub fn sort(&self) -> Option<&str> {
        self.query.get("sort").and_then(QueryValue::as_str)
    }

    /// Pagination plan for a known total count
    pub fn plan(&self, total: u64) -> PaginationPlan {
        PaginationPlan::from_query(&self.policy, &self.query, total)
    }
}

impl<S> FromRequestParts<S> for ListQuery
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(raw): Query<Vec<(String, String)>> = Query::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;

        let query = normalize_query(raw);
        let policy = QueryPolicy::default();
        let result = Schema::validate_query(&policy, &query);

        if result.is_valid() {
            Ok(ListQuery { query, policy })
        } else {
            Err(result.into_response())
        }
    }
}
