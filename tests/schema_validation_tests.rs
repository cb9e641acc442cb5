//! Integration tests for the built-in rule sets
//!
//! All temporal checks run against a fixed date so results are reproducible.

use chrono::NaiveDate;
use realty_guard::prelude::*;
use serde_json::{Value, json};

fn ctx() -> ValidationContext {
    ValidationContext::new(NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid date"))
}

fn check(kind: EntityKind, operation: Operation, payload: &Value) -> ValidationResult {
    Schema::builtin().validate(kind, operation, payload, &ctx())
}

fn valid_property() -> Value {
    json!({
        "title": "Sunny Villa",
        "description": "A bright villa with a sea view.",
        "price": 250000,
        "type": "villa",
        "status": "for-sale",
        "location": {
            "address": "12 Ocean Drive",
            "city": "Faro",
            "state": "Algarve",
            "zipCode": "8000",
            "coordinates": {"lat": 37.02, "lng": -7.93}
        },
        "specifications": {"bedrooms": 3, "bathrooms": 2, "area": 120},
        "features": ["pool", "garden"],
        "images": [],
        "featured": true
    })
}

fn valid_appointment(date: &str) -> Value {
    json!({
        "property": "507f1f77bcf86cd799439011",
        "client": {
            "name": "Ana",
            "email": "ana@example.com",
            "phone": "+351 912 345 678"
        },
        "date": date,
        "time": "14:30"
    })
}

fn valid_blog() -> Value {
    json!({
        "title": "Market update",
        "excerpt": "Prices are rising again.",
        "content": "A".repeat(50),
        "categories": ["market"],
        "tags": ["prices"],
        "status": "draft"
    })
}

/// Copy of `base` with the value at a dotted field path replaced
fn with_field(base: &Value, field: &str, value: Value) -> Value {
    let mut payload = base.clone();
    let pointer = format!("/{}", field.replace('.', "/"));
    *payload
        .pointer_mut(&pointer)
        .unwrap_or_else(|| panic!("{field} should exist in the base payload")) = value;
    payload
}

fn fields(result: &ValidationResult) -> Vec<&str> {
    result.errors().iter().map(|e| e.field.as_str()).collect()
}

// =============================================================================
// Property
// =============================================================================

mod property_tests {
    use super::*;

    #[test]
    fn test_valid_property_is_accepted() {
        let result = check(EntityKind::Property, Operation::Create, &valid_property());
        assert!(result.is_valid(), "unexpected errors: {:?}", result.errors());
    }

    #[test]
    fn test_missing_field_reports_exactly_one_error() {
        let mut payload = valid_property();
        payload.as_object_mut().expect("object").remove("title");

        let result = check(EntityKind::Property, Operation::Create, &payload);
        assert_eq!(result.len(), 1);
        assert_eq!(result.errors()[0].field, "title");
        assert_eq!(result.errors()[0].message, "Title is required");
    }

    #[test]
    fn test_null_field_counts_as_missing() {
        let mut payload = valid_property();
        payload["price"] = Value::Null;

        let result = check(EntityKind::Property, Operation::Create, &payload);
        assert_eq!(fields(&result), vec!["price"]);
        assert_eq!(result.errors()[0].message, "Price is required");
    }

    #[test]
    fn test_every_violation_is_reported_in_order() {
        let mut payload = valid_property();
        payload["title"] = json!("Hut");
        payload["price"] = json!(-1);
        payload["type"] = json!("castle");
        payload["location"]["coordinates"]["lat"] = json!(91);

        let result = check(EntityKind::Property, Operation::Create, &payload);
        assert_eq!(
            fields(&result),
            vec!["title", "price", "type", "location.coordinates.lat"]
        );
    }

    #[test]
    fn test_nested_location_fields_are_required() {
        let mut payload = valid_property();
        payload["location"] = json!({"address": "", "city": "Faro"});

        let result = check(EntityKind::Property, Operation::Create, &payload);
        assert_eq!(
            fields(&result),
            vec!["location.address", "location.state", "location.zipCode"]
        );
    }

    #[test]
    fn test_area_must_be_strictly_positive() {
        let mut payload = valid_property();
        payload["specifications"]["area"] = json!(0);

        let result = check(EntityKind::Property, Operation::Create, &payload);
        assert_eq!(fields(&result), vec!["specifications.area"]);
    }

    #[test]
    fn test_bedrooms_must_be_whole() {
        let mut payload = valid_property();
        payload["specifications"]["bedrooms"] = json!(2.5);

        let result = check(EntityKind::Property, Operation::Create, &payload);
        assert_eq!(fields(&result), vec!["specifications.bedrooms"]);
    }

    #[test]
    fn test_boundary_values_are_accepted() {
        let cases = [
            ("price", json!(0)),
            ("price", json!("0")),
            ("specifications.bedrooms", json!(0)),
            ("specifications.bathrooms", json!(0)),
            ("specifications.bathrooms", json!(1.5)),
            ("specifications.area", json!(0.01)),
            ("title", json!("x".repeat(5))),
            ("title", json!("x".repeat(100))),
            ("description", json!("d".repeat(10))),
            ("description", json!("d".repeat(2000))),
            ("location.coordinates.lat", json!(90)),
            ("location.coordinates.lat", json!(-90)),
            ("location.coordinates.lng", json!(180)),
            ("location.coordinates.lng", json!(-180)),
            ("location.zipCode", json!("1")),
            ("featured", json!("false")),
            ("features", json!([])),
        ];

        for (field, value) in cases {
            let payload = with_field(&valid_property(), field, value.clone());
            let result = check(EntityKind::Property, Operation::Create, &payload);
            assert!(
                result.is_valid(),
                "{field} = {value} should be accepted, got {:?}",
                result.errors()
            );
        }
    }

    #[test]
    fn test_enum_members_are_accepted() {
        for kind in ["house", "apartment", "condo", "villa", "townhouse", "land", "commercial"] {
            let payload = with_field(&valid_property(), "type", json!(kind));
            assert!(check(EntityKind::Property, Operation::Create, &payload).is_valid());
        }
        for status in ["for-sale", "for-rent", "sold", "rented"] {
            let payload = with_field(&valid_property(), "status", json!(status));
            assert!(check(EntityKind::Property, Operation::Create, &payload).is_valid());
        }
    }

    #[test]
    fn test_out_of_bounds_values_report_one_error() {
        let cases = [
            ("price", json!(-0.01)),
            ("price", json!("free")),
            ("specifications.bedrooms", json!(-1)),
            ("specifications.bedrooms", json!(1.5)),
            ("specifications.bathrooms", json!(-1)),
            ("specifications.area", json!(0)),
            ("specifications.area", json!(-5)),
            ("title", json!("x".repeat(4))),
            ("title", json!("x".repeat(101))),
            ("description", json!("d".repeat(9))),
            ("description", json!("d".repeat(2001))),
            ("location.coordinates.lat", json!(90.5)),
            ("location.coordinates.lat", json!(-90.1)),
            ("location.coordinates.lng", json!(180.5)),
            ("location.coordinates.lng", json!(-181)),
            ("location.city", json!("")),
            ("type", json!("castle")),
            ("status", json!("leased")),
            ("features", json!("pool")),
            ("featured", json!("yes")),
        ];

        for (field, value) in cases {
            let payload = with_field(&valid_property(), field, value.clone());
            let result = check(EntityKind::Property, Operation::Create, &payload);
            assert_eq!(
                fields(&result),
                vec![field],
                "{field} = {value} should be rejected once"
            );
        }
    }

    #[test]
    fn test_validation_is_idempotent() {
        let mut payload = valid_property();
        payload["status"] = json!("demolished");

        let first = check(EntityKind::Property, Operation::Create, &payload);
        let second = check(EntityKind::Property, Operation::Create, &payload);
        assert_eq!(first, second);
        assert_eq!(first.len(), 1);
    }
}

// =============================================================================
// Update
// =============================================================================

mod update_tests {
    use super::*;

    #[test]
    fn test_update_accepts_partial_payload() {
        let payload = json!({"id": "507f1f77bcf86cd799439011", "price": 199000});
        let result = check(EntityKind::Property, Operation::Update, &payload);
        assert!(result.is_valid());
    }

    #[test]
    fn test_update_still_checks_present_fields() {
        let payload = json!({"id": "507f1f77bcf86cd799439011", "title": "Hut"});
        let result = check(EntityKind::Property, Operation::Update, &payload);
        assert_eq!(fields(&result), vec!["title"]);
    }

    #[test]
    fn test_update_requires_id() {
        let result = check(EntityKind::Blog, Operation::Update, &json!({}));
        assert_eq!(result.len(), 1);
        assert_eq!(result.errors()[0].field, "id");
        assert_eq!(result.errors()[0].message, "ID is required");
    }

    #[test]
    fn test_update_rejects_malformed_id() {
        let result = check(EntityKind::Contact, Operation::Update, &json!({"id": "42"}));
        assert_eq!(result.len(), 1);
        assert_eq!(result.errors()[0].message, "Invalid ID format");
    }
}

// =============================================================================
// Appointment
// =============================================================================

mod appointment_tests {
    use super::*;

    #[test]
    fn test_today_is_accepted() {
        let result = check(
            EntityKind::Appointment,
            Operation::Create,
            &valid_appointment("2026-10-19"),
        );
        assert!(result.is_valid(), "unexpected errors: {:?}", result.errors());
    }

    #[test]
    fn test_past_date_is_rejected() {
        let result = check(
            EntityKind::Appointment,
            Operation::Create,
            &valid_appointment("2026-10-18"),
        );
        assert_eq!(fields(&result), vec!["date"]);
        assert_eq!(
            result.errors()[0].message,
            "Appointment date cannot be in the past"
        );
    }

    #[test]
    fn test_unparseable_date_reports_format_only() {
        let result = check(
            EntityKind::Appointment,
            Operation::Create,
            &valid_appointment("someday"),
        );
        assert_eq!(result.len(), 1);
        assert_eq!(result.errors()[0].message, "Please provide a valid date");
    }

    #[test]
    fn test_empty_client_phone_reports_one_error() {
        let mut payload = valid_appointment("2026-12-01");
        payload["client"]["phone"] = json!("");

        let result = check(EntityKind::Appointment, Operation::Create, &payload);
        assert_eq!(fields(&result), vec!["client.phone"]);
        assert_eq!(
            result.errors()[0].message,
            "Please provide a valid phone number"
        );
    }

    #[test]
    fn test_time_format() {
        let mut payload = valid_appointment("2026-12-01");
        payload["time"] = json!("25:00");

        let result = check(EntityKind::Appointment, Operation::Create, &payload);
        assert_eq!(fields(&result), vec!["time"]);
    }

    #[test]
    fn test_nested_client_email() {
        let mut payload = valid_appointment("2026-12-01");
        payload["client"]["email"] = json!("not-an-email");

        let result = check(EntityKind::Appointment, Operation::Create, &payload);
        assert_eq!(fields(&result), vec!["client.email"]);
    }
}

// =============================================================================
// User
// =============================================================================

mod user_tests {
    use super::*;

    fn register(password: &str) -> ValidationResult {
        check(
            EntityKind::User,
            Operation::Create,
            &json!({"name": "Jane", "email": "jane@example.com", "password": password}),
        )
    }

    #[test]
    fn test_password_without_uppercase_is_rejected() {
        let result = register("abc12345");
        assert_eq!(fields(&result), vec!["password"]);
    }

    #[test]
    fn test_strong_password_is_accepted() {
        assert!(register("Abc12345").is_valid());
    }

    #[test]
    fn test_login_only_needs_credentials() {
        let ok = check(
            EntityKind::User,
            Operation::Login,
            &json!({"email": "jane@example.com", "password": "x"}),
        );
        assert!(ok.is_valid());

        let missing = check(EntityKind::User, Operation::Login, &json!({}));
        assert_eq!(fields(&missing), vec!["email", "password"]);
    }

    #[test]
    fn test_change_password_must_differ() {
        let result = check(
            EntityKind::User,
            Operation::ChangePassword,
            &json!({"currentPassword": "Abc12345", "newPassword": "Abc12345"}),
        );
        assert_eq!(fields(&result), vec!["newPassword"]);
        assert_eq!(
            result.errors()[0].message,
            "New password must be different from the current password"
        );
    }

    #[test]
    fn test_invalid_role() {
        let result = check(
            EntityKind::User,
            Operation::Create,
            &json!({
                "name": "Jane",
                "email": "jane@example.com",
                "password": "Abc12345",
                "role": "owner"
            }),
        );
        assert_eq!(fields(&result), vec!["role"]);
    }
}

// =============================================================================
// Contact & Blog
// =============================================================================

mod contact_and_blog_tests {
    use super::*;

    #[test]
    fn test_contact_optional_fields_are_checked_when_present() {
        let result = check(
            EntityKind::Contact,
            Operation::Create,
            &json!({
                "name": "Jane",
                "email": "jane@example.com",
                "phone": "call me",
                "subject": "Viewing request",
                "message": "I would like to visit on Friday.",
                "property": "xyz"
            }),
        );
        assert_eq!(fields(&result), vec!["phone", "property"]);
    }

    #[test]
    fn test_blog_content_minimum() {
        let result = check(
            EntityKind::Blog,
            Operation::Create,
            &json!({
                "title": "Market update",
                "excerpt": "Prices are rising again.",
                "content": "Too short.",
                "status": "published"
            }),
        );
        assert_eq!(fields(&result), vec!["content"]);
    }

    #[test]
    fn test_blog_status_and_list_fields() {
        assert!(check(EntityKind::Blog, Operation::Create, &valid_blog()).is_valid());

        for status in ["draft", "published", "archived"] {
            let payload = with_field(&valid_blog(), "status", json!(status));
            assert!(check(EntityKind::Blog, Operation::Create, &payload).is_valid());
        }

        let cases = [
            ("status", json!("hidden")),
            ("categories", json!("market")),
            ("tags", json!({"name": "prices"})),
            ("excerpt", json!("t".repeat(301))),
            ("content", json!("c".repeat(49))),
        ];
        for (field, value) in cases {
            let payload = with_field(&valid_blog(), field, value.clone());
            let result = check(EntityKind::Blog, Operation::Create, &payload);
            assert_eq!(
                fields(&result),
                vec![field],
                "{field} = {value} should be rejected once"
            );
        }
    }

    #[test]
    fn test_into_result_carries_errors() {
        let result = check(EntityKind::Blog, Operation::Create, &json!({}));
        let err = result.into_result().unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_FAILED");
        assert_eq!(err.field_errors().len(), 3);
    }
}

// =============================================================================
// Sanitization
// =============================================================================

mod sanitize_tests {
    use super::*;

    #[test]
    fn test_sanitize_then_validate() {
        let schema = Schema::builtin();
        let payload = json!({
            "name": "  Jane  ",
            "email": "  jane@EXAMPLE.com ",
            "subject": "   Visit   ",
            "message": "Please call me back."
        });

        let payload = schema.sanitize(EntityKind::Contact, Operation::Create, payload);
        assert_eq!(payload["name"], "Jane");
        assert_eq!(payload["email"], "jane@example.com");

        let result = schema.validate(EntityKind::Contact, Operation::Create, &payload, &ctx());
        assert!(result.is_valid(), "unexpected errors: {:?}", result.errors());
    }
}
