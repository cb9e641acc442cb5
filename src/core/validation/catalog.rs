//! Built-in rule sets
//!
//! Only the `create`-style sets are declared here. `update` sets are derived
//! by [`update_of`]: the identity rule followed by the create rules with every
//! presence requirement dropped.

use super::filters::Sanitizer;
use super::rule::{Constraint, CustomRule, FieldRules, RuleSet};
use crate::config::QueryPolicy;
use crate::core::field::FieldFormat;

pub const PROPERTY_TYPES: &[&str] = &[
    "house",
    "apartment",
    "condo",
    "villa",
    "townhouse",
    "land",
    "commercial",
];

pub const PROPERTY_STATUSES: &[&str] = &["for-sale", "for-rent", "sold", "rented"];

pub const BLOG_STATUSES: &[&str] = &["draft", "published", "archived"];

pub const APPOINTMENT_STATUSES: &[&str] = &["pending", "confirmed", "cancelled", "completed"];

pub const USER_ROLES: &[&str] = &["user", "agent", "admin"];

fn trim(field: &str) -> Sanitizer {
    Sanitizer::Trim {
        field: field.into(),
    }
}

fn normalize_email(field: &str) -> Sanitizer {
    Sanitizer::NormalizeEmail {
        field: field.into(),
    }
}

fn not_empty(field: &str, label: &str) -> FieldRules {
    FieldRules::for_field(field)
        .required(format!("{label} is required"))
        .min_length(1, format!("{label} is required"))
}

fn email(field: &str) -> FieldRules {
    FieldRules::for_field(field)
        .required("Email is required")
        .format(FieldFormat::Email, "Please provide a valid email")
}

fn strong_password(field: &str, label: &str) -> FieldRules {
    FieldRules::for_field(field)
        .required(format!("{label} is required"))
        .format(
            FieldFormat::Password,
            format!(
                "{label} must be at least 6 characters and contain at least one lowercase letter, one uppercase letter, and one number"
            ),
        )
}

/// Identity rule prepended to every update set
pub fn identity() -> RuleSet {
    RuleSet::new().field(
        FieldRules::for_field("id")
            .required("ID is required")
            .format(FieldFormat::StorageKey, "Invalid ID format"),
    )
}

/// Derive an update set from a create set
pub fn update_of(create: RuleSet) -> RuleSet {
    identity().then(create.into_optional())
}

pub fn property() -> RuleSet {
    RuleSet::new()
        .field(
            FieldRules::for_field("title")
                .required("Title is required")
                .length(5, 100, "Title must be between 5 and 100 characters"),
        )
        .field(
            FieldRules::for_field("description")
                .required("Description is required")
                .length(10, 2000, "Description must be between 10 and 2000 characters"),
        )
        .field(
            FieldRules::for_field("price")
                .required("Price is required")
                .min(0.0, "Price must be a positive number"),
        )
        .field(
            FieldRules::for_field("type")
                .required("Property type is required")
                .one_of(PROPERTY_TYPES, "Invalid property type"),
        )
        .field(FieldRules::for_field("status").one_of(PROPERTY_STATUSES, "Invalid status"))
        .field(not_empty("location.address", "Address"))
        .field(not_empty("location.city", "City"))
        .field(not_empty("location.state", "State"))
        .field(not_empty("location.zipCode", "Zip code"))
        .field(FieldRules::for_field("location.coordinates.lat").range(
            -90.0,
            90.0,
            "Latitude must be between -90 and 90",
        ))
        .field(FieldRules::for_field("location.coordinates.lng").range(
            -180.0,
            180.0,
            "Longitude must be between -180 and 180",
        ))
        .field(
            FieldRules::for_field("specifications.bedrooms")
                .required("Number of bedrooms is required")
                .integer_range(Some(0), None, "Bedrooms must be a non-negative integer"),
        )
        .field(
            FieldRules::for_field("specifications.bathrooms")
                .required("Number of bathrooms is required")
                .min(0.0, "Bathrooms must be a non-negative number"),
        )
        .field(
            FieldRules::for_field("specifications.area")
                .required("Area is required")
                .check(
                    Constraint::GreaterThan { min: 0.0 },
                    "Area must be a positive number",
                ),
        )
        .field(FieldRules::for_field("features").array("Features must be an array"))
        .field(FieldRules::for_field("images").array("Images must be an array"))
        .field(FieldRules::for_field("featured").format(
            FieldFormat::Boolean,
            "Featured must be a boolean",
        ))
        .sanitize(trim("title"))
        .sanitize(trim("description"))
        .sanitize(trim("location.address"))
        .sanitize(trim("location.city"))
        .sanitize(trim("location.state"))
        .sanitize(trim("location.zipCode"))
}

pub fn blog() -> RuleSet {
    RuleSet::new()
        .field(
            FieldRules::for_field("title")
                .required("Title is required")
                .length(5, 200, "Title must be between 5 and 200 characters"),
        )
        .field(
            FieldRules::for_field("excerpt")
                .required("Excerpt is required")
                .length(10, 300, "Excerpt must be between 10 and 300 characters"),
        )
        .field(
            FieldRules::for_field("content")
                .required("Content is required")
                .min_length(50, "Content must be at least 50 characters"),
        )
        .field(FieldRules::for_field("categories").array("Categories must be an array"))
        .field(FieldRules::for_field("tags").array("Tags must be an array"))
        .field(FieldRules::for_field("status").one_of(BLOG_STATUSES, "Invalid status"))
        .sanitize(trim("title"))
        .sanitize(trim("excerpt"))
}

pub fn contact() -> RuleSet {
    RuleSet::new()
        .field(
            FieldRules::for_field("name")
                .required("Name is required")
                .length(2, 100, "Name must be between 2 and 100 characters"),
        )
        .field(email("email"))
        .field(
            FieldRules::for_field("phone")
                .format(FieldFormat::Phone, "Please provide a valid phone number"),
        )
        .field(
            FieldRules::for_field("subject")
                .required("Subject is required")
                .length(5, 200, "Subject must be between 5 and 200 characters"),
        )
        .field(
            FieldRules::for_field("message")
                .required("Message is required")
                .length(10, 2000, "Message must be between 10 and 2000 characters"),
        )
        .field(
            FieldRules::for_field("property")
                .format(FieldFormat::StorageKey, "Invalid property ID"),
        )
        .sanitize(trim("name"))
        .sanitize(normalize_email("email"))
        .sanitize(trim("subject"))
        .sanitize(trim("message"))
}

pub fn appointment() -> RuleSet {
    RuleSet::new()
        .field(
            FieldRules::for_field("property")
                .required("Property is required")
                .format(FieldFormat::StorageKey, "Invalid property ID"),
        )
        .field(
            FieldRules::for_field("client.name")
                .required("Client name is required")
                .length(2, 100, "Client name must be between 2 and 100 characters"),
        )
        .field(email("client.email"))
        .field(
            FieldRules::for_field("client.phone")
                .required("Client phone is required")
                .format(FieldFormat::Phone, "Please provide a valid phone number"),
        )
        .field(
            FieldRules::for_field("date")
                .required("Date is required")
                .format(FieldFormat::IsoDate, "Please provide a valid date")
                .custom(CustomRule::NotBeforeToday, "Appointment date cannot be in the past"),
        )
        .field(
            FieldRules::for_field("time")
                .required("Time is required")
                .format(FieldFormat::Time, "Please provide a valid time (HH:MM)"),
        )
        .field(FieldRules::for_field("message").length(
            0,
            1000,
            "Message cannot exceed 1000 characters",
        ))
        .field(
            FieldRules::for_field("status").one_of(APPOINTMENT_STATUSES, "Invalid status"),
        )
        .sanitize(trim("client.name"))
        .sanitize(normalize_email("client.email"))
        .sanitize(trim("client.phone"))
}

/// Registration
pub fn user_register() -> RuleSet {
    RuleSet::new()
        .field(
            FieldRules::for_field("name")
                .required("Name is required")
                .length(2, 100, "Name must be between 2 and 100 characters"),
        )
        .field(email("email"))
        .field(strong_password("password", "Password"))
        .field(FieldRules::for_field("role").one_of(USER_ROLES, "Invalid role"))
        .field(
            FieldRules::for_field("phone")
                .format(FieldFormat::Phone, "Please provide a valid phone number"),
        )
        .sanitize(trim("name"))
        .sanitize(normalize_email("email"))
}

pub fn user_login() -> RuleSet {
    RuleSet::new()
        .field(email("email"))
        .field(not_empty("password", "Password"))
        .sanitize(normalize_email("email"))
}

pub fn user_change_password() -> RuleSet {
    RuleSet::new()
        .field(not_empty("currentPassword", "Current password"))
        .field(strong_password("newPassword", "New password").custom(
            CustomRule::DiffersFrom {
                other: "currentPassword".into(),
            },
            "New password must be different from the current password",
        ))
}

/// Strict rules for list endpoints, applied to a normalized query
pub fn list_query(policy: &QueryPolicy) -> RuleSet {
    let sort_values: Vec<String> = policy
        .sortable_fields
        .iter()
        .flat_map(|field| [field.clone(), format!("-{field}")])
        .collect();

    RuleSet::new()
        .field(
            FieldRules::for_field("page").integer_range(
                Some(1),
                None,
                "Page must be a positive integer",
            ),
        )
        .field(
            FieldRules::for_field("limit").integer_range(
                Some(1),
                Some(i64::try_from(policy.max_limit).unwrap_or(i64::MAX)),
                format!("Limit must be between 1 and {}", policy.max_limit),
            ),
        )
        .field(FieldRules::for_field("sort").check(
            Constraint::OneOf {
                values: sort_values,
            },
            "Invalid sort field",
        ))
        .field(
            FieldRules::for_field("minPrice").min(0.0, "Minimum price must be a positive number"),
        )
        .field(
            FieldRules::for_field("maxPrice")
                .min(0.0, "Maximum price must be a positive number")
                .custom(
                    CustomRule::AtLeastField {
                        other: "minPrice".into(),
                    },
                    "Maximum price must be greater than or equal to minimum price",
                ),
        )
        .field(
            FieldRules::for_field("bedrooms").integer_range(
                Some(0),
                None,
                "Bedrooms must be a non-negative integer",
            ),
        )
        .field(
            FieldRules::for_field("bathrooms").integer_range(
                Some(0),
                None,
                "Bathrooms must be a non-negative integer",
            ),
        )
        .field(FieldRules::for_field("type").check(
            Constraint::OneOf {
                values: policy.property_types.clone(),
            },
            "Invalid property type",
        ))
        .field(FieldRules::for_field("status").check(
            Constraint::OneOf {
                values: policy.property_statuses.clone(),
            },
            "Invalid status",
        ))
        .field(FieldRules::for_field("search").length(
            1,
            100,
            "Search term must be between 1 and 100 characters",
        ))
        .field(FieldRules::for_field("featured").format(
            FieldFormat::Boolean,
            "Featured must be a boolean",
        ))
}
