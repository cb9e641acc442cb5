//! Integration tests for query coercion, pagination and list-query rules

use realty_guard::prelude::*;

mod normalize_tests {
    use super::*;

    #[test]
    fn test_mixed_query_is_coerced() {
        let query = normalize_query([
            ("active", "true"),
            ("count", "5"),
            ("name", "Lux"),
            ("empty", ""),
        ]);

        assert_eq!(query.len(), 3);
        assert_eq!(query.get("active"), Some(&QueryValue::Boolean(true)));
        assert_eq!(query.get("count"), Some(&QueryValue::Integer(5)));
        assert_eq!(query.get("name"), Some(&QueryValue::Text("Lux".into())));
        assert!(!query.contains_key("empty"));
    }

    #[test]
    fn test_keys_keep_first_seen_order() {
        let query = normalize_query([("type", "villa"), ("page", "2"), ("minPrice", "1000.5")]);
        let keys: Vec<&str> = query.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["type", "page", "minPrice"]);
        assert_eq!(query.get("minPrice"), Some(&QueryValue::Float(1000.5)));
    }

    #[test]
    fn test_case_sensitive_booleans() {
        let query = normalize_query([("featured", "TRUE")]);
        assert_eq!(query.get("featured"), Some(&QueryValue::Text("TRUE".into())));
    }

    #[test]
    fn test_normalized_query_serializes_as_plain_object() {
        let query = normalize_query([("featured", "false"), ("bedrooms", "3")]);
        let json = serde_json::to_value(&query).expect("serialize should succeed");
        assert_eq!(json, serde_json::json!({"featured": false, "bedrooms": 3}));
    }
}

mod pagination_tests {
    use super::*;

    #[test]
    fn test_zero_inputs_fall_back_to_defaults() {
        let plan = paginate(Some("0"), Some("0"), 95);
        assert_eq!(plan.current_page, 1);
        assert_eq!(plan.page_size, 10);
        assert_eq!(plan.total_pages, 10);
        assert_eq!(plan.skip, 0);
        assert!(plan.has_next);
        assert!(!plan.has_prev);
    }

    #[test]
    fn test_last_page() {
        let plan = paginate(Some("3"), Some("20"), 45);
        assert_eq!(plan.current_page, 3);
        assert_eq!(plan.page_size, 20);
        assert_eq!(plan.total_pages, 3);
        assert_eq!(plan.skip, 40);
        assert!(!plan.has_next);
        assert!(plan.has_prev);
    }

    #[test]
    fn test_unreadable_inputs_fall_back_to_defaults() {
        let plan = paginate(Some("abc"), Some("lots"), 5);
        assert_eq!((plan.current_page, plan.page_size), (1, 10));
    }

    #[test]
    fn test_numeric_prefix_is_read() {
        let plan = paginate(Some("2nd"), Some(" 15 per page"), 100);
        assert_eq!((plan.current_page, plan.page_size), (2, 15));
        assert_eq!(plan.skip, 15);
    }

    #[test]
    fn test_page_size_is_not_capped() {
        let plan = paginate(Some("1"), Some("5000"), 12);
        assert_eq!(plan.page_size, 5000);
        assert_eq!(plan.total_pages, 1);
    }

    #[test]
    fn test_policy_defaults_apply() {
        let policy = QueryPolicy::from_yaml_str("default_limit: 24\n").expect("policy should load");
        let plan = paginate_with(&policy, None, None, 50);
        assert_eq!(plan.page_size, 24);
        assert_eq!(plan.total_pages, 3);
    }

    #[test]
    fn test_invariants_hold_across_inputs() {
        let inputs = [None, Some("-3"), Some("0"), Some("1"), Some("7"), Some("x")];
        for page in inputs {
            for limit in inputs {
                for total in [0u64, 1, 9, 10, 11, 1000] {
                    let plan = paginate(page, limit, total);
                    assert!(plan.current_page >= 1);
                    assert!(plan.page_size >= 1);
                    assert_eq!(plan.total_pages, total.div_ceil(plan.page_size));
                    assert_eq!(plan.skip, (plan.current_page - 1) * plan.page_size);
                    assert_eq!(plan.has_prev, plan.current_page > 1);
                    assert_eq!(plan.has_next, plan.current_page < plan.total_pages);
                }
            }
        }
    }

    #[test]
    fn test_paginated_response_shape() {
        let plan = paginate(Some("2"), Some("2"), 5);
        let response = PaginatedResponse::new(vec!["c", "d"], 5, plan);
        let json = serde_json::to_value(&response).expect("serialize should succeed");
        assert_eq!(json["data"], serde_json::json!(["c", "d"]));
        assert_eq!(json["total"], 5);
        assert_eq!(json["pagination"]["currentPage"], 2);
        assert_eq!(json["pagination"]["totalPages"], 3);
    }
}

mod list_query_rules_tests {
    use super::*;

    fn check(pairs: &[(&str, &str)]) -> ValidationResult {
        let query = normalize_query(pairs.iter().copied());
        Schema::validate_query(&QueryPolicy::default(), &query)
    }

    fn fields(result: &ValidationResult) -> Vec<&str> {
        result.errors().iter().map(|e| e.field.as_str()).collect()
    }

    #[test]
    fn test_typical_listing_query_is_accepted() {
        let result = check(&[
            ("page", "2"),
            ("limit", "20"),
            ("sort", "-price"),
            ("type", "villa"),
            ("minPrice", "100000"),
            ("maxPrice", "300000"),
            ("featured", "true"),
            ("search", "sea view"),
        ]);
        assert!(result.is_valid(), "unexpected errors: {:?}", result.errors());
    }

    #[test]
    fn test_limit_above_max_is_rejected() {
        let result = check(&[("limit", "101")]);
        assert_eq!(fields(&result), vec!["limit"]);
        assert_eq!(result.errors()[0].message, "Limit must be between 1 and 100");
    }

    #[test]
    fn test_page_must_be_positive_integer() {
        assert_eq!(fields(&check(&[("page", "0")])), vec!["page"]);
        assert_eq!(fields(&check(&[("page", "abc")])), vec!["page"]);
        assert!(check(&[("page", "1")]).is_valid());
    }

    #[test]
    fn test_price_bounds_must_be_ordered() {
        let result = check(&[("minPrice", "500"), ("maxPrice", "100")]);
        assert_eq!(fields(&result), vec!["maxPrice"]);
    }

    #[test]
    fn test_unknown_sort_and_filter_values() {
        let result = check(&[("sort", "password"), ("status", "lost")]);
        assert_eq!(fields(&result), vec!["sort", "status"]);
    }

    #[test]
    fn test_exponent_notation_is_not_an_integer() {
        let result = check(&[("page", "1e3"), ("limit", "2e1")]);
        assert_eq!(fields(&result), vec!["page", "limit"]);

        assert_eq!(fields(&check(&[("limit", "1e2")])), vec!["limit"]);
        assert_eq!(fields(&check(&[("bedrooms", "2.0")])), vec!["bedrooms"]);
        assert!(check(&[("page", "+2"), ("limit", "20")]).is_valid());
    }

    #[test]
    fn test_plan_matches_paginate_for_raw_text() {
        let inputs = [("1e3", "2e1"), ("2.9", "15.5"), ("3", "20"), ("-1", "0"), ("x", "1e2")];
        for (page, limit) in inputs {
            let query = normalize_query([("page", page), ("limit", limit)]);
            assert_eq!(
                PaginationPlan::from_query(&QueryPolicy::default(), &query, 50),
                paginate(Some(page), Some(limit), 50),
                "page={page} limit={limit}"
            );
        }
    }

    #[test]
    fn test_numeric_search_term_is_accepted() {
        assert!(check(&[("search", "90210")]).is_valid());
    }

    #[test]
    fn test_custom_max_limit() {
        let policy = QueryPolicy::from_yaml_str("max_limit: 50\n").expect("policy should load");
        let query = normalize_query([("limit", "60")]);
        let result = Schema::validate_query(&policy, &query);
        assert_eq!(result.errors()[0].message, "Limit must be between 1 and 50");
    }
}
