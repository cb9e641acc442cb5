//! Listing API example: validated writes and paginated reads over an in-memory store
//!
//! ```text
//! cargo run --example listing_api
//! curl -X POST localhost:3000/properties -H 'content-type: application/json' -d '{"title":"Hut"}'
//! curl 'localhost:3000/properties?type=villa&page=1&limit=5&sort=-price'
//! ```

use anyhow::Result;
use axum::{
    Json, Router,
    extract::State,
    routing::{get, post, put},
};
use realty_guard::prelude::*;
use serde_json::{Value, json};
use std::cmp::Ordering;
use std::sync::{Arc, RwLock};

#[derive(Clone, Default)]
struct AppState {
    properties: Arc<RwLock<Vec<Value>>>,
}

impl AppState {
    fn seeded() -> Self {
        let state = Self::default();
        let seed = [
            ("Sunny Villa", "villa", 450000, true),
            ("City Loft", "apartment", 210000, false),
            ("Quiet Cottage", "house", 185000, false),
            ("Harbour Condo", "condo", 320000, true),
        ];
        if let Ok(mut properties) = state.properties.write() {
            for (i, (title, kind, price, featured)) in seed.into_iter().enumerate() {
                properties.push(json!({
                    "id": format!("{:024x}", i + 1),
                    "title": title,
                    "type": kind,
                    "price": price,
                    "featured": featured,
                }));
            }
        }
        state
    }
}

fn matches_filters(property: &Value, list: &ListQuery) -> bool {
    list.filters().all(|(key, value)| match key.as_str() {
        "minPrice" => property["price"]
            .as_f64()
            .zip(value.as_f64())
            .is_some_and(|(price, min)| price >= min),
        "maxPrice" => property["price"]
            .as_f64()
            .zip(value.as_f64())
            .is_some_and(|(price, max)| price <= max),
        "search" => {
            let needle = match value {
                QueryValue::Text(text) => text.to_lowercase(),
                other => other.to_json().to_string(),
            };
            property["title"]
                .as_str()
                .is_some_and(|title| title.to_lowercase().contains(&needle))
        }
        field => property.get(field).is_none_or(|v| *v == value.to_json()),
    })
}

fn compare(a: &Value, b: &Value, field: &str) -> Ordering {
    match (a[field].as_f64(), b[field].as_f64()) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => a[field]
            .as_str()
            .unwrap_or_default()
            .cmp(b[field].as_str().unwrap_or_default()),
    }
}

async fn list_properties(
    State(state): State<AppState>,
    list: ListQuery,
) -> Json<PaginatedResponse<Value>> {
    let mut matching: Vec<Value> = state
        .properties
        .read()
        .map(|properties| {
            properties
                .iter()
                .filter(|p| matches_filters(p, &list))
                .cloned()
                .collect()
        })
        .unwrap_or_default();

    if let Some(sort) = list.sort() {
        let (field, descending) = match sort.strip_prefix('-') {
            Some(field) => (field, true),
            None => (sort, false),
        };
        matching.sort_by(|a, b| {
            let ordering = compare(a, b, field);
            if descending { ordering.reverse() } else { ordering }
        });
    }

    let total = matching.len() as u64;
    let plan = list.plan(total);
    let (offset, limit) = plan.offset_limit();
    let page = matching
        .into_iter()
        .skip(usize::try_from(offset).unwrap_or(usize::MAX))
        .take(usize::try_from(limit).unwrap_or(usize::MAX))
        .collect();

    Json(PaginatedResponse::new(page, total, plan))
}

async fn create_property(
    State(state): State<AppState>,
    Validated(mut property, _): Validated<PropertyPayload>,
) -> Json<Value> {
    let mut properties = match state.properties.write() {
        Ok(properties) => properties,
        Err(poisoned) => poisoned.into_inner(),
    };
    if let Some(object) = property.as_object_mut() {
        object.insert("id".into(), json!(format!("{:024x}", properties.len() + 1)));
    }
    properties.push(property.clone());
    tracing::info!(id = %property["id"], "property created");

    Json(json!({"success": true, "data": property}))
}

async fn update_property(
    State(state): State<AppState>,
    Validated(changes, _): Validated<PropertyPayload>,
) -> Json<Value> {
    let mut properties = match state.properties.write() {
        Ok(properties) => properties,
        Err(poisoned) => poisoned.into_inner(),
    };
    let Some(existing) = properties.iter_mut().find(|p| p["id"] == changes["id"]) else {
        return Json(json!({"success": false, "message": "Property not found"}));
    };
    if let (Some(target), Some(source)) = (existing.as_object_mut(), changes.as_object()) {
        for (key, value) in source {
            target.insert(key.clone(), value.clone());
        }
    }

    Json(json!({"success": true, "data": existing.clone()}))
}

async fn create_appointment(appointment: Validated<AppointmentPayload>) -> Json<Value> {
    Json(json!({"success": true, "data": appointment.into_inner()}))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "listing_api=info,realty_guard=debug".into()),
        )
        .init();

    let app = Router::new()
        .route("/properties", get(list_properties).post(create_property))
        .route("/properties/{id}", put(update_property))
        .route("/appointments", post(create_appointment))
        .with_state(AppState::seeded());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
