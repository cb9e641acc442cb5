//! Query string normalization and pagination
//!
//! Both operations are lenient: they never fail. Malformed values are coerced
//! or clamped to safe defaults so listing endpoints stay usable. Strict range
//! checks on `page`/`limit` belong to the list-query rule set
//! ([`Schema::validate_query`](crate::core::validation::Schema::validate_query)).

use crate::config::QueryPolicy;
use crate::core::coerce::{is_integral, parse_bool, parse_int_lenient, parse_number};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// A coerced query parameter value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryValue {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl QueryValue {
    /// Coerce one raw value; `None` for the empty string
    ///
    /// `"true"`/`"false"` become booleans, fully numeric strings become
    /// integers (when integral and in range) or floats, anything else stays
    /// text.
    pub fn from_raw(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            return None;
        }
        if let Some(b) = parse_bool(raw) {
            return Some(QueryValue::Boolean(b));
        }
        if let Some(n) = parse_number(raw) {
            return Some(match raw.trim().parse::<i64>() {
                Ok(i) => QueryValue::Integer(i),
                Err(_) if is_integral(n) => QueryValue::Integer(n as i64),
                Err(_) => QueryValue::Float(n),
            });
        }
        Some(QueryValue::Text(raw.to_string()))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            QueryValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            QueryValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            QueryValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            QueryValue::Integer(i) => Some(*i as f64),
            QueryValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Read as a page-style integer with `parseInt` leniency
    ///
    /// Floats truncate, text is parsed by prefix, booleans are unreadable.
    pub fn as_lenient_int(&self) -> Option<i64> {
        match self {
            QueryValue::Integer(i) => Some(*i),
            QueryValue::Float(f) => Some(f.trunc() as i64),
            QueryValue::Text(s) => parse_int_lenient(s),
            QueryValue::Boolean(_) => None,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            QueryValue::Boolean(b) => Value::Bool(*b),
            QueryValue::Integer(i) => Value::from(*i),
            QueryValue::Float(f) => Value::from(*f),
            QueryValue::Text(s) => Value::String(s.clone()),
        }
    }
}

/// Coerced query parameters, keyed by parameter name
///
/// The raw text of every kept parameter is retained next to its coerced value:
/// pagination reads `page`/`limit` from the text with `parseInt` rules, and
/// the list-query rules check what the client actually sent. Serializes as the
/// plain map of coerced values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedQuery {
    values: IndexMap<String, QueryValue>,
    raw: IndexMap<String, String>,
}

impl NormalizedQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.values.get(key)
    }

    /// Text the value was coerced from, when it came from a raw query
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.raw.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &QueryValue)> {
        self.values.iter()
    }

    /// Set a coerced value directly; it has no raw text
    pub fn insert(&mut self, key: impl Into<String>, value: QueryValue) {
        let key = key.into();
        self.raw.shift_remove(&key);
        self.values.insert(key, value);
    }

    /// Read a parameter as a page-style integer with `parseInt` leniency
    ///
    /// Uses the raw text when there is one, so `"1e3"` reads as 1 exactly as
    /// [`paginate`] would read it.
    pub fn lenient_int(&self, key: &str) -> Option<i64> {
        match self.raw(key) {
            Some(raw) => parse_int_lenient(raw),
            None => self.get(key).and_then(QueryValue::as_lenient_int),
        }
    }

    /// Parameters other than the given reserved keys (e.g. `page`, `limit`)
    pub fn without<'a>(
        &'a self,
        reserved: &'a [&'a str],
    ) -> impl Iterator<Item = (&'a String, &'a QueryValue)> + 'a {
        self.values
            .iter()
            .filter(move |(key, _)| !reserved.contains(&key.as_str()))
    }

    /// JSON object of the coerced values
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.values
                .iter()
                .map(|(key, value)| (key.clone(), value.to_json()))
                .collect(),
        )
    }

    /// JSON object of the raw text, falling back to the coerced value
    ///
    /// This is the view the list-query rules are evaluated against.
    pub fn to_raw_json(&self) -> Value {
        Value::Object(
            self.values
                .iter()
                .map(|(key, value)| {
                    let json = match self.raw.get(key) {
                        Some(raw) => Value::String(raw.clone()),
                        None => value.to_json(),
                    };
                    (key.clone(), json)
                })
                .collect(),
        )
    }

    pub fn into_inner(self) -> IndexMap<String, QueryValue> {
        self.values
    }
}

impl Serialize for NormalizedQuery {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.values.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for NormalizedQuery {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self {
            values: IndexMap::deserialize(deserializer)?,
            raw: IndexMap::new(),
        })
    }
}

/// Coerce a raw string-keyed query into typed values
///
/// Keys with empty values are dropped; falsy but non-empty values such as
/// `"0"` or `"false"` are kept. When a key repeats, the last occurrence wins
/// (an empty last occurrence removes the key).
///
/// ```
/// use realty_guard::core::query::{normalize_query, QueryValue};
///
/// let query = normalize_query([("active", "true"), ("count", "5"), ("name", "Lux"), ("empty", "")]);
/// assert_eq!(query.get("active"), Some(&QueryValue::Boolean(true)));
/// assert_eq!(query.get("count"), Some(&QueryValue::Integer(5)));
/// assert_eq!(query.get("name"), Some(&QueryValue::Text("Lux".into())));
/// assert!(!query.contains_key("empty"));
/// ```
pub fn normalize_query<I, K, V>(raw: I) -> NormalizedQuery
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: AsRef<str>,
{
    let mut normalized = NormalizedQuery::new();
    for (key, text) in raw {
        let key = key.into();
        let text = text.as_ref();
        match QueryValue::from_raw(text) {
            Some(value) => {
                normalized.raw.insert(key.clone(), text.to_string());
                normalized.values.insert(key, value);
            }
            None => {
                normalized.raw.shift_remove(&key);
                normalized.values.shift_remove(&key);
            }
        }
    }
    normalized
}

/// Pagination metadata derived from `(page, limit, total)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationPlan {
    /// Current page number (starts at 1)
    pub current_page: u64,

    /// Number of items per page (at least 1)
    pub page_size: u64,

    /// Total number of pages, 0 when there are no items
    pub total_pages: u64,

    /// Leading rows to omit in the storage query
    pub skip: u64,

    pub has_next: bool,
    pub has_prev: bool,
}

impl PaginationPlan {
    /// Compute a plan from already-parsed inputs
    ///
    /// `None`, zero and unreadable inputs take the policy defaults; negative
    /// values clamp to 1.
    pub fn compute(policy: &QueryPolicy, page: Option<i64>, limit: Option<i64>, total: u64) -> Self {
        let current_page = resolve(page, policy.default_page);
        let page_size = resolve(limit, policy.default_limit);

        if page.is_some_and(|p| p < 1) || limit.is_some_and(|l| l < 1) {
            tracing::debug!(?page, ?limit, current_page, page_size, "clamped pagination input");
        }

        let total_pages = total.div_ceil(page_size);
        let skip = (current_page - 1).saturating_mul(page_size);

        Self {
            current_page,
            page_size,
            total_pages,
            skip,
            has_next: current_page < total_pages,
            has_prev: current_page > 1,
        }
    }

    /// Compute a plan from the `page` and `limit` entries of a normalized query
    ///
    /// Reads the same numbers [`paginate`] would read from the raw text.
    pub fn from_query(policy: &QueryPolicy, query: &NormalizedQuery, total: u64) -> Self {
        let page = query.lenient_int("page");
        let limit = query.lenient_int("limit");
        Self::compute(policy, page, limit, total)
    }

    /// Storage-layer `(offset, limit)` pair
    pub fn offset_limit(&self) -> (u64, u64) {
        (self.skip, self.page_size)
    }
}

/// `max(1, parsed or default)` where zero counts as missing
fn resolve(parsed: Option<i64>, default: u64) -> u64 {
    match parsed {
        Some(0) | None => default.max(1),
        Some(n) => u64::try_from(n).unwrap_or(0).max(1),
    }
}

/// Compute pagination from raw `page` and `limit` strings with default policy
///
/// ```
/// use realty_guard::core::query::paginate;
///
/// let plan = paginate(Some("3"), Some("20"), 45);
/// assert_eq!((plan.current_page, plan.page_size, plan.total_pages, plan.skip), (3, 20, 3, 40));
/// assert!(!plan.has_next && plan.has_prev);
/// ```
pub fn paginate(page: Option<&str>, limit: Option<&str>, total: u64) -> PaginationPlan {
    paginate_with(&QueryPolicy::default(), page, limit, total)
}

/// Compute pagination from raw strings with explicit policy defaults
///
/// The policy's `max_limit` is not applied here.
pub fn paginate_with(
    policy: &QueryPolicy,
    page: Option<&str>,
    limit: Option<&str>,
    total: u64,
) -> PaginationPlan {
    PaginationPlan::compute(
        policy,
        page.and_then(parse_int_lenient),
        limit.and_then(parse_int_lenient),
        total,
    )
}

/// A page of results echoed back with its pagination metadata
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    /// The paginated data
    pub data: Vec<T>,

    /// Total number of items (after filters)
    pub total: u64,

    /// Pagination metadata
    pub pagination: PaginationPlan,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, total: u64, pagination: PaginationPlan) -> Self {
        Self {
            data,
            total,
            pagination,
        }
    }
}
