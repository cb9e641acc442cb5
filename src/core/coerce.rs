//! Coercion helpers shared by the schema validator and the query normalizer
//!
//! Request input arrives either as raw query strings or as JSON values that may
//! carry numbers as strings (form posts). These helpers read such input into
//! typed values without ever failing loudly: an unreadable value is `None`.

use serde_json::Value;

/// Lenient integer parsing with `parseInt` prefix semantics
///
/// Leading whitespace is skipped, an optional sign is accepted, and digits are
/// consumed until the first non-digit. Returns `None` when no digit is found.
/// Values beyond the `i64` range saturate.
///
/// ```
/// use realty_guard::core::coerce::parse_int_lenient;
///
/// assert_eq!(parse_int_lenient("  42abc"), Some(42));
/// assert_eq!(parse_int_lenient("-3"), Some(-3));
/// assert_eq!(parse_int_lenient("2.9"), Some(2));
/// assert_eq!(parse_int_lenient("abc"), None);
/// ```
pub fn parse_int_lenient(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let mut value: i64 = 0;
    let mut seen_digit = false;
    for byte in digits.bytes() {
        if !byte.is_ascii_digit() {
            break;
        }
        seen_digit = true;
        let digit = i64::from(byte - b'0');
        value = if negative {
            value.saturating_mul(10).saturating_sub(digit)
        } else {
            value.saturating_mul(10).saturating_add(digit)
        };
    }

    seen_digit.then_some(value)
}

/// Strict number parsing: the whole (trimmed) string must be a finite number
///
/// Rejects empty and whitespace-only input as well as the textual spellings
/// `inf`, `infinity` and `nan` that `f64::from_str` would otherwise accept.
pub fn parse_number(input: &str) -> Option<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed
        .chars()
        .any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E')
    {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Parse the exact literals `"true"` and `"false"`
pub fn parse_bool(input: &str) -> Option<bool> {
    match input {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Read a JSON value as a number (JSON numbers and fully numeric strings)
pub fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_number(s),
        _ => None,
    }
}

/// Read a JSON value as an integer
///
/// Accepts integral JSON numbers (including `3.0`) and strings holding a plain
/// decimal integer with an optional sign. Exponent or fraction notation in a
/// string (`"1e3"`, `"3.0"`) is not an integer.
pub fn value_as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| is_integral(*f)).map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Whether a float is a whole number that `i64` can hold exactly
///
/// `i64::MAX as f64` rounds up to 2^63, which is out of range, so the upper
/// bound is exclusive.
pub fn is_integral(n: f64) -> bool {
    n.fract() == 0.0 && n >= i64::MIN as f64 && n < i64::MAX as f64
}

/// Read a JSON value as a boolean (JSON booleans and `"true"`/`"false"`)
pub fn value_as_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => parse_bool(s),
        _ => None,
    }
}
