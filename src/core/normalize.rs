//! Scientific-notation normalization for outbound request bodies.
//!
//! Agents frequently emit epoch-millis and similar values as floats
//! (`1.732693003E12`). OpenSearch rejects those for `long`/`date` fields,
//! so every float in a query body is rewritten to a plain number before the
//! request is sent: an integer when the decimal value is whole, otherwise a
//! float parsed back from its shortest decimal text.

use serde_json::{Map, Number, Value};

/// Converts a float into a plain (non-exponent) JSON number.
///
/// Returns `None` for `NaN` and infinities.
///
/// The value is rendered through its shortest round-trip decimal text, so
/// binary artifacts such as `1.7349999999999999` never leak in from
/// arithmetic; trailing fractional zeros and a dangling decimal point are
/// stripped before deciding between integer and float.
///
/// Whole values outside the 64-bit integer range stay floats.
#[must_use]
pub fn plain_float(value: f64) -> Option<Number> {
    if !value.is_finite() {
        return None;
    }

    // `Display` for f64 never uses an exponent.
    let rendered = value.to_string();
    let mut text = rendered.as_str();
    if text.contains('.') {
        text = text.trim_end_matches('0').trim_end_matches('.');
    }
    if text.is_empty() || text == "-" {
        text = "0";
    }

    if text.contains('.') {
        return text.parse::<f64>().ok().and_then(Number::from_f64);
    }

    if let Ok(n) = text.parse::<i64>() {
        Some(Number::from(n))
    } else if let Ok(n) = text.parse::<u64>() {
        Some(Number::from(n))
    } else {
        Number::from_f64(value)
    }
}

/// Returns a copy of `value` with every float replaced by [`plain_float`].
///
/// Objects and arrays are rebuilt recursively; integers, strings, booleans
/// and null are cloned unchanged. A float that cannot be represented becomes
/// `null`.
#[must_use]
pub fn normalize(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), normalize(v)))
                .collect::<Map<String, Value>>(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(normalize).collect()),
        Value::Number(n) if n.is_f64() => n
            .as_f64()
            .and_then(plain_float)
            .map_or(Value::Null, Value::Number),
        other => other.clone(),
    }
}

/// Parses JSON text and normalizes the result.
///
/// # Errors
///
/// Returns the parse error unchanged when `text` is not valid JSON.
pub fn normalize_text(text: &str) -> Result<Value, serde_json::Error> {
    let parsed: Value = serde_json::from_str(text)?;
    Ok(normalize(&parsed))
}

/// Normalizes a request body supplied either as a JSON value or as a JSON
/// string holding the encoded body.
///
/// Only a top-level string is decoded; strings nested inside objects are
/// left alone.
///
/// # Errors
///
/// Returns the parse error when a string body is not valid JSON.
pub fn normalize_body(body: &Value) -> Result<Value, serde_json::Error> {
    match body {
        Value::String(text) => normalize_text(text),
        other => Ok(normalize(other)),
    }
}
