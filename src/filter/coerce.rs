//! Loose value coercions
//!
//! Criterion inputs and listing leaves arrive as untyped JSON values. These
//! helpers turn them into numbers and strings the way a loosely typed feed
//! expects: numeric strings read their leading number, anything unreadable
//! reads as zero, absent values read as zero or empty.

use serde_json::Value;

/// Whether a raw input value counts as "nothing requested"
///
/// Null, `false`, numeric zero, the empty string, the string `"0"` and the
/// empty array are all empty.
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty() || s == "0",
        Value::Array(items) => items.is_empty(),
        Value::Object(_) => false,
    }
}

/// Read the longest numeric prefix of a string, after leading whitespace
///
/// `"1200 sq ft"` reads as 1200, `"2.5"` as 2.5, `"abc"` as 0.
pub fn leading_number(text: &str) -> f64 {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if digits > 0 || frac_end > frac_start {
            digits += frac_end - frac_start;
            end = frac_end;
        }
    }

    if digits == 0 {
        return 0.0;
    }

    // Exponent only counts when digits follow it
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().unwrap_or(0.0)
}

/// Coerce a scalar value to a float; `None` for arrays and objects
pub fn scalar_to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Null => Some(0.0),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Number(n) => Some(n.as_f64().unwrap_or(0.0)),
        Value::String(s) => Some(leading_number(s)),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Coerce a scalar value to an integer, truncating toward zero
pub fn scalar_to_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => Some(match n.as_i64() {
            Some(i) => i,
            None => truncate(n.as_f64().unwrap_or(0.0)),
        }),
        other => scalar_to_f64(other).map(truncate),
    }
}

/// Coerce a scalar value to its string form; `None` for arrays and objects
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some(String::new()),
        Value::Bool(b) => Some(if *b { "1".to_string() } else { String::new() }),
        Value::Number(n) => Some(match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => i.to_string(),
            (None, Some(f)) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
            _ => n.to_string(),
        }),
        Value::String(s) => Some(s.clone()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Numeric reading of an optional listing leaf; absent or composite reads as 0
pub fn field_f64(value: Option<&Value>) -> f64 {
    value.and_then(scalar_to_f64).unwrap_or(0.0)
}

/// Integer reading of an optional listing leaf; absent or composite reads as 0
pub fn field_i64(value: Option<&Value>) -> i64 {
    value.and_then(scalar_to_i64).unwrap_or(0)
}

/// Text reading of an optional listing leaf; absent or composite reads as ""
pub fn field_text(value: Option<&Value>) -> String {
    value.and_then(scalar_to_string).unwrap_or_default()
}

fn truncate(f: f64) -> i64 {
    if f.is_finite() {
        f.trunc() as i64
    } else {
        0
    }
}
