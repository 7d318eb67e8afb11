//! Dynamic values and the equality rules controllers use on them.
//!
//! Bound values are [`serde_json::Value`]s: a panel is built from JSON,
//! saves to JSON, and controllers of different kinds live side by side in
//! one tree. This module holds the conversions every controller needs:
//!
//! | Function         | Meaning                                            |
//! |------------------|----------------------------------------------------|
//! | [`loose_eq`]     | `==` between primitives, `"8" == 8`, `true == 1`   |
//! | [`strict_eq`]    | same type and same value, `1 == 1.0` still holds   |
//! | [`parse_float`]  | longest numeric prefix, `"12px"` → `12`            |
//! | [`parse_number`] | whole-string numeric text only                     |
//! | [`number_value`] | `f64` → JSON, integral values as integers          |
//! | [`truthy`]       | boolean coercion                                   |
//! | [`to_text`]      | text coercion                                      |

use serde_json::{Value, json};

// ─── Equality ────────────────────────────────────────────────────────────────

/// Loose equality.
///
/// Primitives compare after coercion: a string equals a number when it
/// reads as that number, a boolean compares as 1 or 0. `null` equals only
/// `null`. Arrays and objects compare structurally with [`strict_eq`] and
/// never equal a primitive.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn loose_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Null, _) | (_, Value::Null) => false,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        (Value::Bool(x), other) | (other, Value::Bool(x)) => loose_eq(&json!(u8::from(*x)), other),
        (Value::Number(n), Value::String(s)) | (Value::String(s), Value::Number(n)) => {
            string_to_number(s).is_some_and(|parsed| Some(parsed) == n.as_f64())
        }
        (Value::Array(_) | Value::Object(_), Value::Array(_) | Value::Object(_)) => strict_eq(a, b),
        _ => false,
    }
}

/// Type-aware equality. Numbers compare by value, so an integer and an
/// integral float are equal.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn strict_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| strict_eq(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs.iter().all(|(key, x)| ys.get(key).is_some_and(|y| strict_eq(x, y)))
        }
        _ => a == b,
    }
}

/// A string read as a number for comparison: blank text is zero.
fn string_to_number(s: &str) -> Option<f64> {
    if s.trim().is_empty() { Some(0.0) } else { parse_number(s) }
}

// ─── Numbers ─────────────────────────────────────────────────────────────────

/// Read the longest numeric prefix of `text`, after leading whitespace.
///
/// `"12px"` → 12, `" -.5e1x"` → -5, `"px"` → `None`. Infinities are not
/// numbers here.
#[must_use]
pub fn parse_float(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let len = bytes.len();
    let digit = |i: usize| i < len && bytes[i].is_ascii_digit();

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let mut mantissa_digits = 0;

    while digit(end) {
        end += 1;
        mantissa_digits += 1;
    }
    if end < len && bytes[end] == b'.' {
        end += 1;
        while digit(end) {
            end += 1;
            mantissa_digits += 1;
        }
    }
    if mantissa_digits == 0 {
        return None;
    }

    // An exponent only counts when it has digits: "1e" reads as 1.
    if end < len && bytes[end].eq_ignore_ascii_case(&b'e') {
        let mut exp = end + 1;
        if exp < len && matches!(bytes[exp], b'+' | b'-') {
            exp += 1;
        }
        let exp_digits = exp;
        while digit(exp) {
            exp += 1;
        }
        if exp > exp_digits {
            end = exp;
        }
    }

    text[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Read `text` as a number only if all of it (minus surrounding
/// whitespace) is numeric.
#[must_use]
pub fn parse_number(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    let parsed = parse_float(text)?;
    let whole = text
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .is_some_and(|v| v.to_bits() == parsed.to_bits());
    whole.then_some(parsed)
}

/// Read a bound value as a number, as a numeric field would.
///
/// Numbers pass through; strings go through [`parse_float`]; anything
/// else is not a number.
#[must_use]
pub fn to_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => parse_float(s),
        _ => None,
    }
}

/// Largest magnitude at which every integer is exactly representable.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Store a number, integral values as JSON integers.
///
/// Non-finite input becomes `null`; controllers never produce it.
#[must_use]
#[allow(clippy::float_cmp, clippy::cast_possible_truncation)]
pub fn number_value(x: f64) -> Value {
    if x.fract() == 0.0 && x.abs() <= MAX_SAFE_INTEGER {
        // Integral and within the safe range, so the cast is exact.
        json!(x as i64)
    } else {
        json!(x)
    }
}

/// Shortest text that reads back as `x`: `8`, `0.1`, `-2.5`.
#[must_use]
pub fn display_number(x: f64) -> String {
    if x == 0.0 { "0".to_string() } else { format!("{x}") }
}

/// Digits after the decimal point in the shortest text form of `x`.
#[must_use]
pub fn decimals(x: f64) -> usize {
    let text = display_number(x);
    text.find('.').map_or(0, |dot| text.len() - dot - 1)
}

// ─── Other coercions ─────────────────────────────────────────────────────────

/// Boolean coercion: `null`, `false`, `0`, and `""` are false.
#[must_use]
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|x| x != 0.0 && !x.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Text coercion. Strings are taken as-is, numbers use
/// [`display_number`], everything else its compact JSON form.
#[must_use]
pub fn to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.as_f64().map_or_else(|| n.to_string(), display_number),
        other => other.to_string(),
    }
}
