//! Lenient conversion of stored values to concrete types.
//!
//! Every conversion returns `None` when the value cannot be represented as
//! the requested type. Nothing here panics or errors.
//!
//! Text is accepted wherever it parses: numeric text is trimmed, a matching
//! pair of surrounding brackets is stripped, thousands separators are
//! removed and only the first whitespace-separated token is read.

use super::value::Value;

/// Opening brackets and their closing partners, by position.
const OPENERS: &str = "([{";
const CLOSERS: &str = ")]}";

/// Reduces numeric text to a token the standard parsers accept.
///
/// Returns `None` for text that can never be a number, such as an empty
/// string or a minus sign that is not leading.
fn sanitize_number(text: &str) -> Option<String> {
    let mut text = text.trim();
    if text.is_empty() {
        return None;
    }

    let mut chars = text.chars();
    if let (Some(first), Some(last)) = (chars.next(), chars.next_back()) {
        let open = OPENERS.find(first);
        if open.is_some() && open == CLOSERS.find(last) {
            text = text[first.len_utf8()..text.len() - last.len_utf8()].trim();
        }
    }

    // "1.5,2" is a list of decimals, keep the first
    if let Some(decimal) = text.find('.') {
        if let Some(comma) = text[decimal..].find(',') {
            return sanitize_number(&text[..decimal + comma]);
        }
    }

    if text.get(1..).is_some_and(|rest| rest.contains('-')) {
        return None;
    }

    let cleaned = text.replace(',', "");
    let token = cleaned.split(' ').next().unwrap_or_default();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

/// Truncates a double toward zero if the result fits in an `i64`.
fn truncate_double(value: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, which itself does not fit
    const UPPER: f64 = 9_223_372_036_854_775_808.0;
    if !value.is_finite() {
        return None;
    }
    let truncated = value.trunc();
    if truncated >= i64::MIN as f64 && truncated < UPPER {
        Some(truncated as i64)
    } else {
        None
    }
}

fn parse_integer(text: &str) -> Option<i64> {
    let token = sanitize_number(text)?;
    let token = token.strip_prefix('+').unwrap_or(&token);
    match token.parse::<i64>() {
        Ok(n) => Some(n),
        Err(_) => token.parse::<f64>().ok().and_then(truncate_double),
    }
}

fn parse_double(text: &str) -> Option<f64> {
    let token = sanitize_number(text)?;
    token.parse::<f64>().ok()
}

/// Coerces a value to a boolean.
///
/// Accepts booleans, the integers 0 and 1, and the text forms
/// `true`/`false`/`yes`/`no`/`1`/`0` in any case.
pub fn as_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Int(0) | Value::Long(0) => Some(false),
        Value::Int(1) | Value::Long(1) => Some(true),
        Value::Text(text) => match text.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Coerces a value to a 64-bit integer.
pub fn as_long(value: &Value) -> Option<i64> {
    match value {
        Value::Int(n) => Some((*n).into()),
        Value::Long(n) => Some(*n),
        Value::Double(n) => truncate_double(*n),
        Value::Text(text) => parse_integer(text),
        _ => None,
    }
}

/// Coerces a value to a 32-bit integer.
pub fn as_int(value: &Value) -> Option<i32> {
    as_long(value).and_then(|n| i32::try_from(n).ok())
}

/// Coerces a value to a 16-bit integer.
pub fn as_short(value: &Value) -> Option<i16> {
    as_long(value).and_then(|n| i16::try_from(n).ok())
}

/// Coerces a value to an unsigned byte.
pub fn as_byte(value: &Value) -> Option<u8> {
    as_long(value).and_then(|n| u8::try_from(n).ok())
}

/// Coerces a value to a double.
pub fn as_double(value: &Value) -> Option<f64> {
    match value {
        Value::Int(n) => Some((*n).into()),
        Value::Long(n) => Some(*n as f64),
        Value::Double(n) => Some(*n),
        Value::Text(text) => parse_double(text),
        _ => None,
    }
}

/// Coerces a value to a single-precision float.
///
/// Finite doubles that overflow `f32` are rejected.
pub fn as_float(value: &Value) -> Option<f32> {
    let double = as_double(value)?;
    let float = double as f32;
    if double.is_finite() && !float.is_finite() {
        None
    } else {
        Some(float)
    }
}

/// Returns the text form of a scalar value.
///
/// Lists, byte arrays and views have no text form.
pub fn as_string(value: &Value) -> Option<String> {
    match value {
        Value::Text(text) => Some(text.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Int(n) => Some(n.to_string()),
        Value::Long(n) => Some(n.to_string()),
        Value::Double(n) => Some(n.to_string()),
        Value::Bytes(_) | Value::List(_) | Value::View(_) => None,
    }
}

/// Returns the first character of a scalar's text form.
pub fn as_char(value: &Value) -> Option<char> {
    match value {
        Value::Text(text) => text.chars().next(),
        other => as_string(other).and_then(|text| text.chars().next()),
    }
}

/// Converts every element it can and silently drops the rest.
pub fn coerce_lenient<'a, T>(
    items: &'a [Value],
    convert: impl FnMut(&'a Value) -> Option<T>,
) -> Vec<T> {
    items.iter().filter_map(convert).collect()
}
