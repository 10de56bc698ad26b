//! The value classifier.
//!
//! Uniform nil-ness, emptiness and dereferencing primitives every rule
//! depends on, plus the scalar coercions rules use to read values. This is
//! the single place that inspects value shape; everything else switches on
//! the results.

use std::borrow::Cow;

use crate::core::error::{EC_INV_TYPE, Error};
use crate::core::value::Value;

/// Checks whether the value is an actual nil or a wrapped nil.
///
/// Returns `(is_nil, is_wrapped)`:
///
/// - `is_nil` — the value carries no content: [`Value::Nothing`], or a
///   reference holding nothing.
/// - `is_wrapped` — the value is of a reference kind, which still carries
///   type information even when nil.
pub fn is_nil(value: &Value) -> (bool, bool) {
    match value {
        Value::Nothing => (true, false),
        Value::Ref(None) => (true, true),
        Value::Ref(Some(_)) => (false, true),
        _ => (false, false),
    }
}

/// Checks whether the value is empty.
///
/// A value is considered empty if:
///
/// - integer, float: zero
/// - bool: false
/// - string, bytes, list, map: zero length
/// - reference: nil, or the referenced value is empty
/// - custom: its own [`zero`](crate::CustomValue::zero) answer when exposed
///   (trusted verbatim), else the emptiness of its underlying value
/// - record: declares zero fields
///
/// Note the record arm: a record is empty only when it declares no fields,
/// never by inspecting field values.
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Nothing | Value::Ref(None) => true,
        Value::Custom(custom) => {
            if let Some(zero) = custom.zero() {
                return zero;
            }
            match custom.underlying() {
                Some(under) => is_empty(&under),
                None => false,
            }
        }
        Value::Bool(b) => !b,
        Value::Int(i) => *i == 0,
        Value::Uint(u) => *u == 0,
        Value::Float(x) => *x == 0.0,
        Value::Str(s) => s.is_empty(),
        Value::Bytes(bytes) => bytes.is_empty(),
        Value::List(items) => items.is_empty(),
        Value::Map(map) => map.is_empty(),
        Value::Record(record) => record.is_empty(),
        Value::Ref(Some(inner)) => is_empty(inner),
    }
}

/// Dereferences the value to its underlying concrete value.
///
/// Reference chains are followed; a custom value exposing an underlying
/// value has that value substituted; nil and wrapped nil both become
/// [`Value::Nothing`]. Anything else is returned unchanged.
pub fn indirect(value: &Value) -> Cow<'_, Value> {
    match value {
        Value::Nothing | Value::Ref(None) => Cow::Owned(Value::Nothing),
        Value::Ref(Some(inner)) => indirect(inner),
        Value::Custom(custom) => match custom.underlying() {
            Some(under) => Cow::Owned(under),
            None => Cow::Borrowed(value),
        },
        _ => Cow::Borrowed(value),
    }
}

/// Returns the length of a string, byte-string, list or map value.
///
/// String length is counted in bytes. All other kinds are a type error.
pub fn length_of(value: &Value) -> Result<usize, Error> {
    match value {
        Value::Str(s) => Ok(s.len()),
        Value::Bytes(bytes) => Ok(bytes.len()),
        Value::List(items) => Ok(items.len()),
        Value::Map(map) => Ok(map.len()),
        other => Err(Error::new(
            format!("cannot get the length of {}", other.kind()),
            EC_INV_TYPE,
        )),
    }
}

/// Reads the value as a string.
///
/// A byte-string is typecast into a string; all other kinds are a type
/// error.
pub fn ensure_str(value: &Value) -> Result<Cow<'_, str>, Error> {
    match value {
        Value::Str(s) => Ok(Cow::Borrowed(s.as_str())),
        Value::Bytes(bytes) => Ok(String::from_utf8_lossy(bytes)),
        _ => Err(Error::new(
            "must be either a string or byte slice",
            EC_INV_TYPE,
        )),
    }
}

/// Reads the value as a signed integer. Same-kind only.
pub fn to_int(value: &Value) -> Result<i64, Error> {
    match value {
        Value::Int(i) => Ok(*i),
        other => Err(Error::new(
            format!("cannot convert {} to int64", other.kind()),
            EC_INV_TYPE,
        )),
    }
}

/// Reads the value as an unsigned integer. Same-kind only.
pub fn to_uint(value: &Value) -> Result<u64, Error> {
    match value {
        Value::Uint(u) => Ok(*u),
        other => Err(Error::new(
            format!("cannot convert {} to uint64", other.kind()),
            EC_INV_TYPE,
        )),
    }
}

/// Reads the value as a float. Same-kind only.
pub fn to_float(value: &Value) -> Result<f64, Error> {
    match value {
        Value::Float(x) => Ok(*x),
        other => Err(Error::new(
            format!("cannot convert {} to float64", other.kind()),
            EC_INV_TYPE,
        )),
    }
}

// ============================================================================
// TESTS
// ============================================================================
