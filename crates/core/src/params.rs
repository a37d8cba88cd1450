//! Pure helper functions for extracting typed parameters from a `serde_json::Value` object.
//!
//! Each helper takes a JSON value, a key name, and a default. If the key is
//! missing or the value is not the expected shape, the default is returned.
//! These never fail; range validation belongs to each generator's
//! `validate()`, not here.

use crate::color::Rgb;
use serde_json::Value;

/// Extracts an `f64` from `params[name]`, returning `default` if missing or wrong type.
///
/// Accepts both JSON numbers (including integers) and converts them to f64.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// Extracts a `usize` from `params[name]`, returning `default` if missing or wrong type.
///
/// Only succeeds if the JSON value is a non-negative integer that fits in `u64`.
pub fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .map(|v| v as usize)
        .unwrap_or(default)
}

/// Extracts a `u32` from `params[name]`, returning `default` if missing,
/// wrong type, or out of `u32` range.
pub fn param_u32(params: &Value, name: &str, default: u32) -> u32 {
    params
        .get(name)
        .and_then(Value::as_u64)
        .and_then(|v| u32::try_from(v).ok())
        .unwrap_or(default)
}

/// Extracts an [`Rgb`] from a `"#rrggbb"` string at `params[name]`,
/// returning `default` if missing or unparsable.
pub fn param_color(params: &Value, name: &str, default: Rgb) -> Rgb {
    params
        .get(name)
        .and_then(Value::as_str)
        .and_then(|s| Rgb::from_hex(s).ok())
        .unwrap_or(default)
}

/// Extracts an optional [`Rgb`] from `params[name]`.
///
/// A missing key keeps `default`; an explicit JSON `null` means "disabled"
/// and maps to `None`; a valid hex string maps to `Some`; anything else
/// keeps `default`.
pub fn param_opt_color(params: &Value, name: &str, default: Option<Rgb>) -> Option<Rgb> {
    match params.get(name) {
        None => default,
        Some(Value::Null) => None,
        Some(Value::String(s)) => match Rgb::from_hex(s) {
            Ok(color) => Some(color),
            Err(_) => default,
        },
        Some(_) => default,
    }
}
