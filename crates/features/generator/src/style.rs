//! Style normalization.
//!
//! Clients send an optional, loosely typed `style` object. Normalization never fails: unusable
//! numeric values fall back to their defaults and out-of-range values are clamped. Colors are
//! passed through untouched and only validated at render time.

use qrgen_derive::api_model;
use serde_json::{Map, Value};
use std::ops::RangeInclusive;

pub const DEFAULT_FILL_COLOR: &str = "#111111";
pub const DEFAULT_BACKGROUND_COLOR: &str = "#ffffff";
pub const DEFAULT_BOX_SIZE: u32 = 10;
pub const DEFAULT_BORDER: u32 = 4;

/// Pixel edge length of one module.
pub const BOX_SIZE_RANGE: RangeInclusive<u32> = 4..=20;
/// Quiet zone width, in modules.
pub const BORDER_RANGE: RangeInclusive<u32> = 1..=10;

#[api_model]
#[derive(Clone, PartialEq, Eq)]
/// Rendering parameters after normalization.
pub struct StyleConfig {
    /// Module color (any CSS color string)
    pub fill_color: String,
    /// Background and quiet zone color (any CSS color string)
    pub background_color: String,
    /// Pixels per module, 4 to 20
    pub box_size: u32,
    /// Quiet zone in modules, 1 to 10
    pub border: u32,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            fill_color: DEFAULT_FILL_COLOR.to_owned(),
            background_color: DEFAULT_BACKGROUND_COLOR.to_owned(),
            box_size: DEFAULT_BOX_SIZE,
            border: DEFAULT_BORDER,
        }
    }
}

/// Normalizes a raw `style` payload.
///
/// Anything that is not a JSON object is treated as an empty object. `null` fields count as
/// absent. Numeric fields accept integers, floats (truncated toward zero), booleans and integer
/// strings such as `" 12 "`, `"+7"` or `"1_0"`.
#[must_use]
pub fn normalize_style(payload: Option<&Value>) -> StyleConfig {
    let fields = payload.and_then(Value::as_object);

    StyleConfig {
        fill_color: color_field(fields, "fillColor", DEFAULT_FILL_COLOR),
        background_color: color_field(fields, "backgroundColor", DEFAULT_BACKGROUND_COLOR),
        box_size: int_field(fields, "boxSize", DEFAULT_BOX_SIZE, &BOX_SIZE_RANGE),
        border: int_field(fields, "border", DEFAULT_BORDER, &BORDER_RANGE),
    }
}

fn field<'a>(fields: Option<&'a Map<String, Value>>, key: &str) -> Option<&'a Value> {
    fields.and_then(|map| map.get(key)).filter(|value| !value.is_null())
}

/// Strings pass through verbatim; other JSON values keep their JSON text and are rejected
/// later by the color parser.
fn color_field(fields: Option<&Map<String, Value>>, key: &str, default: &str) -> String {
    match field(fields, key) {
        None => default.to_owned(),
        Some(Value::String(color)) => color.clone(),
        Some(other) => other.to_string(),
    }
}

fn int_field(
    fields: Option<&Map<String, Value>>,
    key: &str,
    default: u32,
    range: &RangeInclusive<u32>,
) -> u32 {
    field(fields, key).and_then(coerce_int).map_or(default, |value| clamp(value, range))
}

fn clamp(value: i64, range: &RangeInclusive<u32>) -> u32 {
    let clamped = value.clamp(i64::from(*range.start()), i64::from(*range.end()));
    u32::try_from(clamped).unwrap_or(*range.start())
}

/// Integer coercion. Out-of-range integers saturate, which clamping makes equivalent to
/// arbitrary precision.
pub(crate) fn coerce_int(value: &Value) -> Option<i64> {
    match value {
        Value::Bool(flag) => Some(i64::from(*flag)),
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_u64().map(|_| i64::MAX))
            .or_else(|| number.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(raw) => parse_int_literal(raw),
        _ => None,
    }
}

/// Parses a decimal integer literal: surrounding whitespace, an optional sign and single
/// underscores between digits are allowed. Only ASCII digits count.
fn parse_int_literal(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    let (negative, digits) = match trimmed.as_bytes().first()? {
        b'-' => (true, &trimmed[1..]),
        b'+' => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    if digits.is_empty() || digits.starts_with('_') || digits.ends_with('_') || digits.contains("__")
    {
        return None;
    }

    let mut magnitude: i64 = 0;
    for ch in digits.chars().filter(|c| *c != '_') {
        let digit = ch.to_digit(10)?;
        magnitude = magnitude.saturating_mul(10).saturating_add(i64::from(digit));
    }

    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_style_yields_defaults() {
        assert_eq!(normalize_style(None), StyleConfig::default());
        assert_eq!(normalize_style(Some(&json!({}))), StyleConfig::default());
    }

    #[test]
    fn non_object_style_is_treated_as_empty() {
        for payload in [json!("red"), json!(42), json!([1, 2]), json!(true), Value::Null] {
            assert_eq!(normalize_style(Some(&payload)), StyleConfig::default(), "{payload}");
        }
    }

    #[test]
    fn values_are_clamped_into_range() {
        let style = normalize_style(Some(&json!({ "boxSize": 100, "border": 0 })));
        assert_eq!(style.box_size, 20);
        assert_eq!(style.border, 1);

        let style = normalize_style(Some(&json!({ "boxSize": -3, "border": 55 })));
        assert_eq!(style.box_size, 4);
        assert_eq!(style.border, 10);
    }

    #[test]
    fn unusable_numbers_fall_back_to_defaults() {
        let style = normalize_style(Some(&json!({ "boxSize": "abc", "border": null })));
        assert_eq!(style.box_size, DEFAULT_BOX_SIZE);
        assert_eq!(style.border, DEFAULT_BORDER);

        let style = normalize_style(Some(&json!({ "boxSize": [12], "border": { "n": 2 } })));
        assert_eq!(style.box_size, DEFAULT_BOX_SIZE);
        assert_eq!(style.border, DEFAULT_BORDER);
    }

    #[test]
    fn numeric_coercion_follows_integer_conversion_rules() {
        assert_eq!(coerce_int(&json!(12.9)), Some(12));
        assert_eq!(coerce_int(&json!(-7.5)), Some(-7));
        assert_eq!(coerce_int(&json!(true)), Some(1));
        assert_eq!(coerce_int(&json!(false)), Some(0));
        assert_eq!(coerce_int(&json!(" 12 ")), Some(12));
        assert_eq!(coerce_int(&json!("+8")), Some(8));
        assert_eq!(coerce_int(&json!("-3")), Some(-3));
        assert_eq!(coerce_int(&json!("1_5")), Some(15));
        assert_eq!(coerce_int(&json!(u64::MAX)), Some(i64::MAX));
        assert_eq!(coerce_int(&json!("99999999999999999999999")), Some(i64::MAX));

        for rejected in ["", "  ", "12.5", "1e3", "_1", "1_", "1__0", "+", "0x10", "ten"] {
            assert_eq!(coerce_int(&json!(rejected)), None, "{rejected:?}");
        }
    }

    #[test]
    fn non_ascii_digits_fall_back_to_defaults() {
        let style = normalize_style(Some(&json!({ "boxSize": "١٢", "border": "２" })));
        assert_eq!(style.box_size, DEFAULT_BOX_SIZE);
        assert_eq!(style.border, DEFAULT_BORDER);
    }

    #[test]
    fn colors_pass_through_unvalidated() {
        let style = normalize_style(Some(&json!({
            "fillColor": "not-a-color",
            "backgroundColor": "",
        })));
        assert_eq!(style.fill_color, "not-a-color");
        assert_eq!(style.background_color, "");

        let style = normalize_style(Some(&json!({ "fillColor": 123, "backgroundColor": null })));
        assert_eq!(style.fill_color, "123");
        assert_eq!(style.background_color, DEFAULT_BACKGROUND_COLOR);
    }
}
