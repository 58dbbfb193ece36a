use msgtemplate::template::{Capture, Converter, Result};
use serde_json::Value as JsonValue;

/// Parse a command-line value as JSON, keeping it as a plain string when that fails.
pub(crate) fn parse_value(raw: &str) -> JsonValue {
	serde_json::from_str(raw).unwrap_or_else(|_| JsonValue::String(raw.to_owned()))
}

/// Parse every command-line value.
pub(crate) fn parse_values(raw: &[String]) -> Vec<JsonValue> {
	raw.iter().map(|value| parse_value(value)).collect()
}

/// Borrow parsed values as capture trait objects.
pub(crate) fn as_captures(values: &[JsonValue]) -> Vec<&dyn Capture> {
	values.iter().map(|value| value as &dyn Capture).collect()
}

/// Converter with the requested depth ceiling.
pub(crate) fn converter(max_depth: u32) -> Result<Converter> {
	Converter::builder().max_depth(max_depth).build()
}
