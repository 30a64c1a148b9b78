//! JSON → value map helpers

use anyhow::{Context, bail};
use serde_json::Value;
use steady_core::ValueMap;

/// Convert a JSON object into an ordered [`ValueMap`]
///
/// # Examples
///
/// ```
/// use steady_test::value_map;
/// use serde_json::json;
///
/// let values = value_map(json!({"name": "Laptop", "price": 100})).unwrap();
/// assert_eq!(values["price"], json!(100));
/// assert!(value_map(json!([1, 2])).is_err());
/// ```
pub fn value_map(value: Value) -> anyhow::Result<ValueMap> {
	match value {
		Value::Object(map) => Ok(map.into_iter().collect()),
		other => bail!("expected a JSON object, got {other}"),
	}
}

/// Parse a JSON object literal into a [`ValueMap`]
pub fn parse_value_map(text: &str) -> anyhow::Result<ValueMap> {
	let value: Value = serde_json::from_str(text).context("invalid JSON")?;
	value_map(value)
}
