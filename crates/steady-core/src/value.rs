//! JSON value helpers shared by both engines

use indexmap::IndexMap;

/// Dynamic field value, as exchanged with the host UI and the caller.
pub type Value = serde_json::Value;

/// Ordered field name → value map.
///
/// Insertion order follows descriptor order, so views and submitted
/// payloads list fields the way they were declared.
pub type ValueMap = IndexMap<String, Value>;

/// Returns true for `null` and the empty string.
///
/// # Examples
///
/// ```
/// use steady_core::is_blank;
/// use serde_json::json;
///
/// assert!(is_blank(&json!(null)));
/// assert!(is_blank(&json!("")));
/// assert!(!is_blank(&json!(" ")));
/// assert!(!is_blank(&json!(0)));
/// assert!(!is_blank(&json!([])));
/// ```
pub fn is_blank(value: &Value) -> bool {
	match value {
		Value::Null => true,
		Value::String(s) => s.is_empty(),
		_ => false,
	}
}

/// Like [`is_blank`], but whitespace-only strings are blank too.
///
/// # Examples
///
/// ```
/// use steady_core::is_blank_trimmed;
/// use serde_json::json;
///
/// assert!(is_blank_trimmed(&json!("   ")));
/// assert!(!is_blank_trimmed(&json!(" a ")));
/// ```
pub fn is_blank_trimmed(value: &Value) -> bool {
	match value {
		Value::Null => true,
		Value::String(s) => s.trim().is_empty(),
		_ => false,
	}
}
