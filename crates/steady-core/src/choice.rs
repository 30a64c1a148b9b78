//! Choice options for selects, radio groups and checkbox groups

use crate::value::Value;
use serde::{Deserialize, Serialize};

/// One selectable option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceOption {
	pub value: Value,
	pub label: String,
	#[serde(default)]
	pub disabled: bool,
}

impl ChoiceOption {
	/// Create an enabled option
	///
	/// # Examples
	///
	/// ```
	/// use steady_core::ChoiceOption;
	///
	/// let option = ChoiceOption::new("laptop", "Laptop");
	/// assert_eq!(option.value, serde_json::json!("laptop"));
	/// assert!(!option.disabled);
	/// ```
	pub fn new(value: impl Into<Value>, label: impl Into<String>) -> Self {
		Self {
			value: value.into(),
			label: label.into(),
			disabled: false,
		}
	}

	pub fn disabled(mut self) -> Self {
		self.disabled = true;
		self
	}
}

/// Layout direction of radio and checkbox groups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
	#[default]
	Horizontal,
	Vertical,
}
