//! Two-ended range inputs
//!
//! [`RangeInput`] holds a `[from, to]` pair with independent setters and
//! one merged validation error. What the ends contain, how they merge into
//! the bound value and which widget draws them is decided by a
//! [`RangeKind`]: [`DateRange`], [`NumberRange`] or [`TextRange`].

use crate::schema::{Numeric, numeric};
use crate::widget::{Widget, number_value};
use serde_json::json;
use steady_core::{Messages, Value, is_blank, is_blank_trimmed};

/// Behaviour of one flavour of range.
pub trait RangeKind: Clone + Send + Sync {
	/// Normalize one end as typed by the user
	fn normalize(&self, raw: Value) -> Value;

	/// Value bound to the form for the current ends
	fn merge(&self, from: &Value, to: &Value) -> Value {
		json!([from, to])
	}

	/// Validate both ends; `required` demands both be filled
	fn check(&self, from: &Value, to: &Value, required: bool, messages: &Messages) -> Result<(), String>;

	fn widget(&self, placeholders: [String; 2]) -> Widget;

	fn default_placeholders(&self, messages: &Messages) -> [String; 2] {
		messages.range_placeholders().map(str::to_string)
	}
}

/// Date or date-time range; bound only once both ends are chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
	pub show_time: bool,
}

impl DateRange {
	pub fn date() -> Self {
		Self { show_time: false }
	}

	pub fn datetime() -> Self {
		Self { show_time: true }
	}
}

impl RangeKind for DateRange {
	fn normalize(&self, raw: Value) -> Value {
		if is_blank(&raw) { Value::Null } else { raw }
	}

	fn merge(&self, from: &Value, to: &Value) -> Value {
		if is_blank(from) || is_blank(to) {
			Value::Null
		} else {
			json!([from, to])
		}
	}

	fn check(&self, from: &Value, to: &Value, required: bool, messages: &Messages) -> Result<(), String> {
		if required && (is_blank(from) || is_blank(to)) {
			return Err(messages.date_range_incomplete().to_string());
		}
		Ok(())
	}

	fn widget(&self, placeholders: [String; 2]) -> Widget {
		Widget::DateRange {
			placeholders,
			show_time: self.show_time,
		}
	}

	fn default_placeholders(&self, messages: &Messages) -> [String; 2] {
		if self.show_time {
			messages.range_placeholders().map(str::to_string)
		} else {
			messages.date_range_placeholders().map(str::to_string)
		}
	}
}

/// Numeric range with optional input bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NumberRange {
	pub min: Option<f64>,
	pub max: Option<f64>,
	pub step: Option<f64>,
}

impl RangeKind for NumberRange {
	fn normalize(&self, raw: Value) -> Value {
		match numeric(&raw) {
			Numeric::Blank => Value::Null,
			Numeric::Number(n) => number_value(n),
			Numeric::Invalid => raw,
		}
	}

	fn check(&self, from: &Value, to: &Value, required: bool, messages: &Messages) -> Result<(), String> {
		let ends = [numeric(from), numeric(to)];
		if ends.contains(&Numeric::Invalid) {
			return Err(messages.invalid_number().to_string());
		}
		if required && ends.contains(&Numeric::Blank) {
			return Err(messages.range_incomplete().to_string());
		}
		Ok(())
	}

	fn widget(&self, placeholders: [String; 2]) -> Widget {
		Widget::NumberRange {
			placeholders,
			min: self.min,
			max: self.max,
			step: self.step,
		}
	}
}

/// Free-text range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextRange;

impl RangeKind for TextRange {
	fn normalize(&self, raw: Value) -> Value {
		match raw {
			Value::Null => json!(""),
			other => other,
		}
	}

	fn check(&self, from: &Value, to: &Value, required: bool, messages: &Messages) -> Result<(), String> {
		if required && (is_blank_trimmed(from) || is_blank_trimmed(to)) {
			return Err(messages.range_incomplete().to_string());
		}
		Ok(())
	}

	fn widget(&self, placeholders: [String; 2]) -> Widget {
		Widget::TextRange { placeholders }
	}
}

/// A `[from, to]` input bound to one named slot.
///
/// # Examples
///
/// ```
/// use steady_forms::range::{DateRange, RangeInput};
/// use serde_json::json;
///
/// let mut created = RangeInput::new("created_at", DateRange::date()).required();
/// created.set_from(json!("2024-01-01"));
/// assert_eq!(created.value(), json!(null));
///
/// created.set_to(json!("2024-01-31"));
/// assert_eq!(created.value(), json!(["2024-01-01", "2024-01-31"]));
/// ```
#[derive(Debug, Clone)]
pub struct RangeInput<K: RangeKind> {
	name: String,
	kind: K,
	required: bool,
	placeholders: Option<[String; 2]>,
	from: Value,
	to: Value,
	touched: bool,
}

pub type DateRangeInput = RangeInput<DateRange>;
pub type NumberRangeInput = RangeInput<NumberRange>;
pub type TextRangeInput = RangeInput<TextRange>;

impl<K: RangeKind> RangeInput<K> {
	pub fn new(name: impl Into<String>, kind: K) -> Self {
		let from = kind.normalize(Value::Null);
		let to = kind.normalize(Value::Null);
		Self {
			name: name.into(),
			kind,
			required: false,
			placeholders: None,
			from,
			to,
			touched: false,
		}
	}

	pub fn required(mut self) -> Self {
		self.required = true;
		self
	}

	pub fn with_placeholders(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
		self.placeholders = Some([from.into(), to.into()]);
		self
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn kind(&self) -> &K {
		&self.kind
	}

	pub fn set_from(&mut self, raw: Value) {
		self.from = self.kind.normalize(raw);
	}

	pub fn set_to(&mut self, raw: Value) {
		self.to = self.kind.normalize(raw);
	}

	/// Replace both ends from a bound value; anything but a pair clears them
	pub fn set_value(&mut self, value: Value) {
		match value {
			Value::Array(mut items) if items.len() == 2 => {
				let to = items.pop().unwrap_or(Value::Null);
				let from = items.pop().unwrap_or(Value::Null);
				self.set_from(from);
				self.set_to(to);
			}
			_ => {
				self.set_from(Value::Null);
				self.set_to(Value::Null);
			}
		}
	}

	pub fn bounds(&self) -> (&Value, &Value) {
		(&self.from, &self.to)
	}

	pub fn value(&self) -> Value {
		self.kind.merge(&self.from, &self.to)
	}

	pub fn touch(&mut self) {
		self.touched = true;
	}

	pub fn is_touched(&self) -> bool {
		self.touched
	}

	pub fn validate(&self, messages: &Messages) -> Result<(), String> {
		self.kind.check(&self.from, &self.to, self.required, messages)
	}

	/// Validation error, shown only after the input was touched
	pub fn error(&self, messages: &Messages) -> Option<String> {
		if self.touched {
			self.validate(messages).err()
		} else {
			None
		}
	}

	pub fn widget(&self, messages: &Messages) -> Widget {
		let placeholders = self
			.placeholders
			.clone()
			.unwrap_or_else(|| self.kind.default_placeholders(messages));
		self.kind.widget(placeholders)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::{fixture, rstest};
	use steady_core::Locale;

	#[fixture]
	fn messages() -> Messages {
		Messages::new(Locale::En)
	}

	#[rstest]
	fn test_date_range_clears_when_one_end_removed() {
		let mut range = DateRangeInput::new("d", DateRange::date());
		range.set_value(json!(["2024-01-01", "2024-02-01"]));
		assert_eq!(range.value(), json!(["2024-01-01", "2024-02-01"]));

		range.set_to(json!(""));
		assert_eq!(range.value(), Value::Null);
	}

	#[rstest]
	fn test_number_range_keeps_partial_pair() {
		let mut range = NumberRangeInput::new("price", NumberRange::default());
		range.set_from(json!("10"));
		assert_eq!(range.value(), json!([10, null]));
	}

	#[rstest]
	#[case(json!(1), json!(null), Err("Both the from and to values are required".to_string()))]
	#[case(json!("x"), json!(2), Err("Please enter a valid number".to_string()))]
	#[case(json!(1), json!(2), Ok(()))]
	fn test_required_number_range(
		messages: Messages,
		#[case] from: Value,
		#[case] to: Value,
		#[case] expected: Result<(), String>,
	) {
		let mut range = NumberRangeInput::new("price", NumberRange::default()).required();
		range.set_from(from);
		range.set_to(to);
		assert_eq!(range.validate(&messages), expected);
	}

	#[rstest]
	fn test_text_range_trims_for_required_check(messages: Messages) {
		let mut range = TextRangeInput::new("code", TextRange).required();
		range.set_value(json!(["A", "   "]));
		assert_eq!(
			range.validate(&messages),
			Err("Both the from and to values are required".to_string())
		);
	}

	#[rstest]
	fn test_error_is_touch_gated(messages: Messages) {
		let mut range = DateRangeInput::new("d", DateRange::date()).required();
		assert_eq!(range.error(&messages), None);

		range.touch();
		assert_eq!(
			range.error(&messages),
			Some("Both the start and end dates are required".to_string())
		);
	}

	#[rstest]
	fn test_widget_placeholders(messages: Messages) {
		let date = DateRangeInput::new("d", DateRange::date());
		assert_eq!(
			date.widget(&messages),
			Widget::DateRange {
				placeholders: ["From date".to_string(), "To date".to_string()],
				show_time: false
			}
		);

		let text = TextRangeInput::new("t", TextRange).with_placeholders("Min", "Max");
		assert_eq!(
			text.widget(&messages),
			Widget::TextRange {
				placeholders: ["Min".to_string(), "Max".to_string()]
			}
		);
	}
}
