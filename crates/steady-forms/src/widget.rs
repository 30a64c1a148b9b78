//! Typed widgets and value normalization
//!
//! [`Widget`] is the closed set of input controls the engines can ask the
//! host to draw. Every field kind maps to exactly one widget; list search
//! fields additionally use the range and tags variants.

use crate::descriptor::{FieldDescriptor, FieldKind, SelectMode};
use crate::schema::{Numeric, numeric};
use serde::Serialize;
use serde_json::json;
use steady_core::{ChoiceOption, Direction, Value};

pub const DEFAULT_DATE_FORMAT: &str = "%d/%m/%Y";
pub const DEFAULT_DATETIME_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// One input control, as plain data.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Widget {
	TextInput {
		placeholder: Option<String>,
	},
	PasswordInput {
		placeholder: Option<String>,
	},
	TextArea {
		placeholder: Option<String>,
		rows: Option<u32>,
	},
	NumberInput {
		placeholder: Option<String>,
		min: Option<f64>,
		max: Option<f64>,
		step: Option<f64>,
		precision: Option<u32>,
	},
	DatePicker {
		placeholder: Option<String>,
		format: String,
	},
	DateTimePicker {
		placeholder: Option<String>,
		format: String,
	},
	Select {
		placeholder: Option<String>,
		options: Vec<ChoiceOption>,
		mode: SelectMode,
		allow_clear: bool,
		show_search: bool,
	},
	RadioGroup {
		options: Vec<ChoiceOption>,
		direction: Direction,
	},
	CheckboxGroup {
		options: Vec<ChoiceOption>,
		direction: Direction,
	},
	Checkbox {
		text: String,
	},
	Custom {
		component: String,
		props: Value,
	},
	DateRange {
		placeholders: [String; 2],
		show_time: bool,
	},
	NumberRange {
		placeholders: [String; 2],
		min: Option<f64>,
		max: Option<f64>,
		step: Option<f64>,
	},
	TextRange {
		placeholders: [String; 2],
	},
	FileUpload {
		accept: Vec<String>,
		multiple: bool,
		max_size_mb: f64,
		hint: String,
	},
}

/// Widget of a form field
///
/// # Examples
///
/// ```
/// use steady_forms::{FieldDescriptor, Widget, widget_for};
///
/// let widget = widget_for(&FieldDescriptor::checkbox("agree").with_label("Terms"));
/// assert_eq!(widget, Widget::Checkbox { text: "Terms".to_string() });
///
/// // A custom field without a widget falls back to a text input
/// let widget = widget_for(&FieldDescriptor::custom("color"));
/// assert_eq!(widget, Widget::TextInput { placeholder: None });
/// ```
pub fn widget_for(field: &FieldDescriptor) -> Widget {
	let placeholder = field.placeholder.clone();
	match &field.kind {
		FieldKind::Text => Widget::TextInput { placeholder },
		FieldKind::Password => Widget::PasswordInput { placeholder },
		FieldKind::TextArea { rows } => Widget::TextArea {
			placeholder,
			rows: *rows,
		},
		FieldKind::Number {
			min,
			max,
			step,
			precision,
		} => Widget::NumberInput {
			placeholder,
			min: *min,
			max: *max,
			step: *step,
			precision: *precision,
		},
		FieldKind::Date { format } => Widget::DatePicker {
			placeholder,
			format: format.clone().unwrap_or_else(|| DEFAULT_DATE_FORMAT.to_string()),
		},
		FieldKind::DateTime { format } => Widget::DateTimePicker {
			placeholder,
			format: format
				.clone()
				.unwrap_or_else(|| DEFAULT_DATETIME_FORMAT.to_string()),
		},
		FieldKind::Select {
			options,
			mode,
			allow_clear,
			show_search,
		} => Widget::Select {
			placeholder,
			options: options.clone(),
			mode: *mode,
			allow_clear: *allow_clear,
			show_search: *show_search,
		},
		FieldKind::Radio { options, direction } => Widget::RadioGroup {
			options: options.clone(),
			direction: *direction,
		},
		FieldKind::CheckboxGroup { options, direction } => Widget::CheckboxGroup {
			options: options.clone(),
			direction: *direction,
		},
		FieldKind::Checkbox { text } => Widget::Checkbox {
			text: text
				.clone()
				.unwrap_or_else(|| field.label.clone().unwrap_or_default()),
		},
		FieldKind::Custom { widget: Some(custom) } => Widget::Custom {
			component: custom.component.clone(),
			props: custom.props.clone(),
		},
		FieldKind::Custom { widget: None } => Widget::TextInput { placeholder },
	}
}

/// JSON value of a number, integral when it has no fraction
///
/// # Examples
///
/// ```
/// use steady_forms::widget::number_value;
/// use serde_json::json;
///
/// assert_eq!(number_value(100.0), json!(100));
/// assert_eq!(number_value(2.5), json!(2.5));
/// ```
pub fn number_value(n: f64) -> Value {
	// i64::MAX rounds up to 2^63 as f64, which no longer fits
	if n.fract() == 0.0 && n >= i64::MIN as f64 && n < i64::MAX as f64 {
		json!(n as i64)
	} else {
		json!(n)
	}
}

/// Normalize a raw input for a field of `kind`
///
/// Numbers parse numeric strings and map blanks to `null`, checkboxes
/// coerce to bool, multi-value kinds always hold an array. Invalid numbers
/// are kept as typed so validation can report them.
///
/// # Examples
///
/// ```
/// use steady_forms::{FieldKind, normalize_value};
/// use serde_json::json;
///
/// let number = FieldKind::Number { min: None, max: None, step: None, precision: None };
/// assert_eq!(normalize_value(&number, json!("42")), json!(42));
/// assert_eq!(normalize_value(&number, json!("")), json!(null));
/// assert_eq!(normalize_value(&FieldKind::Checkbox { text: None }, json!("on")), json!(true));
/// ```
pub fn normalize_value(kind: &FieldKind, raw: Value) -> Value {
	match kind {
		FieldKind::Number { .. } => match numeric(&raw) {
			Numeric::Blank => Value::Null,
			Numeric::Number(n) => number_value(n),
			Numeric::Invalid => raw,
		},
		FieldKind::Checkbox { .. } => Value::Bool(truthy(&raw)),
		FieldKind::CheckboxGroup { .. } => into_list(raw),
		FieldKind::Select { mode, .. } if mode.is_multi() => into_list(raw),
		_ => raw,
	}
}

fn truthy(value: &Value) -> bool {
	match value {
		Value::Bool(b) => *b,
		Value::Null => false,
		Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
		Value::String(s) => matches!(s.trim().to_ascii_lowercase().as_str(), "true" | "on" | "1" | "yes"),
		Value::Array(items) => !items.is_empty(),
		Value::Object(_) => true,
	}
}

/// Wrap a scalar in an array; blanks become the empty array
pub fn into_list(raw: Value) -> Value {
	match raw {
		Value::Array(_) => raw,
		Value::Null => json!([]),
		Value::String(ref s) if s.is_empty() => json!([]),
		other => json!([other]),
	}
}

/// A field ready for drawing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedField {
	pub name: String,
	pub label: Option<String>,
	pub help_text: Option<String>,
	pub required: bool,
	pub disabled: bool,
	pub widget: Widget,
	pub value: Value,
	/// Present only once the field has been touched
	pub error: Option<String>,
}

impl RenderedField {
	pub fn new(field: &FieldDescriptor, value: Value, error: Option<String>) -> Self {
		Self {
			name: field.name.clone(),
			label: field.label.clone(),
			help_text: field.help_text.clone(),
			required: field.required,
			disabled: field.disabled,
			widget: widget_for(field),
			value,
			error,
		}
	}
}
