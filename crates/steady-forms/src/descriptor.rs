//! Field descriptors
//!
//! A [`FieldDescriptor`] is the declarative configuration of one form field.
//! Its [`FieldKind`] decides the widget, the empty value and the default
//! required-rule; attributes that only make sense for one kind live inside
//! that kind's variant.

use crate::error::{FormError, FormResult};
use crate::schema::Rule;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashSet;
use steady_core::{ChoiceOption, Direction, Value};

/// Selection mode of a select field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectMode {
	#[default]
	Single,
	Multiple,
	/// Free-form entries, each added as a tag
	Tags,
}

impl SelectMode {
	pub fn is_multi(&self) -> bool {
		!matches!(self, Self::Single)
	}
}

/// Caller-provided widget for a custom field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomWidget {
	/// Component name the host resolves to a concrete widget
	pub component: String,
	/// Extra properties merged into the widget's props
	#[serde(default)]
	pub props: Value,
}

impl CustomWidget {
	pub fn new(component: impl Into<String>) -> Self {
		Self {
			component: component.into(),
			props: Value::Null,
		}
	}

	pub fn with_props(mut self, props: Value) -> Self {
		self.props = props;
		self
	}
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
	Text,
	Password,
	TextArea {
		rows: Option<u32>,
	},
	Number {
		min: Option<f64>,
		max: Option<f64>,
		step: Option<f64>,
		precision: Option<u32>,
	},
	Date {
		format: Option<String>,
	},
	DateTime {
		format: Option<String>,
	},
	Select {
		options: Vec<ChoiceOption>,
		mode: SelectMode,
		allow_clear: bool,
		show_search: bool,
	},
	Radio {
		options: Vec<ChoiceOption>,
		direction: Direction,
	},
	CheckboxGroup {
		options: Vec<ChoiceOption>,
		direction: Direction,
	},
	Checkbox {
		/// Text beside the box; the label is used when absent
		text: Option<String>,
	},
	Custom {
		widget: Option<CustomWidget>,
	},
}

impl FieldKind {
	/// Value a field of this kind starts with when the caller gives none
	///
	/// # Examples
	///
	/// ```
	/// use steady_forms::{FieldKind, SelectMode};
	/// use serde_json::json;
	///
	/// assert_eq!(FieldKind::Text.empty_value(), json!(""));
	/// assert_eq!(FieldKind::Checkbox { text: None }.empty_value(), json!(false));
	/// assert_eq!(
	///     FieldKind::Select {
	///         options: vec![],
	///         mode: SelectMode::Tags,
	///         allow_clear: false,
	///         show_search: false,
	///     }
	///     .empty_value(),
	///     json!([])
	/// );
	/// ```
	pub fn empty_value(&self) -> Value {
		match self {
			Self::Checkbox { .. } => json!(false),
			Self::CheckboxGroup { .. } => json!([]),
			Self::Select { mode, .. } if mode.is_multi() => json!([]),
			Self::Number { .. } | Self::Custom { .. } => Value::Null,
			Self::Select { .. }
			| Self::Text
			| Self::Password
			| Self::TextArea { .. }
			| Self::Date { .. }
			| Self::DateTime { .. }
			| Self::Radio { .. } => json!(""),
		}
	}

	/// Options of choice-based kinds, empty for the rest
	pub fn options(&self) -> &[ChoiceOption] {
		match self {
			Self::Select { options, .. }
			| Self::Radio { options, .. }
			| Self::CheckboxGroup { options, .. } => options,
			_ => &[],
		}
	}

	pub fn name(&self) -> &'static str {
		match self {
			Self::Text => "text",
			Self::Password => "password",
			Self::TextArea { .. } => "textarea",
			Self::Number { .. } => "number",
			Self::Date { .. } => "date",
			Self::DateTime { .. } => "datetime",
			Self::Select { .. } => "select",
			Self::Radio { .. } => "radio",
			Self::CheckboxGroup { .. } => "checkboxGroup",
			Self::Checkbox { .. } => "checkbox",
			Self::Custom { .. } => "custom",
		}
	}
}

/// Declarative configuration of one form field.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
	pub name: String,
	pub kind: FieldKind,
	pub label: Option<String>,
	pub placeholder: Option<String>,
	pub help_text: Option<String>,
	pub required: bool,
	pub disabled: bool,
	/// Replaces the kind's default rule when set
	pub validation: Option<Rule>,
}

impl FieldDescriptor {
	/// Create a descriptor of any kind
	///
	/// # Examples
	///
	/// ```
	/// use steady_forms::{FieldDescriptor, FieldKind};
	///
	/// let field = FieldDescriptor::new("name", FieldKind::Text)
	///     .with_label("Product name")
	///     .required();
	/// assert_eq!(field.display_label(), "Product name");
	/// assert!(field.required);
	/// ```
	pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
		Self {
			name: name.into(),
			kind,
			label: None,
			placeholder: None,
			help_text: None,
			required: false,
			disabled: false,
			validation: None,
		}
	}

	pub fn text(name: impl Into<String>) -> Self {
		Self::new(name, FieldKind::Text)
	}

	pub fn password(name: impl Into<String>) -> Self {
		Self::new(name, FieldKind::Password)
	}

	pub fn textarea(name: impl Into<String>) -> Self {
		Self::new(name, FieldKind::TextArea { rows: None })
	}

	pub fn number(name: impl Into<String>) -> Self {
		Self::new(
			name,
			FieldKind::Number {
				min: None,
				max: None,
				step: None,
				precision: None,
			},
		)
	}

	pub fn date(name: impl Into<String>) -> Self {
		Self::new(name, FieldKind::Date { format: None })
	}

	pub fn datetime(name: impl Into<String>) -> Self {
		Self::new(name, FieldKind::DateTime { format: None })
	}

	pub fn select(name: impl Into<String>, options: Vec<ChoiceOption>) -> Self {
		Self::new(
			name,
			FieldKind::Select {
				options,
				mode: SelectMode::Single,
				allow_clear: false,
				show_search: false,
			},
		)
	}

	pub fn multi_select(name: impl Into<String>, options: Vec<ChoiceOption>) -> Self {
		Self::select(name, options).with_mode(SelectMode::Multiple)
	}

	pub fn tags(name: impl Into<String>) -> Self {
		Self::select(name, Vec::new()).with_mode(SelectMode::Tags)
	}

	pub fn radio(name: impl Into<String>, options: Vec<ChoiceOption>) -> Self {
		Self::new(
			name,
			FieldKind::Radio {
				options,
				direction: Direction::Horizontal,
			},
		)
	}

	pub fn checkbox_group(name: impl Into<String>, options: Vec<ChoiceOption>) -> Self {
		Self::new(
			name,
			FieldKind::CheckboxGroup {
				options,
				direction: Direction::Horizontal,
			},
		)
	}

	pub fn checkbox(name: impl Into<String>) -> Self {
		Self::new(name, FieldKind::Checkbox { text: None })
	}

	pub fn custom(name: impl Into<String>) -> Self {
		Self::new(name, FieldKind::Custom { widget: None })
	}

	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
		self.placeholder = Some(placeholder.into());
		self
	}

	pub fn with_help_text(mut self, help_text: impl Into<String>) -> Self {
		self.help_text = Some(help_text.into());
		self
	}

	pub fn required(mut self) -> Self {
		self.required = true;
		self
	}

	pub fn disabled(mut self) -> Self {
		self.disabled = true;
		self
	}

	pub fn with_validation(mut self, rule: Rule) -> Self {
		self.validation = Some(rule);
		self
	}

	// Kind-specific setters. Each is a no-op on descriptors of another kind.

	pub fn with_rows(mut self, value: u32) -> Self {
		if let FieldKind::TextArea { rows } = &mut self.kind {
			*rows = Some(value);
		}
		self
	}

	/// Lower bound of a number field
	///
	/// # Examples
	///
	/// ```
	/// use steady_forms::{FieldDescriptor, FieldKind};
	///
	/// let price = FieldDescriptor::number("price").with_min(0.0);
	/// assert!(matches!(price.kind, FieldKind::Number { min: Some(m), .. } if m == 0.0));
	///
	/// // Ignored on other kinds
	/// let name = FieldDescriptor::text("name").with_min(0.0);
	/// assert_eq!(name.kind, FieldKind::Text);
	/// ```
	pub fn with_min(mut self, value: f64) -> Self {
		if let FieldKind::Number { min, .. } = &mut self.kind {
			*min = Some(value);
		}
		self
	}

	pub fn with_max(mut self, value: f64) -> Self {
		if let FieldKind::Number { max, .. } = &mut self.kind {
			*max = Some(value);
		}
		self
	}

	pub fn with_step(mut self, value: f64) -> Self {
		if let FieldKind::Number { step, .. } = &mut self.kind {
			*step = Some(value);
		}
		self
	}

	pub fn with_precision(mut self, value: u32) -> Self {
		if let FieldKind::Number { precision, .. } = &mut self.kind {
			*precision = Some(value);
		}
		self
	}

	pub fn with_format(mut self, value: impl Into<String>) -> Self {
		match &mut self.kind {
			FieldKind::Date { format } | FieldKind::DateTime { format } => {
				*format = Some(value.into());
			}
			_ => {}
		}
		self
	}

	pub fn with_mode(mut self, value: SelectMode) -> Self {
		if let FieldKind::Select { mode, .. } = &mut self.kind {
			*mode = value;
		}
		self
	}

	pub fn allow_clear(mut self) -> Self {
		if let FieldKind::Select { allow_clear, .. } = &mut self.kind {
			*allow_clear = true;
		}
		self
	}

	pub fn show_search(mut self) -> Self {
		if let FieldKind::Select { show_search, .. } = &mut self.kind {
			*show_search = true;
		}
		self
	}

	pub fn with_direction(mut self, value: Direction) -> Self {
		match &mut self.kind {
			FieldKind::Radio { direction, .. } | FieldKind::CheckboxGroup { direction, .. } => {
				*direction = value;
			}
			_ => {}
		}
		self
	}

	pub fn with_text(mut self, value: impl Into<String>) -> Self {
		if let FieldKind::Checkbox { text } = &mut self.kind {
			*text = Some(value.into());
		}
		self
	}

	pub fn with_widget(mut self, value: CustomWidget) -> Self {
		if let FieldKind::Custom { widget } = &mut self.kind {
			*widget = Some(value);
		}
		self
	}

	/// Label shown to the user, falling back to the field name
	pub fn display_label(&self) -> &str {
		self.label.as_deref().unwrap_or(&self.name)
	}
}

/// Ordered collection of descriptors with unique names.
#[derive(Debug, Clone, Default)]
pub struct FieldSet {
	fields: Vec<FieldDescriptor>,
}

impl FieldSet {
	/// Build a set, rejecting duplicate names
	///
	/// # Examples
	///
	/// ```
	/// use steady_forms::{FieldDescriptor, FieldSet, FormError};
	///
	/// let err = FieldSet::new(vec![
	///     FieldDescriptor::text("sku"),
	///     FieldDescriptor::text("sku"),
	/// ])
	/// .unwrap_err();
	/// assert_eq!(err, FormError::DuplicateField("sku".to_string()));
	/// ```
	pub fn new(fields: Vec<FieldDescriptor>) -> FormResult<Self> {
		let mut seen = HashSet::new();
		for field in &fields {
			if !seen.insert(field.name.as_str()) {
				return Err(FormError::DuplicateField(field.name.clone()));
			}
		}
		Ok(Self { fields })
	}

	pub fn get(&self, name: &str) -> Option<&FieldDescriptor> {
		self.fields.iter().find(|f| f.name == name)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.get(name).is_some()
	}

	pub fn iter(&self) -> std::slice::Iter<'_, FieldDescriptor> {
		self.fields.iter()
	}

	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.fields.iter().map(|f| f.name.as_str())
	}

	pub fn len(&self) -> usize {
		self.fields.len()
	}

	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}
}

impl<'a> IntoIterator for &'a FieldSet {
	type Item = &'a FieldDescriptor;
	type IntoIter = std::slice::Iter<'a, FieldDescriptor>;

	fn into_iter(self) -> Self::IntoIter {
		self.fields.iter()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_mismatched_setters_are_ignored() {
		let field = FieldDescriptor::checkbox("agree")
			.with_rows(4)
			.with_mode(SelectMode::Tags)
			.with_format("%Y")
			.with_direction(Direction::Vertical)
			.with_text("I agree");

		assert_eq!(
			field.kind,
			FieldKind::Checkbox {
				text: Some("I agree".to_string())
			}
		);
	}

	#[rstest]
	fn test_select_builders() {
		let field = FieldDescriptor::multi_select(
			"tags",
			vec![ChoiceOption::new("a", "A")],
		)
		.allow_clear()
		.show_search();

		match field.kind {
			FieldKind::Select {
				options,
				mode,
				allow_clear,
				show_search,
			} => {
				assert_eq!(options.len(), 1);
				assert_eq!(mode, SelectMode::Multiple);
				assert!(allow_clear);
				assert!(show_search);
			}
			other => panic!("unexpected kind {other:?}"),
		}
	}

	#[rstest]
	fn test_display_label_falls_back_to_name() {
		assert_eq!(FieldDescriptor::text("sku").display_label(), "sku");
	}

	#[rstest]
	fn test_field_set_lookup_keeps_order() {
		let set = FieldSet::new(vec![
			FieldDescriptor::text("b"),
			FieldDescriptor::number("a"),
		])
		.unwrap();

		assert_eq!(set.names().collect::<Vec<_>>(), vec!["b", "a"]);
		assert!(set.contains("a"));
		assert!(set.get("c").is_none());
	}
}
