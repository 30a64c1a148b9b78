//! Search form state and filter synthesis
//!
//! Every search field holds an operator and a value whose shape follows the
//! operator. Changing the operator clears the value to the empty shape of the
//! new operator; a value of the wrong shape is rejected.
//!
//! On submit the values are resolved into [`SearchFilter`]s: a pair with
//! both ends empty and an empty list count as missing, and missing, `null`
//! or `""` values produce no filter at all.

use crate::error::{SearchError, SearchResult};
use crate::operator::{Operator, ValueShape};
use crate::request::SearchFilter;
use crate::search_field::{SearchFieldDescriptor, SearchValueKind};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::json;
use std::collections::HashSet;
use steady_core::{Messages, Value, is_blank, is_blank_trimmed};
use steady_forms::range::{DateRange, NumberRange, RangeKind, TextRange};
use steady_forms::schema::{Numeric, numeric};
use steady_forms::widget::{DEFAULT_DATE_FORMAT, DEFAULT_DATETIME_FORMAT};
use steady_forms::{FieldErrors, SelectMode, Widget};

/// Value of one search field, shaped by its operator.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SearchValue {
	Scalar(Value),
	Pair(Value, Value),
	List(Vec<Value>),
}

impl SearchValue {
	pub fn empty(shape: ValueShape) -> Self {
		match shape {
			ValueShape::Scalar => Self::Scalar(Value::Null),
			ValueShape::Pair => Self::Pair(Value::Null, Value::Null),
			ValueShape::List => Self::List(Vec::new()),
		}
	}

	pub fn empty_for(operator: Operator) -> Self {
		Self::empty(operator.shape())
	}

	pub fn shape(&self) -> ValueShape {
		match self {
			Self::Scalar(_) => ValueShape::Scalar,
			Self::Pair(..) => ValueShape::Pair,
			Self::List(_) => ValueShape::List,
		}
	}

	/// Value as bound to the widget
	pub fn to_value(&self) -> Value {
		match self {
			Self::Scalar(value) => value.clone(),
			Self::Pair(from, to) => json!([from, to]),
			Self::List(items) => Value::Array(items.clone()),
		}
	}

	/// Value sent in a filter; `null` when nothing was entered
	///
	/// # Examples
	///
	/// ```
	/// use steady_list::SearchValue;
	/// use serde_json::json;
	///
	/// assert_eq!(SearchValue::Pair(json!(null), json!("")).resolve(), json!(null));
	/// assert_eq!(SearchValue::Pair(json!(10), json!(null)).resolve(), json!([10, null]));
	/// assert_eq!(SearchValue::List(vec![]).resolve(), json!(null));
	/// ```
	pub fn resolve(&self) -> Value {
		match self {
			Self::Scalar(value) => value.clone(),
			Self::Pair(from, to) if is_blank(from) && is_blank(to) => Value::Null,
			Self::List(items) if items.is_empty() => Value::Null,
			other => other.to_value(),
		}
	}

	fn from_raw(kind: SearchValueKind, shape: ValueShape, raw: Value) -> Option<Self> {
		match (shape, raw) {
			(shape, Value::Null) => Some(Self::empty(shape)),
			(ValueShape::Scalar, Value::Array(_)) => None,
			(ValueShape::Scalar, raw) => Some(Self::Scalar(normalize(kind, raw))),
			(ValueShape::Pair, Value::Array(items)) => {
				let [from, to] = <[Value; 2]>::try_from(items).ok()?;
				Some(Self::Pair(normalize(kind, from), normalize(kind, to)))
			}
			(ValueShape::List, Value::Array(items)) => Some(Self::List(
				items
					.into_iter()
					.map(|item| normalize(kind, item))
					.filter(|item| !is_blank(item))
					.collect(),
			)),
			_ => None,
		}
	}
}

fn normalize(kind: SearchValueKind, raw: Value) -> Value {
	match kind {
		SearchValueKind::Number => NumberRange::default().normalize(raw),
		SearchValueKind::Date | SearchValueKind::DateTime => DateRange::default().normalize(raw),
		SearchValueKind::Text | SearchValueKind::Select => raw,
	}
}

/// Operator and value of one search field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchEntry {
	pub operator: Operator,
	pub value: SearchValue,
}

impl SearchEntry {
	pub fn new(operator: Operator) -> Self {
		Self {
			operator,
			value: SearchValue::empty_for(operator),
		}
	}
}

/// Search state keyed by field, in descriptor order.
pub type SearchValues = IndexMap<String, SearchEntry>;

/// Default operator and empty value for every field
pub fn initial_search_values(fields: &[SearchFieldDescriptor]) -> SearchValues {
	fields
		.iter()
		.map(|f| (f.field.clone(), SearchEntry::new(f.default_operator())))
		.collect()
}

/// One filter per field with a present resolved value, in descriptor order
///
/// # Examples
///
/// ```
/// use steady_list::{SearchFieldDescriptor, build_search_filters, initial_search_values};
///
/// let fields = vec![SearchFieldDescriptor::text("name", "Name")];
/// let values = initial_search_values(&fields);
/// assert!(build_search_filters(&fields, &values).is_empty());
/// ```
pub fn build_search_filters(fields: &[SearchFieldDescriptor], values: &SearchValues) -> Vec<SearchFilter> {
	fields
		.iter()
		.filter_map(|field| {
			let entry = values.get(&field.field)?;
			let value = entry.value.resolve();
			if is_blank(&value) {
				return None;
			}
			Some(SearchFilter {
				field: field.field.clone(),
				operator: entry.operator,
				value,
				required: field.required,
			})
		})
		.collect()
}

/// Validate one entry; only required fields are constrained
fn check(field: &SearchFieldDescriptor, entry: &SearchEntry, messages: &Messages) -> Result<(), String> {
	if !field.required {
		return Ok(());
	}
	let label = field.label.as_str();
	match (&entry.value, field.value_kind) {
		(SearchValue::Pair(from, to), SearchValueKind::Number) => NumberRange {
			min: field.min,
			max: field.max,
			step: field.step,
		}
		.check(from, to, true, messages),
		(SearchValue::Pair(from, to), SearchValueKind::Date | SearchValueKind::DateTime) => {
			DateRange::default().check(from, to, true, messages)
		}
		(SearchValue::Pair(from, to), _) => TextRange.check(from, to, true, messages),
		(SearchValue::List(items), SearchValueKind::Select) if items.is_empty() => {
			Err(messages.select_at_least_one(label))
		}
		(SearchValue::List(items), _) if items.is_empty() => Err(messages.required(label)),
		(SearchValue::List(_), _) => Ok(()),
		(SearchValue::Scalar(value), SearchValueKind::Number) => match numeric(value) {
			Numeric::Blank => Err(messages.required(label)),
			Numeric::Invalid => Err(messages.invalid_number().to_string()),
			Numeric::Number(n) => {
				if let Some(min) = field.min
					&& n < min
				{
					return Err(messages.min_value(min));
				}
				if let Some(max) = field.max
					&& n > max
				{
					return Err(messages.max_value(max));
				}
				Ok(())
			}
		},
		(SearchValue::Scalar(value), SearchValueKind::Select) if is_blank(value) => {
			Err(messages.select_required(label))
		}
		(SearchValue::Scalar(value), SearchValueKind::Text) if is_blank_trimmed(value) => {
			Err(messages.required(label))
		}
		(SearchValue::Scalar(value), SearchValueKind::Date | SearchValueKind::DateTime) if is_blank(value) => {
			Err(messages.required(label))
		}
		(SearchValue::Scalar(_), _) => Ok(()),
	}
}

/// Value widget for a field under `operator`
///
/// `between` gets a range widget, `in`/`notin` a multi-select over the
/// field's options or free tag entry, anything else the single-value widget
/// of the field's kind.
pub fn search_widget(field: &SearchFieldDescriptor, operator: Operator, messages: &Messages) -> Widget {
	let label = field.label.as_str();
	let placeholder = |fallback: String| Some(field.placeholder.clone().unwrap_or(fallback));

	match operator.shape() {
		ValueShape::Pair => match field.value_kind {
			SearchValueKind::Date => {
				let kind = DateRange::date();
				kind.widget(kind.default_placeholders(messages))
			}
			SearchValueKind::DateTime => {
				let kind = DateRange::datetime();
				kind.widget(kind.default_placeholders(messages))
			}
			SearchValueKind::Number => {
				let kind = NumberRange {
					min: field.min,
					max: field.max,
					step: field.step,
				};
				kind.widget(kind.default_placeholders(messages))
			}
			SearchValueKind::Text | SearchValueKind::Select => TextRange.widget(TextRange.default_placeholders(messages)),
		},
		ValueShape::List => match (&field.value_kind, &field.options) {
			(SearchValueKind::Select, Some(options)) => Widget::Select {
				placeholder: placeholder(messages.choose_placeholder(label)),
				options: options.clone(),
				mode: SelectMode::Multiple,
				allow_clear: true,
				show_search: false,
			},
			_ => Widget::Select {
				placeholder: Some(messages.tags_placeholder(label)),
				options: Vec::new(),
				mode: SelectMode::Tags,
				allow_clear: true,
				show_search: false,
			},
		},
		ValueShape::Scalar => match field.value_kind {
			SearchValueKind::Text => Widget::TextInput {
				placeholder: placeholder(messages.enter_placeholder(label)),
			},
			SearchValueKind::Number => Widget::NumberInput {
				placeholder: placeholder(messages.enter_placeholder(label)),
				min: field.min,
				max: field.max,
				step: field.step,
				precision: None,
			},
			SearchValueKind::Date => Widget::DatePicker {
				placeholder: placeholder(messages.choose_placeholder(label)),
				format: DEFAULT_DATE_FORMAT.to_string(),
			},
			SearchValueKind::DateTime => Widget::DateTimePicker {
				placeholder: placeholder(messages.choose_placeholder(label)),
				format: DEFAULT_DATETIME_FORMAT.to_string(),
			},
			SearchValueKind::Select => Widget::Select {
				placeholder: placeholder(messages.choose_placeholder(label)),
				options: field.options.clone().unwrap_or_default(),
				mode: SelectMode::Single,
				allow_clear: true,
				show_search: false,
			},
		},
	}
}

/// A search field ready for drawing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedSearchField {
	pub field: String,
	pub label: String,
	pub required: bool,
	pub operator: Operator,
	/// Operator selector; never clearable
	pub operator_widget: Widget,
	pub value: SearchValue,
	pub widget: Widget,
	pub error: Option<String>,
}

/// Operators and values of a set of search fields.
#[derive(Debug, Clone)]
pub struct SearchForm {
	fields: Vec<SearchFieldDescriptor>,
	values: SearchValues,
	errors: FieldErrors,
}

impl SearchForm {
	/// Create a form with every field on its default operator
	///
	/// # Examples
	///
	/// ```
	/// use steady_list::{Operator, SearchFieldDescriptor, SearchForm, SearchValue};
	/// use serde_json::json;
	///
	/// let mut form = SearchForm::new(vec![
	///     SearchFieldDescriptor::date("created_at", "Created").with_operators([Operator::Eq, Operator::Between]),
	/// ])
	/// .unwrap();
	///
	/// form.set_value("created_at", json!("2024-05-01")).unwrap();
	/// form.set_operator("created_at", Operator::Between).unwrap();
	/// assert_eq!(form.value("created_at"), Some(&SearchValue::Pair(json!(null), json!(null))));
	///
	/// // A scalar no longer fits
	/// assert!(form.set_value("created_at", json!("2024-05-01")).is_err());
	/// ```
	pub fn new(fields: Vec<SearchFieldDescriptor>) -> SearchResult<Self> {
		let mut seen = HashSet::new();
		for field in &fields {
			if !seen.insert(field.field.as_str()) {
				return Err(SearchError::DuplicateField(field.field.clone()));
			}
			if field.operators.is_empty() {
				return Err(SearchError::NoOperators(field.field.clone()));
			}
		}
		let values = initial_search_values(&fields);
		Ok(Self {
			fields,
			values,
			errors: FieldErrors::new(),
		})
	}

	pub fn fields(&self) -> &[SearchFieldDescriptor] {
		&self.fields
	}

	pub fn field(&self, name: &str) -> SearchResult<&SearchFieldDescriptor> {
		self.fields
			.iter()
			.find(|f| f.field == name)
			.ok_or_else(|| SearchError::UnknownField(name.to_string()))
	}

	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}

	pub fn has_required_fields(&self) -> bool {
		self.fields.iter().any(|f| f.required)
	}

	pub fn values(&self) -> &SearchValues {
		&self.values
	}

	pub fn operator(&self, name: &str) -> Option<Operator> {
		self.values.get(name).map(|e| e.operator)
	}

	pub fn value(&self, name: &str) -> Option<&SearchValue> {
		self.values.get(name).map(|e| &e.value)
	}

	/// Select an operator and clear the value to its empty shape
	pub fn set_operator(&mut self, name: &str, operator: Operator) -> SearchResult<()> {
		let field = self.field(name)?;
		if !field.allows(operator) {
			return Err(SearchError::OperatorNotAllowed {
				field: name.to_string(),
				operator,
			});
		}
		self.values.insert(name.to_string(), SearchEntry::new(operator));
		self.errors.remove(name);
		tracing::debug!(field = name, %operator, "search operator changed");
		Ok(())
	}

	/// Set the value of a field; `null` clears it
	pub fn set_value(&mut self, name: &str, raw: Value) -> SearchResult<()> {
		let field = self.field(name)?;
		let kind = field.value_kind;
		let operator = self.operator(name).unwrap_or_else(|| field.default_operator());
		let value = SearchValue::from_raw(kind, operator.shape(), raw).ok_or_else(|| SearchError::ShapeMismatch {
			field: name.to_string(),
			operator,
			expected: operator.shape(),
		})?;
		self.values.insert(name.to_string(), SearchEntry { operator, value });
		Ok(())
	}

	/// Back to default operators and empty values
	pub fn reset(&mut self) {
		self.values = initial_search_values(&self.fields);
		self.errors = FieldErrors::new();
	}

	pub fn validate(&self, messages: &Messages) -> Result<(), FieldErrors> {
		let mut errors = FieldErrors::new();
		for field in &self.fields {
			let entry = self
				.values
				.get(&field.field)
				.cloned()
				.unwrap_or_else(|| SearchEntry::new(field.default_operator()));
			if let Err(message) = check(field, &entry, messages) {
				errors.insert(field.field.clone(), message);
			}
		}
		if errors.is_empty() { Ok(()) } else { Err(errors) }
	}

	/// Validate and snapshot the values; errors are kept for rendering
	pub fn submit(&mut self, messages: &Messages) -> Result<SearchValues, FieldErrors> {
		match self.validate(messages) {
			Ok(()) => {
				self.errors = FieldErrors::new();
				Ok(self.values.clone())
			}
			Err(errors) => {
				self.errors = errors.clone();
				Err(errors)
			}
		}
	}

	pub fn errors(&self) -> &FieldErrors {
		&self.errors
	}

	pub fn filters(&self) -> Vec<SearchFilter> {
		build_search_filters(&self.fields, &self.values)
	}

	pub fn widget(&self, name: &str, messages: &Messages) -> SearchResult<Widget> {
		let field = self.field(name)?;
		let operator = self.operator(name).unwrap_or_else(|| field.default_operator());
		Ok(search_widget(field, operator, messages))
	}

	pub fn render(&self, messages: &Messages) -> Vec<RenderedSearchField> {
		let locale = messages.locale();
		self.fields
			.iter()
			.map(|field| {
				let entry = self
					.values
					.get(&field.field)
					.cloned()
					.unwrap_or_else(|| SearchEntry::new(field.default_operator()));
				RenderedSearchField {
					field: field.field.clone(),
					label: field.label.clone(),
					required: field.required,
					operator: entry.operator,
					operator_widget: Widget::Select {
						placeholder: Some(messages.operator_placeholder().to_string()),
						options: field.operators.iter().map(|op| op.choice(locale)).collect(),
						mode: SelectMode::Single,
						allow_clear: false,
						show_search: false,
					},
					widget: search_widget(field, entry.operator, messages),
					value: entry.value,
					error: self.errors.get(&field.field).map(str::to_string),
				}
			})
			.collect()
	}
}
