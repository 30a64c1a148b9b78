//! Search field descriptors

use crate::operator::{DEFAULT_OPERATORS, Operator};
use serde::{Deserialize, Serialize};
use steady_core::ChoiceOption;

/// Kind of value a search field compares.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchValueKind {
	#[default]
	Text,
	Date,
	DateTime,
	Select,
	Number,
}

/// Declarative configuration of one search field.
///
/// At runtime each descriptor expands into an operator selector and a value
/// holder whose shape follows the selected operator.
///
/// # Examples
///
/// ```
/// use steady_list::{Operator, SearchFieldDescriptor};
///
/// let price = SearchFieldDescriptor::number("price", "Price")
///     .with_operators([Operator::Between, Operator::Gte])
///     .with_min(0.0);
///
/// assert_eq!(price.default_operator(), Operator::Between);
/// assert!(!price.allows(Operator::Like));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFieldDescriptor {
	pub field: String,
	pub label: String,
	pub value_kind: SearchValueKind,
	/// Allowed operators, first one selected by default. A search form
	/// refuses a field whose list is empty.
	pub operators: Vec<Operator>,
	pub required: bool,
	pub options: Option<Vec<ChoiceOption>>,
	pub placeholder: Option<String>,
	pub min: Option<f64>,
	pub max: Option<f64>,
	pub step: Option<f64>,
}

impl SearchFieldDescriptor {
	pub fn new(field: impl Into<String>, label: impl Into<String>, value_kind: SearchValueKind) -> Self {
		Self {
			field: field.into(),
			label: label.into(),
			value_kind,
			operators: DEFAULT_OPERATORS.to_vec(),
			required: false,
			options: None,
			placeholder: None,
			min: None,
			max: None,
			step: None,
		}
	}

	pub fn text(field: impl Into<String>, label: impl Into<String>) -> Self {
		Self::new(field, label, SearchValueKind::Text)
	}

	pub fn date(field: impl Into<String>, label: impl Into<String>) -> Self {
		Self::new(field, label, SearchValueKind::Date)
	}

	pub fn datetime(field: impl Into<String>, label: impl Into<String>) -> Self {
		Self::new(field, label, SearchValueKind::DateTime)
	}

	pub fn number(field: impl Into<String>, label: impl Into<String>) -> Self {
		Self::new(field, label, SearchValueKind::Number)
	}

	pub fn select(field: impl Into<String>, label: impl Into<String>, options: Vec<ChoiceOption>) -> Self {
		Self::new(field, label, SearchValueKind::Select).with_options(options)
	}

	/// Replace the allowed operators; an empty list keeps the current ones
	pub fn with_operators(mut self, operators: impl IntoIterator<Item = Operator>) -> Self {
		let mut allowed: Vec<Operator> = Vec::new();
		for op in operators {
			if !allowed.contains(&op) {
				allowed.push(op);
			}
		}
		if !allowed.is_empty() {
			self.operators = allowed;
		}
		self
	}

	pub fn required(mut self) -> Self {
		self.required = true;
		self
	}

	pub fn with_options(mut self, options: Vec<ChoiceOption>) -> Self {
		self.options = Some(options);
		self
	}

	pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
		self.placeholder = Some(placeholder.into());
		self
	}

	pub fn with_min(mut self, min: f64) -> Self {
		self.min = Some(min);
		self
	}

	pub fn with_max(mut self, max: f64) -> Self {
		self.max = Some(max);
		self
	}

	pub fn with_step(mut self, step: f64) -> Self {
		self.step = Some(step);
		self
	}

	pub fn default_operator(&self) -> Operator {
		self.operators.first().copied().unwrap_or(Operator::Eq)
	}

	pub fn allows(&self, operator: Operator) -> bool {
		self.operators.contains(&operator)
	}
}
