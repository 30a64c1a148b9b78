//! Validation rules and schemas
//!
//! A [`ValidationSchema`] maps field names to [`Rule`]s. Schemas are either
//! supplied by the caller as-is, or derived from a [`FieldSet`]: fields with
//! an explicit rule keep it, other required fields get the default rule of
//! their kind, and everything else is unconstrained.

use crate::descriptor::{FieldDescriptor, FieldKind, FieldSet};
use crate::error::FieldErrors;
use indexmap::IndexMap;
use regex::Regex;
use std::fmt;
use std::sync::{Arc, LazyLock};
use steady_core::{Messages, Value, ValueMap, is_blank};

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("EMAIL_REGEX: invalid regex pattern")
});

/// Closure check: receives the field value and the whole value map.
pub type CustomCheck = Arc<dyn Fn(&Value, &ValueMap) -> Result<(), String> + Send + Sync>;

/// Numeric reading of a loosely typed value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Numeric {
	/// `null` or an empty/whitespace string
	Blank,
	Number(f64),
	/// Anything that does not read as a finite number
	Invalid,
}

/// Read a number from a JSON number or a numeric string
///
/// # Examples
///
/// ```
/// use steady_forms::schema::{Numeric, numeric};
/// use serde_json::json;
///
/// assert_eq!(numeric(&json!(12)), Numeric::Number(12.0));
/// assert_eq!(numeric(&json!(" 3.5 ")), Numeric::Number(3.5));
/// assert_eq!(numeric(&json!("")), Numeric::Blank);
/// assert_eq!(numeric(&json!("abc")), Numeric::Invalid);
/// ```
pub fn numeric(value: &Value) -> Numeric {
	match value {
		Value::Null => Numeric::Blank,
		Value::Number(n) => n.as_f64().map_or(Numeric::Invalid, Numeric::Number),
		Value::String(s) if s.trim().is_empty() => Numeric::Blank,
		Value::String(s) => match s.trim().parse::<f64>() {
			Ok(n) if n.is_finite() => Numeric::Number(n),
			_ => Numeric::Invalid,
		},
		_ => Numeric::Invalid,
	}
}

/// A validation rule for one field.
#[derive(Clone)]
pub enum Rule {
	/// Not `null` and not the empty string
	NonBlank,
	/// Parses as a number within the optional bounds
	Number {
		required: bool,
		min: Option<f64>,
		max: Option<f64>,
	},
	/// An array with at least one element
	NonEmptyList,
	/// Exactly `true`
	Accepted,
	/// Anything but `null`
	Present,
	MinLength(usize),
	MaxLength(usize),
	Pattern {
		regex: Regex,
		message: Option<String>,
	},
	Email,
	/// Every rule must pass; the first failure is reported
	All(Vec<Rule>),
	Custom(CustomCheck),
}

impl fmt::Debug for Rule {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::NonBlank => f.write_str("NonBlank"),
			Self::Number { required, min, max } => f
				.debug_struct("Number")
				.field("required", required)
				.field("min", min)
				.field("max", max)
				.finish(),
			Self::NonEmptyList => f.write_str("NonEmptyList"),
			Self::Accepted => f.write_str("Accepted"),
			Self::Present => f.write_str("Present"),
			Self::MinLength(n) => f.debug_tuple("MinLength").field(n).finish(),
			Self::MaxLength(n) => f.debug_tuple("MaxLength").field(n).finish(),
			Self::Pattern { regex, message } => f
				.debug_struct("Pattern")
				.field("regex", &regex.as_str())
				.field("message", message)
				.finish(),
			Self::Email => f.write_str("Email"),
			Self::All(rules) => f.debug_tuple("All").field(rules).finish(),
			Self::Custom(_) => f.write_str("Custom(..)"),
		}
	}
}

impl Rule {
	/// Optional number range; blank values pass
	pub fn number_range(min: Option<f64>, max: Option<f64>) -> Self {
		Self::Number {
			required: false,
			min,
			max,
		}
	}

	/// Regex rule with the default "is invalid" message
	pub fn pattern(regex: Regex) -> Self {
		Self::Pattern {
			regex,
			message: None,
		}
	}

	pub fn pattern_with_message(regex: Regex, message: impl Into<String>) -> Self {
		Self::Pattern {
			regex,
			message: Some(message.into()),
		}
	}

	/// Closure rule
	///
	/// # Examples
	///
	/// ```
	/// use steady_forms::Rule;
	/// use steady_core::{Locale, Messages, ValueMap};
	/// use serde_json::json;
	///
	/// let rule = Rule::custom(|value, _| match value.as_str() {
	///     Some(s) if s.starts_with("SKU-") => Ok(()),
	///     _ => Err("SKU must start with SKU-".to_string()),
	/// });
	///
	/// let messages = Messages::new(Locale::En);
	/// let values = ValueMap::new();
	/// assert!(rule.check("SKU", &json!("SKU-1"), &values, &messages).is_ok());
	/// assert!(rule.check("SKU", &json!("1"), &values, &messages).is_err());
	/// ```
	pub fn custom<F>(check: F) -> Self
	where
		F: Fn(&Value, &ValueMap) -> Result<(), String> + Send + Sync + 'static,
	{
		Self::Custom(Arc::new(check))
	}

	/// Default rule of a required field of the given kind
	pub fn required_for(kind: &FieldKind) -> Self {
		match kind {
			FieldKind::Text
			| FieldKind::Password
			| FieldKind::TextArea { .. }
			| FieldKind::Date { .. }
			| FieldKind::DateTime { .. }
			| FieldKind::Radio { .. } => Self::NonBlank,
			FieldKind::Select { mode, .. } if mode.is_multi() => Self::NonEmptyList,
			FieldKind::Select { .. } => Self::NonBlank,
			FieldKind::Number { min, max, .. } => Self::Number {
				required: true,
				min: *min,
				max: *max,
			},
			FieldKind::CheckboxGroup { .. } => Self::NonEmptyList,
			FieldKind::Checkbox { .. } => Self::Accepted,
			FieldKind::Custom { .. } => Self::Present,
		}
	}

	/// Check `value`, returning the first error message
	pub fn check(
		&self,
		label: &str,
		value: &Value,
		values: &ValueMap,
		messages: &Messages,
	) -> Result<(), String> {
		match self {
			Self::NonBlank => {
				if is_blank(value) {
					Err(messages.required(label))
				} else {
					Ok(())
				}
			}
			Self::Number { required, min, max } => match numeric(value) {
				Numeric::Blank if *required => Err(messages.required(label)),
				Numeric::Blank => Ok(()),
				Numeric::Invalid => Err(messages.invalid_number().to_string()),
				Numeric::Number(n) => {
					if let Some(min) = min
						&& n < *min
					{
						return Err(messages.min_value(*min));
					}
					if let Some(max) = max
						&& n > *max
					{
						return Err(messages.max_value(*max));
					}
					Ok(())
				}
			},
			Self::NonEmptyList => match value {
				Value::Array(items) if !items.is_empty() => Ok(()),
				_ => Err(messages.required(label)),
			},
			Self::Accepted => match value {
				Value::Bool(true) => Ok(()),
				_ => Err(messages.required(label)),
			},
			Self::Present => {
				if value.is_null() {
					Err(messages.required(label))
				} else {
					Ok(())
				}
			}
			Self::MinLength(min) => match length_of(value) {
				Some(len) if len > 0 && len < *min => Err(messages.min_length(label, *min)),
				_ => Ok(()),
			},
			Self::MaxLength(max) => match length_of(value) {
				Some(len) if len > *max => Err(messages.max_length(label, *max)),
				_ => Ok(()),
			},
			Self::Pattern { regex, message } => match value {
				Value::String(s) if !s.is_empty() && !regex.is_match(s) => Err(message
					.clone()
					.unwrap_or_else(|| messages.invalid_format(label))),
				_ => Ok(()),
			},
			Self::Email => match value {
				Value::String(s) if !s.is_empty() && !EMAIL_REGEX.is_match(s) => {
					Err(messages.invalid_email().to_string())
				}
				_ => Ok(()),
			},
			Self::All(rules) => rules
				.iter()
				.try_for_each(|rule| rule.check(label, value, values, messages)),
			Self::Custom(check) => check(value, values),
		}
	}
}

fn length_of(value: &Value) -> Option<usize> {
	match value {
		Value::String(s) => Some(s.chars().count()),
		Value::Array(items) => Some(items.len()),
		_ => None,
	}
}

#[derive(Debug, Clone)]
struct FieldRule {
	label: String,
	rule: Rule,
}

/// Field name → rule mapping.
#[derive(Debug, Clone, Default)]
pub struct ValidationSchema {
	rules: IndexMap<String, FieldRule>,
}

impl ValidationSchema {
	pub fn new() -> Self {
		Self::default()
	}

	/// Add a rule; `label` names the field in messages
	pub fn with_rule(mut self, field: impl Into<String>, label: impl Into<String>, rule: Rule) -> Self {
		self.rules.insert(
			field.into(),
			FieldRule {
				label: label.into(),
				rule,
			},
		);
		self
	}

	/// Derive a schema from descriptors
	///
	/// # Examples
	///
	/// ```
	/// use steady_forms::{FieldDescriptor, FieldSet, Rule, ValidationSchema};
	///
	/// let fields = FieldSet::new(vec![
	///     FieldDescriptor::text("name").required(),
	///     FieldDescriptor::text("note"),
	///     FieldDescriptor::text("email").with_validation(Rule::Email),
	/// ])
	/// .unwrap();
	///
	/// let schema = ValidationSchema::derive(&fields);
	/// assert!(matches!(schema.rule_for("name"), Some(Rule::NonBlank)));
	/// assert!(schema.rule_for("note").is_none());
	/// assert!(matches!(schema.rule_for("email"), Some(Rule::Email)));
	/// ```
	pub fn derive(fields: &FieldSet) -> Self {
		fields
			.iter()
			.filter_map(|field| derive_rule(field).map(|rule| (field, rule)))
			.fold(Self::new(), |schema, (field, rule)| {
				schema.with_rule(&field.name, field.display_label(), rule)
			})
	}

	pub fn rule_for(&self, field: &str) -> Option<&Rule> {
		self.rules.get(field).map(|r| &r.rule)
	}

	pub fn is_empty(&self) -> bool {
		self.rules.is_empty()
	}

	pub fn len(&self) -> usize {
		self.rules.len()
	}

	/// Validate one field; a missing value counts as `null`
	pub fn validate_field(&self, field: &str, values: &ValueMap, messages: &Messages) -> Option<String> {
		let entry = self.rules.get(field)?;
		let value = values.get(field).unwrap_or(&Value::Null);
		entry.rule.check(&entry.label, value, values, messages).err()
	}

	/// Validate every field with a rule
	pub fn validate(&self, values: &ValueMap, messages: &Messages) -> Result<(), FieldErrors> {
		let mut errors = FieldErrors::new();
		for (field, entry) in &self.rules {
			let value = values.get(field).unwrap_or(&Value::Null);
			if let Err(message) = entry.rule.check(&entry.label, value, values, messages) {
				errors.insert(field.clone(), message);
			}
		}
		if errors.is_empty() { Ok(()) } else { Err(errors) }
	}
}

fn derive_rule(field: &FieldDescriptor) -> Option<Rule> {
	match (&field.validation, field.required) {
		(Some(rule), _) => Some(rule.clone()),
		(None, true) => Some(Rule::required_for(&field.kind)),
		(None, false) => None,
	}
}
