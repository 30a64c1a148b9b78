//! Error types of the form engine

use indexmap::IndexMap;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
	#[error("Duplicate field name: {0}")]
	DuplicateField(String),
	#[error("Unknown field: {0}")]
	UnknownField(String),
	#[error("A submission is already in progress")]
	Busy,
}

pub type FormResult<T> = Result<T, FormError>;

/// Validation errors keyed by field name, first message per field.
///
/// Fields appear in the order they failed, which follows descriptor order.
///
/// # Examples
///
/// ```
/// use steady_forms::FieldErrors;
///
/// let mut errors = FieldErrors::new();
/// errors.insert("name", "Name is required");
/// errors.insert("name", "ignored, the first message wins");
///
/// assert_eq!(errors.get("name"), Some("Name is required"));
/// assert_eq!(errors.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{} field(s) failed validation", .0.len())]
#[serde(transparent)]
pub struct FieldErrors(IndexMap<String, String>);

impl FieldErrors {
	pub fn new() -> Self {
		Self::default()
	}

	/// Record `message` for `field` unless it already has one
	pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
		self.0.entry(field.into()).or_insert_with(|| message.into());
	}

	pub fn remove(&mut self, field: &str) -> Option<String> {
		self.0.shift_remove(field)
	}

	pub fn get(&self, field: &str) -> Option<&str> {
		self.0.get(field).map(String::as_str)
	}

	pub fn contains(&self, field: &str) -> bool {
		self.0.contains_key(field)
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}

	pub fn fields(&self) -> impl Iterator<Item = &str> {
		self.0.keys().map(String::as_str)
	}
}
