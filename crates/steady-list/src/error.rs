//! Error types of the list engine

use crate::operator::{Operator, ValueShape};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
	#[error("Duplicate search field: {0}")]
	DuplicateField(String),
	#[error("Duplicate column key: {0}")]
	DuplicateColumn(String),
	#[error("Search field `{0}` allows no operators")]
	NoOperators(String),
	#[error("Unknown search field: {0}")]
	UnknownField(String),
	#[error("Unknown operator: {0}")]
	UnknownOperator(String),
	#[error("Operator `{operator}` is not allowed for search field `{field}`")]
	OperatorNotAllowed { field: String, operator: Operator },
	#[error("Search field `{field}` expects a {expected} value for operator `{operator}`")]
	ShapeMismatch {
		field: String,
		operator: Operator,
		expected: ValueShape,
	},
	#[error("Unknown row action: {0}")]
	UnknownAction(String),
}

pub type SearchResult<T> = Result<T, SearchError>;
