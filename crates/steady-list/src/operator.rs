//! Search operators and the value shape each one expects

use crate::error::SearchError;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;
use std::str::FromStr;
use steady_core::{ChoiceOption, Locale, Value};

/// Comparison or matching mode of one search field.
///
/// Serialized lowercase, as the backend expects (`notlike`, `notin`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
	Eq,
	Ne,
	Like,
	NotLike,
	In,
	NotIn,
	Between,
	Gt,
	Gte,
	Lt,
	Lte,
}

/// Operators offered when a search field does not list its own.
pub const DEFAULT_OPERATORS: [Operator; 4] = [Operator::Eq, Operator::Ne, Operator::Like, Operator::NotLike];

impl Operator {
	pub const ALL: [Operator; 11] = [
		Self::Eq,
		Self::Ne,
		Self::Like,
		Self::NotLike,
		Self::In,
		Self::NotIn,
		Self::Between,
		Self::Gt,
		Self::Gte,
		Self::Lt,
		Self::Lte,
	];

	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Eq => "eq",
			Self::Ne => "ne",
			Self::Like => "like",
			Self::NotLike => "notlike",
			Self::In => "in",
			Self::NotIn => "notin",
			Self::Between => "between",
			Self::Gt => "gt",
			Self::Gte => "gte",
			Self::Lt => "lt",
			Self::Lte => "lte",
		}
	}

	pub fn label(&self, locale: Locale) -> &'static str {
		match locale {
			Locale::Vi => match self {
				Self::Eq => "Bằng",
				Self::Ne => "Không bằng",
				Self::Like => "Chứa",
				Self::NotLike => "Không chứa",
				Self::In => "Trong danh sách",
				Self::NotIn => "Không trong danh sách",
				Self::Between => "Trong khoảng",
				Self::Gt => "Lớn hơn",
				Self::Gte => "Lớn hơn hoặc bằng",
				Self::Lt => "Nhỏ hơn",
				Self::Lte => "Nhỏ hơn hoặc bằng",
			},
			Locale::En => match self {
				Self::Eq => "Equals",
				Self::Ne => "Not equal",
				Self::Like => "Contains",
				Self::NotLike => "Does not contain",
				Self::In => "In list",
				Self::NotIn => "Not in list",
				Self::Between => "Between",
				Self::Gt => "Greater than",
				Self::Gte => "Greater than or equal",
				Self::Lt => "Less than",
				Self::Lte => "Less than or equal",
			},
		}
	}

	/// Shape of the value this operator compares against
	///
	/// # Examples
	///
	/// ```
	/// use steady_list::{Operator, ValueShape};
	///
	/// assert_eq!(Operator::Between.shape(), ValueShape::Pair);
	/// assert_eq!(Operator::NotIn.shape(), ValueShape::List);
	/// assert_eq!(Operator::Like.shape(), ValueShape::Scalar);
	/// ```
	pub fn shape(&self) -> ValueShape {
		match self {
			Self::Between => ValueShape::Pair,
			Self::In | Self::NotIn => ValueShape::List,
			_ => ValueShape::Scalar,
		}
	}

	/// Selector option for this operator
	pub fn choice(&self, locale: Locale) -> ChoiceOption {
		ChoiceOption::new(self.as_str(), self.label(locale))
	}
}

impl fmt::Display for Operator {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Operator {
	type Err = SearchError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let s = s.trim();
		Self::ALL
			.into_iter()
			.find(|op| op.as_str().eq_ignore_ascii_case(s))
			.ok_or_else(|| SearchError::UnknownOperator(s.to_string()))
	}
}

/// Scalar, `[from, to]` pair or list of selections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueShape {
	Scalar,
	Pair,
	List,
}

impl ValueShape {
	/// Value held right after the operator changed
	pub fn empty(&self) -> Value {
		match self {
			Self::Scalar => Value::Null,
			Self::Pair => json!([null, null]),
			Self::List => json!([]),
		}
	}
}

impl fmt::Display for ValueShape {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::Scalar => "scalar",
			Self::Pair => "[from, to]",
			Self::List => "list",
		})
	}
}
