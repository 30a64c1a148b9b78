//! Wire types exchanged with the caller's search backend

use crate::operator::Operator;
use serde::{Deserialize, Serialize};
use std::fmt;
use steady_core::Value;

/// One resolved `(field, operator, value)` condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchFilter {
	pub field: String,
	pub operator: Operator,
	pub value: Value,
	pub required: bool,
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
	Asc,
	Desc,
}

impl SortDirection {
	/// Returns the opposite direction
	pub fn toggle(&self) -> Self {
		match self {
			Self::Asc => Self::Desc,
			Self::Desc => Self::Asc,
		}
	}
}

/// Active sort of the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
	pub field: String,
	pub direction: SortDirection,
}

impl Sort {
	pub fn asc(field: impl Into<String>) -> Self {
		Self {
			field: field.into(),
			direction: SortDirection::Asc,
		}
	}

	pub fn desc(field: impl Into<String>) -> Self {
		Self {
			field: field.into(),
			direction: SortDirection::Desc,
		}
	}

	/// Parses a sort from a query parameter
	///
	/// A leading `-` means descending.
	///
	/// # Examples
	///
	/// ```
	/// use steady_list::{Sort, SortDirection};
	///
	/// assert_eq!(Sort::parse_from_query("-price"), Some(Sort::desc("price")));
	/// assert_eq!(Sort::parse_from_query("name").map(|s| s.direction), Some(SortDirection::Asc));
	/// assert_eq!(Sort::parse_from_query(""), None);
	/// ```
	pub fn parse_from_query(s: &str) -> Option<Self> {
		let s = s.trim();
		let sort = match s.strip_prefix('-') {
			Some(field) => Self::desc(field),
			None => Self::asc(s),
		};
		(!sort.field.is_empty()).then_some(sort)
	}
}

/// Normalized search request handed to the caller.
///
/// `page` is zero-based.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
	pub page: usize,
	pub page_size: usize,
	pub filters: Vec<SearchFilter>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub sort_field: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub sort_direction: Option<SortDirection>,
}

impl SearchRequest {
	pub fn new(page: usize, page_size: usize, filters: Vec<SearchFilter>, sort: Option<&Sort>) -> Self {
		Self {
			page,
			page_size,
			filters,
			sort_field: sort.map(|s| s.field.clone()),
			sort_direction: sort.map(|s| s.direction),
		}
	}

	pub fn filter(&self, field: &str) -> Option<&SearchFilter> {
		self.filters.iter().find(|f| f.field == field)
	}
}

/// One page of results as returned by a search backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T = Value> {
	pub data: Vec<T>,
	pub total: usize,
	pub page: usize,
	pub page_size: usize,
	pub total_pages: usize,
}

impl<T> PaginatedResponse<T> {
	/// Build a page, deriving `total_pages`
	///
	/// # Examples
	///
	/// ```
	/// use steady_list::PaginatedResponse;
	///
	/// let page = PaginatedResponse::new(vec![1, 2, 3], 23, 0, 10);
	/// assert_eq!(page.total_pages, 3);
	/// ```
	pub fn new(data: Vec<T>, total: usize, page: usize, page_size: usize) -> Self {
		let total_pages = if total == 0 || page_size == 0 {
			0
		} else {
			total.div_ceil(page_size)
		};
		Self {
			data,
			total,
			page,
			page_size,
			total_pages,
		}
	}
}

/// Sequence number of an emitted search request.
///
/// Only the response to the most recent ticket is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchTicket(u64);

impl SearchTicket {
	pub(crate) fn new(sequence: u64) -> Self {
		Self(sequence)
	}

	pub fn sequence(&self) -> u64 {
		self.0
	}
}

impl fmt::Display for SearchTicket {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}

/// A request together with the ticket its response must carry.
#[derive(Debug, Clone, PartialEq)]
pub struct IssuedSearch {
	pub ticket: SearchTicket,
	pub request: SearchRequest,
}
