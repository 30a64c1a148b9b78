//! List/search engine
//!
//! A list screen is described by [`ColumnDescriptor`]s, [`SearchFieldDescriptor`]s
//! and [`RowAction`]s. The [`ListEngine`] turns them into:
//!
//! - a search form where each field has an [`Operator`] and a value shaped by
//!   it (scalar, `[from, to]` pair or list)
//! - normalized [`SearchRequest`]s with filters, sort and a zero-based page
//! - a table view with formatted cells, per-row actions and a pager
//!
//! Data is never fetched or sliced here: requests go out through a
//! [`SearchHandler`] (or a [`SearchService`] via [`ListEngine::run`]) and
//! pages of results come back through [`ListEngine::receive`].
//!
//! ## Example
//!
//! ```
//! use steady_list::{
//!     ColumnDescriptor, ListEngine, Operator, PaginatedResponse, SearchFieldDescriptor,
//!     SearchOutcome, Sort, search_fn,
//! };
//! use serde_json::json;
//!
//! let engine = ListEngine::new(
//!     vec![ColumnDescriptor::new("name", "Name").sortable()],
//!     vec![
//!         SearchFieldDescriptor::text("name", "Name"),
//!         SearchFieldDescriptor::number("price", "Price").with_operators([Operator::Between]),
//!     ],
//!     search_fn(|ticket, request| println!("{ticket}: {} filter(s)", request.filters.len())),
//! )
//! .unwrap();
//!
//! engine.set_value("price", json!([100, 500])).unwrap();
//! let issued = match engine.submit_search() {
//!     SearchOutcome::Issued(issued) => issued,
//!     SearchOutcome::Invalid(errors) => panic!("{errors}"),
//! };
//! assert_eq!(issued.request.filters[0].value, json!([100, 500]));
//!
//! // Sorting re-sends the submitted filters from page 0
//! let sorted = engine.change_sort(Some(Sort::desc("name"))).unwrap();
//! assert_eq!(sorted.request.filters, issued.request.filters);
//!
//! // Only the latest ticket is applied
//! assert!(!engine.receive(issued.ticket, PaginatedResponse::new(vec![], 0, 0, 10)));
//! assert!(engine.receive(sorted.ticket, PaginatedResponse::new(vec![json!({"id": 1, "name": "A"})], 1, 0, 10)));
//! ```

pub mod action;
pub mod column;
pub mod engine;
pub mod error;
pub mod format;
pub mod operator;
pub mod request;
pub mod search;
pub mod search_field;

pub use action::{ActionButton, ActionOutcome, ButtonStyle, CreateAction, RowAction};
pub use column::{CellRenderer, ColumnDescriptor, ColumnKind};
pub use engine::{
	ColumnView, ListBody, ListEngine, ListView, PagerView, RowView, SearchHandler, SearchOutcome,
	SearchPanel, SearchService, TableView, search_fn,
};
pub use error::{SearchError, SearchResult};
pub use format::DisplayFormatter;
pub use operator::{DEFAULT_OPERATORS, Operator, ValueShape};
pub use request::{
	IssuedSearch, PaginatedResponse, SearchFilter, SearchRequest, SearchTicket, Sort, SortDirection,
};
pub use search::{
	RenderedSearchField, SearchEntry, SearchForm, SearchValue, SearchValues, build_search_filters,
	initial_search_values, search_widget,
};
pub use search_field::{SearchFieldDescriptor, SearchValueKind};
