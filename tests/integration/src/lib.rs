//! Shared scenario fixtures for the cross-crate tests

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::json;
use steady::list::{PaginatedResponse, SearchRequest, SearchService};
use steady::{HandlerError, Value};

/// In-memory product store answering list searches.
///
/// Filters on a `name` substring and sorts ascending by `price` when asked.
pub struct Catalog {
	pub products: Mutex<Vec<Value>>,
}

impl Catalog {
	pub fn new() -> Self {
		Self {
			products: Mutex::new(vec![
				json!({"id": 1, "name": "Desk lamp", "price": 250000, "published": true}),
				json!({"id": 2, "name": "Standing desk", "price": 4500000, "published": false}),
				json!({"id": 3, "name": "Lamp shade", "price": 90000, "published": true}),
			]),
		}
	}
}

impl Default for Catalog {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl SearchService for Catalog {
	async fn search(&self, request: &SearchRequest) -> Result<PaginatedResponse, HandlerError> {
		let needle = request
			.filter("name")
			.and_then(|f| f.value.as_str())
			.map(str::to_lowercase);
		let mut rows: Vec<Value> = self
			.products
			.lock()
			.iter()
			.filter(|p| {
				needle
					.as_deref()
					.is_none_or(|n| p["name"].as_str().is_some_and(|name| name.to_lowercase().contains(n)))
			})
			.cloned()
			.collect();
		if request.sort_field.as_deref() == Some("price") {
			rows.sort_by_key(|p| p["price"].as_i64());
		}
		let total = rows.len();
		Ok(PaginatedResponse::new(rows, total, request.page, request.page_size))
	}
}
