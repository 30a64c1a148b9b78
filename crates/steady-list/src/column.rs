//! Table column descriptors

use crate::format::DisplayFormatter;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use steady_core::{Messages, Value};

/// How a column's raw value is displayed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
	#[default]
	Text,
	Date,
	DateTime,
	Boolean,
	Number,
	Currency,
}

static NULL: Value = Value::Null;

/// Custom cell renderer, called with the cell value and the whole row.
pub type CellRenderer = Arc<dyn Fn(&Value, &Value) -> String + Send + Sync>;

/// Declarative configuration of one table column.
///
/// # Examples
///
/// ```
/// use steady_list::{ColumnDescriptor, ColumnKind, DisplayFormatter};
/// use steady_core::Messages;
/// use serde_json::json;
///
/// let price = ColumnDescriptor::new("price", "Price").with_kind(ColumnKind::Currency).sortable();
/// let row = json!({"id": 1, "price": 250000});
///
/// assert_eq!(price.cell(&row, &DisplayFormatter::default(), &Messages::default()), "250.000 VND");
/// ```
#[derive(Clone)]
pub struct ColumnDescriptor {
	pub key: String,
	pub title: String,
	/// Row key the value is read from
	pub data_index: String,
	pub kind: Option<ColumnKind>,
	pub sortable: bool,
	pub width: Option<u32>,
	renderer: Option<CellRenderer>,
}

impl ColumnDescriptor {
	/// Column reading the row key of the same name
	pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
		let key = key.into();
		Self {
			data_index: key.clone(),
			key,
			title: title.into(),
			kind: None,
			sortable: false,
			width: None,
			renderer: None,
		}
	}

	pub fn with_data_index(mut self, data_index: impl Into<String>) -> Self {
		self.data_index = data_index.into();
		self
	}

	pub fn with_kind(mut self, kind: ColumnKind) -> Self {
		self.kind = Some(kind);
		self
	}

	pub fn sortable(mut self) -> Self {
		self.sortable = true;
		self
	}

	pub fn with_width(mut self, width: u32) -> Self {
		self.width = Some(width);
		self
	}

	pub fn with_renderer<F>(mut self, renderer: F) -> Self
	where
		F: Fn(&Value, &Value) -> String + Send + Sync + 'static,
	{
		self.renderer = Some(Arc::new(renderer));
		self
	}

	pub fn has_renderer(&self) -> bool {
		self.renderer.is_some()
	}

	/// Raw value of this column in `row`
	pub fn value<'a>(&self, row: &'a Value) -> &'a Value {
		row.get(&self.data_index).unwrap_or(&NULL)
	}

	/// Display text of this column in `row`
	pub fn cell(&self, row: &Value, formatter: &DisplayFormatter, messages: &Messages) -> String {
		let value = self.value(row);
		match &self.renderer {
			Some(render) => render(value, row),
			None => formatter.format(self.kind.unwrap_or_default(), value, messages),
		}
	}
}

impl fmt::Debug for ColumnDescriptor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ColumnDescriptor")
			.field("key", &self.key)
			.field("title", &self.title)
			.field("data_index", &self.data_index)
			.field("kind", &self.kind)
			.field("sortable", &self.sortable)
			.field("width", &self.width)
			.field("renderer", &self.renderer.is_some())
			.finish()
	}
}
