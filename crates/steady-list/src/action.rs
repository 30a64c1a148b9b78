//! Row actions and the header create button

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use steady_core::Value;

/// Visual style of an action button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonStyle {
	Default,
	Primary,
	Dashed,
	#[default]
	Text,
	Link,
}

pub type RowHandler = Arc<dyn Fn(&Value) + Send + Sync>;
pub type RowPredicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// An operation offered on every table row.
///
/// Destructive actions are confirmed by the user before the handler runs.
///
/// # Examples
///
/// ```
/// use steady_list::RowAction;
/// use serde_json::json;
///
/// let publish = RowAction::new("publish", "Publish", |_row| {})
///     .visible_when(|row| row["published"] == json!(false));
///
/// assert!(publish.is_visible(&json!({"published": false})));
/// assert!(!publish.is_visible(&json!({"published": true})));
/// ```
#[derive(Clone)]
pub struct RowAction {
	pub key: String,
	pub label: String,
	pub style: ButtonStyle,
	pub destructive: bool,
	handler: RowHandler,
	visible: Option<RowPredicate>,
}

impl RowAction {
	pub fn new<F>(key: impl Into<String>, label: impl Into<String>, handler: F) -> Self
	where
		F: Fn(&Value) + Send + Sync + 'static,
	{
		Self {
			key: key.into(),
			label: label.into(),
			style: ButtonStyle::default(),
			destructive: false,
			handler: Arc::new(handler),
			visible: None,
		}
	}

	pub fn with_style(mut self, style: ButtonStyle) -> Self {
		self.style = style;
		self
	}

	/// Require confirmation before running
	pub fn destructive(mut self) -> Self {
		self.destructive = true;
		self
	}

	pub fn visible_when<F>(mut self, predicate: F) -> Self
	where
		F: Fn(&Value) -> bool + Send + Sync + 'static,
	{
		self.visible = Some(Arc::new(predicate));
		self
	}

	pub fn is_visible(&self, row: &Value) -> bool {
		self.visible.as_ref().is_none_or(|visible| visible(row))
	}

	pub(crate) fn run(&self, row: &Value) {
		(self.handler)(row)
	}
}

impl fmt::Debug for RowAction {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RowAction")
			.field("key", &self.key)
			.field("label", &self.label)
			.field("style", &self.style)
			.field("destructive", &self.destructive)
			.finish_non_exhaustive()
	}
}

/// What happened when a row action was triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
	/// The handler ran
	Performed,
	/// The user declined the confirmation
	Declined,
	/// The action is hidden for this row
	Hidden,
}

/// Header button that opens the create screen.
#[derive(Clone)]
pub struct CreateAction {
	pub text: String,
	handler: Arc<dyn Fn() + Send + Sync>,
}

impl CreateAction {
	pub fn new<F>(text: impl Into<String>, handler: F) -> Self
	where
		F: Fn() + Send + Sync + 'static,
	{
		Self {
			text: text.into(),
			handler: Arc::new(handler),
		}
	}

	pub fn trigger(&self) {
		(self.handler)()
	}
}

impl fmt::Debug for CreateAction {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("CreateAction")
			.field("text", &self.text)
			.finish_non_exhaustive()
	}
}

/// An action button as drawn in one row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionButton {
	pub key: String,
	/// Tooltip text
	pub label: String,
	pub style: ButtonStyle,
	pub danger: bool,
}

impl From<&RowAction> for ActionButton {
	fn from(action: &RowAction) -> Self {
		Self {
			key: action.key.clone(),
			label: action.label.clone(),
			style: action.style,
			danger: action.destructive,
		}
	}
}
