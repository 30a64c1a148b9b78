//! The list engine
//!
//! [`ListEngine`] owns the search form, the submitted search, sort and
//! pagination state, and the rows of the current page. Requests leave the
//! engine through a [`SearchHandler`] tagged with a [`SearchTicket`]; only
//! the response to the latest ticket is applied, so a slow answer to an
//! older request can never overwrite a newer one.
//!
//! ```text
//! mount / submit_search / change_sort / change_page
//!         │
//!         ▼
//!   IssuedSearch { ticket, request } ──▶ caller / SearchService
//!                                               │
//!         receive(ticket, page) ◀───────────────┘
//! ```

use crate::action::{ActionButton, ActionOutcome, CreateAction, RowAction};
use crate::column::ColumnDescriptor;
use crate::error::{SearchError, SearchResult};
use crate::format::DisplayFormatter;
use crate::operator::Operator;
use crate::request::{
	IssuedSearch, PaginatedResponse, SearchFilter, SearchRequest, SearchTicket, Sort, SortDirection,
};
use crate::search::{
	RenderedSearchField, SearchForm, SearchValue, SearchValues, build_search_filters, initial_search_values,
};
use crate::search_field::SearchFieldDescriptor;
use async_trait::async_trait;
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use steady_conf::Settings;
use steady_core::{Confirmer, HandlerError, Locale, Messages, Notifier, TracingNotifier, Value};
use steady_forms::{ButtonState, FieldErrors};

const ACTIONS_COLUMN_KEY: &str = "actions";
const ACTIONS_BASE_WIDTH: u32 = 120;
const ACTION_WIDTH: u32 = 40;
const DEFAULT_PAGE_SIZE: usize = 10;

/// Receives the requests the engine emits.
pub trait SearchHandler: Send + Sync {
	fn on_search(&self, ticket: SearchTicket, request: &SearchRequest);

	/// The pager moved; `page` is zero-based
	fn on_page_change(&self, page: usize, page_size: usize) {
		let _ = (page, page_size);
	}
}

struct FnSearchHandler<F>(F);

impl<F> SearchHandler for FnSearchHandler<F>
where
	F: Fn(SearchTicket, &SearchRequest) + Send + Sync,
{
	fn on_search(&self, ticket: SearchTicket, request: &SearchRequest) {
		(self.0)(ticket, request)
	}
}

/// Adapt a closure into a [`SearchHandler`]
pub fn search_fn<F>(f: F) -> impl SearchHandler
where
	F: Fn(SearchTicket, &SearchRequest) + Send + Sync + 'static,
{
	FnSearchHandler(f)
}

/// Executes search requests, typically over HTTP.
#[async_trait]
pub trait SearchService: Send + Sync {
	async fn search(&self, request: &SearchRequest) -> Result<PaginatedResponse, HandlerError>;
}

/// Result of a search form submission.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
	Issued(IssuedSearch),
	/// Validation failed; nothing was emitted
	Invalid(FieldErrors),
}

impl SearchOutcome {
	pub fn issued(self) -> Option<IssuedSearch> {
		match self {
			Self::Issued(issued) => Some(issued),
			Self::Invalid(_) => None,
		}
	}
}

/// Drawable snapshot of a list screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListView {
	pub title: Option<String>,
	pub create: Option<ButtonState>,
	/// Absent when the list has no search fields
	pub search: Option<SearchPanel>,
	pub body: ListBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPanel {
	pub fields: Vec<RenderedSearchField>,
	pub submit: ButtonState,
}

/// The prompt shown before the first required search, or the table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ListBody {
	Prompt { message: String },
	Table(TableView),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableView {
	pub columns: Vec<ColumnView>,
	pub rows: Vec<RowView>,
	pub loading: bool,
	pub pager: PagerView,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnView {
	pub key: String,
	pub title: String,
	pub width: Option<u32>,
	pub sortable: bool,
	/// Direction when the table is sorted by this column
	pub sort: Option<SortDirection>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowView {
	/// The row's `id`
	pub key: Value,
	/// One display text per data column
	pub cells: Vec<String>,
	pub actions: Vec<ActionButton>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PagerView {
	/// One-based
	pub current: usize,
	pub page_size: usize,
	pub total: usize,
	pub page_size_options: Vec<usize>,
	pub summary: String,
}

struct ListState {
	form: SearchForm,
	/// Values of the last accepted submission; sorting and paging reuse them
	submitted: Option<SearchValues>,
	has_searched: bool,
	mounted: bool,
	sort: Option<Sort>,
	/// Zero-based
	page: usize,
	page_size: usize,
	rows: Vec<Value>,
	total: usize,
	sequence: u64,
	latest: Option<SearchTicket>,
}

impl ListState {
	fn table_visible(&self) -> bool {
		!self.form.has_required_fields() || self.has_searched
	}

	fn submitted_filters(&self) -> Vec<SearchFilter> {
		let fields = self.form.fields();
		match &self.submitted {
			Some(values) => build_search_filters(fields, values),
			None => build_search_filters(fields, &initial_search_values(fields)),
		}
	}

	fn next_request(&mut self, filters: Vec<SearchFilter>) -> IssuedSearch {
		self.sequence += 1;
		let ticket = SearchTicket::new(self.sequence);
		self.latest = Some(ticket);
		IssuedSearch {
			ticket,
			request: SearchRequest::new(self.page, self.page_size, filters, self.sort.as_ref()),
		}
	}

	fn start_search(&mut self, values: SearchValues) -> IssuedSearch {
		let filters = build_search_filters(self.form.fields(), &values);
		self.submitted = Some(values);
		self.has_searched = true;
		self.page = 0;
		self.next_request(filters)
	}
}

pub struct ListEngine {
	title: Option<String>,
	columns: Vec<ColumnDescriptor>,
	actions: Vec<RowAction>,
	create: Option<CreateAction>,
	handler: Arc<dyn SearchHandler>,
	notifier: Arc<dyn Notifier>,
	confirmer: Option<Arc<dyn Confirmer>>,
	formatter: DisplayFormatter,
	messages: Messages,
	page_size_options: Vec<usize>,
	loading: AtomicBool,
	state: Mutex<ListState>,
}

impl ListEngine {
	/// Create an engine over `columns` and `search_fields`
	///
	/// Fails on duplicate column keys or search field names.
	///
	/// # Examples
	///
	/// ```
	/// use steady_list::{ColumnDescriptor, ListBody, ListEngine, SearchFieldDescriptor, search_fn};
	///
	/// let engine = ListEngine::new(
	///     vec![ColumnDescriptor::new("name", "Name")],
	///     vec![SearchFieldDescriptor::text("name", "Name")],
	///     search_fn(|_ticket, _request| {}),
	/// )
	/// .unwrap();
	///
	/// let issued = engine.mount().unwrap();
	/// assert_eq!(issued.request.page, 0);
	/// assert!(matches!(engine.view().body, ListBody::Table(_)));
	/// ```
	pub fn new(
		columns: Vec<ColumnDescriptor>,
		search_fields: Vec<SearchFieldDescriptor>,
		handler: impl SearchHandler + 'static,
	) -> SearchResult<Self> {
		let mut keys = HashSet::new();
		for column in &columns {
			if !keys.insert(column.key.as_str()) {
				return Err(SearchError::DuplicateColumn(column.key.clone()));
			}
		}
		let form = SearchForm::new(search_fields)?;

		Ok(Self {
			title: None,
			columns,
			actions: Vec::new(),
			create: None,
			handler: Arc::new(handler),
			notifier: Arc::new(TracingNotifier),
			confirmer: None,
			formatter: DisplayFormatter::default(),
			messages: Messages::default(),
			page_size_options: vec![10, 20, 50, 100],
			loading: AtomicBool::new(false),
			state: Mutex::new(ListState {
				form,
				submitted: None,
				has_searched: false,
				mounted: false,
				sort: None,
				page: 0,
				page_size: DEFAULT_PAGE_SIZE,
				rows: Vec::new(),
				total: 0,
				sequence: 0,
				latest: None,
			}),
		})
	}

	pub fn with_title(mut self, title: impl Into<String>) -> Self {
		self.title = Some(title.into());
		self
	}

	pub fn with_action(mut self, action: RowAction) -> Self {
		self.actions.push(action);
		self
	}

	pub fn with_create(mut self, create: CreateAction) -> Self {
		self.create = Some(create);
		self
	}

	pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
		self.notifier = notifier;
		self
	}

	pub fn with_confirmer(mut self, confirmer: Arc<dyn Confirmer>) -> Self {
		self.confirmer = Some(confirmer);
		self
	}

	pub fn with_formatter(mut self, formatter: DisplayFormatter) -> Self {
		self.formatter = formatter;
		self
	}

	pub fn with_locale(mut self, locale: Locale) -> Self {
		self.messages = Messages::new(locale);
		self
	}

	/// Page size of the first request; zero is ignored
	pub fn with_page_size(mut self, page_size: usize) -> Self {
		if page_size > 0 {
			self.state.get_mut().page_size = page_size;
		}
		self
	}

	pub fn with_page_size_options(mut self, options: Vec<usize>) -> Self {
		self.page_size_options = options;
		self
	}

	/// Locale, cell formatting and pagination from loaded settings
	pub fn with_settings(self, settings: &Settings) -> Self {
		self.with_locale(settings.locale)
			.with_formatter(DisplayFormatter::from_settings(&settings.display))
			.with_page_size(settings.pagination.default_page_size)
			.with_page_size_options(settings.pagination.page_size_options.clone())
	}

	pub fn messages(&self) -> &Messages {
		&self.messages
	}

	pub fn columns(&self) -> &[ColumnDescriptor] {
		&self.columns
	}

	pub fn actions(&self) -> &[RowAction] {
		&self.actions
	}

	pub fn has_required_fields(&self) -> bool {
		self.state.lock().form.has_required_fields()
	}

	pub fn has_searched(&self) -> bool {
		self.state.lock().has_searched
	}

	/// False until the first search when any search field is required
	pub fn is_table_visible(&self) -> bool {
		self.state.lock().table_visible()
	}

	// Search form

	pub fn operator(&self, field: &str) -> Option<Operator> {
		self.state.lock().form.operator(field)
	}

	pub fn value(&self, field: &str) -> Option<SearchValue> {
		self.state.lock().form.value(field).cloned()
	}

	pub fn search_values(&self) -> SearchValues {
		self.state.lock().form.values().clone()
	}

	pub fn search_errors(&self) -> FieldErrors {
		self.state.lock().form.errors().clone()
	}

	pub fn set_operator(&self, field: &str, operator: Operator) -> SearchResult<()> {
		self.state.lock().form.set_operator(field, operator)
	}

	pub fn set_value(&self, field: &str, raw: Value) -> SearchResult<()> {
		self.state.lock().form.set_value(field, raw)
	}

	pub fn reset_search(&self) {
		self.state.lock().form.reset();
	}

	// Requests

	/// First display of the list
	///
	/// Searches with the default values unless a search field is required,
	/// in which case the prompt is shown until the user submits. Only the
	/// first call does anything.
	pub fn mount(&self) -> Option<IssuedSearch> {
		let issued = {
			let mut state = self.state.lock();
			if state.mounted {
				return None;
			}
			state.mounted = true;
			if state.has_searched {
				return None;
			}
			if state.form.has_required_fields() {
				tracing::debug!("list mounted, waiting for the first search");
				return None;
			}
			let values = initial_search_values(state.form.fields());
			state.start_search(values)
		};
		self.emit(&issued);
		Some(issued)
	}

	/// Validate the search form and emit a request for page 0
	pub fn submit_search(&self) -> SearchOutcome {
		let issued = {
			let mut state = self.state.lock();
			let values = match state.form.submit(&self.messages) {
				Ok(values) => values,
				Err(errors) => {
					tracing::debug!(failed = errors.len(), "search blocked by validation");
					return SearchOutcome::Invalid(errors);
				}
			};
			state.start_search(values)
		};
		self.emit(&issued);
		SearchOutcome::Issued(issued)
	}

	/// Apply a sort from the table header; `None` clears it
	///
	/// After the first search this re-emits the last submitted search with
	/// the new sort on page 0. Edits made to the form since then are not
	/// included.
	pub fn change_sort(&self, sort: Option<Sort>) -> Option<IssuedSearch> {
		let issued = {
			let mut state = self.state.lock();
			if state.sort == sort {
				return None;
			}
			state.sort = sort;
			if !state.has_searched {
				return None;
			}
			let filters = state.submitted_filters();
			state.page = 0;
			state.next_request(filters)
		};
		self.emit(&issued);
		Some(issued)
	}

	/// Page change from the pager; `page` is one-based
	///
	/// The caller's [`SearchHandler::on_page_change`] receives the
	/// zero-based index. The returned request carries the ticket the
	/// response must be fed back with.
	pub fn change_page(&self, page: usize, page_size: usize) -> Option<IssuedSearch> {
		let index = page.saturating_sub(1);
		let issued = {
			let mut state = self.state.lock();
			if !state.table_visible() {
				return None;
			}
			state.page = index;
			if page_size > 0 {
				state.page_size = page_size;
			}
			let filters = state.submitted_filters();
			state.next_request(filters)
		};
		tracing::debug!(page = index, page_size = issued.request.page_size, ticket = %issued.ticket, "page changed");
		self.handler.on_page_change(index, issued.request.page_size);
		Some(issued)
	}

	fn emit(&self, issued: &IssuedSearch) {
		tracing::debug!(
			ticket = %issued.ticket,
			page = issued.request.page,
			filters = issued.request.filters.len(),
			sort = ?issued.request.sort_field,
			"search emitted"
		);
		self.handler.on_search(issued.ticket, &issued.request);
	}

	pub fn latest_ticket(&self) -> Option<SearchTicket> {
		self.state.lock().latest
	}

	// Responses

	/// Apply a page of results; responses to older tickets are discarded
	pub fn receive(&self, ticket: SearchTicket, response: PaginatedResponse) -> bool {
		let mut state = self.state.lock();
		if state.latest != Some(ticket) {
			tracing::warn!(%ticket, latest = ?state.latest, "discarding stale search response");
			return false;
		}
		tracing::debug!(%ticket, rows = response.data.len(), total = response.total, "search response applied");
		state.rows = response.data;
		state.total = response.total;
		state.page = response.page;
		if response.page_size > 0 {
			state.page_size = response.page_size;
		}
		true
	}

	/// Report a failed search; only the latest ticket reaches the user
	pub fn fail(&self, ticket: SearchTicket, error: HandlerError) -> bool {
		let latest = self.state.lock().latest;
		if latest != Some(ticket) {
			tracing::warn!(%ticket, error = %error, "discarding stale search failure");
			return false;
		}
		tracing::warn!(%ticket, error = %error, "search failed");
		self.notifier.error(error.message_or(self.messages.load_failed()));
		true
	}

	/// Execute `issued` through `service` and feed the result back
	///
	/// The loading flag is raised for the duration of the call. Returns
	/// whether the outcome was applied.
	pub async fn run(&self, issued: IssuedSearch, service: &dyn SearchService) -> bool {
		self.set_loading(true);
		let result = service.search(&issued.request).await;
		if self.latest_ticket() == Some(issued.ticket) {
			self.set_loading(false);
		}
		match result {
			Ok(page) => self.receive(issued.ticket, page),
			Err(err) => self.fail(issued.ticket, err),
		}
	}

	pub fn set_loading(&self, loading: bool) {
		self.loading.store(loading, Ordering::Release);
	}

	pub fn is_loading(&self) -> bool {
		self.loading.load(Ordering::Acquire)
	}

	pub fn rows(&self) -> Vec<Value> {
		self.state.lock().rows.clone()
	}

	pub fn total(&self) -> usize {
		self.state.lock().total
	}

	/// Zero-based current page
	pub fn page(&self) -> usize {
		self.state.lock().page
	}

	pub fn page_size(&self) -> usize {
		self.state.lock().page_size
	}

	pub fn sort(&self) -> Option<Sort> {
		self.state.lock().sort.clone()
	}

	// Actions

	/// `120 + 40` per action, `None` without actions
	pub fn actions_column_width(&self) -> Option<u32> {
		if self.actions.is_empty() {
			return None;
		}
		let count = u32::try_from(self.actions.len()).unwrap_or(u32::MAX);
		Some(ACTIONS_BASE_WIDTH.saturating_add(ACTION_WIDTH.saturating_mul(count)))
	}

	pub fn visible_actions<'a>(&'a self, row: &'a Value) -> impl Iterator<Item = &'a RowAction> + 'a {
		self.actions.iter().filter(move |action| action.is_visible(row))
	}

	/// Run a row action, asking for confirmation first when destructive
	pub async fn trigger_action(&self, key: &str, row: &Value) -> SearchResult<ActionOutcome> {
		let action = self
			.actions
			.iter()
			.find(|a| a.key == key)
			.ok_or_else(|| SearchError::UnknownAction(key.to_string()))?;
		if !action.is_visible(row) {
			return Ok(ActionOutcome::Hidden);
		}

		if action.destructive {
			let confirmed = match &self.confirmer {
				Some(confirmer) => {
					confirmer
						.confirm(self.messages.confirm_title(), &self.messages.confirm_action(&action.label))
						.await
				}
				None => {
					tracing::warn!(action = key, "destructive action needs a confirmer, skipped");
					false
				}
			};
			if !confirmed {
				tracing::debug!(action = key, "row action declined");
				return Ok(ActionOutcome::Declined);
			}
		}

		action.run(row);
		tracing::debug!(action = key, "row action performed");
		Ok(ActionOutcome::Performed)
	}

	/// Press the header create button; false when there is none
	pub fn trigger_create(&self) -> bool {
		match &self.create {
			Some(create) => {
				create.trigger();
				true
			}
			None => false,
		}
	}

	// Rendering

	pub fn view(&self) -> ListView {
		let state = self.state.lock();
		let loading = self.is_loading();

		let search = (!state.form.is_empty()).then(|| SearchPanel {
			fields: state.form.render(&self.messages),
			submit: ButtonState {
				label: self.messages.search().to_string(),
				busy: loading,
				disabled: false,
			},
		});

		let body = if state.table_visible() {
			ListBody::Table(self.table_view(&state, loading))
		} else {
			ListBody::Prompt {
				message: self.messages.search_prompt().to_string(),
			}
		};

		ListView {
			title: self.title.clone(),
			create: self.create.as_ref().map(|create| ButtonState {
				label: create.text.clone(),
				busy: false,
				disabled: false,
			}),
			search,
			body,
		}
	}

	fn table_view(&self, state: &ListState, loading: bool) -> TableView {
		let mut columns: Vec<ColumnView> = self
			.columns
			.iter()
			.map(|column| ColumnView {
				key: column.key.clone(),
				title: column.title.clone(),
				width: column.width,
				sortable: column.sortable,
				sort: state
					.sort
					.as_ref()
					.filter(|sort| sort.field == column.key)
					.map(|sort| sort.direction),
			})
			.collect();
		if let Some(width) = self.actions_column_width() {
			columns.push(ColumnView {
				key: ACTIONS_COLUMN_KEY.to_string(),
				title: self.messages.actions_column().to_string(),
				width: Some(width),
				sortable: false,
				sort: None,
			});
		}

		let rows = state
			.rows
			.iter()
			.map(|row| RowView {
				key: row.get("id").cloned().unwrap_or(Value::Null),
				cells: self
					.columns
					.iter()
					.map(|column| column.cell(row, &self.formatter, &self.messages))
					.collect(),
				actions: self.visible_actions(row).map(ActionButton::from).collect(),
			})
			.collect();

		let start = state.page.saturating_mul(state.page_size);
		let (from, to) = if state.total == 0 {
			(0, 0)
		} else {
			(
				start.saturating_add(1),
				start.saturating_add(state.page_size).min(state.total),
			)
		};

		TableView {
			columns,
			rows,
			loading,
			pager: PagerView {
				current: state.page.saturating_add(1),
				page_size: state.page_size,
				total: state.total,
				page_size_options: self.page_size_options.clone(),
				summary: self.messages.page_summary(from, to, state.total),
			},
		}
	}
}

impl std::fmt::Debug for ListEngine {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ListEngine")
			.field("title", &self.title)
			.field("columns", &self.columns.len())
			.field("actions", &self.actions.len())
			.field("loading", &self.is_loading())
			.finish_non_exhaustive()
	}
}
