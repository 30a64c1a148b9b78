use async_trait::async_trait;
use parking_lot::Mutex;
use rstest::{fixture, rstest};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use steady_core::{ChoiceOption, HandlerError, Locale, Value};
use steady_list::{
	ColumnDescriptor, ListBody, ListEngine, Operator, PaginatedResponse, SearchFieldDescriptor,
	SearchHandler, SearchOutcome, SearchRequest, SearchService, SearchTicket, SearchValue, Sort,
	SortDirection,
};
use steady_test::fixtures::notifier;
use steady_test::{RecordingNotifier, init_test_logging};

#[derive(Clone, Default)]
struct RecordingHandler {
	searches: Arc<Mutex<Vec<(SearchTicket, SearchRequest)>>>,
}

impl RecordingHandler {
	fn requests(&self) -> Vec<SearchRequest> {
		self.searches.lock().iter().map(|(_, r)| r.clone()).collect()
	}
}

impl SearchHandler for RecordingHandler {
	fn on_search(&self, ticket: SearchTicket, request: &SearchRequest) {
		self.searches.lock().push((ticket, request.clone()));
	}
}

fn status_options() -> Vec<ChoiceOption> {
	vec![
		ChoiceOption::new("active", "Active"),
		ChoiceOption::new("inactive", "Inactive"),
	]
}

fn product_columns() -> Vec<ColumnDescriptor> {
	vec![
		ColumnDescriptor::new("name", "Name").sortable(),
		ColumnDescriptor::new("price", "Price").sortable(),
		ColumnDescriptor::new("status", "Status"),
	]
}

fn product_search() -> Vec<SearchFieldDescriptor> {
	vec![
		SearchFieldDescriptor::text("name", "Name"),
		SearchFieldDescriptor::number("price", "Price").with_operators([
			Operator::Eq,
			Operator::Between,
			Operator::Gte,
		]),
		SearchFieldDescriptor::select("status", "Status", status_options())
			.with_operators([Operator::Eq, Operator::In]),
	]
}

#[fixture]
fn handler() -> RecordingHandler {
	RecordingHandler::default()
}

fn products(handler: &RecordingHandler) -> ListEngine {
	ListEngine::new(product_columns(), product_search(), handler.clone())
		.unwrap()
		.with_locale(Locale::En)
}

fn orders(handler: &RecordingHandler) -> ListEngine {
	ListEngine::new(
		vec![ColumnDescriptor::new("code", "Code"), ColumnDescriptor::new("status", "Status")],
		vec![
			SearchFieldDescriptor::text("code", "Code"),
			SearchFieldDescriptor::select("status", "Status", status_options()).required(),
		],
		handler.clone(),
	)
	.unwrap()
	.with_locale(Locale::En)
}

#[rstest]
fn test_operator_change_resets_value_shape(handler: RecordingHandler) {
	let engine = products(&handler);
	engine.set_value("price", json!(250)).unwrap();

	engine.set_operator("price", Operator::Between).unwrap();
	assert_eq!(engine.value("price"), Some(SearchValue::Pair(Value::Null, Value::Null)));
	assert_eq!(engine.value("price").unwrap().to_value(), json!([null, null]));

	engine.set_operator("status", Operator::In).unwrap();
	assert_eq!(engine.value("status"), Some(SearchValue::List(vec![])));
}

#[rstest]
fn test_filters_only_for_present_values(handler: RecordingHandler) {
	let engine = products(&handler);
	engine.set_value("name", json!("")).unwrap();
	engine.set_operator("price", Operator::Between).unwrap();
	engine.set_value("price", json!([null, ""])).unwrap();
	engine.set_operator("status", Operator::In).unwrap();
	engine.set_value("status", json!(["active", "inactive"])).unwrap();

	let issued = engine.submit_search().issued().unwrap();
	let filters = issued.request.filters;
	assert_eq!(filters.len(), 1);
	assert_eq!(filters[0].field, "status");
	assert_eq!(filters[0].operator, Operator::In);
	assert_eq!(filters[0].value, json!(["active", "inactive"]));
	assert!(!filters[0].required);
}

#[rstest]
fn test_submit_resets_page_and_sort_keeps_submitted_filters(handler: RecordingHandler) {
	init_test_logging();
	let engine = products(&handler);
	engine.mount();
	engine.change_page(4, 10);
	assert_eq!(engine.page(), 3);

	engine.set_value("name", json!("lamp")).unwrap();
	let submitted = engine.submit_search().issued().unwrap();
	assert_eq!(submitted.request.page, 0);
	assert_eq!(submitted.request.filters[0].value, json!("lamp"));

	// Editing the form after submitting does not leak into the sort request
	engine.set_value("name", json!("desk")).unwrap();
	let sorted = engine.change_sort(Some(Sort::desc("price"))).unwrap();

	assert_eq!(sorted.request.page, 0);
	assert_eq!(sorted.request.filters, submitted.request.filters);
	assert_eq!(sorted.request.sort_field.as_deref(), Some("price"));
	assert_eq!(sorted.request.sort_direction, Some(SortDirection::Desc));
	assert_eq!(handler.requests().len(), 3);
}

#[rstest]
fn test_required_search_gates_the_table(handler: RecordingHandler) {
	let engine = orders(&handler);

	assert!(engine.mount().is_none());
	assert!(handler.requests().is_empty());
	match engine.view().body {
		ListBody::Prompt { message } => assert_eq!(message, "Enter search criteria to view the data"),
		other => panic!("expected prompt, got {other:?}"),
	}

	// A failing submission emits nothing and keeps the prompt
	match engine.submit_search() {
		SearchOutcome::Invalid(errors) => assert_eq!(errors.get("status"), Some("Please select Status")),
		other => panic!("expected Invalid, got {other:?}"),
	}
	assert!(!engine.has_searched());
	assert!(handler.requests().is_empty());
	let view = engine.view();
	assert_eq!(
		view.search.unwrap().fields[1].error.as_deref(),
		Some("Please select Status")
	);

	engine.set_value("status", json!("active")).unwrap();
	assert!(matches!(engine.submit_search(), SearchOutcome::Issued(_)));
	assert!(engine.has_searched());
	assert!(matches!(engine.view().body, ListBody::Table(_)));

	engine.change_sort(Some(Sort::asc("code")));
	engine.change_sort(None);
	assert!(engine.has_searched());
	assert!(matches!(engine.view().body, ListBody::Table(_)));
	assert_eq!(handler.requests().len(), 3);
	assert!(handler.requests().iter().all(|r| r.filters[0].required));
}

#[rstest]
fn test_stale_response_is_discarded(handler: RecordingHandler) {
	let engine = products(&handler);
	let first = engine.mount().unwrap();
	let second = engine.change_sort(Some(Sort::asc("name"))).unwrap();
	assert!(second.ticket > first.ticket);

	let fresh = vec![json!({"id": 2, "name": "B"})];
	assert!(engine.receive(second.ticket, PaginatedResponse::new(fresh.clone(), 1, 0, 10)));

	let stale = vec![json!({"id": 1, "name": "A"}), json!({"id": 3, "name": "C"})];
	assert!(!engine.receive(first.ticket, PaginatedResponse::new(stale, 2, 0, 10)));
	assert_eq!(engine.rows(), fresh);
	assert_eq!(engine.total(), 1);
}

struct DelayedService {
	seen: Mutex<Vec<SearchRequest>>,
}

#[async_trait]
impl SearchService for DelayedService {
	async fn search(&self, request: &SearchRequest) -> Result<PaginatedResponse, HandlerError> {
		self.seen.lock().push(request.clone());
		// Unsorted requests answer slowly, so they finish last
		let delay = if request.sort_field.is_some() { 1 } else { 60 };
		tokio::time::sleep(Duration::from_millis(delay)).await;
		let label = request.sort_field.clone().unwrap_or_else(|| "unsorted".to_string());
		Ok(PaginatedResponse::new(vec![json!({"id": 1, "name": label})], 1, request.page, request.page_size))
	}
}

#[rstest]
#[tokio::test]
async fn test_run_applies_only_the_latest_response(handler: RecordingHandler) {
	init_test_logging();
	let engine = products(&handler);
	let service = DelayedService { seen: Mutex::new(Vec::new()) };

	let first = engine.mount().unwrap();
	let second = engine.change_sort(Some(Sort::asc("name"))).unwrap();

	let (first_applied, second_applied) = tokio::join!(engine.run(first, &service), engine.run(second, &service));

	assert!(!first_applied);
	assert!(second_applied);
	assert_eq!(engine.rows(), vec![json!({"id": 1, "name": "name"})]);
	assert!(!engine.is_loading());
	assert_eq!(service.seen.lock().len(), 2);
}

struct FailingService;

#[async_trait]
impl SearchService for FailingService {
	async fn search(&self, _request: &SearchRequest) -> Result<PaginatedResponse, HandlerError> {
		Err(HandlerError::without_message())
	}
}

#[rstest]
#[tokio::test]
async fn test_failed_search_notifies_once(handler: RecordingHandler, notifier: Arc<RecordingNotifier>) {
	let engine = products(&handler).with_notifier(notifier.clone());
	let first = engine.mount().unwrap();
	let second = engine.change_sort(Some(Sort::desc("name"))).unwrap();

	assert!(!engine.run(first, &FailingService).await);
	assert!(notifier.is_empty());

	assert!(engine.run(second, &FailingService).await);
	assert_eq!(notifier.errors(), vec!["An error occurred while loading the data".to_string()]);
	assert!(!engine.is_loading());
}
