use parking_lot::Mutex;
use rstest::rstest;
use serde_json::json;
use std::sync::Arc;
use steady_conf::Settings;
use steady_core::{Locale, Value};
use steady_list::{
	ActionOutcome, ButtonStyle, ColumnDescriptor, ColumnKind, CreateAction, ListBody, ListEngine,
	PaginatedResponse, RowAction, SearchError, TableView, search_fn,
};
use steady_test::ScriptedConfirmer;
use steady_test::fixtures::{accepting_confirmer, declining_confirmer};

type Log = Arc<Mutex<Vec<String>>>;

fn columns() -> Vec<ColumnDescriptor> {
	vec![
		ColumnDescriptor::new("name", "Name").sortable(),
		ColumnDescriptor::new("price", "Price").with_kind(ColumnKind::Currency),
		ColumnDescriptor::new("published", "Published").with_kind(ColumnKind::Boolean),
		ColumnDescriptor::new("createdAt", "Created").with_kind(ColumnKind::Date),
	]
}

fn catalog(log: &Log) -> ListEngine {
	let edits = Arc::clone(log);
	let deletes = Arc::clone(log);
	let publishes = Arc::clone(log);
	ListEngine::new(columns(), vec![], search_fn(|_, _| {}))
		.unwrap()
		.with_locale(Locale::En)
		.with_action(
			RowAction::new("edit", "Edit", move |row| edits.lock().push(format!("edit {}", row["id"])))
				.with_style(ButtonStyle::Link),
		)
		.with_action(
			RowAction::new("delete", "Delete", move |row| deletes.lock().push(format!("delete {}", row["id"])))
				.destructive(),
		)
		.with_action(
			RowAction::new("publish", "Publish", move |row| {
				publishes.lock().push(format!("publish {}", row["id"]))
			})
			.visible_when(|row| row["published"] == json!(false)),
		)
}

fn rows() -> Vec<Value> {
	vec![
		json!({"id": 1, "name": "Lamp", "price": 250000, "published": true, "createdAt": "2024-03-09"}),
		json!({"id": 2, "name": "Desk", "price": 1500000, "published": false, "createdAt": null}),
	]
}

fn loaded(engine: &ListEngine) -> TableView {
	let issued = engine.mount().unwrap();
	assert!(engine.receive(issued.ticket, PaginatedResponse::new(rows(), 2, 0, 10)));
	match engine.view().body {
		ListBody::Table(table) => table,
		other => panic!("expected table, got {other:?}"),
	}
}

#[rstest]
#[tokio::test]
async fn test_destructive_action_runs_after_confirmation(accepting_confirmer: Arc<ScriptedConfirmer>) {
	let log = Log::default();
	let engine = catalog(&log).with_confirmer(accepting_confirmer.clone());

	let outcome = engine.trigger_action("delete", &rows()[0]).await.unwrap();

	assert_eq!(outcome, ActionOutcome::Performed);
	assert_eq!(*log.lock(), vec!["delete 1".to_string()]);
	assert_eq!(
		accepting_confirmer.prompts(),
		vec![("Confirm".to_string(), "Are you sure you want to delete?".to_string())]
	);
}

#[rstest]
#[tokio::test]
async fn test_declined_confirmation_skips_handler(declining_confirmer: Arc<ScriptedConfirmer>) {
	let log = Log::default();
	let engine = catalog(&log).with_confirmer(declining_confirmer.clone());

	assert_eq!(engine.trigger_action("delete", &rows()[1]).await, Ok(ActionOutcome::Declined));
	assert!(log.lock().is_empty());
	assert_eq!(declining_confirmer.prompts().len(), 1);
}

#[rstest]
#[tokio::test]
async fn test_plain_action_needs_no_confirmation(declining_confirmer: Arc<ScriptedConfirmer>) {
	let log = Log::default();
	let engine = catalog(&log).with_confirmer(declining_confirmer.clone());

	assert_eq!(engine.trigger_action("edit", &rows()[1]).await, Ok(ActionOutcome::Performed));
	assert_eq!(*log.lock(), vec!["edit 2".to_string()]);
	assert!(declining_confirmer.prompts().is_empty());
}

#[rstest]
#[tokio::test]
async fn test_destructive_action_without_confirmer_is_declined() {
	let log = Log::default();
	let engine = catalog(&log);

	assert_eq!(engine.trigger_action("delete", &rows()[0]).await, Ok(ActionOutcome::Declined));
	assert!(log.lock().is_empty());
}

#[rstest]
#[tokio::test]
async fn test_hidden_and_unknown_actions() {
	let log = Log::default();
	let engine = catalog(&log);

	// Row 1 is already published
	assert_eq!(engine.trigger_action("publish", &rows()[0]).await, Ok(ActionOutcome::Hidden));
	assert_eq!(engine.trigger_action("publish", &rows()[1]).await, Ok(ActionOutcome::Performed));
	assert_eq!(
		engine.trigger_action("archive", &rows()[1]).await,
		Err(SearchError::UnknownAction("archive".to_string()))
	);
	assert_eq!(*log.lock(), vec!["publish 2".to_string()]);
}

#[rstest]
fn test_actions_column_and_row_buttons() {
	let engine = catalog(&Log::default());
	let table = loaded(&engine);

	let actions = table.columns.last().unwrap();
	assert_eq!(actions.key, "actions");
	assert_eq!(actions.title, "Actions");
	assert_eq!(actions.width, Some(240));
	assert!(!actions.sortable);
	assert_eq!(table.columns.len(), 5);

	let first: Vec<&str> = table.rows[0].actions.iter().map(|a| a.key.as_str()).collect();
	let second: Vec<&str> = table.rows[1].actions.iter().map(|a| a.key.as_str()).collect();
	assert_eq!(first, vec!["edit", "delete"]);
	assert_eq!(second, vec!["edit", "delete", "publish"]);

	let delete = &table.rows[0].actions[1];
	assert!(delete.danger);
	assert_eq!(delete.style, ButtonStyle::Text);
	assert_eq!(table.rows[0].actions[0].style, ButtonStyle::Link);
}

#[rstest]
fn test_cells_are_formatted_by_kind() {
	let engine = catalog(&Log::default());
	let table = loaded(&engine);

	assert_eq!(table.rows[0].key, json!(1));
	assert_eq!(table.rows[0].cells, vec!["Lamp", "250.000 VND", "Yes", "09/03/2024"]);
	assert_eq!(table.rows[1].cells, vec!["Desk", "1.500.000 VND", "No", ""]);
	assert_eq!(table.pager.summary, "1-2 of 2 records");
}

#[rstest]
fn test_create_button() {
	let opened = Arc::new(Mutex::new(0));
	let counter = Arc::clone(&opened);
	let engine = ListEngine::new(columns(), vec![], search_fn(|_, _| {}))
		.unwrap()
		.with_title("Products")
		.with_create(CreateAction::new("Add product", move || *counter.lock() += 1));

	let view = engine.view();
	assert_eq!(view.title.as_deref(), Some("Products"));
	assert_eq!(view.create.map(|button| button.label), Some("Add product".to_string()));
	assert!(view.search.is_none());

	assert!(engine.trigger_create());
	assert_eq!(*opened.lock(), 1);

	let bare = ListEngine::new(columns(), vec![], search_fn(|_, _| {})).unwrap();
	assert!(!bare.trigger_create());
	assert!(bare.view().create.is_none());
}

#[rstest]
fn test_settings_drive_locale_and_paging() {
	let settings = Settings::from_toml_str(
		r#"
		locale = "vi"

		[pagination]
		default_page_size = 25
		page_size_options = [25, 50]

		[display]
		currency_suffix = "đ"
		"#,
	)
	.unwrap();
	let engine = catalog(&Log::default()).with_settings(&settings);

	let issued = engine.mount().unwrap();
	assert_eq!(issued.request.page_size, 25);
	assert!(engine.receive(issued.ticket, PaginatedResponse::new(rows(), 2, 0, 25)));

	match engine.view().body {
		ListBody::Table(table) => {
			assert_eq!(table.pager.page_size_options, vec![25, 50]);
			assert_eq!(table.pager.summary, "1-2 của 2 bản ghi");
			assert_eq!(table.columns.last().unwrap().title, "Thao tác");
			assert_eq!(table.rows[0].cells[1], "250.000 đ");
			assert_eq!(table.rows[0].cells[2], "Có");
		}
		other => panic!("expected table, got {other:?}"),
	}
}
