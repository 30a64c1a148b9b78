//! End-to-end flows across the list engine, the form engine and settings.

use parking_lot::Mutex;
use rstest::rstest;
use serde_json::json;
use std::sync::Arc;
use steady::forms::{FileUploadWidget, SelectedFile, SimulatedUploader, UploadRejection, UploadStatus};
use steady::prelude::*;
use steady_integration_tests::Catalog;
use steady_test::fixtures::{accepting_confirmer, notifier};
use steady_test::{RecordingNotifier, ScriptedConfirmer, init_test_logging, value_map};

fn product_list(settings: &Settings) -> ListEngine {
	ListEngine::new(
		vec![
			ColumnDescriptor::new("name", "Name").sortable(),
			ColumnDescriptor::new("price", "Price").with_kind(ColumnKind::Currency).sortable(),
			ColumnDescriptor::new("published", "Published").with_kind(ColumnKind::Boolean),
		],
		vec![
			SearchFieldDescriptor::text("name", "Name").with_operators([Operator::Like, Operator::Eq]),
		],
		search_fn(|_, _| {}),
	)
	.unwrap()
	.with_settings(settings)
}

#[rstest]
#[tokio::test]
async fn test_search_then_edit_a_product(notifier: Arc<RecordingNotifier>) {
	init_test_logging();
	let settings = Settings {
		locale: Locale::En,
		..Settings::default()
	};
	let catalog = Catalog::new();
	let list = product_list(&settings);

	let first = list.mount().unwrap();
	assert!(list.run(first, &catalog).await);
	assert_eq!(list.total(), 3);

	list.set_value("name", json!("lamp")).unwrap();
	let issued = list.submit_search().issued().unwrap();
	assert_eq!(issued.request.filters[0].operator, Operator::Like);
	assert!(list.run(issued, &catalog).await);

	let sorted = list.change_sort(Some(Sort::parse_from_query("price").unwrap())).unwrap();
	assert!(list.run(sorted, &catalog).await);

	let table = match list.view().body {
		ListBody::Table(table) => table,
		other => panic!("expected table, got {other:?}"),
	};
	let names: Vec<&str> = table.rows.iter().map(|r| r.cells[0].as_str()).collect();
	assert_eq!(names, vec!["Lamp shade", "Desk lamp"]);
	assert_eq!(table.rows[1].cells[1], "250.000 VND");

	// Open the edit form seeded with the chosen row
	let saved = Arc::new(Mutex::new(None::<ValueMap>));
	let sink = Arc::clone(&saved);
	let row = list.rows()[1].clone();
	let form = FormEngine::new(
		FieldSet::new(vec![
			FieldDescriptor::text("name").with_label("Name").required(),
			FieldDescriptor::number("price").with_label("Price").with_min(0.0).required(),
			FieldDescriptor::checkbox("published").with_label("Published"),
		])
		.unwrap(),
		submit_fn(move |values| {
			let sink = Arc::clone(&sink);
			async move {
				*sink.lock() = Some(values);
				Ok(())
			}
		}),
	)
	.with_locale(settings.locale)
	.with_notifier(notifier.clone())
	.with_initial_values(value_map(row).unwrap());

	assert_eq!(form.value("name"), Some(json!("Desk lamp")));
	form.set_value("price", json!(-1)).unwrap();
	assert!(matches!(form.submit().await.unwrap(), SubmitOutcome::Invalid(_)));

	form.set_value("price", json!(275000)).unwrap();
	assert!(form.submit().await.unwrap().is_submitted());
	let values = saved.lock().clone().unwrap();
	assert_eq!(values.get("price"), Some(&json!(275000)));
	assert_eq!(notifier.successes(), vec!["Saved successfully!".to_string()]);
}

#[rstest]
#[tokio::test]
async fn test_delete_row_and_refresh(accepting_confirmer: Arc<ScriptedConfirmer>) {
	let catalog = Arc::new(Catalog::new());
	let store = Arc::clone(&catalog);
	let list = product_list(&Settings::default())
		.with_confirmer(accepting_confirmer.clone())
		.with_action(
			RowAction::new("delete", "Xóa", move |row| {
				store.products.lock().retain(|p| p["id"] != row["id"]);
			})
			.destructive(),
		);

	let first = list.mount().unwrap();
	assert!(list.run(first, catalog.as_ref()).await);
	let target = list.rows()[0].clone();

	assert_eq!(list.trigger_action("delete", &target).await, Ok(ActionOutcome::Performed));
	assert_eq!(
		accepting_confirmer.prompts(),
		vec![("Xác nhận".to_string(), "Bạn có chắc chắn muốn xóa?".to_string())]
	);

	let refresh = list.change_page(1, 10).unwrap();
	assert!(list.run(refresh, catalog.as_ref()).await);
	assert_eq!(list.total(), 2);
}

#[rstest]
#[tokio::test]
async fn test_contract_upload_from_settings(notifier: Arc<RecordingNotifier>) {
	let settings = Settings::from_toml_str(
		r#"
		locale = "en"

		[upload]
		max_size_mb = 1.0
		allowed_types = ["pdf"]
		simulated_tick_ms = 1
		simulated_step_percent = 50
		"#,
	)
	.unwrap();
	let upload = FileUploadWidget::new(
		"contract",
		FileUploadConfig::from_settings(&settings.upload).required(),
		notifier.clone(),
		settings.messages(),
	)
	.with_label("Contract")
	.with_uploader(Arc::new(SimulatedUploader::from_settings(&settings.upload)));

	assert_eq!(upload.validate(), Err("Contract is required".to_string()));
	assert!(matches!(
		upload.select(SelectedFile::new("u1", "scan.png", 1024)),
		Err(UploadRejection::Extension { .. })
	));
	assert!(matches!(
		upload.select(SelectedFile::new("u2", "huge.pdf", 5 * 1024 * 1024)),
		Err(UploadRejection::TooLarge { .. })
	));

	assert_eq!(upload.select_and_upload(SelectedFile::new("u3", "contract.pdf", 2048)).await, Ok(true));
	assert_eq!(upload.files()[0].status, UploadStatus::Done);
	assert_eq!(upload.value()["name"], json!("contract.pdf"));
	assert_eq!(upload.validate(), Ok(()));
	assert_eq!(notifier.successes(), vec!["contract.pdf uploaded successfully.".to_string()]);
}
