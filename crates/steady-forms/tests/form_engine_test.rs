use parking_lot::Mutex;
use rstest::rstest;
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use steady_core::{HandlerError, Locale, Session, ValueMap};
use steady_forms::{
	CancelOutcome, FieldDescriptor, FieldSet, FormEngine, FormError, Rule, SubmitOutcome,
	ValidationSchema, submit_fn,
};
use steady_test::fixtures::{navigator, notifier};
use steady_test::{RecordingNavigator, RecordingNotifier, init_test_logging, value_map};
use tokio::sync::Notify;

fn price_fields() -> FieldSet {
	FieldSet::new(vec![
		FieldDescriptor::number("price")
			.with_label("Price")
			.with_min(0.0)
			.required(),
	])
	.unwrap()
}

#[rstest]
#[tokio::test]
async fn test_negative_price_is_rejected_before_handler(notifier: Arc<RecordingNotifier>) {
	init_test_logging();
	let calls = Arc::new(AtomicUsize::new(0));
	let counter = Arc::clone(&calls);
	let form = FormEngine::new(
		price_fields(),
		submit_fn(move |_| {
			let counter = Arc::clone(&counter);
			async move {
				counter.fetch_add(1, Ordering::SeqCst);
				Ok(())
			}
		}),
	)
	.with_locale(Locale::En)
	.with_notifier(notifier.clone());

	form.set_value("price", json!(-5)).unwrap();
	let outcome = form.submit().await.unwrap();

	match outcome {
		SubmitOutcome::Invalid(errors) => {
			assert_eq!(errors.get("price"), Some("Minimum value is 0"));
		}
		other => panic!("expected Invalid, got {other:?}"),
	}
	assert_eq!(calls.load(Ordering::SeqCst), 0);
	assert!(form.is_touched("price"));
	assert_eq!(form.error("price"), Some("Minimum value is 0".to_string()));
	assert!(notifier.is_empty());
}

#[rstest]
#[tokio::test]
async fn test_valid_price_reaches_handler(notifier: Arc<RecordingNotifier>) {
	let received = Arc::new(Mutex::new(None::<ValueMap>));
	let sink = Arc::clone(&received);
	let form = FormEngine::new(
		price_fields(),
		submit_fn(move |values| {
			let sink = Arc::clone(&sink);
			async move {
				*sink.lock() = Some(values);
				Ok(())
			}
		}),
	)
	.with_locale(Locale::En)
	.with_notifier(notifier.clone());

	form.set_value("price", json!(100)).unwrap();
	let outcome = form.submit().await.unwrap();

	assert!(outcome.is_submitted());
	assert_eq!(
		received.lock().clone(),
		Some(value_map(json!({"price": 100})).unwrap())
	);
	assert_eq!(notifier.successes(), vec!["Saved successfully!"]);
}

#[rstest]
#[case(HandlerError::new("Product name already exists"), "Product name already exists")]
#[case(HandlerError::without_message(), "An error occurred while saving the data")]
#[case(HandlerError::new(""), "An error occurred while saving the data")]
#[tokio::test]
async fn test_handler_failure_is_notified(
	notifier: Arc<RecordingNotifier>,
	#[case] failure: HandlerError,
	#[case] expected: &str,
) {
	let form = FormEngine::new(
		price_fields(),
		submit_fn(move |_| {
			let failure = failure.clone();
			async move { Err(failure) }
		}),
	)
	.with_locale(Locale::En)
	.with_notifier(notifier.clone());
	form.set_value("price", json!(1)).unwrap();

	let outcome = form.submit().await.unwrap();

	assert!(matches!(outcome, SubmitOutcome::Failed(_)));
	assert_eq!(notifier.errors(), vec![expected]);
	// Still editable afterwards
	form.set_value("price", json!(2)).unwrap();
	assert!(!form.is_submitting());
}

#[rstest]
#[tokio::test]
async fn test_concurrent_submit_is_refused() {
	let gate = Arc::new(Notify::new());
	let calls = Arc::new(AtomicUsize::new(0));
	let (gate_in, calls_in) = (Arc::clone(&gate), Arc::clone(&calls));

	let form = Arc::new(
		FormEngine::new(
			price_fields(),
			submit_fn(move |_| {
				let gate = Arc::clone(&gate_in);
				let calls = Arc::clone(&calls_in);
				async move {
					calls.fetch_add(1, Ordering::SeqCst);
					gate.notified().await;
					Ok(())
				}
			}),
		)
		.with_locale(Locale::En),
	);
	form.set_value("price", json!(10)).unwrap();

	let first = tokio::spawn({
		let form = Arc::clone(&form);
		async move { form.submit().await }
	});
	while calls.load(Ordering::SeqCst) == 0 {
		tokio::time::sleep(Duration::from_millis(1)).await;
	}

	let view = form.render();
	assert!(view.submit.busy);
	assert!(view.cancel.as_ref().unwrap().disabled);
	assert_eq!(form.submit().await, Err(FormError::Busy));

	gate.notify_one();
	let outcome = first.await.unwrap().unwrap();
	assert!(outcome.is_submitted());
	assert_eq!(calls.load(Ordering::SeqCst), 1);
	assert!(!form.render().submit.busy);
}

#[rstest]
#[tokio::test]
async fn test_submit_marks_session_loading() {
	let session = Session::new();
	let observed = Arc::new(Mutex::new(false));
	let (watched, seen) = (session.clone(), Arc::clone(&observed));

	let form = FormEngine::new(
		price_fields(),
		submit_fn(move |_| {
			let watched = watched.clone();
			let seen = Arc::clone(&seen);
			async move {
				*seen.lock() = watched.is_loading();
				Ok(())
			}
		}),
	)
	.with_session(session.clone());
	form.set_value("price", json!(1)).unwrap();

	form.submit().await.unwrap();

	assert!(*observed.lock());
	assert!(!session.is_loading());
}

#[rstest]
#[tokio::test]
async fn test_explicit_schema_is_used_unmodified() {
	let fields = FieldSet::new(vec![
		FieldDescriptor::text("name").required(),
		FieldDescriptor::text("email"),
	])
	.unwrap();
	let schema = ValidationSchema::new().with_rule("email", "Email", Rule::Email);
	let form = FormEngine::new(fields, submit_fn(|_| async { Ok(()) }))
		.with_locale(Locale::En)
		.with_schema(schema);

	// "name" is required by its descriptor, but the caller schema has no rule for it
	form.set_value("email", json!("not-an-email")).unwrap();
	match form.submit().await.unwrap() {
		SubmitOutcome::Invalid(errors) => {
			assert_eq!(errors.len(), 1);
			assert_eq!(errors.get("email"), Some("Enter a valid email address"));
		}
		other => panic!("expected Invalid, got {other:?}"),
	}

	form.set_value("email", json!("ops@example.com")).unwrap();
	assert!(form.submit().await.unwrap().is_submitted());
}

#[rstest]
fn test_cancel_prefers_handler(navigator: Arc<RecordingNavigator>) {
	let cancelled = Arc::new(AtomicUsize::new(0));
	let counter = Arc::clone(&cancelled);
	let form = FormEngine::new(price_fields(), submit_fn(|_| async { Ok(()) }))
		.with_navigator(navigator.clone())
		.with_cancel_path("/products")
		.with_cancel_handler(move || {
			counter.fetch_add(1, Ordering::SeqCst);
		});

	assert_eq!(form.cancel(), CancelOutcome::Handled);
	assert_eq!(cancelled.load(Ordering::SeqCst), 1);
	assert!(navigator.paths().is_empty());
}

#[rstest]
fn test_cancel_navigates_to_path(navigator: Arc<RecordingNavigator>) {
	let form = FormEngine::new(price_fields(), submit_fn(|_| async { Ok(()) }))
		.with_navigator(navigator.clone())
		.with_cancel_path("/products");

	assert_eq!(form.cancel(), CancelOutcome::Navigated("/products".to_string()));
	assert_eq!(navigator.last().as_deref(), Some("/products"));
}

#[rstest]
fn test_initial_values_and_render_tree() {
	let fields = FieldSet::new(vec![
		FieldDescriptor::text("name").with_label("Name"),
		FieldDescriptor::checkbox("active").with_text("Visible in store"),
	])
	.unwrap();
	let form = FormEngine::new(fields, submit_fn(|_| async { Ok(()) }))
		.with_title("Edit product")
		.with_initial_values(value_map(json!({"id": 7, "name": "Laptop"})).unwrap());

	let view = form.render();
	assert_eq!(view.title.as_deref(), Some("Edit product"));
	assert_eq!(view.fields.len(), 2);
	assert_eq!(view.fields[0].value, json!("Laptop"));
	assert_eq!(view.fields[1].value, json!(false));
	assert_eq!(form.value("id"), Some(json!(7)));
	assert_eq!(view.submit.label, "Lưu");

	form.set_value("name", json!("Mouse")).unwrap();
	form.reset();
	assert_eq!(form.value("name"), Some(json!("Laptop")));
}
