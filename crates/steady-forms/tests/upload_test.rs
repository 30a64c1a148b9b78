use async_trait::async_trait;
use parking_lot::Mutex;
use rstest::rstest;
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use steady_core::{HandlerError, Locale, Messages};
use steady_forms::{
	FileUploadConfig, FileUploadWidget, ProgressReporter, SelectedFile, SimulatedUploader,
	UploadRejection, UploadStatus, Uploader, Widget,
};
use steady_test::RecordingNotifier;
use steady_test::fixtures::notifier;

/// Uploader that records calls and reports a fixed progress trail.
#[derive(Default)]
struct ScriptedUploader {
	calls: Mutex<Vec<String>>,
	progress_seen: Mutex<Vec<u8>>,
	fail: bool,
}

#[async_trait]
impl Uploader for ScriptedUploader {
	async fn upload(&self, file: &SelectedFile, progress: &ProgressReporter) -> Result<Value, HandlerError> {
		self.calls.lock().push(file.name.clone());
		for percent in [30, 60, 100] {
			progress.report(percent);
			self.progress_seen.lock().push(percent);
		}
		if self.fail {
			Err(HandlerError::new("storage unavailable"))
		} else {
			Ok(json!({"url": format!("https://files.example.com/{}", file.name)}))
		}
	}
}

fn widget(config: FileUploadConfig, notifier: Arc<RecordingNotifier>, uploader: Arc<ScriptedUploader>) -> FileUploadWidget {
	FileUploadWidget::new("attachment", config, notifier, Messages::new(Locale::En))
		.with_label("Attachment")
		.with_uploader(uploader)
}

#[rstest]
#[tokio::test]
async fn test_disallowed_extension_never_reaches_uploader(notifier: Arc<RecordingNotifier>) {
	let uploader = Arc::new(ScriptedUploader::default());
	let upload = widget(
		FileUploadConfig::default().with_allowed_types(["pdf"]),
		notifier.clone(),
		uploader.clone(),
	);

	let result = upload
		.select_and_upload(SelectedFile::new("f1", "contract.docx", 2048))
		.await;

	assert!(matches!(result, Err(UploadRejection::Extension { .. })));
	assert_eq!(
		notifier.errors(),
		vec!["Unsupported file type. Accepted types: PDF"]
	);
	assert!(uploader.calls.lock().is_empty());
	assert_eq!(upload.value(), Value::Null);
}

#[rstest]
#[tokio::test]
async fn test_oversized_file_is_rejected(notifier: Arc<RecordingNotifier>) {
	let uploader = Arc::new(ScriptedUploader::default());
	let upload = widget(
		FileUploadConfig::default().with_max_size_mb(1.0),
		notifier.clone(),
		uploader.clone(),
	);

	let result = upload.select(SelectedFile::new("f1", "scan.pdf", 2 * 1024 * 1024));

	assert!(matches!(result, Err(UploadRejection::TooLarge { .. })));
	assert_eq!(
		notifier.errors(),
		vec!["File exceeds the 1MB limit. Your file: 2.00MB"]
	);
	assert!(upload.files().is_empty());
}

#[rstest]
#[tokio::test]
async fn test_successful_upload_binds_single_file(notifier: Arc<RecordingNotifier>) {
	let uploader = Arc::new(ScriptedUploader::default());
	let upload = widget(FileUploadConfig::default().required(), notifier.clone(), uploader.clone());
	assert_eq!(upload.validate(), Err("Attachment is required".to_string()));

	upload.select(SelectedFile::new("f1", "contract.pdf", 1024)).unwrap();
	assert_eq!(upload.files()[0].status, UploadStatus::Queued);

	let succeeded = upload.upload_pending().await;

	assert_eq!(succeeded, 1);
	assert_eq!(*uploader.progress_seen.lock(), vec![30, 60, 100]);
	assert_eq!(notifier.successes(), vec!["contract.pdf uploaded successfully."]);
	let value = upload.value();
	assert_eq!(value["name"], "contract.pdf");
	assert_eq!(value["status"], "done");
	assert_eq!(value["response"]["url"], "https://files.example.com/contract.pdf");
	assert_eq!(upload.validate(), Ok(()));
}

#[rstest]
#[tokio::test]
async fn test_failed_upload_is_dropped_from_value(notifier: Arc<RecordingNotifier>) {
	let uploader = Arc::new(ScriptedUploader {
		fail: true,
		..ScriptedUploader::default()
	});
	let upload = widget(FileUploadConfig::default().multiple(), notifier.clone(), uploader);

	upload.select(SelectedFile::new("f1", "a.pdf", 10)).unwrap();
	upload.select(SelectedFile::new("f2", "b.doc", 10)).unwrap();
	let succeeded = upload.upload_pending().await;

	assert_eq!(succeeded, 0);
	assert_eq!(upload.value(), json!([]));
	assert_eq!(
		notifier.errors(),
		vec![
			"a.pdf failed to upload. Please try again.",
			"b.doc failed to upload. Please try again."
		]
	);
}

#[rstest]
fn test_single_mode_replaces_and_remove_clears(notifier: Arc<RecordingNotifier>) {
	let upload = widget(
		FileUploadConfig::default(),
		notifier,
		Arc::new(ScriptedUploader::default()),
	);

	upload.select(SelectedFile::new("f1", "a.pdf", 10)).unwrap();
	upload.select(SelectedFile::new("f2", "b.pdf", 10)).unwrap();
	assert_eq!(upload.files().len(), 1);
	assert_eq!(upload.value()["uid"], "f2");

	assert!(upload.remove("f2"));
	assert!(!upload.remove("f2"));
	assert_eq!(upload.value(), Value::Null);
}

#[rstest]
fn test_widget_describes_limits(notifier: Arc<RecordingNotifier>) {
	let upload = widget(
		FileUploadConfig::default().multiple(),
		notifier,
		Arc::new(ScriptedUploader::default()),
	);

	assert_eq!(
		upload.widget(),
		Widget::FileUpload {
			accept: vec![".pdf".to_string(), ".doc".to_string(), ".docx".to_string()],
			multiple: true,
			max_size_mb: 50.0,
			hint: "Supports PDF, DOC, DOCX. Maximum size 50MB. Multiple files allowed.".to_string(),
		}
	);
}

#[rstest]
#[tokio::test]
async fn test_simulated_uploader_completes(notifier: Arc<RecordingNotifier>) {
	let upload = FileUploadWidget::new(
		"attachment",
		FileUploadConfig::default(),
		notifier.clone(),
		Messages::new(Locale::En),
	)
	.with_uploader(Arc::new(SimulatedUploader::new(Duration::from_millis(1), 25)));

	let ok = upload
		.select_and_upload(SelectedFile::new("f1", "a.pdf", 10))
		.await
		.unwrap();

	assert!(ok);
	assert_eq!(upload.files()[0].status, UploadStatus::Done);
	assert_eq!(notifier.successes().len(), 1);
}

#[rstest]
#[tokio::test]
async fn test_simulated_uploader_failure_injection(notifier: Arc<RecordingNotifier>) {
	let upload = FileUploadWidget::new(
		"attachment",
		FileUploadConfig::default(),
		notifier.clone(),
		Messages::new(Locale::En),
	)
	.with_uploader(Arc::new(
		SimulatedUploader::new(Duration::from_millis(1), 50).with_failure_rate(1.0),
	));

	let ok = upload
		.select_and_upload(SelectedFile::new("f1", "a.pdf", 10))
		.await
		.unwrap();

	assert!(!ok);
	assert!(upload.files().is_empty());
	assert_eq!(notifier.errors(), vec!["a.pdf failed to upload. Please try again."]);
}

#[rstest]
#[tokio::test]
async fn test_simulated_uploader_with_zero_tick_completes(notifier: Arc<RecordingNotifier>) {
	let upload = FileUploadWidget::new(
		"attachment",
		FileUploadConfig::default(),
		notifier.clone(),
		Messages::new(Locale::En),
	)
	.with_uploader(Arc::new(SimulatedUploader::new(Duration::ZERO, 50)));

	let ok = upload
		.select_and_upload(SelectedFile::new("f1", "a.pdf", 10))
		.await
		.unwrap();

	assert!(ok);
	assert_eq!(upload.files()[0].status, UploadStatus::Done);
}
