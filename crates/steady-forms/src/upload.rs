//! File upload widget
//!
//! Files pass a client-side check (extension allow-list, size limit) before
//! anything else happens. Accepted files are queued, then handed to an
//! [`Uploader`] which reports progress through a [`ProgressReporter`]:
//!
//! ```text
//! queued ──▶ uploading(percent) ──▶ done
//!                   │
//!                   └──────────────▶ error (dropped from the value)
//! ```

use crate::widget::Widget;
use async_trait::async_trait;
use parking_lot::Mutex;
use rand::Rng;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use steady_conf::UploadSettings;
use steady_core::{HandlerError, Messages, Notifier, Value};

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Client-side limits and mode of an upload widget.
#[derive(Debug, Clone, PartialEq)]
pub struct FileUploadConfig {
	/// Lowercase extensions without the dot
	pub allowed_types: Vec<String>,
	pub max_size_mb: f64,
	pub multiple: bool,
	pub required: bool,
	pub disabled: bool,
}

impl Default for FileUploadConfig {
	fn default() -> Self {
		Self {
			allowed_types: vec!["pdf".to_string(), "doc".to_string(), "docx".to_string()],
			max_size_mb: 50.0,
			multiple: false,
			required: false,
			disabled: false,
		}
	}
}

impl FileUploadConfig {
	/// Limits taken from the `[upload]` settings section
	pub fn from_settings(settings: &UploadSettings) -> Self {
		Self::default()
			.with_allowed_types(&settings.allowed_types)
			.with_max_size_mb(settings.max_size_mb)
	}

	pub fn with_allowed_types<I, S>(mut self, types: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		self.allowed_types = types
			.into_iter()
			.map(|t| t.as_ref().trim_start_matches('.').to_ascii_lowercase())
			.collect();
		self
	}

	pub fn with_max_size_mb(mut self, max_size_mb: f64) -> Self {
		self.max_size_mb = max_size_mb;
		self
	}

	pub fn multiple(mut self) -> Self {
		self.multiple = true;
		self
	}

	pub fn required(mut self) -> Self {
		self.required = true;
		self
	}

	pub fn disabled(mut self) -> Self {
		self.disabled = true;
		self
	}

	/// Check extension, then size
	///
	/// # Examples
	///
	/// ```
	/// use steady_forms::{FileUploadConfig, SelectedFile, UploadRejection};
	///
	/// let config = FileUploadConfig::default().with_allowed_types(["pdf"]);
	/// assert!(config.check(&SelectedFile::new("1", "contract.PDF", 1024)).is_ok());
	/// assert!(matches!(
	///     config.check(&SelectedFile::new("2", "contract.docx", 1024)),
	///     Err(UploadRejection::Extension { .. })
	/// ));
	/// ```
	pub fn check(&self, file: &SelectedFile) -> Result<(), UploadRejection> {
		let accepted = file
			.extension()
			.is_some_and(|ext| self.allowed_types.iter().any(|t| *t == ext));
		if !accepted {
			return Err(UploadRejection::Extension {
				file_name: file.name.clone(),
				allowed: self.allowed_types.clone(),
			});
		}

		let size_mb = file.size_mb();
		if size_mb > self.max_size_mb {
			return Err(UploadRejection::TooLarge {
				file_name: file.name.clone(),
				max_mb: self.max_size_mb,
				actual_mb: size_mb,
			});
		}
		Ok(())
	}
}

/// Why a file was refused before upload.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UploadRejection {
	#[error("{file_name}: extension not in {allowed:?}")]
	Extension {
		file_name: String,
		allowed: Vec<String>,
	},
	#[error("{file_name}: {actual_mb:.2}MB exceeds {max_mb}MB")]
	TooLarge {
		file_name: String,
		max_mb: f64,
		actual_mb: f64,
	},
}

impl UploadRejection {
	pub fn user_message(&self, messages: &Messages) -> String {
		match self {
			Self::Extension { allowed, .. } => messages.upload_type_rejected(allowed),
			Self::TooLarge {
				max_mb, actual_mb, ..
			} => messages.upload_too_large(*max_mb, *actual_mb),
		}
	}
}

/// A file picked by the user, before any upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedFile {
	pub uid: String,
	pub name: String,
	/// Size in bytes
	pub size: u64,
	pub content_type: Option<String>,
}

impl SelectedFile {
	pub fn new(uid: impl Into<String>, name: impl Into<String>, size: u64) -> Self {
		Self {
			uid: uid.into(),
			name: name.into(),
			size,
			content_type: None,
		}
	}

	pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
		self.content_type = Some(content_type.into());
		self
	}

	/// Lowercase text after the last dot
	pub fn extension(&self) -> Option<String> {
		self.name
			.rsplit_once('.')
			.map(|(_, ext)| ext.to_ascii_lowercase())
			.filter(|ext| !ext.is_empty())
	}

	pub fn size_mb(&self) -> f64 {
		self.size as f64 / BYTES_PER_MB
	}

	/// Size for display, e.g. `"1.50 MB"`
	pub fn display_size(&self) -> String {
		format!("{:.2} MB", self.size_mb())
	}
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum UploadStatus {
	Queued,
	Uploading { percent: u8 },
	Done,
	Error { message: String },
}

/// A file in the widget's list, as bound to the form value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadFile {
	pub uid: String,
	pub name: String,
	pub size: u64,
	#[serde(flatten)]
	pub status: UploadStatus,
	/// Uploader response once done
	#[serde(skip_serializing_if = "Option::is_none")]
	pub response: Option<Value>,
}

impl UploadFile {
	fn queued(file: &SelectedFile) -> Self {
		Self {
			uid: file.uid.clone(),
			name: file.name.clone(),
			size: file.size,
			status: UploadStatus::Queued,
			response: None,
		}
	}

	pub fn display_size(&self) -> String {
		format!("{:.2} MB", self.size as f64 / BYTES_PER_MB)
	}
}

type FileList = Arc<Mutex<Vec<UploadFile>>>;

/// Handle through which an uploader reports progress for one file.
#[derive(Debug, Clone)]
pub struct ProgressReporter {
	files: FileList,
	uid: String,
}

impl ProgressReporter {
	/// Record progress; values above 100 are clamped
	pub fn report(&self, percent: u8) {
		let percent = percent.min(100);
		if let Some(file) = self.files.lock().iter_mut().find(|f| f.uid == self.uid) {
			file.status = UploadStatus::Uploading { percent };
		}
	}

	pub fn uid(&self) -> &str {
		&self.uid
	}
}

/// Performs the actual transfer of one file.
#[async_trait]
pub trait Uploader: Send + Sync {
	async fn upload(&self, file: &SelectedFile, progress: &ProgressReporter) -> Result<Value, HandlerError>;
}

/// Uploader that fakes progress on a timer.
///
/// Progress advances by `step` percent every `tick`. With a non-zero
/// failure rate, a doomed upload fails once it passes half way.
#[derive(Debug, Clone)]
pub struct SimulatedUploader {
	tick: Duration,
	step: u8,
	failure_rate: f64,
}

const MIN_TICK: Duration = Duration::from_millis(1);

impl Default for SimulatedUploader {
	fn default() -> Self {
		Self::new(Duration::from_millis(200), 10)
	}
}

impl SimulatedUploader {
	/// `tick` is at least one millisecond
	pub fn new(tick: Duration, step: u8) -> Self {
		Self {
			tick: tick.max(MIN_TICK),
			step: step.clamp(1, 100),
			failure_rate: 0.0,
		}
	}

	pub fn from_settings(settings: &UploadSettings) -> Self {
		Self::new(
			Duration::from_millis(settings.simulated_tick_ms),
			settings.simulated_step_percent,
		)
	}

	/// Probability in `[0, 1]` that an upload fails
	pub fn with_failure_rate(mut self, rate: f64) -> Self {
		self.failure_rate = if rate.is_nan() { 0.0 } else { rate.clamp(0.0, 1.0) };
		self
	}
}

#[async_trait]
impl Uploader for SimulatedUploader {
	async fn upload(&self, file: &SelectedFile, progress: &ProgressReporter) -> Result<Value, HandlerError> {
		let doomed = self.failure_rate > 0.0 && rand::thread_rng().gen_bool(self.failure_rate);
		let mut interval = tokio::time::interval(self.tick);
		// The first tick completes immediately.
		interval.tick().await;

		let mut percent = 0u8;
		loop {
			interval.tick().await;
			percent = percent.saturating_add(self.step).min(100);
			if doomed && percent >= 50 {
				return Err(HandlerError::new("Upload failed"));
			}
			progress.report(percent);
			if percent == 100 {
				return Ok(json!({ "uid": file.uid, "name": file.name }));
			}
		}
	}
}

/// Upload widget bound to one form slot.
pub struct FileUploadWidget {
	name: String,
	label: Option<String>,
	config: FileUploadConfig,
	uploader: Arc<dyn Uploader>,
	notifier: Arc<dyn Notifier>,
	messages: Messages,
	files: FileList,
	pending: Mutex<Vec<SelectedFile>>,
}

impl FileUploadWidget {
	pub fn new(
		name: impl Into<String>,
		config: FileUploadConfig,
		notifier: Arc<dyn Notifier>,
		messages: Messages,
	) -> Self {
		Self {
			name: name.into(),
			label: None,
			config,
			uploader: Arc::new(SimulatedUploader::default()),
			notifier,
			messages,
			files: Arc::new(Mutex::new(Vec::new())),
			pending: Mutex::new(Vec::new()),
		}
	}

	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	pub fn with_uploader(mut self, uploader: Arc<dyn Uploader>) -> Self {
		self.uploader = uploader;
		self
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn config(&self) -> &FileUploadConfig {
		&self.config
	}

	/// Accept a picked file into the queue
	///
	/// A rejected file is reported through the notifier and never queued.
	/// In single mode the new file replaces the current one.
	pub fn select(&self, file: SelectedFile) -> Result<(), UploadRejection> {
		if let Err(rejection) = self.config.check(&file) {
			tracing::warn!(field = %self.name, %rejection, "file rejected before upload");
			self.notifier.error(&rejection.user_message(&self.messages));
			return Err(rejection);
		}

		let mut files = self.files.lock();
		let mut pending = self.pending.lock();
		if !self.config.multiple {
			files.clear();
			pending.clear();
		}
		files.push(UploadFile::queued(&file));
		pending.push(file);
		Ok(())
	}

	/// Upload every queued file, one after another
	///
	/// Returns how many uploads succeeded.
	pub async fn upload_pending(&self) -> usize {
		let queued: Vec<SelectedFile> = std::mem::take(&mut *self.pending.lock());
		let mut succeeded = 0;
		for file in queued {
			if self.upload_one(&file).await {
				succeeded += 1;
			}
		}
		succeeded
	}

	/// Select a file and upload it right away
	pub async fn select_and_upload(&self, file: SelectedFile) -> Result<bool, UploadRejection> {
		self.select(file)?;
		Ok(self.upload_pending().await > 0)
	}

	async fn upload_one(&self, file: &SelectedFile) -> bool {
		let reporter = ProgressReporter {
			files: Arc::clone(&self.files),
			uid: file.uid.clone(),
		};
		reporter.report(0);

		match self.uploader.upload(file, &reporter).await {
			Ok(response) => {
				if let Some(entry) = self.files.lock().iter_mut().find(|f| f.uid == file.uid) {
					entry.status = UploadStatus::Done;
					entry.response = Some(response);
				}
				tracing::info!(field = %self.name, file = %file.name, "upload finished");
				self.notifier.success(&self.messages.upload_succeeded(&file.name));
				true
			}
			Err(err) => {
				self.files.lock().retain(|f| f.uid != file.uid);
				tracing::warn!(field = %self.name, file = %file.name, error = %err, "upload failed");
				self.notifier.error(&self.messages.upload_failed(&file.name));
				false
			}
		}
	}

	/// Drop a file from the list
	pub fn remove(&self, uid: &str) -> bool {
		self.pending.lock().retain(|f| f.uid != uid);
		let mut files = self.files.lock();
		let before = files.len();
		files.retain(|f| f.uid != uid);
		files.len() != before
	}

	pub fn files(&self) -> Vec<UploadFile> {
		self.files.lock().clone()
	}

	/// Percent of a file currently uploading
	pub fn progress(&self, uid: &str) -> Option<u8> {
		self.files
			.lock()
			.iter()
			.find(|f| f.uid == uid)
			.and_then(|f| match f.status {
				UploadStatus::Uploading { percent } => Some(percent),
				_ => None,
			})
	}

	/// Bound value: a list in multiple mode, else the single file or `null`
	pub fn value(&self) -> Value {
		let files = self.files.lock();
		if self.config.multiple {
			serde_json::to_value(&*files).unwrap_or_else(|_| json!([]))
		} else {
			files
				.first()
				.and_then(|f| serde_json::to_value(f).ok())
				.unwrap_or(Value::Null)
		}
	}

	/// Required-check against uploaded files
	pub fn validate(&self) -> Result<(), String> {
		let has_done = self
			.files
			.lock()
			.iter()
			.any(|f| f.status == UploadStatus::Done);
		if self.config.required && !has_done {
			let label = self.label.as_deref().unwrap_or(&self.name);
			return Err(self.messages.required(label));
		}
		Ok(())
	}

	pub fn widget(&self) -> Widget {
		Widget::FileUpload {
			accept: self.config.allowed_types.iter().map(|t| format!(".{}", t)).collect(),
			multiple: self.config.multiple,
			max_size_mb: self.config.max_size_mb,
			hint: self.messages.upload_hint(
				&self.config.allowed_types,
				self.config.max_size_mb,
				self.config.multiple,
			),
		}
	}
}

impl std::fmt::Debug for FileUploadWidget {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("FileUploadWidget")
			.field("name", &self.name)
			.field("config", &self.config)
			.field("files", &self.files.lock().len())
			.finish()
	}
}
