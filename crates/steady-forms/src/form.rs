//! The form engine
//!
//! [`FormEngine`] owns the runtime state of one form (values, touched set,
//! errors) and runs the submit and cancel protocols. All methods take
//! `&self`; state sits behind a mutex that is never held across an await,
//! so the engine can be shared with the host UI while a submit is in flight.

use crate::descriptor::FieldSet;
use crate::error::{FieldErrors, FormError, FormResult};
use crate::initial::derive_initial_values;
use crate::schema::ValidationSchema;
use crate::widget::{RenderedField, normalize_value};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use steady_core::{
	HandlerError, Locale, Messages, Navigator, Notifier, Session, TracingNotifier, Value, ValueMap,
};

/// Receives the value map of a valid submission.
#[async_trait]
pub trait SubmitHandler: Send + Sync {
	async fn submit(&self, values: &ValueMap) -> Result<(), HandlerError>;
}

struct FnSubmitHandler<F>(F);

#[async_trait]
impl<F, Fut> SubmitHandler for FnSubmitHandler<F>
where
	F: Fn(ValueMap) -> Fut + Send + Sync + 'static,
	Fut: Future<Output = Result<(), HandlerError>> + Send + 'static,
{
	async fn submit(&self, values: &ValueMap) -> Result<(), HandlerError> {
		(self.0)(values.clone()).await
	}
}

/// Adapt an async closure into a [`SubmitHandler`]
///
/// # Examples
///
/// ```
/// use steady_forms::submit_fn;
/// use steady_core::HandlerError;
///
/// let handler = submit_fn(|values| async move {
///     if values.contains_key("name") {
///         Ok(())
///     } else {
///         Err(HandlerError::new("name missing"))
///     }
/// });
/// # let _ = handler;
/// ```
pub fn submit_fn<F, Fut>(f: F) -> impl SubmitHandler
where
	F: Fn(ValueMap) -> Fut + Send + Sync + 'static,
	Fut: Future<Output = Result<(), HandlerError>> + Send + 'static,
{
	FnSubmitHandler(f)
}

pub type CancelHandler = Arc<dyn Fn() + Send + Sync>;

/// Result of a submit attempt that was allowed to run.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
	/// Handler succeeded
	Submitted,
	/// Validation failed; the handler was not called
	Invalid(FieldErrors),
	/// Handler returned an error, already shown to the user
	Failed(HandlerError),
}

impl SubmitOutcome {
	pub fn is_submitted(&self) -> bool {
		matches!(self, Self::Submitted)
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CancelOutcome {
	/// The caller's cancel handler ran
	Handled,
	/// The navigator was sent to this path
	Navigated(String),
	/// Nothing configured
	Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonState {
	pub label: String,
	pub busy: bool,
	pub disabled: bool,
}

/// Drawable snapshot of a form.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormView {
	pub title: Option<String>,
	pub fields: Vec<RenderedField>,
	pub submit: ButtonState,
	pub cancel: Option<ButtonState>,
}

#[derive(Debug, Default)]
struct FormState {
	values: ValueMap,
	touched: HashSet<String>,
	errors: FieldErrors,
}

/// Clears the busy flag however the submit ends.
struct SubmitGuard<'a>(&'a AtomicBool);

impl Drop for SubmitGuard<'_> {
	fn drop(&mut self) {
		self.0.store(false, Ordering::Release);
	}
}

pub struct FormEngine {
	title: Option<String>,
	fields: FieldSet,
	schema: ValidationSchema,
	initial: ValueMap,
	handler: Arc<dyn SubmitHandler>,
	notifier: Arc<dyn Notifier>,
	navigator: Option<Arc<dyn Navigator>>,
	on_cancel: Option<CancelHandler>,
	cancel_path: Option<String>,
	show_cancel: bool,
	submit_label: Option<String>,
	cancel_label: Option<String>,
	messages: Messages,
	session: Option<Session>,
	loading: AtomicBool,
	submitting: AtomicBool,
	state: Mutex<FormState>,
}

impl FormEngine {
	/// Create an engine with a derived schema and kind-default values
	///
	/// # Examples
	///
	/// ```
	/// use steady_forms::{FieldDescriptor, FieldSet, FormEngine, submit_fn};
	/// use serde_json::json;
	///
	/// let fields = FieldSet::new(vec![FieldDescriptor::text("name").required()]).unwrap();
	/// let form = FormEngine::new(fields, submit_fn(|_| async { Ok(()) }));
	///
	/// assert_eq!(form.value("name"), Some(json!("")));
	/// assert!(form.render().fields[0].required);
	/// ```
	pub fn new(fields: FieldSet, handler: impl SubmitHandler + 'static) -> Self {
		let schema = ValidationSchema::derive(&fields);
		let values = derive_initial_values(&fields, &ValueMap::new());
		Self {
			title: None,
			fields,
			schema,
			initial: ValueMap::new(),
			handler: Arc::new(handler),
			notifier: Arc::new(TracingNotifier),
			navigator: None,
			on_cancel: None,
			cancel_path: None,
			show_cancel: true,
			submit_label: None,
			cancel_label: None,
			messages: Messages::default(),
			session: None,
			loading: AtomicBool::new(false),
			submitting: AtomicBool::new(false),
			state: Mutex::new(FormState {
				values,
				..FormState::default()
			}),
		}
	}

	pub fn with_title(mut self, title: impl Into<String>) -> Self {
		self.title = Some(title.into());
		self
	}

	pub fn with_initial_values(mut self, initial: ValueMap) -> Self {
		self.state.get_mut().values = derive_initial_values(&self.fields, &initial);
		self.initial = initial;
		self
	}

	/// Use `schema` as-is instead of deriving one
	pub fn with_schema(mut self, schema: ValidationSchema) -> Self {
		self.schema = schema;
		self
	}

	pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
		self.notifier = notifier;
		self
	}

	pub fn with_navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
		self.navigator = Some(navigator);
		self
	}

	pub fn with_cancel_path(mut self, path: impl Into<String>) -> Self {
		self.cancel_path = Some(path.into());
		self
	}

	pub fn with_cancel_handler<F>(mut self, handler: F) -> Self
	where
		F: Fn() + Send + Sync + 'static,
	{
		self.on_cancel = Some(Arc::new(handler));
		self
	}

	pub fn without_cancel_button(mut self) -> Self {
		self.show_cancel = false;
		self
	}

	pub fn with_submit_label(mut self, label: impl Into<String>) -> Self {
		self.submit_label = Some(label.into());
		self
	}

	pub fn with_cancel_label(mut self, label: impl Into<String>) -> Self {
		self.cancel_label = Some(label.into());
		self
	}

	pub fn with_locale(mut self, locale: Locale) -> Self {
		self.messages = Messages::new(locale);
		self
	}

	/// Count submits as session loading operations
	pub fn with_session(mut self, session: Session) -> Self {
		self.session = Some(session);
		self
	}

	pub fn fields(&self) -> &FieldSet {
		&self.fields
	}

	pub fn schema(&self) -> &ValidationSchema {
		&self.schema
	}

	pub fn messages(&self) -> &Messages {
		&self.messages
	}

	pub fn values(&self) -> ValueMap {
		self.state.lock().values.clone()
	}

	pub fn value(&self, name: &str) -> Option<Value> {
		self.state.lock().values.get(name).cloned()
	}

	fn ensure_field(&self, name: &str) -> FormResult<()> {
		if self.fields.contains(name) {
			Ok(())
		} else {
			Err(FormError::UnknownField(name.to_string()))
		}
	}

	/// Set a field's value, normalized for its kind
	///
	/// A touched field is re-validated right away.
	pub fn set_value(&self, name: &str, raw: Value) -> FormResult<()> {
		let field = self
			.fields
			.get(name)
			.ok_or_else(|| FormError::UnknownField(name.to_string()))?;
		let value = normalize_value(&field.kind, raw);

		let mut state = self.state.lock();
		state.values.insert(name.to_string(), value);
		if state.touched.contains(name) {
			self.refresh_error(&mut state, name);
		}
		Ok(())
	}

	/// Mark a field touched (blur) and validate it
	pub fn touch(&self, name: &str) -> FormResult<()> {
		self.ensure_field(name)?;
		let mut state = self.state.lock();
		state.touched.insert(name.to_string());
		self.refresh_error(&mut state, name);
		Ok(())
	}

	pub fn is_touched(&self, name: &str) -> bool {
		self.state.lock().touched.contains(name)
	}

	/// Validate one field and store the result
	pub fn validate_field(&self, name: &str) -> FormResult<Option<String>> {
		self.ensure_field(name)?;
		let mut state = self.state.lock();
		Ok(self.refresh_error(&mut state, name))
	}

	fn refresh_error(&self, state: &mut FormState, name: &str) -> Option<String> {
		let error = self.schema.validate_field(name, &state.values, &self.messages);
		state.errors.remove(name);
		if let Some(message) = &error {
			state.errors.insert(name, message.clone());
		}
		error
	}

	/// Validate all fields without touching them
	pub fn validate(&self) -> Result<(), FieldErrors> {
		let mut state = self.state.lock();
		let result = self.schema.validate(&state.values, &self.messages);
		state.errors = result.clone().err().unwrap_or_default();
		result
	}

	/// All stored errors, touched or not
	pub fn errors(&self) -> FieldErrors {
		self.state.lock().errors.clone()
	}

	/// Error of a field, once touched
	pub fn error(&self, name: &str) -> Option<String> {
		let state = self.state.lock();
		if state.touched.contains(name) {
			state.errors.get(name).map(str::to_string)
		} else {
			None
		}
	}

	/// Reset values, touched set and errors from new initial values
	pub fn reinitialize(&self, initial: ValueMap) {
		let mut state = self.state.lock();
		state.values = derive_initial_values(&self.fields, &initial);
		state.touched.clear();
		state.errors = FieldErrors::new();
		tracing::debug!(fields = self.fields.len(), "form reinitialized");
	}

	/// Reset to the values the engine was built with
	pub fn reset(&self) {
		self.reinitialize(self.initial.clone());
	}

	/// External loading flag, e.g. while the record is being fetched
	pub fn set_loading(&self, loading: bool) {
		self.loading.store(loading, Ordering::Release);
	}

	pub fn is_submitting(&self) -> bool {
		self.submitting.load(Ordering::Acquire)
	}

	fn is_busy(&self) -> bool {
		self.is_submitting() || self.loading.load(Ordering::Acquire)
	}

	/// Validate and hand the values to the submit handler
	///
	/// Returns [`FormError::Busy`] while another submit is in flight.
	/// Validation and handler failures are reported in the outcome; the
	/// form stays editable either way.
	pub async fn submit(&self) -> FormResult<SubmitOutcome> {
		if self
			.submitting
			.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
			.is_err()
		{
			tracing::debug!("submit refused, another submission is in flight");
			return Err(FormError::Busy);
		}
		let _guard = SubmitGuard(&self.submitting);

		let values = {
			let mut state = self.state.lock();
			if let Err(errors) = self.schema.validate(&state.values, &self.messages) {
				let names: Vec<String> = self.fields.names().map(str::to_string).collect();
				state.touched.extend(names);
				state.errors = errors.clone();
				tracing::debug!(failed = errors.len(), "submit blocked by validation");
				return Ok(SubmitOutcome::Invalid(errors));
			}
			state.errors = FieldErrors::new();
			state.values.clone()
		};

		let _loading = self.session.as_ref().map(Session::begin_loading);
		match self.handler.submit(&values).await {
			Ok(()) => {
				tracing::info!(fields = values.len(), "form submitted");
				self.notifier.success(self.messages.save_succeeded());
				Ok(SubmitOutcome::Submitted)
			}
			Err(err) => {
				tracing::warn!(error = %err, "submit handler failed");
				self.notifier
					.error(err.message_or(self.messages.save_failed()));
				Ok(SubmitOutcome::Failed(err))
			}
		}
	}

	/// Run the cancel protocol
	pub fn cancel(&self) -> CancelOutcome {
		if let Some(handler) = &self.on_cancel {
			handler();
			return CancelOutcome::Handled;
		}
		match (&self.cancel_path, &self.navigator) {
			(Some(path), Some(navigator)) => {
				navigator.navigate(path);
				CancelOutcome::Navigated(path.clone())
			}
			(Some(path), None) => {
				tracing::warn!(%path, "cancel path set without a navigator");
				CancelOutcome::Ignored
			}
			(None, _) => CancelOutcome::Ignored,
		}
	}

	pub fn render(&self) -> FormView {
		let state = self.state.lock();
		let fields = self
			.fields
			.iter()
			.map(|field| {
				let value = state.values.get(&field.name).cloned().unwrap_or(Value::Null);
				let error = state
					.touched
					.contains(&field.name)
					.then(|| state.errors.get(&field.name).map(str::to_string))
					.flatten();
				RenderedField::new(field, value, error)
			})
			.collect();
		drop(state);

		let busy = self.is_busy();
		FormView {
			title: self.title.clone(),
			fields,
			submit: ButtonState {
				label: self
					.submit_label
					.clone()
					.unwrap_or_else(|| self.messages.save().to_string()),
				busy,
				disabled: false,
			},
			cancel: self.show_cancel.then(|| ButtonState {
				label: self
					.cancel_label
					.clone()
					.unwrap_or_else(|| self.messages.cancel().to_string()),
				busy: false,
				disabled: busy,
			}),
		}
	}
}

impl std::fmt::Debug for FormEngine {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("FormEngine")
			.field("title", &self.title)
			.field("fields", &self.fields.len())
			.field("submitting", &self.is_submitting())
			.finish()
	}
}
