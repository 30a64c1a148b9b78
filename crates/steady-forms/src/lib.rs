//! Declarative form engine
//!
//! Describe fields once with [`FieldDescriptor`]s and let the engine derive
//! everything else:
//!
//! - initial values ([`derive_initial_values`])
//! - a validation schema ([`ValidationSchema::derive`])
//! - a render tree of typed [`Widget`]s ([`FormEngine::render`])
//! - the submit and cancel protocols ([`FormEngine::submit`], [`FormEngine::cancel`])
//!
//! The [`range`] and [`upload`] modules hold the two compound widgets that
//! are also used outside of forms, by the list/search engine.
//!
//! ## Example
//!
//! ```
//! use steady_forms::{FieldDescriptor, FieldSet, FormEngine, SubmitOutcome, submit_fn};
//! use steady_core::Locale;
//! use serde_json::json;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let fields = FieldSet::new(vec![
//!     FieldDescriptor::number("price").with_label("Price").with_min(0.0).required(),
//! ])
//! .unwrap();
//! let form = FormEngine::new(fields, submit_fn(|_| async { Ok(()) })).with_locale(Locale::En);
//!
//! form.set_value("price", json!(-5)).unwrap();
//! match form.submit().await.unwrap() {
//!     SubmitOutcome::Invalid(errors) => assert_eq!(errors.get("price"), Some("Minimum value is 0")),
//!     other => panic!("unexpected {other:?}"),
//! }
//! # }
//! ```

pub mod descriptor;
pub mod error;
pub mod form;
pub mod initial;
pub mod range;
pub mod schema;
pub mod upload;
pub mod widget;

pub use descriptor::{CustomWidget, FieldDescriptor, FieldKind, FieldSet, SelectMode};
pub use error::{FieldErrors, FormError, FormResult};
pub use form::{
	ButtonState, CancelHandler, CancelOutcome, FormEngine, FormView, SubmitHandler, SubmitOutcome,
	submit_fn,
};
pub use initial::derive_initial_values;
pub use range::{
	DateRange, DateRangeInput, NumberRange, NumberRangeInput, RangeInput, RangeKind, TextRange,
	TextRangeInput,
};
pub use schema::{Rule, ValidationSchema};
pub use upload::{
	FileUploadConfig, FileUploadWidget, ProgressReporter, SelectedFile, SimulatedUploader,
	UploadFile, UploadRejection, UploadStatus, Uploader,
};
pub use widget::{RenderedField, Widget, normalize_value, widget_for};
