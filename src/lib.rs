//! # STEADY Admin
//!
//! Declarative building blocks for administrative consoles: a form engine
//! that turns field descriptors into validated, renderable forms, and a
//! list engine that pairs a searchable filter form with a paginated,
//! sortable table.
//!
//! Both engines are headless. They hold state, validate input, emit
//! requests and produce serializable view snapshots; drawing the snapshot
//! and talking to the backend is left to the host.
//!
//! ## Feature Flags
//!
//! - `forms` - Form engine ([`forms`])
//! - `list` - List/search engine ([`list`]), implies `forms`
//! - `conf` - Settings loader ([`conf`])
//! - `full` (default) - Everything above
//!
//! ## Quick Example
//!
//! ```rust
//! # #[cfg(feature = "full")]
//! # {
//! use steady::prelude::*;
//! use serde_json::json;
//!
//! let settings = Settings::default();
//! let engine = ListEngine::new(
//!     vec![ColumnDescriptor::new("name", "Tên").sortable()],
//!     vec![SearchFieldDescriptor::text("name", "Tên")],
//!     search_fn(|_ticket, _request| {}),
//! )
//! .unwrap()
//! .with_settings(&settings);
//!
//! engine.set_value("name", json!("đèn")).unwrap();
//! let issued = engine.submit_search().issued().unwrap();
//! assert_eq!(issued.request.filters[0].operator, Operator::Eq);
//! # }
//! ```

pub mod core;

#[cfg(feature = "conf")]
pub mod conf;
#[cfg(feature = "forms")]
pub mod forms;
#[cfg(feature = "list")]
pub mod list;

pub use steady_core::{HandlerError, Locale, Messages, Value, ValueMap};

#[cfg(feature = "conf")]
pub use steady_conf::{Settings, SettingsError};

#[cfg(feature = "forms")]
pub use steady_forms::{FieldDescriptor, FieldSet, FormEngine, FormError, SubmitOutcome};

#[cfg(feature = "list")]
pub use steady_list::{ColumnDescriptor, ListEngine, SearchError, SearchFieldDescriptor};

/// Commonly used types.
pub mod prelude {
	pub use steady_core::{
		ChoiceOption, Confirmer, HandlerError, Locale, Messages, Navigator, Notifier, Session,
		Value, ValueMap,
	};

	#[cfg(feature = "conf")]
	pub use steady_conf::Settings;

	#[cfg(feature = "forms")]
	pub use steady_forms::{
		FieldDescriptor, FieldErrors, FieldKind, FieldSet, FileUploadConfig, FormEngine, FormView,
		Rule, SubmitHandler, SubmitOutcome, ValidationSchema, Widget, submit_fn,
	};

	#[cfg(feature = "list")]
	pub use steady_list::{
		ActionOutcome, ColumnDescriptor, ColumnKind, CreateAction, ListBody, ListEngine, ListView,
		Operator, PaginatedResponse, RowAction, SearchFieldDescriptor, SearchHandler, SearchOutcome,
		SearchRequest, SearchService, Sort, search_fn,
	};

	pub use async_trait::async_trait;
}
