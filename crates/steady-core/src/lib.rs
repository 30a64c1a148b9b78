//! Shared building blocks for the STEADY Admin engines
//!
//! This crate holds everything the form engine and the list/search engine
//! have in common:
//! - JSON value helpers and the ordered [`ValueMap`] used as form state
//! - Choice options for selects, radio groups and checkbox groups
//! - The localized [`Messages`] catalog
//! - Seams to the host UI: [`Notifier`], [`Confirmer`] and [`Navigator`]
//! - [`HandlerError`], the failure type of every caller-supplied callback
//! - The explicit [`Session`] context (tokens, user, loading counter)
//! - [`TransportFailure`] translation into human-readable messages

pub mod choice;
pub mod error;
pub mod i18n;
pub mod notify;
pub mod session;
pub mod transport;
pub mod value;

pub use choice::{ChoiceOption, Direction};
pub use error::HandlerError;
pub use i18n::{Locale, Messages, UnknownLocale};
pub use notify::{
	Confirmer, Navigator, Notification, NotificationLevel, Notifier, TracingNotifier,
};
pub use session::{AuthTokens, LoadingGuard, Session, UserProfile};
pub use transport::TransportFailure;
pub use value::{Value, ValueMap, is_blank, is_blank_trimmed};
