//! Translation of transport failures into user-facing messages

use crate::error::HandlerError;
use crate::i18n::Messages;
use crate::session::Session;

/// Failure reported by the host's HTTP layer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportFailure {
	#[error("request timed out")]
	Timeout,
	#[error("network unreachable")]
	Network,
	#[error("server responded with status {status}")]
	Status {
		status: u16,
		/// Message carried in the response body, if any
		message: Option<String>,
	},
}

impl TransportFailure {
	pub fn status(status: u16) -> Self {
		Self::Status {
			status,
			message: None,
		}
	}

	pub fn status_with_message(status: u16, message: impl Into<String>) -> Self {
		Self::Status {
			status,
			message: Some(message.into()),
		}
	}

	/// Human-readable message for this failure
	///
	/// A server-provided message wins for statuses without a dedicated text.
	///
	/// # Examples
	///
	/// ```
	/// use steady_core::{Locale, Messages, TransportFailure};
	///
	/// let messages = Messages::new(Locale::En);
	/// assert_eq!(
	///     TransportFailure::status(404).user_message(&messages),
	///     "The requested resource was not found."
	/// );
	/// assert_eq!(
	///     TransportFailure::status_with_message(422, "SKU taken").user_message(&messages),
	///     "SKU taken"
	/// );
	/// ```
	pub fn user_message(&self, messages: &Messages) -> String {
		match self {
			Self::Timeout => messages.request_timeout().to_string(),
			Self::Network => messages.network_error().to_string(),
			Self::Status { status, message } => match status {
				401 => messages.session_expired().to_string(),
				403 => messages.forbidden().to_string(),
				404 => messages.not_found().to_string(),
				500 => messages.server_error().to_string(),
				_ => match message.as_deref() {
					Some(text) if !text.is_empty() => text.to_string(),
					_ => messages.unexpected_error().to_string(),
				},
			},
		}
	}

	pub fn is_unauthorized(&self) -> bool {
		matches!(self, Self::Status { status: 401, .. })
	}

	/// Convert into a [`HandlerError`] carrying the user message.
	///
	/// A 401 also ends the given session.
	pub fn into_handler_error(self, messages: &Messages, session: Option<&Session>) -> HandlerError {
		if self.is_unauthorized()
			&& let Some(session) = session
		{
			tracing::warn!("received 401, clearing session");
			session.logout();
		}
		HandlerError::new(self.user_message(messages))
	}
}
