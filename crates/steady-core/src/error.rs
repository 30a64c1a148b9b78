//! Failure type of caller-supplied callbacks

/// Error returned by a submit, search or upload callback.
///
/// The message is shown to the user verbatim. A missing or empty message
/// is replaced by a localized generic text at the display site.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", self.message.as_deref().unwrap_or("operation failed"))]
pub struct HandlerError {
	message: Option<String>,
}

impl HandlerError {
	/// Create an error with a user-facing message
	///
	/// # Examples
	///
	/// ```
	/// use steady_core::HandlerError;
	///
	/// let err = HandlerError::new("Product name already exists");
	/// assert_eq!(err.message(), Some("Product name already exists"));
	/// assert_eq!(err.to_string(), "Product name already exists");
	/// ```
	pub fn new(message: impl Into<String>) -> Self {
		Self {
			message: Some(message.into()),
		}
	}

	/// Create an error that carries no message
	pub fn without_message() -> Self {
		Self { message: None }
	}

	pub fn message(&self) -> Option<&str> {
		self.message.as_deref()
	}

	/// The message, or `fallback` when it is absent or empty
	///
	/// # Examples
	///
	/// ```
	/// use steady_core::HandlerError;
	///
	/// assert_eq!(HandlerError::new("").message_or("Something failed"), "Something failed");
	/// assert_eq!(HandlerError::without_message().message_or("Something failed"), "Something failed");
	/// assert_eq!(HandlerError::new("Boom").message_or("Something failed"), "Boom");
	/// ```
	pub fn message_or<'a>(&'a self, fallback: &'a str) -> &'a str {
		match self.message.as_deref() {
			Some(message) if !message.is_empty() => message,
			_ => fallback,
		}
	}
}

impl From<String> for HandlerError {
	fn from(message: String) -> Self {
		Self::new(message)
	}
}

impl From<&str> for HandlerError {
	fn from(message: &str) -> Self {
		Self::new(message)
	}
}
