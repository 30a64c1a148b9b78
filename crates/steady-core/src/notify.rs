//! Seams to the host UI
//!
//! The engines never draw toasts, dialogs or route changes themselves. They
//! call into these traits, and the host (or a test double) decides what a
//! notification or a confirmation looks like.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
	Success,
	Info,
	Warning,
	Error,
}

/// A toast-style message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
	pub level: NotificationLevel,
	pub message: String,
}

impl Notification {
	pub fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
		Self {
			level,
			message: message.into(),
		}
	}
}

/// Shows notifications to the user.
pub trait Notifier: Send + Sync {
	fn notify(&self, notification: Notification);

	fn success(&self, message: &str) {
		self.notify(Notification::new(NotificationLevel::Success, message));
	}

	fn info(&self, message: &str) {
		self.notify(Notification::new(NotificationLevel::Info, message));
	}

	fn warning(&self, message: &str) {
		self.notify(Notification::new(NotificationLevel::Warning, message));
	}

	fn error(&self, message: &str) {
		self.notify(Notification::new(NotificationLevel::Error, message));
	}
}

/// Notifier that writes every notification to the `tracing` log.
///
/// Used when the host has not wired up its own toast layer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
	fn notify(&self, notification: Notification) {
		match notification.level {
			NotificationLevel::Success | NotificationLevel::Info => {
				tracing::info!(level = ?notification.level, "{}", notification.message);
			}
			NotificationLevel::Warning => {
				tracing::warn!("{}", notification.message);
			}
			NotificationLevel::Error => {
				tracing::error!("{}", notification.message);
			}
		}
	}
}

/// Asks the user to confirm a destructive action.
///
/// Resolves to `true` when the user accepted.
#[async_trait]
pub trait Confirmer: Send + Sync {
	async fn confirm(&self, title: &str, content: &str) -> bool;
}

/// Moves the host UI to another route.
pub trait Navigator: Send + Sync {
	fn navigate(&self, path: &str);
}
