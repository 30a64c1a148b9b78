//! Recording and scripted implementations of the host seams

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use steady_core::{Confirmer, Navigator, Notification, NotificationLevel, Notifier};

/// Notifier that keeps every notification for later assertions.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
	seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn notifications(&self) -> Vec<Notification> {
		self.seen.lock().clone()
	}

	/// Messages of the given level, oldest first
	pub fn messages(&self, level: NotificationLevel) -> Vec<String> {
		self.seen
			.lock()
			.iter()
			.filter(|n| n.level == level)
			.map(|n| n.message.clone())
			.collect()
	}

	pub fn successes(&self) -> Vec<String> {
		self.messages(NotificationLevel::Success)
	}

	pub fn errors(&self) -> Vec<String> {
		self.messages(NotificationLevel::Error)
	}

	pub fn last(&self) -> Option<Notification> {
		self.seen.lock().last().cloned()
	}

	pub fn is_empty(&self) -> bool {
		self.seen.lock().is_empty()
	}

	pub fn clear(&self) {
		self.seen.lock().clear();
	}
}

impl Notifier for RecordingNotifier {
	fn notify(&self, notification: Notification) {
		tracing::debug!(level = ?notification.level, message = %notification.message, "recorded notification");
		self.seen.lock().push(notification);
	}
}

/// Confirmer answering from a script, then from a default.
///
/// # Examples
///
/// ```
/// use steady_core::Confirmer;
/// use steady_test::ScriptedConfirmer;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let confirmer = ScriptedConfirmer::answering(false).then(true);
/// assert!(!confirmer.confirm("Confirm", "Delete?").await);
/// assert!(confirmer.confirm("Confirm", "Delete?").await);
/// // Script exhausted: the default applies
/// assert!(!confirmer.confirm("Confirm", "Delete?").await);
/// assert_eq!(confirmer.prompts().len(), 3);
/// # }
/// ```
#[derive(Debug)]
pub struct ScriptedConfirmer {
	script: Mutex<VecDeque<bool>>,
	default: bool,
	prompts: Mutex<Vec<(String, String)>>,
}

impl ScriptedConfirmer {
	/// Always answer `answer`
	pub fn always(answer: bool) -> Self {
		Self {
			script: Mutex::new(VecDeque::new()),
			default: answer,
			prompts: Mutex::new(Vec::new()),
		}
	}

	/// Answer `first` once, then fall back to `first` as the default
	pub fn answering(first: bool) -> Self {
		let confirmer = Self::always(first);
		confirmer.script.lock().push_back(first);
		confirmer
	}

	/// Queue another scripted answer
	pub fn then(self, answer: bool) -> Self {
		self.script.lock().push_back(answer);
		self
	}

	/// `(title, content)` of every prompt shown
	pub fn prompts(&self) -> Vec<(String, String)> {
		self.prompts.lock().clone()
	}
}

#[async_trait]
impl Confirmer for ScriptedConfirmer {
	async fn confirm(&self, title: &str, content: &str) -> bool {
		self.prompts
			.lock()
			.push((title.to_string(), content.to_string()));
		self.script.lock().pop_front().unwrap_or(self.default)
	}
}

/// Navigator that records requested paths.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
	paths: Mutex<Vec<String>>,
}

impl RecordingNavigator {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn paths(&self) -> Vec<String> {
		self.paths.lock().clone()
	}

	pub fn last(&self) -> Option<String> {
		self.paths.lock().last().cloned()
	}
}

impl Navigator for RecordingNavigator {
	fn navigate(&self, path: &str) {
		self.paths.lock().push(path.to_string());
	}
}
