//! rstest fixtures
//!
//! ```ignore
//! use steady_test::fixtures::*;
//!
//! #[rstest]
//! fn my_test(notifier: Arc<RecordingNotifier>) { /* ... */ }
//! ```

use crate::doubles::{RecordingNavigator, RecordingNotifier, ScriptedConfirmer};
use rstest::fixture;
use std::sync::Arc;
use steady_core::{Locale, Messages, Session};

#[fixture]
pub fn notifier() -> Arc<RecordingNotifier> {
	Arc::new(RecordingNotifier::new())
}

#[fixture]
pub fn navigator() -> Arc<RecordingNavigator> {
	Arc::new(RecordingNavigator::new())
}

/// Confirmer that accepts every prompt
#[fixture]
pub fn accepting_confirmer() -> Arc<ScriptedConfirmer> {
	Arc::new(ScriptedConfirmer::always(true))
}

/// Confirmer that declines every prompt
#[fixture]
pub fn declining_confirmer() -> Arc<ScriptedConfirmer> {
	Arc::new(ScriptedConfirmer::always(false))
}

/// English catalog, so assertions read naturally
#[fixture]
pub fn messages() -> Messages {
	Messages::new(Locale::En)
}

#[fixture]
pub fn session() -> Session {
	Session::new()
}
