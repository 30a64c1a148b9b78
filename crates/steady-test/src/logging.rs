//! Test logging

use std::sync::Once;

static INIT: Once = Once::new();

/// Install a test-friendly `tracing` subscriber once per process
///
/// Honors `RUST_LOG`; defaults to `debug` for the engine crates.
pub fn init_test_logging() {
	INIT.call_once(|| {
		let filter = tracing_subscriber::EnvFilter::try_from_default_env()
			.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("steady_forms=debug,steady_list=debug"));
		let _ = tracing_subscriber::fmt()
			.with_env_filter(filter)
			.with_test_writer()
			.try_init();
	});
}
