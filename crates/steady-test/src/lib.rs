//! Test utilities for the STEADY Admin engines
//!
//! - [`doubles`]: recording and scripted implementations of the host seams
//! - [`fixtures`]: rstest fixtures handing out those doubles
//! - [`logging`]: one-time `tracing` subscriber for tests
//! - [`values`]: building [`ValueMap`](steady_core::ValueMap)s from JSON

pub mod doubles;
pub mod fixtures;
pub mod logging;
pub mod values;

pub use doubles::{RecordingNavigator, RecordingNotifier, ScriptedConfirmer};
pub use logging::init_test_logging;
pub use values::value_map;
