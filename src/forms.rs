//! The form engine.

#[cfg(feature = "forms")]
pub use steady_forms::*;
