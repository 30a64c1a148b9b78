//! Values, messages and the host-facing traits shared by every engine.
//!
//! ```rust
//! use steady::core::{Locale, Messages};
//!
//! assert_eq!(Messages::new(Locale::En).save(), "Save");
//! ```

pub use steady_core::*;
