//! The list/search engine.
//!
//! ```rust
//! # #[cfg(feature = "list")]
//! # {
//! use steady::list::{Operator, ValueShape};
//!
//! assert_eq!(Operator::Between.shape(), ValueShape::Pair);
//! # }
//! ```

#[cfg(feature = "list")]
pub use steady_list::*;
