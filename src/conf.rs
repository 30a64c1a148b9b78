//! Layered settings: defaults, TOML file, `.env` and `STEADY_*` variables.

#[cfg(feature = "conf")]
pub use steady_conf::*;
