//! Settings for the STEADY Admin engines
//!
//! Settings come from three layers, later ones winning:
//!
//! 1. Built-in defaults ([`Settings::default`])
//! 2. An optional TOML file
//! 3. `STEADY_*` environment variables, after `.env` has been loaded
//!
//! ```
//! use steady_conf::Settings;
//!
//! let settings = Settings::from_toml_str(r#"
//! locale = "en"
//!
//! [pagination]
//! default_page_size = 20
//! "#).unwrap();
//!
//! assert_eq!(settings.pagination.default_page_size, 20);
//! assert_eq!(settings.upload.max_size_mb, 50.0);
//! ```

pub mod env;
pub mod error;
pub mod settings;

pub use error::SettingsError;
pub use settings::{
	ApiSettings, DisplaySettings, PaginationSettings, Settings, UploadSettings,
};
