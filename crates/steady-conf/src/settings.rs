//! Settings structure and file loading

use crate::env;
use crate::error::SettingsError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use steady_core::{Locale, Messages};

/// Top-level settings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
	pub locale: Locale,
	pub display: DisplaySettings,
	pub pagination: PaginationSettings,
	pub upload: UploadSettings,
	pub api: ApiSettings,
}

/// Cell formatting in list views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
	/// chrono pattern for date cells
	pub date_format: String,
	/// chrono pattern for date-time cells
	pub datetime_format: String,
	pub thousands_separator: char,
	pub decimal_separator: char,
	pub currency_suffix: String,
	/// Offset applied to timestamps before display
	pub utc_offset_minutes: i32,
}

impl Default for DisplaySettings {
	fn default() -> Self {
		Self {
			date_format: "%d/%m/%Y".to_string(),
			datetime_format: "%d/%m/%Y %H:%M:%S".to_string(),
			thousands_separator: '.',
			decimal_separator: ',',
			currency_suffix: "VND".to_string(),
			utc_offset_minutes: 0,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationSettings {
	pub default_page_size: usize,
	pub page_size_options: Vec<usize>,
}

impl Default for PaginationSettings {
	fn default() -> Self {
		Self {
			default_page_size: 10,
			page_size_options: vec![10, 20, 50, 100],
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadSettings {
	pub max_size_mb: f64,
	/// Lowercase extensions without the leading dot
	pub allowed_types: Vec<String>,
	pub simulated_tick_ms: u64,
	pub simulated_step_percent: u8,
}

impl Default for UploadSettings {
	fn default() -> Self {
		Self {
			max_size_mb: 50.0,
			allowed_types: vec!["pdf".to_string(), "doc".to_string(), "docx".to_string()],
			simulated_tick_ms: 200,
			simulated_step_percent: 10,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
	pub base_url: String,
	pub timeout_secs: u64,
}

impl Default for ApiSettings {
	fn default() -> Self {
		Self {
			base_url: "http://localhost:8080/api".to_string(),
			timeout_secs: 300,
		}
	}
}

impl Settings {
	/// Parse settings from TOML text; missing keys keep their defaults
	pub fn from_toml_str(text: &str) -> Result<Self, SettingsError> {
		let settings: Self = toml::from_str(text)?;
		settings.validate()?;
		Ok(settings)
	}

	/// Load settings from every layer
	///
	/// Reads `.env` from the working directory when present, then `path` if
	/// given and existing, then applies `STEADY_*` overrides.
	pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
		if dotenv::dotenv().is_ok() {
			tracing::debug!(".env loaded");
		}

		let mut settings = match path {
			Some(path) if path.exists() => {
				let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
					path: path.to_path_buf(),
					source,
				})?;
				tracing::debug!(path = %path.display(), "settings file loaded");
				toml::from_str(&text)?
			}
			Some(path) => {
				tracing::debug!(path = %path.display(), "settings file not found, using defaults");
				Self::default()
			}
			None => Self::default(),
		};

		settings.apply_env()?;
		settings.validate()?;
		Ok(settings)
	}

	/// Apply `STEADY_*` overrides from the process environment
	pub fn apply_env(&mut self) -> Result<(), SettingsError> {
		self.apply_env_from(|key| std::env::var(key).ok())
	}

	/// Apply `STEADY_*` overrides from an arbitrary lookup
	///
	/// # Examples
	///
	/// ```
	/// use steady_conf::Settings;
	/// use steady_core::Locale;
	///
	/// let mut settings = Settings::default();
	/// settings
	///     .apply_env_from(|key| match key {
	///         "STEADY_LOCALE" => Some("en".to_string()),
	///         "STEADY_DEFAULT_PAGE_SIZE" => Some("50".to_string()),
	///         _ => None,
	///     })
	///     .unwrap();
	///
	/// assert_eq!(settings.locale, Locale::En);
	/// assert_eq!(settings.pagination.default_page_size, 50);
	/// ```
	pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<(), SettingsError>
	where
		F: Fn(&str) -> Option<String>,
	{
		if let Some(locale) = env::parsed(&lookup, env::LOCALE)? {
			self.locale = locale;
		}
		if let Some(base_url) = lookup(env::API_BASE_URL) {
			self.api.base_url = base_url;
		}
		if let Some(timeout) = env::parsed(&lookup, env::API_TIMEOUT_SECS)? {
			self.api.timeout_secs = timeout;
		}
		if let Some(size) = env::parsed(&lookup, env::DEFAULT_PAGE_SIZE)? {
			self.pagination.default_page_size = size;
		}
		if let Some(max) = env::parsed(&lookup, env::UPLOAD_MAX_SIZE_MB)? {
			self.upload.max_size_mb = max;
		}
		Ok(())
	}

	pub fn validate(&self) -> Result<(), SettingsError> {
		if self.pagination.default_page_size == 0 {
			return Err(SettingsError::Invalid {
				field: "pagination.default_page_size",
				reason: "must be greater than zero".to_string(),
			});
		}
		if self.upload.max_size_mb.is_nan() || self.upload.max_size_mb <= 0.0 {
			return Err(SettingsError::Invalid {
				field: "upload.max_size_mb",
				reason: "must be greater than zero".to_string(),
			});
		}
		if self.upload.simulated_tick_ms == 0 {
			return Err(SettingsError::Invalid {
				field: "upload.simulated_tick_ms",
				reason: "must be greater than zero".to_string(),
			});
		}
		if self.upload.simulated_step_percent == 0 || self.upload.simulated_step_percent > 100 {
			return Err(SettingsError::Invalid {
				field: "upload.simulated_step_percent",
				reason: "must be between 1 and 100".to_string(),
			});
		}
		Ok(())
	}

	/// Message catalog for the configured locale
	pub fn messages(&self) -> Messages {
		Messages::new(self.locale)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_defaults() {
		let settings = Settings::default();
		assert_eq!(settings.locale, Locale::Vi);
		assert_eq!(settings.display.date_format, "%d/%m/%Y");
		assert_eq!(settings.display.currency_suffix, "VND");
		assert_eq!(settings.pagination.page_size_options, vec![10, 20, 50, 100]);
		assert_eq!(settings.upload.allowed_types, vec!["pdf", "doc", "docx"]);
		assert_eq!(settings.api.timeout_secs, 300);
	}

	#[rstest]
	fn test_partial_toml_keeps_defaults() {
		let settings = Settings::from_toml_str(
			r#"
[display]
currency_suffix = "USD"
thousands_separator = ","
"#,
		)
		.unwrap();

		assert_eq!(settings.display.currency_suffix, "USD");
		assert_eq!(settings.display.thousands_separator, ',');
		assert_eq!(settings.display.decimal_separator, ',');
		assert_eq!(settings.pagination.default_page_size, 10);
	}

	#[rstest]
	fn test_zero_page_size_is_rejected() {
		let err = Settings::from_toml_str("[pagination]\ndefault_page_size = 0\n").unwrap_err();
		assert!(matches!(
			err,
			SettingsError::Invalid {
				field: "pagination.default_page_size",
				..
			}
		));
	}

	#[rstest]
	fn test_zero_upload_tick_is_rejected() {
		let err = Settings::from_toml_str("[upload]\nsimulated_tick_ms = 0\n").unwrap_err();
		assert!(matches!(
			err,
			SettingsError::Invalid {
				field: "upload.simulated_tick_ms",
				..
			}
		));
	}

	#[rstest]
	fn test_bad_env_value_names_the_key() {
		let mut settings = Settings::default();
		let err = settings
			.apply_env_from(|key| (key == "STEADY_API_TIMEOUT_SECS").then(|| "soon".to_string()))
			.unwrap_err();

		match err {
			SettingsError::InvalidEnv { key, .. } => assert_eq!(key, "STEADY_API_TIMEOUT_SECS"),
			other => panic!("unexpected error: {other:?}"),
		}
	}
}
