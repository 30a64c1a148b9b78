use std::path::PathBuf;

/// Failure while loading [`Settings`](crate::Settings).
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	#[error("Failed to read settings file {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Invalid settings TOML: {0}")]
	Parse(#[from] toml::de::Error),

	#[error("Invalid value for {key}: {reason}")]
	InvalidEnv { key: String, reason: String },

	#[error("Invalid setting {field}: {reason}")]
	Invalid { field: &'static str, reason: String },
}
