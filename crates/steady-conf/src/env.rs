//! `STEADY_*` environment variable names and parsing

use crate::error::SettingsError;
use std::fmt::Display;
use std::str::FromStr;

pub const LOCALE: &str = "STEADY_LOCALE";
pub const API_BASE_URL: &str = "STEADY_API_BASE_URL";
pub const API_TIMEOUT_SECS: &str = "STEADY_API_TIMEOUT_SECS";
pub const DEFAULT_PAGE_SIZE: &str = "STEADY_DEFAULT_PAGE_SIZE";
pub const UPLOAD_MAX_SIZE_MB: &str = "STEADY_UPLOAD_MAX_SIZE_MB";

/// Look up `key` and parse it, treating a blank value as unset
pub(crate) fn parsed<T, F>(lookup: &F, key: &str) -> Result<Option<T>, SettingsError>
where
	T: FromStr,
	T::Err: Display,
	F: Fn(&str) -> Option<String>,
{
	match lookup(key) {
		Some(raw) if !raw.trim().is_empty() => {
			raw.trim()
				.parse::<T>()
				.map(Some)
				.map_err(|e| SettingsError::InvalidEnv {
					key: key.to_string(),
					reason: e.to_string(),
				})
		}
		_ => Ok(None),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(Some("42"), Some(42))]
	#[case(Some(" 7 "), Some(7))]
	#[case(Some(""), None)]
	#[case(None, None)]
	fn test_parsed(#[case] raw: Option<&str>, #[case] expected: Option<u64>) {
		let lookup = |_: &str| raw.map(str::to_string);
		assert_eq!(parsed::<u64, _>(&lookup, "K").unwrap(), expected);
	}
}
