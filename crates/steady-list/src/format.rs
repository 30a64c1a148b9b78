//! Cell formatting
//!
//! Dates are rendered with chrono patterns after shifting timestamps to the
//! configured UTC offset; numbers use the configured digit grouping.

use crate::column::ColumnKind;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, Utc};
use steady_conf::DisplaySettings;
use steady_core::{Messages, Value};
use std::fmt::Write;
use steady_forms::schema::{Numeric, numeric};

const NAIVE_DATETIME_PATTERNS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Renders raw cell values as display text.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayFormatter {
	date_format: String,
	datetime_format: String,
	thousands_separator: char,
	decimal_separator: char,
	currency_suffix: String,
	offset: FixedOffset,
}

impl Default for DisplayFormatter {
	fn default() -> Self {
		Self::from_settings(&DisplaySettings::default())
	}
}

impl DisplayFormatter {
	pub fn from_settings(settings: &DisplaySettings) -> Self {
		let offset = FixedOffset::east_opt(settings.utc_offset_minutes.saturating_mul(60)).unwrap_or_else(|| {
			tracing::warn!(
				minutes = settings.utc_offset_minutes,
				"UTC offset out of range, falling back to UTC"
			);
			Utc.fix()
		});
		Self {
			date_format: settings.date_format.clone(),
			datetime_format: settings.datetime_format.clone(),
			thousands_separator: settings.thousands_separator,
			decimal_separator: settings.decimal_separator,
			currency_suffix: settings.currency_suffix.clone(),
			offset,
		}
	}

	/// Format a cell by column kind; `null` renders empty
	pub fn format(&self, kind: ColumnKind, value: &Value, messages: &Messages) -> String {
		if value.is_null() {
			return String::new();
		}
		match kind {
			ColumnKind::Text => text(value),
			ColumnKind::Date => self.format_date(value),
			ColumnKind::DateTime => self.format_datetime(value),
			ColumnKind::Boolean => self.format_boolean(value, messages).to_string(),
			ColumnKind::Number => self.format_number(value),
			ColumnKind::Currency => self.format_currency(value),
		}
	}

	/// # Examples
	///
	/// ```
	/// use steady_list::DisplayFormatter;
	/// use serde_json::json;
	///
	/// let formatter = DisplayFormatter::default();
	/// assert_eq!(formatter.format_date(&json!("2024-03-09")), "09/03/2024");
	/// assert_eq!(formatter.format_date(&json!("2024-03-09T23:15:00Z")), "09/03/2024");
	/// ```
	pub fn format_date(&self, value: &Value) -> String {
		self.format_temporal(value, &self.date_format)
	}

	pub fn format_datetime(&self, value: &Value) -> String {
		self.format_temporal(value, &self.datetime_format)
	}

	fn format_temporal(&self, value: &Value, pattern: &str) -> String {
		let Some(moment) = self.parse_temporal(value) else {
			return text(value);
		};
		// Invalid patterns make chrono's Display fail instead of printing.
		let mut out = String::new();
		match write!(out, "{}", moment.format(pattern)) {
			Ok(()) => out,
			Err(_) => text(value),
		}
	}

	/// Timestamps, RFC 3339 strings, naive date-times or plain dates
	fn parse_temporal(&self, value: &Value) -> Option<NaiveDateTime> {
		match value {
			Value::Number(n) => {
				let millis = n.as_i64()?;
				DateTime::<Utc>::from_timestamp_millis(millis).map(|dt| dt.with_timezone(&self.offset).naive_local())
			}
			Value::String(s) => {
				let s = s.trim();
				if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
					return Some(dt.with_timezone(&self.offset).naive_local());
				}
				NAIVE_DATETIME_PATTERNS
					.iter()
					.find_map(|pattern| NaiveDateTime::parse_from_str(s, pattern).ok())
					.or_else(|| {
						NaiveDate::parse_from_str(s, "%Y-%m-%d")
							.ok()
							.and_then(|d| d.and_hms_opt(0, 0, 0))
					})
			}
			_ => None,
		}
	}

	pub fn format_boolean(&self, value: &Value, messages: &Messages) -> &'static str {
		let truthy = match value {
			Value::Bool(b) => *b,
			Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
			Value::String(s) => !s.is_empty(),
			Value::Null => false,
			Value::Array(_) | Value::Object(_) => true,
		};
		if truthy { messages.yes() } else { messages.no() }
	}

	/// # Examples
	///
	/// ```
	/// use steady_list::DisplayFormatter;
	/// use serde_json::json;
	///
	/// let formatter = DisplayFormatter::default();
	/// assert_eq!(formatter.format_number(&json!(1234567)), "1.234.567");
	/// assert_eq!(formatter.format_number(&json!(-1234.5)), "-1.234,5");
	/// ```
	pub fn format_number(&self, value: &Value) -> String {
		match numeric(value) {
			Numeric::Number(n) => self.group_digits(n),
			Numeric::Blank => String::new(),
			Numeric::Invalid => text(value),
		}
	}

	pub fn format_currency(&self, value: &Value) -> String {
		match numeric(value) {
			Numeric::Number(n) => format!("{} {}", self.group_digits(n), self.currency_suffix),
			Numeric::Blank => String::new(),
			Numeric::Invalid => text(value),
		}
	}

	/// Up to three fraction digits, trailing zeros dropped
	fn group_digits(&self, n: f64) -> String {
		let rounded = format!("{:.3}", n.abs());
		let (int_part, frac_part) = rounded.split_once('.').unwrap_or((rounded.as_str(), ""));
		let frac_part = frac_part.trim_end_matches('0');
		let negative = n < 0.0 && rounded.chars().any(|c| c.is_ascii_digit() && c != '0');

		let mut out = String::with_capacity(rounded.len() + int_part.len() / 3 + 1);
		if negative {
			out.push('-');
		}
		let len = int_part.len();
		for (i, digit) in int_part.chars().enumerate() {
			if i > 0 && (len - i) % 3 == 0 {
				out.push(self.thousands_separator);
			}
			out.push(digit);
		}
		if !frac_part.is_empty() {
			out.push(self.decimal_separator);
			out.push_str(frac_part);
		}
		out
	}
}

fn text(value: &Value) -> String {
	match value {
		Value::Null => String::new(),
		Value::String(s) => s.clone(),
		other => other.to_string(),
	}
}
