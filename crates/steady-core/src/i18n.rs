//! Localized user-facing messages
//!
//! Every string the engines show to a user comes from [`Messages`]. Two
//! catalogs ship built in: Vietnamese (the console's default) and English.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Display language of the console.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
	#[default]
	Vi,
	En,
}

impl Locale {
	pub fn code(&self) -> &'static str {
		match self {
			Self::Vi => "vi",
			Self::En => "en",
		}
	}
}

impl fmt::Display for Locale {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.code())
	}
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported locale: {0}")]
pub struct UnknownLocale(pub String);

impl FromStr for Locale {
	type Err = UnknownLocale;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"vi" | "vi-vn" => Ok(Self::Vi),
			"en" | "en-us" | "en-gb" => Ok(Self::En),
			other => Err(UnknownLocale(other.to_string())),
		}
	}
}

/// Message catalog for one locale.
///
/// # Examples
///
/// ```
/// use steady_core::{Locale, Messages};
///
/// let en = Messages::new(Locale::En);
/// assert_eq!(en.required("Name"), "Name is required");
///
/// let vi = Messages::new(Locale::Vi);
/// assert_eq!(vi.required("Tên"), "Tên là bắt buộc");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Messages {
	locale: Locale,
}

impl Messages {
	pub fn new(locale: Locale) -> Self {
		Self { locale }
	}

	pub fn locale(&self) -> Locale {
		self.locale
	}

	fn pick(&self, vi: &'static str, en: &'static str) -> &'static str {
		match self.locale {
			Locale::Vi => vi,
			Locale::En => en,
		}
	}

	// Validation

	pub fn required(&self, label: &str) -> String {
		match self.locale {
			Locale::Vi => format!("{} là bắt buộc", label),
			Locale::En => format!("{} is required", label),
		}
	}

	pub fn select_required(&self, label: &str) -> String {
		match self.locale {
			Locale::Vi => format!("Vui lòng chọn {}", label),
			Locale::En => format!("Please select {}", label),
		}
	}

	pub fn select_at_least_one(&self, label: &str) -> String {
		match self.locale {
			Locale::Vi => format!("Vui lòng chọn ít nhất một {}", label),
			Locale::En => format!("Please select at least one {}", label),
		}
	}

	pub fn min_value(&self, min: f64) -> String {
		match self.locale {
			Locale::Vi => format!("Giá trị tối thiểu là {}", min),
			Locale::En => format!("Minimum value is {}", min),
		}
	}

	pub fn max_value(&self, max: f64) -> String {
		match self.locale {
			Locale::Vi => format!("Giá trị tối đa là {}", max),
			Locale::En => format!("Maximum value is {}", max),
		}
	}

	pub fn min_length(&self, label: &str, min: usize) -> String {
		match self.locale {
			Locale::Vi => format!("{} phải có ít nhất {} ký tự", label, min),
			Locale::En => format!("{} must be at least {} characters", label, min),
		}
	}

	pub fn max_length(&self, label: &str, max: usize) -> String {
		match self.locale {
			Locale::Vi => format!("{} không được vượt quá {} ký tự", label, max),
			Locale::En => format!("{} must be at most {} characters", label, max),
		}
	}

	pub fn invalid_format(&self, label: &str) -> String {
		match self.locale {
			Locale::Vi => format!("{} không hợp lệ", label),
			Locale::En => format!("{} is invalid", label),
		}
	}

	pub fn invalid_email(&self) -> &'static str {
		self.pick("Email không hợp lệ", "Enter a valid email address")
	}

	pub fn invalid_number(&self) -> &'static str {
		self.pick("Vui lòng nhập số hợp lệ", "Please enter a valid number")
	}

	pub fn range_incomplete(&self) -> &'static str {
		self.pick(
			"Cần nhập cả giá trị từ và đến",
			"Both the from and to values are required",
		)
	}

	pub fn date_range_incomplete(&self) -> &'static str {
		self.pick(
			"Cần chọn cả ngày bắt đầu và kết thúc",
			"Both the start and end dates are required",
		)
	}

	pub fn operator_required(&self) -> &'static str {
		self.pick("Vui lòng chọn toán tử", "Please select an operator")
	}

	// Form and list chrome

	pub fn save(&self) -> &'static str {
		self.pick("Lưu", "Save")
	}

	pub fn cancel(&self) -> &'static str {
		self.pick("Hủy", "Cancel")
	}

	pub fn search(&self) -> &'static str {
		self.pick("Tìm kiếm", "Search")
	}

	pub fn actions_column(&self) -> &'static str {
		self.pick("Thao tác", "Actions")
	}

	pub fn save_succeeded(&self) -> &'static str {
		self.pick("Lưu thành công!", "Saved successfully!")
	}

	pub fn save_failed(&self) -> &'static str {
		self.pick(
			"Có lỗi xảy ra khi lưu dữ liệu",
			"An error occurred while saving the data",
		)
	}

	pub fn load_failed(&self) -> &'static str {
		self.pick(
			"Có lỗi xảy ra khi tải dữ liệu",
			"An error occurred while loading the data",
		)
	}

	pub fn search_prompt(&self) -> &'static str {
		self.pick(
			"Vui lòng nhập thông tin tìm kiếm để xem dữ liệu",
			"Enter search criteria to view the data",
		)
	}

	pub fn confirm_title(&self) -> &'static str {
		self.pick("Xác nhận", "Confirm")
	}

	pub fn confirm_ok(&self) -> &'static str {
		self.pick("Xác nhận", "Confirm")
	}

	pub fn confirm_action(&self, action_label: &str) -> String {
		let action = action_label.to_lowercase();
		match self.locale {
			Locale::Vi => format!("Bạn có chắc chắn muốn {}?", action),
			Locale::En => format!("Are you sure you want to {}?", action),
		}
	}

	pub fn yes(&self) -> &'static str {
		self.pick("Có", "Yes")
	}

	pub fn no(&self) -> &'static str {
		self.pick("Không", "No")
	}

	pub fn page_summary(&self, from: usize, to: usize, total: usize) -> String {
		match self.locale {
			Locale::Vi => format!("{}-{} của {} bản ghi", from, to, total),
			Locale::En => format!("{}-{} of {} records", from, to, total),
		}
	}

	// Placeholders

	pub fn enter_placeholder(&self, label: &str) -> String {
		match self.locale {
			Locale::Vi => format!("Nhập {}", label),
			Locale::En => format!("Enter {}", label),
		}
	}

	pub fn choose_placeholder(&self, label: &str) -> String {
		match self.locale {
			Locale::Vi => format!("Chọn {}", label),
			Locale::En => format!("Select {}", label),
		}
	}

	pub fn tags_placeholder(&self, label: &str) -> String {
		match self.locale {
			Locale::Vi => format!("Nhập {} (Enter để thêm)", label),
			Locale::En => format!("Enter {} (press Enter to add)", label),
		}
	}

	pub fn operator_placeholder(&self) -> &'static str {
		self.pick("Chọn toán tử", "Select operator")
	}

	pub fn range_placeholders(&self) -> [&'static str; 2] {
		match self.locale {
			Locale::Vi => ["Từ", "Đến"],
			Locale::En => ["From", "To"],
		}
	}

	pub fn date_range_placeholders(&self) -> [&'static str; 2] {
		match self.locale {
			Locale::Vi => ["Từ ngày", "Đến ngày"],
			Locale::En => ["From date", "To date"],
		}
	}

	// Uploads

	pub fn upload_type_rejected(&self, allowed: &[String]) -> String {
		let allowed = allowed.join(", ").to_uppercase();
		match self.locale {
			Locale::Vi => format!(
				"Định dạng file không được hỗ trợ. Chỉ chấp nhận: {}",
				allowed
			),
			Locale::En => format!("Unsupported file type. Accepted types: {}", allowed),
		}
	}

	pub fn upload_too_large(&self, max_mb: f64, actual_mb: f64) -> String {
		match self.locale {
			Locale::Vi => format!(
				"Kích thước file vượt quá giới hạn {}MB. File của bạn: {:.2}MB",
				max_mb, actual_mb
			),
			Locale::En => format!(
				"File exceeds the {}MB limit. Your file: {:.2}MB",
				max_mb, actual_mb
			),
		}
	}

	pub fn upload_succeeded(&self, file_name: &str) -> String {
		match self.locale {
			Locale::Vi => format!("{} đã upload thành công.", file_name),
			Locale::En => format!("{} uploaded successfully.", file_name),
		}
	}

	pub fn upload_failed(&self, file_name: &str) -> String {
		match self.locale {
			Locale::Vi => format!("{} upload thất bại. Vui lòng thử lại.", file_name),
			Locale::En => format!("{} failed to upload. Please try again.", file_name),
		}
	}

	pub fn upload_hint(&self, allowed: &[String], max_mb: f64, multiple: bool) -> String {
		let allowed = allowed.join(", ").to_uppercase();
		match (self.locale, multiple) {
			(Locale::Vi, true) => format!(
				"Hỗ trợ {}. Kích thước tối đa {}MB. Có thể chọn nhiều file.",
				allowed, max_mb
			),
			(Locale::Vi, false) => format!(
				"Hỗ trợ {}. Kích thước tối đa {}MB. Chỉ chọn 1 file.",
				allowed, max_mb
			),
			(Locale::En, true) => format!(
				"Supports {}. Maximum size {}MB. Multiple files allowed.",
				allowed, max_mb
			),
			(Locale::En, false) => format!(
				"Supports {}. Maximum size {}MB. Single file only.",
				allowed, max_mb
			),
		}
	}

	// Transport failures

	pub fn request_timeout(&self) -> &'static str {
		self.pick(
			"Request timeout! Vui lòng thử lại sau.",
			"Request timed out! Please try again later.",
		)
	}

	pub fn session_expired(&self) -> &'static str {
		self.pick(
			"Phiên làm việc đã hết hạn. Vui lòng đăng nhập lại.",
			"Your session has expired. Please log in again.",
		)
	}

	pub fn forbidden(&self) -> &'static str {
		self.pick(
			"Bạn không có quyền truy cập tài nguyên này.",
			"You do not have permission to access this resource.",
		)
	}

	pub fn not_found(&self) -> &'static str {
		self.pick(
			"Không tìm thấy tài nguyên yêu cầu.",
			"The requested resource was not found.",
		)
	}

	pub fn server_error(&self) -> &'static str {
		self.pick(
			"Lỗi hệ thống. Vui lòng thử lại sau.",
			"System error. Please try again later.",
		)
	}

	pub fn unexpected_error(&self) -> &'static str {
		self.pick(
			"Đã có lỗi xảy ra. Vui lòng thử lại.",
			"Something went wrong. Please try again.",
		)
	}

	pub fn network_error(&self) -> &'static str {
		self.pick(
			"Lỗi kết nối mạng. Vui lòng kiểm tra kết nối internet.",
			"Network error. Please check your internet connection.",
		)
	}
}
