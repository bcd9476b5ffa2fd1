//! Display helpers shared by the views

use chrono::{DateTime, Utc};

/// Shown in place of a missing category
pub const NO_CATEGORY_LABEL: &str = "No category";

/// Shown in place of a missing product image
pub const NO_IMAGE_LABEL: &str = "No image";

/// Format a price in Vietnamese dong, e.g. `15.000 ₫`
pub fn format_vnd(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0 { "-" } else { "" };
    format!("{}{} ₫", sign, grouped)
}

/// Category name or the placeholder
pub fn category_label(name: Option<&str>) -> &str {
    name.filter(|n| !n.is_empty()).unwrap_or(NO_CATEGORY_LABEL)
}

/// Timestamp as `HH:MM:SS DD/MM/YYYY`
pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.format("%H:%M:%S %d/%m/%Y").to_string()
}
