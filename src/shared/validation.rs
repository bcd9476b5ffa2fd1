use std::borrow::Cow;

use validator::{ValidationError, ValidationErrors};

use crate::core::error::AppError;

/// Rejects empty and whitespace-only strings
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Price must be a non-negative whole number that fits the price column
pub fn validate_price(value: &str) -> Result<(), ValidationError> {
    parse_price(value).map(|_| ()).map_err(|msg| {
        let mut err = ValidationError::new("price");
        err.message = Some(Cow::Owned(msg));
        err
    })
}

/// Optional numeric reference; an empty value means "none"
pub fn validate_optional_id(value: &str) -> Result<(), ValidationError> {
    parse_optional_id(value).map(|_| ()).map_err(|msg| {
        let mut err = ValidationError::new("id");
        err.message = Some(Cow::Owned(msg));
        err
    })
}

pub fn parse_price(value: &str) -> Result<i32, String> {
    let value = value.trim();
    if value.is_empty() {
        return Err("Price is required".to_string());
    }

    match value.parse::<i64>() {
        Ok(price) if price < 0 => Err("Price must not be negative".to_string()),
        Ok(price) => i32::try_from(price).map_err(|_| "Price is too large".to_string()),
        Err(_) => Err(format!("Price must be a whole number, got '{}'", value)),
    }
}

pub fn parse_optional_id(value: &str) -> Result<Option<i32>, String> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }

    value
        .parse::<i32>()
        .map(Some)
        .map_err(|_| format!("Category must be a number, got '{}'", value))
}

/// Flatten validator output into one readable message, fields in name order
pub fn validation_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<(String, Vec<String>)> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => format!("{} is invalid", field),
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(_, messages)| messages)
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(validation_message(&errors))
    }
}
