use axum::body::Bytes;

use crate::core::error::AppError;

/// Allowed MIME types for product images
pub const ALLOWED_IMAGE_MIME_TYPES: &[&str] = &["image/jpeg", "image/jpg", "image/png"];

/// Allowed file extensions for product images
pub const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &[".jpeg", ".jpg", ".png"];

/// Image part of a product form, read fully into memory
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub original_filename: String,
    pub content_type: String,
    pub data: Bytes,
}

/// Lower-cased extension of a filename including the dot, or "" when absent
pub fn file_extension(filename: &str) -> String {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    match base.rfind('.') {
        Some(idx) if idx > 0 => base[idx..].to_ascii_lowercase(),
        _ => String::new(),
    }
}

/// Check if a MIME type is allowed
pub fn is_image_mime_type_allowed(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();
    ALLOWED_IMAGE_MIME_TYPES.contains(&essence.as_str())
}

impl UploadedImage {
    /// Validate extension, declared type and size; returns the extension to store under
    pub fn validate(&self, max_size: usize) -> Result<String, AppError> {
        let extension = file_extension(&self.original_filename);

        if !ALLOWED_IMAGE_EXTENSIONS.contains(&extension.as_str())
            || !is_image_mime_type_allowed(&self.content_type)
        {
            return Err(AppError::Validation(format!(
                "Only JPEG/JPG/PNG images are supported (got '{}' as '{}')",
                self.original_filename, self.content_type
            )));
        }

        if self.data.len() > max_size {
            return Err(AppError::Validation(format!(
                "Image too large. Maximum size is {} bytes ({} MB)",
                max_size,
                max_size / 1024 / 1024
            )));
        }

        Ok(extension)
    }
}
