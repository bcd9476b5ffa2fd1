//! Multipart product form extraction
//!
//! Reads the `name`, `price`, `category_id` and `image` parts, checks the
//! image (extension, declared type, size) and then the product fields, so a
//! handler only ever sees a fully validated submission.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{multipart::Field, multipart::MultipartError, FromRequest, Multipart, Request},
    http::StatusCode,
};
use tracing::debug;

use crate::core::error::AppError;
use crate::features::products::dtos::{ProductFormDto, ProductInput, UploadedImage};
use crate::features::products::services::ProductService;

/// Image that passed upload validation
#[derive(Debug, Clone)]
pub struct ValidatedImage {
    pub data: Bytes,
    /// Lower-cased extension including the dot
    pub extension: String,
}

/// A validated product create/update request
#[derive(Debug, Clone)]
pub struct ProductSubmission {
    pub input: ProductInput,
    pub image: Option<ValidatedImage>,
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e.body_text()))
    }
}

async fn read_text(field: Field<'_>) -> Result<String, AppError> {
    field.text().await.map_err(multipart_error)
}

/// Read a file part, stopping as soon as it exceeds `max_size`
async fn read_limited(mut field: Field<'_>, max_size: usize) -> Result<Bytes, AppError> {
    let mut data = Vec::new();
    while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
        if data.len() + chunk.len() > max_size {
            return Err(AppError::Validation(format!(
                "Image too large. Maximum size is {} bytes ({} MB)",
                max_size,
                max_size / 1024 / 1024
            )));
        }
        data.extend_from_slice(&chunk);
    }
    Ok(Bytes::from(data))
}

impl ProductSubmission {
    /// Parse and validate a product multipart body
    pub async fn from_multipart(
        mut multipart: Multipart,
        max_upload_size: usize,
    ) -> Result<Self, AppError> {
        let mut form = ProductFormDto::default();
        let mut upload: Option<UploadedImage> = None;

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let field_name = field.name().unwrap_or("").to_string();

            match field_name.as_str() {
                "name" => form.name = read_text(field).await?,
                "price" => form.price = read_text(field).await?,
                "category_id" => form.category_id = read_text(field).await?,
                "image" => {
                    let file_name = field
                        .file_name()
                        .map(|s| s.to_string())
                        .filter(|s| !s.is_empty());

                    match file_name {
                        Some(original_filename) => {
                            if upload.is_some() {
                                return Err(AppError::BadRequest(
                                    "Only one image may be uploaded".to_string(),
                                ));
                            }
                            let content_type = field
                                .content_type()
                                .map(|s| s.to_string())
                                .unwrap_or_else(|| "application/octet-stream".to_string());
                            let data = read_limited(field, max_upload_size).await?;
                            upload = Some(UploadedImage {
                                original_filename,
                                content_type,
                                data,
                            });
                        }
                        // Plain text part: the image path the client already has
                        None => form.image = Some(read_text(field).await?),
                    }
                }
                _ => {
                    debug!("Ignoring unknown field: {}", field_name);
                }
            }
        }

        // Upload checks run before the product fields are looked at
        let image = match upload {
            Some(upload) => {
                let extension = upload.validate(max_upload_size)?;
                Some(ValidatedImage {
                    data: upload.data,
                    extension,
                })
            }
            None => None,
        };

        let input = form.into_input()?;

        Ok(Self { input, image })
    }
}

impl FromRequest<Arc<ProductService>> for ProductSubmission {
    type Rejection = AppError;

    async fn from_request(
        req: Request,
        state: &Arc<ProductService>,
    ) -> Result<Self, Self::Rejection> {
        let multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        Self::from_multipart(multipart, state.max_upload_size()).await
    }
}
