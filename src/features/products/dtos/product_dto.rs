use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::products::models::ProductWithCategory;
use crate::shared::constants::IMAGE_PATH_MAX_LENGTH;
use crate::shared::validation::{
    parse_optional_id, parse_price, validate_not_blank, validate_optional_id, validate_price,
};

/// Response DTO for product, including its category name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductResponseDto {
    pub id: i32,
    pub name: String,
    /// Price in VND
    pub price: i32,
    /// Public image path, e.g. `/uploads/1717171717171.png`
    pub image: Option<String>,
    pub category_id: Option<i32>,
    pub category_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<ProductWithCategory> for ProductResponseDto {
    fn from(p: ProductWithCategory) -> Self {
        Self {
            id: p.id,
            name: p.name,
            price: p.price,
            image: p.image,
            category_id: p.category_id,
            category_name: p.category_name,
            created_at: p.created_at,
        }
    }
}

/// Text fields of the product multipart form, as submitted
#[derive(Debug, Clone, Default, Validate)]
pub struct ProductFormDto {
    #[validate(
        custom(function = "validate_not_blank", message = "Product name is required"),
        length(max = 100, message = "Product name must be at most 100 characters"),
        does_not_contain(pattern = "\0", message = "Name must not contain NUL characters")
    )]
    pub name: String,

    #[validate(custom(function = "validate_price"))]
    pub price: String,

    #[validate(custom(function = "validate_optional_id"))]
    pub category_id: String,

    /// Previously stored image path, resubmitted on update
    pub image: Option<String>,
}

/// Validated product fields ready for persistence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductInput {
    pub name: String,
    pub price: i32,
    pub category_id: Option<i32>,
    pub existing_image: Option<String>,
}

impl ProductFormDto {
    /// Validate and convert into typed input
    pub fn into_input(self) -> Result<ProductInput> {
        self.validate()?;

        let price = parse_price(&self.price).map_err(AppError::Validation)?;
        let category_id = parse_optional_id(&self.category_id).map_err(AppError::Validation)?;

        let existing_image = self
            .image
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty() && s != "null" && s != "undefined");
        if let Some(path) = &existing_image {
            if path.contains('\0') {
                return Err(AppError::Validation(
                    "Image path must not contain NUL characters".to_string(),
                ));
            }
            if path.chars().count() as u64 > IMAGE_PATH_MAX_LENGTH {
                return Err(AppError::Validation(format!(
                    "Image path must be at most {} characters",
                    IMAGE_PATH_MAX_LENGTH
                )));
            }
        }

        Ok(ProductInput {
            name: self.name.trim().to_string(),
            price,
            category_id,
            existing_image,
        })
    }
}

/// Multipart form for creating/updating products (OpenAPI documentation only)
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct ProductFormSchema {
    #[schema(example = "Coke")]
    pub name: String,
    #[schema(example = "15000")]
    pub price: String,
    /// Category id, empty for none
    #[schema(example = "1")]
    pub category_id: Option<String>,
    /// JPEG/PNG image up to 5MB, or the existing image path on update
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub image: Option<String>,
}

/// Query params for product search
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ProductSearchQuery {
    /// Case-insensitive substring of the product name
    pub search: Option<String>,
    /// Exact category id
    pub category_id: Option<String>,
}

/// Validated search filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub search: Option<String>,
    pub category_id: Option<i32>,
}

impl ProductSearchQuery {
    /// Empty parameters are treated as absent
    pub fn into_filter(self) -> Result<ProductFilter> {
        let search = self.search.filter(|s| !s.trim().is_empty());
        if search.as_deref().is_some_and(|s| s.contains('\0')) {
            return Err(AppError::Validation(
                "Search term must not contain NUL characters".to_string(),
            ));
        }
        let category_id = match self.category_id {
            Some(raw) => parse_optional_id(&raw).map_err(AppError::Validation)?,
            None => None,
        };

        Ok(ProductFilter {
            search,
            category_id,
        })
    }
}
