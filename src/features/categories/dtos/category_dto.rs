use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::categories::models::Category;
use crate::shared::validation::validate_not_blank;

/// Response DTO for category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponseDto {
    pub id: i32,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<Category> for CategoryResponseDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            created_at: c.created_at,
        }
    }
}

/// Request DTO for creating a category
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryDto {
    #[serde(default)]
    #[validate(
        custom(function = "validate_not_blank", message = "Category name is required"),
        length(max = 100, message = "Category name must be at most 100 characters"),
        does_not_contain(pattern = "\0", message = "Name must not contain NUL characters")
    )]
    #[schema(example = "Drinks")]
    pub name: String,
}

/// Request DTO for renaming a category
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateCategoryDto {
    #[serde(default)]
    #[validate(
        custom(function = "validate_not_blank", message = "Category name is required"),
        length(max = 100, message = "Category name must be at most 100 characters"),
        does_not_contain(pattern = "\0", message = "Name must not contain NUL characters")
    )]
    #[schema(example = "Beverages")]
    pub name: String,
}
