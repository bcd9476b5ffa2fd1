use utoipa::{Modify, OpenApi};

use crate::features::analytics::{dtos as analytics_dtos, handlers as analytics_handlers};
use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::products::{dtos as products_dtos, handlers as products_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Categories
        categories_handlers::list_categories,
        categories_handlers::create_category,
        categories_handlers::update_category,
        categories_handlers::delete_category,
        // Products
        products_handlers::list_all_products,
        products_handlers::get_product,
        products_handlers::search_products,
        products_handlers::create_product,
        products_handlers::update_product,
        products_handlers::delete_product,
        // Analytics
        analytics_handlers::average_price_by_category,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Categories
            categories_dtos::CategoryResponseDto,
            categories_dtos::CreateCategoryDto,
            categories_dtos::UpdateCategoryDto,
            ApiResponse<categories_dtos::CategoryResponseDto>,
            ApiResponse<Vec<categories_dtos::CategoryResponseDto>>,
            // Products
            products_dtos::ProductResponseDto,
            products_dtos::ProductFormSchema,
            ApiResponse<products_dtos::ProductResponseDto>,
            ApiResponse<Vec<products_dtos::ProductResponseDto>>,
            // Analytics
            analytics_dtos::CategoryAveragePriceDto,
            ApiResponse<Vec<analytics_dtos::CategoryAveragePriceDto>>,
        )
    ),
    tags(
        (name = "categories", description = "Product categories"),
        (name = "products", description = "Products with optional category and image"),
        (name = "analytics", description = "Catalog aggregates"),
    )
)]
pub struct ApiDoc;

/// Overrides the document info with configured values
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
