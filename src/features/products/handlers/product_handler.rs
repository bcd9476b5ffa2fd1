use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use crate::core::error::Result;
use crate::core::extractor::{AppQuery, IdPath};
use crate::features::products::dtos::{ProductFormSchema, ProductResponseDto, ProductSearchQuery};
use crate::features::products::extractor::ProductSubmission;
use crate::features::products::services::ProductService;
use crate::shared::types::ApiResponse;

/// List all products
///
/// Every product with its category name, newest first.
#[utoipa::path(
    get,
    path = "/products/all",
    responses(
        (status = 200, description = "List of products", body = ApiResponse<Vec<ProductResponseDto>>),
    ),
    tag = "products"
)]
pub async fn list_all_products(
    State(service): State<Arc<ProductService>>,
) -> Result<Json<ApiResponse<Vec<ProductResponseDto>>>> {
    let products = service.list_all().await?;
    Ok(Json(ApiResponse::list(products)))
}

/// Get a product by id
#[utoipa::path(
    get,
    path = "/products/{id}",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = ApiResponse<ProductResponseDto>),
        (status = 400, description = "ID is not a number"),
        (status = 404, description = "Product not found")
    ),
    tag = "products"
)]
pub async fn get_product(
    State(service): State<Arc<ProductService>>,
    IdPath(id): IdPath,
) -> Result<Json<ApiResponse<ProductResponseDto>>> {
    let product = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(product), None, None)))
}

/// Search products
///
/// Filters by case-insensitive name substring and/or exact category, newest first.
#[utoipa::path(
    get,
    path = "/products",
    params(ProductSearchQuery),
    responses(
        (status = 200, description = "Matching products", body = ApiResponse<Vec<ProductResponseDto>>),
        (status = 400, description = "category_id is not a number")
    ),
    tag = "products"
)]
pub async fn search_products(
    State(service): State<Arc<ProductService>>,
    AppQuery(query): AppQuery<ProductSearchQuery>,
) -> Result<Json<ApiResponse<Vec<ProductResponseDto>>>> {
    let filter = query.into_filter()?;
    let products = service.search(&filter).await?;
    Ok(Json(ApiResponse::list(products)))
}

/// Create a product
///
/// Accepts multipart/form-data with `name`, `price`, optional `category_id`
/// and an optional JPEG/PNG `image` (max 5MB).
#[utoipa::path(
    post,
    path = "/products",
    request_body(
        content = ProductFormSchema,
        content_type = "multipart/form-data",
    ),
    responses(
        (status = 201, description = "Product created", body = ApiResponse<ProductResponseDto>),
        (status = 400, description = "Invalid product fields or image"),
        (status = 413, description = "Request body too large")
    ),
    tag = "products"
)]
pub async fn create_product(
    State(service): State<Arc<ProductService>>,
    submission: ProductSubmission,
) -> Result<(StatusCode, Json<ApiResponse<ProductResponseDto>>)> {
    let product = service.create(submission.input, submission.image).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(product),
            Some("Product created successfully".to_string()),
            None,
        )),
    ))
}

/// Update a product
///
/// Same form as create. Without a new `image` file, the `image` text field
/// (the current image path) is kept.
#[utoipa::path(
    put,
    path = "/products/{id}",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    request_body(
        content = ProductFormSchema,
        content_type = "multipart/form-data",
    ),
    responses(
        (status = 200, description = "Product updated", body = ApiResponse<ProductResponseDto>),
        (status = 400, description = "Invalid id, product fields or image"),
        (status = 404, description = "Product not found"),
        (status = 413, description = "Request body too large")
    ),
    tag = "products"
)]
pub async fn update_product(
    State(service): State<Arc<ProductService>>,
    IdPath(id): IdPath,
    submission: ProductSubmission,
) -> Result<Json<ApiResponse<ProductResponseDto>>> {
    let product = service
        .update(id, submission.input, submission.image)
        .await?;

    Ok(Json(ApiResponse::success(
        Some(product),
        Some("Product updated successfully".to_string()),
        None,
    )))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/products/{id}",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product deleted", body = ApiResponse<ProductResponseDto>),
        (status = 400, description = "ID is not a number"),
        (status = 404, description = "Product not found")
    ),
    tag = "products"
)]
pub async fn delete_product(
    State(service): State<Arc<ProductService>>,
    IdPath(id): IdPath,
) -> Result<Json<ApiResponse<ProductResponseDto>>> {
    let product = service.delete(id).await?;

    Ok(Json(ApiResponse::success(
        Some(product),
        Some("Product deleted successfully".to_string()),
        None,
    )))
}
