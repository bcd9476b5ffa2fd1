use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::features::analytics::dtos::CategoryAveragePriceDto;
use crate::features::analytics::services::AnalyticsService;
use crate::shared::types::ApiResponse;

/// Average price by category
///
/// One row per category ordered by name; empty categories report 0.
#[utoipa::path(
    get,
    path = "/analytics/average-price-by-category",
    responses(
        (status = 200, description = "Average price per category", body = ApiResponse<Vec<CategoryAveragePriceDto>>),
    ),
    tag = "analytics"
)]
pub async fn average_price_by_category(
    State(service): State<Arc<AnalyticsService>>,
) -> Result<Json<ApiResponse<Vec<CategoryAveragePriceDto>>>> {
    let rows = service.average_price_by_category().await?;
    Ok(Json(ApiResponse::list(rows)))
}
