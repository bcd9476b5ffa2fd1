use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::analytics::handlers;
use crate::features::analytics::services::AnalyticsService;

/// Create analytics routes
pub fn routes(service: Arc<AnalyticsService>) -> Router {
    Router::new()
        .route(
            "/analytics/average-price-by-category",
            get(handlers::average_price_by_category),
        )
        .with_state(service)
}
