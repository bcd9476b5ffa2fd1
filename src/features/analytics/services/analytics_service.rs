use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::analytics::dtos::CategoryAveragePriceDto;

/// Service for aggregate catalog queries
pub struct AnalyticsService {
    pool: PgPool,
}

impl AnalyticsService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Average price per category, ordered by category name
    ///
    /// Categories without products are included with an average of 0.
    pub async fn average_price_by_category(&self) -> Result<Vec<CategoryAveragePriceDto>> {
        sqlx::query_as::<_, CategoryAveragePriceDto>(
            r#"
            SELECT
                c.id,
                c.name AS category_name,
                COALESCE(AVG(p.price), 0) AS average_price
            FROM categories c
            LEFT JOIN products p ON c.id = p.category_id
            GROUP BY c.id, c.name
            ORDER BY c.name ASC, c.id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to compute average price by category: {:?}", e);
            AppError::Database(e)
        })
    }
}
