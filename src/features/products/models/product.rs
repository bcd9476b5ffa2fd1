use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Product row joined with its category name
#[derive(Debug, Clone, FromRow)]
pub struct ProductWithCategory {
    pub id: i32,
    pub name: String,
    pub price: i32,
    pub image: Option<String>,
    pub category_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub category_name: Option<String>,
}
