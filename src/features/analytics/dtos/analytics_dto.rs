use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Average product price for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CategoryAveragePriceDto {
    pub id: i32,
    #[schema(example = "Drinks")]
    pub category_name: String,
    /// 0 when the category has no products
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 15000)]
    pub average_price: Decimal,
}
