use async_trait::async_trait;

use crate::client::error::ClientResult;
use crate::features::analytics::dtos::CategoryAveragePriceDto;
use crate::features::categories::dtos::CategoryResponseDto;
use crate::features::products::dtos::ProductResponseDto;

pub type Category = CategoryResponseDto;
pub type Product = ProductResponseDto;
pub type CategoryAverage = CategoryAveragePriceDto;

/// Result of a create/update/delete call: the affected row and the server notice
#[derive(Debug, Clone, PartialEq)]
pub struct Saved<T> {
    pub item: T,
    pub message: Option<String>,
}

/// Image file picked by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Product form contents as they are sent to the server
///
/// Fields stay textual; the server owns parsing and validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    pub price: String,
    /// Empty means no category
    pub category_id: String,
    /// New image file, replaces the current one
    pub image: Option<ImageFile>,
    /// Current image path, resent on update when no new file is picked
    pub existing_image: Option<String>,
}

/// Filters for product search; empty values are not sent
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams {
    pub search: String,
    pub category_id: Option<i32>,
}

/// Operations the views need from the catalog server
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn list_categories(&self) -> ClientResult<Vec<Category>>;
    async fn create_category(&self, name: &str) -> ClientResult<Saved<Category>>;
    async fn update_category(&self, id: i32, name: &str) -> ClientResult<Saved<Category>>;
    async fn delete_category(&self, id: i32) -> ClientResult<Saved<Category>>;

    async fn list_products(&self) -> ClientResult<Vec<Product>>;
    async fn get_product(&self, id: i32) -> ClientResult<Product>;
    async fn search_products(&self, params: &SearchParams) -> ClientResult<Vec<Product>>;
    async fn create_product(&self, draft: &ProductDraft) -> ClientResult<Saved<Product>>;
    async fn update_product(&self, id: i32, draft: &ProductDraft) -> ClientResult<Saved<Product>>;
    async fn delete_product(&self, id: i32) -> ClientResult<Saved<Product>>;

    async fn average_price_by_category(&self) -> ClientResult<Vec<CategoryAverage>>;
}
