use std::sync::Arc;

use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::{debug, info};

use crate::core::error::{AppError, Result};
use crate::features::products::dtos::{ProductFilter, ProductInput, ProductResponseDto};
use crate::features::products::extractor::ValidatedImage;
use crate::features::products::models::ProductWithCategory;
use crate::modules::storage::{LocalImageStore, StoredImage};

/// Product columns plus the joined category name
pub const SELECT_PRODUCT_WITH_CATEGORY: &str = r#"
    SELECT p.id, p.name, p.price, p.image, p.category_id, p.created_at,
           c.name AS category_name
    FROM products p
    LEFT JOIN categories c ON p.category_id = c.id
"#;

/// Newest first; id breaks ties between rows created in the same instant
const ORDER_NEWEST_FIRST: &str = " ORDER BY p.created_at DESC, p.id DESC";

/// Service for product operations
pub struct ProductService {
    pool: PgPool,
    images: Arc<LocalImageStore>,
    max_upload_size: usize,
}

/// Escape LIKE wildcards so the term matches literally
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Build the filtered product query; filters are AND-combined
pub fn build_search_query(filter: &ProductFilter) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(SELECT_PRODUCT_WITH_CATEGORY);
    qb.push(" WHERE 1=1");

    if let Some(term) = &filter.search {
        qb.push(" AND p.name ILIKE ")
            .push_bind(format!("%{}%", escape_like(term)));
    }
    if let Some(category_id) = filter.category_id {
        qb.push(" AND p.category_id = ").push_bind(category_id);
    }

    qb.push(ORDER_NEWEST_FIRST);
    qb
}

impl ProductService {
    pub fn new(pool: PgPool, images: Arc<LocalImageStore>, max_upload_size: usize) -> Self {
        Self {
            pool,
            images,
            max_upload_size,
        }
    }

    pub fn max_upload_size(&self) -> usize {
        self.max_upload_size
    }

    /// Map insert/update failures, turning a dangling category into a validation error
    fn write_error(e: sqlx::Error, category_id: Option<i32>, action: &str) -> AppError {
        if AppError::is_foreign_key_violation(&e) {
            return AppError::Validation(format!(
                "Category {} does not exist",
                category_id.map(|id| id.to_string()).unwrap_or_default()
            ));
        }
        tracing::error!("Failed to {} product: {:?}", action, e);
        AppError::Database(e)
    }

    /// List every product, newest first
    pub async fn list_all(&self) -> Result<Vec<ProductResponseDto>> {
        let sql = format!("{}{}", SELECT_PRODUCT_WITH_CATEGORY, ORDER_NEWEST_FIRST);
        let products = sqlx::query_as::<_, ProductWithCategory>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list products: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(products.into_iter().map(|p| p.into()).collect())
    }

    /// Get product by id
    pub async fn get(&self, id: i32) -> Result<ProductResponseDto> {
        let sql = format!("{} WHERE p.id = $1", SELECT_PRODUCT_WITH_CATEGORY);
        let product = sqlx::query_as::<_, ProductWithCategory>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get product {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        product
            .map(|p| p.into())
            .ok_or_else(|| AppError::NotFound(format!("Product {} not found", id)))
    }

    /// Search products by name substring and/or category
    pub async fn search(&self, filter: &ProductFilter) -> Result<Vec<ProductResponseDto>> {
        let mut qb = build_search_query(filter);
        let products = qb
            .build_query_as::<ProductWithCategory>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to search products ({:?}): {:?}", filter, e);
                AppError::Database(e)
            })?;

        debug!("Product search {:?} matched {} rows", filter, products.len());

        Ok(products.into_iter().map(|p| p.into()).collect())
    }

    async fn store_image(&self, image: Option<ValidatedImage>) -> Result<Option<StoredImage>> {
        match image {
            Some(image) => Ok(Some(self.images.save(&image.data, &image.extension).await?)),
            None => Ok(None),
        }
    }

    /// Drop a freshly written image when the row that references it was not saved
    async fn discard(&self, stored: &Option<StoredImage>) {
        if let Some(stored) = stored {
            self.images.remove(&stored.public_path).await;
        }
    }

    /// Create a product, storing its image first when one was uploaded
    pub async fn create(
        &self,
        input: ProductInput,
        image: Option<ValidatedImage>,
    ) -> Result<ProductResponseDto> {
        let stored = self.store_image(image).await?;
        let image_path = stored.as_ref().map(|s| s.public_path.clone());

        let sql = r#"
            WITH p AS (
                INSERT INTO products (name, price, image, category_id)
                VALUES ($1, $2, $3, $4)
                RETURNING *
            )
            SELECT p.id, p.name, p.price, p.image, p.category_id, p.created_at,
                   c.name AS category_name
            FROM p
            LEFT JOIN categories c ON p.category_id = c.id
        "#;

        let result = sqlx::query_as::<_, ProductWithCategory>(sql)
            .bind(&input.name)
            .bind(input.price)
            .bind(&image_path)
            .bind(input.category_id)
            .fetch_one(&self.pool)
            .await;

        let product = match result {
            Ok(product) => product,
            Err(e) => {
                self.discard(&stored).await;
                return Err(Self::write_error(e, input.category_id, "insert"));
            }
        };

        info!(
            "Product created: id={}, price={}, image={:?}",
            product.id, product.price, product.image
        );

        Ok(product.into())
    }

    /// Update a product
    ///
    /// A new upload replaces the image; otherwise the path the client
    /// resubmitted is stored as-is (absent means no image).
    pub async fn update(
        &self,
        id: i32,
        input: ProductInput,
        image: Option<ValidatedImage>,
    ) -> Result<ProductResponseDto> {
        let stored = self.store_image(image).await?;
        let image_path = match &stored {
            Some(stored) => Some(stored.public_path.clone()),
            None => input.existing_image.clone(),
        };

        let sql = r#"
            WITH p AS (
                UPDATE products
                SET name = $1, price = $2, image = $3, category_id = $4
                WHERE id = $5
                RETURNING *
            )
            SELECT p.id, p.name, p.price, p.image, p.category_id, p.created_at,
                   c.name AS category_name
            FROM p
            LEFT JOIN categories c ON p.category_id = c.id
        "#;

        let result = sqlx::query_as::<_, ProductWithCategory>(sql)
            .bind(&input.name)
            .bind(input.price)
            .bind(&image_path)
            .bind(input.category_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await;

        let product = match result {
            Ok(Some(product)) => product,
            Ok(None) => {
                self.discard(&stored).await;
                return Err(AppError::NotFound(format!("Product {} not found", id)));
            }
            Err(e) => {
                self.discard(&stored).await;
                return Err(Self::write_error(e, input.category_id, "update"));
            }
        };

        info!("Product updated: id={}", product.id);

        Ok(product.into())
    }

    /// Hard-delete a product
    pub async fn delete(&self, id: i32) -> Result<ProductResponseDto> {
        let sql = r#"
            WITH p AS (
                DELETE FROM products
                WHERE id = $1
                RETURNING *
            )
            SELECT p.id, p.name, p.price, p.image, p.category_id, p.created_at,
                   c.name AS category_name
            FROM p
            LEFT JOIN categories c ON p.category_id = c.id
        "#;

        let product = sqlx::query_as::<_, ProductWithCategory>(sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete product {}: {:?}", id, e);
                AppError::Database(e)
            })?
            .ok_or_else(|| AppError::NotFound(format!("Product {} not found", id)))?;

        info!("Product deleted: id={}", product.id);

        Ok(product.into())
    }
}
