use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::CategoryResponseDto;
use crate::features::categories::models::Category;

/// Service for category operations
pub struct CategoryService {
    pool: PgPool,
}

impl CategoryService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all categories ordered by name
    pub async fn list(&self) -> Result<Vec<CategoryResponseDto>> {
        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, created_at
            FROM categories
            ORDER BY name ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list categories: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(categories.into_iter().map(|c| c.into()).collect())
    }

    /// Create a new category
    pub async fn create(&self, name: &str) -> Result<CategoryResponseDto> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name)
            VALUES ($1)
            RETURNING id, name, created_at
            "#,
        )
        .bind(name.trim())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert category: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!("Category created: id={}, name={}", category.id, category.name);

        Ok(category.into())
    }

    /// Rename a category
    pub async fn rename(&self, id: i32, name: &str) -> Result<CategoryResponseDto> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories
            SET name = $1
            WHERE id = $2
            RETURNING id, name, created_at
            "#,
        )
        .bind(name.trim())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update category {}: {:?}", id, e);
            AppError::Database(e)
        })?;

        category
            .map(|c| c.into())
            .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))
    }

    /// Delete a category, unlinking its products first
    ///
    /// Both statements run in one transaction; when the category does not
    /// exist the transaction is rolled back and no product is touched.
    pub async fn delete(&self, id: i32) -> Result<CategoryResponseDto> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            tracing::error!("Failed to begin transaction: {:?}", e);
            AppError::Database(e)
        })?;

        let unlinked = sqlx::query("UPDATE products SET category_id = NULL WHERE category_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to unlink products from category {}: {:?}", id, e);
                AppError::Database(e)
            })?
            .rows_affected();

        let deleted = sqlx::query_as::<_, Category>(
            r#"
            DELETE FROM categories
            WHERE id = $1
            RETURNING id, name, created_at
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete category {}: {:?}", id, e);
            AppError::Database(e)
        })?;

        let Some(category) = deleted else {
            tx.rollback().await.map_err(AppError::Database)?;
            return Err(AppError::NotFound(format!("Category {} not found", id)));
        };

        tx.commit().await.map_err(|e| {
            tracing::error!("Failed to commit category delete {}: {:?}", id, e);
            AppError::Database(e)
        })?;

        tracing::info!(
            "Category deleted: id={}, unlinked_products={}",
            category.id,
            unlinked
        );

        Ok(category.into())
    }
}
