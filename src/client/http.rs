use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::client::api::{
    CatalogApi, Category, CategoryAverage, Product, ProductDraft, Saved, SearchParams,
};
use crate::client::error::{ClientError, ClientResult};
use crate::shared::types::ApiResponse;

/// [`CatalogApi`] over HTTP against a running catalog server
#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl HttpCatalogClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http_client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http_client,
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<Saved<T>> {
        let response = request.send().await.map_err(|e| {
            tracing::error!("Catalog request failed: {}", e);
            ClientError::Transport(e)
        })?;

        let envelope = read_envelope::<T>(response).await?;
        let item = envelope
            .data
            .ok_or_else(|| ClientError::InvalidResponse("response carries no data".to_string()))?;

        Ok(Saved {
            item,
            message: envelope.message,
        })
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        self.send(request).await.map(|saved| saved.item)
    }

    fn product_form(draft: &ProductDraft) -> ClientResult<Form> {
        let mut form = Form::new()
            .text("name", draft.name.clone())
            .text("price", draft.price.clone())
            .text("category_id", draft.category_id.clone());

        match (&draft.image, &draft.existing_image) {
            (Some(image), _) => {
                let part = Part::bytes(image.data.clone())
                    .file_name(image.file_name.clone())
                    .mime_str(&image.content_type)
                    .map_err(|e| {
                        ClientError::InvalidRequest(format!(
                            "invalid image type '{}': {}",
                            image.content_type, e
                        ))
                    })?;
                form = form.part("image", part);
            }
            (None, Some(existing)) => {
                form = form.text("image", existing.clone());
            }
            (None, None) => {}
        }

        Ok(form)
    }
}

/// Decode the response envelope, turning failures into the server's message
async fn read_envelope<T: DeserializeOwned>(response: Response) -> ClientResult<ApiResponse<T>> {
    let status = response.status();

    if !status.is_success() {
        let message = response
            .json::<ApiResponse<serde_json::Value>>()
            .await
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string()
            });
        tracing::warn!("Catalog API error: HTTP {} - {}", status, message);
        return Err(ClientError::Api {
            status: status.as_u16(),
            message,
        });
    }

    response.json::<ApiResponse<T>>().await.map_err(|e| {
        tracing::error!("Failed to parse catalog response: {}", e);
        ClientError::InvalidResponse(e.to_string())
    })
}

#[async_trait]
impl CatalogApi for HttpCatalogClient {
    async fn list_categories(&self) -> ClientResult<Vec<Category>> {
        self.fetch(self.http_client.get(self.url("/categories")))
            .await
    }

    async fn create_category(&self, name: &str) -> ClientResult<Saved<Category>> {
        let request = self
            .http_client
            .post(self.url("/categories"))
            .json(&json!({ "name": name }));
        self.send(request).await
    }

    async fn update_category(&self, id: i32, name: &str) -> ClientResult<Saved<Category>> {
        let request = self
            .http_client
            .put(self.url(&format!("/categories/{}", id)))
            .json(&json!({ "name": name }));
        self.send(request).await
    }

    async fn delete_category(&self, id: i32) -> ClientResult<Saved<Category>> {
        let request = self
            .http_client
            .delete(self.url(&format!("/categories/{}", id)));
        self.send(request).await
    }

    async fn list_products(&self) -> ClientResult<Vec<Product>> {
        self.fetch(self.http_client.get(self.url("/products/all")))
            .await
    }

    async fn get_product(&self, id: i32) -> ClientResult<Product> {
        self.fetch(self.http_client.get(self.url(&format!("/products/{}", id))))
            .await
    }

    async fn search_products(&self, params: &SearchParams) -> ClientResult<Vec<Product>> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if !params.search.trim().is_empty() {
            query.push(("search", params.search.clone()));
        }
        if let Some(category_id) = params.category_id {
            query.push(("category_id", category_id.to_string()));
        }

        let request = self.http_client.get(self.url("/products")).query(&query);
        self.fetch(request).await
    }

    async fn create_product(&self, draft: &ProductDraft) -> ClientResult<Saved<Product>> {
        let form = Self::product_form(draft)?;
        let request = self.http_client.post(self.url("/products")).multipart(form);
        self.send(request).await
    }

    async fn update_product(&self, id: i32, draft: &ProductDraft) -> ClientResult<Saved<Product>> {
        let form = Self::product_form(draft)?;
        let request = self
            .http_client
            .put(self.url(&format!("/products/{}", id)))
            .multipart(form);
        self.send(request).await
    }

    async fn delete_product(&self, id: i32) -> ClientResult<Saved<Product>> {
        let request = self
            .http_client
            .delete(self.url(&format!("/products/{}", id)));
        self.send(request).await
    }

    async fn average_price_by_category(&self) -> ClientResult<Vec<CategoryAverage>> {
        self.fetch(
            self.http_client
                .get(self.url("/analytics/average-price-by-category")),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tempfile::TempDir;

    use super::*;
    use crate::client::api::ImageFile;
    use crate::core::app::{build_router, AppServices};
    use crate::core::database;
    use crate::modules::storage::LocalImageStore;
    use crate::shared::test_helpers::test_config;

    /// Real router on a local port, over a pool that never connects
    async fn serve() -> (HttpCatalogClient, TempDir) {
        let upload_dir = tempfile::tempdir().unwrap();
        let config = test_config(upload_dir.path().to_path_buf());
        let pool = database::create_lazy_pool(&config.database).unwrap();
        let images = Arc::new(LocalImageStore::new(&config.upload));
        let services = AppServices::new(pool, images, config.upload.max_file_size);
        let router = build_router(&config, services);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        (HttpCatalogClient::new(format!("http://{}", addr)), upload_dir)
    }

    fn draft(name: &str, price: &str) -> ProductDraft {
        ProductDraft {
            name: name.to_string(),
            price: price.to_string(),
            category_id: String::new(),
            image: None,
            existing_image: None,
        }
    }

    #[test]
    fn test_base_url_trailing_slash_is_dropped() {
        let client = HttpCatalogClient::new("http://localhost:4000/");
        assert_eq!(client.base_url(), "http://localhost:4000");
        assert_eq!(client.url("/products/all"), "http://localhost:4000/products/all");
    }

    #[tokio::test]
    async fn test_unreachable_server_is_a_transport_error() {
        let client = HttpCatalogClient::new("http://127.0.0.1:1");
        let err = client.list_categories().await.unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));
    }

    #[test]
    fn test_bad_image_type_is_an_invalid_request() {
        let mut product = draft("Coke", "1000");
        product.image = Some(ImageFile {
            file_name: "coke.png".to_string(),
            content_type: "not a mime type".to_string(),
            data: vec![1, 2, 3],
        });

        assert!(matches!(
            HttpCatalogClient::product_form(&product),
            Err(ClientError::InvalidRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_negative_price_surfaces_server_message() {
        let (client, _uploads) = serve().await;

        let err = client.create_product(&draft("Coke", "-1")).await.unwrap_err();

        assert_eq!(err.to_string(), "Price must not be negative");
        assert_eq!(err.status(), Some(400));
    }

    #[tokio::test]
    async fn test_non_numeric_id_surfaces_server_message() {
        let (client, _uploads) = serve().await;

        let request = client.http_client.get(client.url("/products/abc"));
        let err = client.fetch::<Product>(request).await.unwrap_err();

        assert_eq!(err.to_string(), "ID must be a number, got 'abc'");
        assert_eq!(err.status(), Some(400));
    }

    #[tokio::test]
    async fn test_blank_category_name_is_an_api_error() {
        let (client, _uploads) = serve().await;

        let err = client.create_category("   ").await.unwrap_err();

        assert!(matches!(
            &err,
            ClientError::Api { status: 400, message } if message == "Category name is required"
        ));
    }

    #[tokio::test]
    async fn test_image_file_is_sent_as_file_part() {
        let (client, uploads) = serve().await;
        let mut product = draft("Coke", "1000");
        product.image = Some(ImageFile {
            file_name: "cat.gif".to_string(),
            content_type: "image/gif".to_string(),
            data: b"GIF89a".to_vec(),
        });

        let err = client.create_product(&product).await.unwrap_err();

        assert_eq!(
            err.to_string(),
            "Only JPEG/JPG/PNG images are supported (got 'cat.gif' as 'image/gif')"
        );
        assert_eq!(std::fs::read_dir(uploads.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_existing_image_is_sent_as_text_field() {
        let (client, _uploads) = serve().await;
        let mut product = draft("Coke", "1000");
        product.existing_image = Some(format!("/uploads/{}.png", "9".repeat(300)));

        let err = client.update_product(1, &product).await.unwrap_err();

        assert_eq!(err.to_string(), "Image path must be at most 255 characters");
        assert_eq!(err.status(), Some(400));
    }
}
