use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, routing::get, Router};

use crate::features::products::handlers;
use crate::features::products::services::ProductService;

/// Room for the text fields and multipart framing on top of the image itself
const MULTIPART_OVERHEAD: usize = 1024 * 1024;

/// Create routes for the products feature
pub fn routes(service: Arc<ProductService>) -> Router {
    let body_limit = DefaultBodyLimit::max(service.max_upload_size() + MULTIPART_OVERHEAD);

    Router::new()
        .route(
            "/products",
            get(handlers::search_products)
                .post(handlers::create_product)
                .layer(body_limit),
        )
        .route("/products/all", get(handlers::list_all_products))
        .route(
            "/products/{id}",
            get(handlers::get_product)
                .put(handlers::update_product)
                .delete(handlers::delete_product)
                .layer(body_limit),
        )
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::multipart::{MultipartForm, Part};
    use serde_json::Value;

    use crate::shared::test_helpers::TestApp;

    fn form(name: &str, price: &str) -> MultipartForm {
        MultipartForm::new()
            .add_text("name", name.to_string())
            .add_text("price", price.to_string())
    }

    #[tokio::test]
    async fn test_negative_price_is_rejected() {
        let app = TestApp::new();
        let response = app.server.post("/products").multipart(form("Coke", "-5")).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["message"], "Price must not be negative");
    }

    #[tokio::test]
    async fn test_non_numeric_price_is_rejected() {
        let app = TestApp::new();
        app.server
            .post("/products")
            .multipart(form("Coke", "cheap"))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_blank_name_is_rejected() {
        let app = TestApp::new();
        app.server
            .post("/products")
            .multipart(form("  ", "1000"))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_non_numeric_category_is_rejected() {
        let app = TestApp::new();
        let multipart = form("Coke", "1000").add_text("category_id", "drinks");
        app.server
            .post("/products")
            .multipart(multipart)
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_disallowed_image_type_is_rejected_without_writing() {
        let app = TestApp::new();
        let image = Part::bytes(b"GIF89a".to_vec())
            .file_name("cat.gif")
            .mime_type("image/gif");
        let multipart = form("Coke", "1000").add_part("image", image);

        app.server
            .post("/products")
            .multipart(multipart)
            .await
            .assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(app.stored_files(), 0);
    }

    #[tokio::test]
    async fn test_renamed_file_with_wrong_type_is_rejected() {
        let app = TestApp::new();
        let image = Part::bytes(b"not really a png".to_vec())
            .file_name("photo.png")
            .mime_type("text/plain");
        let multipart = form("Coke", "1000").add_part("image", image);

        app.server
            .post("/products")
            .multipart(multipart)
            .await
            .assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(app.stored_files(), 0);
    }

    #[tokio::test]
    async fn test_oversized_image_is_rejected() {
        let app = TestApp::new();
        let image = Part::bytes(vec![0u8; 5 * 1024 * 1024 + 1])
            .file_name("big.png")
            .mime_type("image/png");
        let multipart = form("Coke", "1000").add_part("image", image);

        app.server
            .post("/products")
            .multipart(multipart)
            .await
            .assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(app.stored_files(), 0);
    }

    #[tokio::test]
    async fn test_update_with_non_numeric_id_is_rejected() {
        let app = TestApp::new();
        app.server
            .put("/products/abc")
            .multipart(form("Coke", "1000"))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_name_with_nul_is_rejected() {
        let app = TestApp::new();
        let response = app
            .server
            .post("/products")
            .multipart(form("Bad\0Name", "1000"))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["message"], "Name must not contain NUL characters");
    }

    #[tokio::test]
    async fn test_search_term_with_nul_is_rejected() {
        let app = TestApp::new();
        let response = app
            .server
            .get("/products")
            .add_query_param("search", "a\0b")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["message"], "Search term must not contain NUL characters");
    }
}
