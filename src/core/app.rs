//! Router assembly
//!
//! ```text
//! /
//! ├── /health
//! ├── /categories, /categories/{id}
//! ├── /products, /products/all, /products/{id}
//! ├── /analytics/average-price-by-category
//! ├── /uploads/*            # stored product images
//! ├── /swagger-ui, /api-docs/openapi.json
//! └── fallback              # static client bundle, when configured
//! ```

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit, http::StatusCode, middleware::from_fn, routing::get, Router,
};
use sqlx::PgPool;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::core::config::Config;
use crate::core::middleware;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::features::analytics::{routes as analytics_routes, AnalyticsService};
use crate::features::categories::{routes as categories_routes, CategoryService};
use crate::features::products::{routes as products_routes, ProductService};
use crate::modules::storage::LocalImageStore;

/// Service handles shared by the request handlers
pub struct AppServices {
    pub categories: Arc<CategoryService>,
    pub products: Arc<ProductService>,
    pub analytics: Arc<AnalyticsService>,
}

impl AppServices {
    pub fn new(pool: PgPool, images: Arc<LocalImageStore>, max_upload_size: usize) -> Self {
        Self {
            categories: Arc::new(CategoryService::new(pool.clone())),
            products: Arc::new(ProductService::new(pool.clone(), images, max_upload_size)),
            analytics: Arc::new(AnalyticsService::new(pool)),
        }
    }
}

async fn health_check() -> StatusCode {
    StatusCode::OK
}

fn swagger_router(config: &Config) -> Router {
    let swagger_modifier = SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    let swagger =
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi));

    match config.swagger.credentials() {
        Some(credentials) => {
            tracing::info!("Swagger UI basic auth enabled");
            swagger.layer(from_fn(middleware::basic_auth_middleware(Arc::new(
                credentials,
            ))))
        }
        None => {
            tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
            swagger
        }
    }
}

/// Build the complete application router with its middleware stack
pub fn build_router(config: &Config, services: AppServices) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .merge(categories_routes::routes(services.categories))
        .merge(products_routes::routes(services.products))
        .merge(analytics_routes::routes(services.analytics));

    let mut app = Router::new()
        .merge(swagger_router(config))
        .merge(api_routes)
        .nest_service(
            &config.upload.url_prefix,
            ServeDir::new(&config.upload.dir),
        );

    if let Some(dir) = &config.static_files.dir {
        tracing::info!("Serving client bundle from {}", dir.display());
        let index = ServeFile::new(dir.join("index.html"));
        app = app.fallback_service(ServeDir::new(dir).fallback(index));
    }

    app.layer(DefaultBodyLimit::max(config.app.max_request_body_size))
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid))
}
