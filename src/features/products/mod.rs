//! Products, with optional category and uploaded image.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/products/all` | All products with category name, newest first |
//! | GET | `/products/{id}` | One product |
//! | GET | `/products?search=&category_id=` | Filtered search |
//! | POST | `/products` | Multipart create |
//! | PUT | `/products/{id}` | Multipart update |
//! | DELETE | `/products/{id}` | Hard delete |

pub mod dtos;
pub mod extractor;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::ProductService;
