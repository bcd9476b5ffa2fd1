//! Product categories.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/categories` | List categories by name |
//! | POST | `/categories` | Create category |
//! | PUT | `/categories/{id}` | Rename category |
//! | DELETE | `/categories/{id}` | Delete category, products keep existing uncategorised |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::CategoryService;
