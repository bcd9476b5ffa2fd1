mod product_service;

pub use product_service::{ProductService, SELECT_PRODUCT_WITH_CATEGORY};
