pub mod analytics;
pub mod categories;
pub mod products;
