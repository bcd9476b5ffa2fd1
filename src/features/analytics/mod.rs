//! Read-only aggregates over the catalog.

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use services::AnalyticsService;
