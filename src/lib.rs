//! Product catalog service: REST API over PostgreSQL plus typed client view models.

pub mod client;
pub mod core;
pub mod features;
pub mod modules;
pub mod shared;
