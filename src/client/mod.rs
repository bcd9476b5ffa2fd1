//! Client side of the catalog.
//!
//! Views talk to the server through [`CatalogApi`]; [`HttpCatalogClient`] is
//! the production implementation. Each view owns its remote data as a
//! [`Loadable`] and keeps the last server message for display.

pub mod api;
pub mod error;
#[cfg(test)]
pub mod fake;
pub mod format;
pub mod http;
pub mod state;
pub mod views;

pub use api::{CatalogApi, ImageFile, ProductDraft, Saved, SearchParams};
pub use error::{ClientError, ClientResult};
pub use http::HttpCatalogClient;
pub use state::Loadable;
