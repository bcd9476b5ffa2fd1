//! View models, one per screen or modal

pub mod analytics;
pub mod categories;
pub mod detail;
pub mod modals;
pub mod products;

pub use analytics::{AnalyticsView, BarChart};
pub use categories::CategoryManager;
pub use detail::ProductDetail;
pub use modals::{DeleteModal, EditModal, QrModal};
pub use products::{ProductForm, ProductList, ProductModal, ProductRow, ProductsPage, SearchBar};
