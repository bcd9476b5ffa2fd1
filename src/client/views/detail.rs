use std::sync::Arc;

use crate::client::api::{CatalogApi, Product};
use crate::client::format::{category_label, format_timestamp, format_vnd};
use crate::client::state::Loadable;

/// Single product page, the target of QR links
pub struct ProductDetail {
    api: Arc<dyn CatalogApi>,
    pub id: i32,
    pub product: Loadable<Product>,
}

impl ProductDetail {
    pub fn new(api: Arc<dyn CatalogApi>, id: i32) -> Self {
        Self {
            api,
            id,
            product: Loadable::Loading,
        }
    }

    pub async fn load(&mut self) {
        self.product = Loadable::Loading;
        self.product = Loadable::from_result(self.api.get_product(self.id).await);
    }

    /// Label/value rows shown under the image
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        let Some(product) = self.product.data() else {
            return Vec::new();
        };

        vec![
            ("ID", product.id.to_string()),
            ("Price", format_vnd(i64::from(product.price))),
            (
                "Category",
                category_label(product.category_name.as_deref()).to_string(),
            ),
            ("Created", format_timestamp(&product.created_at)),
        ]
    }
}
