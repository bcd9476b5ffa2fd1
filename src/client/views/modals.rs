use crate::client::api::{CatalogApi, Category, ImageFile, Product, ProductDraft, Saved};
use crate::client::error::ClientResult;

/// Edit form for one product, prefilled from the row
#[derive(Debug, Clone, PartialEq)]
pub struct EditModal {
    pub product: Product,
    pub name: String,
    pub price: String,
    pub category_id: String,
    /// Newly picked file, if any
    pub image: Option<ImageFile>,
    /// Current image path, or the picked file's name
    pub preview: Option<String>,
    pub categories: Vec<Category>,
}

impl EditModal {
    pub fn new(product: Product) -> Self {
        Self {
            name: product.name.clone(),
            price: product.price.to_string(),
            category_id: product
                .category_id
                .map(|id| id.to_string())
                .unwrap_or_default(),
            image: None,
            preview: product.image.clone(),
            categories: Vec::new(),
            product,
        }
    }

    /// Fill the category options; a failure leaves them empty
    pub async fn load_categories(&mut self, api: &dyn CatalogApi) {
        match api.list_categories().await {
            Ok(categories) => self.categories = categories,
            Err(e) => tracing::warn!("Failed to load categories: {}", e),
        }
    }

    pub fn pick_image(&mut self, file: ImageFile) {
        self.preview = Some(file.file_name.clone());
        self.image = Some(file);
    }

    /// Form contents; without a new file the current image path is resent
    pub fn draft(&self) -> ProductDraft {
        ProductDraft {
            name: self.name.clone(),
            price: self.price.clone(),
            category_id: self.category_id.clone(),
            image: self.image.clone(),
            existing_image: match self.image {
                Some(_) => None,
                None => self.product.image.clone(),
            },
        }
    }

    pub async fn save(&self, api: &dyn CatalogApi) -> ClientResult<Saved<Product>> {
        api.update_product(self.product.id, &self.draft()).await
    }
}

/// Delete confirmation for one product
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteModal {
    pub product: Product,
}

impl DeleteModal {
    pub fn new(product: Product) -> Self {
        Self { product }
    }

    pub async fn confirm(&self, api: &dyn CatalogApi) -> ClientResult<Saved<Product>> {
        api.delete_product(self.product.id).await
    }
}

/// QR code contents for a product's detail page
#[derive(Debug, Clone, PartialEq)]
pub struct QrModal {
    pub product: Product,
    origin: String,
}

impl QrModal {
    pub fn new(product: Product, origin: &str) -> Self {
        Self {
            product,
            origin: origin.trim_end_matches('/').to_string(),
        }
    }

    /// URL encoded in the QR code
    pub fn payload(&self) -> String {
        format!("{}/products/{}", self.origin, self.product.id)
    }

    pub fn download_file_name(&self) -> String {
        format!("QR_{}.png", self.product.name)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::client::fake::FakeCatalog;

    async fn first_product(fake: &FakeCatalog) -> Product {
        fake.list_products().await.unwrap().remove(0)
    }

    fn png(name: &str) -> ImageFile {
        ImageFile {
            file_name: name.to_string(),
            content_type: "image/png".to_string(),
            data: vec![0x89, b'P', b'N', b'G'],
        }
    }

    #[tokio::test]
    async fn test_edit_prefills_from_product() {
        let fake = FakeCatalog::new()
            .with_category("Drinks")
            .with_product("Coke", 15000, Some(1));
        let modal = EditModal::new(first_product(&fake).await);

        assert_eq!(modal.name, "Coke");
        assert_eq!(modal.price, "15000");
        assert_eq!(modal.category_id, "1");
    }

    #[tokio::test]
    async fn test_edit_without_new_file_resends_existing_image() {
        let fake = FakeCatalog::new().with_product("Coke", 15000, None);
        let mut product = first_product(&fake).await;
        product.image = Some("/uploads/1700000000000.png".to_string());

        let mut modal = EditModal::new(product);
        modal.price = "16000".to_string();
        let saved = modal.save(&fake).await.unwrap();

        assert_eq!(saved.item.price, 16000);
        assert_eq!(
            fake.drafts()[0].existing_image.as_deref(),
            Some("/uploads/1700000000000.png")
        );
        assert_eq!(saved.item.image.as_deref(), Some("/uploads/1700000000000.png"));
    }

    #[tokio::test]
    async fn test_edit_with_new_file_replaces_image() {
        let fake = FakeCatalog::new().with_product("Coke", 15000, None);
        let mut modal = EditModal::new(first_product(&fake).await);

        modal.pick_image(png("Coke.PNG"));
        assert_eq!(modal.preview.as_deref(), Some("Coke.PNG"));

        let draft = modal.draft();
        assert!(draft.image.is_some());
        assert!(draft.existing_image.is_none());

        let saved = modal.save(&fake).await.unwrap();
        assert!(saved.item.image.unwrap().ends_with(".png"));
    }

    #[tokio::test]
    async fn test_edit_loads_category_options() {
        let fake = FakeCatalog::new()
            .with_category("Snacks")
            .with_category("Drinks")
            .with_product("Coke", 15000, None);
        let mut modal = EditModal::new(first_product(&fake).await);

        modal.load_categories(&fake).await;
        let names: Vec<&str> = modal.categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Drinks", "Snacks"]);
    }

    #[tokio::test]
    async fn test_delete_confirm_removes_product() {
        let fake = Arc::new(FakeCatalog::new().with_product("Coke", 15000, None));
        let modal = DeleteModal::new(first_product(&fake).await);

        let saved = modal.confirm(fake.as_ref()).await.unwrap();
        assert_eq!(saved.message.as_deref(), Some("Product deleted successfully"));
        assert!(fake.products().is_empty());
    }

    #[tokio::test]
    async fn test_qr_payload_and_file_name() {
        let fake = FakeCatalog::new().with_product("Coke", 15000, None);
        let product = first_product(&fake).await;
        let id = product.id;

        let modal = QrModal::new(product, "https://shop.example/");
        assert_eq!(modal.payload(), format!("https://shop.example/products/{}", id));
        assert_eq!(modal.download_file_name(), "QR_Coke.png");
    }
}
