use std::sync::Arc;

use crate::client::api::{CatalogApi, Category, ImageFile, Product, ProductDraft, SearchParams};
use crate::client::format::{category_label, format_timestamp, format_vnd, NO_IMAGE_LABEL};
use crate::client::state::{mutation_notice, Loadable};
use crate::client::views::modals::{DeleteModal, EditModal, QrModal};

/// New-product form
pub struct ProductForm {
    api: Arc<dyn CatalogApi>,
    pub name: String,
    pub price: String,
    /// Empty means no category
    pub category_id: String,
    pub image: Option<ImageFile>,
    pub categories: Vec<Category>,
    pub notice: Option<String>,
}

impl ProductForm {
    pub fn new(api: Arc<dyn CatalogApi>) -> Self {
        Self {
            api,
            name: String::new(),
            price: String::new(),
            category_id: String::new(),
            image: None,
            categories: Vec::new(),
            notice: None,
        }
    }

    /// Fill the category options; a failure leaves them empty
    pub async fn load_categories(&mut self) {
        match self.api.list_categories().await {
            Ok(categories) => self.categories = categories,
            Err(e) => tracing::warn!("Failed to load categories: {}", e),
        }
    }

    pub fn pick_image(&mut self, file: ImageFile) {
        self.image = Some(file);
    }

    pub fn draft(&self) -> ProductDraft {
        ProductDraft {
            name: self.name.clone(),
            price: self.price.clone(),
            category_id: self.category_id.clone(),
            image: self.image.clone(),
            existing_image: None,
        }
    }

    fn reset(&mut self) {
        self.name.clear();
        self.price.clear();
        self.category_id.clear();
        self.image = None;
    }

    /// Submit the form; fields are cleared only when the product was created
    pub async fn submit(&mut self) -> bool {
        let result = self.api.create_product(&self.draft()).await;
        self.notice = mutation_notice(&result);

        if result.is_ok() {
            self.reset();
        }
        result.is_ok()
    }
}

/// Name search box
pub struct SearchBar {
    api: Arc<dyn CatalogApi>,
    pub term: String,
    pub category_id: Option<i32>,
    pub notice: Option<String>,
}

impl SearchBar {
    pub fn new(api: Arc<dyn CatalogApi>) -> Self {
        Self {
            api,
            term: String::new(),
            category_id: None,
            notice: None,
        }
    }

    /// Run the search; `None` when it failed (the error is in `notice`)
    pub async fn search(&mut self) -> Option<Vec<Product>> {
        let params = SearchParams {
            search: self.term.clone(),
            category_id: self.category_id,
        };

        match self.api.search_products(&params).await {
            Ok(products) => {
                self.notice = None;
                Some(products)
            }
            Err(e) => {
                self.notice = Some(e.to_string());
                None
            }
        }
    }
}

/// Modal currently open over the product table
#[derive(Debug, Clone, PartialEq)]
pub enum ProductModal {
    Edit(EditModal),
    Delete(DeleteModal),
    Qr(QrModal),
}

/// One table row, formatted for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRow {
    pub id: i32,
    pub image: Option<String>,
    pub name: String,
    pub category: String,
    pub price: String,
    pub created_at: String,
}

impl ProductRow {
    fn from_product(product: &Product) -> Self {
        Self {
            id: product.id,
            image: product.image.clone(),
            name: product.name.clone(),
            category: category_label(product.category_name.as_deref()).to_string(),
            price: format_vnd(i64::from(product.price)),
            created_at: format_timestamp(&product.created_at),
        }
    }

    /// Image path, or a placeholder text when there is none
    pub fn image_or_label(&self) -> &str {
        self.image.as_deref().unwrap_or(NO_IMAGE_LABEL)
    }
}

/// Product table with its edit, delete and QR modals
pub struct ProductList {
    api: Arc<dyn CatalogApi>,
    origin: String,
    pub products: Loadable<Vec<Product>>,
    pub modal: Option<ProductModal>,
    pub notice: Option<String>,
}

impl ProductList {
    /// `origin` is the public address of the client, used for QR links
    pub fn new(api: Arc<dyn CatalogApi>, origin: impl Into<String>) -> Self {
        Self {
            api,
            origin: origin.into(),
            products: Loadable::Loading,
            modal: None,
            notice: None,
        }
    }

    pub async fn load(&mut self) {
        self.products = Loadable::Loading;
        self.products = Loadable::from_result(self.api.list_products().await);
    }

    pub fn rows(&self) -> Vec<ProductRow> {
        self.products
            .items()
            .iter()
            .map(ProductRow::from_product)
            .collect()
    }

    /// Replace the rows with search results
    pub fn show_results(&mut self, products: Vec<Product>) {
        self.products = Loadable::Ready(products);
    }

    pub async fn open_edit(&mut self, product: &Product) {
        let mut modal = EditModal::new(product.clone());
        modal.load_categories(self.api.as_ref()).await;
        self.modal = Some(ProductModal::Edit(modal));
    }

    pub fn open_delete(&mut self, product: &Product) {
        self.modal = Some(ProductModal::Delete(DeleteModal::new(product.clone())));
    }

    pub fn open_qr(&mut self, product: &Product) {
        self.modal = Some(ProductModal::Qr(QrModal::new(product.clone(), &self.origin)));
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
    }

    /// Mutable access to the open edit modal's fields
    pub fn edit_modal(&mut self) -> Option<&mut EditModal> {
        match self.modal.as_mut() {
            Some(ProductModal::Edit(modal)) => Some(modal),
            _ => None,
        }
    }

    /// Save the open edit modal; on success it closes and the list reloads
    pub async fn save_edit(&mut self) {
        let Some(ProductModal::Edit(modal)) = &self.modal else {
            return;
        };

        let result = modal.save(self.api.as_ref()).await;
        self.notice = mutation_notice(&result);
        if result.is_ok() {
            self.modal = None;
            self.load().await;
        }
    }

    /// Confirm the open delete modal; on success it closes and the list reloads
    pub async fn confirm_delete(&mut self) {
        let Some(ProductModal::Delete(modal)) = &self.modal else {
            return;
        };

        let result = modal.confirm(self.api.as_ref()).await;
        self.notice = mutation_notice(&result);
        if result.is_ok() {
            self.modal = None;
            self.load().await;
        }
    }
}

/// Products screen: form, search bar and table
///
/// Search results go from the search bar to the table through this parent.
pub struct ProductsPage {
    pub form: ProductForm,
    pub search: SearchBar,
    pub list: ProductList,
}

impl ProductsPage {
    pub fn new(api: Arc<dyn CatalogApi>, origin: impl Into<String>) -> Self {
        Self {
            form: ProductForm::new(api.clone()),
            search: SearchBar::new(api.clone()),
            list: ProductList::new(api, origin),
        }
    }

    pub async fn load(&mut self) {
        self.form.load_categories().await;
        self.list.load().await;
    }

    pub async fn search(&mut self) {
        if let Some(results) = self.search.search().await {
            self.list.show_results(results);
        }
    }

    /// Submit the new-product form and reload the table on success
    pub async fn submit_product(&mut self) {
        if self.form.submit().await {
            self.list.load().await;
        }
    }
}
