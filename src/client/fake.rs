//! In-memory catalog used by the view tests

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use rust_decimal::Decimal;

use crate::client::api::{
    CatalogApi, Category, CategoryAverage, Product, ProductDraft, Saved, SearchParams,
};
use crate::client::error::{ClientError, ClientResult};
use crate::shared::validation::{parse_optional_id, parse_price};

#[derive(Default)]
struct State {
    categories: Vec<Category>,
    products: Vec<Product>,
    next_id: i32,
    tick: i64,
    failure: Option<String>,
    calls: Vec<String>,
    drafts: Vec<ProductDraft>,
}

impl State {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    fn now(&mut self) -> chrono::DateTime<Utc> {
        self.tick += 1;
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap() + Duration::seconds(self.tick)
    }

    fn category_name(&self, id: Option<i32>) -> Option<String> {
        id.and_then(|id| self.categories.iter().find(|c| c.id == id))
            .map(|c| c.name.clone())
    }
}

fn bad_request(message: &str) -> ClientError {
    ClientError::Api {
        status: 400,
        message: message.to_string(),
    }
}

fn not_found(message: String) -> ClientError {
    ClientError::Api {
        status: 404,
        message,
    }
}

fn saved<T>(item: T, message: &str) -> Saved<T> {
    Saved {
        item,
        message: Some(message.to_string()),
    }
}

#[derive(Default)]
pub struct FakeCatalog {
    state: Mutex<State>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(self, name: &str) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            let id = state.next_id();
            let created_at = state.now();
            state.categories.push(Category {
                id,
                name: name.to_string(),
                created_at,
            });
        }
        self
    }

    pub fn with_product(self, name: &str, price: i32, category_id: Option<i32>) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            let id = state.next_id();
            let created_at = state.now();
            let category_name = state.category_name(category_id);
            state.products.push(Product {
                id,
                name: name.to_string(),
                price,
                image: None,
                category_id,
                category_name,
                created_at,
            });
        }
        self
    }

    /// Every following call fails with this server message
    pub fn fail_with(&self, message: &str) {
        self.state.lock().unwrap().failure = Some(message.to_string());
    }

    pub fn recover(&self) {
        self.state.lock().unwrap().failure = None;
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn call_count(&self, name: &str) -> usize {
        self.calls().iter().filter(|c| c.as_str() == name).count()
    }

    /// Product drafts received by create/update, in order
    pub fn drafts(&self) -> Vec<ProductDraft> {
        self.state.lock().unwrap().drafts.clone()
    }

    pub fn products(&self) -> Vec<Product> {
        self.state.lock().unwrap().products.clone()
    }

    fn begin(&self, call: &str) -> ClientResult<std::sync::MutexGuard<'_, State>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call.to_string());
        if let Some(message) = state.failure.clone() {
            return Err(ClientError::Api {
                status: 500,
                message,
            });
        }
        Ok(state)
    }

    fn apply_draft(state: &mut State, draft: &ProductDraft) -> ClientResult<(i32, Option<i32>)> {
        if draft.name.trim().is_empty() {
            return Err(bad_request("Product name is required"));
        }
        let price = parse_price(&draft.price).map_err(|m| bad_request(&m))?;
        let category_id = parse_optional_id(&draft.category_id).map_err(|m| bad_request(&m))?;
        if let Some(id) = category_id {
            if !state.categories.iter().any(|c| c.id == id) {
                return Err(bad_request(&format!("Category {} does not exist", id)));
            }
        }
        state.drafts.push(draft.clone());
        Ok((price, category_id))
    }

    fn image_path(state: &State, draft: &ProductDraft) -> Option<String> {
        match &draft.image {
            Some(image) => {
                let ext = image
                    .file_name
                    .rsplit_once('.')
                    .map(|(_, ext)| ext.to_lowercase())
                    .unwrap_or_default();
                Some(format!("/uploads/{}.{}", 1_700_000_000_000 + state.tick, ext))
            }
            None => draft.existing_image.clone(),
        }
    }
}

#[async_trait]
impl CatalogApi for FakeCatalog {
    async fn list_categories(&self) -> ClientResult<Vec<Category>> {
        let state = self.begin("list_categories")?;
        let mut categories = state.categories.clone();
        categories.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(categories)
    }

    async fn create_category(&self, name: &str) -> ClientResult<Saved<Category>> {
        let mut state = self.begin("create_category")?;
        if name.trim().is_empty() {
            return Err(bad_request("Category name is required"));
        }
        let category = Category {
            id: state.next_id(),
            name: name.trim().to_string(),
            created_at: state.now(),
        };
        state.categories.push(category.clone());
        Ok(saved(category, "Category created successfully"))
    }

    async fn update_category(&self, id: i32, name: &str) -> ClientResult<Saved<Category>> {
        let mut state = self.begin("update_category")?;
        if name.trim().is_empty() {
            return Err(bad_request("Category name is required"));
        }
        let category = state
            .categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| not_found(format!("Category {} not found", id)))?;
        category.name = name.trim().to_string();
        let category = category.clone();
        for product in state.products.iter_mut() {
            if product.category_id == Some(id) {
                product.category_name = Some(category.name.clone());
            }
        }
        Ok(saved(category, "Category updated successfully"))
    }

    async fn delete_category(&self, id: i32) -> ClientResult<Saved<Category>> {
        let mut state = self.begin("delete_category")?;
        let index = state
            .categories
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| not_found(format!("Category {} not found", id)))?;
        let category = state.categories.remove(index);
        for product in state.products.iter_mut() {
            if product.category_id == Some(id) {
                product.category_id = None;
                product.category_name = None;
            }
        }
        Ok(saved(category, "Category deleted successfully"))
    }

    async fn list_products(&self) -> ClientResult<Vec<Product>> {
        let state = self.begin("list_products")?;
        let mut products = state.products.clone();
        products.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(products)
    }

    async fn get_product(&self, id: i32) -> ClientResult<Product> {
        let state = self.begin("get_product")?;
        state
            .products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| not_found(format!("Product {} not found", id)))
    }

    async fn search_products(&self, params: &SearchParams) -> ClientResult<Vec<Product>> {
        let state = self.begin("search_products")?;
        let term = params.search.trim().to_lowercase();
        let mut products: Vec<Product> = state
            .products
            .iter()
            .filter(|p| term.is_empty() || p.name.to_lowercase().contains(&term))
            .filter(|p| params.category_id.is_none() || p.category_id == params.category_id)
            .cloned()
            .collect();
        products.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(products)
    }

    async fn create_product(&self, draft: &ProductDraft) -> ClientResult<Saved<Product>> {
        let mut state = self.begin("create_product")?;
        let (price, category_id) = Self::apply_draft(&mut state, draft)?;
        let id = state.next_id();
        let created_at = state.now();
        let image = Self::image_path(&state, draft);
        let product = Product {
            id,
            name: draft.name.trim().to_string(),
            price,
            image,
            category_id,
            category_name: state.category_name(category_id),
            created_at,
        };
        state.products.push(product.clone());
        Ok(saved(product, "Product created successfully"))
    }

    async fn update_product(&self, id: i32, draft: &ProductDraft) -> ClientResult<Saved<Product>> {
        let mut state = self.begin("update_product")?;
        let (price, category_id) = Self::apply_draft(&mut state, draft)?;
        let image = Self::image_path(&state, draft);
        let category_name = state.category_name(category_id);
        let product = state
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| not_found(format!("Product {} not found", id)))?;
        product.name = draft.name.trim().to_string();
        product.price = price;
        product.image = image;
        product.category_id = category_id;
        product.category_name = category_name;
        Ok(saved(product.clone(), "Product updated successfully"))
    }

    async fn delete_product(&self, id: i32) -> ClientResult<Saved<Product>> {
        let mut state = self.begin("delete_product")?;
        let index = state
            .products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| not_found(format!("Product {} not found", id)))?;
        let product = state.products.remove(index);
        Ok(saved(product, "Product deleted successfully"))
    }

    async fn average_price_by_category(&self) -> ClientResult<Vec<CategoryAverage>> {
        let state = self.begin("average_price_by_category")?;
        let mut rows: Vec<CategoryAverage> = state
            .categories
            .iter()
            .map(|c| {
                let prices: Vec<i64> = state
                    .products
                    .iter()
                    .filter(|p| p.category_id == Some(c.id))
                    .map(|p| i64::from(p.price))
                    .collect();
                let average_price = if prices.is_empty() {
                    Decimal::ZERO
                } else {
                    Decimal::from(prices.iter().sum::<i64>()) / Decimal::from(prices.len())
                };
                CategoryAverage {
                    id: c.id,
                    category_name: c.name.clone(),
                    average_price,
                }
            })
            .collect();
        rows.sort_by(|a, b| a.category_name.cmp(&b.category_name));
        Ok(rows)
    }
}
