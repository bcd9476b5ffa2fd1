use std::sync::Arc;

use crate::client::api::{CatalogApi, Category, Saved};
use crate::client::error::ClientResult;
use crate::client::state::{mutation_notice, Loadable};

/// Category list with add, rename and delete
///
/// Every successful mutation reloads the list; the last server message (or
/// error) is kept in `notice`.
pub struct CategoryManager {
    api: Arc<dyn CatalogApi>,
    pub categories: Loadable<Vec<Category>>,
    pub new_name: String,
    /// Category being renamed, with the edited name
    pub editing: Option<Category>,
    /// Category awaiting delete confirmation
    pub deleting: Option<Category>,
    pub notice: Option<String>,
}

impl CategoryManager {
    pub fn new(api: Arc<dyn CatalogApi>) -> Self {
        Self {
            api,
            categories: Loadable::Loading,
            new_name: String::new(),
            editing: None,
            deleting: None,
            notice: None,
        }
    }

    pub async fn load(&mut self) {
        self.categories = Loadable::Loading;
        self.categories = Loadable::from_result(self.api.list_categories().await);
    }

    fn record<T>(&mut self, result: ClientResult<Saved<T>>) -> bool {
        self.notice = mutation_notice(&result);
        result.is_ok()
    }

    /// Add `new_name` as a category; blank input is ignored
    pub async fn add(&mut self) {
        if self.new_name.trim().is_empty() {
            return;
        }

        let result = self.api.create_category(&self.new_name).await;
        if self.record(result) {
            self.new_name.clear();
            self.load().await;
        }
    }

    pub fn start_edit(&mut self, category: &Category) {
        self.editing = Some(category.clone());
    }

    pub fn set_edit_name(&mut self, name: impl Into<String>) {
        if let Some(editing) = self.editing.as_mut() {
            editing.name = name.into();
        }
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    pub async fn save_edit(&mut self) {
        let Some(editing) = self.editing.clone() else {
            return;
        };
        if editing.name.trim().is_empty() {
            return;
        }

        let result = self.api.update_category(editing.id, &editing.name).await;
        if self.record(result) {
            self.editing = None;
            self.load().await;
        }
    }

    pub fn start_delete(&mut self, category: &Category) {
        self.deleting = Some(category.clone());
    }

    pub fn cancel_delete(&mut self) {
        self.deleting = None;
    }

    pub async fn confirm_delete(&mut self) {
        let Some(deleting) = self.deleting.clone() else {
            return;
        };

        let result = self.api.delete_category(deleting.id).await;
        if self.record(result) {
            self.deleting = None;
            self.load().await;
        }
    }
}
