use std::sync::Arc;

use rust_decimal::prelude::ToPrimitive;

use crate::client::api::{CatalogApi, CategoryAverage};
use crate::client::state::Loadable;

/// Data for a single-series bar chart
#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub title: String,
    pub dataset_label: String,
    pub x_axis_label: String,
    pub y_axis_label: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl BarChart {
    /// Average price per category, one bar per category
    pub fn average_price(rows: &[CategoryAverage]) -> Self {
        Self {
            title: "Average Price by Category".to_string(),
            dataset_label: "Average price (VND)".to_string(),
            x_axis_label: "Category".to_string(),
            y_axis_label: "Price (VND)".to_string(),
            labels: rows.iter().map(|r| r.category_name.clone()).collect(),
            values: rows
                .iter()
                .map(|r| r.average_price.to_f64().unwrap_or(0.0))
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Price analytics screen
pub struct AnalyticsView {
    api: Arc<dyn CatalogApi>,
    pub chart: Loadable<BarChart>,
}

impl AnalyticsView {
    pub fn new(api: Arc<dyn CatalogApi>) -> Self {
        Self {
            api,
            chart: Loadable::Loading,
        }
    }

    pub async fn load(&mut self) {
        self.chart = Loadable::Loading;
        let result = self.api.average_price_by_category().await;
        self.chart = Loadable::from_result(result.map(|rows| BarChart::average_price(&rows)));
    }
}
