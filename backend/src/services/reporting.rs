//! Checkout history, CSV export and per-product totals

use serde::Serialize;
use shared::{checkout_totals, CheckoutFilter, CheckoutTotal, CheckoutView};

use crate::error::{AppError, AppResult};
use crate::store::SharedStore;

/// Reporting service
#[derive(Clone)]
pub struct ReportingService {
    store: SharedStore,
}

/// One exported checkout line
#[derive(Debug, Serialize)]
struct CheckoutCsvRow<'a> {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Center")]
    center: &'a str,
    #[serde(rename = "Product")]
    product: &'a str,
    #[serde(rename = "Location")]
    location: &'a str,
    #[serde(rename = "Level")]
    level: &'a str,
    #[serde(rename = "Checked Out By")]
    checked_out_by: &'a str,
    #[serde(rename = "Quantity")]
    quantity: i32,
}

impl<'a> From<&'a CheckoutView> for CheckoutCsvRow<'a> {
    fn from(view: &'a CheckoutView) -> Self {
        Self {
            date: view.checked_out_at.format("%Y-%m-%d %H:%M").to_string(),
            center: &view.center_name,
            product: &view.product_name,
            location: &view.stock_location,
            level: &view.stock_loc_level,
            checked_out_by: &view.checked_out_by_name,
            quantity: view.quantity,
        }
    }
}

impl ReportingService {
    /// Create a new ReportingService instance
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Checkouts, newest first
    pub async fn history(&self, filter: CheckoutFilter) -> AppResult<Vec<CheckoutView>> {
        self.store.list_checkouts(&filter).await
    }

    /// Checkout history as CSV
    pub async fn export_csv(&self, filter: CheckoutFilter) -> AppResult<String> {
        let checkouts = self.history(filter).await?;
        let rows: Vec<CheckoutCsvRow<'_>> = checkouts.iter().map(CheckoutCsvRow::from).collect();
        Self::export_to_csv(&rows)
    }

    /// Quantity checked out per product, largest first
    pub async fn totals(&self) -> AppResult<Vec<CheckoutTotal>> {
        let checkouts = self.history(CheckoutFilter::default()).await?;
        Ok(checkout_totals(&checkouts))
    }

    /// Serialize records as CSV with a header row
    pub fn export_to_csv<T: Serialize>(data: &[T]) -> AppResult<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        for record in data {
            wtr.serialize(record)
                .map_err(|e| AppError::Internal(format!("CSV serialization error: {}", e)))?;
        }
        let bytes = wtr
            .into_inner()
            .map_err(|e| AppError::Internal(format!("CSV writer error: {}", e)))?;
        String::from_utf8(bytes)
            .map_err(|e| AppError::Internal(format!("UTF-8 conversion error: {}", e)))
    }
}
