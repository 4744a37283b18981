//! Inventory rows, transfers and their read views

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::CheckoutView;

/// Stock of one product at one location and level of a center
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Inventory {
    pub id: Uuid,
    pub distribution_center: Uuid,
    pub product: Uuid,
    pub stock_location: String,
    pub stock_loc_level: String,
    /// Never negative
    pub quantity: i32,
    pub updated_at: DateTime<Utc>,
}

/// Inventory row joined with its center and product names
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct InventoryView {
    pub id: Uuid,
    pub center_id: Uuid,
    pub center_code: String,
    pub center_abbreviation: String,
    pub center_name: String,
    pub product_id: Uuid,
    pub product_name: String,
    pub stock_location: String,
    pub stock_loc_level: String,
    pub quantity: i32,
}

/// Inventory row with its latest checkouts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryDetail {
    #[serde(flatten)]
    pub item: InventoryView,
    pub part_number: Option<String>,
    pub description: Option<String>,
    pub recent_checkouts: Vec<CheckoutView>,
}

/// Filter for inventory lookups
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InventoryFilter {
    pub center: Option<Uuid>,
    /// Case-insensitive product name fragment
    pub product_name: Option<String>,
    /// Skip rows with zero quantity
    #[serde(default)]
    pub in_stock_only: bool,
}

/// Input for adding a product to a center's inventory
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateInventoryInput {
    pub distribution_center: Uuid,
    pub product: Uuid,
    #[validate(range(min = 0, message = "Quantity cannot be negative"))]
    pub quantity: i32,
    #[validate(length(min = 1, message = "Stock location is required"))]
    pub stock_location: String,
    #[validate(length(min = 1, message = "Stock level is required"))]
    pub stock_loc_level: String,
}

/// Input for moving stock to another location in the same center
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TransferInput {
    pub inventory_item: Uuid,
    #[validate(range(min = 1, message = "Quantity to transfer must be at least 1"))]
    pub quantity: i32,
    #[validate(length(min = 1, message = "Location to transfer to is required"))]
    pub stock_location: String,
    #[validate(length(min = 1, message = "Level of receiving location is required"))]
    pub stock_loc_level: String,
}

/// Both rows after a committed transfer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferOutcome {
    pub source: Inventory,
    pub destination: Inventory,
    pub quantity: i32,
}
