//! Checkout records and the checkout form

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::{CheckedOutBy, InventoryView};

/// Immutable record of stock removed for use by a named person
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Checkout {
    pub id: Uuid,
    pub center: Uuid,
    pub inventory_item: Uuid,
    pub checked_out_by: Uuid,
    pub quantity: i32,
    pub checked_out_at: DateTime<Utc>,
}

/// Checkout form submission
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CheckoutInput {
    pub center: Uuid,
    pub inventory_item: Uuid,
    pub checked_out_by: Uuid,
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i32,
}

/// Checkout joined with names, as listed and exported
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct CheckoutView {
    pub id: Uuid,
    pub checked_out_at: DateTime<Utc>,
    pub center_name: String,
    pub product_id: Uuid,
    pub product_name: String,
    pub stock_location: String,
    pub stock_loc_level: String,
    pub checked_out_by_id: Uuid,
    pub checked_out_by_name: String,
    pub inventory_item: Uuid,
    pub quantity: i32,
}

/// Filter for checkout history
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckoutFilter {
    pub checked_out_by: Option<Uuid>,
    pub inventory_item: Option<Uuid>,
    pub limit: Option<i64>,
}

/// Choices offered by the checkout form once a center is picked
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckoutChoices {
    pub checked_out_by: Vec<CheckedOutBy>,
    pub inventory_items: Vec<InventoryView>,
}
