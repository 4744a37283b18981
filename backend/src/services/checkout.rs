//! Checkout transaction handling
//!
//! Form-level checks run first (quantity, center membership); the stock
//! check itself happens inside the store transaction with the row locked.

use shared::{Checkout, CheckoutInput};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::store::SharedStore;

/// Checkout service for taking stock out of inventory
#[derive(Clone)]
pub struct CheckoutService {
    store: SharedStore,
}

impl CheckoutService {
    /// Create a new CheckoutService instance
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Check out `quantity` of an inventory item for a person at a center
    pub async fn checkout(&self, input: CheckoutInput) -> AppResult<Checkout> {
        input.validate()?;

        let center = self
            .store
            .get_center(input.center)
            .await?
            .ok_or_else(|| AppError::NotFound("Distribution center".to_string()))?;

        let person = self
            .store
            .get_checked_out_by(input.checked_out_by)
            .await?
            .ok_or_else(|| AppError::NotFound("Checked out by".to_string()))?;

        if person.distribution_center != center.id {
            return Err(AppError::validation(
                "checked_out_by",
                format!("{} is not a valid choice for {}", person.name, center.name),
            ));
        }

        let item = self
            .store
            .get_inventory(input.inventory_item)
            .await?
            .ok_or_else(|| AppError::NotFound("Inventory item".to_string()))?;

        if item.distribution_center != center.id {
            return Err(AppError::validation(
                "inventory_item",
                format!("Item is not stocked at {}", center.name),
            ));
        }

        let checkout = self.store.checkout(&input).await?;

        tracing::info!(
            checkout_id = %checkout.id,
            inventory_item = %checkout.inventory_item,
            checked_out_by = %checkout.checked_out_by,
            quantity = checkout.quantity,
            "Stock checked out"
        );

        Ok(checkout)
    }
}
