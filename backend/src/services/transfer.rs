//! Stock transfers between locations of one distribution center

use shared::{validate_stock_slot, TransferInput, TransferOutcome};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::store::SharedStore;

/// Transfer service for moving stock between cabinets and levels
#[derive(Clone)]
pub struct TransferService {
    store: SharedStore,
}

impl TransferService {
    /// Create a new TransferService instance
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Move stock from an inventory row to another location and level of
    /// the same center
    pub async fn transfer(&self, input: TransferInput) -> AppResult<TransferOutcome> {
        input.validate()?;

        let item = self
            .store
            .get_inventory(input.inventory_item)
            .await?
            .ok_or_else(|| AppError::NotFound("Inventory item".to_string()))?;

        let center = self
            .store
            .get_center(item.distribution_center)
            .await?
            .ok_or_else(|| AppError::NotFound("Distribution center".to_string()))?;

        validate_stock_slot(&center.code, &input.stock_location, &input.stock_loc_level)
            .map_err(|(field, message)| AppError::validation(field, message))?;

        if item.stock_location == input.stock_location
            && item.stock_loc_level == input.stock_loc_level
        {
            return Err(AppError::validation(
                "stock_location",
                "Destination is the same as the current location",
            ));
        }

        let outcome = self.store.transfer(&input).await?;

        tracing::info!(
            source = %outcome.source.id,
            destination = %outcome.destination.id,
            quantity = outcome.quantity,
            "Stock transferred"
        );

        Ok(outcome)
    }
}
