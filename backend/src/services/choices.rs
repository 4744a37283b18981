//! Cascading form choices

use shared::{location_choices, Center, CheckoutChoices, InventoryFilter, LocationChoices};
use uuid::Uuid;

use crate::error::AppResult;
use crate::store::SharedStore;

#[derive(Clone)]
pub struct ChoiceService {
    store: SharedStore,
}

impl ChoiceService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Centers offered by the first dropdown of every form
    pub async fn centers(&self) -> AppResult<Vec<Center>> {
        self.store.list_centers().await
    }

    /// People and in-stock items for the selected center.
    ///
    /// No center, or a center that does not exist, yields empty lists.
    pub async fn checkout_choices(&self, center: Option<Uuid>) -> AppResult<CheckoutChoices> {
        let Some(center_id) = center else {
            return Ok(CheckoutChoices::default());
        };
        if self.store.get_center(center_id).await?.is_none() {
            return Ok(CheckoutChoices::default());
        }

        let checked_out_by = self.store.list_checked_out_by(Some(center_id)).await?;
        let inventory_items = self
            .store
            .list_inventory(&InventoryFilter {
                center: Some(center_id),
                product_name: None,
                in_stock_only: true,
            })
            .await?;

        Ok(CheckoutChoices {
            checked_out_by,
            inventory_items,
        })
    }

    /// Stock location and level choices for a center code
    pub fn location_choices(&self, center_code: &str) -> LocationChoices {
        location_choices(center_code)
    }
}
