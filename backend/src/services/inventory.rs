//! Inventory catalog: stocking, lookup and cross-center comparison

use shared::{
    compare_centers, validate_stock_slot, CheckoutFilter, CreateInventoryInput, Inventory,
    InventoryComparison, InventoryDetail, InventoryFilter, InventoryView,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::store::SharedStore;

/// Checkouts shown on an item's detail page
const RECENT_CHECKOUTS: i64 = 10;

/// Inventory service
#[derive(Clone)]
pub struct InventoryService {
    store: SharedStore,
}

impl InventoryService {
    /// Create a new InventoryService instance
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Stock a product at a location and level of a center
    pub async fn create_item(&self, input: CreateInventoryInput) -> AppResult<Inventory> {
        input.validate()?;

        let center = self
            .store
            .get_center(input.distribution_center)
            .await?
            .ok_or_else(|| AppError::NotFound("Distribution center".to_string()))?;

        if self.store.get_product(input.product).await?.is_none() {
            return Err(AppError::NotFound("Product".to_string()));
        }

        validate_stock_slot(&center.code, &input.stock_location, &input.stock_loc_level)
            .map_err(|(field, message)| AppError::validation(field, message))?;

        let item = self.store.create_inventory(&input).await?;

        tracing::info!(
            inventory_id = %item.id,
            center = %center.abbreviation,
            quantity = item.quantity,
            "Inventory item created"
        );

        Ok(item)
    }

    /// Item with product details and its latest checkouts
    pub async fn get_detail(&self, id: Uuid) -> AppResult<InventoryDetail> {
        let item = self
            .store
            .get_inventory(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Inventory item".to_string()))?;

        let product = self
            .store
            .get_product(item.product)
            .await?
            .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        let view = self
            .store
            .list_inventory(&InventoryFilter {
                center: Some(item.distribution_center),
                ..Default::default()
            })
            .await?
            .into_iter()
            .find(|row| row.id == id)
            .ok_or_else(|| AppError::NotFound("Inventory item".to_string()))?;

        let recent_checkouts = self
            .store
            .list_checkouts(&CheckoutFilter {
                inventory_item: Some(id),
                limit: Some(RECENT_CHECKOUTS),
                ..Default::default()
            })
            .await?;

        Ok(InventoryDetail {
            item: view,
            part_number: product.part_number,
            description: product.description,
            recent_checkouts,
        })
    }

    /// Inventory rows matching a center and product name fragment
    pub async fn lookup(&self, filter: InventoryFilter) -> AppResult<Vec<InventoryView>> {
        self.store.list_inventory(&filter).await
    }

    /// Products stocked at the center with `abbreviation`, alongside what
    /// every other center holds of them
    pub async fn compare(&self, abbreviation: &str) -> AppResult<InventoryComparison> {
        let center = self
            .store
            .find_center_by_abbreviation(abbreviation.trim())
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Distribution center {}", abbreviation)))?;

        let rows = self.store.list_inventory(&InventoryFilter::default()).await?;
        let rows = compare_centers(&center, &rows);

        Ok(InventoryComparison { center, rows })
    }
}
