//! In-process inventory store for development and tests
//!
//! Table data sits behind one `RwLock` that is only held for short reads and
//! writes. Stock decrements are serialized per row through [`RowLocks`]; a
//! decrement re-checks the quantity in the same write section that records
//! its effect, so a failed check changes nothing.

use std::{collections::HashMap, path::Path};

use anyhow::{bail, Context};
use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use shared::{
    plan_checkout, plan_transfer, Center, CheckedOutBy, Checkout, CheckoutFilter, CheckoutInput,
    CheckoutView, CreateInventoryInput, Inventory, InventoryFilter, InventoryView, Product,
    TransferInput, TransferOutcome,
};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{InventoryStore, RowLocks};
use crate::error::{AppError, AppResult};

/// Reference data and opening stock for a [`MemoryStore`]
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MemorySeed {
    #[serde(default)]
    pub centers: Vec<Center>,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub checked_out_by: Vec<CheckedOutBy>,
    #[serde(default)]
    pub inventory: Vec<SeedInventory>,
}

/// Opening stock row; the id is generated when omitted
#[derive(Debug, Clone, Deserialize)]
pub struct SeedInventory {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub distribution_center: Uuid,
    pub product: Uuid,
    pub stock_location: String,
    pub stock_loc_level: String,
    pub quantity: i32,
}

impl MemorySeed {
    /// Read a seed from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading seed file {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("parsing seed file {}", path.display()))
    }
}

#[derive(Default)]
struct Tables {
    centers: HashMap<Uuid, Center>,
    products: HashMap<Uuid, Product>,
    people: HashMap<Uuid, CheckedOutBy>,
    inventory: HashMap<Uuid, Inventory>,
    checkouts: Vec<Checkout>,
}

impl Tables {
    fn find_slot(
        &self,
        center: Uuid,
        product: Uuid,
        location: &str,
        level: &str,
    ) -> Option<Uuid> {
        self.inventory
            .values()
            .find(|i| {
                i.distribution_center == center
                    && i.product == product
                    && i.stock_location == location
                    && i.stock_loc_level == level
            })
            .map(|i| i.id)
    }

    fn inventory_view(&self, item: &Inventory) -> Option<InventoryView> {
        let center = self.centers.get(&item.distribution_center)?;
        let product = self.products.get(&item.product)?;

        Some(InventoryView {
            id: item.id,
            center_id: center.id,
            center_code: center.code.clone(),
            center_abbreviation: center.abbreviation.clone(),
            center_name: center.name.clone(),
            product_id: product.id,
            product_name: product.name.clone(),
            stock_location: item.stock_location.clone(),
            stock_loc_level: item.stock_loc_level.clone(),
            quantity: item.quantity,
        })
    }

    fn checkout_view(&self, checkout: &Checkout) -> Option<CheckoutView> {
        let item = self.inventory.get(&checkout.inventory_item)?;
        let center = self.centers.get(&checkout.center)?;
        let product = self.products.get(&item.product)?;
        let person = self.people.get(&checkout.checked_out_by)?;

        Some(CheckoutView {
            id: checkout.id,
            checked_out_at: checkout.checked_out_at,
            center_name: center.name.clone(),
            product_id: product.id,
            product_name: product.name.clone(),
            stock_location: item.stock_location.clone(),
            stock_loc_level: item.stock_loc_level.clone(),
            checked_out_by_id: person.id,
            checked_out_by_name: person.name.clone(),
            inventory_item: item.id,
            quantity: checkout.quantity,
        })
    }
}

/// Inventory store kept entirely in memory
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    row_locks: RowLocks,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from seed data, checking references and quantities
    pub fn from_seed(seed: MemorySeed) -> anyhow::Result<Self> {
        let mut tables = Tables::default();

        for center in seed.centers {
            tables.centers.insert(center.id, center);
        }
        for product in seed.products {
            tables.products.insert(product.id, product);
        }
        for person in seed.checked_out_by {
            if !tables.centers.contains_key(&person.distribution_center) {
                bail!("{} refers to unknown center {}", person.name, person.distribution_center);
            }
            tables.people.insert(person.id, person);
        }

        let now = Utc::now();
        for row in seed.inventory {
            if !tables.centers.contains_key(&row.distribution_center) {
                bail!("inventory {} refers to unknown center {}", row.id, row.distribution_center);
            }
            if !tables.products.contains_key(&row.product) {
                bail!("inventory {} refers to unknown product {}", row.id, row.product);
            }
            if row.quantity < 0 {
                bail!("inventory {} has negative quantity {}", row.id, row.quantity);
            }
            if tables
                .find_slot(
                    row.distribution_center,
                    row.product,
                    &row.stock_location,
                    &row.stock_loc_level,
                )
                .is_some()
            {
                bail!("inventory {} duplicates an existing location and level", row.id);
            }

            tables.inventory.insert(
                row.id,
                Inventory {
                    id: row.id,
                    distribution_center: row.distribution_center,
                    product: row.product,
                    stock_location: row.stock_location,
                    stock_loc_level: row.stock_loc_level,
                    quantity: row.quantity,
                    updated_at: now,
                },
            );
        }

        Ok(Self {
            tables: RwLock::new(tables),
            row_locks: RowLocks::new(),
        })
    }
}

#[async_trait]
impl InventoryStore for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }

    async fn list_centers(&self) -> AppResult<Vec<Center>> {
        let tables = self.tables.read().await;
        let mut centers: Vec<Center> = tables.centers.values().cloned().collect();
        centers.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(centers)
    }

    async fn get_center(&self, id: Uuid) -> AppResult<Option<Center>> {
        Ok(self.tables.read().await.centers.get(&id).cloned())
    }

    async fn find_center_by_abbreviation(&self, abbreviation: &str) -> AppResult<Option<Center>> {
        let tables = self.tables.read().await;
        Ok(tables
            .centers
            .values()
            .find(|c| c.abbreviation.eq_ignore_ascii_case(abbreviation))
            .cloned())
    }

    async fn get_product(&self, id: Uuid) -> AppResult<Option<Product>> {
        Ok(self.tables.read().await.products.get(&id).cloned())
    }

    async fn get_checked_out_by(&self, id: Uuid) -> AppResult<Option<CheckedOutBy>> {
        Ok(self.tables.read().await.people.get(&id).cloned())
    }

    async fn list_checked_out_by(&self, center: Option<Uuid>) -> AppResult<Vec<CheckedOutBy>> {
        let tables = self.tables.read().await;
        let mut people: Vec<CheckedOutBy> = tables
            .people
            .values()
            .filter(|p| center.map_or(true, |c| p.distribution_center == c))
            .cloned()
            .collect();
        people.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(people)
    }

    async fn get_inventory(&self, id: Uuid) -> AppResult<Option<Inventory>> {
        Ok(self.tables.read().await.inventory.get(&id).cloned())
    }

    async fn list_inventory(&self, filter: &InventoryFilter) -> AppResult<Vec<InventoryView>> {
        let tables = self.tables.read().await;
        let needle = filter.product_name.as_ref().map(|n| n.to_lowercase());

        let mut rows: Vec<InventoryView> = tables
            .inventory
            .values()
            .filter(|i| filter.center.map_or(true, |c| i.distribution_center == c))
            .filter(|i| !filter.in_stock_only || i.quantity != 0)
            .filter_map(|i| tables.inventory_view(i))
            .filter(|v| {
                needle
                    .as_ref()
                    .map_or(true, |n| v.product_name.to_lowercase().contains(n))
            })
            .collect();

        rows.sort_by(|a, b| {
            (&a.center_name, &a.product_name, &a.stock_location, &a.stock_loc_level).cmp(&(
                &b.center_name,
                &b.product_name,
                &b.stock_location,
                &b.stock_loc_level,
            ))
        });
        Ok(rows)
    }

    async fn create_inventory(&self, input: &CreateInventoryInput) -> AppResult<Inventory> {
        if input.quantity < 0 {
            return Err(AppError::validation("quantity", "Quantity cannot be negative"));
        }

        let mut tables = self.tables.write().await;
        if !tables.centers.contains_key(&input.distribution_center) {
            return Err(AppError::NotFound("Distribution center".to_string()));
        }
        if !tables.products.contains_key(&input.product) {
            return Err(AppError::NotFound("Product".to_string()));
        }
        if tables
            .find_slot(
                input.distribution_center,
                input.product,
                &input.stock_location,
                &input.stock_loc_level,
            )
            .is_some()
        {
            return Err(AppError::DuplicateEntry("stock_location".to_string()));
        }

        let item = Inventory {
            id: Uuid::new_v4(),
            distribution_center: input.distribution_center,
            product: input.product,
            stock_location: input.stock_location.clone(),
            stock_loc_level: input.stock_loc_level.clone(),
            quantity: input.quantity,
            updated_at: Utc::now(),
        };
        tables.inventory.insert(item.id, item.clone());
        Ok(item)
    }

    async fn list_checkouts(&self, filter: &CheckoutFilter) -> AppResult<Vec<CheckoutView>> {
        let tables = self.tables.read().await;

        let mut rows: Vec<CheckoutView> = tables
            .checkouts
            .iter()
            .rev()
            .filter(|c| filter.checked_out_by.map_or(true, |p| c.checked_out_by == p))
            .filter(|c| filter.inventory_item.map_or(true, |i| c.inventory_item == i))
            .filter_map(|c| tables.checkout_view(c))
            .collect();

        // Stable sort keeps later inserts first among equal timestamps
        rows.sort_by(|a, b| b.checked_out_at.cmp(&a.checked_out_at));
        if let Some(limit) = filter.limit {
            rows.truncate(usize::try_from(limit.max(0)).unwrap_or(usize::MAX));
        }
        Ok(rows)
    }

    async fn checkout(&self, input: &CheckoutInput) -> AppResult<Checkout> {
        let _row = self.row_locks.acquire(input.inventory_item).await;

        {
            let tables = self.tables.read().await;
            let available = tables
                .inventory
                .get(&input.inventory_item)
                .map(|i| i.quantity)
                .ok_or_else(|| AppError::NotFound("Inventory item".to_string()))?;
            if !tables.people.contains_key(&input.checked_out_by) {
                return Err(AppError::NotFound("Checked out by".to_string()));
            }
            plan_checkout(available, input.quantity)?;
        }

        let mut tables = self.tables.write().await;
        let now = Utc::now();
        let item = tables
            .inventory
            .get_mut(&input.inventory_item)
            .ok_or_else(|| AppError::NotFound("Inventory item".to_string()))?;
        // Only row-lock holders decrement, so the quantity can only have grown
        // since the check above.
        item.quantity = plan_checkout(item.quantity, input.quantity)?;
        item.updated_at = now;
        let center = item.distribution_center;

        let checkout = Checkout {
            id: Uuid::new_v4(),
            center,
            inventory_item: input.inventory_item,
            checked_out_by: input.checked_out_by,
            quantity: input.quantity,
            checked_out_at: now,
        };
        tables.checkouts.push(checkout.clone());

        Ok(checkout)
    }

    async fn transfer(&self, input: &TransferInput) -> AppResult<TransferOutcome> {
        let _row = self.row_locks.acquire(input.inventory_item).await;

        {
            let tables = self.tables.read().await;
            let source = tables
                .inventory
                .get(&input.inventory_item)
                .ok_or_else(|| AppError::NotFound("Inventory item".to_string()))?;
            if source.stock_location == input.stock_location
                && source.stock_loc_level == input.stock_loc_level
            {
                return Err(AppError::validation(
                    "stock_location",
                    "Destination is the same as the current location",
                ));
            }
            let destination_current = tables
                .find_slot(
                    source.distribution_center,
                    source.product,
                    &input.stock_location,
                    &input.stock_loc_level,
                )
                .and_then(|id| tables.inventory.get(&id))
                .map_or(0, |d| d.quantity);
            plan_transfer(source.quantity, destination_current, input.quantity)?;
        }

        let mut tables = self.tables.write().await;
        let source = tables
            .inventory
            .get(&input.inventory_item)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Inventory item".to_string()))?;
        let destination_id = tables.find_slot(
            source.distribution_center,
            source.product,
            &input.stock_location,
            &input.stock_loc_level,
        );
        let destination_current = destination_id
            .and_then(|id| tables.inventory.get(&id))
            .map_or(0, |d| d.quantity);

        // Both quantities are computed before either row changes
        let plan = plan_transfer(source.quantity, destination_current, input.quantity)?;
        let now = Utc::now();

        let source = {
            let row = tables
                .inventory
                .get_mut(&source.id)
                .ok_or_else(|| AppError::NotFound("Inventory item".to_string()))?;
            row.quantity = plan.source_remaining;
            row.updated_at = now;
            row.clone()
        };

        let destination = match destination_id.and_then(|id| tables.inventory.get_mut(&id)) {
            Some(row) => {
                row.quantity = plan.destination_total;
                row.updated_at = now;
                row.clone()
            }
            None => {
                let row = Inventory {
                    id: Uuid::new_v4(),
                    distribution_center: source.distribution_center,
                    product: source.product,
                    stock_location: input.stock_location.clone(),
                    stock_loc_level: input.stock_loc_level.clone(),
                    quantity: plan.destination_total,
                    updated_at: now,
                };
                tables.inventory.insert(row.id, row.clone());
                row
            }
        };

        Ok(TransferOutcome {
            source,
            destination,
            quantity: input.quantity,
        })
    }
}

