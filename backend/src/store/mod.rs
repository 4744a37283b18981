//! Storage backends for inventory data
//!
//! [`InventoryStore`] is the seam between the services and persistence.
//! Implementations must run [`InventoryStore::checkout`] and
//! [`InventoryStore::transfer`] as single transactions: the source row is
//! locked exclusively for the whole read-check-write sequence, and a failed
//! step leaves no trace.

use std::sync::Arc;

use async_trait::async_trait;
use shared::{
    Center, CheckedOutBy, Checkout, CheckoutFilter, CheckoutInput, CheckoutView,
    CreateInventoryInput, Inventory, InventoryFilter, InventoryView, Product, TransferInput,
    TransferOutcome,
};
use uuid::Uuid;

use crate::error::AppResult;

mod locks;
pub mod memory;
pub mod postgres;

pub use locks::{RowGuard, RowLocks};
pub use memory::{MemorySeed, MemoryStore};
pub use postgres::PgStore;

/// Store handle shared by handlers and services
pub type SharedStore = Arc<dyn InventoryStore>;

#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// Short backend name for health reporting
    fn backend_name(&self) -> &'static str;

    /// Check that the backend can serve queries
    async fn ping(&self) -> AppResult<()>;

    async fn list_centers(&self) -> AppResult<Vec<Center>>;

    async fn get_center(&self, id: Uuid) -> AppResult<Option<Center>>;

    async fn find_center_by_abbreviation(&self, abbreviation: &str) -> AppResult<Option<Center>>;

    async fn get_product(&self, id: Uuid) -> AppResult<Option<Product>>;

    async fn get_checked_out_by(&self, id: Uuid) -> AppResult<Option<CheckedOutBy>>;

    /// People for one center, or everyone when `center` is `None`, by name
    async fn list_checked_out_by(&self, center: Option<Uuid>) -> AppResult<Vec<CheckedOutBy>>;

    async fn get_inventory(&self, id: Uuid) -> AppResult<Option<Inventory>>;

    /// Rows ordered by center name, product name, location and level
    async fn list_inventory(&self, filter: &InventoryFilter) -> AppResult<Vec<InventoryView>>;

    /// Insert a new row; an existing row for the same slot is a duplicate
    async fn create_inventory(&self, input: &CreateInventoryInput) -> AppResult<Inventory>;

    /// Checkouts, newest first
    async fn list_checkouts(&self, filter: &CheckoutFilter) -> AppResult<Vec<CheckoutView>>;

    /// Lock the item, decrement it and record the checkout atomically
    async fn checkout(&self, input: &CheckoutInput) -> AppResult<Checkout>;

    /// Lock the source, decrement it and credit the destination slot
    /// (creating it when absent) atomically
    async fn transfer(&self, input: &TransferInput) -> AppResult<TransferOutcome>;
}
