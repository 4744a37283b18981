//! HTTP handlers for the inventory catalog

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use shared::{
    CreateInventoryInput, Inventory, InventoryComparison, InventoryDetail, InventoryFilter,
    InventoryView,
};
use uuid::Uuid;

use super::empty_string_as_none;
use crate::error::AppResult;
use crate::services::InventoryService;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct InventoryQuery {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub center: Option<Uuid>,
    /// Product name fragment
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub q: Option<String>,
    #[serde(default)]
    pub in_stock: bool,
}

/// Add a product to a center's inventory
pub async fn create_inventory_item(
    State(state): State<AppState>,
    Json(input): Json<CreateInventoryInput>,
) -> AppResult<(StatusCode, Json<Inventory>)> {
    let service = InventoryService::new(state.store.clone());
    let item = service.create_item(input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// Look up inventory by center and product name
pub async fn list_inventory(
    State(state): State<AppState>,
    Query(query): Query<InventoryQuery>,
) -> AppResult<Json<Vec<InventoryView>>> {
    let service = InventoryService::new(state.store.clone());
    let rows = service
        .lookup(InventoryFilter {
            center: query.center,
            product_name: query.q,
            in_stock_only: query.in_stock,
        })
        .await?;
    Ok(Json(rows))
}

/// Get one inventory item with its recent checkouts
pub async fn get_inventory_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<InventoryDetail>> {
    let service = InventoryService::new(state.store.clone());
    let detail = service.get_detail(id).await?;
    Ok(Json(detail))
}

/// Compare a center's stock against the other centers
pub async fn compare_inventory(
    State(state): State<AppState>,
    Path(abbreviation): Path<String>,
) -> AppResult<Json<InventoryComparison>> {
    let service = InventoryService::new(state.store.clone());
    let comparison = service.compare(&abbreviation).await?;
    Ok(Json(comparison))
}
