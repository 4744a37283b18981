//! Checkout history and export handlers

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use shared::{CheckoutFilter, CheckoutTotal, CheckoutView};
use uuid::Uuid;

use super::empty_string_as_none;
use crate::error::AppResult;
use crate::services::ReportingService;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub checked_out_by: Option<Uuid>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub inventory_item: Option<Uuid>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub limit: Option<i64>,
}

impl From<HistoryQuery> for CheckoutFilter {
    fn from(query: HistoryQuery) -> Self {
        CheckoutFilter {
            checked_out_by: query.checked_out_by,
            inventory_item: query.inventory_item,
            limit: query.limit.map(|l| l.max(0)),
        }
    }
}

/// List checkouts, newest first
pub async fn list_checkouts(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> AppResult<Json<Vec<CheckoutView>>> {
    let service = ReportingService::new(state.store.clone());
    let checkouts = service.history(query.into()).await?;
    Ok(Json(checkouts))
}

/// Download checkout history as CSV
pub async fn export_checkouts(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> AppResult<impl IntoResponse> {
    let service = ReportingService::new(state.store.clone());
    let csv = service.export_csv(query.into()).await?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"checkouts.csv\"",
            ),
        ],
        csv,
    ))
}

/// Total quantity checked out per product
pub async fn get_checkout_totals(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<CheckoutTotal>>> {
    let service = ReportingService::new(state.store.clone());
    let totals = service.totals().await?;
    Ok(Json(totals))
}
