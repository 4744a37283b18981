//! Dependent-choice handlers for the checkout and transfer forms

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use shared::{Center, CheckoutChoices, LocationChoices};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::ChoiceService;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CenterQuery {
    pub center: Option<String>,
}

/// All distribution centers, by name
pub async fn list_centers(State(state): State<AppState>) -> AppResult<Json<Vec<Center>>> {
    let service = ChoiceService::new(state.store.clone());
    let centers = service.centers().await?;
    Ok(Json(centers))
}

/// People and in-stock items for a center
///
/// A missing or unparseable center gives empty choices rather than an error.
pub async fn get_checkout_choices(
    State(state): State<AppState>,
    Query(query): Query<CenterQuery>,
) -> AppResult<Json<CheckoutChoices>> {
    let center = query
        .center
        .as_deref()
        .and_then(|raw| Uuid::parse_str(raw.trim()).ok());

    let service = ChoiceService::new(state.store.clone());
    let choices = service.checkout_choices(center).await?;
    Ok(Json(choices))
}

/// Stock locations and levels for a center code
pub async fn get_location_choices(
    State(state): State<AppState>,
    Path(center_code): Path<String>,
) -> Json<LocationChoices> {
    let service = ChoiceService::new(state.store.clone());
    Json(service.location_choices(&center_code))
}
