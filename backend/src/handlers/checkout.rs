//! Checkout handlers

use axum::{extract::State, http::StatusCode, Json};
use shared::{Checkout, CheckoutInput};

use crate::error::AppResult;
use crate::services::CheckoutService;
use crate::AppState;

/// Check stock out of an inventory item
pub async fn create_checkout(
    State(state): State<AppState>,
    Json(input): Json<CheckoutInput>,
) -> AppResult<(StatusCode, Json<Checkout>)> {
    let service = CheckoutService::new(state.store.clone());
    let checkout = service.checkout(input).await?;
    Ok((StatusCode::CREATED, Json(checkout)))
}
