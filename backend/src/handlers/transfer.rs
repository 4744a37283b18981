//! Transfer handlers

use axum::{extract::State, Json};
use shared::{TransferInput, TransferOutcome};

use crate::error::AppResult;
use crate::services::TransferService;
use crate::AppState;

/// Move stock to another location and level of the same center
pub async fn create_transfer(
    State(state): State<AppState>,
    Json(input): Json<TransferInput>,
) -> AppResult<Json<TransferOutcome>> {
    let service = TransferService::new(state.store.clone());
    let outcome = service.transfer(input).await?;
    Ok(Json(outcome))
}
