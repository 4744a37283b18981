//! Stock arithmetic for checkouts and transfers
//!
//! These functions decide whether a movement is allowed and what the new
//! quantities are. Storage backends call them while holding the row lock,
//! so the numbers they see are current.

use thiserror::Error;

/// Reasons a stock movement is refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StockError {
    #[error("Quantity must be at least 1, got {0}")]
    InvalidQuantity(i32),

    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: i32, available: i32 },

    #[error("Stock quantity would overflow")]
    Overflow,
}

/// Quantities after a transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferPlan {
    pub source_remaining: i32,
    pub destination_total: i32,
}

/// Remaining quantity after taking `requested` out of `available`
pub fn plan_checkout(available: i32, requested: i32) -> Result<i32, StockError> {
    if requested < 1 {
        return Err(StockError::InvalidQuantity(requested));
    }
    if requested > available {
        return Err(StockError::InsufficientStock {
            requested,
            available,
        });
    }
    Ok(available - requested)
}

/// Move `requested` from a source row holding `available` to a destination
/// row currently holding `destination_current` (0 when it does not exist yet)
pub fn plan_transfer(
    available: i32,
    destination_current: i32,
    requested: i32,
) -> Result<TransferPlan, StockError> {
    let source_remaining = plan_checkout(available, requested)?;
    let destination_total = destination_current
        .checked_add(requested)
        .ok_or(StockError::Overflow)?;

    Ok(TransferPlan {
        source_remaining,
        destination_total,
    })
}
