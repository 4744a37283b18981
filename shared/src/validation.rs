//! Validation utilities for inventory forms

use validator::ValidationErrors;

use crate::locations::{is_valid_stock_level, is_valid_stock_location};

/// Validate a checkout or transfer quantity
pub fn validate_quantity(quantity: i32) -> Result<(), &'static str> {
    if quantity < 1 {
        return Err("Quantity must be at least 1");
    }
    Ok(())
}

/// Validate a location/level pair against a center's choice tables.
///
/// Returns the offending field name with the message.
pub fn validate_stock_slot(
    center_code: &str,
    stock_location: &str,
    stock_loc_level: &str,
) -> Result<(), (&'static str, &'static str)> {
    if !is_valid_stock_location(center_code, stock_location) {
        return Err((
            "stock_location",
            "Select a valid stock location for this distribution center",
        ));
    }
    if !is_valid_stock_level(stock_loc_level) {
        return Err(("stock_loc_level", "Select a valid stock level"));
    }
    Ok(())
}

/// First field violation, ordered by field name so reports are stable
pub fn first_violation(errors: &ValidationErrors) -> Option<(String, String)> {
    let field_errors = errors.field_errors();
    let mut fields: Vec<_> = field_errors.keys().copied().collect();
    fields.sort_unstable();

    fields.into_iter().find_map(|field| {
        field_errors.get(field)?.first().map(|error| {
            let message = error
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("Invalid value for {}", field));
            (field.to_string(), message)
        })
    })
}
