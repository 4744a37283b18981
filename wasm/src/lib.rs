//! WebAssembly module for the Stock Room Inventory forms
//!
//! Lets the browser fill the location and level dropdowns and check a
//! quantity before the form is submitted. The server repeats every check.

use wasm_bindgen::prelude::*;

pub use shared::locations::*;
pub use shared::types::*;
pub use shared::validation::*;

/// Location and level choices for a center code, as JSON
#[wasm_bindgen]
pub fn location_choices_json(center_code: &str) -> Result<String, JsValue> {
    serde_json::to_string(&location_choices(center_code))
        .map_err(|e| JsValue::from_str(&format!("Serialization failed: {}", e)))
}

/// Stock location values offered for a center code
#[wasm_bindgen]
pub fn stock_location_values(center_code: &str) -> js_sys::Array {
    stock_location_choices(center_code)
        .iter()
        .map(|(value, _)| JsValue::from_str(value))
        .collect()
}

/// Shelf level values, top to bottom
#[wasm_bindgen]
pub fn stock_level_values() -> js_sys::Array {
    LEVEL_CHOICES
        .iter()
        .map(|(value, _)| JsValue::from_str(value))
        .collect()
}

/// Error message for a quantity, or `None` when it is acceptable
#[wasm_bindgen]
pub fn quantity_error(quantity: i32) -> Option<String> {
    validate_quantity(quantity).err().map(str::to_string)
}

/// Check a transfer destination against the center's tables
#[wasm_bindgen]
pub fn is_valid_destination(
    center_code: &str,
    stock_location: &str,
    stock_loc_level: &str,
) -> bool {
    match validate_stock_slot(center_code, stock_location, stock_loc_level) {
        Ok(()) => true,
        Err((field, message)) => {
            if cfg!(target_arch = "wasm32") {
                web_sys::console::warn_1(&format!("{}: {}", field, message).into());
            }
            false
        }
    }
}
