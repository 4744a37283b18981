//! Stock location tables for each distribution center
//!
//! A distribution center is identified here by its numeric code ("710",
//! "730", "750"). Each center has its own set of cabinets; shelf levels are
//! the same everywhere.

use crate::types::{ChoiceOption, LocationChoices};

pub const CABINET_CHOICES_710: &[(&str, &str)] = &[
    ("Cabinet 1", "Cabinet 1"),
    ("Cabinet 2", "Cabinet 2"),
    ("Cabinet 3", "Cabinet 3"),
    ("Cabinet 4", "Cabinet 4"),
    ("Cabinet 5", "Cabinet 5"),
    ("Cabinet 6", "Cabinet 6"),
    ("Overflow Rack", "Overflow Rack"),
];

pub const CABINET_CHOICES_730: &[(&str, &str)] = &[
    ("Cabinet 1", "Cabinet 1"),
    ("Cabinet 2", "Cabinet 2"),
    ("Cabinet 3", "Cabinet 3"),
    ("Cabinet 4", "Cabinet 4"),
    ("Bulk Shelf", "Bulk Shelf"),
];

pub const CABINET_CHOICES_750: &[(&str, &str)] = &[
    ("Cabinet 1", "Cabinet 1"),
    ("Cabinet 2", "Cabinet 2"),
    ("Cabinet 3", "Cabinet 3"),
    ("Cabinet 4", "Cabinet 4"),
    ("Cabinet 5", "Cabinet 5"),
    ("Cabinet 6", "Cabinet 6"),
    ("Cabinet 7", "Cabinet 7"),
    ("Cabinet 8", "Cabinet 8"),
];

/// Shelf levels, top to bottom
pub const LEVEL_CHOICES: &[(&str, &str)] = &[
    ("1", "Level 1"),
    ("2", "Level 2"),
    ("3", "Level 3"),
    ("4", "Level 4"),
    ("5", "Level 5"),
];

/// Stock location choices for a distribution center code.
///
/// Unknown codes get no choices, so any submitted location is rejected.
pub fn stock_location_choices(center_code: &str) -> &'static [(&'static str, &'static str)] {
    match center_code.trim() {
        "710" => CABINET_CHOICES_710,
        "730" => CABINET_CHOICES_730,
        "750" => CABINET_CHOICES_750,
        _ => &[],
    }
}

/// Check that a stock location is offered for the given center code
pub fn is_valid_stock_location(center_code: &str, stock_location: &str) -> bool {
    stock_location_choices(center_code)
        .iter()
        .any(|(value, _)| *value == stock_location)
}

/// Check that a shelf level is one of [`LEVEL_CHOICES`]
pub fn is_valid_stock_level(stock_loc_level: &str) -> bool {
    LEVEL_CHOICES.iter().any(|(value, _)| *value == stock_loc_level)
}

/// Owned choice lists for a center, ready to serialize
pub fn location_choices(center_code: &str) -> LocationChoices {
    LocationChoices {
        center_code: center_code.trim().to_string(),
        stock_locations: ChoiceOption::from_pairs(stock_location_choices(center_code)),
        stock_levels: ChoiceOption::from_pairs(LEVEL_CHOICES),
    }
}
