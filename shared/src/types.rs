//! Common types used across the service

use serde::{Deserialize, Serialize};

/// A single `(value, label)` option for a select field
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChoiceOption {
    pub value: String,
    pub label: String,
}

impl ChoiceOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    /// Convert a static choice table into owned options
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Vec<ChoiceOption> {
        pairs
            .iter()
            .map(|(value, label)| ChoiceOption::new(*value, *label))
            .collect()
    }
}

/// Location-dependent choices for the product and transfer forms
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocationChoices {
    pub center_code: String,
    pub stock_locations: Vec<ChoiceOption>,
    pub stock_levels: Vec<ChoiceOption>,
}
