//! Distribution centers and the people who check stock out of them

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A physical site holding its own inventory
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Center {
    pub id: Uuid,
    /// Numeric site code (e.g., "710"), selects the stock location table
    pub code: String,
    /// Short name used in report URLs
    pub abbreviation: String,
    pub name: String,
}

/// A person or team allowed to check out stock at one center
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct CheckedOutBy {
    pub id: Uuid,
    pub name: String,
    pub distribution_center: Uuid,
}
