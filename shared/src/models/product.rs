//! Product catalog models

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stocked product, independent of where it is stored
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub part_number: Option<String>,
    pub description: Option<String>,
}
