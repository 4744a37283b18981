//! Shared types and models for the Stock Room Inventory service
//!
//! This crate contains types shared between the backend, the browser
//! (via WASM), and other components of the system.

pub mod locations;
pub mod models;
pub mod reports;
pub mod stock;
pub mod types;
pub mod validation;

pub use locations::*;
pub use models::*;
pub use reports::*;
pub use stock::*;
pub use types::*;
pub use validation::*;
