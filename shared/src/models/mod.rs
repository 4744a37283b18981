//! Domain models for the Stock Room Inventory service

mod center;
mod checkout;
mod inventory;
mod product;

pub use center::*;
pub use checkout::*;
pub use inventory::*;
pub use product::*;
