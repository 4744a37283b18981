//! Business logic services for the Stock Room Inventory service

pub mod checkout;
pub mod choices;
pub mod inventory;
pub mod reporting;
pub mod transfer;

pub use checkout::CheckoutService;
pub use choices::ChoiceService;
pub use inventory::InventoryService;
pub use reporting::ReportingService;
pub use transfer::TransferService;
