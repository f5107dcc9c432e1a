//! Carts

pub mod errors;
pub mod models;
pub mod service;

pub use errors::CartError;
pub use models::{CartSnapshot, PurchaseOutcome};
pub use service::CartEngine;
