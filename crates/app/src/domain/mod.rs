//! Stepshop Domain Concerns

pub mod account;
pub mod carts;
pub mod shop;
pub mod trophies;
