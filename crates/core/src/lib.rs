//! Stepshop
//!
//! Point-based commerce computation for the stepshop client: cart totals,
//! coupon discounts, purchase quotes and trophy progress. Everything here is
//! pure and synchronous; the `stepshop-app` crate drives it against the backend.

pub mod cart;
pub mod checkout;
pub mod coupons;
pub mod fixtures;
pub mod format;
pub mod ids;
pub mod prelude;
pub mod pricing;
pub mod receipt;
pub mod trophies;
