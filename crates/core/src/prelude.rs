//! Stepshop prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{CartLine, CartState},
    checkout::PurchaseQuote,
    coupons::{AppliedCoupon, CouponCatalog, CouponDefinition, CouponError, CouponKind},
    fixtures::FixtureError,
    format::{format_number, format_percent, format_points},
    ids::{ItemId, LineId, TrophyId, TypedId},
    receipt::{CartReceipt, ReceiptError},
    trophies::{Trophy, TrophyBoard, progress_ratio},
};
