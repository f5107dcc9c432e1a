//! Checkout

use serde::Serialize;

use crate::{cart::CartState, coupons::AppliedCoupon, pricing::final_payable_points};

/// What a purchase of the current cart would cost.
///
/// A quote is a pure function of the cart and the applied coupon; build a new
/// one after every cart change rather than keeping an old one around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PurchaseQuote {
    /// Sum of line totals.
    pub subtotal_points: u64,

    /// Discount from the applied coupon snapshot, if any.
    pub discount_points: u64,

    /// `subtotal_points - discount_points`, floored at zero.
    pub final_payable_points: u64,
}

impl PurchaseQuote {
    /// Quote the cart with an optional coupon.
    pub fn new(cart: &CartState, coupon: Option<&AppliedCoupon>) -> Self {
        let subtotal_points = cart.subtotal_points();
        let discount_points = coupon.map_or(0, |coupon| coupon.discount_points);

        Self {
            subtotal_points,
            discount_points,
            final_payable_points: final_payable_points(subtotal_points, discount_points),
        }
    }

    /// Points missing from `balance` to cover this quote, if any.
    pub fn shortfall(&self, balance: u64) -> Option<u64> {
        (balance < self.final_payable_points).then(|| self.final_payable_points - balance)
    }

    /// Whether `balance` covers this quote.
    pub fn is_affordable(&self, balance: u64) -> bool {
        self.shortfall(balance).is_none()
    }
}
