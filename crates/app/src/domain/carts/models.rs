//! Cart Models

use jiff::Timestamp;
use serde::Serialize;
use stepshop::{cart::CartState, checkout::PurchaseQuote, coupons::AppliedCoupon};

use crate::gateway::models::PurchaseReceipt;

/// Point-in-time view of the engine's cart, coupon and totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartSnapshot {
    pub cart: CartState,
    pub coupon: Option<AppliedCoupon>,
    pub quote: PurchaseQuote,
}

impl CartSnapshot {
    pub(crate) fn new(cart: CartState, coupon: Option<AppliedCoupon>) -> Self {
        let quote = PurchaseQuote::new(&cart, coupon.as_ref());

        Self {
            cart,
            coupon,
            quote,
        }
    }

    /// Sum of quantities across lines.
    #[must_use]
    pub fn total_item_count(&self) -> u64 {
        self.cart.total_item_count()
    }
}

/// Result of a fully successful purchase.
#[derive(Debug, Clone, Serialize)]
pub struct PurchaseOutcome {
    /// Totals the purchase was checked against.
    pub quote: PurchaseQuote,

    /// One receipt per cart line, in cart order.
    pub receipts: Vec<PurchaseReceipt>,

    /// Balance after the last line, as reported by the backend.
    pub remaining_balance: Option<u64>,

    /// False if the lines were bought but the follow-up clear or reload failed.
    pub cart_cleared: bool,

    pub completed_at: Timestamp,
}

impl PurchaseOutcome {
    #[must_use]
    pub fn lines_purchased(&self) -> usize {
        self.receipts.len()
    }

    /// Points the backend reports having charged across all lines.
    #[must_use]
    pub fn points_charged(&self) -> u64 {
        self.receipts
            .iter()
            .fold(0, |acc, receipt| acc.saturating_add(receipt.total_points))
    }
}
