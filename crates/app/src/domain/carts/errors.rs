//! Cart engine errors.

use stepshop::coupons::CouponError;
use thiserror::Error;

use crate::gateway::GatewayError;

#[derive(Debug, Error)]
pub enum CartError {
    /// Nothing to purchase.
    #[error("cart is empty")]
    EmptyCart,

    /// The coupon code is not in the catalog.
    #[error("coupon code {0} is not valid")]
    InvalidCoupon(String),

    /// The coupon could not be evaluated against the subtotal.
    #[error("coupon could not be applied")]
    Coupon(#[from] CouponError),

    /// The balance does not cover the final payable total.
    #[error("insufficient points: {required} required, {balance} available")]
    InsufficientPoints { balance: u64, required: u64 },

    /// A line failed mid-purchase. Lines before it were bought and stay bought.
    #[error("purchase stopped after {completed} of {total} lines")]
    PurchaseFailed {
        completed: usize,
        total: usize,
        #[source]
        source: GatewayError,
    },

    #[error("authentication expired")]
    AuthenticationExpired,

    #[error("cart request failed")]
    Network(#[source] GatewayError),
}

impl CartError {
    /// Whether some, but not all, lines of a purchase went through.
    #[must_use]
    pub fn is_partial_purchase(&self) -> bool {
        matches!(self, Self::PurchaseFailed { completed, .. } if *completed > 0)
    }
}

impl From<GatewayError> for CartError {
    fn from(error: GatewayError) -> Self {
        match error {
            GatewayError::AuthenticationExpired => Self::AuthenticationExpired,
            other => Self::Network(other),
        }
    }
}
