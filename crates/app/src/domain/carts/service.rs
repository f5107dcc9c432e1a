//! Cart Reconciliation Engine
//!
//! The backend owns the cart. Every mutation is sent to the server and followed
//! by a full reload, so the local [`CartState`] is always a copy of the last
//! server response rather than an optimistic edit.
//!
//! Two orderings are enforced:
//!
//! - Loads carry a sequence number taken when the request is issued. A response
//!   older than the one already applied is discarded.
//! - Mutations to the same line run one after another, each finishing its
//!   reload before the next one is sent.

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use jiff::Timestamp;
use rustc_hash::FxHashMap;
use stepshop::{
    cart::CartState,
    checkout::PurchaseQuote,
    coupons::{AppliedCoupon, CouponCatalog, normalize_code},
    ids::{ItemId, LineId},
};
use tokio::sync::Mutex;
use tracing::{debug, error, info, instrument, warn};

use crate::{
    domain::carts::{
        errors::CartError,
        models::{CartSnapshot, PurchaseOutcome},
    },
    gateway::CartGateway,
    session::Session,
};

#[derive(Debug, Default)]
struct CartView {
    cart: CartState,
    coupon: Option<AppliedCoupon>,
    applied_load: u64,
}

impl CartView {
    fn snapshot(&self) -> CartSnapshot {
        CartSnapshot::new(self.cart.clone(), self.coupon.clone())
    }
}

pub struct CartEngine {
    gateway: Arc<dyn CartGateway>,
    session: Session,
    coupons: CouponCatalog,
    view: Mutex<CartView>,
    issued_loads: AtomicU64,
    line_locks: Mutex<FxHashMap<LineId, Arc<Mutex<()>>>>,
}

impl CartEngine {
    #[must_use]
    pub fn new(gateway: Arc<dyn CartGateway>, session: Session, coupons: CouponCatalog) -> Self {
        Self {
            gateway,
            session,
            coupons,
            view: Mutex::new(CartView::default()),
            issued_loads: AtomicU64::new(0),
            line_locks: Mutex::new(FxHashMap::default()),
        }
    }

    /// The coupons this engine accepts.
    #[must_use]
    pub fn coupons(&self) -> &CouponCatalog {
        &self.coupons
    }

    /// Current cart, coupon and totals.
    pub async fn snapshot(&self) -> CartSnapshot {
        self.view.lock().await.snapshot()
    }

    /// Current totals.
    pub async fn quote(&self) -> PurchaseQuote {
        self.snapshot().await.quote
    }

    /// Fetch the server cart and replace local state with it.
    ///
    /// A response is only applied if no later-issued load has been applied
    /// first; otherwise the current state is returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be fetched. Local state is untouched.
    #[instrument(skip(self), err)]
    pub async fn load_cart(&self) -> Result<CartSnapshot, CartError> {
        let load = self.issued_loads.fetch_add(1, Ordering::SeqCst) + 1;

        let cart = self.session.observe(self.gateway.get_cart().await)?;

        let mut view = self.view.lock().await;

        if load > view.applied_load {
            debug!(load, lines = cart.len(), "applying cart load");

            view.cart = cart;
            view.applied_load = load;
        } else {
            debug!(load, applied = view.applied_load, "discarding stale cart load");
        }

        Ok(view.snapshot())
    }

    /// Add `quantity` units of an item, then reload.
    ///
    /// A quantity of zero is ignored and returns `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the add or the reload fails.
    #[instrument(skip(self), fields(item = %item), err)]
    pub async fn add_item(
        &self,
        item: ItemId,
        quantity: u32,
    ) -> Result<Option<CartSnapshot>, CartError> {
        if quantity == 0 {
            debug!("ignoring add with zero quantity");

            return Ok(None);
        }

        self.session
            .observe(self.gateway.add_line(item, quantity).await)?;

        self.load_cart().await.map(Some)
    }

    /// Set a line's quantity, then reload.
    ///
    /// Quantities below one are ignored and return `None` without contacting
    /// the backend; removing a line is done with [`Self::remove_line`].
    ///
    /// # Errors
    ///
    /// Returns an error if the update or the reload fails.
    #[instrument(skip(self), fields(line = %line), err)]
    pub async fn change_quantity(
        &self,
        line: LineId,
        new_quantity: i64,
    ) -> Result<Option<CartSnapshot>, CartError> {
        let Some(quantity) = u32::try_from(new_quantity).ok().filter(|q| *q >= 1) else {
            debug!(new_quantity, "ignoring out of range quantity");

            return Ok(None);
        };

        let lock = self.line_lock(line).await;
        let _serialized = lock.lock().await;

        self.session
            .observe(self.gateway.update_line(line, quantity).await)?;

        self.load_cart().await.map(Some)
    }

    /// Delete a line, then reload.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete or the reload fails.
    #[instrument(skip(self), fields(line = %line), err)]
    pub async fn remove_line(&self, line: LineId) -> Result<CartSnapshot, CartError> {
        let lock = self.line_lock(line).await;
        let serialized = lock.lock().await;

        self.session.observe(self.gateway.remove_line(line).await)?;

        let snapshot = self.load_cart().await;

        drop(serialized);
        self.line_locks.lock().await.remove(&line);

        snapshot
    }

    /// Delete every line, drop the coupon, then reload.
    ///
    /// # Errors
    ///
    /// Returns an error if the clear or the reload fails. The coupon is only
    /// dropped once the server has cleared the cart.
    #[instrument(skip(self), err)]
    pub async fn clear_cart(&self) -> Result<CartSnapshot, CartError> {
        self.session.observe(self.gateway.clear_cart().await)?;

        self.view.lock().await.coupon = None;

        self.load_cart().await
    }

    /// Apply a coupon against the current subtotal, replacing any existing one.
    ///
    /// The discount is fixed at this point; later cart changes do not
    /// recompute it, though the payable total is always clamped at zero.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidCoupon`] for unknown codes, leaving the
    /// current coupon in place.
    #[instrument(skip(self), err)]
    pub async fn apply_coupon(&self, code: &str) -> Result<AppliedCoupon, CartError> {
        let definition = self
            .coupons
            .lookup(code)
            .ok_or_else(|| CartError::InvalidCoupon(normalize_code(code)))?;

        let mut view = self.view.lock().await;
        let applied = definition.apply(view.cart.subtotal_points())?;

        info!(
            code = %applied.code,
            discount_points = applied.discount_points,
            "coupon applied"
        );

        view.coupon = Some(applied.clone());

        Ok(applied)
    }

    /// Drop the applied coupon, returning it.
    pub async fn remove_coupon(&self) -> Option<AppliedCoupon> {
        self.view.lock().await.coupon.take()
    }

    /// Buy every line in cart order.
    ///
    /// The balance check is local and happens before any line is sent. Lines
    /// are then purchased one at a time; the first failure stops the run and
    /// nothing already bought is undone. After every line succeeds the server
    /// cart is cleared, the coupon dropped and the cart reloaded.
    ///
    /// # Errors
    ///
    /// - [`CartError::EmptyCart`] if there is nothing to buy.
    /// - [`CartError::AuthenticationExpired`] if nobody is signed in.
    /// - [`CartError::InsufficientPoints`] if the balance is short; nothing is sent.
    /// - [`CartError::PurchaseFailed`] with the count of lines that went through.
    #[instrument(skip(self), err)]
    pub async fn purchase(&self) -> Result<PurchaseOutcome, CartError> {
        let snapshot = self.snapshot().await;

        if snapshot.cart.is_empty() {
            return Err(CartError::EmptyCart);
        }

        let balance = self
            .session
            .point_balance()
            .ok_or(CartError::AuthenticationExpired)?;

        let quote = snapshot.quote;

        if let Some(shortfall) = quote.shortfall(balance) {
            warn!(
                balance,
                required = quote.final_payable_points,
                shortfall,
                "insufficient points"
            );

            return Err(CartError::InsufficientPoints {
                balance,
                required: quote.final_payable_points,
            });
        }

        let total = snapshot.cart.len();
        let mut receipts = Vec::with_capacity(total);

        for line in &snapshot.cart {
            let result = self
                .session
                .observe(self.gateway.purchase(line.item_id, line.quantity).await);

            match result {
                Ok(receipt) => {
                    debug!(
                        line = %line.line_id,
                        balance_after = receipt.balance_after,
                        "line purchased"
                    );

                    self.session.set_point_balance(receipt.balance_after);
                    receipts.push(receipt);
                }
                Err(source) => {
                    error!(
                        line = %line.line_id,
                        completed = receipts.len(),
                        total,
                        error = %source,
                        "purchase stopped"
                    );

                    return Err(CartError::PurchaseFailed {
                        completed: receipts.len(),
                        total,
                        source,
                    });
                }
            }
        }

        self.view.lock().await.coupon = None;

        let cart_cleared = match self.clear_after_purchase().await {
            Ok(()) => true,
            Err(error) => {
                warn!(%error, "lines purchased but cart was not cleared");

                false
            }
        };

        info!(lines = total, points = quote.final_payable_points, "purchase complete");

        Ok(PurchaseOutcome {
            quote,
            receipts,
            remaining_balance: self.session.point_balance(),
            cart_cleared,
            completed_at: Timestamp::now(),
        })
    }

    async fn clear_after_purchase(&self) -> Result<(), CartError> {
        self.session.observe(self.gateway.clear_cart().await)?;
        self.load_cart().await?;

        Ok(())
    }

    async fn line_lock(&self, line: LineId) -> Arc<Mutex<()>> {
        self.line_locks
            .lock()
            .await
            .entry(line)
            .or_default()
            .clone()
    }
}
