//! Test Helpers

use std::{
    collections::VecDeque,
    sync::{Mutex, PoisonError},
};

use async_trait::async_trait;
use stepshop::{
    cart::{CartLine, CartState},
    ids::{ItemId, LineId},
};

use crate::{
    gateway::{
        CartGateway, GatewayError,
        models::{PurchaseReceipt, UserProfile},
    },
    session::{AccessToken, Session},
};

pub(crate) fn user(id: u64, points: u64) -> UserProfile {
    UserProfile {
        id,
        username: format!("walker{id}"),
        gender: None,
        birth_year: None,
        points,
        created_at: None,
    }
}

pub(crate) fn signed_in_session(points: u64) -> Session {
    let session = Session::new();

    session.establish(AccessToken::new("test-token"), user(9, points));

    session
}

pub(crate) fn cart_line(line: u64, item: u64, unit_point_price: u64, quantity: u32) -> CartLine {
    CartLine {
        line_id: LineId::new(line),
        item_id: ItemId::new(item),
        name: format!("Item {item}"),
        category: None,
        unit_point_price,
        quantity,
    }
}

/// Item 501 at 200P × 2 and item 502 at 150P × 1; subtotal 550P.
pub(crate) fn two_line_cart() -> CartState {
    CartState::new([cart_line(1, 501, 200, 2), cart_line(2, 502, 150, 1)])
}

pub(crate) fn receipt(
    purchase_id: u64,
    item: u64,
    quantity: u32,
    total_points: u64,
    balance_after: u64,
) -> PurchaseReceipt {
    PurchaseReceipt {
        purchase_id,
        item_id: ItemId::new(item),
        quantity,
        total_points,
        balance_after,
    }
}

/// Cart gateway that yields to the runtime, for exercising interleavings.
///
/// `get_cart` answers from a queue of `(yields, cart)` pairs in call order,
/// yielding the given number of times before returning. `update_line` yields
/// once. Every call is recorded.
pub(crate) struct FakeCartGateway {
    loads: Mutex<VecDeque<(usize, CartState)>>,
    calls: Mutex<Vec<String>>,
}

impl FakeCartGateway {
    pub(crate) fn new(loads: impl IntoIterator<Item = (usize, CartState)>) -> Self {
        Self {
            loads: Mutex::new(loads.into_iter().collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record(&self, call: String) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
    }
}

async fn yield_times(times: usize) {
    for _ in 0..times {
        tokio::task::yield_now().await;
    }
}

#[async_trait]
impl CartGateway for FakeCartGateway {
    async fn get_cart(&self) -> Result<CartState, GatewayError> {
        self.record("get".to_string());

        let next = self
            .loads
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();

        let (yields, cart) = next.ok_or_else(|| GatewayError::Network("no load queued".into()))?;

        yield_times(yields).await;

        Ok(cart)
    }

    async fn add_line(&self, item: ItemId, quantity: u32) -> Result<CartLine, GatewayError> {
        self.record(format!("add {item}={quantity}"));

        Ok(cart_line(0, item.get(), 0, quantity))
    }

    async fn update_line(&self, line: LineId, quantity: u32) -> Result<CartLine, GatewayError> {
        self.record(format!("update {line}={quantity}"));

        yield_times(1).await;

        Ok(cart_line(line.get(), 0, 0, quantity))
    }

    async fn remove_line(&self, line: LineId) -> Result<(), GatewayError> {
        self.record(format!("remove {line}"));

        Ok(())
    }

    async fn clear_cart(&self) -> Result<(), GatewayError> {
        self.record("clear".to_string());

        Ok(())
    }

    async fn purchase(&self, item: ItemId, quantity: u32) -> Result<PurchaseReceipt, GatewayError> {
        self.record(format!("purchase {item}={quantity}"));

        Err(GatewayError::Rejected {
            status: 501,
            detail: "not supported by fake".to_string(),
        })
    }
}
