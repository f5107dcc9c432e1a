//! App Context

use std::sync::Arc;

use stepshop::{coupons::CouponCatalog, fixtures::FixtureError};
use thiserror::Error;

use crate::{
    config::ClientConfig,
    domain::{
        account::AccountService, carts::CartEngine, shop::ShopService, trophies::TrophyTracker,
    },
    gateway::{GatewayError, HttpGateway, HttpGatewayConfig},
    session::Session,
};

#[derive(Debug, Error)]
pub enum ContextError {
    #[error("failed to build backend client")]
    Gateway(#[from] GatewayError),

    #[error("failed to load coupons")]
    Coupons(#[from] FixtureError),
}

/// Every service, wired to one gateway and one shared session.
pub struct AppContext {
    pub session: Session,
    pub account: AccountService,
    pub shop: ShopService,
    pub carts: CartEngine,
    pub trophies: TrophyTracker,
}

impl AppContext {
    /// Build the context from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or the coupon catalog cannot be built.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ContextError> {
        Self::new(config.gateway_config(), config.coupon_catalog()?)
    }

    /// Build the context against a backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(gateway: HttpGatewayConfig, coupons: CouponCatalog) -> Result<Self, ContextError> {
        let session = Session::new();
        let gateway = Arc::new(HttpGateway::new(gateway, session.clone())?);

        Ok(Self {
            account: AccountService::new(gateway.clone(), session.clone()),
            shop: ShopService::new(gateway.clone(), session.clone()),
            carts: CartEngine::new(gateway.clone(), session.clone(), coupons),
            trophies: TrophyTracker::new(gateway, session.clone()),
            session,
        })
    }
}
