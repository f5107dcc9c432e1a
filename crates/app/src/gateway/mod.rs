//! Remote Commerce Gateway
//!
//! Typed request/response operations against the points-commerce backend.
//! Each concern is a separate trait so services depend only on what they call
//! and tests can mock exactly that surface.

use async_trait::async_trait;
use mockall::automock;
use stepshop::{
    cart::{CartLine, CartState},
    ids::{ItemId, LineId},
    trophies::Trophy,
};

pub mod errors;
pub mod http;
pub mod models;

pub use errors::{GatewayError, classify_status};
pub use http::{HttpGateway, HttpGatewayConfig};

use models::{
    Credentials, LoginGrant, PurchaseReceipt, PurchaseRecord, Registration, ShopItem, UserProfile,
};

#[automock]
#[async_trait]
pub trait AccountGateway: Send + Sync {
    /// Exchange credentials for a bearer token and the user's profile.
    async fn login(&self, credentials: Credentials) -> Result<LoginGrant, GatewayError>;

    /// Create a new account.
    async fn register(&self, registration: Registration) -> Result<UserProfile, GatewayError>;

    /// Fetch the signed in user, including the current point balance.
    async fn current_user(&self) -> Result<UserProfile, GatewayError>;
}

#[automock]
#[async_trait]
pub trait ShopGateway: Send + Sync {
    /// List every purchasable item.
    async fn list_items(&self) -> Result<Vec<ShopItem>, GatewayError>;

    /// Fetch one item.
    async fn get_item(&self, item: ItemId) -> Result<ShopItem, GatewayError>;

    /// The signed in user's past purchases.
    async fn purchase_history(&self) -> Result<Vec<PurchaseRecord>, GatewayError>;
}

#[automock]
#[async_trait]
pub trait CartGateway: Send + Sync {
    /// Fetch the server-held cart.
    async fn get_cart(&self) -> Result<CartState, GatewayError>;

    /// Add an item to the cart.
    async fn add_line(&self, item: ItemId, quantity: u32) -> Result<CartLine, GatewayError>;

    /// Set the quantity of an existing line.
    async fn update_line(&self, line: LineId, quantity: u32) -> Result<CartLine, GatewayError>;

    /// Delete a line.
    async fn remove_line(&self, line: LineId) -> Result<(), GatewayError>;

    /// Delete every line.
    async fn clear_cart(&self) -> Result<(), GatewayError>;

    /// Buy `quantity` units of one item, debiting the user's balance.
    async fn purchase(&self, item: ItemId, quantity: u32) -> Result<PurchaseReceipt, GatewayError>;
}

#[automock]
#[async_trait]
pub trait TrophyGateway: Send + Sync {
    /// The signed in user's trophies with their progress.
    async fn user_trophies(&self) -> Result<Vec<Trophy>, GatewayError>;
}
