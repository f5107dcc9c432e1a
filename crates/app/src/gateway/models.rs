//! Gateway Models

use std::fmt;

use serde::{Deserialize, Serialize};
use stepshop::ids::ItemId;
use zeroize::Zeroize;

use crate::session::AccessToken;

/// Signed in user as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: u64,
    pub username: String,
    pub gender: Option<String>,
    pub birth_year: Option<u16>,
    pub points: u64,
    pub created_at: Option<String>,
}

/// Login form.
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"**redacted**")
            .finish()
    }
}

impl Drop for Credentials {
    fn drop(&mut self) {
        self.password.zeroize();
    }
}

/// Registration form.
pub struct Registration {
    pub credentials: Credentials,
    pub gender: Option<String>,
    pub birth_year: Option<u16>,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("credentials", &self.credentials)
            .field("gender", &self.gender)
            .field("birth_year", &self.birth_year)
            .finish()
    }
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginGrant {
    pub token: AccessToken,
    pub user: UserProfile,
}

/// Shop catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShopItem {
    pub id: ItemId,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub point_price: u64,
    pub image_url: Option<String>,
    pub shop_name: Option<String>,
}

/// Backend acknowledgement of one purchased line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PurchaseReceipt {
    pub purchase_id: u64,
    pub item_id: ItemId,
    pub quantity: u32,
    pub total_points: u64,

    /// The user's balance after this purchase, as recorded by the backend.
    pub balance_after: u64,
}

/// A past purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PurchaseRecord {
    pub purchase_id: u64,
    pub item_id: ItemId,
    pub item_name: String,
    pub quantity: u32,
    pub total_points: u64,
    pub purchased_at: String,
}
