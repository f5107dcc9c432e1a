//! Wire records

use serde::{Deserialize, Serialize};
use stepshop::{
    cart::{CartLine, CartState},
    ids::{ItemId, LineId, TrophyId},
    trophies::Trophy,
};
use tracing::debug;

use crate::{
    gateway::models::{PurchaseReceipt, PurchaseRecord, ShopItem, UserProfile},
    session::AccessToken,
};

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequestRecord<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct RegisterRequestRecord<'a> {
    pub username: &'a str,
    pub password: &'a str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<&'a str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_year: Option<u16>,
}

#[derive(Debug, Serialize)]
pub(crate) struct AddLineRecord {
    pub item_id: ItemId,
    pub quantity: u32,
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateLineRecord {
    pub quantity: u32,
}

#[derive(Debug, Serialize)]
pub(crate) struct PurchaseRequestRecord {
    pub item_id: ItemId,
    pub quantity: u32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponseRecord {
    pub access_token: String,
    pub user: UserRecord,
}

impl LoginResponseRecord {
    pub(crate) fn into_parts(self) -> (AccessToken, UserProfile) {
        (AccessToken::new(self.access_token), self.user.into())
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserRecord {
    pub id: u64,
    pub username: String,
    pub gender: Option<String>,
    pub birth_year: Option<u16>,

    #[serde(alias = "points", default)]
    pub point: u64,

    pub created_at: Option<String>,
}

impl From<UserRecord> for UserProfile {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            username: record.username,
            gender: record.gender,
            birth_year: record.birth_year,
            points: record.point,
            created_at: record.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ItemRecord {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub point_price: u64,
    pub image_url: Option<String>,
    pub shop_name: Option<String>,
}

impl From<ItemRecord> for ShopItem {
    fn from(record: ItemRecord) -> Self {
        Self {
            id: ItemId::new(record.id),
            name: record.name,
            description: record.description,
            category: record.category,
            point_price: record.point_price,
            image_url: record.image_url,
            shop_name: record.shop_name,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CartItemRecord {
    pub id: u64,
    pub item_id: u64,
    pub quantity: u32,
    pub item: ItemRecord,
}

impl From<CartItemRecord> for CartLine {
    fn from(record: CartItemRecord) -> Self {
        Self {
            line_id: LineId::new(record.id),
            item_id: ItemId::new(record.item_id),
            name: record.item.name,
            category: record.item.category,
            unit_point_price: record.item.point_price,
            quantity: record.quantity,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CartSummaryRecord {
    #[serde(default)]
    pub total_points: u64,

    #[serde(default)]
    pub items: Vec<CartItemRecord>,
}

impl From<CartSummaryRecord> for CartState {
    fn from(record: CartSummaryRecord) -> Self {
        let reported_total = record.total_points;
        let cart = CartState::new(
            record
                .items
                .into_iter()
                .map(CartLine::from)
                .collect::<Vec<_>>(),
        );

        // Totals are recomputed from lines; the server's figure is informational.
        if cart.subtotal_points() != reported_total {
            debug!(
                reported_total,
                computed_total = cart.subtotal_points(),
                "cart total differs from line sum"
            );
        }

        cart
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct PurchaseResponseRecord {
    pub id: u64,
    pub item_id: u64,
    pub quantity: u32,
    pub total_points: u64,
    pub user_point_after: u64,
}

impl From<PurchaseResponseRecord> for PurchaseReceipt {
    fn from(record: PurchaseResponseRecord) -> Self {
        Self {
            purchase_id: record.id,
            item_id: ItemId::new(record.item_id),
            quantity: record.quantity,
            total_points: record.total_points,
            balance_after: record.user_point_after,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct PurchaseHistoryRecord {
    pub id: u64,
    pub item_id: u64,
    pub item_name: String,
    pub quantity: u32,
    pub total_points: u64,
    pub created_at: String,
}

impl From<PurchaseHistoryRecord> for PurchaseRecord {
    fn from(record: PurchaseHistoryRecord) -> Self {
        Self {
            purchase_id: record.id,
            item_id: ItemId::new(record.item_id),
            item_name: record.item_name,
            quantity: record.quantity,
            total_points: record.total_points,
            purchased_at: record.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserTrophyRecord {
    pub id: u64,
    pub title: String,
    pub description: Option<String>,

    #[serde(default)]
    pub completed: bool,

    #[serde(default)]
    pub progress: u64,

    pub target: u64,
    pub icon_url: Option<String>,
    pub completed_at: Option<String>,
}

impl From<UserTrophyRecord> for Trophy {
    fn from(record: UserTrophyRecord) -> Self {
        Self {
            id: TrophyId::new(record.id),
            title: record.title,
            description: record.description,
            target: record.target,
            progress: record.progress,
            completed: record.completed,
            icon_url: record.icon_url,
            completed_at: record.completed_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    const CART_JSON: &str = r#"{
        "total_items": 3,
        "total_points": 550,
        "items": [
            {
                "id": 1, "user_id": 9, "item_id": 501, "quantity": 2,
                "created_at": "2025-05-01T10:00:00",
                "item": {
                    "id": 501, "name": "Item A", "category": "drinks",
                    "point_price": 200, "created_at": "2025-04-01T00:00:00"
                }
            },
            {
                "id": 2, "user_id": 9, "item_id": 502, "quantity": 1,
                "created_at": "2025-05-01T10:01:00",
                "item": {
                    "id": 502, "name": "Item B", "point_price": 150,
                    "shop_name": "Corner Store", "created_at": "2025-04-01T00:00:00"
                }
            }
        ]
    }"#;

    #[test]
    fn cart_summary_maps_to_cart_state() -> TestResult {
        let record: CartSummaryRecord = serde_json::from_str(CART_JSON)?;
        let cart = CartState::from(record);

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.subtotal_points(), 550);
        assert_eq!(cart.total_item_count(), 3);

        let first = cart.line(LineId::new(1)).ok_or("line 1 missing")?;
        assert_eq!(first.item_id, ItemId::new(501));
        assert_eq!(first.name, "Item A");
        assert_eq!(first.category.as_deref(), Some("drinks"));
        assert_eq!(first.unit_point_price, 200);

        Ok(())
    }

    #[test]
    fn empty_cart_summary() -> TestResult {
        let record: CartSummaryRecord =
            serde_json::from_str(r#"{"total_items":0,"total_points":0,"items":[]}"#)?;

        assert!(CartState::from(record).is_empty());

        Ok(())
    }

    #[test]
    fn user_balance_accepts_either_field_name() -> TestResult {
        let singular: UserRecord =
            serde_json::from_str(r#"{"id":1,"username":"walker","point":1200}"#)?;
        let plural: UserRecord =
            serde_json::from_str(r#"{"id":1,"username":"walker","points":1200}"#)?;

        assert_eq!(UserProfile::from(singular).points, 1200);
        assert_eq!(UserProfile::from(plural).points, 1200);

        Ok(())
    }

    #[test]
    fn purchase_response_carries_balance_after() -> TestResult {
        let record: PurchaseResponseRecord = serde_json::from_str(
            r#"{
                "id": 77, "user_id": 9, "item_id": 501, "quantity": 2,
                "total_points": 400, "created_at": "2025-05-01T10:05:00",
                "user_point_after": 100,
                "item": {"id": 501, "name": "Item A", "point_price": 200}
            }"#,
        )?;

        let receipt = PurchaseReceipt::from(record);

        assert_eq!(receipt.purchase_id, 77);
        assert_eq!(receipt.total_points, 400);
        assert_eq!(receipt.balance_after, 100);

        Ok(())
    }

    #[test]
    fn user_trophy_maps_progress() -> TestResult {
        let record: UserTrophyRecord = serde_json::from_str(
            r#"{"id": 3, "title": "First 10k", "completed": false, "progress": 2500, "target": 10000}"#,
        )?;

        let trophy = Trophy::from(record);

        assert_eq!(trophy.id, TrophyId::new(3));
        assert!(!trophy.is_completed());
        assert!((trophy.completion_ratio() - 0.25).abs() < f64::EPSILON);

        Ok(())
    }

    #[test]
    fn request_records_serialize_ids_as_numbers() -> TestResult {
        let body = serde_json::to_value(AddLineRecord {
            item_id: ItemId::new(501),
            quantity: 2,
        })?;

        assert_eq!(body, serde_json::json!({ "item_id": 501, "quantity": 2 }));

        Ok(())
    }
}
