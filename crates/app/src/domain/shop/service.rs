//! Shop service.

use std::sync::Arc;

use stepshop::ids::ItemId;
use tracing::instrument;

use crate::{
    domain::shop::errors::ShopError,
    gateway::{
        ShopGateway,
        models::{PurchaseRecord, ShopItem},
    },
    session::Session,
};

pub struct ShopService {
    gateway: Arc<dyn ShopGateway>,
    session: Session,
}

impl ShopService {
    #[must_use]
    pub fn new(gateway: Arc<dyn ShopGateway>, session: Session) -> Self {
        Self { gateway, session }
    }

    /// List purchasable items.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be fetched.
    #[instrument(skip(self), err)]
    pub async fn list_items(&self) -> Result<Vec<ShopItem>, ShopError> {
        Ok(self.session.observe(self.gateway.list_items().await)?)
    }

    /// Fetch one item.
    ///
    /// # Errors
    ///
    /// Returns [`ShopError::NotFound`] if the backend has no such item.
    #[instrument(skip(self), fields(item = %item), err)]
    pub async fn get_item(&self, item: ItemId) -> Result<ShopItem, ShopError> {
        Ok(self.session.observe(self.gateway.get_item(item).await)?)
    }

    /// Past purchases, newest first as returned by the backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the history cannot be fetched.
    #[instrument(skip(self), err)]
    pub async fn purchase_history(&self) -> Result<Vec<PurchaseRecord>, ShopError> {
        Ok(self.session.observe(self.gateway.purchase_history().await)?)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;
    use crate::{
        gateway::{GatewayError, MockShopGateway},
        test::helpers::signed_in_session,
    };

    fn item(id: u64, point_price: u64) -> ShopItem {
        ShopItem {
            id: ItemId::new(id),
            name: format!("Item {id}"),
            description: None,
            category: Some("snacks".to_string()),
            point_price,
            image_url: None,
            shop_name: None,
        }
    }

    #[tokio::test]
    async fn list_items_passes_catalog_through() -> TestResult {
        let mut gateway = MockShopGateway::new();

        gateway
            .expect_list_items()
            .once()
            .returning(|| Ok(vec![item(1, 100), item(2, 250)]));

        let service = ShopService::new(Arc::new(gateway), signed_in_session(0));

        let items = service.list_items().await?;

        assert_eq!(items.len(), 2);
        assert_eq!(items.last().map(|i| i.point_price), Some(250));

        Ok(())
    }

    #[tokio::test]
    async fn missing_item_is_not_found() {
        let mut gateway = MockShopGateway::new();

        gateway
            .expect_get_item()
            .withf(|id| *id == ItemId::new(404))
            .once()
            .returning(|_| {
                Err(GatewayError::Rejected {
                    status: 404,
                    detail: "Item not found".to_string(),
                })
            });

        let service = ShopService::new(Arc::new(gateway), signed_in_session(0));

        assert!(matches!(
            service.get_item(ItemId::new(404)).await,
            Err(ShopError::NotFound)
        ));
    }

    #[tokio::test]
    async fn history_with_rejected_token_expires_session() {
        let mut gateway = MockShopGateway::new();

        gateway
            .expect_purchase_history()
            .once()
            .returning(|| Err(GatewayError::AuthenticationExpired));

        let session = signed_in_session(0);
        let service = ShopService::new(Arc::new(gateway), session.clone());

        assert!(matches!(
            service.purchase_history().await,
            Err(ShopError::AuthenticationExpired)
        ));
        assert!(!session.is_authenticated());
    }
}
