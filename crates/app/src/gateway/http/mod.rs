//! HTTP gateway over `reqwest`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use stepshop::{
    cart::{CartLine, CartState},
    ids::{ItemId, LineId},
    trophies::Trophy,
};
use tracing::{debug, instrument};

use crate::{
    gateway::{
        AccountGateway, CartGateway, GatewayError, ShopGateway, TrophyGateway, classify_status,
        models::{
            Credentials, LoginGrant, PurchaseReceipt, PurchaseRecord, Registration, ShopItem,
            UserProfile,
        },
    },
    session::Session,
};

mod records;

use records::{
    AddLineRecord, CartItemRecord, CartSummaryRecord, ItemRecord, LoginRequestRecord,
    LoginResponseRecord, PurchaseHistoryRecord, PurchaseRequestRecord, PurchaseResponseRecord,
    RegisterRequestRecord, UpdateLineRecord, UserRecord, UserTrophyRecord,
};

/// Default backend address.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for connecting to the commerce backend.
#[derive(Debug, Clone)]
pub struct HttpGatewayConfig {
    /// Backend address, e.g. `"http://localhost:8000"`.
    pub base_url: String,

    /// Applied to every request.
    pub timeout: Duration,
}

impl Default for HttpGatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Auth {
    Anonymous,
    Bearer,
}

/// Backend client implementing every gateway trait.
///
/// The bearer token is read from the shared [`Session`] when each request is
/// sent, so a login or logout takes effect for the next call.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    config: HttpGatewayConfig,
    http: Client,
    session: Session,
}

impl HttpGateway {
    /// Create a new gateway from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: HttpGatewayConfig, session: Session) -> Result<Self, GatewayError> {
        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            config,
            http,
            session,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url.trim_end_matches('/'))
    }

    fn request(
        &self,
        method: Method,
        path: &str,
        auth: Auth,
    ) -> Result<RequestBuilder, GatewayError> {
        let request = self.http.request(method, self.url(path));

        match auth {
            Auth::Anonymous => Ok(request),
            Auth::Bearer => {
                let token = self
                    .session
                    .bearer()
                    .ok_or(GatewayError::AuthenticationExpired)?;

                Ok(request.bearer_auth(token.as_str()))
            }
        }
    }

    async fn execute(
        &self,
        request: RequestBuilder,
        auth: Auth,
    ) -> Result<Response, GatewayError> {
        let response = request.send().await?;
        let status = response.status();

        debug!(status = status.as_u16(), "gateway response");

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();

            return Err(classify_status(status, &text, auth == Auth::Bearer));
        }

        Ok(response)
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        auth: Auth,
    ) -> Result<T, GatewayError> {
        let response = self.execute(request, auth).await?;

        Ok(response.json().await?)
    }

    async fn send_empty(&self, request: RequestBuilder, auth: Auth) -> Result<(), GatewayError> {
        self.execute(request, auth).await.map(drop)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, GatewayError> {
        let request = self.request(Method::GET, path, Auth::Bearer)?;

        self.fetch(request, Auth::Bearer).await
    }
}

#[async_trait]
impl AccountGateway for HttpGateway {
    #[instrument(skip_all, fields(username = %credentials.username), err)]
    async fn login(&self, credentials: Credentials) -> Result<LoginGrant, GatewayError> {
        let request = self
            .request(Method::POST, "/auth/login", Auth::Anonymous)?
            .json(&LoginRequestRecord {
                username: &credentials.username,
                password: &credentials.password,
            });

        let record: LoginResponseRecord = self.fetch(request, Auth::Anonymous).await?;
        let (token, user) = record.into_parts();

        Ok(LoginGrant { token, user })
    }

    #[instrument(skip_all, fields(username = %registration.credentials.username), err)]
    async fn register(&self, registration: Registration) -> Result<UserProfile, GatewayError> {
        let request = self
            .request(Method::POST, "/auth/register", Auth::Anonymous)?
            .json(&RegisterRequestRecord {
                username: &registration.credentials.username,
                password: &registration.credentials.password,
                gender: registration.gender.as_deref(),
                birth_year: registration.birth_year,
            });

        let record: UserRecord = self.fetch(request, Auth::Anonymous).await?;

        Ok(record.into())
    }

    #[instrument(skip(self), err)]
    async fn current_user(&self) -> Result<UserProfile, GatewayError> {
        let record: UserRecord = self.get("/users/me").await?;

        Ok(record.into())
    }
}

#[async_trait]
impl ShopGateway for HttpGateway {
    #[instrument(skip(self), err)]
    async fn list_items(&self) -> Result<Vec<ShopItem>, GatewayError> {
        let records: Vec<ItemRecord> = self.get("/shops/items").await?;

        Ok(records.into_iter().map(ShopItem::from).collect())
    }

    #[instrument(skip(self), fields(item = %item), err)]
    async fn get_item(&self, item: ItemId) -> Result<ShopItem, GatewayError> {
        let record: ItemRecord = self.get(&format!("/shops/items/{item}")).await?;

        Ok(record.into())
    }

    #[instrument(skip(self), err)]
    async fn purchase_history(&self) -> Result<Vec<PurchaseRecord>, GatewayError> {
        let records: Vec<PurchaseHistoryRecord> = self.get("/purchases/history").await?;

        Ok(records.into_iter().map(PurchaseRecord::from).collect())
    }
}

#[async_trait]
impl CartGateway for HttpGateway {
    #[instrument(skip(self), err)]
    async fn get_cart(&self) -> Result<CartState, GatewayError> {
        let record: CartSummaryRecord = self.get("/cart/").await?;

        Ok(record.into())
    }

    #[instrument(skip(self), fields(item = %item), err)]
    async fn add_line(&self, item: ItemId, quantity: u32) -> Result<CartLine, GatewayError> {
        let request = self
            .request(Method::POST, "/cart/", Auth::Bearer)?
            .json(&AddLineRecord {
                item_id: item,
                quantity,
            });

        let record: CartItemRecord = self.fetch(request, Auth::Bearer).await?;

        Ok(record.into())
    }

    #[instrument(skip(self), fields(line = %line), err)]
    async fn update_line(&self, line: LineId, quantity: u32) -> Result<CartLine, GatewayError> {
        let request = self
            .request(Method::PUT, &format!("/cart/{line}"), Auth::Bearer)?
            .json(&UpdateLineRecord { quantity });

        let record: CartItemRecord = self.fetch(request, Auth::Bearer).await?;

        Ok(record.into())
    }

    #[instrument(skip(self), fields(line = %line), err)]
    async fn remove_line(&self, line: LineId) -> Result<(), GatewayError> {
        let request = self.request(Method::DELETE, &format!("/cart/{line}"), Auth::Bearer)?;

        self.send_empty(request, Auth::Bearer).await
    }

    #[instrument(skip(self), err)]
    async fn clear_cart(&self) -> Result<(), GatewayError> {
        let request = self.request(Method::DELETE, "/cart/", Auth::Bearer)?;

        self.send_empty(request, Auth::Bearer).await
    }

    #[instrument(skip(self), fields(item = %item), err)]
    async fn purchase(&self, item: ItemId, quantity: u32) -> Result<PurchaseReceipt, GatewayError> {
        let request = self
            .request(Method::POST, "/purchases", Auth::Bearer)?
            .json(&PurchaseRequestRecord {
                item_id: item,
                quantity,
            });

        let record: PurchaseResponseRecord = self.fetch(request, Auth::Bearer).await?;

        Ok(record.into())
    }
}

#[async_trait]
impl TrophyGateway for HttpGateway {
    #[instrument(skip(self), err)]
    async fn user_trophies(&self) -> Result<Vec<Trophy>, GatewayError> {
        let records: Vec<UserTrophyRecord> = self.get("/trophies/user").await?;

        Ok(records.into_iter().map(Trophy::from).collect())
    }
}
