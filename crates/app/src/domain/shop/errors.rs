//! Shop service errors.

use thiserror::Error;

use crate::gateway::GatewayError;

#[derive(Debug, Error)]
pub enum ShopError {
    #[error("item not found")]
    NotFound,

    #[error("authentication expired")]
    AuthenticationExpired,

    #[error("shop request failed")]
    Network(#[source] GatewayError),
}

impl From<GatewayError> for ShopError {
    fn from(error: GatewayError) -> Self {
        match error {
            GatewayError::AuthenticationExpired => Self::AuthenticationExpired,
            other if other.is_not_found() => Self::NotFound,
            other => Self::Network(other),
        }
    }
}
