//! Trophy tracker errors.

use thiserror::Error;

use crate::gateway::GatewayError;

#[derive(Debug, Error)]
pub enum TrophiesError {
    #[error("authentication expired")]
    AuthenticationExpired,

    #[error("trophy request failed")]
    Network(#[source] GatewayError),
}

impl From<GatewayError> for TrophiesError {
    fn from(error: GatewayError) -> Self {
        match error {
            GatewayError::AuthenticationExpired => Self::AuthenticationExpired,
            other => Self::Network(other),
        }
    }
}
