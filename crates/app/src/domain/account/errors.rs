//! Account service errors.

use thiserror::Error;

use crate::gateway::GatewayError;

#[derive(Debug, Error)]
pub enum AccountError {
    /// The backend refused the username or password.
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),

    /// The backend refused the registration, e.g. a taken username.
    #[error("registration rejected: {0}")]
    RegistrationRejected(String),

    #[error("authentication expired")]
    AuthenticationExpired,

    #[error("account request failed")]
    Network(#[source] GatewayError),
}

impl From<GatewayError> for AccountError {
    fn from(error: GatewayError) -> Self {
        match error {
            GatewayError::AuthenticationExpired => Self::AuthenticationExpired,
            other => Self::Network(other),
        }
    }
}
