//! Account service.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::{
    domain::account::errors::AccountError,
    gateway::{
        AccountGateway, GatewayError,
        models::{Credentials, Registration, UserProfile},
    },
    session::Session,
};

/// Login, logout and profile refresh against the shared [`Session`].
pub struct AccountService {
    gateway: Arc<dyn AccountGateway>,
    session: Session,
}

impl AccountService {
    #[must_use]
    pub fn new(gateway: Arc<dyn AccountGateway>, session: Session) -> Self {
        Self { gateway, session }
    }

    /// Sign in and populate the session.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::InvalidCredentials`] if the backend refuses the
    /// login. Any existing session is left as it was.
    #[instrument(skip(self, credentials), fields(username = %credentials.username), err)]
    pub async fn login(&self, credentials: Credentials) -> Result<UserProfile, AccountError> {
        let grant = self
            .gateway
            .login(credentials)
            .await
            .map_err(|error| match error {
                GatewayError::Rejected { detail, .. } => AccountError::InvalidCredentials(detail),
                other => other.into(),
            })?;

        self.session.establish(grant.token, grant.user.clone());

        Ok(grant.user)
    }

    /// Create an account. Does not sign in.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::RegistrationRejected`] if the backend refuses it.
    #[instrument(skip(self, registration), fields(username = %registration.credentials.username), err)]
    pub async fn register(&self, registration: Registration) -> Result<UserProfile, AccountError> {
        let user = self
            .gateway
            .register(registration)
            .await
            .map_err(|error| match error {
                GatewayError::Rejected { detail, .. } => {
                    AccountError::RegistrationRejected(detail)
                }
                other => other.into(),
            })?;

        info!(user_id = user.id, "account registered");

        Ok(user)
    }

    /// Drop the session.
    pub fn logout(&self) {
        self.session.clear();
    }

    /// Fetch the current profile and balance, updating the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile cannot be fetched. A rejected token
    /// expires the session.
    #[instrument(skip(self), err)]
    pub async fn refresh_profile(&self) -> Result<UserProfile, AccountError> {
        let user = self.session.observe(self.gateway.current_user().await)?;

        self.session.update_user(user.clone());

        Ok(user)
    }

    /// The signed in user, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<UserProfile> {
        self.session.user()
    }
}
