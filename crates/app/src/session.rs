//! Session State
//!
//! Holds the authenticated identity and the authoritative point balance. A
//! [`Session`] is a cheap handle; clone it into every component that needs the
//! bearer token or the balance rather than reaching for ambient storage.

use std::{
    fmt,
    sync::{Arc, PoisonError, RwLock},
};

use jiff::Timestamp;
use tracing::{info, warn};
use zeroize::{Zeroize, Zeroizing};

use crate::gateway::{GatewayError, models::UserProfile};

/// Bearer token issued at login.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wrap a raw token string.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token, for the `Authorization` header.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(**redacted**)")
    }
}

impl Drop for AccessToken {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

#[derive(Debug)]
struct SessionState {
    token: AccessToken,
    user: UserProfile,
    established_at: Timestamp,
}

/// Shared handle to the current login, if any.
#[derive(Debug, Clone, Default)]
pub struct Session {
    inner: Arc<RwLock<Option<SessionState>>>,
}

impl Session {
    /// An unauthenticated session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Populate the session after a successful login.
    pub fn establish(&self, token: AccessToken, user: UserProfile) {
        info!(user_id = user.id, username = %user.username, "session established");

        *self.write() = Some(SessionState {
            token,
            user,
            established_at: Timestamp::now(),
        });
    }

    /// Drop the login, e.g. on logout.
    pub fn clear(&self) {
        if self.write().take().is_some() {
            info!("session cleared");
        }
    }

    /// Drop the login because the backend rejected the token.
    pub fn expire(&self) {
        if let Some(state) = self.write().take() {
            warn!(
                user_id = state.user.id,
                established_at = %state.established_at,
                "session expired"
            );
        }
    }

    /// Whether a login is present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.read().is_some()
    }

    /// A copy of the bearer token, wiped when dropped.
    #[must_use]
    pub fn bearer(&self) -> Option<Zeroizing<String>> {
        self.read()
            .as_ref()
            .map(|state| Zeroizing::new(state.token.expose().to_string()))
    }

    /// The signed in user.
    #[must_use]
    pub fn user(&self) -> Option<UserProfile> {
        self.read().as_ref().map(|state| state.user.clone())
    }

    /// Replace the user profile with a fresher copy from the backend.
    pub fn update_user(&self, user: UserProfile) {
        if let Some(state) = self.write().as_mut() {
            state.user = user;
        }
    }

    /// The authoritative point balance, as last reported by the backend.
    #[must_use]
    pub fn point_balance(&self) -> Option<u64> {
        self.read().as_ref().map(|state| state.user.points)
    }

    /// Record a balance reported by the backend (e.g. after a purchase).
    pub fn set_point_balance(&self, points: u64) {
        if let Some(state) = self.write().as_mut() {
            state.user.points = points;
        }
    }

    /// Pass a gateway result through, expiring the session on an auth rejection.
    ///
    /// # Errors
    ///
    /// Returns the gateway error unchanged.
    pub fn observe<T>(&self, result: Result<T, GatewayError>) -> Result<T, GatewayError> {
        if matches!(result, Err(GatewayError::AuthenticationExpired)) {
            self.expire();
        }

        result
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Option<SessionState>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Option<SessionState>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::helpers::user;

    #[test]
    fn establish_and_clear() {
        let session = Session::new();
        assert!(!session.is_authenticated());

        session.establish(AccessToken::new("tok"), user(1, 500));

        assert!(session.is_authenticated());
        assert_eq!(session.point_balance(), Some(500));
        assert_eq!(session.bearer().as_deref().map(String::as_str), Some("tok"));

        session.clear();

        assert!(!session.is_authenticated());
        assert!(session.bearer().is_none());
        assert!(session.point_balance().is_none());
    }

    #[test]
    fn clones_share_state() {
        let session = Session::new();
        let other = session.clone();

        session.establish(AccessToken::new("tok"), user(1, 10));
        other.set_point_balance(42);

        assert_eq!(session.point_balance(), Some(42));
    }

    #[test]
    fn observe_expires_on_auth_rejection() {
        let session = Session::new();
        session.establish(AccessToken::new("tok"), user(1, 10));

        let result: Result<(), _> = session.observe(Err(GatewayError::AuthenticationExpired));

        assert_eq!(result, Err(GatewayError::AuthenticationExpired));
        assert!(!session.is_authenticated());
    }

    #[test]
    fn observe_keeps_session_on_other_errors() {
        let session = Session::new();
        session.establish(AccessToken::new("tok"), user(1, 10));

        let result: Result<(), _> = session.observe(Err(GatewayError::Timeout));

        assert_eq!(result, Err(GatewayError::Timeout));
        assert!(session.is_authenticated());
    }

    #[test]
    fn token_debug_is_redacted() {
        let token = AccessToken::new("super-secret");

        assert_eq!(format!("{token:?}"), "AccessToken(**redacted**)");
    }

    #[test]
    fn balance_updates_without_session_are_ignored() {
        let session = Session::new();

        session.set_point_balance(100);

        assert!(session.point_balance().is_none());
    }
}
