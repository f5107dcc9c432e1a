//! Gateway errors.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Failure modes of a backend request.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
    /// The bearer token was missing or rejected.
    #[error("authentication expired")]
    AuthenticationExpired,

    /// The request did not complete within the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// Connection or transport failure.
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered with a non-success status.
    #[error("request rejected with status {status}: {detail}")]
    Rejected { status: u16, detail: String },

    /// The response body did not match the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl GatewayError {
    /// Whether the backend reported the resource as missing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Rejected { status: 404, .. })
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else if error.is_decode() {
            Self::Decode(error.to_string())
        } else {
            Self::Network(error.to_string())
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

/// Map a non-success response onto a [`GatewayError`].
///
/// A 401 on a request that carried a bearer token means the token is no
/// longer accepted. Anonymous requests (login, register) keep the rejection
/// so callers can report bad credentials.
#[must_use]
pub fn classify_status(status: StatusCode, body: &str, authenticated: bool) -> GatewayError {
    if status == StatusCode::UNAUTHORIZED && authenticated {
        return GatewayError::AuthenticationExpired;
    }

    GatewayError::Rejected {
        status: status.as_u16(),
        detail: error_detail(status, body),
    }
}

fn error_detail(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            detail: serde_json::Value::String(detail),
        }) => detail,
        Ok(ErrorBody { detail }) => detail.to_string(),
        Err(_) if !body.trim().is_empty() => body.trim().to_string(),
        Err(_) => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_with_token_expires_session() {
        let error = classify_status(StatusCode::UNAUTHORIZED, "", true);

        assert_eq!(error, GatewayError::AuthenticationExpired);
    }

    #[test]
    fn unauthorized_without_token_is_rejection() {
        let error = classify_status(
            StatusCode::UNAUTHORIZED,
            r#"{"detail":"Incorrect username or password"}"#,
            false,
        );

        assert_eq!(
            error,
            GatewayError::Rejected {
                status: 401,
                detail: "Incorrect username or password".to_string(),
            }
        );
    }

    #[test]
    fn structured_detail_is_kept_as_json() {
        let error = classify_status(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"detail":[{"loc":["body","quantity"],"msg":"invalid"}]}"#,
            true,
        );

        let GatewayError::Rejected { status, detail } = error else {
            panic!("expected rejection, got {error:?}");
        };

        assert_eq!(status, 422);
        assert!(detail.contains("quantity"));
    }

    #[test]
    fn plain_text_body_is_used_verbatim() {
        let error = classify_status(StatusCode::BAD_GATEWAY, " upstream down \n", true);

        assert_eq!(
            error,
            GatewayError::Rejected {
                status: 502,
                detail: "upstream down".to_string(),
            }
        );
    }

    #[test]
    fn empty_body_falls_back_to_reason_phrase() {
        let error = classify_status(StatusCode::NOT_FOUND, "", true);

        assert!(error.is_not_found());
        assert_eq!(
            error,
            GatewayError::Rejected {
                status: 404,
                detail: "Not Found".to_string(),
            }
        );
    }

    #[test]
    fn insufficient_points_from_server_is_rejection() {
        let error = classify_status(
            StatusCode::BAD_REQUEST,
            r#"{"detail":"Not enough points"}"#,
            true,
        );

        assert!(matches!(error, GatewayError::Rejected { status: 400, .. }));
    }
}
