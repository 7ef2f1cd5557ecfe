//! Credential types
//!
//! A [`Credential`] is the in-memory form of a token issued by the intranet's
//! OAuth endpoint. The application credential is owned by the
//! [`TokenManager`](super::TokenManager); user credentials are owned by the
//! caller, which receives a fresh copy back whenever a refresh occurs.

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A bearer token with its expiry metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credential {
    /// The access token presented in the Authorization header
    pub access_token: String,
    /// When the token stops being accepted (`issued_at + expires_in`)
    pub expires_at: DateTime<Utc>,
    /// When the application secret itself expires, as reported by the API
    pub secret_valid_until: Option<DateTime<Utc>>,
    /// Refresh token, present on user credentials only
    pub refresh_token: Option<String>,
}

impl Credential {
    /// True once the token is within `margin` of its expiry (or past it).
    /// A credential is usable only while this returns false.
    pub fn expires_within(&self, margin: Duration) -> bool {
        let margin = ChronoDuration::from_std(margin).unwrap_or_else(|_| ChronoDuration::zero());
        Utc::now() + margin >= self.expires_at
    }

    /// True if the token can still authenticate a request right now
    pub fn is_valid(&self, margin: Duration) -> bool {
        !self.expires_within(margin)
    }
}

/// Wire format of the token endpoint response
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    #[allow(dead_code)]
    pub token_type: Option<String>,
    pub expires_in: i64,
    /// Epoch seconds; the API reports when the application secret rotates
    #[serde(default)]
    pub secret_valid_until: Option<i64>,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

impl TokenResponse {
    /// Stamp the response into a credential, computing `expires_at` from now
    pub(crate) fn into_credential(self) -> Credential {
        Credential {
            access_token: self.access_token,
            expires_at: Utc::now() + ChronoDuration::seconds(self.expires_in),
            secret_valid_until: self
                .secret_valid_until
                .and_then(|secs| DateTime::from_timestamp(secs, 0)),
            refresh_token: self.refresh_token,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credential_expiring_in(seconds: i64) -> Credential {
        Credential {
            access_token: "tok".to_string(),
            expires_at: Utc::now() + ChronoDuration::seconds(seconds),
            secret_valid_until: None,
            refresh_token: None,
        }
    }

    #[test]
    fn test_fresh_credential_is_valid() {
        let cred = credential_expiring_in(7200);
        assert!(!cred.expires_within(Duration::from_secs(5)));
        assert!(cred.is_valid(Duration::from_secs(5)));
    }

    #[test]
    fn test_credential_inside_margin_expires() {
        let cred = credential_expiring_in(3);
        assert!(cred.expires_within(Duration::from_secs(5)));
    }

    #[test]
    fn test_expired_credential() {
        let cred = credential_expiring_in(-100);
        assert!(cred.expires_within(Duration::from_secs(5)));
        assert!(cred.expires_within(Duration::ZERO));
    }

    #[test]
    fn test_token_response_into_credential() {
        let response: TokenResponse = serde_json::from_value(serde_json::json!({
            "access_token": "abc123",
            "token_type": "bearer",
            "expires_in": 7200,
            "secret_valid_until": 1_765_000_000,
            "refresh_token": "refresh456"
        }))
        .unwrap();

        let before = Utc::now() + ChronoDuration::seconds(7199);
        let cred = response.into_credential();
        let after = Utc::now() + ChronoDuration::seconds(7201);

        assert_eq!(cred.access_token, "abc123");
        assert!(cred.expires_at > before && cred.expires_at < after);
        assert_eq!(
            cred.secret_valid_until,
            DateTime::from_timestamp(1_765_000_000, 0)
        );
        assert_eq!(cred.refresh_token, Some("refresh456".to_string()));
    }

    #[test]
    fn test_token_response_minimal() {
        let response: TokenResponse = serde_json::from_value(serde_json::json!({
            "access_token": "abc",
            "expires_in": 3600
        }))
        .unwrap();

        let cred = response.into_credential();
        assert!(cred.secret_valid_until.is_none());
        assert!(cred.refresh_token.is_none());
    }
}
