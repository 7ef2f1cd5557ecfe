//! Token manager
//!
//! Owns the application credential and performs every token-endpoint
//! exchange. The refresh path is single-flight: concurrent callers that
//! observe an expired credential queue on the write lock and only the first
//! performs the exchange; the rest reuse the freshly cached token.

use super::types::{Credential, TokenResponse};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use reqwest::Client;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};
use url::Url;

/// Obtains, caches and refreshes credentials
pub struct TokenManager {
    config: Arc<ClientConfig>,
    http_client: Client,
    cached: Arc<RwLock<Option<Credential>>>,
}

impl TokenManager {
    /// Create a manager sharing the given HTTP client
    pub fn with_client(config: Arc<ClientConfig>, http_client: Client) -> Self {
        Self {
            config,
            http_client,
            cached: Arc::new(RwLock::new(None)),
        }
    }

    /// Return a currently-valid application access token.
    ///
    /// While the cached credential is outside the expiry margin this does no
    /// I/O. Otherwise a client-credentials exchange runs and the cache is
    /// replaced atomically; a failed exchange caches nothing.
    pub async fn app_token(&self) -> Result<String> {
        {
            let cached = self.cached.read().await;
            if let Some(cred) = cached.as_ref() {
                if !cred.expires_within(self.config.token_margin) {
                    return Ok(cred.access_token.clone());
                }
            }
        }

        // Single-flight: first writer refreshes, the rest see the new token
        let mut cached = self.cached.write().await;
        if let Some(cred) = cached.as_ref() {
            if !cred.expires_within(self.config.token_margin) {
                return Ok(cred.access_token.clone());
            }
        }

        debug!("requesting new application token");
        let credential = self
            .request_token(&[
                ("grant_type", "client_credentials"),
                ("client_id", &self.config.client_id),
                ("client_secret", &self.config.client_secret),
            ])
            .await?;
        let token = credential.access_token.clone();
        *cached = Some(credential);
        Ok(token)
    }

    /// Return a usable copy of a user credential, refreshing it first when it
    /// is inside the expiry margin. Shared state is never touched; the caller
    /// is responsible for persisting the returned credential.
    pub async fn ensure_user_token(&self, credential: &Credential) -> Result<Credential> {
        if !credential.expires_within(self.config.token_margin) {
            return Ok(credential.clone());
        }
        self.refresh_user_token(credential).await
    }

    /// Refresh a user credential through the refresh-token grant
    pub async fn refresh_user_token(&self, credential: &Credential) -> Result<Credential> {
        let refresh_token = credential
            .refresh_token
            .as_deref()
            .ok_or_else(|| Error::auth("credential has no refresh token"))?;

        debug!("refreshing user token");
        self.request_token(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", &self.config.client_id),
            ("client_secret", &self.config.client_secret),
        ])
        .await
    }

    /// Exchange an authorization code for a user credential
    pub async fn exchange_code(&self, code: &str) -> Result<Credential> {
        let redirect_uri = self
            .config
            .redirect_uri
            .as_deref()
            .ok_or_else(|| Error::missing_field("redirect_uri"))?;

        debug!("exchanging authorization code for user token");
        self.request_token(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("client_id", &self.config.client_id),
            ("client_secret", &self.config.client_secret),
            ("redirect_uri", redirect_uri),
        ])
        .await
    }

    /// Build the authorize URL a user visits to grant access
    pub fn authorize_url(&self) -> Result<String> {
        let redirect_uri = self
            .config
            .redirect_uri
            .as_deref()
            .ok_or_else(|| Error::missing_field("redirect_uri"))?;

        let scope = self.config.scopes.join(" ");
        let url = Url::parse_with_params(
            &self.config.authorize_endpoint(),
            &[
                ("response_type", "code"),
                ("client_id", self.config.client_id.as_str()),
                ("redirect_uri", redirect_uri),
                ("scope", scope.as_str()),
            ],
        )?;
        Ok(url.into())
    }

    /// Expiry of the application secret, as reported by the last exchange
    pub async fn secret_valid_until(&self) -> Option<DateTime<Utc>> {
        self.cached
            .read()
            .await
            .as_ref()
            .and_then(|cred| cred.secret_valid_until)
    }

    /// Drop the cached application credential, forcing the next call to
    /// perform a fresh exchange
    pub async fn clear_cache(&self) {
        let mut cached = self.cached.write().await;
        *cached = None;
    }

    /// POST a grant to the token endpoint and parse the credential
    async fn request_token(&self, form: &[(&str, &str)]) -> Result<Credential> {
        let response = self
            .http_client
            .post(self.config.token_url())
            .form(form)
            .send()
            .await
            .map_err(Error::Http)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "token exchange rejected");
            return Err(Error::TokenExchange {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: TokenResponse = response.json().await.map_err(Error::Http)?;
        Ok(parsed.into_credential())
    }
}

impl std::fmt::Debug for TokenManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenManager")
            .field("client_id", &self.config.client_id)
            .finish_non_exhaustive()
    }
}
