//! Client configuration
//!
//! All knobs the client consumes are supplied here at construction time.
//! The crate has no file or CLI surface: build a [`ClientConfig`], hand it
//! to [`crate::IntraClient`], done.

use crate::error::{Error, Result};
use crate::http::RateLimiterConfig;
use std::time::Duration;

/// Default intranet base URL
pub const DEFAULT_BASE_URL: &str = "https://api.intra.42.fr";

/// Configuration for the intra42 client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Application UID (client id)
    pub client_id: String,
    /// Application secret
    pub client_secret: String,
    /// Redirect URI for the authorization-code flow
    pub redirect_uri: Option<String>,
    /// Base URL of the API (token and authorize endpoints live under it)
    pub base_url: String,
    /// OAuth scopes requested for user tokens
    pub scopes: Vec<String>,
    /// Promote per-request diagnostics from debug to info level
    pub verbose: bool,
    /// Refresh a cached token once it is this close to expiry
    pub token_margin: Duration,
    /// Total tries allowed for a request rejected with HTTP 429
    pub max_attempts: u32,
    /// Safety cap on pages followed by a single paginated fetch
    pub max_pages: u32,
    /// Default page size for paginated fetches
    pub page_size: u32,
    /// Rate limiter settings
    pub rate_limit: RateLimiterConfig,
    /// Request timeout, delegated to the HTTP transport
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
}

impl ClientConfig {
    /// Create a config with the given application credentials and defaults
    /// for everything else
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            scopes: vec!["public".to_string()],
            verbose: false,
            token_margin: Duration::from_secs(5),
            max_attempts: 5,
            max_pages: 10_000,
            page_size: 100,
            rate_limit: RateLimiterConfig::default(),
            timeout: Duration::from_secs(30),
            user_agent: format!("intra42/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Create a new config builder
    pub fn builder(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> ClientConfigBuilder {
        ClientConfigBuilder {
            config: Self::new(client_id, client_secret),
        }
    }

    /// Check that required fields are present
    pub fn validate(&self) -> Result<()> {
        if self.client_id.is_empty() {
            return Err(Error::missing_field("client_id"));
        }
        if self.client_secret.is_empty() {
            return Err(Error::missing_field("client_secret"));
        }
        Ok(())
    }

    /// Token endpoint URL
    pub fn token_url(&self) -> String {
        format!("{}/oauth/token", self.base_url.trim_end_matches('/'))
    }

    /// Authorize endpoint URL
    pub fn authorize_endpoint(&self) -> String {
        format!("{}/oauth/authorize", self.base_url.trim_end_matches('/'))
    }

    /// Build a full API URL from a path; absolute URLs pass through untouched
    pub fn api_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}

/// Builder for the client config
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the redirect URI for the authorization-code flow
    pub fn redirect_uri(mut self, uri: impl Into<String>) -> Self {
        self.config.redirect_uri = Some(uri.into());
        self
    }

    /// Override the API base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the OAuth scopes requested for user tokens
    pub fn scopes(mut self, scopes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.config.scopes = scopes.into_iter().map(Into::into).collect();
        self
    }

    /// Enable verbose per-request logging
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.config.verbose = verbose;
        self
    }

    /// Set the expiry margin applied to cached tokens
    pub fn token_margin(mut self, margin: Duration) -> Self {
        self.config.token_margin = margin;
        self
    }

    /// Set the total tries allowed for a 429-rejected request
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.config.max_attempts = attempts;
        self
    }

    /// Set the pagination safety cap
    pub fn max_pages(mut self, pages: u32) -> Self {
        self.config.max_pages = pages;
        self
    }

    /// Set the default page size
    pub fn page_size(mut self, size: u32) -> Self {
        self.config.page_size = size;
        self
    }

    /// Set the rate limiter configuration
    pub fn rate_limit(mut self, rate_limit: RateLimiterConfig) -> Self {
        self.config.rate_limit = rate_limit;
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> ClientConfig {
        self.config
    }
}
