//! HTTP execution
//!
//! One authenticated GET at a time: resolve a token, wait for the rate
//! limiter, classify the response. HTTP 429 is retried through a bounded
//! loop with no extra backoff, since the limiter already spaces calls.
//! Everything else non-2xx is surfaced immediately.

use super::rate_limit::RateLimiter;
use crate::auth::{Credential, TokenManager};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::pagination::{parse_link_header, Page};
use crate::query;
use reqwest::{header, Client, Response, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Rate-limited, token-authenticated GET executor
pub struct HttpClient {
    client: Client,
    config: Arc<ClientConfig>,
    tokens: TokenManager,
    limiter: RateLimiter,
}

impl HttpClient {
    /// Create a client from a config
    pub fn new(config: Arc<ClientConfig>) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(Error::Http)?;

        let tokens = TokenManager::with_client(Arc::clone(&config), client.clone());
        let limiter = RateLimiter::new(&config.rate_limit);

        Ok(Self {
            client,
            config,
            tokens,
            limiter,
        })
    }

    /// The credential manager backing this client
    pub fn tokens(&self) -> &TokenManager {
        &self.tokens
    }

    /// GET a URL and parse the JSON body
    pub async fn fetch_json(&self, url: &str, token: Option<&Credential>) -> Result<Value> {
        let response = self.execute(url, token).await?;
        response.json().await.map_err(Error::Http)
    }

    /// GET one page of a paginated resource: the `Link` header's `rel="next"`
    /// URL (if any) plus the body, which must be a JSON array
    pub async fn fetch_page(&self, url: &str, token: Option<&Credential>) -> Result<Page> {
        let response = self.execute(url, token).await?;

        // The Link header has to be read before the body consumes the response
        let next = response
            .headers()
            .get(header::LINK)
            .and_then(|value| value.to_str().ok())
            .and_then(|header| parse_link_header(header, "next"));

        let body: Value = response.json().await.map_err(Error::Http)?;
        match body {
            Value::Array(items) => Ok(Page { items, next }),
            other => Err(Error::unexpected_body(
                url,
                format!("expected a JSON array, got {}", value_kind(&other)),
            )),
        }
    }

    /// Walk a paginated resource to exhaustion, concatenating the pages.
    ///
    /// Pages are fetched strictly sequentially; each page's URL is only known
    /// once the previous one arrived. Dropping the returned future aborts the
    /// walk at the next page boundary.
    pub async fn fetch_all(
        &self,
        url: &str,
        page_size: u32,
        token: Option<&Credential>,
    ) -> Result<Vec<Value>> {
        let mut next = query::set_param(url, "per_page", &page_size.to_string())?;
        let mut items = Vec::new();
        let mut pages = 0u32;

        loop {
            if pages >= self.config.max_pages {
                return Err(Error::PageLimit {
                    max_pages: self.config.max_pages,
                    url: next,
                });
            }
            let page = self.fetch_page(&next, token).await?;
            pages += 1;
            items.extend(page.items);
            match page.next {
                Some(url) => next = url,
                None => break,
            }
        }

        debug!(pages, items = items.len(), "pagination complete");
        Ok(items)
    }

    /// Perform one authenticated GET, retrying on 429 within the attempt
    /// budget. The token is re-resolved on every attempt so a retry never
    /// runs with a credential that expired while waiting.
    async fn execute(&self, url: &str, token: Option<&Credential>) -> Result<Response> {
        let mut attempt = 0u32;

        loop {
            let access_token = match token {
                Some(credential) => {
                    self.tokens
                        .ensure_user_token(credential)
                        .await?
                        .access_token
                }
                None => self.tokens.app_token().await?,
            };

            if self.config.verbose {
                info!(%url, attempt, "GET");
            } else {
                debug!(%url, attempt, "GET");
            }

            let response = self
                .limiter
                .admit(
                    self.client
                        .get(url)
                        .bearer_auth(&access_token)
                        .send(),
                )
                .await
                .map_err(Error::Http)?;

            let status = response.status();
            if status == StatusCode::TOO_MANY_REQUESTS {
                if attempt < self.config.max_attempts {
                    warn!(%url, attempt, "throttled by server, retrying");
                    attempt += 1;
                    continue;
                }
                return Err(Error::RateLimitExhausted {
                    url: url.to_string(),
                    attempts: attempt + 1,
                });
            }

            if !status.is_success() {
                let status_text = status.canonical_reason().unwrap_or("").to_string();
                let body = response.text().await.unwrap_or_default();
                warn!(%url, status = status.as_u16(), %body, "request failed");
                return Err(Error::HttpStatus {
                    status: status.as_u16(),
                    status_text,
                    url: url.to_string(),
                });
            }

            return Ok(response);
        }
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
