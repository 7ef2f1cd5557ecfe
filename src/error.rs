//! Error types for the intra42 client
//!
//! All public APIs return `Result<T, Error>` where Error is defined here.
//! Errors are never swallowed: every failed token exchange, rejected request
//! or malformed response surfaces a variant the caller can act on.

use thiserror::Error;

/// The main error type for the intra42 client
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    // ============================================================================
    // Authentication Errors
    // ============================================================================
    #[error("Authentication failed: {message}")]
    Auth { message: String },

    #[error("Token exchange failed with status {status}: {body}")]
    TokenExchange { status: u16, body: String },

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} {status_text} for {url}")]
    HttpStatus {
        status: u16,
        status_text: String,
        url: String,
    },

    #[error("Rate limited after {attempts} attempts for {url}")]
    RateLimitExhausted { url: String, attempts: u32 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Response Errors
    // ============================================================================
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Unexpected response body for {url}: {message}")]
    UnexpectedBody { url: String, message: String },

    #[error("Pagination exceeded {max_pages} pages at {url}")]
    PageLimit { max_pages: u32, url: String },
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an auth error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, status_text: impl Into<String>, url: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            status_text: status_text.into(),
            url: url.into(),
        }
    }

    /// Create an unexpected body error
    pub fn unexpected_body(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::UnexpectedBody {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Check if this error is a rate-limit rejection
    pub fn is_rate_limit(&self) -> bool {
        matches!(self, Error::RateLimitExhausted { .. })
            || matches!(self, Error::HttpStatus { status: 429, .. })
    }
}

/// Result type alias for the intra42 client
pub type Result<T> = std::result::Result<T, Error>;
