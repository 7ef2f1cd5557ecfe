//! # intra42
//!
//! Async client for the 42 intranet REST API.
//!
//! The client owns the full request lifecycle: it obtains and refreshes the
//! application's OAuth2 credential, paces outbound calls against the
//! intranet's rate limit, retries throttled requests, and walks Link-header
//! pagination to exhaustion. Thin typed records ([`User`], [`CursusUser`],
//! [`CoalitionUser`]) sit on top and load related resources on demand.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use intra42::{IntraClient, QueryOptions, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = IntraClient::from_credentials("uid", "secret")?;
//!
//!     // Single resource
//!     let user = client.get_user("ibertran").await?;
//!
//!     // Paginated resource, all pages concatenated
//!     let pisciners = client
//!         .get_campus_users(9, &QueryOptions::new().filter("pool_year", 2024))
//!         .await?;
//!
//!     println!("{} pisciners, {} active", pisciners.len(), user.is_active());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                       IntraClient                         │
//! │   fetch(path) → JSON        fetch_all(path) → [JSON]      │
//! │   get_user / get_campus_users / ... convenience methods   │
//! └───────────────────────────┬───────────────────────────────┘
//!                             │
//! ┌──────────────┬────────────┴───────┬──────────────────────┐
//! │     Auth     │        HTTP        │      Pagination      │
//! ├──────────────┼────────────────────┼──────────────────────┤
//! │ App token    │ Rate-limited GET   │ Link header parsing  │
//! │ User refresh │ 429 retry budget   │ Sequential page walk │
//! │ Single-flight│ FIFO admission     │ Page safety cap      │
//! └──────────────┴────────────────────┴──────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the client
pub mod error;

/// Client configuration
pub mod config;

/// Credential management
pub mod auth;

/// Rate-limited HTTP execution
pub mod http;

/// Pagination primitives
pub mod pagination;

/// Query-string building
pub mod query;

/// Upward API surface and domain records
pub mod api;

// ============================================================================
// Re-exports
// ============================================================================

pub use api::{CoalitionUser, CursusUser, FetchOptions, IntraClient, User, UserRef};
pub use auth::{Credential, TokenManager};
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::{Error, Result};
pub use http::{RateLimiter, RateLimiterConfig};
pub use pagination::Page;
pub use query::QueryOptions;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
