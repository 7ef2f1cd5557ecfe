//! HTTP execution module
//!
//! Pairs the rate limiter with the authenticated request executor. The
//! executor owns the [`crate::auth::TokenManager`] and is the only place in
//! the crate that talks to the network.

mod client;
mod rate_limit;

pub use client::HttpClient;
pub use rate_limit::{RateLimiter, RateLimiterConfig};
