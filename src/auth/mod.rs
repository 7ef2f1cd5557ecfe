//! Credential management
//!
//! The [`TokenManager`] owns the application credential (client-credentials
//! grant) and runs the user-token flows (authorization code, refresh token).
//! Callers only ever see "give me a valid access token"; the raw cache is
//! never exposed.

mod manager;
mod types;

pub use manager::TokenManager;
pub use types::Credential;
