//! Upward API surface
//!
//! [`IntraClient`] is the entry point everything else builds on: one plain
//! fetch, one paginated fetch, and the convenience methods mirroring the
//! intranet's `/v2` endpoints. See <https://api.intra.42.fr/apidoc> for the
//! endpoint catalogue.

pub mod logtime;
mod models;

pub use models::{CoalitionUser, CursusUser, User, UserRef};

use crate::auth::{Credential, TokenManager};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::query::QueryOptions;
use serde_json::Value;
use std::sync::Arc;

/// Options for a single [`IntraClient::fetch`] or [`IntraClient::fetch_all`]
#[derive(Debug, Default)]
pub struct FetchOptions<'a> {
    /// Filter/range/sort parameters appended to the endpoint URL
    pub query: QueryOptions,
    /// Fetch on behalf of this user instead of the application
    pub token: Option<&'a Credential>,
    /// Page size for paginated fetches (client default when unset)
    pub page_size: Option<u32>,
}

impl<'a> FetchOptions<'a> {
    /// Create empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the query options
    #[must_use]
    pub fn query(mut self, query: QueryOptions) -> Self {
        self.query = query;
        self
    }

    /// Fetch with a user credential
    #[must_use]
    pub fn token(mut self, credential: &'a Credential) -> Self {
        self.token = Some(credential);
        self
    }

    /// Override the page size
    #[must_use]
    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }
}

/// Client for the 42 intranet REST API
pub struct IntraClient {
    http: HttpClient,
    config: Arc<ClientConfig>,
}

impl IntraClient {
    /// Create a client from a full config
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let config = Arc::new(config);
        Ok(Self {
            http: HttpClient::new(Arc::clone(&config))?,
            config,
        })
    }

    /// Create a client from application credentials, defaults elsewhere
    pub fn from_credentials(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Result<Self> {
        Self::new(ClientConfig::new(client_id, client_secret))
    }

    /// The client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The credential manager (authorize URL, code exchange, user refresh)
    pub fn tokens(&self) -> &TokenManager {
        self.http.tokens()
    }

    /// The authorize URL users visit to grant access
    pub fn authorize_url(&self) -> Result<String> {
        self.tokens().authorize_url()
    }

    /// GET one endpoint and return the JSON body
    pub async fn fetch(&self, path: &str, options: &FetchOptions<'_>) -> Result<Value> {
        let url = self.endpoint_url(path, &options.query)?;
        self.http.fetch_json(&url, options.token).await
    }

    /// GET a paginated endpoint to exhaustion and return all items
    pub async fn fetch_all(&self, path: &str, options: &FetchOptions<'_>) -> Result<Vec<Value>> {
        let url = self.endpoint_url(path, &options.query)?;
        let page_size = options.page_size.unwrap_or(self.config.page_size);
        self.http.fetch_all(&url, page_size, options.token).await
    }

    fn endpoint_url(&self, path: &str, query: &QueryOptions) -> Result<String> {
        let url = self.config.api_url(path);
        if query.is_empty() {
            return Ok(url);
        }
        query.apply_to(&url)
    }

    // ========================================================================
    // Users
    // ========================================================================

    /// Get a user by id or login
    pub async fn get_user(&self, user: &str) -> Result<User> {
        let body = self
            .fetch(&format!("/v2/users/{user}"), &FetchOptions::new())
            .await?;
        Ok(serde_json::from_value(body)?)
    }

    /// Get the owner of a user token
    pub async fn who_am_i(&self, credential: &Credential) -> Result<User> {
        let body = self
            .fetch("/v2/me", &FetchOptions::new().token(credential))
            .await?;
        Ok(serde_json::from_value(body)?)
    }

    /// Get all users of a campus
    pub async fn get_campus_users(
        &self,
        campus_id: u64,
        options: &QueryOptions,
    ) -> Result<Vec<User>> {
        let items = self
            .fetch_all(
                &format!("/v2/campus/{campus_id}/users"),
                &FetchOptions::new().query(options.clone()),
            )
            .await?;
        items
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(Error::JsonParse))
            .collect()
    }

    /// Get a user's projects_users
    pub async fn get_user_projects_users(&self, user: &str) -> Result<Vec<Value>> {
        self.fetch_all(
            &format!("/v2/users/{user}/projects_users"),
            &FetchOptions::new(),
        )
        .await
    }

    /// Get a user's coalition memberships
    pub async fn get_user_coalition_users(&self, user_id: u64) -> Result<Vec<CoalitionUser>> {
        let items = self
            .fetch_all(
                &format!("/v2/users/{user_id}/coalitions_users"),
                &FetchOptions::new(),
            )
            .await?;
        items
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(Error::JsonParse))
            .collect()
    }

    /// Get a user's correction point history, optionally filtered by reason
    /// or bounded with a `range("updated_at", min, max)` window
    pub async fn get_user_correction_point_historics(
        &self,
        user_id: u64,
        options: &QueryOptions,
    ) -> Result<Vec<Value>> {
        self.fetch_all(
            &format!("/v2/users/{user_id}/correction_point_historics"),
            &FetchOptions::new().query(options.clone()),
        )
        .await
    }

    /// Get a user's location stats, optionally bounded to a begin/end window.
    /// The window applies only when both bounds are present.
    pub async fn get_user_locations_stats(
        &self,
        user_id: u64,
        begin: Option<&str>,
        end: Option<&str>,
    ) -> Result<Value> {
        let mut query = QueryOptions::new();
        if let (Some(begin), Some(end)) = (begin, end) {
            query = query.param("begin_at", begin).param("end_at", end);
        }
        self.fetch(
            &format!("/v2/users/{user_id}/locations_stats"),
            &FetchOptions::new().query(query),
        )
        .await
    }

    /// Sum a user's logtime over an optional begin/end window, in seconds.
    /// Entries that fail to parse are skipped.
    pub async fn get_user_logtime(
        &self,
        user_id: u64,
        begin: Option<&str>,
        end: Option<&str>,
    ) -> Result<u64> {
        let stats = self.get_user_locations_stats(user_id, begin, end).await?;
        let total = stats
            .as_object()
            .map(|entries| {
                entries
                    .values()
                    .filter_map(Value::as_str)
                    .filter_map(logtime::time_to_seconds)
                    .sum::<u64>()
            })
            .unwrap_or(0);
        Ok(total)
    }

    // ========================================================================
    // Campus
    // ========================================================================

    /// Get the locations of a campus, sorted by host, optionally restricted
    /// to active sessions
    pub async fn get_campus_locations(
        &self,
        campus_id: u64,
        active: Option<bool>,
    ) -> Result<Vec<Value>> {
        let mut query = QueryOptions::new().sort("host");
        if let Some(active) = active {
            query = query.filter("active", active);
        }
        self.fetch_all(
            &format!("/v2/campus/{campus_id}/locations"),
            &FetchOptions::new().query(query),
        )
        .await
    }

    // ========================================================================
    // Cursus, projects, coalitions
    // ========================================================================

    /// Get every cursus
    pub async fn get_all_cursus(&self) -> Result<Vec<Value>> {
        self.fetch_all("/v2/cursus", &FetchOptions::new()).await
    }

    /// Get the projects of a cursus
    pub async fn get_cursus_projects(&self, cursus_id: u64) -> Result<Vec<Value>> {
        self.fetch_all(
            &format!("/v2/cursus/{cursus_id}/projects"),
            &FetchOptions::new(),
        )
        .await
    }

    /// Get a project
    pub async fn get_project(&self, project_id: u64) -> Result<Value> {
        self.fetch(&format!("/v2/projects/{project_id}"), &FetchOptions::new())
            .await
    }

    /// Get the projects_users of a project
    pub async fn get_project_users(
        &self,
        project_id: u64,
        options: &QueryOptions,
    ) -> Result<Vec<Value>> {
        self.fetch_all(
            &format!("/v2/projects/{project_id}/projects_users"),
            &FetchOptions::new().query(options.clone()),
        )
        .await
    }

    /// Get the sessions of a project
    pub async fn get_project_sessions(&self, project_id: u64) -> Result<Vec<Value>> {
        self.fetch_all(
            &format!("/v2/projects/{project_id}/project_sessions"),
            &FetchOptions::new(),
        )
        .await
    }

    /// Get a coalition
    pub async fn get_coalition(&self, coalition_id: u64) -> Result<Value> {
        self.fetch(
            &format!("/v2/coalitions/{coalition_id}"),
            &FetchOptions::new(),
        )
        .await
    }

    // ========================================================================
    // Events, titles, groups
    // ========================================================================

    /// Get the attendees of an event
    pub async fn get_event_users(&self, event_id: u64) -> Result<Vec<Value>> {
        self.fetch_all(
            &format!("/v2/events/{event_id}/events_users"),
            &FetchOptions::new(),
        )
        .await
    }

    /// Get the holders of a title
    pub async fn get_title_users(&self, title_id: u64) -> Result<Vec<Value>> {
        self.fetch_all(
            &format!("/v2/titles/{title_id}/titles_users"),
            &FetchOptions::new(),
        )
        .await
    }

    /// Get the members of a group
    pub async fn get_group_users(&self, group_id: u64) -> Result<Vec<Value>> {
        self.fetch_all(
            &format!("/v2/groups/{group_id}/groups_users"),
            &FetchOptions::new(),
        )
        .await
    }

    /// Get every group
    pub async fn get_all_groups(&self) -> Result<Vec<Value>> {
        self.fetch_all("/v2/groups", &FetchOptions::new()).await
    }

    /// Get every title
    pub async fn get_all_titles(&self) -> Result<Vec<Value>> {
        self.fetch_all("/v2/titles", &FetchOptions::new()).await
    }
}

impl std::fmt::Debug for IntraClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntraClient")
            .field("base_url", &self.config.base_url)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
