//! Typed domain records
//!
//! The API returns wide JSON objects; these records pin down the fields the
//! crate works with and ignore the rest. Related resources are never fetched
//! implicitly: each record exposes explicit loader methods that take the
//! client and return fresh results, leaving the record itself untouched.

use super::IntraClient;
use crate::error::Result;
use crate::query::QueryOptions;
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use serde_json::Value;

/// A campus user
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: u64,
    pub login: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub displayname: Option<String>,
    #[serde(default, rename = "active?")]
    pub active: bool,
    #[serde(default)]
    pub correction_point: i64,
    #[serde(default)]
    pub wallet: i64,
    #[serde(default)]
    pub pool_month: Option<String>,
    #[serde(default)]
    pub pool_year: Option<String>,
    #[serde(default)]
    pub cursus_users: Vec<CursusUser>,
}

impl User {
    /// Whether the account is currently active
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Load the coalition memberships of this user
    pub async fn coalition_users(&self, client: &IntraClient) -> Result<Vec<CoalitionUser>> {
        client.get_user_coalition_users(self.id).await
    }

    /// Load the correction point history of this user, optionally filtered
    pub async fn correction_point_historics(
        &self,
        client: &IntraClient,
        options: &QueryOptions,
    ) -> Result<Vec<Value>> {
        client
            .get_user_correction_point_historics(self.id, options)
            .await
    }
}

/// A user's enrollment in a cursus
#[derive(Debug, Clone, Deserialize)]
pub struct CursusUser {
    pub id: u64,
    #[serde(default)]
    pub cursus_id: Option<u64>,
    #[serde(default)]
    pub grade: Option<String>,
    #[serde(default)]
    pub level: f64,
    #[serde(default)]
    pub begin_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub user: Option<UserRef>,
}

impl CursusUser {
    /// Load the user's location stats over this enrollment's time window.
    /// The end date is pushed one day out so the final day is included.
    pub async fn locations_stats(&self, client: &IntraClient) -> Result<Value> {
        let user = self.user.as_ref().ok_or_else(|| {
            crate::error::Error::unexpected_body("cursus_users", "record has no embedded user")
        })?;

        let begin = self.begin_at.map(|at| at.to_rfc3339());
        let end = self.end_at.map(|at| (at + Duration::days(1)).to_rfc3339());
        client
            .get_user_locations_stats(user.id, begin.as_deref(), end.as_deref())
            .await
    }
}

/// Minimal user reference embedded in other records
#[derive(Debug, Clone, Deserialize)]
pub struct UserRef {
    pub id: u64,
    #[serde(default)]
    pub login: Option<String>,
}

/// A user's membership in a coalition
#[derive(Debug, Clone, Deserialize)]
pub struct CoalitionUser {
    pub id: u64,
    pub coalition_id: u64,
    pub user_id: u64,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub rank: Option<i64>,
}

impl CoalitionUser {
    /// Load the coalition this membership belongs to
    pub async fn coalition(&self, client: &IntraClient) -> Result<Value> {
        client.get_coalition(self.coalition_id).await
    }
}
