//! Query-string building
//!
//! The intranet filters with bracketed parameters (`filter[key]=value`,
//! `range[key]=min,max`) plus `sort` and `per_page`. Parameters are set
//! through the `url` crate so the result is well-formed whether or not the
//! base URL already carries a query string, and setting a parameter twice
//! replaces it instead of duplicating it.

use crate::error::Result;
use std::collections::BTreeMap;
use url::Url;

/// Filter, range and sort options appended to an endpoint URL
#[derive(Debug, Clone, Default)]
pub struct QueryOptions {
    params: BTreeMap<String, String>,
    filter: BTreeMap<String, String>,
    range: BTreeMap<String, (String, String)>,
    sort: Vec<String>,
}

impl QueryOptions {
    /// Create empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a plain `key=value` parameter
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.insert(key.into(), value.to_string());
        self
    }

    /// Add a `filter[key]=value` parameter
    #[must_use]
    pub fn filter(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.filter.insert(key.into(), value.to_string());
        self
    }

    /// Add a `range[key]=min,max` parameter
    #[must_use]
    pub fn range(mut self, key: impl Into<String>, min: impl ToString, max: impl ToString) -> Self {
        self.range
            .insert(key.into(), (min.to_string(), max.to_string()));
        self
    }

    /// Add a field to the `sort` parameter
    #[must_use]
    pub fn sort(mut self, field: impl Into<String>) -> Self {
        self.sort.push(field.into());
        self
    }

    /// Whether any option is set
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
            && self.filter.is_empty()
            && self.range.is_empty()
            && self.sort.is_empty()
    }

    /// Apply the options to a URL. Idempotent: applying the same options
    /// again yields the same URL.
    pub fn apply_to(&self, url: &str) -> Result<String> {
        let mut url = Url::parse(url)?;

        for (key, value) in &self.params {
            set_query_param(&mut url, key, value);
        }
        for (key, value) in &self.filter {
            set_query_param(&mut url, &format!("filter[{key}]"), value);
        }
        for (key, (min, max)) in &self.range {
            set_query_param(&mut url, &format!("range[{key}]"), &format!("{min},{max}"));
        }
        if !self.sort.is_empty() {
            set_query_param(&mut url, "sort", &self.sort.join(","));
        }

        Ok(url.into())
    }
}

/// Set a single query parameter on a URL, replacing any existing entry with
/// the same name
pub fn set_param(url: &str, key: &str, value: &str) -> Result<String> {
    let mut url = Url::parse(url)?;
    set_query_param(&mut url, key, value);
    Ok(url.into())
}

fn set_query_param(url: &mut Url, key: &str, value: &str) {
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(name, _)| name != key)
        .map(|(name, val)| (name.into_owned(), val.into_owned()))
        .collect();

    let mut pairs = url.query_pairs_mut();
    pairs.clear();
    for (name, val) in &kept {
        pairs.append_pair(name, val);
    }
    pairs.append_pair(key, value);
}
