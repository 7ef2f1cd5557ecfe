//! Pagination primitives
//!
//! The intranet paginates with RFC 5988 `Link` response headers:
//! `<url>; rel="next", <url>; rel="last", ...`. Only `rel="next"` drives the
//! walk; the chain ends when a page carries no next entry.

use serde_json::Value;

/// One page of a paginated result set
#[derive(Debug, Clone)]
pub struct Page {
    /// Items of this page, in server order
    pub items: Vec<Value>,
    /// URL of the next page, when the `Link` header advertised one
    pub next: Option<String>,
}

impl Page {
    /// Whether another page follows this one
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }
}

/// Extract the URL for `target_rel` from a `Link` header value.
///
/// Entries are comma-separated `<url>; rel="name"` pairs; rel values may be
/// quoted with double quotes, single quotes or not at all.
pub fn parse_link_header(header: &str, target_rel: &str) -> Option<String> {
    for entry in header.split(',') {
        let mut url = None;
        let mut rel = None;

        for segment in entry.split(';') {
            let segment = segment.trim();
            if let Some(inner) = segment
                .strip_prefix('<')
                .and_then(|rest| rest.strip_suffix('>'))
            {
                url = Some(inner);
            } else if let Some(value) = segment.strip_prefix("rel=") {
                rel = Some(value.trim_matches('"').trim_matches('\''));
            }
        }

        if rel == Some(target_rel) {
            if let Some(url) = url {
                return Some(url.to_string());
            }
        }
    }

    None
}

#[cfg(test)]
mod tests;
