//! Tests for Link header parsing

use super::*;
use serde_json::json;

#[test]
fn test_parse_single_entry() {
    let header = "<https://api.intra.42.fr/v2/users?page=2>; rel=\"next\"";
    assert_eq!(
        parse_link_header(header, "next"),
        Some("https://api.intra.42.fr/v2/users?page=2".to_string())
    );
}

#[test]
fn test_parse_multiple_entries() {
    let header = "<https://api.intra.42.fr/v2/users?page=1>; rel=\"first\", \
                  <https://api.intra.42.fr/v2/users?page=3>; rel=\"next\", \
                  <https://api.intra.42.fr/v2/users?page=9>; rel=\"last\"";

    assert_eq!(
        parse_link_header(header, "next"),
        Some("https://api.intra.42.fr/v2/users?page=3".to_string())
    );
    assert_eq!(
        parse_link_header(header, "last"),
        Some("https://api.intra.42.fr/v2/users?page=9".to_string())
    );
}

#[test]
fn test_parse_missing_rel() {
    let header = "<https://api.intra.42.fr/v2/users?page=9>; rel=\"last\"";
    assert_eq!(parse_link_header(header, "next"), None);
}

#[test]
fn test_parse_unquoted_rel() {
    let header = "<https://example.com/p2>; rel=next";
    assert_eq!(
        parse_link_header(header, "next"),
        Some("https://example.com/p2".to_string())
    );
}

#[test]
fn test_parse_single_quoted_rel() {
    let header = "<https://example.com/p2>; rel='next'";
    assert_eq!(
        parse_link_header(header, "next"),
        Some("https://example.com/p2".to_string())
    );
}

#[test]
fn test_parse_garbage() {
    assert_eq!(parse_link_header("", "next"), None);
    assert_eq!(parse_link_header("not a link header", "next"), None);
    assert_eq!(parse_link_header("rel=\"next\"", "next"), None);
}

#[test]
fn test_parse_preserves_query_string() {
    let header = "<https://api.intra.42.fr/v2/users?per_page=100&page=2>; rel=\"next\"";
    assert_eq!(
        parse_link_header(header, "next"),
        Some("https://api.intra.42.fr/v2/users?per_page=100&page=2".to_string())
    );
}

#[test]
fn test_page_has_next() {
    let page = Page {
        items: vec![json!({"id": 1})],
        next: Some("https://example.com/p2".to_string()),
    };
    assert!(page.has_next());

    let last = Page {
        items: vec![],
        next: None,
    };
    assert!(!last.has_next());
}
