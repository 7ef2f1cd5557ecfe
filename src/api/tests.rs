//! Tests for the API surface and domain records

use super::*;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> IntraClient {
    let config = ClientConfig::builder("uid", "secret")
        .base_url(server.uri())
        .rate_limit(crate::http::RateLimiterConfig::new(
            100,
            std::time::Duration::from_millis(100),
        ))
        .build();
    IntraClient::new(config).unwrap()
}

async fn mount_token_endpoint(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "app-token",
            "token_type": "bearer",
            "expires_in": 7200
        })))
        .mount(server)
        .await;
}

#[test]
fn test_client_rejects_missing_credentials() {
    let result = IntraClient::from_credentials("", "secret");
    assert!(matches!(
        result,
        Err(crate::error::Error::MissingConfigField { .. })
    ));
}

#[test]
fn test_user_deserialization() {
    let user: User = serde_json::from_value(json!({
        "id": 74,
        "login": "ibertran",
        "email": "ibertran@student.42lyon.fr",
        "displayname": "Iwan Bertran",
        "active?": true,
        "correction_point": 5,
        "wallet": 120,
        "pool_month": "july",
        "pool_year": "2022",
        "kind": "student",
        "cursus_users": [
            {
                "id": 1,
                "cursus_id": 21,
                "grade": "Cadet",
                "level": 8.5,
                "begin_at": "2022-09-01T07:00:00.000Z",
                "end_at": null,
                "user": {"id": 74, "login": "ibertran"}
            }
        ]
    }))
    .unwrap();

    assert_eq!(user.login, "ibertran");
    assert!(user.is_active());
    assert_eq!(user.cursus_users.len(), 1);
    assert_eq!(user.cursus_users[0].grade.as_deref(), Some("Cadet"));
    assert!(user.cursus_users[0].end_at.is_none());
}

#[test]
fn test_user_deserialization_minimal() {
    // Index payloads carry far fewer fields than show payloads
    let user: User = serde_json::from_value(json!({
        "id": 75,
        "login": "norminet"
    }))
    .unwrap();

    assert!(!user.is_active());
    assert!(user.cursus_users.is_empty());
    assert!(user.pool_year.is_none());
}

#[test]
fn test_coalition_user_deserialization() {
    let membership: CoalitionUser = serde_json::from_value(json!({
        "id": 9,
        "coalition_id": 58,
        "user_id": 74,
        "score": 4242,
        "rank": 3
    }))
    .unwrap();

    assert_eq!(membership.coalition_id, 58);
    assert_eq!(membership.score, 4242);
}

#[tokio::test]
async fn test_get_user() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server).await;

    Mock::given(method("GET"))
        .and(path("/v2/users/ibertran"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 74,
            "login": "ibertran",
            "active?": true
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let user = client.get_user("ibertran").await.unwrap();
    assert_eq!(user.id, 74);
    assert!(user.is_active());
}

#[tokio::test]
async fn test_get_campus_locations_query_shape() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server).await;

    Mock::given(method("GET"))
        .and(path("/v2/campus/9/locations"))
        .and(query_param("sort", "host"))
        .and(query_param("filter[active]", "true"))
        .and(query_param("per_page", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"host": "z1r1p1"}])))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let locations = client.get_campus_locations(9, Some(true)).await.unwrap();
    assert_eq!(locations.len(), 1);
}

#[tokio::test]
async fn test_get_user_logtime_sums_entries() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server).await;

    Mock::given(method("GET"))
        .and(path("/v2/users/74/locations_stats"))
        .and(query_param("begin_at", "2024-01-01"))
        .and(query_param("end_at", "2024-01-31"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "2024-01-02": "02:00:00.000000",
            "2024-01-03": "01:30:00.000000",
            "2024-01-04": "00:00:42.000000"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let logtime = client
        .get_user_logtime(74, Some("2024-01-01"), Some("2024-01-31"))
        .await
        .unwrap();
    assert_eq!(logtime, 2 * 3600 + 90 * 60 + 42);
}

#[tokio::test]
async fn test_get_user_logtime_window_needs_both_bounds() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server).await;

    // A lone begin bound is dropped: the request carries no window at all
    Mock::given(method("GET"))
        .and(path("/v2/users/74/locations_stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let logtime = client
        .get_user_logtime(74, Some("2024-01-01"), None)
        .await
        .unwrap();
    assert_eq!(logtime, 0);

    let requests = server.received_requests().await.unwrap();
    let stats_request = requests
        .iter()
        .find(|req| req.url.path().ends_with("locations_stats"))
        .unwrap();
    assert!(stats_request.url.query().is_none());
}

#[tokio::test]
async fn test_user_lazy_coalition_users() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server).await;

    Mock::given(method("GET"))
        .and(path("/v2/users/74/coalitions_users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 9, "coalition_id": 58, "user_id": 74, "score": 100}
        ])))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let user: User = serde_json::from_value(json!({"id": 74, "login": "ibertran"})).unwrap();

    let memberships = user.coalition_users(&client).await.unwrap();
    assert_eq!(memberships.len(), 1);
    assert_eq!(memberships[0].coalition_id, 58);
}

#[tokio::test]
async fn test_fetch_options_with_user_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/me"))
        .and(wiremock::matchers::header(
            "Authorization",
            "Bearer user-token",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 74,
            "login": "ibertran"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let credential = Credential {
        access_token: "user-token".to_string(),
        expires_at: chrono::Utc::now() + chrono::Duration::hours(1),
        secret_valid_until: None,
        refresh_token: None,
    };

    let me = client.who_am_i(&credential).await.unwrap();
    assert_eq!(me.login, "ibertran");
}
