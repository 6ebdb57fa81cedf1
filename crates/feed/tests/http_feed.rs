//! Integration tests for `HttpFeed`.
//!
//! Uses `wiremock` to stand up a local HTTP server per test so no real
//! network traffic is made.

use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use waitroom_feed::{FeedConfig, FeedError, HttpFeed, WaitTimeFeed};

fn test_feed(server: &MockServer) -> HttpFeed {
    let config = FeedConfig::default()
        .with_url(format!("{}/api/waittimes", server.uri()))
        .with_timeout(Duration::from_secs(5))
        .with_user_agent("waitroom-test/0.1");
    HttpFeed::with_config(config).expect("failed to build test HttpFeed")
}

#[tokio::test]
async fn fetch_returns_city_keyed_payload() {
    let server = MockServer::start().await;
    let body = json!({
        "Edmonton": {"Emergency": [{"Name": "Royal Alexandra Hospital", "WaitTime": "2 hr 15 min"}]},
        "Calgary": {"Emergency": []}
    });

    Mock::given(method("GET"))
        .and(path("/api/waittimes"))
        .and(header_exists("X-Request-ID"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let payload = test_feed(&server).fetch().await.expect("fetch should succeed");
    assert_eq!(payload, body);
}

#[tokio::test]
async fn fetch_surfaces_server_errors_without_retrying() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/waittimes"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .expect(1)
        .mount(&server)
        .await;

    let err = test_feed(&server).fetch().await.unwrap_err();
    assert!(err.is_server_error(), "expected 5xx, got: {err:?}");
    assert!(matches!(err, FeedError::Status { status: 503, ref message } if message == "maintenance"));
}

#[tokio::test]
async fn fetch_rejects_non_json_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/waittimes"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>moved</html>"))
        .mount(&server)
        .await;

    let err = test_feed(&server).fetch().await.unwrap_err();
    assert!(matches!(err, FeedError::Json(_)), "got: {err:?}");
}

#[tokio::test]
async fn fetch_rejects_non_object_root() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/waittimes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["Edmonton"])))
        .mount(&server)
        .await;

    let err = test_feed(&server).fetch().await.unwrap_err();
    assert!(matches!(err, FeedError::MalformedPayload(_)), "got: {err:?}");
}

#[tokio::test]
async fn fetch_reports_unreachable_host() {
    // Nothing listens on port 1
    let config = FeedConfig::default()
        .with_url("http://127.0.0.1:1/api/waittimes")
        .with_timeout(Duration::from_secs(5));
    let feed = HttpFeed::with_config(config).expect("failed to build test HttpFeed");

    let err = feed.fetch().await.unwrap_err();
    assert!(matches!(err, FeedError::Request(_)), "got: {err:?}");
}
