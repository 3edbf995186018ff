//! Tests for the HTTP client module

use super::*;
use crate::error::Error;
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> HttpClient {
    let config = HttpClientConfig::builder()
        .base_url(server.uri())
        .timeout(Duration::from_secs(2))
        .build();
    HttpClient::with_config(config).unwrap()
}

#[test]
fn test_http_client_config_default() {
    let config = HttpClientConfig::default();
    assert_eq!(config.timeout, Duration::from_secs(10));
    assert!(config.base_url.is_none());
    assert!(config.rate_limit.is_none());
    assert!(config.user_agent.starts_with("catalog-gateway/"));
}

#[test]
fn test_http_client_config_builder() {
    let config = HttpClientConfig::builder()
        .base_url("https://catalog.example.com")
        .timeout(Duration::from_secs(3))
        .rate_limit(RateLimiterConfig::new(5, 5))
        .header("X-Custom", "value")
        .user_agent("test-agent/1.0")
        .build();

    assert_eq!(
        config.base_url,
        Some("https://catalog.example.com".to_string())
    );
    assert_eq!(config.timeout, Duration::from_secs(3));
    assert_eq!(config.rate_limit, Some(RateLimiterConfig::new(5, 5)));
    assert_eq!(
        config.default_headers.get("X-Custom"),
        Some(&"value".to_string())
    );
    assert_eq!(config.user_agent, "test-agent/1.0");
}

#[test]
fn test_request_config_builder() {
    let config = RequestConfig::new()
        .query("id", "1274170")
        .query("page", 2);

    assert_eq!(
        config.query,
        vec![
            ("id".to_string(), "1274170".to_string()),
            ("page".to_string(), "2".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_get_json_with_query_and_default_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/artists/songs"))
        .and(query_param("id", "42"))
        .and(query_param("page", "1"))
        .and(header("X-Trace", "t-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "value": 42
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .header("X-Trace", "t-1")
        .build();
    let client = HttpClient::with_config(config).unwrap();
    let config = RequestConfig::new().query("id", "42").query("page", 1);
    let data: serde_json::Value = client.get_json("/artists/songs", config).await.unwrap();

    assert_eq!(data["value"], 42);
}

#[tokio::test]
async fn test_base_url_with_path_prefix() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/artists/albums"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(format!("{}/api/v1/", mock_server.uri()))
        .build();
    let client = HttpClient::with_config(config).unwrap();

    let _: serde_json::Value = client
        .get_json("/artists/albums", RequestConfig::new())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_server_error_is_unavailable_without_retry() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .get("/flaky", RequestConfig::new())
        .await
        .unwrap_err();

    match err {
        Error::UpstreamUnavailable { status, message } => {
            assert_eq!(status, Some(503));
            assert_eq!(message, "HTTP 503 Service Unavailable");
        }
        other => panic!("Expected UpstreamUnavailable, got {other:?}"),
    }
}

#[tokio::test]
async fn test_error_body_message_is_used() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(serde_json::json!({"message": "catalog backend down"})),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .get("/broken", RequestConfig::new())
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Upstream unavailable: catalog backend down"
    );
}

#[tokio::test]
async fn test_not_found_status_is_preserved() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .get("/missing", RequestConfig::new())
        .await
        .unwrap_err();

    assert_eq!(err.upstream_status_code(), Some(404));
}

#[tokio::test]
async fn test_timeout_is_unavailable() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .timeout(Duration::from_millis(50))
        .build();
    let client = HttpClient::with_config(config).unwrap();
    let err = client
        .get_json::<serde_json::Value>("/slow", RequestConfig::new())
        .await
        .unwrap_err();

    match err {
        Error::UpstreamUnavailable { status, message } => {
            assert_eq!(status, None);
            assert_eq!(message, "request timed out after 50ms");
        }
        other => panic!("Expected UpstreamUnavailable, got {other:?}"),
    }
}

#[tokio::test]
async fn test_connection_refused_is_unavailable() {
    let config = HttpClientConfig::builder()
        .base_url("http://127.0.0.1:1")
        .timeout(Duration::from_secs(1))
        .build();
    let client = HttpClient::with_config(config).unwrap();

    let err = client.get("/x", RequestConfig::new()).await.unwrap_err();
    assert!(matches!(err, Error::UpstreamUnavailable { status: None, .. }));
}

#[tokio::test]
async fn test_undecodable_body_is_shape_mismatch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/html"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    #[derive(Debug, serde::Deserialize)]
    struct Expected {
        #[allow(dead_code)]
        total: u64,
    }

    let client = client_for(&mock_server);
    let err = client
        .get_json::<Expected>("/html", RequestConfig::new())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::UpstreamShapeMismatch { .. }));
}
