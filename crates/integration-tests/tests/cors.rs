mod harness;

use harness::config::ConfigBuilder;
use harness::server::TestServer;
use promptsmith_config::{AnyOrArray, CorsConfig};

#[tokio::test]
async fn preflight_returns_200_with_cors_headers() {
    let server = TestServer::start(ConfigBuilder::new().build()).await.unwrap();

    let resp = server
        .client()
        .request(reqwest::Method::OPTIONS, server.url("/"))
        .header("origin", "http://localhost:5173")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let headers = resp.headers();
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert_eq!(headers["access-control-allow-headers"], "Content-Type, Authorization");
    assert_eq!(headers["access-control-allow-methods"], "POST, OPTIONS, GET");
}

#[tokio::test]
async fn every_response_carries_cors_headers() {
    let server = TestServer::start(ConfigBuilder::new().build()).await.unwrap();

    let resp = server
        .client()
        .post(server.endpoint())
        .header("origin", "http://localhost:5173")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);
    let headers = resp.headers();
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert_eq!(headers["access-control-allow-headers"], "Content-Type, Authorization");
    assert_eq!(headers["access-control-allow-methods"], "POST, OPTIONS, GET");

    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Request body is required");
}

#[tokio::test]
async fn restricted_origins_are_honored() {
    let cors = CorsConfig {
        origins: AnyOrArray::List(vec!["https://app.example.com".to_owned()]),
        ..CorsConfig::default()
    };
    let server = TestServer::start(ConfigBuilder::new().with_cors(cors).build()).await.unwrap();

    let allowed = server
        .client()
        .request(reqwest::Method::OPTIONS, server.url("/"))
        .header("origin", "https://app.example.com")
        .header("access-control-request-method", "POST")
        .send()
        .await
        .unwrap();
    assert_eq!(allowed.headers()["access-control-allow-origin"], "https://app.example.com");

    let denied = server
        .client()
        .request(reqwest::Method::OPTIONS, server.url("/"))
        .header("origin", "https://evil.example.com")
        .header("access-control-request-method", "POST")
        .send()
        .await
        .unwrap();
    assert!(denied.headers().get("access-control-allow-origin").is_none());
}
