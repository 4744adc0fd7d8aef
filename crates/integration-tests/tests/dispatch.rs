mod harness;

use axum::http::StatusCode;
use harness::config::{ConfigBuilder, test_key};
use harness::mock_provider::{Behavior, MockProvider};
use harness::server::TestServer;
use promptsmith_core::ProviderKind;
use serde_json::json;

const SYSTEM: &str = "You are an expert Midjourney prompt engineer.";
const USER: &str = "Based on the user's idea, generate 3 distinct and creative variations.";

fn request(provider: &str, model: &str) -> serde_json::Value {
    json!({
        "provider": provider,
        "model": model,
        "systemPrompt": SYSTEM,
        "userPrompt": USER,
    })
}

async fn server_for(mock: &MockProvider, provider: ProviderKind) -> TestServer {
    let config = ConfigBuilder::new()
        .with_provider(provider, &mock.base_url(provider))
        .build();
    TestServer::start(config).await.unwrap()
}

#[tokio::test]
async fn openai_request_is_translated_and_normalized() {
    let mock = MockProvider::start("1. A lighthouse\n2. A harbor").await.unwrap();
    let server = server_for(&mock, ProviderKind::OpenAi).await;

    let (status, body) = server.dispatch(&request("openai", "gpt-4o")).await;

    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!({"result": "1. A lighthouse\n2. A harbor", "provider": "openai", "model": "gpt-4o"})
    );

    let upstream = mock.only_request();
    assert_eq!(upstream.path, "/v1/chat/completions");
    assert_eq!(
        upstream.headers["authorization"],
        format!("Bearer {}", test_key(ProviderKind::OpenAi))
    );
    assert_eq!(
        upstream.body,
        json!({
            "model": "gpt-4o",
            "messages": [
                {"role": "system", "content": SYSTEM},
                {"role": "user", "content": USER}
            ],
            "max_tokens": 1000
        })
    );
}

#[tokio::test]
async fn anthropic_request_is_translated_and_normalized() {
    let mock = MockProvider::start("1. A dragon").await.unwrap();
    let server = server_for(&mock, ProviderKind::Anthropic).await;

    let (status, body) = server.dispatch(&request("anthropic", "claude-3-haiku-20240307")).await;

    assert_eq!(status, 200);
    assert_eq!(body["result"], "1. A dragon");
    assert_eq!(body["provider"], "anthropic");

    let upstream = mock.only_request();
    assert_eq!(upstream.path, "/v1/messages");
    assert_eq!(upstream.headers["x-api-key"], test_key(ProviderKind::Anthropic));
    assert_eq!(upstream.headers["anthropic-version"], "2023-06-01");
    assert!(upstream.headers.get("authorization").is_none());
    assert_eq!(
        upstream.body,
        json!({
            "model": "claude-3-haiku-20240307",
            "max_tokens": 1000,
            "system": SYSTEM,
            "messages": [{"role": "user", "content": USER}]
        })
    );
}

#[tokio::test]
async fn google_request_is_translated_and_normalized() {
    let mock = MockProvider::start("1. A glacier").await.unwrap();
    let server = server_for(&mock, ProviderKind::Google).await;

    let (status, body) = server.dispatch(&request("gemini", "gemini-1.5-flash-latest")).await;

    assert_eq!(status, 200);
    assert_eq!(body["result"], "1. A glacier");
    assert_eq!(body["provider"], "google");
    assert_eq!(body["model"], "gemini-1.5-flash-latest");

    let upstream = mock.only_request();
    assert_eq!(upstream.path, "/v1beta/models/gemini-1.5-flash-latest:generateContent");
    assert_eq!(upstream.query, Some(format!("key={}", test_key(ProviderKind::Google))));
    assert!(upstream.headers.get("x-api-key").is_none());
    assert_eq!(
        upstream.body,
        json!({
            "contents": [{"parts": [{"text": format!("{SYSTEM}\n\n{USER}")}]}],
            "generationConfig": {"maxOutputTokens": 1000}
        })
    );
}

#[tokio::test]
async fn user_keyword_alias_and_token_cap() {
    let mock = MockProvider::start("ok").await.unwrap();
    let config = ConfigBuilder::new()
        .with_provider(ProviderKind::OpenAi, &mock.base_url(ProviderKind::OpenAi))
        .with_max_tokens(300)
        .build();
    let server = TestServer::start(config).await.unwrap();

    let (status, _) = server
        .dispatch(&json!({"provider": "openai", "model": "gpt-4o", "userKeyword": "a fox"}))
        .await;

    assert_eq!(status, 200);
    let upstream = mock.only_request();
    assert_eq!(upstream.body["max_tokens"], 300);
    assert_eq!(upstream.body["messages"], json!([{"role": "user", "content": "a fox"}]));
}

#[tokio::test]
async fn user_prompt_and_user_keyword_together_are_accepted() {
    let mock = MockProvider::start("ok").await.unwrap();
    let server = server_for(&mock, ProviderKind::OpenAi).await;

    let (status, body) = server
        .dispatch(&json!({
            "provider": "openai",
            "model": "gpt-4o",
            "userPrompt": "a lighthouse",
            "userKeyword": "a harbor"
        }))
        .await;

    assert_eq!(status, 200);
    assert_eq!(body["result"], "ok");
    assert_eq!(
        mock.only_request().body["messages"],
        json!([{"role": "user", "content": "a lighthouse"}])
    );
}

#[tokio::test]
async fn missing_text_path_yields_sentinel() {
    let mock = MockProvider::start_with(Behavior::NoContent).await.unwrap();
    let server = server_for(&mock, ProviderKind::Anthropic).await;

    let (status, body) = server.dispatch(&request("anthropic", "claude-3-opus-20240229")).await;

    assert_eq!(status, 200);
    assert_eq!(body["result"], "No content received");
}

#[tokio::test]
async fn upstream_status_and_body_are_relayed() {
    let mock = MockProvider::start_with(Behavior::Fail(
        StatusCode::UNAUTHORIZED,
        r#"{"error":{"message":"invalid api key"}}"#.to_owned(),
    ))
    .await
    .unwrap();
    let server = server_for(&mock, ProviderKind::OpenAi).await;

    let (status, body) = server.dispatch(&request("openai", "gpt-4o")).await;

    assert_eq!(status, 401);
    assert_eq!(body["error"], "API Error: 401");
    assert_eq!(body["details"], r#"{"error":{"message":"invalid api key"}}"#);
    assert_eq!(body["provider"], "openai");
}

#[tokio::test]
async fn slow_upstream_times_out_with_408() {
    let mock = MockProvider::start_with(Behavior::Slow(std::time::Duration::from_secs(5), "late".to_owned()))
        .await
        .unwrap();
    let config = ConfigBuilder::new()
        .with_provider(ProviderKind::Google, &mock.base_url(ProviderKind::Google))
        .with_timeout("200ms")
        .build();
    let server = TestServer::start(config).await.unwrap();

    let (status, body) = server.dispatch(&request("google", "gemini-1.5-pro-latest")).await;

    assert_eq!(status, 408);
    assert_eq!(body["error"], "Request timeout");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn non_json_upstream_body_is_a_shape_error() {
    let mock = MockProvider::start_with(Behavior::Malformed("<html>gateway</html>".to_owned()))
        .await
        .unwrap();
    let server = server_for(&mock, ProviderKind::OpenAi).await;

    let (status, body) = server.dispatch(&request("openai", "gpt-4o")).await;

    assert_eq!(status, 500);
    assert_eq!(body["error"], "Error parsing API response");
    assert_eq!(body["rawResponse"], "<html>gateway</html>");
}

#[tokio::test]
async fn non_object_upstream_body_is_a_shape_error() {
    let mock = MockProvider::start_with(Behavior::NonObject(json!(["a", "b"])))
        .await
        .unwrap();
    let server = server_for(&mock, ProviderKind::Anthropic).await;

    let (status, body) = server.dispatch(&request("anthropic", "claude-3-haiku-20240307")).await;

    assert_eq!(status, 500);
    assert_eq!(body["rawResponse"], json!(["a", "b"]));
}

#[tokio::test]
async fn missing_server_key_reports_api_key() {
    let mock = MockProvider::start("unused").await.unwrap();
    let config = ConfigBuilder::new()
        .with_keyless_provider(ProviderKind::OpenAi, &mock.base_url(ProviderKind::OpenAi))
        .build();
    let server = TestServer::start(config).await.unwrap();

    let (status, body) = server.dispatch(&request("openai", "gpt-4o")).await;

    assert_eq!(status, 400);
    assert_eq!(body["error"], "Missing required fields");
    assert_eq!(body["missing"], json!(["apiKey"]));
    assert_eq!(body["required"], json!(["provider", "model", "apiKey", "userPrompt"]));
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn client_key_is_ignored_unless_allowed() {
    let mock = MockProvider::start("ok").await.unwrap();
    let server = server_for(&mock, ProviderKind::OpenAi).await;

    let mut body = request("openai", "gpt-4o");
    body["apiKey"] = json!("sk-from-browser");
    let (status, _) = server.dispatch(&body).await;

    assert_eq!(status, 200);
    assert_eq!(
        mock.only_request().headers["authorization"],
        format!("Bearer {}", test_key(ProviderKind::OpenAi))
    );
}

#[tokio::test]
async fn client_key_is_used_when_allowed() {
    let mock = MockProvider::start("ok").await.unwrap();
    let config = ConfigBuilder::new()
        .with_keyless_provider(ProviderKind::Anthropic, &mock.base_url(ProviderKind::Anthropic))
        .allow_client_keys()
        .build();
    let server = TestServer::start(config).await.unwrap();

    let mut body = request("anthropic", "claude-3-haiku-20240307");
    body["apiKey"] = json!("sk-from-browser");
    let (status, _) = server.dispatch(&body).await;

    assert_eq!(status, 200);
    assert_eq!(mock.only_request().headers["x-api-key"], "sk-from-browser");
}

#[tokio::test]
async fn validation_errors_never_reach_the_provider() {
    let mock = MockProvider::start("unused").await.unwrap();
    let server = server_for(&mock, ProviderKind::OpenAi).await;

    let (status, body) = server
        .dispatch(&json!({"provider": "mistral", "model": "large", "userPrompt": "a fox"}))
        .await;
    assert_eq!(status, 400);
    assert_eq!(body["supportedProviders"], json!(["openai", "anthropic", "google"]));

    let (status, body) = server.dispatch(&json!({"provider": "openai"})).await;
    assert_eq!(status, 400);
    assert_eq!(body["missing"], json!(["model", "userPrompt"]));

    let response = server
        .client()
        .post(server.endpoint())
        .header("content-type", "application/json")
        .body("{\"provider\":")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Invalid JSON in request body");

    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn non_post_methods_are_rejected() {
    let mock = MockProvider::start("unused").await.unwrap();
    let server = server_for(&mock, ProviderKind::OpenAi).await;

    for method in [reqwest::Method::GET, reqwest::Method::PUT, reqwest::Method::DELETE] {
        let response = server.client().request(method, server.url("/")).send().await.unwrap();
        assert_eq!(response.status(), 405);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["error"], "Method not allowed");
    }
}
