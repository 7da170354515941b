//! Relay endpoint tests over a real socket

use serde_json::{json, Value};
use tokio::task::JoinSet;

use relaychat_llm::MockLlmService;

use crate::common::TestRelay;

async fn post_json(url: &str, body: Value) -> reqwest::Response {
    reqwest::Client::new()
        .post(url)
        .json(&body)
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn test_relay_returns_reply() {
    let relay = TestRelay::start(MockLlmService::replying("hi there"))
        .await
        .unwrap();

    let resp = post_json(&relay.chat_url(), json!({"message": "hello"})).await;
    assert_eq!(resp.status(), reqwest::StatusCode::OK);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({"reply": "hi there"}));
}

#[tokio::test]
async fn test_relay_rejects_blank_message() {
    let relay = TestRelay::start(MockLlmService::new()).await.unwrap();

    let resp = post_json(&relay.chat_url(), json!({"message": " \n "})).await;
    assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(relay.llm.recorded_requests().is_empty());
}

#[tokio::test]
async fn test_relay_provider_failure_returns_structured_502() {
    let relay = TestRelay::start(MockLlmService::failing("auth failed"))
        .await
        .unwrap();

    let resp = post_json(&relay.chat_url(), json!({"message": "hello"})).await;
    assert_eq!(resp.status(), reqwest::StatusCode::BAD_GATEWAY);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["code"], "UPSTREAM_ERROR");
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_relay_serves_concurrent_requests_independently() {
    let relay = TestRelay::start(MockLlmService::new()).await.unwrap();
    let url = relay.chat_url();

    let mut tasks = JoinSet::new();
    for i in 0..8 {
        let url = url.clone();
        tasks.spawn(async move {
            let resp = post_json(&url, json!({ "message": format!("msg {i}") })).await;
            let body: Value = resp.json().await.unwrap();
            (i, body["reply"].as_str().unwrap().to_string())
        });
    }

    while let Some(result) = tasks.join_next().await {
        let (i, reply) = result.unwrap();
        assert_eq!(reply, format!("Mock response to: msg {i}"));
    }

    let recorded = relay.llm.recorded_requests();
    assert_eq!(recorded.len(), 8);
    assert!(recorded.iter().all(|r| r.messages.len() == 1));
}

#[tokio::test]
async fn test_health_endpoint() {
    let relay = TestRelay::start(MockLlmService::new()).await.unwrap();

    let resp = reqwest::get(format!("{}/health", relay.url())).await.unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    assert_eq!(resp.text().await.unwrap(), "OK");
}
