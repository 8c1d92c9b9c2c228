//! CLI against a live in-process relay backed by a fake completion client.

use std::sync::Arc;

use assert_cmd::Command;
use async_trait::async_trait;
use letrades_api::{AppState, config::ApiConfig};
use letrades_core::completion::{
    CompletionApi, CompletionError, CompletionRequest, CompletionResponse, ContentSegment,
};
use predicates::prelude::*;
use tokio::runtime::Runtime;

/// Replies with the user's own words.
struct Echo;

#[async_trait]
impl CompletionApi for Echo {
    async fn complete(
        &self,
        _api_key: &str,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, CompletionError> {
        Ok(CompletionResponse {
            content: vec![ContentSegment {
                kind: "text".into(),
                text: Some(format!("You said: {}", request.messages[1].content)),
            }],
        })
    }
}

/// Serve the relay router, optionally nested under `prefix`. The runtime must
/// outlive the test's command invocations.
fn spawn_relay(prefix: Option<&str>) -> (Runtime, String) {
    let rt = Runtime::new().expect("runtime");
    let config = ApiConfig {
        anthropic_api_key: Some("sk-test".into()),
        ..ApiConfig::default()
    };
    let relay = letrades_api::router(AppState::with_completion(config, Arc::new(Echo)));
    let app = match prefix {
        Some(prefix) => axum::Router::new().nest(prefix, relay),
        None => relay,
    };

    let listener = rt
        .block_on(tokio::net::TcpListener::bind("127.0.0.1:0"))
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    rt.spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (rt, format!("http://{addr}"))
}

fn letrades() -> Command {
    Command::cargo_bin("letrades").unwrap()
}

#[test]
fn replies_follow_each_user_turn() {
    let (_rt, base) = spawn_relay(None);

    letrades()
        .args(["--relay-url", &base])
        .write_stdin("hello\n\nwho mows lawns?\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "You: hello\nThinking...\nAssistant: You said: hello\n\
             You: who mows lawns?\nThinking...\nAssistant: You said: who mows lawns?\n",
        ))
        .stdout(predicate::str::contains("Unable to get a response").not());
}

#[test]
fn explicit_chat_and_health_urls_are_used() {
    let (_rt, base) = spawn_relay(Some("/functions"));
    let chat_url = format!("{base}/functions/api/chat");
    let health_url = format!("{base}/functions/api/health");

    letrades()
        .args(["--chat-url", &chat_url, "--health-url", &health_url, "--status-check"])
        .write_stdin("hi\n")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Relay online\n"))
        .stdout(predicate::str::contains("You: hi\nThinking...\nAssistant: You said: hi\n"))
        .stdout(predicate::str::contains("Unable to get a response").not());
}

#[test]
fn chat_url_requires_health_url() {
    letrades()
        .args(["--chat-url", "http://127.0.0.1:1/api/chat"])
        .write_stdin("")
        .assert()
        .failure();
}
