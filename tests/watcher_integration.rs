//! Full poll-cycle integration tests against mock HTTP endpoints.
//!
//! Stands up a mock Hypixel API and a mock Discord webhook, wires a real
//! `Watcher` between them, and drives cycles by hand.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use statuswatch::hypixel::{HypixelClient, StatusProvider};
use statuswatch::rules::{Rule, RuleChain};
use statuswatch::watcher::{StateCache, Watcher};
use statuswatch::webhook::DiscordWebhook;

const TIMEOUT_MS: u64 = 2_000;

fn online_session(game_type: &str, mode: Option<&str>) -> serde_json::Value {
    let mut session = json!({ "online": true, "gameType": game_type });
    if let Some(mode) = mode {
        session["mode"] = json!(mode);
    }
    json!({ "success": true, "session": session })
}

fn offline_session() -> serde_json::Value {
    json!({ "success": true, "session": { "online": false } })
}

fn join_leave_chain() -> RuleChain {
    RuleChain::new(vec![
        Rule {
            message_format: "SKYBLOCK: {uuid} got onto Private Island".to_string(),
            online: true,
            game_type: Some("SKYBLOCK".to_string()),
            game_mode: Some("dynamic".to_string()),
            game_map: None,
        },
        Rule::fallback("{uuid} joined!", true),
        Rule::fallback("{uuid} left!", false),
    ])
}

async fn mock_webhook() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/webhook"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    server
}

fn watcher_against(
    api: &MockServer,
    hook: &MockServer,
    uuids: &[&str],
) -> Watcher<HypixelClient, DiscordWebhook> {
    let provider = HypixelClient::with_base_url("test-key", &api.uri(), TIMEOUT_MS).unwrap();
    let notifier = DiscordWebhook::new(&format!("{}/webhook", hook.uri())).unwrap();
    Watcher::new(
        provider,
        notifier,
        join_leave_chain(),
        uuids.iter().map(|s| s.to_string()).collect(),
        Duration::from_secs(60),
    )
}

async fn webhook_bodies(hook: &MockServer) -> Vec<serde_json::Value> {
    hook.received_requests()
        .await
        .unwrap()
        .iter()
        .map(|req: &Request| serde_json::from_slice(&req.body).unwrap())
        .collect()
}

#[tokio::test]
async fn first_poll_notifies_then_identical_poll_is_silent() {
    let api = MockServer::start().await;
    let hook = mock_webhook().await;

    Mock::given(method("GET"))
        .and(path("/status"))
        .and(query_param("uuid", "u1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(online_session("SKYWARS", None)))
        .mount(&api)
        .await;

    let watcher = watcher_against(&api, &hook, &["u1"]);
    let mut cache = StateCache::new();

    let first = watcher.cycle(&mut cache).await;
    let second = watcher.cycle(&mut cache).await;

    assert_eq!(first.notified, 1);
    assert_eq!(second.notified, 0);

    // Scenario A: the SKYBLOCK island rule does not match a SKYWARS session,
    // so the generic join fallback fired, tagged with the player uuid.
    let bodies = webhook_bodies(&hook).await;
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0]["content"], "u1 joined!");
    assert_eq!(bodies[0]["username"], "u1");
    assert!(bodies[0].get("avatar_url").is_none());
}

#[tokio::test]
async fn specific_rule_beats_fallback() {
    let api = MockServer::start().await;
    let hook = mock_webhook().await;

    Mock::given(method("GET"))
        .and(path("/status"))
        .and(query_param("uuid", "u1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(online_session("SKYBLOCK", Some("dynamic"))),
        )
        .mount(&api)
        .await;

    let watcher = watcher_against(&api, &hook, &["u1"]);
    let mut cache = StateCache::new();
    watcher.cycle(&mut cache).await;

    let bodies = webhook_bodies(&hook).await;
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0]["content"], "SKYBLOCK: u1 got onto Private Island");
}

#[tokio::test]
async fn offline_transition_notifies_fallback() {
    let api = MockServer::start().await;
    let hook = mock_webhook().await;

    // First cycle sees the player online, later cycles see them offline.
    Mock::given(method("GET"))
        .and(path("/status"))
        .and(query_param("uuid", "u3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(online_session("BEDWARS", None)))
        .up_to_n_times(1)
        .mount(&api)
        .await;
    Mock::given(method("GET"))
        .and(path("/status"))
        .and(query_param("uuid", "u3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(offline_session()))
        .mount(&api)
        .await;

    let watcher = watcher_against(&api, &hook, &["u3"]);
    let mut cache = StateCache::new();
    watcher.cycle(&mut cache).await;
    watcher.cycle(&mut cache).await;

    let bodies = webhook_bodies(&hook).await;
    assert_eq!(bodies.len(), 2);
    assert_eq!(bodies[0]["content"], "u3 joined!");
    assert_eq!(bodies[1]["content"], "u3 left!");
}

#[tokio::test]
async fn provider_error_skips_identity_and_cycle_continues() {
    let api = MockServer::start().await;
    let hook = mock_webhook().await;

    Mock::given(method("GET"))
        .and(path("/status"))
        .and(query_param("uuid", "broken"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "success": false,
            "cause": "internal error"
        })))
        .mount(&api)
        .await;
    Mock::given(method("GET"))
        .and(path("/status"))
        .and(query_param("uuid", "u2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(online_session("DUELS", None)))
        .mount(&api)
        .await;

    let watcher = watcher_against(&api, &hook, &["broken", "u2"]);
    let mut cache = StateCache::new();
    let stats = watcher.cycle(&mut cache).await;

    // The failed player is skipped for this cycle and never cached; the
    // rest of the cycle still runs and notifies.
    assert_eq!(stats.skipped, 1);
    assert_eq!(stats.polled, 1);
    assert!(cache.get("broken").is_none());

    let bodies = webhook_bodies(&hook).await;
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0]["content"], "u2 joined!");
}

#[tokio::test]
async fn invalid_key_halts_before_any_poll() {
    let api = MockServer::start().await;
    let hook = mock_webhook().await;

    Mock::given(method("GET"))
        .and(path("/key"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "success": false,
            "cause": "Invalid API key"
        })))
        .mount(&api)
        .await;

    let watcher = watcher_against(&api, &hook, &["u1"]);
    let err = watcher.run().await.unwrap_err();
    assert!(err.to_string().contains("API key validation failed"));

    // No status polls, no notifications.
    assert!(hook.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn valid_key_reports_status_code() {
    let api = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .mount(&api)
        .await;

    let provider = HypixelClient::with_base_url("test-key", &api.uri(), TIMEOUT_MS).unwrap();
    assert_eq!(provider.validate_key().await.unwrap(), 200);
}

#[tokio::test]
async fn webhook_failure_does_not_abort_cycle() {
    let api = MockServer::start().await;
    let hook = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/webhook"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&hook)
        .await;
    Mock::given(method("GET"))
        .and(path("/status"))
        .and(query_param("uuid", "u1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(online_session("PIT", None)))
        .mount(&api)
        .await;
    Mock::given(method("GET"))
        .and(path("/status"))
        .and(query_param("uuid", "u2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(offline_session()))
        .mount(&api)
        .await;

    let watcher = watcher_against(&api, &hook, &["u1", "u2"]);
    let mut cache = StateCache::new();
    let stats = watcher.cycle(&mut cache).await;

    // Both deliveries were attempted and refused; state is still cached.
    assert_eq!(stats.notified, 0);
    assert_eq!(stats.polled, 2);
    assert_eq!(cache.len(), 2);
    assert_eq!(hook.received_requests().await.unwrap().len(), 2);
}
