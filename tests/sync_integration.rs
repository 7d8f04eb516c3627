//! End-to-end sync tests against a mock Wonolo API
//!
//! Exercises the full flow through the public API: config file with no
//! stored token, authentication, paginated extraction, bookmark
//! persistence, and the emitted message stream.

use chrono::{Duration, Utc};
use serde_json::{json, Value};
use tap_wonolo::auth::AuthManager;
use tap_wonolo::config::{ConfigStore, TapConfig};
use tap_wonolo::engine::SyncEngine;
use tap_wonolo::http::{HttpClient, HttpClientConfig};
use tap_wonolo::output::MessageWriter;
use tap_wonolo::state::StateManager;
use tap_wonolo::streams::{self, TapStream};
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn write_config(dir: &tempfile::TempDir, config: &Value) -> std::path::PathBuf {
    let config_path = dir.path().join("config.json");
    std::fs::write(&config_path, serde_json::to_string_pretty(config).unwrap()).unwrap();
    config_path
}

fn future_timestamp() -> String {
    (Utc::now() + Duration::hours(1))
        .format("%Y-%m-%dT%H:%M:%SZ")
        .to_string()
}

fn parse_messages(buf: Vec<u8>) -> Vec<Value> {
    String::from_utf8(buf)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[tokio::test]
async fn test_first_sync_authenticates_and_advances_bookmark() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    // Config carries credentials only, no stored token
    let config_path = write_config(
        &dir,
        &json!({
            "api_key": "key-123",
            "secret_key": "secret-456",
            "environment": "test"
        }),
    );

    Mock::given(method("POST"))
        .and(path("/authenticate"))
        .and(body_string_contains("api_key=key-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "fresh-token",
            "expires_at": future_timestamp()
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    // One short page of two records terminates pagination
    Mock::given(method("GET"))
        .and(path("/jobs"))
        .and(query_param("token", "fresh-token"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jobs": [
                {"id": 1, "state": "open", "updated_at": "2021-01-01T00:00:00Z"},
                {"id": 2, "state": "filled", "updated_at": "2021-01-02T00:00:00Z"}
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = ConfigStore::open(&config_path).unwrap();
    let config = store.config().clone();

    let http = HttpClient::new(HttpClientConfig::new(mock_server.uri())).unwrap();
    let auth = AuthManager::new(store);
    let state_path = dir.path().join("state.json");
    let state = StateManager::from_file(&state_path).unwrap();
    let writer = MessageWriter::new(Vec::new());

    let jobs = TapStream::from_config(streams::find("jobs").unwrap(), &config).unwrap();
    let mut engine = SyncEngine::new(http, auth, state, writer);
    let stats = engine.sync(&[jobs]).await.unwrap();

    assert_eq!(stats.records_synced, 2);
    assert_eq!(stats.streams_synced, 1);

    // Bookmark lands on the newest record seen
    assert_eq!(
        engine.state().get_bookmark("jobs"),
        Some("2021-01-02T00:00:00Z")
    );

    let messages = parse_messages(engine.into_writer().into_inner());
    let records: Vec<&Value> = messages
        .iter()
        .filter(|m| m["type"] == "RECORD")
        .collect();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["stream"], "jobs");
    assert_eq!(records[0]["record"]["id"], 1);
    assert_eq!(records[1]["record"]["updated_at"], "2021-01-02T00:00:00Z");

    // Bookmark and cleared marker survive in the state file
    let persisted: Value =
        serde_json::from_str(&std::fs::read_to_string(&state_path).unwrap()).unwrap();
    assert_eq!(persisted["bookmarks"]["jobs"], "2021-01-02T00:00:00Z");
    assert!(persisted.get("currently_syncing").is_none());

    // Refreshed token was written back to the config file
    let saved = TapConfig::from_file(&config_path).unwrap();
    assert_eq!(saved.auth_token.as_deref(), Some("fresh-token"));
}

#[tokio::test]
async fn test_resumed_sync_filters_on_stored_bookmark() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    let config_path = write_config(
        &dir,
        &json!({
            "api_key": "key-123",
            "secret_key": "secret-456",
            "environment": "test",
            "auth_token": "cached-token",
            "auth_token_expires_at": future_timestamp()
        }),
    );

    // The stored bookmark rides along as the incremental filter
    Mock::given(method("GET"))
        .and(path("/jobs"))
        .and(query_param("updated_after", "2021-01-02T00:00:00Z"))
        .and(query_param("token", "cached-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jobs": [
                {"id": 3, "state": "open", "updated_at": "2021-01-03T00:00:00Z"}
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = ConfigStore::open(&config_path).unwrap();
    let config = store.config().clone();

    let state_path = dir.path().join("state.json");
    std::fs::write(
        &state_path,
        json!({"bookmarks": {"jobs": "2021-01-02T00:00:00Z"}}).to_string(),
    )
    .unwrap();

    let http = HttpClient::new(HttpClientConfig::new(mock_server.uri())).unwrap();
    let auth = AuthManager::new(store);
    let state = StateManager::from_file(&state_path).unwrap();
    let writer = MessageWriter::new(Vec::new());

    let jobs = TapStream::from_config(streams::find("jobs").unwrap(), &config).unwrap();
    let mut engine = SyncEngine::new(http, auth, state, writer);
    let stats = engine.sync(&[jobs]).await.unwrap();

    assert_eq!(stats.records_synced, 1);
    assert_eq!(
        engine.state().get_bookmark("jobs"),
        Some("2021-01-03T00:00:00Z")
    );
}

#[tokio::test]
async fn test_expired_401_aborts_without_retry() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    let config_path = write_config(
        &dir,
        &json!({
            "api_key": "bad-key",
            "secret_key": "bad-secret",
            "environment": "test"
        }),
    );

    Mock::given(method("POST"))
        .and(path("/authenticate"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid credentials"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = ConfigStore::open(&config_path).unwrap();
    let config = store.config().clone();

    let http = HttpClient::new(HttpClientConfig::new(mock_server.uri())).unwrap();
    let auth = AuthManager::new(store);
    let state = StateManager::in_memory();
    let writer = MessageWriter::new(Vec::new());

    let jobs = TapStream::from_config(streams::find("jobs").unwrap(), &config).unwrap();
    let mut engine = SyncEngine::new(http, auth, state, writer);
    let err = engine.sync(&[jobs]).await.unwrap_err();
    assert!(err.is_fatal());

    let messages = parse_messages(engine.into_writer().into_inner());
    assert!(messages.iter().all(|m| m["type"] != "RECORD"));
}
