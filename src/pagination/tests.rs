//! Tests for the pagination module

use super::*;
use crate::http::{HttpClient, HttpClientConfig};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn jobs_page(count: usize, offset: usize) -> serde_json::Value {
    let records: Vec<_> = (0..count)
        .map(|i| json!({"id": offset + i, "updated_at": "2021-01-01T00:00:00Z"}))
        .collect();
    json!({ "jobs": records })
}

fn client(base_url: &str) -> HttpClient {
    HttpClient::new(HttpClientConfig::new(base_url)).unwrap()
}

#[tokio::test]
async fn test_three_pages_short_page_terminates() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/jobs"))
        .and(query_param("page", "1"))
        .and(query_param("per", "50"))
        .and(query_param("token", "tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(jobs_page(50, 0)))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/jobs"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(jobs_page(50, 50)))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/jobs"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(jobs_page(37, 100)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let http = client(&mock_server.uri());
    let mut pages = RecordPages::new(&http, "jobs", Default::default(), "tok");

    let mut total = 0;
    let mut requests = 0;
    while let Some(records) = pages.next_page().await.unwrap() {
        total += records.len();
        requests += 1;
    }

    assert_eq!(total, 137);
    assert_eq!(requests, 3);
}

#[tokio::test]
async fn test_empty_first_page_single_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"users": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let http = client(&mock_server.uri());
    let mut pages = RecordPages::new(&http, "users", Default::default(), "tok");

    let first = pages.next_page().await.unwrap().unwrap();
    assert!(first.is_empty());
    assert!(pages.next_page().await.unwrap().is_none());
}

#[tokio::test]
async fn test_caller_params_preserved_across_pages() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/jobs"))
        .and(query_param("state", "completed"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(jobs_page(50, 0)))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/jobs"))
        .and(query_param("state", "completed"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(jobs_page(0, 50)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let http = client(&mock_server.uri());
    let params =
        std::collections::HashMap::from([("state".to_string(), "completed".to_string())]);
    let mut pages = RecordPages::new(&http, "jobs", params, "tok");

    let mut total = 0;
    while let Some(records) = pages.next_page().await.unwrap() {
        total += records.len();
    }
    assert_eq!(total, 50);
}

#[tokio::test]
async fn test_missing_envelope_key_is_an_error() {
    let mock_server = MockServer::start().await;

    // 200 with the wrong shape must not read as an empty resource
    Mock::given(method("GET"))
        .and(path("/jobs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": "upstream changed response shape"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let http = client(&mock_server.uri());
    let mut pages = RecordPages::new(&http, "jobs", Default::default(), "tok");

    let err = pages.next_page().await.unwrap_err();
    assert!(matches!(err, crate::error::Error::Schema { .. }));
    assert!(err.to_string().contains("jobs"));
}

#[tokio::test]
async fn test_non_array_envelope_value_is_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"users": "nope"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let http = client(&mock_server.uri());
    let mut pages = RecordPages::new(&http, "users", Default::default(), "tok");

    assert!(pages.next_page().await.is_err());
}

#[tokio::test]
async fn test_exhausted_walker_stays_done() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/jobs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(jobs_page(3, 0)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let http = client(&mock_server.uri());
    let mut pages = RecordPages::new(&http, "jobs", Default::default(), "tok");

    assert_eq!(pages.next_page().await.unwrap().unwrap().len(), 3);
    assert!(pages.next_page().await.unwrap().is_none());
    assert!(pages.next_page().await.unwrap().is_none());
}
