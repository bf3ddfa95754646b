//! Greeting and health check routes.

use std::sync::Arc;
use std::time::Duration;

use movie_service::{HealthProbe, InMemoryMovieStore};

use crate::support::{start_server, start_server_with};

#[tokio::test]
async fn root_greets() {
    let server = start_server().await;
    let resp = server.client.get(server.url("/")).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "Hello World!");
}

#[tokio::test]
async fn check_without_database_is_ok() {
    let server = start_server().await;
    let resp = server.client.get(server.url("/check")).send().await.unwrap();
    assert_eq!(resp.status(), 200);

    let body: String = resp.json().await.unwrap();
    assert!(body.contains("In-memory"));
}

#[tokio::test]
async fn check_bad_connection_string_is_problem() {
    let store = InMemoryMovieStore::new().with_probe(HealthProbe::new("not-a-connection-string"));
    let base = start_server_with(Arc::new(store)).await;

    let resp = reqwest::get(format!("{base}/check")).await.unwrap();
    assert_eq!(resp.status(), 500);
    assert_eq!(
        resp.headers()["content-type"],
        "application/problem+json"
    );

    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["status"], 500);
    let detail = body["detail"].as_str().unwrap();
    assert!(detail.starts_with("Error accessing MongoDB"), "{detail}");
}

#[tokio::test]
async fn check_unreachable_database_reports_timeout() {
    let probe = HealthProbe::new("mongodb://192.0.2.1:27017/?directConnection=true")
        .with_timeout(Duration::from_millis(200));
    let store = InMemoryMovieStore::new().with_probe(probe);
    let base = start_server_with(Arc::new(store)).await;

    let resp = reqwest::get(format!("{base}/check")).await.unwrap();
    assert_eq!(resp.status(), 500);

    let body: serde_json::Value = resp.json().await.unwrap();
    let detail = body["detail"].as_str().unwrap();
    assert!(detail.starts_with("Error: timeout accessing MongoDB"), "{detail}");
}
