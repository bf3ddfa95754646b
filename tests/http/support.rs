//! Test harness: a server over a fresh in-memory store.

use std::sync::Arc;

use movie_service::http::{self, SharedStore};
use movie_service::InMemoryMovieStore;
use serde_json::{json, Value};

pub struct TestServer {
    pub base: String,
    pub client: reqwest::Client,
    pub store: InMemoryMovieStore,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }
}

/// Bind to port 0 and serve `store`; returns the base URL.
pub async fn start_server_with(store: SharedStore) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        http::serve(store, listener, std::future::pending()).await.unwrap();
    });
    format!("http://{addr}")
}

/// Serve a fresh in-memory store. The store handle shares storage with the
/// server, so tests can inspect it directly.
pub async fn start_server() -> TestServer {
    let store = InMemoryMovieStore::new();
    let base = start_server_with(Arc::new(store.clone())).await;
    TestServer {
        base,
        client: reqwest::Client::new(),
        store,
    }
}

pub fn movie_json(id: &str, title: &str, year: i32) -> Value {
    json!({
        "id": id,
        "title": title,
        "year": year,
        "summary": "",
        "actors": []
    })
}
