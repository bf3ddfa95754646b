//! Contract run against `MongoMovieStore`.
//!
//! Skipped unless `MOVIES_TEST_MONGO_URI` points at a server. Each case gets
//! its own collection in the `movie_service_test` database, dropped before
//! the case starts.

use std::sync::Arc;

use mongodb::bson::Document;
use mongodb::Client;
use movie_service::{HealthProbe, MongoMovieStore, Movie, MovieStore, StoreError};

const URI_ENV: &str = "MOVIES_TEST_MONGO_URI";
const DATABASE: &str = "movie_service_test";

fn uri() -> Option<String> {
    match std::env::var(URI_ENV) {
        Ok(uri) if !uri.is_empty() => Some(uri),
        _ => None,
    }
}

/// Drop `collection` and open a fresh store over it.
async fn connect(uri: &str, collection: &str) -> MongoMovieStore {
    let client = Client::with_uri_str(uri).await.unwrap();
    client
        .database(DATABASE)
        .collection::<Document>(collection)
        .drop()
        .await
        .unwrap();
    MongoMovieStore::connect(HealthProbe::new(uri), uri, DATABASE, collection)
        .await
        .unwrap()
}

async fn store(case: &str) -> Option<Arc<dyn MovieStore>> {
    let Some(uri) = uri() else {
        eprintln!("{URI_ENV} not set, skipping mongo case {case}");
        return None;
    };
    Some(Arc::new(connect(&uri, &format!("movies_{case}")).await))
}

all_contract_cases!(store);

// ============================================================================
// Backend-specific behaviour
// ============================================================================

#[tokio::test]
async fn unique_index_on_id_is_created() {
    let Some(uri) = uri() else {
        eprintln!("{URI_ENV} not set, skipping unique_index_on_id_is_created");
        return;
    };
    connect(&uri, "movies_unique_index").await;

    let client = Client::with_uri_str(&uri).await.unwrap();
    let collection = client
        .database(DATABASE)
        .collection::<Document>("movies_unique_index");
    let names = collection.list_index_names().await.unwrap();
    assert!(names.iter().any(|n| n == "id_1"), "{names:?}");

    // The server itself rejects a second document with the same id.
    collection
        .insert_one(mongodb::bson::doc! { "id": "m1" })
        .await
        .unwrap();
    assert!(collection
        .insert_one(mongodb::bson::doc! { "id": "m1" })
        .await
        .is_err());
}

#[tokio::test]
async fn duplicate_key_from_server_is_conflict() {
    let Some(uri) = uri() else {
        eprintln!("{URI_ENV} not set, skipping duplicate_key_from_server_is_conflict");
        return;
    };
    let store = connect(&uri, "movies_duplicate_key").await;

    store.create(Movie::new("m1", "A")).await.unwrap();
    assert_eq!(
        store.create(Movie::new("m1", "B")).await,
        Err(StoreError::Conflict("m1".to_string()))
    );
}

#[tokio::test]
async fn health_check_lists_databases() {
    let Some(uri) = uri() else {
        eprintln!("{URI_ENV} not set, skipping health_check_lists_databases");
        return;
    };
    let store = connect(&uri, "movies_health").await;

    let message = store.check_health().await.unwrap();
    assert!(message.starts_with("MongoDB reachable. Databases:"), "{message}");
    assert!(message.contains(DATABASE), "{message}");
}
