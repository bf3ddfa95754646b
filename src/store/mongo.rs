//! MongoMovieStore - movie records in a MongoDB collection.
//!
//! Documents are keyed by the `id` field. A unique index on `id` is created
//! on connect; inserting a duplicate is rejected by the server and reported
//! as a conflict, so uniqueness holds under concurrent creates.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::IndexOptions;
use mongodb::{Client, Collection, IndexModel};

use crate::health::HealthProbe;
use crate::movie::Movie;

use super::{MovieStore, StoreError, DELETED_MESSAGE};

/// Server error code for a unique index violation.
const DUPLICATE_KEY: i32 = 11000;

/// MongoDB-backed movie store.
///
/// Clone-friendly: the driver's `Client` and `Collection` are handles.
#[derive(Clone)]
pub struct MongoMovieStore {
    collection: Collection<Movie>,
    probe: HealthProbe,
}

impl MongoMovieStore {
    /// Connect to `database`.`collection` and ensure the unique `id` index.
    pub async fn connect(
        probe: HealthProbe,
        connection_string: &str,
        database: &str,
        collection: &str,
    ) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(connection_string).await?;
        let collection = client.database(database).collection::<Movie>(collection);
        let store = Self::from_collection(collection, probe);
        store.ensure_unique_id().await?;
        tracing::info!(
            database,
            collection = store.collection.name(),
            "connected to movie collection"
        );
        Ok(store)
    }

    /// Wrap an existing collection handle. No index is created.
    pub fn from_collection(collection: Collection<Movie>, probe: HealthProbe) -> Self {
        Self { collection, probe }
    }

    async fn ensure_unique_id(&self) -> Result<(), StoreError> {
        let index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.collection.create_index(index).await?;
        Ok(())
    }
}

#[async_trait]
impl MovieStore for MongoMovieStore {
    async fn check_health(&self) -> Result<String, StoreError> {
        self.probe.check().await
    }

    async fn create(&self, movie: Movie) -> Result<Movie, StoreError> {
        if movie.id.is_empty() {
            return Err(StoreError::Conflict(movie.id));
        }

        match self.collection.insert_one(&movie).await {
            Ok(_) => Ok(movie),
            Err(err) if is_duplicate_key(&err) => Err(StoreError::Conflict(movie.id)),
            Err(err) => Err(err.into()),
        }
    }

    async fn list_all(&self) -> Result<Vec<Movie>, StoreError> {
        let cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { "_id": 1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn get_by_id(&self, id: &str) -> Result<Movie, StoreError> {
        if id.is_empty() {
            return Err(StoreError::NotFound(id.to_string()));
        }

        self.collection
            .find_one(doc! { "id": id })
            .await?
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn update_by_id(&self, id: &str, movie: Movie) -> Result<Movie, StoreError> {
        if id.is_empty() {
            return Err(StoreError::NotFound(id.to_string()));
        }

        let movie = Movie {
            id: id.to_string(),
            ..movie
        };
        let result = self
            .collection
            .replace_one(doc! { "id": id }, &movie)
            .await?;

        if result.matched_count == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(movie)
    }

    async fn remove_by_id(&self, id: &str) -> Result<String, StoreError> {
        if id.is_empty() {
            return Err(StoreError::NotFound(id.to_string()));
        }

        let result = self.collection.delete_one(doc! { "id": id }).await?;
        if result.deleted_count == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(DELETED_MESSAGE.to_string())
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == DUPLICATE_KEY
    )
}
