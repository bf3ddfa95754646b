//! MovieStore - the CRUD contract shared by every backend.
//!
//! Two implementations are provided:
//!
//! - [`InMemoryMovieStore`]: an ordered list in process memory.
//! - [`MongoMovieStore`]: a MongoDB collection keyed by the `id` field
//!   (requires the `mongo` feature).
//!
//! The HTTP layer only ever sees `Arc<dyn MovieStore>`, so the backend is
//! chosen once at startup.
//!
//! ## Example
//!
//! ```ignore
//! use movie_service::{InMemoryMovieStore, Movie, MovieStore};
//!
//! let store = InMemoryMovieStore::new();
//! store.create(Movie::new("m1", "Alien")).await?;
//! let movie = store.get_by_id("m1").await?;
//! ```

mod error;
mod in_memory;
#[cfg(feature = "mongo")]
mod mongo;

use async_trait::async_trait;

use crate::movie::Movie;

pub use error::StoreError;
pub use in_memory::InMemoryMovieStore;
#[cfg(feature = "mongo")]
pub use mongo::MongoMovieStore;

/// Message returned by a successful `remove_by_id`.
pub const DELETED_MESSAGE: &str = "Movie deleted successfully.";

/// CRUD storage for movie records plus a connectivity check.
#[async_trait]
pub trait MovieStore: Send + Sync {
    /// Probe the configured backing store and describe what is reachable.
    async fn check_health(&self) -> Result<String, StoreError>;

    /// Insert a new movie. Fails with `Conflict` if the id is empty or taken.
    async fn create(&self, movie: Movie) -> Result<Movie, StoreError>;

    /// Snapshot of all stored movies, in storage order.
    async fn list_all(&self) -> Result<Vec<Movie>, StoreError>;

    /// Get a movie by id.
    async fn get_by_id(&self, id: &str) -> Result<Movie, StoreError>;

    /// Overwrite title, year, summary and actors of an existing movie.
    /// The id of `movie` is ignored.
    async fn update_by_id(&self, id: &str, movie: Movie) -> Result<Movie, StoreError>;

    /// Delete a movie by id, returning a confirmation message.
    async fn remove_by_id(&self, id: &str) -> Result<String, StoreError>;
}
