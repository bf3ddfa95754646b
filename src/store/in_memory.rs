//! InMemoryMovieStore - ordered, lock-guarded list of movies for development
//! and testing.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;

#[cfg(feature = "mongo")]
use crate::health::HealthProbe;
use crate::movie::Movie;

use super::{MovieStore, StoreError, DELETED_MESSAGE};

/// In-memory movie store backed by a `Vec`.
///
/// Every operation runs its check and its modification under a single lock
/// scope. Clone-friendly via Arc; clones share the same list.
#[derive(Clone, Default)]
pub struct InMemoryMovieStore {
    movies: Arc<RwLock<Vec<Movie>>>,
    #[cfg(feature = "mongo")]
    probe: Option<HealthProbe>,
}

impl InMemoryMovieStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a connectivity probe used by `check_health`.
    #[cfg(feature = "mongo")]
    pub fn with_probe(mut self, probe: HealthProbe) -> Self {
        self.probe = Some(probe);
        self
    }

    /// Number of stored movies.
    pub fn len(&self) -> Result<usize, StoreError> {
        let movies = self
            .movies
            .read()
            .map_err(|_| StoreError::LockPoisoned("read"))?;
        Ok(movies.len())
    }

    /// Whether the store holds no movies.
    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

#[async_trait]
impl MovieStore for InMemoryMovieStore {
    async fn check_health(&self) -> Result<String, StoreError> {
        #[cfg(feature = "mongo")]
        {
            if let Some(probe) = &self.probe {
                return probe.check().await;
            }
        }
        Ok(format!(
            "In-memory movie store active ({} movies), no database configured.",
            self.len()?
        ))
    }

    async fn create(&self, movie: Movie) -> Result<Movie, StoreError> {
        if movie.id.is_empty() {
            return Err(StoreError::Conflict(movie.id));
        }

        let mut movies = self
            .movies
            .write()
            .map_err(|_| StoreError::LockPoisoned("write"))?;

        if movies.iter().any(|m| m.id == movie.id) {
            return Err(StoreError::Conflict(movie.id));
        }

        movies.push(movie.clone());
        tracing::debug!(id = %movie.id, "movie created");
        Ok(movie)
    }

    async fn list_all(&self) -> Result<Vec<Movie>, StoreError> {
        let movies = self
            .movies
            .read()
            .map_err(|_| StoreError::LockPoisoned("read"))?;
        Ok(movies.clone())
    }

    async fn get_by_id(&self, id: &str) -> Result<Movie, StoreError> {
        if id.is_empty() {
            return Err(StoreError::NotFound(id.to_string()));
        }

        let movies = self
            .movies
            .read()
            .map_err(|_| StoreError::LockPoisoned("read"))?;

        movies
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn update_by_id(&self, id: &str, movie: Movie) -> Result<Movie, StoreError> {
        if id.is_empty() {
            return Err(StoreError::NotFound(id.to_string()));
        }

        let mut movies = self
            .movies
            .write()
            .map_err(|_| StoreError::LockPoisoned("write"))?;

        let existing = movies
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        existing.apply_update(movie);
        tracing::debug!(id, "movie updated");
        Ok(existing.clone())
    }

    async fn remove_by_id(&self, id: &str) -> Result<String, StoreError> {
        if id.is_empty() {
            return Err(StoreError::NotFound(id.to_string()));
        }

        let mut movies = self
            .movies
            .write()
            .map_err(|_| StoreError::LockPoisoned("write"))?;

        let index = movies
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        movies.remove(index);
        tracing::debug!(id, "movie removed");
        Ok(DELETED_MESSAGE.to_string())
    }
}
