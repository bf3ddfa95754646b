//! Contract run against `InMemoryMovieStore`.

use std::sync::Arc;

use movie_service::{InMemoryMovieStore, MovieStore};

async fn store(_case: &str) -> Option<Arc<dyn MovieStore>> {
    Some(Arc::new(InMemoryMovieStore::new()))
}

all_contract_cases!(store);
