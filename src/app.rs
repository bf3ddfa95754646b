//! Startup wiring: pick the configured backend and serve it over HTTP.

use std::sync::Arc;

use thiserror::Error;

use crate::config::{Backend, ConfigError, Settings};
#[cfg(feature = "mongo")]
use crate::health::HealthProbe;
#[cfg(feature = "mongo")]
use crate::store::MongoMovieStore;
use crate::store::{InMemoryMovieStore, MovieStore, StoreError};

/// Errors that stop the service from starting.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("backend '{0}' requires database_settings.connection_string")]
    MissingConnectionString(Backend),
    #[error("backend '{0}' is not compiled in (enable the `mongo` feature)")]
    BackendDisabled(Backend),
    #[error("failed to open movie store: {0}")]
    Store(#[from] StoreError),
    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Build the store selected by `settings.store.backend`.
pub async fn build_store(settings: &Settings) -> Result<Arc<dyn MovieStore>, AppError> {
    let backend = settings.store.backend;
    let db = &settings.database_settings;

    match backend {
        Backend::Memory => {
            #[allow(unused_mut)]
            let mut store = InMemoryMovieStore::new();
            #[cfg(feature = "mongo")]
            {
                if let Some(connection_string) = &db.connection_string {
                    store = store.with_probe(
                        HealthProbe::new(connection_string).with_timeout(db.health_timeout()),
                    );
                }
            }
            tracing::info!(%backend, "using in-memory movie store");
            Ok(Arc::new(store))
        }
        #[cfg(feature = "mongo")]
        Backend::Mongo => {
            let connection_string = db
                .connection_string
                .as_deref()
                .ok_or(AppError::MissingConnectionString(backend))?;
            let probe = HealthProbe::new(connection_string).with_timeout(db.health_timeout());
            let store = MongoMovieStore::connect(
                probe,
                connection_string,
                &db.database_name,
                &db.collection_name,
            )
            .await?;
            Ok(Arc::new(store))
        }
        #[cfg(not(feature = "mongo"))]
        Backend::Mongo => {
            let _ = db;
            Err(AppError::BackendDisabled(backend))
        }
    }
}

/// Build the store and serve HTTP until ctrl-c.
#[cfg(feature = "http")]
pub async fn run(settings: Settings) -> Result<(), AppError> {
    let store = build_store(&settings).await?;
    let listener = tokio::net::TcpListener::bind(&settings.server.bind).await?;
    crate::http::serve(store, listener, shutdown_signal()).await?;
    Ok(())
}

#[cfg(feature = "http")]
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
