//! movie_service - CRUD HTTP service for movie records.
//!
//! One [`MovieStore`] contract, two backends:
//!
//! - [`InMemoryMovieStore`]: ordered list in process memory.
//! - [`MongoMovieStore`]: MongoDB collection keyed by `id` (`mongo` feature).
//!
//! The [`http`] module (`http` feature) exposes the store over axum routes;
//! [`app`] picks the backend from [`config::Settings`] and runs the server.

pub mod app;
pub mod config;
#[cfg(feature = "mongo")]
pub mod health;
#[cfg(feature = "http")]
pub mod http;
mod movie;
pub mod store;
pub mod telemetry;

pub use app::{build_store, AppError};
pub use config::{Backend, ConfigError, Settings};
#[cfg(feature = "mongo")]
pub use health::HealthProbe;
pub use movie::Movie;
#[cfg(feature = "mongo")]
pub use store::MongoMovieStore;
pub use store::{InMemoryMovieStore, MovieStore, StoreError, DELETED_MESSAGE};
