//! HTTP transport - maps the movie routes onto a [`MovieStore`].
//!
//! Requires the `http` feature. Uses axum for routing.
//!
//! ## Routes
//!
//! - `GET /` - static greeting.
//! - `GET /check` - health check of the configured database.
//! - `POST /api/movies` - create a movie (JSON body).
//! - `GET /api/movies` - list all movies.
//! - `GET /api/movies/:id` - get one movie.
//! - `PUT /api/movies/:id` - replace title, year, summary and actors.
//! - `DELETE /api/movies/:id` - delete one movie.
//!
//! Handlers only forward to the store and translate its result: 200 on
//! success, 404 for `NotFound`, 409 for `Conflict`, and a 500
//! `application/problem+json` document for everything server side.

use std::future::Future;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use serde_json::json;
use tokio::net::TcpListener;

use crate::movie::Movie;
use crate::store::{MovieStore, StoreError};

/// Body of `GET /`.
pub const GREETING: &str = "Hello World!";

/// Shared handle to the store chosen at startup.
pub type SharedStore = Arc<dyn MovieStore>;

/// Build an axum `Router` serving the movie routes from `store`.
pub fn router(store: SharedStore) -> Router {
    Router::new()
        .route("/", get(greeting))
        .route("/check", get(check_handler))
        .route("/api/movies", get(list_handler).post(create_handler))
        .route(
            "/api/movies/:id",
            get(get_handler).put(update_handler).delete(remove_handler),
        )
        .with_state(store)
}

/// Serve the routes on `listener` until `shutdown` resolves.
///
/// In-flight requests are drained before returning.
pub async fn serve<F>(
    store: SharedStore,
    listener: TcpListener,
    shutdown: F,
) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = router(store);
    tracing::info!(addr = %listener.local_addr()?, "movie service listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    tracing::info!("movie service stopped");
    Ok(())
}

async fn greeting() -> &'static str {
    GREETING
}

/// `GET /check`
async fn check_handler(State(store): State<SharedStore>) -> Response {
    respond(store.check_health().await)
}

/// `POST /api/movies`
async fn create_handler(State(store): State<SharedStore>, Json(movie): Json<Movie>) -> Response {
    respond(store.create(movie).await)
}

/// `GET /api/movies`
async fn list_handler(State(store): State<SharedStore>) -> Response {
    respond(store.list_all().await)
}

/// `GET /api/movies/:id`
async fn get_handler(State(store): State<SharedStore>, Path(id): Path<String>) -> Response {
    respond(store.get_by_id(&id).await)
}

/// `PUT /api/movies/:id`
async fn update_handler(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
    Json(movie): Json<Movie>,
) -> Response {
    respond(store.update_by_id(&id, movie).await)
}

/// `DELETE /api/movies/:id`
async fn remove_handler(State(store): State<SharedStore>, Path(id): Path<String>) -> Response {
    respond(store.remove_by_id(&id).await)
}

fn respond<T: Serialize>(result: Result<T, StoreError>) -> Response {
    match result {
        Ok(value) => (StatusCode::OK, Json(value)).into_response(),
        Err(err) => error_response(err),
    }
}

/// Client errors carry the message as a JSON string; server errors become a
/// problem document.
fn error_response(err: StoreError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    if !err.is_problem() {
        tracing::debug!(error = ?err, %status, "request rejected");
        return (status, Json(err.to_string())).into_response();
    }

    tracing::error!(error = %err, "request failed");
    let body = json!({
        "type": "https://tools.ietf.org/html/rfc9110#section-15.6.1",
        "title": "An error occurred while processing your request.",
        "status": status.as_u16(),
        "detail": err.to_string(),
    });
    (
        status,
        [(header::CONTENT_TYPE, "application/problem+json")],
        Json(body),
    )
        .into_response()
}
