//! HealthProbe - bounded-time connectivity check against a MongoDB cluster.
//!
//! Every check builds a fresh client from the connection string, so the
//! connection handshake is part of what gets probed.

use std::time::Duration;

use mongodb::error::ErrorKind;
use mongodb::options::ClientOptions;
use mongodb::Client;

use crate::store::StoreError;

/// Default bound for a single health check.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Probes a MongoDB cluster by listing its database names.
#[derive(Clone)]
pub struct HealthProbe {
    connection_string: String,
    timeout: Duration,
}

impl HealthProbe {
    pub fn new(connection_string: impl Into<String>) -> Self {
        Self {
            connection_string: connection_string.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the time bound (builder style).
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Run the probe.
    ///
    /// Returns a message listing the reachable databases. An elapsed bound or
    /// a driver server-selection timeout yields `StoreError::Timeout`; every
    /// other failure yields `StoreError::Unavailable`.
    pub async fn check(&self) -> Result<String, StoreError> {
        match tokio::time::timeout(self.timeout, self.list_database_names()).await {
            Ok(Ok(names)) => Ok(format!(
                "MongoDB reachable. Databases: {}",
                names.join(", ")
            )),
            Ok(Err(err)) => {
                let err = classify(err);
                tracing::warn!(error = %err, "health check failed");
                Err(err)
            }
            Err(_) => {
                tracing::warn!(timeout = ?self.timeout, "health check timed out");
                Err(StoreError::Timeout(format!(
                    "no response within {} ms",
                    self.timeout.as_millis()
                )))
            }
        }
    }

    async fn list_database_names(&self) -> mongodb::error::Result<Vec<String>> {
        let mut options = ClientOptions::parse(&self.connection_string).await?;
        options.server_selection_timeout = Some(self.timeout);
        options.connect_timeout = Some(self.timeout);
        let client = Client::with_options(options)?;
        client.list_database_names().await
    }
}

fn classify(err: mongodb::error::Error) -> StoreError {
    match err.kind.as_ref() {
        ErrorKind::ServerSelection { .. } => StoreError::Timeout(err.to_string()),
        _ => StoreError::Unavailable(err.to_string()),
    }
}
