//! Process-wide document store client
//!
//! One `DocumentClient` is opened at startup and handed to every
//! [`Database`](super::Database) by reference. Clones share the same
//! underlying connection.

use super::config::{Engine, StoreConfig};
use super::error::{DatabaseError, QueryContext};
use std::sync::Arc;
use surrealdb::engine::any::{self, Any};
use surrealdb::opt::auth::Root;
use surrealdb::Surreal;

/// Shared connection to the document store
#[derive(Clone)]
pub struct DocumentClient {
    db: Arc<Surreal<Any>>,
    config: Arc<StoreConfig>,
}

impl DocumentClient {
    /// Open the connection described by `config`
    ///
    /// Signs in when the connection string carried credentials, then selects
    /// the fixed namespace and database.
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::ConnectionFailed`] if the engine cannot be
    /// reached, the sign-in is refused or the namespace cannot be selected.
    pub async fn connect(config: &StoreConfig) -> Result<Self, DatabaseError> {
        let url = config.redacted_url().to_string();

        let db = any::connect(config.endpoint())
            .await
            .map_err(|e| DatabaseError::connection_failed(&url, e))?;

        if let Some(credentials) = config.credentials() {
            db.signin(Root {
                username: &credentials.username,
                password: &credentials.password,
            })
            .await
            .map_err(|e| DatabaseError::connection_failed(&url, e))?;
        }

        db.use_ns(config.namespace())
            .use_db(config.database())
            .await
            .map_err(|e| DatabaseError::connection_failed(&url, e))?;

        tracing::info!(
            url = %url,
            namespace = config.namespace(),
            database = config.database(),
            "Connected to document store"
        );

        Ok(Self {
            db: Arc::new(db),
            config: Arc::new(config.clone()),
        })
    }

    /// Connect using the `DB_URL` environment variable
    pub async fn from_env() -> Result<Self, DatabaseError> {
        let config = StoreConfig::from_env()?;
        Self::connect(&config).await
    }

    /// Open a fresh embedded in-memory store
    pub async fn in_memory() -> Result<Self, DatabaseError> {
        let config = StoreConfig::new("mem://")?;
        Self::connect(&config).await
    }

    /// Raw driver handle
    pub fn db(&self) -> &Surreal<Any> {
        &self.db
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Explicit teardown
    ///
    /// Ends the authenticated session for remote engines. The connection
    /// itself closes once the last clone is dropped.
    pub async fn shutdown(self) -> Result<(), DatabaseError> {
        if matches!(self.config.engine(), Engine::Remote { .. })
            && self.config.credentials().is_some()
        {
            self.db
                .invalidate()
                .await
                .query_context("Failed to invalidate session")?;
        }

        tracing::info!(url = %self.config.redacted_url(), "Document store client shut down");
        Ok(())
    }
}
