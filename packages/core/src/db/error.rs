//! Database Error Types
//!
//! This module defines error types for document store operations, covering
//! configuration, connectivity and query failures.

use thiserror::Error;

/// Document store operation errors
///
/// Configuration errors surface before a connection exists, connectivity
/// errors come from the driver, and query errors come from malformed
/// filters, change sets or records.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Connection string environment variable is missing or blank
    #[error("Missing connection string: set the {var} environment variable")]
    MissingConnectionString { var: &'static str },

    /// Connection string could not be parsed or uses an unsupported scheme
    #[error("Invalid connection string {url}: {reason}")]
    InvalidConnectionString { url: String, reason: String },

    /// Failed to establish the store connection or sign in
    #[error("Failed to connect to document store at {url}: {source}")]
    ConnectionFailed {
        url: String,
        #[source]
        source: surrealdb::Error,
    },

    /// Collection name is not a plain identifier
    #[error("Invalid collection name: {name:?}")]
    InvalidCollection { name: String },

    /// Field name rejected in a filter, change set or record
    #[error("Invalid field {field:?}: {reason}")]
    InvalidField { field: String, reason: &'static str },

    /// Value passed where a JSON object was required
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// Update called with no fields to set
    #[error("Change set is empty")]
    EmptyChanges,

    /// Statement rejected by the store
    #[error("Query failed: {context}: {source}")]
    QueryFailed {
        context: String,
        #[source]
        source: surrealdb::Error,
    },
}

impl DatabaseError {
    /// Create an invalid connection string error
    pub fn invalid_connection_string(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConnectionString {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Create a connection failed error
    pub fn connection_failed(url: impl Into<String>, source: surrealdb::Error) -> Self {
        Self::ConnectionFailed {
            url: url.into(),
            source,
        }
    }

    /// Create an invalid field error
    pub fn invalid_field(field: impl Into<String>, reason: &'static str) -> Self {
        Self::InvalidField {
            field: field.into(),
            reason,
        }
    }

    /// Create a query failed error with context
    pub fn query_failed(context: impl Into<String>, source: surrealdb::Error) -> Self {
        Self::QueryFailed {
            context: context.into(),
            source,
        }
    }

    /// Whether this error came from configuration rather than the store
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::MissingConnectionString { .. } | Self::InvalidConnectionString { .. }
        )
    }
}

/// Attaches statement context to driver results
pub(crate) trait QueryContext<T> {
    fn query_context(self, context: &str) -> Result<T, DatabaseError>;
}

impl<T> QueryContext<T> for Result<T, surrealdb::Error> {
    fn query_context(self, context: &str) -> Result<T, DatabaseError> {
        self.map_err(|source| DatabaseError::query_failed(context, source))
    }
}
