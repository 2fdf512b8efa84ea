//! Structured error types for widgetstore-core.
//!
//! All three variants are terminal for the current request: no retry,
//! no partial results. Callers distinguish "no widgets found"
//! (`Ok(vec![])`) from failure (`Err(DbError)`).

use thiserror::Error;

/// Database error type
#[derive(Debug, Error)]
pub enum DbError {
    /// Connection could not be established (bad credentials, unreachable host)
    #[error("failed to connect to database: {0}")]
    Connect(#[source] sqlx::Error),

    /// Operation attempted on a connection that is not open
    #[error("database connection is not open")]
    NotConnected,

    /// Statement execution failed (syntax, constraint, mid-query disconnect)
    #[error("query failed: {0}")]
    Query(#[source] sqlx::Error),
}

impl DbError {
    /// Generic message safe to show untrusted callers.
    ///
    /// The `Display` form carries driver detail (host names, SQL state)
    /// that belongs in the internal log, not in an external response.
    pub fn public_message(&self) -> &'static str {
        match self {
            DbError::Connect(_) => "database is unavailable",
            DbError::NotConnected => "database is unavailable",
            DbError::Query(_) => "database query failed",
        }
    }
}

pub type DbResult<T> = Result<T, DbError>;
