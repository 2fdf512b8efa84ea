//! Scoped database connection client.
//!
//! Wraps a single `PgConnection` with an explicit open/execute/close
//! lifecycle. The repository layer closes the client at the end of
//! every operation, success or failure, rather than relying on drop
//! timing.

use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::Query;
use sqlx::{Connection, PgConnection, Postgres};
use tracing::warn;

use crate::config::DbConfig;
use crate::error::{DbError, DbResult};

/// A single database connection with explicit lifecycle.
pub struct DbClient {
    conn: Option<PgConnection>,
}

impl DbClient {
    /// Establish a connection with the given credentials.
    ///
    /// Any driver-level failure (bad credentials, unreachable host)
    /// surfaces as a single [`DbError::Connect`].
    pub async fn connect(config: &DbConfig) -> DbResult<Self> {
        let conn = PgConnection::connect_with(&config.connect_options())
            .await
            .map_err(DbError::Connect)?;

        Ok(Self { conn: Some(conn) })
    }

    /// Whether the connection is currently open.
    pub fn is_open(&self) -> bool {
        self.conn.is_some()
    }

    /// Run a bound query and collect all result rows.
    ///
    /// Fails with [`DbError::NotConnected`] after `close`, and with
    /// [`DbError::Query`] when execution itself fails.
    pub async fn fetch_all(
        &mut self,
        query: Query<'_, Postgres, PgArguments>,
    ) -> DbResult<Vec<PgRow>> {
        let conn = self.conn.as_mut().ok_or(DbError::NotConnected)?;
        query.fetch_all(&mut *conn).await.map_err(DbError::Query)
    }

    /// Close the connection. Idempotent: safe to call on an already
    /// closed client.
    pub async fn close(&mut self) {
        if let Some(conn) = self.conn.take() {
            if let Err(err) = conn.close().await {
                warn!(error = %err, "error closing database connection");
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn disconnected() -> Self {
        Self { conn: None }
    }
}
