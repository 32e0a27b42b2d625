//! PostgreSQL connection setup and validation.
//!
//! Connect options are built field by field, so the password never passes
//! through a DSN string that could end up in an error message.

use super::PostgresSeeder;
use crate::config::DbOptions;
use crate::{Result, error::SeedbError};
use sqlx::Connection;
use sqlx::PgConnection;
use sqlx::postgres::PgConnectOptions;

/// Reported as `application_name` to the server.
const APPLICATION_NAME: &str = "seedb";

impl DbOptions {
    /// Builds sqlx connect options from these parameters.
    pub fn connect_options(&self) -> PgConnectOptions {
        let mut options = PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(self.user())
            .database(&self.database)
            .application_name(APPLICATION_NAME);

        if let Some(password) = self.credentials.password() {
            options = options.password(password);
        }

        options
    }
}

impl PostgresSeeder {
    /// Connects and pings the server.
    ///
    /// # Errors
    /// Returns [`SeedbError::Connection`] if the server is unreachable, the
    /// credentials are rejected, or the ping does not return `1`.
    pub async fn connect(options: &DbOptions) -> Result<Self> {
        tracing::debug!("Connecting to {}", options.redacted_url());

        let mut conn = PgConnection::connect_with(&options.connect_options())
            .await
            .map_err(|e| {
                SeedbError::connection_failed(
                    format!(
                        "Cannot connect to PostgreSQL server at {}",
                        options.redacted_url()
                    ),
                    e,
                )
            })?;

        Self::ping(&mut conn).await?;
        tracing::info!("Successfully pinged PostgreSQL server");

        Ok(Self {
            conn,
            options: options.clone(),
        })
    }

    async fn ping(conn: &mut PgConnection) -> Result<()> {
        let result: i32 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| SeedbError::connection_failed("Cannot ping PostgreSQL server", e))?;

        if result != 1 {
            return Err(SeedbError::configuration(
                "Basic connectivity test failed: unexpected result",
            ));
        }

        Ok(())
    }

    /// Sends a graceful terminate message and closes the connection.
    pub async fn close(self) -> Result<()> {
        self.conn
            .close()
            .await
            .map_err(|e| SeedbError::connection_failed("Failed to close connection", e))
    }
}
