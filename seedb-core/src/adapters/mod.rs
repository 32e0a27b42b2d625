//! Database adapters: connection, table listing, schema introspection and
//! statement execution behind one trait.
//!
//! # Module Structure
//! - `helpers`: Shared row-decoding utilities
//! - `postgres`: PostgreSQL seeder (the only implemented engine)

use crate::config::{DatabaseEngine, DbOptions};
use crate::insert::StatementExecutor;
use crate::{Result, error::SeedbError, models::SchemaModel};
use async_trait::async_trait;

#[cfg(feature = "postgresql")]
pub mod helpers;
#[cfg(feature = "postgresql")]
pub mod postgres;

#[cfg(feature = "postgresql")]
pub use postgres::PostgresSeeder;

/// A live database connection that can describe itself and accept inserts.
///
/// # Object Safety
/// This trait is object-safe; [`connect`] returns `Box<dyn DatabaseSeeder>`.
#[async_trait]
pub trait DatabaseSeeder: StatementExecutor {
    /// Lists base tables in the configured database and schema.
    ///
    /// # Errors
    /// Returns [`SeedbError::SchemaGeneration`] if the catalog query fails.
    async fn list_tables(&mut self) -> Result<Vec<String>>;

    /// Introspects columns and foreign keys of every base table.
    ///
    /// # Errors
    /// Returns [`SeedbError::SchemaGeneration`] if any catalog query fails.
    async fn introspect_schema(&mut self) -> Result<SchemaModel>;

    /// The engine this seeder talks to.
    fn engine(&self) -> DatabaseEngine;

    /// Closes the connection gracefully.
    async fn close(self: Box<Self>) -> Result<()>;
}

/// Checks the engine, validates `options`, then connects and pings.
///
/// # Errors
/// Returns [`SeedbError::UnsupportedFeature`] for engines without a seeder,
/// a configuration error for invalid options and a connection error if the
/// connection or ping fails.
pub async fn connect(options: &DbOptions) -> Result<Box<dyn DatabaseSeeder>> {
    if !options.engine.is_supported() {
        return Err(SeedbError::unsupported_feature(
            "Seeding",
            options.engine.identifier(),
        ));
    }
    options.validate()?;

    open(options).await
}

#[cfg(feature = "postgresql")]
async fn open(options: &DbOptions) -> Result<Box<dyn DatabaseSeeder>> {
    let seeder = postgres::PostgresSeeder::connect(options).await?;
    Ok(Box::new(seeder))
}

#[cfg(not(feature = "postgresql"))]
async fn open(options: &DbOptions) -> Result<Box<dyn DatabaseSeeder>> {
    Err(SeedbError::unsupported_feature(
        "Seeding (compile with --features postgresql)",
        options.engine.identifier(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unsupported_engines_are_rejected_before_connecting() {
        for engine in [
            DatabaseEngine::MySql,
            DatabaseEngine::MongoDb,
            DatabaseEngine::CockroachDb,
            DatabaseEngine::Sqlite,
        ] {
            let options = DbOptions::new(engine, "shop").with_password("secret");
            let err = connect(&options).await.err().expect("engine must be rejected");
            assert!(
                matches!(err, SeedbError::UnsupportedFeature { .. }),
                "{engine}: {err}"
            );
            assert!(err.to_string().contains(engine.identifier()));
        }
    }

    #[tokio::test]
    async fn test_invalid_options_fail_validation_first() {
        let options = DbOptions::new(DatabaseEngine::Postgres, "shop");
        let err = connect(&options).await.err().expect("missing password");
        assert!(matches!(err, SeedbError::Configuration { .. }));
    }
}
