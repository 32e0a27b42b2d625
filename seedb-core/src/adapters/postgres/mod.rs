//! PostgreSQL seeder over a single exclusively-owned connection.
//!
//! # Module Structure
//! - `connection`: Connect options, connect and ping, close
//! - `schema_collection`: Table listing and column/foreign-key introspection
//! - `type_mapping`: Catalog type names to schema column types
//! - `execution`: Parameter binding for insert statements
//!
//! One statement is in flight at a time; there is no pool.

mod connection;
mod execution;
mod schema_collection;
mod type_mapping;


use super::DatabaseSeeder;
use crate::config::{DatabaseEngine, DbOptions};
use crate::{Result, models::SchemaModel};
use async_trait::async_trait;
use sqlx::PgConnection;

pub use type_mapping::{column_type, map_referential_action};

/// PostgreSQL seeder owning one live connection.
pub struct PostgresSeeder {
    conn: PgConnection,
    options: DbOptions,
}

impl std::fmt::Debug for PostgresSeeder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // DbOptions' Display omits credentials
        f.debug_struct("PostgresSeeder")
            .field("options", &self.options.to_string())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl DatabaseSeeder for PostgresSeeder {
    async fn list_tables(&mut self) -> Result<Vec<String>> {
        schema_collection::list_tables(&mut self.conn, &self.options).await
    }

    async fn introspect_schema(&mut self) -> Result<SchemaModel> {
        schema_collection::introspect_schema(&mut self.conn, &self.options).await
    }

    fn engine(&self) -> DatabaseEngine {
        DatabaseEngine::Postgres
    }

    async fn close(self: Box<Self>) -> Result<()> {
        (*self).close().await
    }
}
