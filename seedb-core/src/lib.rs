//! Core library for seedb, a schema-driven database seeder.
//!
//! Given a description of a database schema and a selection of tables,
//! seedb generates plausible random rows and inserts a fixed number of them
//! into each selected table.
//!
//! # Pipeline
//! - [`models::SchemaModel`]: tables, columns and relations, from live
//!   introspection or a schema file
//! - [`generator::ValueGenerator`]: table-pattern overrides, then
//!   type-based defaults
//! - [`record::RecordBuilder`]: one row of column/value pairs, identity
//!   columns skipped
//! - [`insert::InsertionEngine`]: parameter-bound inserts, per-record
//!   outcomes folded into a [`insert::TableSummary`]
//! - [`seeder::Seeder`]: drives the selected tables and reports through an
//!   injected [`report::Reporter`]
//!
//! # Security Guarantees
//! - Passwords are held in zeroizing storage and never logged
//! - Generated values are bound as parameters, never spliced into SQL
//! - Connection errors carry redacted URLs only
//!
//! Inserted values are not checked against foreign keys; relations are
//! collected for reference but do not influence ordering or values.

pub mod adapters;
pub mod config;
pub mod error;
pub mod generator;
pub mod insert;
pub mod logging;
pub mod models;
pub mod record;
pub mod report;
pub mod schema_file;
pub mod seeder;

// Re-export commonly used types
pub use adapters::{DatabaseSeeder, connect};
#[cfg(feature = "postgresql")]
pub use adapters::PostgresSeeder;
pub use config::{DatabaseEngine, DbOptions, SeedConfig};
pub use error::{Result, SeedbError};
pub use generator::{TablePattern, ValueGenerator};
pub use insert::{
    DryRunExecutor, InsertStatement, InsertionEngine, RecordOutcome, StatementExecutor,
    TableSummary,
};
pub use models::{
    Column, GeneratedRecord, Relation, SchemaModel, SelectedTables, SqlValue, Table,
};
pub use record::RecordBuilder;
pub use report::{ConsoleReporter, MemoryReporter, Reporter, TracingReporter};
pub use seeder::{SeedReport, Seeder};
