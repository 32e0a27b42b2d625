//! Error types with credential sanitization.
//!
//! Connection strings and passwords never appear in error messages; connection
//! errors carry [`crate::DbOptions::redacted_url`] as their context.

use thiserror::Error;

/// Main error type for seedb operations.
#[derive(Debug, Error)]
pub enum SeedbError {
    /// Database connection or ping failed (credentials sanitized)
    #[error("Database connection failed: {context}")]
    Connection {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Schema introspection against the live database failed
    #[error("Schema generation failed: {context}")]
    SchemaGeneration {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Schema file could not be read, written or parsed
    #[error("Schema file error: {context}")]
    SchemaFile {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A selected table has no entry in the parsed schema
    #[error("Schema for table '{table}' not found")]
    SchemaNotFound { table: String },

    /// A column-specific generator could not produce a value
    #[error("Value generation failed for '{table}.{column}': {message}")]
    ValueGeneration {
        table: String,
        column: String,
        message: String,
    },

    /// An insert statement was rejected by the database
    #[error("Insert into '{table}' failed")]
    Insert {
        table: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Configuration or validation error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unsupported database engine or operation
    #[error("Unsupported operation: {feature} not supported for {engine}")]
    UnsupportedFeature { feature: String, engine: String },
}

/// Convenience type alias for Results with SeedbError
pub type Result<T> = std::result::Result<T, SeedbError>;

impl SeedbError {
    /// Creates a connection error with sanitized context
    pub fn connection_failed<E>(context: impl Into<String>, error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Connection {
            context: context.into(),
            source: Box::new(error),
        }
    }

    /// Creates a schema introspection error
    pub fn schema_generation<E>(context: impl Into<String>, error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::SchemaGeneration {
            context: context.into(),
            source: Box::new(error),
        }
    }

    /// Creates a schema file error
    pub fn schema_file<E>(context: impl Into<String>, error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::SchemaFile {
            context: context.into(),
            source: Box::new(error),
        }
    }

    /// Creates a lookup error for a table missing from the schema
    pub fn schema_not_found(table: impl Into<String>) -> Self {
        Self::SchemaNotFound {
            table: table.into(),
        }
    }

    /// Creates a value generation error for a single column
    pub fn value_generation(
        table: impl Into<String>,
        column: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::ValueGeneration {
            table: table.into(),
            column: column.into(),
            message: message.into(),
        }
    }

    /// Creates an insert error
    ///
    /// The driver error is kept as the source; plain strings are accepted too.
    pub fn insert_failed(
        table: impl Into<String>,
        error: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Insert {
            table: table.into(),
            source: error.into(),
        }
    }

    /// The message followed by every source, joined with `": "`.
    pub fn chain(&self) -> String {
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(error) = source {
            message.push_str(": ");
            message.push_str(&error.to_string());
            source = error.source();
        }
        message
    }

    /// Creates a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Creates an unsupported feature error
    pub fn unsupported_feature(feature: impl Into<String>, engine: impl Into<String>) -> Self {
        Self::UnsupportedFeature {
            feature: feature.into(),
            engine: engine.into(),
        }
    }

    /// Returns true for errors that must abort a whole seeding run.
    ///
    /// Lookup, generation and insert errors are absorbed per table or per
    /// record; everything else happens during setup.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            Self::SchemaNotFound { .. } | Self::ValueGeneration { .. } | Self::Insert { .. }
        )
    }
}
