//! Schema file persistence.
//!
//! The introspected [`SchemaModel`] is written as pretty-printed JSON so it
//! can be reviewed, edited and fed back with `--schema-file`.

use crate::{Result, error::SeedbError, models::SchemaModel};
use std::path::Path;

/// Default file name for the introspected schema.
pub const DEFAULT_SCHEMA_FILE: &str = "schema.json";

/// Writes `schema` to `path` as pretty-printed JSON.
///
/// # Errors
/// Returns [`SeedbError::SchemaFile`] if serialization or the write fails.
pub async fn save(path: impl AsRef<Path>, schema: &SchemaModel) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(schema)
        .map_err(|e| SeedbError::schema_file("Failed to serialize schema", e))?;

    tokio::fs::write(path, json).await.map_err(|e| {
        SeedbError::schema_file(format!("Failed to write {}", path.display()), e)
    })?;

    tracing::debug!(
        "Wrote schema with {} table(s) to {}",
        schema.len(),
        path.display()
    );
    Ok(())
}

/// Reads and parses a schema file.
///
/// # Errors
/// Returns [`SeedbError::SchemaFile`] if the file is unreadable or is not a
/// valid schema document.
pub async fn load(path: impl AsRef<Path>) -> Result<SchemaModel> {
    let path = path.as_ref();
    let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
        SeedbError::schema_file(format!("Failed to read {}", path.display()), e)
    })?;

    let schema: SchemaModel = serde_json::from_str(&contents).map_err(|e| {
        SeedbError::schema_file(format!("Failed to parse {}", path.display()), e)
    })?;

    tracing::debug!(
        "Loaded schema with {} table(s) from {}",
        schema.len(),
        path.display()
    );
    Ok(schema)
}
