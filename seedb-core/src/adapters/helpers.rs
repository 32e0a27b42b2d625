//! Helper utilities shared by database adapter implementations.

use crate::{Result, error::SeedbError};
use sqlx::{Row, postgres::PgRow};

/// Extension trait for extracting typed values from database rows
/// with consistent error handling.
///
/// # Example
/// ```rust,ignore
/// use seedb_core::adapters::helpers::RowExt;
///
/// let name: String = row.get_field("column_name", Some("users"))?;
/// let default: Option<String> = row.get_field("column_default", None)?;
/// ```
pub trait RowExt {
    /// Extracts a typed field from the row, naming the table in errors.
    fn get_field<'r, T>(&'r self, field_name: &str, table_context: Option<&str>) -> Result<T>
    where
        T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>;
}

impl RowExt for PgRow {
    fn get_field<'r, T>(&'r self, field_name: &str, table_context: Option<&str>) -> Result<T>
    where
        T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
    {
        self.try_get(field_name).map_err(|e| {
            let context = match table_context {
                Some(table) => format!("Failed to read '{}' for table '{}'", field_name, table),
                None => format!("Failed to read '{}'", field_name),
            };
            SeedbError::schema_generation(context, e)
        })
    }
}
