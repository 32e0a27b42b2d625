//! Core data models for schema metadata and generated records.
//!
//! A [`SchemaModel`] is built once, either from live introspection or from a
//! schema file, and is read-only for the rest of a seeding run.

use crate::{Result, error::SeedbError};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Type fragments that mark a column as database-assigned.
const IDENTITY_MARKERS: [&str; 3] = ["serial", "identity", "auto_increment"];

/// Database column information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    /// Declared type, verbatim from the engine's type vocabulary
    #[serde(rename = "type")]
    pub data_type: String,
}

impl Column {
    /// Creates a column from its name and declared type.
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
        }
    }

    /// Returns true when the declared type contains `fragment`, ignoring case.
    ///
    /// Matching is by containment so `varchar(255)` still resolves as
    /// `varchar` and `int4` as `int`.
    pub fn type_contains(&self, fragment: &str) -> bool {
        self.data_type
            .to_ascii_lowercase()
            .contains(&fragment.to_ascii_lowercase())
    }

    /// Returns true for auto-generated identity columns (serial and friends).
    pub fn is_identity(&self) -> bool {
        IDENTITY_MARKERS
            .iter()
            .any(|marker| self.type_contains(marker))
    }
}

/// Foreign key relation owned by a table.
///
/// Relations are descriptive only: value generation never consults them,
/// so generated foreign-key values are not guaranteed to reference an
/// existing parent row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    pub name: String,
    pub column: String,
    pub ref_table: String,
    pub ref_column: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_delete: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_update: Option<String>,
}

/// Database table information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    pub columns: Vec<Column>,
    #[serde(default)]
    pub relations: Vec<Relation>,
}

impl Table {
    /// Creates a table without relations.
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Self {
        Self {
            name: name.into(),
            columns,
            relations: Vec::new(),
        }
    }

    /// Builder method to attach relations.
    pub fn with_relations(mut self, relations: Vec<Relation>) -> Self {
        self.relations = relations;
        self
    }

    /// Columns that receive generated values, in declaration order.
    pub fn insertable_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|column| !column.is_identity())
    }
}

/// Parsed schema description for one database schema.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SchemaModel {
    #[serde(default)]
    tables: Vec<Table>,
}

impl SchemaModel {
    /// Creates a schema model that owns the given tables.
    pub fn new(tables: Vec<Table>) -> Self {
        Self { tables }
    }

    /// Looks up a table by exact, case-sensitive name.
    ///
    /// # Errors
    /// Returns [`SeedbError::SchemaNotFound`] when no table has that name.
    pub fn lookup_table(&self, name: &str) -> Result<&Table> {
        self.tables
            .iter()
            .find(|table| table.name == name)
            .ok_or_else(|| SeedbError::schema_not_found(name))
    }

    /// All tables in schema order.
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// Table names in schema order.
    pub fn table_names(&self) -> Vec<String> {
        self.tables.iter().map(|table| table.name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Total number of relations across all tables.
    pub fn relation_count(&self) -> usize {
        self.tables.iter().map(|table| table.relations.len()).sum()
    }
}

/// Insertion-ordered set of table names chosen for population.
///
/// Iteration follows insertion order, not foreign-key dependency order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectedTables {
    names: Vec<String>,
}

impl SelectedTables {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a table name; returns false if it was already selected.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.contains(&name) {
            return false;
        }
        self.names.push(name);
        true
    }

    /// Removes a table name; returns false if it was not selected.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.names.len();
        self.names.retain(|selected| selected != name);
        self.names.len() != before
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|selected| selected == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for SelectedTables {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut selection = Self::new();
        for name in iter {
            selection.insert(name);
        }
        selection
    }
}

/// A single generated value, bound as a statement parameter on insert.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Integer(i64),
    /// Fixed-precision decimal, rendered with two fractional digits
    Decimal(f64),
    Text(String),
    Boolean(bool),
    Date(NaiveDate),
    Timestamp(NaiveDateTime),
}

impl SqlValue {
    /// Renders the value as an SQL literal.
    ///
    /// Strings, dates and timestamps are single-quoted with embedded quotes
    /// doubled; numbers and booleans are bare; `Null` renders as `NULL`.
    pub fn to_literal(&self) -> String {
        match self {
            Self::Null => "NULL".to_string(),
            Self::Integer(value) => value.to_string(),
            Self::Decimal(value) => format!("{value:.2}"),
            Self::Text(value) => quote_literal(value),
            Self::Boolean(value) => value.to_string(),
            Self::Date(value) => quote_literal(&value.format("%Y-%m-%d").to_string()),
            Self::Timestamp(value) => {
                quote_literal(&value.format("%Y-%m-%d %H:%M:%S").to_string())
            }
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl std::fmt::Display for SqlValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_literal())
    }
}

fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Column names and values for one insert attempt.
///
/// Both lists always have the same length and positional order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GeneratedRecord {
    pub columns: Vec<String>,
    pub values: Vec<SqlValue>,
}

impl GeneratedRecord {
    /// Appends one column/value pair.
    pub fn push(&mut self, column: impl Into<String>, value: SqlValue) {
        self.columns.push(column.into());
        self.values.push(value);
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Value literals in column order.
    pub fn literals(&self) -> Vec<String> {
        self.values.iter().map(SqlValue::to_literal).collect()
    }

    /// Looks up the value generated for a column.
    pub fn value_of(&self, column: &str) -> Option<&SqlValue> {
        self.columns
            .iter()
            .position(|name| name == column)
            .and_then(|index| self.values.get(index))
    }
}

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;
