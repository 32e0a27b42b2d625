//! Per-column value generation.
//!
//! Resolution order for a `(table, column)` pair, first match wins:
//! 1. the first registered [`TablePattern`] whose regex matches the table
//!    name is asked for the column by name
//! 2. if it does not recognise the column, or no pattern matches, the
//!    column's declared type picks a default (see [`type_default`])
//! 3. unknown types become `NULL`
//!
//! Patterns are kept in registration order. Registering two patterns that
//! match the same table is allowed; only the first one is ever consulted.

mod defaults;
mod patterns;

pub use defaults::{INTEGER_RANGE, type_default};
pub use patterns::builtin_patterns;

use crate::{
    Result,
    error::SeedbError,
    models::{Column, SqlValue},
};
use rand::RngCore;
use regex::{Regex, RegexBuilder};

/// Column dispatch for one table shape.
///
/// Returns `Ok(None)` for columns it does not recognise.
pub type ColumnDispatch =
    dyn Fn(&Column, &mut dyn RngCore) -> Result<Option<SqlValue>> + Send + Sync;

/// A case-insensitive table-name pattern bound to a column dispatch.
pub struct TablePattern {
    regex: Regex,
    dispatch: Box<ColumnDispatch>,
}

impl TablePattern {
    /// Compiles `pattern` case-insensitively and binds it to `dispatch`.
    ///
    /// # Errors
    /// Returns a configuration error if the pattern is not a valid regex.
    pub fn new<F>(pattern: &str, dispatch: F) -> Result<Self>
    where
        F: Fn(&Column, &mut dyn RngCore) -> Result<Option<SqlValue>> + Send + Sync + 'static,
    {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| {
                SeedbError::configuration(format!("Invalid table pattern '{}': {}", pattern, e))
            })?;
        Ok(Self {
            regex,
            dispatch: Box::new(dispatch),
        })
    }

    /// Built-in patterns are compile-time constants.
    pub(crate) fn builtin(
        pattern: &'static str,
        dispatch: fn(&Column, &mut dyn RngCore) -> Result<Option<SqlValue>>,
    ) -> Self {
        Self {
            regex: RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .expect("Invalid built-in table pattern"),
            dispatch: Box::new(dispatch),
        }
    }

    /// The pattern source as registered.
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    pub fn matches(&self, table: &str) -> bool {
        self.regex.is_match(table)
    }

    fn dispatch(&self, column: &Column, rng: &mut dyn RngCore) -> Result<Option<SqlValue>> {
        (self.dispatch)(column, rng)
    }
}

impl std::fmt::Debug for TablePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TablePattern")
            .field("pattern", &self.pattern())
            .finish_non_exhaustive()
    }
}

/// Resolves the value to insert for each column.
#[derive(Debug)]
pub struct ValueGenerator {
    patterns: Vec<TablePattern>,
}

impl Default for ValueGenerator {
    /// A generator with the built-in users/orders/products patterns.
    fn default() -> Self {
        Self {
            patterns: builtin_patterns(),
        }
    }
}

impl ValueGenerator {
    /// Creates a generator with no table patterns (type defaults only).
    pub fn new() -> Self {
        Self {
            patterns: Vec::new(),
        }
    }

    /// Builder method that appends a pattern after the existing ones.
    pub fn with_pattern(mut self, pattern: TablePattern) -> Self {
        self.register(pattern);
        self
    }

    /// Appends a pattern after the existing ones.
    pub fn register(&mut self, pattern: TablePattern) {
        tracing::debug!("Registered table pattern '{}'", pattern.pattern());
        self.patterns.push(pattern);
    }

    /// Registered patterns in resolution order.
    pub fn patterns(&self) -> &[TablePattern] {
        &self.patterns
    }

    /// The first pattern matching `table`, if any.
    pub fn matching_pattern(&self, table: &str) -> Option<&TablePattern> {
        self.patterns.iter().find(|pattern| pattern.matches(table))
    }

    /// Produces the value for one column of `table`.
    ///
    /// # Errors
    /// Only a custom pattern dispatch can fail; type defaults never do.
    pub fn generate(
        &self,
        table: &str,
        column: &Column,
        rng: &mut dyn RngCore,
    ) -> Result<SqlValue> {
        if let Some(pattern) = self.matching_pattern(table)
            && let Some(value) = pattern.dispatch(column, rng)?
        {
            tracing::trace!(
                "'{}.{}' resolved by pattern '{}'",
                table,
                column.name,
                pattern.pattern()
            );
            return Ok(value);
        }

        Ok(type_default(&column.data_type, rng))
    }
}
