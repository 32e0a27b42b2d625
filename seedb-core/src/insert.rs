//! Insert statement construction and best-effort per-table execution.
//!
//! Every non-null generated value is bound as a statement parameter; only
//! identifiers and `NULL` are spliced into the SQL text, and identifiers are
//! double-quoted. A failed insert is recorded in the table's
//! [`TableSummary`] and the loop moves on to the next record. There are no
//! retries and no transactions.

use crate::models::{GeneratedRecord, SqlValue, Table};
use crate::record::RecordBuilder;
use crate::{Result, generator::ValueGenerator};
use async_trait::async_trait;
use rand::RngCore;

/// Number of distinct failure messages kept per table summary.
pub const MAX_RECORDED_ERRORS: usize = 10;

/// Quotes an SQL identifier, doubling embedded double quotes.
pub fn quote_identifier(identifier: &str) -> String {
    format!("\"{}\"", identifier.replace('"', "\"\""))
}

/// One parameter-bound `INSERT` for a single generated record.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertStatement {
    schema: Option<String>,
    table: String,
    columns: Vec<String>,
    values: Vec<SqlValue>,
}

impl InsertStatement {
    /// Takes ownership of a generated record's columns and values.
    pub fn from_record(table: impl Into<String>, record: GeneratedRecord) -> Self {
        Self {
            schema: None,
            table: table.into(),
            columns: record.columns,
            values: record.values,
        }
    }

    /// Builder method to qualify the table with a schema name.
    pub fn with_schema(mut self, schema: Option<String>) -> Self {
        self.schema = schema;
        self
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Values in column order, `NULL`s included.
    pub fn values(&self) -> &[SqlValue] {
        &self.values
    }

    /// Non-null values in placeholder order (`$1`, `$2`, ...).
    pub fn bound_values(&self) -> impl Iterator<Item = &SqlValue> {
        self.values.iter().filter(|value| !value.is_null())
    }

    /// Parameterized SQL text with quoted identifiers.
    ///
    /// `NULL`s are written inline so an untyped null never meets a typed
    /// column. A record without columns inserts a row of defaults.
    pub fn sql(&self) -> String {
        let target = match &self.schema {
            Some(schema) => format!(
                "{}.{}",
                quote_identifier(schema),
                quote_identifier(&self.table)
            ),
            None => quote_identifier(&self.table),
        };

        if self.columns.is_empty() {
            return format!("INSERT INTO {} DEFAULT VALUES;", target);
        }

        let columns = self
            .columns
            .iter()
            .map(|column| quote_identifier(column))
            .collect::<Vec<_>>()
            .join(", ");
        let mut index = 0;
        let placeholders = self
            .values
            .iter()
            .map(|value| {
                if value.is_null() {
                    "NULL".to_string()
                } else {
                    index += 1;
                    format!("${}", index)
                }
            })
            .collect::<Vec<_>>()
            .join(", ");

        format!("INSERT INTO {} ({}) VALUES ({});", target, columns, placeholders)
    }

    /// The statement with values rendered inline as SQL literals.
    ///
    /// Used for dry runs and trace logs; never sent to the database.
    pub fn to_literal_sql(&self) -> String {
        let target = match &self.schema {
            Some(schema) => format!("{}.{}", schema, self.table),
            None => self.table.clone(),
        };

        if self.columns.is_empty() {
            return format!("INSERT INTO {} DEFAULT VALUES;", target);
        }

        let literals = self
            .values
            .iter()
            .map(SqlValue::to_literal)
            .collect::<Vec<_>>();

        format!(
            "INSERT INTO {} ({}) VALUES ({});",
            target,
            self.columns.join(", "),
            literals.join(", ")
        )
    }
}

/// Runs insert statements against a target.
///
/// Implementations own their connection; the engine never issues more than
/// one statement at a time.
#[async_trait]
pub trait StatementExecutor: Send {
    /// Executes one statement, returning the number of affected rows.
    ///
    /// # Errors
    /// Returns [`crate::SeedbError::Insert`] when the target rejects it.
    async fn execute(&mut self, statement: &InsertStatement) -> Result<u64>;
}

/// Executor that renders statements instead of running them.
#[derive(Debug, Default)]
pub struct DryRunExecutor {
    statements: Vec<String>,
}

impl DryRunExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Literal SQL of every statement seen, in execution order.
    pub fn statements(&self) -> &[String] {
        &self.statements
    }

    pub fn into_statements(self) -> Vec<String> {
        self.statements
    }
}

#[async_trait]
impl StatementExecutor for DryRunExecutor {
    async fn execute(&mut self, statement: &InsertStatement) -> Result<u64> {
        self.statements.push(statement.to_literal_sql());
        Ok(1)
    }
}

/// Result of one insert attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    Inserted { rows: u64 },
    Failed { error: String },
}

impl RecordOutcome {
    pub fn is_inserted(&self) -> bool {
        matches!(self, Self::Inserted { .. })
    }
}

/// Aggregated outcomes for one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSummary {
    pub table: String,
    pub attempted: usize,
    pub inserted: usize,
    pub failed: usize,
    /// First few distinct failure messages (see [`MAX_RECORDED_ERRORS`])
    pub errors: Vec<String>,
}

impl TableSummary {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            attempted: 0,
            inserted: 0,
            failed: 0,
            errors: Vec::new(),
        }
    }

    /// Folds one outcome into the counts.
    pub fn record(&mut self, outcome: RecordOutcome) {
        self.attempted += 1;
        match outcome {
            RecordOutcome::Inserted { .. } => self.inserted += 1,
            RecordOutcome::Failed { error } => {
                self.failed += 1;
                if self.errors.len() < MAX_RECORDED_ERRORS && !self.errors.contains(&error) {
                    self.errors.push(error);
                }
            }
        }
    }

    /// True when every attempt was inserted.
    pub fn is_complete(&self) -> bool {
        self.failed == 0
    }
}

/// Generates and inserts records one table at a time.
#[derive(Debug)]
pub struct InsertionEngine<'g> {
    builder: RecordBuilder<'g>,
    schema: Option<String>,
}

impl<'g> InsertionEngine<'g> {
    pub fn new(generator: &'g ValueGenerator) -> Self {
        Self {
            builder: RecordBuilder::new(generator),
            schema: None,
        }
    }

    /// Builder method to qualify every insert with a schema name.
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Generates one record and attempts to insert it.
    pub async fn insert_record<E, R>(
        &self,
        table: &Table,
        executor: &mut E,
        rng: &mut R,
    ) -> RecordOutcome
    where
        E: StatementExecutor + ?Sized,
        R: RngCore,
    {
        let record = self.builder.build(table, rng);
        let statement =
            InsertStatement::from_record(&table.name, record).with_schema(self.schema.clone());

        tracing::trace!("{}", statement.to_literal_sql());

        match executor.execute(&statement).await {
            Ok(rows) => RecordOutcome::Inserted { rows },
            Err(e) => {
                let error = e.chain();
                tracing::debug!("Skipping record for '{}': {}", table.name, error);
                RecordOutcome::Failed { error }
            }
        }
    }

    /// Makes exactly `record_count` insert attempts for `table`.
    ///
    /// Failures never stop the loop; they are counted in the summary.
    pub async fn insert_table<E, R>(
        &self,
        table: &Table,
        record_count: usize,
        executor: &mut E,
        rng: &mut R,
    ) -> TableSummary
    where
        E: StatementExecutor + ?Sized,
        R: RngCore,
    {
        let mut summary = TableSummary::new(&table.name);

        for _ in 0..record_count {
            let outcome = self.insert_record(table, executor, rng).await;
            summary.record(outcome);
        }

        tracing::debug!(
            "Table '{}': {} attempted, {} inserted, {} failed",
            summary.table,
            summary.attempted,
            summary.inserted,
            summary.failed
        );

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SeedbError;
    use crate::models::Column;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    /// Fails every n-th statement.
    struct FlakyExecutor {
        every: usize,
        seen: usize,
    }

    #[async_trait]
    impl StatementExecutor for FlakyExecutor {
        async fn execute(&mut self, statement: &InsertStatement) -> Result<u64> {
            self.seen += 1;
            if self.seen % self.every == 0 {
                Err(SeedbError::insert_failed(
                    statement.table(),
                    "duplicate key value violates unique constraint",
                ))
            } else {
                Ok(1)
            }
        }
    }

    fn products() -> Table {
        Table::new(
            "products",
            vec![
                Column::new("id", "serial"),
                Column::new("product_name", "varchar"),
                Column::new("price", "numeric"),
            ],
        )
    }

    fn record() -> GeneratedRecord {
        let mut record = GeneratedRecord::default();
        record.push("product_name", SqlValue::Text("Desk Lamp".to_string()));
        record.push("price", SqlValue::Decimal(19.99));
        record
    }

    #[test]
    fn test_parameterized_sql() {
        let statement = InsertStatement::from_record("products", record());
        assert_eq!(
            statement.sql(),
            r#"INSERT INTO "products" ("product_name", "price") VALUES ($1, $2);"#
        );
        assert_eq!(statement.values().len(), 2);
        assert_eq!(statement.bound_values().count(), 2);
    }

    #[test]
    fn test_nulls_are_inlined_and_not_bound() {
        let mut record = GeneratedRecord::default();
        record.push("payload", SqlValue::Null);
        record.push("name", SqlValue::Text("a".to_string()));
        record.push("meta", SqlValue::Null);
        record.push("qty", SqlValue::Integer(4));

        let statement = InsertStatement::from_record("events", record);

        assert_eq!(
            statement.sql(),
            r#"INSERT INTO "events" ("payload", "name", "meta", "qty") VALUES (NULL, $1, NULL, $2);"#
        );
        assert_eq!(
            statement.bound_values().cloned().collect::<Vec<_>>(),
            vec![SqlValue::Text("a".to_string()), SqlValue::Integer(4)]
        );
    }

    #[test]
    fn test_literal_sql_matches_legacy_shape() {
        let statement = InsertStatement::from_record("products", record());
        assert_eq!(
            statement.to_literal_sql(),
            "INSERT INTO products (product_name, price) VALUES ('Desk Lamp', 19.99);"
        );
    }

    #[test]
    fn test_schema_qualification() {
        let statement = InsertStatement::from_record("products", record())
            .with_schema(Some("inventory".to_string()));
        assert!(statement.sql().starts_with(r#"INSERT INTO "inventory"."products" ("#));
        assert!(
            statement
                .to_literal_sql()
                .starts_with("INSERT INTO inventory.products (")
        );
    }

    #[test]
    fn test_identifiers_are_quoted_not_trusted() {
        let mut record = GeneratedRecord::default();
        record.push(r#"na"me"#, SqlValue::Integer(1));
        let statement = InsertStatement::from_record("t; DROP TABLE x", record);
        assert_eq!(
            statement.sql(),
            r#"INSERT INTO "t; DROP TABLE x" ("na""me") VALUES ($1);"#
        );
    }

    #[test]
    fn test_empty_record_inserts_defaults() {
        let statement = InsertStatement::from_record("counters", GeneratedRecord::default());
        assert_eq!(statement.sql(), r#"INSERT INTO "counters" DEFAULT VALUES;"#);
        assert_eq!(
            statement.to_literal_sql(),
            "INSERT INTO counters DEFAULT VALUES;"
        );
    }

    #[test]
    fn test_summary_counts_and_caps_errors() {
        let mut summary = TableSummary::new("t");
        summary.record(RecordOutcome::Inserted { rows: 1 });
        for i in 0..(MAX_RECORDED_ERRORS + 5) {
            summary.record(RecordOutcome::Failed {
                error: format!("error {}", i),
            });
        }
        summary.record(RecordOutcome::Failed {
            error: "error 0".to_string(),
        });

        assert_eq!(summary.attempted, MAX_RECORDED_ERRORS + 7);
        assert_eq!(summary.inserted, 1);
        assert_eq!(summary.failed, MAX_RECORDED_ERRORS + 6);
        assert_eq!(summary.errors.len(), MAX_RECORDED_ERRORS);
        assert!(!summary.is_complete());
    }

    #[tokio::test]
    async fn test_insert_table_issues_one_statement_per_record() {
        let generator = ValueGenerator::default();
        let engine = InsertionEngine::new(&generator);
        let mut executor = DryRunExecutor::new();
        let mut rng = StdRng::seed_from_u64(3);

        let summary = engine
            .insert_table(&products(), 3, &mut executor, &mut rng)
            .await;

        assert_eq!(summary.attempted, 3);
        assert_eq!(summary.inserted, 3);
        assert!(summary.is_complete());
        assert_eq!(executor.statements().len(), 3);
        for sql in executor.statements() {
            assert!(sql.starts_with("INSERT INTO products (product_name, price) VALUES ('"));
        }
    }

    #[tokio::test]
    async fn test_failed_inserts_do_not_stop_the_table() {
        let generator = ValueGenerator::default();
        let engine = InsertionEngine::new(&generator);
        let mut executor = FlakyExecutor { every: 2, seen: 0 };
        let mut rng = StdRng::seed_from_u64(4);

        let summary = engine
            .insert_table(&products(), 5, &mut executor, &mut rng)
            .await;

        assert_eq!(executor.seen, 5);
        assert_eq!(summary.attempted, 5);
        assert_eq!(summary.inserted, 3);
        assert_eq!(summary.failed, 2);
        assert_eq!(summary.errors.len(), 1);
        assert_eq!(
            summary.errors[0],
            "Insert into 'products' failed: duplicate key value violates unique constraint"
        );
    }

    #[tokio::test]
    async fn test_zero_records_issues_nothing() {
        let generator = ValueGenerator::default();
        let engine = InsertionEngine::new(&generator);
        let mut executor = DryRunExecutor::new();

        let summary = engine
            .insert_table(&products(), 0, &mut executor, &mut StdRng::seed_from_u64(1))
            .await;

        assert_eq!(summary.attempted, 0);
        assert!(executor.statements().is_empty());
    }
}
