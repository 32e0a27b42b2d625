//! Seeding run orchestration.

use crate::config::SeedConfig;
use crate::generator::ValueGenerator;
use crate::insert::{InsertionEngine, StatementExecutor, TableSummary};
use crate::models::{SchemaModel, SelectedTables};
use crate::report::Reporter;

/// Outcome of a whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// One summary per populated table, in processing order
    pub tables: Vec<TableSummary>,
    /// Selected tables with no schema entry
    pub skipped: Vec<String>,
}

impl SeedReport {
    pub fn total_inserted(&self) -> usize {
        self.tables.iter().map(|summary| summary.inserted).sum()
    }

    pub fn total_failed(&self) -> usize {
        self.tables.iter().map(|summary| summary.failed).sum()
    }

    pub fn summary(&self, table: &str) -> Option<&TableSummary> {
        self.tables.iter().find(|summary| summary.table == table)
    }
}

/// Drives generation and insertion for every selected table.
///
/// Tables are processed sequentially in selection order. Relations in the
/// schema do not influence ordering or values.
#[derive(Debug)]
pub struct Seeder {
    config: SeedConfig,
    generator: ValueGenerator,
    schema_name: Option<String>,
}

impl Seeder {
    /// Creates a seeder with the built-in table patterns.
    pub fn new(config: SeedConfig) -> Self {
        Self {
            config,
            generator: ValueGenerator::default(),
            schema_name: None,
        }
    }

    /// Builder method to replace the value generator.
    pub fn with_generator(mut self, generator: ValueGenerator) -> Self {
        self.generator = generator;
        self
    }

    /// Builder method to qualify inserts with a database schema name.
    pub fn with_schema_name(mut self, schema: impl Into<String>) -> Self {
        self.schema_name = Some(schema.into());
        self
    }

    pub fn config(&self) -> &SeedConfig {
        &self.config
    }

    pub fn generator(&self) -> &ValueGenerator {
        &self.generator
    }

    /// Seeds every selected table found in `schema`.
    ///
    /// A selected table missing from the schema is reported and skipped.
    /// Per-record failures are counted in the table's summary; nothing here
    /// aborts the run.
    pub async fn run<E>(
        &self,
        schema: &SchemaModel,
        selection: &SelectedTables,
        executor: &mut E,
        reporter: &dyn Reporter,
    ) -> SeedReport
    where
        E: StatementExecutor + ?Sized,
    {
        let mut engine = InsertionEngine::new(&self.generator);
        if let Some(schema_name) = &self.schema_name {
            engine = engine.with_schema(schema_name.clone());
        }
        let mut rng = self.config.rng();
        let mut report = SeedReport::default();

        tracing::info!(
            "Seeding {} table(s) with {} record(s) each",
            selection.len(),
            self.config.record_count
        );

        for name in selection.iter() {
            let table = match schema.lookup_table(name) {
                Ok(table) => table,
                Err(e) => {
                    tracing::warn!("{}", e);
                    reporter.table_skipped(name, &e);
                    report.skipped.push(name.to_string());
                    continue;
                }
            };

            let summary = engine
                .insert_table(table, self.config.record_count, executor, &mut rng)
                .await;
            reporter.table_populated(&summary);
            report.tables.push(summary);
        }

        report
    }
}
