//! Assembles one row's column and value lists.

use crate::generator::ValueGenerator;
use crate::models::{GeneratedRecord, SqlValue, Table};
use rand::RngCore;

/// Builds [`GeneratedRecord`]s for a table using a [`ValueGenerator`].
#[derive(Debug)]
pub struct RecordBuilder<'g> {
    generator: &'g ValueGenerator,
}

impl<'g> RecordBuilder<'g> {
    pub fn new(generator: &'g ValueGenerator) -> Self {
        Self { generator }
    }

    /// Generates one record for `table`.
    ///
    /// Identity columns are left out of both lists. A column whose generator
    /// fails gets `NULL` instead of aborting the record. A table made only
    /// of identity columns yields an empty record.
    pub fn build(&self, table: &Table, rng: &mut dyn RngCore) -> GeneratedRecord {
        let mut record = GeneratedRecord::default();

        for column in table.insertable_columns() {
            let value = match self.generator.generate(&table.name, column, rng) {
                Ok(value) => value,
                Err(e) => {
                    tracing::warn!(
                        "Substituting NULL for '{}.{}': {}",
                        table.name,
                        column.name,
                        e
                    );
                    SqlValue::Null
                }
            };
            record.push(column.name.clone(), value);
        }

        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SeedbError;
    use crate::generator::TablePattern;
    use crate::models::Column;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(5)
    }

    #[test]
    fn test_serial_columns_are_excluded() {
        let generator = ValueGenerator::default();
        let table = Table::new(
            "products",
            vec![
                Column::new("id", "SERIAL"),
                Column::new("product_name", "varchar"),
                Column::new("legacy_id", "bigserial"),
                Column::new("price", "numeric"),
            ],
        );

        let record = RecordBuilder::new(&generator).build(&table, &mut rng());

        assert_eq!(record.columns, vec!["product_name", "price"]);
        assert_eq!(record.values.len(), record.columns.len());
        assert!(matches!(record.values[0], SqlValue::Text(_)));
        assert!(matches!(record.values[1], SqlValue::Decimal(_)));
    }

    #[test]
    fn test_unknown_type_keeps_column_with_null() {
        let generator = ValueGenerator::default();
        let table = Table::new(
            "events",
            vec![Column::new("id", "serial"), Column::new("payload", "jsonb")],
        );

        let record = RecordBuilder::new(&generator).build(&table, &mut rng());

        assert_eq!(record.columns, vec!["payload"]);
        assert_eq!(record.literals(), vec!["NULL"]);
    }

    #[test]
    fn test_generator_failure_becomes_null_and_continues() {
        let generator = ValueGenerator::new().with_pattern(
            TablePattern::new(r"^ledger$", |column, _| match column.name.as_str() {
                "amount" => Err(SeedbError::value_generation("ledger", "amount", "boom")),
                _ => Ok(None),
            })
            .unwrap(),
        );
        let table = Table::new(
            "ledger",
            vec![
                Column::new("amount", "numeric"),
                Column::new("memo", "text"),
            ],
        );

        let record = RecordBuilder::new(&generator).build(&table, &mut rng());

        assert_eq!(record.columns, vec!["amount", "memo"]);
        assert_eq!(record.values[0], SqlValue::Null);
        assert!(matches!(record.values[1], SqlValue::Text(_)));
    }

    #[test]
    fn test_identity_only_table_yields_empty_record() {
        let generator = ValueGenerator::default();
        let table = Table::new("counters", vec![Column::new("id", "serial")]);

        let record = RecordBuilder::new(&generator).build(&table, &mut rng());
        assert!(record.is_empty());
    }
}
