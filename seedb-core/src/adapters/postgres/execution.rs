//! Insert execution with typed parameter binding.

use super::PostgresSeeder;
use crate::insert::{InsertStatement, StatementExecutor};
use crate::models::SqlValue;
use crate::{Result, error::SeedbError};
use async_trait::async_trait;
use sqlx::Postgres;
use sqlx::postgres::PgArguments;
use sqlx::query::Query;

fn bind_value<'q>(
    query: Query<'q, Postgres, PgArguments>,
    value: &'q SqlValue,
) -> Query<'q, Postgres, PgArguments> {
    match value {
        // Never reached for statements built by InsertStatement::sql
        SqlValue::Null => query.bind(None::<String>),
        SqlValue::Integer(v) => query.bind(*v),
        SqlValue::Decimal(v) => query.bind(*v),
        SqlValue::Text(v) => query.bind(v.as_str()),
        SqlValue::Boolean(v) => query.bind(*v),
        SqlValue::Date(v) => query.bind(*v),
        SqlValue::Timestamp(v) => query.bind(*v),
    }
}

#[async_trait]
impl StatementExecutor for PostgresSeeder {
    async fn execute(&mut self, statement: &InsertStatement) -> Result<u64> {
        let sql = statement.sql();
        let query = statement
            .bound_values()
            .fold(sqlx::query(&sql), |query, value| bind_value(query, value));

        let result = query
            .execute(&mut self.conn)
            .await
            .map_err(|e| SeedbError::insert_failed(statement.table(), e))?;

        Ok(result.rows_affected())
    }
}
