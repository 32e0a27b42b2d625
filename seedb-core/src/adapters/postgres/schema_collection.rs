//! PostgreSQL table listing and schema introspection.

use super::type_mapping::{CatalogType, column_type, is_auto_increment, map_referential_action};
use crate::adapters::helpers::RowExt;
use crate::config::DbOptions;
use crate::models::{Column, Relation, SchemaModel, Table};
use crate::{Result, error::SeedbError};
use sqlx::PgConnection;

/// Lists base tables of the configured database and schema, by name.
pub(crate) async fn list_tables(
    conn: &mut PgConnection,
    options: &DbOptions,
) -> Result<Vec<String>> {
    let tables_query = r#"
        SELECT table_name::text AS table_name
        FROM information_schema.tables
        WHERE table_catalog = $1
        AND table_schema = $2
        AND table_type = 'BASE TABLE'
        ORDER BY table_name
    "#;

    let rows = sqlx::query(tables_query)
        .bind(&options.database)
        .bind(&options.schema)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            SeedbError::schema_generation(
                format!(
                    "Failed to list tables in '{}.{}'",
                    options.database, options.schema
                ),
                e,
            )
        })?;

    let mut tables = Vec::with_capacity(rows.len());
    for row in &rows {
        let table_name: String = row.get_field("table_name", None)?;
        tables.push(table_name);
    }

    tracing::debug!(
        "Found {} table(s) in schema '{}'",
        tables.len(),
        options.schema
    );
    Ok(tables)
}

/// Builds the schema model for every base table of the configured schema.
pub(crate) async fn introspect_schema(
    conn: &mut PgConnection,
    options: &DbOptions,
) -> Result<SchemaModel> {
    let start_time = std::time::Instant::now();
    tracing::info!(
        "Introspecting schema '{}' of database '{}'",
        options.schema,
        options.database
    );

    let table_names = list_tables(conn, options).await?;
    let mut tables = Vec::with_capacity(table_names.len());

    for table_name in table_names {
        let columns = collect_table_columns(conn, &table_name, &options.schema).await?;
        let relations = collect_table_relations(conn, &table_name, &options.schema).await?;

        tracing::debug!(
            "Collected table '{}' with {} columns, {} relations",
            table_name,
            columns.len(),
            relations.len()
        );

        tables.push(Table::new(table_name, columns).with_relations(relations));
    }

    tracing::info!(
        "Schema introspection completed in {:.2}s - found {} tables",
        start_time.elapsed().as_secs_f64(),
        tables.len()
    );

    Ok(SchemaModel::new(tables))
}

async fn collect_table_columns(
    conn: &mut PgConnection,
    table_name: &str,
    schema: &str,
) -> Result<Vec<Column>> {
    let columns_query = r#"
        SELECT
            c.column_name::text AS column_name,
            c.data_type::text AS data_type,
            c.udt_name::text AS udt_name,
            c.character_maximum_length::integer AS character_maximum_length,
            c.numeric_precision::integer AS numeric_precision,
            c.numeric_scale::integer AS numeric_scale,
            c.column_default::text AS column_default,
            c.is_identity::text AS is_identity
        FROM information_schema.columns c
        WHERE c.table_name = $1
        AND c.table_schema = $2
        ORDER BY c.ordinal_position
    "#;

    let rows = sqlx::query(columns_query)
        .bind(table_name)
        .bind(schema)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            SeedbError::schema_generation(
                format!(
                    "Failed to collect columns for table '{}.{}'",
                    schema, table_name
                ),
                e,
            )
        })?;

    let mut columns = Vec::with_capacity(rows.len());

    for row in &rows {
        let column_name: String = row.get_field("column_name", Some(table_name))?;
        let data_type: String = row.get_field("data_type", Some(table_name))?;
        let udt_name: String = row.get_field("udt_name", Some(table_name))?;
        let character_maximum_length: Option<i32> =
            row.get_field("character_maximum_length", Some(table_name))?;
        let numeric_precision: Option<i32> =
            row.get_field("numeric_precision", Some(table_name))?;
        let numeric_scale: Option<i32> = row.get_field("numeric_scale", Some(table_name))?;
        let column_default: Option<String> = row.get_field("column_default", Some(table_name))?;
        let is_identity: Option<String> = row.get_field("is_identity", Some(table_name))?;

        let catalog = CatalogType {
            data_type: &data_type,
            udt_name: &udt_name,
            character_maximum_length,
            numeric_precision,
            numeric_scale,
            auto_increment: is_auto_increment(
                is_identity.as_deref().unwrap_or("NO"),
                column_default.as_deref(),
            ),
        };

        columns.push(Column::new(column_name, column_type(&catalog)));
    }

    Ok(columns)
}

async fn collect_table_relations(
    conn: &mut PgConnection,
    table_name: &str,
    schema: &str,
) -> Result<Vec<Relation>> {
    // One row per (constraint, column) pair; composite keys yield several
    let fk_query = r#"
        SELECT
            con.conname::text AS constraint_name,
            rc.update_rule::text AS update_rule,
            rc.delete_rule::text AS delete_rule,
            a.attname::text AS column_name,
            fcl.relname::text AS referenced_table_name,
            fa.attname::text AS referenced_column_name
        FROM pg_constraint con
        JOIN pg_class cl ON con.conrelid = cl.oid
        JOIN pg_namespace ns ON cl.relnamespace = ns.oid
        JOIN information_schema.referential_constraints rc
            ON con.conname = rc.constraint_name
            AND ns.nspname = rc.constraint_schema
        JOIN pg_class fcl ON con.confrelid = fcl.oid
        JOIN pg_attribute a ON a.attrelid = con.conrelid
        JOIN pg_attribute fa ON fa.attrelid = con.confrelid
        WHERE con.contype = 'f'
        AND cl.relname = $1
        AND ns.nspname = $2
        AND a.attnum = ANY(con.conkey)
        AND fa.attnum = ANY(con.confkey)
        AND array_position(con.conkey, a.attnum) = array_position(con.confkey, fa.attnum)
        ORDER BY con.conname, array_position(con.conkey, a.attnum)
    "#;

    let rows = sqlx::query(fk_query)
        .bind(table_name)
        .bind(schema)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            SeedbError::schema_generation(
                format!(
                    "Failed to collect foreign keys for table '{}.{}'",
                    schema, table_name
                ),
                e,
            )
        })?;

    let mut relations = Vec::with_capacity(rows.len());

    for row in &rows {
        let update_rule: String = row.get_field("update_rule", Some(table_name))?;
        let delete_rule: String = row.get_field("delete_rule", Some(table_name))?;

        relations.push(Relation {
            name: row.get_field("constraint_name", Some(table_name))?,
            column: row.get_field("column_name", Some(table_name))?,
            ref_table: row.get_field("referenced_table_name", Some(table_name))?,
            ref_column: row.get_field("referenced_column_name", Some(table_name))?,
            on_delete: map_referential_action(&delete_rule),
            on_update: map_referential_action(&update_rule),
        });
    }

    Ok(relations)
}
