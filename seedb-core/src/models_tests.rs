//! Tests for the schema models.

use super::*;

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

fn orders() -> Table {
    Table::new(
        "orders",
        vec![
            Column::new("id", "serial"),
            Column::new("order_date", "timestamp"),
            Column::new("total_amount", "numeric"),
            Column::new("user_id", "int"),
        ],
    )
    .with_relations(vec![Relation {
        name: "order_users".to_string(),
        column: "user_id".to_string(),
        ref_table: "users".to_string(),
        ref_column: "id".to_string(),
        on_delete: Some("CASCADE".to_string()),
        on_update: None,
    }])
}

#[test]
fn test_lookup_table_exact_match() {
    let schema = SchemaModel::new(vec![products(), orders()]);

    let table = schema.lookup_table("orders").unwrap();
    assert_eq!(table.name, "orders");
    assert_eq!(table.columns.len(), 4);
    assert_eq!(table.relations.len(), 1);
}

#[test]
fn test_lookup_table_is_case_sensitive() {
    let schema = SchemaModel::new(vec![products()]);

    let err = schema.lookup_table("Products").unwrap_err();
    assert!(matches!(err, SeedbError::SchemaNotFound { ref table } if table == "Products"));
}

#[test]
fn test_lookup_table_is_idempotent() {
    let schema = SchemaModel::new(vec![products(), orders()]);

    let first = schema.lookup_table("products").unwrap().clone();
    let second = schema.lookup_table("products").unwrap().clone();
    assert_eq!(first, second);
}

#[test]
fn test_schema_helpers() {
    let schema = SchemaModel::new(vec![products(), orders()]);
    assert_eq!(schema.len(), 2);
    assert!(!schema.is_empty());
    assert_eq!(schema.table_names(), vec!["products", "orders"]);
    assert_eq!(schema.relation_count(), 1);
    assert!(SchemaModel::default().is_empty());
}

#[test]
fn test_column_type_matching_is_case_insensitive_containment() {
    assert!(Column::new("a", "VARCHAR(255)").type_contains("varchar"));
    assert!(Column::new("a", "int4").type_contains("int"));
    assert!(Column::new("a", "Timestamp With Time Zone").type_contains("timestamp"));
    assert!(!Column::new("a", "jsonb").type_contains("int"));
}

#[test]
fn test_identity_detection() {
    assert!(Column::new("id", "serial").is_identity());
    assert!(Column::new("id", "BIGSERIAL").is_identity());
    assert!(Column::new("id", "int GENERATED ALWAYS AS IDENTITY").is_identity());
    assert!(!Column::new("id", "integer").is_identity());

    let table = products();
    let names: Vec<_> = table
        .insertable_columns()
        .map(|column| column.name.as_str())
        .collect();
    assert_eq!(names, vec!["product_name", "price"]);
}

#[test]
fn test_selected_tables_keeps_insertion_order_and_ignores_duplicates() {
    let mut selection = SelectedTables::new();
    assert!(selection.insert("orders"));
    assert!(selection.insert("users"));
    assert!(!selection.insert("orders"));
    assert!(selection.insert("products"));

    assert_eq!(
        selection.iter().collect::<Vec<_>>(),
        vec!["orders", "users", "products"]
    );
    assert!(selection.remove("users"));
    assert!(!selection.remove("users"));
    assert_eq!(selection.len(), 2);
    assert!(!selection.contains("users"));
}

#[test]
fn test_selected_tables_from_iterator() {
    let selection: SelectedTables = ["a", "b", "a"].into_iter().collect();
    assert_eq!(selection.iter().collect::<Vec<_>>(), vec!["a", "b"]);
}

#[test]
fn test_sql_value_literals() {
    assert_eq!(SqlValue::Null.to_literal(), "NULL");
    assert_eq!(SqlValue::Integer(42).to_literal(), "42");
    assert_eq!(SqlValue::Decimal(100000.0).to_literal(), "100000.00");
    assert_eq!(SqlValue::Decimal(12.346).to_literal(), "12.35");
    assert_eq!(SqlValue::Boolean(true).to_literal(), "true");
    assert_eq!(
        SqlValue::Text("O'Brien".to_string()).to_literal(),
        "'O''Brien'"
    );

    let date = NaiveDate::from_ymd_opt(2021, 3, 4).unwrap();
    assert_eq!(SqlValue::Date(date).to_literal(), "'2021-03-04'");
    let timestamp = date.and_hms_opt(5, 6, 7).unwrap();
    assert_eq!(
        SqlValue::Timestamp(timestamp).to_literal(),
        "'2021-03-04 05:06:07'"
    );
}

#[test]
fn test_generated_record_accessors() {
    let mut record = GeneratedRecord::default();
    assert!(record.is_empty());

    record.push("product_name", SqlValue::Text("Lamp".to_string()));
    record.push("price", SqlValue::Decimal(9.5));

    assert_eq!(record.len(), 2);
    assert_eq!(record.literals(), vec!["'Lamp'", "9.50"]);
    assert_eq!(record.value_of("price"), Some(&SqlValue::Decimal(9.5)));
    assert_eq!(record.value_of("id"), None);
}

#[test]
fn test_schema_serialization_shape() {
    let schema = SchemaModel::new(vec![orders()]);
    let json = serde_json::to_value(&schema).unwrap();

    assert_eq!(json["tables"][0]["name"], "orders");
    assert_eq!(json["tables"][0]["columns"][0]["type"], "serial");
    assert_eq!(json["tables"][0]["relations"][0]["ref_table"], "users");
    assert!(json["tables"][0]["relations"][0].get("on_update").is_none());

    let parsed: SchemaModel = serde_json::from_value(json).unwrap();
    assert_eq!(parsed, schema);
}
