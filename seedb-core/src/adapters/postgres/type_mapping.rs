//! PostgreSQL catalog types to schema column types.
//!
//! Column types keep PostgreSQL's short `udt_name` spelling (`int4`,
//! `varchar`, `timestamptz`) so the substring rules of the value generator
//! apply unchanged. Sequence-backed and identity integer columns become
//! `serial`, `bigserial` or `smallserial`.

/// Catalog facts about one column, as read from `information_schema.columns`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogType<'a> {
    pub data_type: &'a str,
    pub udt_name: &'a str,
    pub character_maximum_length: Option<i32>,
    pub numeric_precision: Option<i32>,
    pub numeric_scale: Option<i32>,
    pub auto_increment: bool,
}

/// Returns true when the column's value comes from a sequence or identity.
pub fn is_auto_increment(is_identity: &str, column_default: Option<&str>) -> bool {
    is_identity.eq_ignore_ascii_case("YES")
        || column_default.is_some_and(|default| default.starts_with("nextval("))
}

/// Maps catalog facts to the type string stored in the schema model.
pub fn column_type(catalog: &CatalogType<'_>) -> String {
    if catalog.auto_increment {
        return match catalog.udt_name {
            "int8" => "bigserial",
            "int2" => "smallserial",
            _ => "serial",
        }
        .to_string();
    }

    if catalog.data_type.eq_ignore_ascii_case("ARRAY") {
        return "array".to_string();
    }

    match (catalog.udt_name, catalog.character_maximum_length) {
        ("varchar" | "bpchar", Some(length)) => {
            return format!("{}({})", catalog.udt_name, length);
        }
        _ => {}
    }

    if catalog.udt_name == "numeric"
        && let (Some(precision), Some(scale)) = (catalog.numeric_precision, catalog.numeric_scale)
    {
        return format!("numeric({},{})", precision, scale);
    }

    catalog.udt_name.to_string()
}

/// Normalizes a referential action rule, e.g. `"cascade"` to `"CASCADE"`.
pub fn map_referential_action(action_rule: &str) -> Option<String> {
    let rule = action_rule.to_uppercase();
    match rule.as_str() {
        "CASCADE" | "SET NULL" | "SET DEFAULT" | "RESTRICT" | "NO ACTION" => Some(rule),
        _ => {
            tracing::warn!("Unknown referential action rule: '{}'", action_rule);
            None
        }
    }
}
