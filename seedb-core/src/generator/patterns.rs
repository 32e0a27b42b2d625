//! Built-in table-pattern overrides for common table shapes.
//!
//! Each dispatch recognises a handful of column names and returns `None`
//! for everything else, handing the column back to the type-based default.

use super::TablePattern;
use super::defaults::{
    random_decimal, random_email, random_password, random_product_name, random_timestamp,
    random_username,
};
use crate::{Result, models::Column, models::SqlValue};
use rand::RngCore;

/// Built-in patterns, in resolution order.
pub fn builtin_patterns() -> Vec<TablePattern> {
    vec![
        TablePattern::builtin(r"^users$", users),
        TablePattern::builtin(r"^orders$", orders),
        TablePattern::builtin(r"^products$", products),
    ]
}

fn users(column: &Column, rng: &mut dyn RngCore) -> Result<Option<SqlValue>> {
    Ok(match column.name.as_str() {
        "username" => Some(random_username(rng)),
        "email" => Some(random_email(rng)),
        "password" => Some(random_password(rng)),
        "created_at" => Some(random_timestamp(rng)),
        _ => None,
    })
}

fn orders(column: &Column, rng: &mut dyn RngCore) -> Result<Option<SqlValue>> {
    Ok(match column.name.as_str() {
        "order_date" => Some(random_timestamp(rng)),
        "total_amount" => Some(random_decimal(rng)),
        _ => None,
    })
}

fn products(column: &Column, rng: &mut dyn RngCore) -> Result<Option<SqlValue>> {
    Ok(match column.name.as_str() {
        "product_name" => Some(random_product_name(rng)),
        "price" => Some(random_decimal(rng)),
        _ => None,
    })
}
