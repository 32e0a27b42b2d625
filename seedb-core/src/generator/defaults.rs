//! Type-based default values and the shared random helpers.

use crate::models::SqlValue;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use fake::Fake;
use fake::faker::internet::en::{Password, SafeEmail, Username};
use fake::faker::lorem::en::{Sentence, Words};
use rand::{Rng, RngCore};

/// Inclusive range used for integer-like columns.
pub const INTEGER_RANGE: std::ops::RangeInclusive<i64> = 1..=1000;

/// Inclusive range, in cents, used for decimal-like columns.
const DECIMAL_CENTS_RANGE: std::ops::RangeInclusive<i64> = 100..=10_000_000;

/// Number of days after the epoch start that random dates may fall on.
const DATE_SPAN_DAYS: i64 = 365 * 30;

/// Produces the default value for a declared column type.
///
/// The lowercased type is checked by substring in priority order: integer,
/// decimal, string, boolean, timestamp, date. Anything else is `NULL`.
pub fn type_default(data_type: &str, rng: &mut dyn RngCore) -> SqlValue {
    let data_type = data_type.to_ascii_lowercase();
    let has = |fragment: &str| data_type.contains(fragment);

    if has("int") {
        SqlValue::Integer(rng.random_range(INTEGER_RANGE))
    } else if has("numeric") || has("decimal") || has("float") {
        random_decimal(rng)
    } else if has("varchar") || has("text") {
        random_sentence(rng)
    } else if has("bool") {
        SqlValue::Boolean(true)
    } else if has("timestamp") {
        random_timestamp(rng)
    } else if has("date") {
        random_date(rng)
    } else {
        SqlValue::Null
    }
}

pub fn random_decimal(rng: &mut dyn RngCore) -> SqlValue {
    let cents = rng.random_range(DECIMAL_CENTS_RANGE);
    SqlValue::Decimal(cents as f64 / 100.0)
}

pub fn random_sentence(rng: &mut dyn RngCore) -> SqlValue {
    SqlValue::Text(Sentence(3..8).fake_with_rng(rng))
}

pub fn random_date(rng: &mut dyn RngCore) -> SqlValue {
    SqlValue::Date(random_naive_date(rng))
}

pub fn random_timestamp(rng: &mut dyn RngCore) -> SqlValue {
    let seconds: u32 = rng.random_range(0..86_400);
    let timestamp: NaiveDateTime = random_naive_date(rng)
        .and_hms_opt(seconds / 3600, seconds / 60 % 60, seconds % 60)
        .unwrap_or_default();
    SqlValue::Timestamp(timestamp)
}

fn random_naive_date(rng: &mut dyn RngCore) -> NaiveDate {
    let offset = rng.random_range(0..DATE_SPAN_DAYS);
    NaiveDate::from_ymd_opt(1995, 1, 1)
        .and_then(|start| start.checked_add_signed(Duration::days(offset)))
        .unwrap_or_default()
}

pub fn random_username(rng: &mut dyn RngCore) -> SqlValue {
    SqlValue::Text(Username().fake_with_rng(rng))
}

pub fn random_email(rng: &mut dyn RngCore) -> SqlValue {
    SqlValue::Text(SafeEmail().fake_with_rng(rng))
}

pub fn random_password(rng: &mut dyn RngCore) -> SqlValue {
    SqlValue::Text(Password(8..16).fake_with_rng(rng))
}

pub fn random_product_name(rng: &mut dyn RngCore) -> SqlValue {
    let words: Vec<String> = Words(2..4).fake_with_rng(rng);
    let name = words
        .iter()
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ");
    SqlValue::Text(name)
}
