//! B-tree suite: users and orders for range scans.

use crate::generator::{GeneratorError, SynthContext};
use crate::generators::{coin, money, pick_str, temporal, text, truncate};
use rand::Rng;
use seed_core::{ParamType, Record, TableSpec, UniquenessTracker};

const ORDER_STATUSES: &[&str] = &["pending", "completed", "shipped", "cancelled"];
const ORDER_CATEGORIES: &[&str] = &["electronics", "books", "clothing", "home", "sports"];

/// Referenced user ids default to the size of the users table.
const DEFAULT_MAX_USER_ID: u64 = 500_000;

pub(super) fn users_table() -> TableSpec {
    TableSpec::new("users")
        .column("username", ParamType::Text)
        .column("email", ParamType::Text)
        .column("age", ParamType::Int4)
        .column("salary", ParamType::Numeric)
        .column("created_date", ParamType::Date)
        .column("last_login", ParamType::Timestamp)
        .column("is_active", ParamType::Bool)
}

pub(super) fn orders_table() -> TableSpec {
    TableSpec::new("orders")
        .column("user_id", ParamType::Int8)
        .column("order_date", ParamType::Date)
        .column("amount", ParamType::Numeric)
        .column("status", ParamType::Text)
        .column("product_category", ParamType::Text)
}

pub(super) fn user(
    ctx: &mut SynthContext,
    _tracker: &mut UniquenessTracker,
    _index: u64,
) -> Result<Record, GeneratorError> {
    let now = ctx.now();
    let rng = ctx.rng();

    Ok(Record::new(vec![
        truncate(&text::username(rng), 50).into(),
        truncate(&text::email(rng), 100).into(),
        rng.gen_range(18..=80i32).into(),
        money(rng, 30_000.0, 150_000.0).into(),
        temporal::date_within_days(rng, now, 5 * 365).into(),
        temporal::datetime_within_days(rng, now, 365).into(),
        coin(rng).into(),
    ]))
}

pub(super) fn order(
    ctx: &mut SynthContext,
    _tracker: &mut UniquenessTracker,
    _index: u64,
) -> Result<Record, GeneratorError> {
    let user_id = ctx.foreign_key(DEFAULT_MAX_USER_ID);
    let now = ctx.now();
    let rng = ctx.rng();

    Ok(Record::new(vec![
        user_id.into(),
        temporal::date_within_days(rng, now, 2 * 365).into(),
        money(rng, 10.0, 1000.0).into(),
        pick_str(rng, ORDER_STATUSES).into(),
        pick_str(rng, ORDER_CATEGORIES).into(),
    ]))
}
